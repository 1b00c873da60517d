//! Render Targets
//!
//! Containers are the elements of the page shell that views write into.
//! Writing always clears the container first; nothing from an earlier
//! render survives.

use std::fmt::Write;

use crate::render::error::{RenderError, RenderResult};
use crate::render::node::{Element, Escaped, Node};

/// Element ids of the page shell
pub mod ids {
    pub const ELECTIONS: &str = "elections-container";
    pub const ELECTION_NAV: &str = "election-nav";
    pub const STATE_FILTER: &str = "state-filter";
    pub const ALERT: &str = "alert";
    pub const OFFICIAL_INFO: &str = "official-info-container";
    pub const NEWS_ARTICLES: &str = "news-articles-container";
    pub const SOCIAL_MEDIA: &str = "social-media-container";
    pub const POLL_ADDRESS: &str = "poll-address";
    pub const POLLING_LOCATION_INPUT: &str = "polling-location-input";
}

/// One element of the page shell, identified by id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    id: String,
    children: Vec<Node>,
}

impl Container {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Clear, then append `children` in order
    pub fn replace_children(&mut self, children: Vec<Node>) {
        self.children = children;
    }

    /// Clear, then set a single text child (empty text leaves it empty)
    pub fn set_text(&mut self, text: &str) {
        self.children.clear();
        if !text.is_empty() {
            self.children.push(Node::text(text));
        }
    }

    pub fn clear(&mut self) {
        self.children.clear();
    }

    /// Child elements, skipping text nodes
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    pub fn text_content(&self) -> String {
        self.children.iter().map(Node::text_content).collect()
    }

    /// HTML of the children only, as assigned to `innerHTML`
    pub fn inner_html(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            let _ = child.write_html(&mut out);
        }
        out
    }

    /// HTML of the container element including its children
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        let _ = write!(out, "<div id=\"{}\">{}</div>", Escaped(&self.id), self.inner_html());
        out
    }
}

/// The load-bearing containers of one page, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageShell {
    containers: Vec<Container>,
}

impl PageShell {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            containers: ids.into_iter().map(Container::new).collect(),
        }
    }

    /// Shell of the directory (election listing) page
    pub fn directory() -> Self {
        Self::new([ids::ALERT, ids::STATE_FILTER, ids::ELECTION_NAV, ids::ELECTIONS])
    }

    /// Shell of the candidate detail page
    pub fn candidate() -> Self {
        Self::new([
            ids::ALERT,
            ids::OFFICIAL_INFO,
            ids::NEWS_ARTICLES,
            ids::SOCIAL_MEDIA,
        ])
    }

    /// Shell of the polling location page
    pub fn polling() -> Self {
        Self::new([ids::POLL_ADDRESS])
    }

    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    pub fn get(&self, id: &str) -> Option<&Container> {
        self.containers.iter().find(|c| c.id == id)
    }

    pub fn container(&self, id: &str) -> RenderResult<&Container> {
        self.get(id)
            .ok_or_else(|| RenderError::MissingContainer(id.to_string()))
    }

    pub fn container_mut(&mut self, id: &str) -> RenderResult<&mut Container> {
        self.containers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| RenderError::MissingContainer(id.to_string()))
    }

    /// Clear every container
    pub fn clear(&mut self) {
        for container in &mut self.containers {
            container.clear();
        }
    }

    /// All containers serialized in document order, one per line
    pub fn to_html(&self) -> String {
        self.containers
            .iter()
            .map(Container::to_html)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
