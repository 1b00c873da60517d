//! Polling Location View

use crate::api::PollingLocationResponse;
use crate::render::container::{ids, PageShell};
use crate::render::error::RenderResult;
use crate::render::node::{Element, Node};

/// Shown when the backend has no polling location for the address
pub const POLLING_NOT_FOUND_MESSAGE: &str =
    "Polling location not found. Please verify that you have entered a valid address.";

/// Shown when the polling location lookup could not be completed
pub const POLLING_UNAVAILABLE_MESSAGE: &str =
    "The polling location service could not be reached. Please try again later.";

/// Address lines of one polling location
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollingView {
    pub lines: Vec<String>,
}

impl PollingView {
    pub fn new(response: &PollingLocationResponse) -> Self {
        Self {
            lines: response.address_lines(),
        }
    }

    /// No address fields came back
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Write the address into `poll-address`, or the not-found message
    pub fn apply(&self, shell: &mut PageShell) -> RenderResult<()> {
        let container = shell.container_mut(ids::POLL_ADDRESS)?;
        if self.is_empty() {
            container.set_text(POLLING_NOT_FOUND_MESSAGE);
        } else {
            container.replace_children(render_address_lines(&self.lines));
        }
        Ok(())
    }
}

/// Each line followed by a line break
pub fn render_address_lines(lines: &[String]) -> Vec<Node> {
    lines
        .iter()
        .flat_map(|line| [Node::text(line.as_str()), Element::new("br").into()])
        .collect()
}
