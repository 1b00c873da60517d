//! Page-Load Flows
//!
//! Each page runs one flow when it loads: parse the query string, issue a
//! single backend request, build the view, write it into the page shell.
//!
//! Every flow ends in a [`PageOutcome`]. Failures never leave the shell
//! half rendered: the page's containers are cleared and a message tells
//! the user whether there was simply nothing to show or the request itself
//! failed.

use thiserror::Error;
use tracing::Instrument;

use crate::api::{request, BackendClient, FetchError, Fetcher};
use crate::config::RenderConfig;
use crate::query::{
    CandidateQuery, DirectoryQuery, PollingQuery, QueryError, QueryResult, StateFilter,
};
use crate::render::polling::{POLLING_NOT_FOUND_MESSAGE, POLLING_UNAVAILABLE_MESSAGE};
use crate::render::{ids, CandidateView, DirectoryView, PageShell, PollingView, RenderError};

/// Shown when a page's backend request fails
pub const REQUEST_FAILED_MESSAGE: &str =
    "We couldn't load this information right now. Please try again later.";

/// Shown when the page address lacks or garbles its parameters
pub const INVALID_LINK_MESSAGE: &str =
    "This link is missing information needed to load the page.";

/// Shown when the backend does not know the requested candidate
pub const CANDIDATE_NOT_FOUND_MESSAGE: &str = "This candidate could not be found.";

/// Shown when the polling lookup is submitted without an address
pub const ENTER_ADDRESS_MESSAGE: &str = "Please enter an address to look up.";

/// Pages of the site that run a flow on load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Directory,
    Candidate,
    PollingLocation,
}

impl Page {
    /// Identify a page by the file name at the end of its path
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let file = path.rsplit('/').next().unwrap_or_default();
        match file {
            "directory.html" => Some(Page::Directory),
            "candidate.html" => Some(Page::Candidate),
            "pollingLocation.html" | "polling-location.html" => Some(Page::PollingLocation),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Page::Directory => "directory",
            Page::Candidate => "candidate",
            Page::PollingLocation => "polling_location",
        }
    }

    /// Empty shell holding this page's render targets
    pub fn shell(&self) -> PageShell {
        match self {
            Page::Directory => PageShell::directory(),
            Page::Candidate => PageShell::candidate(),
            Page::PollingLocation => PageShell::polling(),
        }
    }
}

/// Why a flow could not render its data
#[derive(Error, Debug)]
pub enum PageFailure {
    #[error("Invalid page query: {0}")]
    Query(#[from] QueryError),

    #[error("Request failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Render failed: {0}")]
    Render(#[from] RenderError),
}

/// How a page-load flow ended
#[derive(Debug)]
pub enum PageOutcome {
    /// Data was found and rendered
    Rendered,
    /// The request succeeded but there was nothing to show for the input
    NoData,
    /// The flow could not complete; a failure message was rendered
    Failed(PageFailure),
}

impl PageOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, PageOutcome::Rendered)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, PageOutcome::Failed(_))
    }
}

/// Run the flow of `page` against `query_string`
pub async fn load_page<F: Fetcher>(
    page: Page,
    client: &BackendClient<F>,
    config: &RenderConfig,
    query_string: &str,
    shell: &mut PageShell,
) -> PageOutcome {
    match page {
        Page::Directory => load_directory(client, config, query_string, shell).await,
        Page::Candidate => load_candidate(client, config, query_string, shell).await,
        Page::PollingLocation => match PollingQuery::parse(query_string) {
            Ok(query) => load_polling_location(client, &query.address, shell).await,
            Err(e) => fail_polling(shell, e.into()),
        },
    }
}

/// Directory page: elections, positions and candidates for an address
pub async fn load_directory<F: Fetcher>(
    client: &BackendClient<F>,
    config: &RenderConfig,
    query_string: &str,
    shell: &mut PageShell,
) -> PageOutcome {
    let span = load_span(Page::Directory);
    async {
        let query = match DirectoryQuery::parse(query_string) {
            Ok(query) => query,
            Err(e) => return fail_with_alert(shell, INVALID_LINK_MESSAGE, e.into()),
        };

        let response = match client.elections(&query).await {
            Ok(response) => response,
            Err(e) => return fail_with_alert(shell, REQUEST_FAILED_MESSAGE, e.into()),
        };

        let view = DirectoryView::new(response, &query);
        if let Err(e) = view.apply(shell, config) {
            return fail_with_alert(shell, REQUEST_FAILED_MESSAGE, e.into());
        }

        tracing::info!(elections = view.elections.len(), "Directory rendered");
        if view.is_empty() {
            PageOutcome::NoData
        } else {
            PageOutcome::Rendered
        }
    }
    .instrument(span)
    .await
}

/// Candidate page: official information, news articles, social media
pub async fn load_candidate<F: Fetcher>(
    client: &BackendClient<F>,
    config: &RenderConfig,
    query_string: &str,
    shell: &mut PageShell,
) -> PageOutcome {
    let span = load_span(Page::Candidate);
    async {
        let query = match CandidateQuery::parse(query_string) {
            Ok(query) => query,
            Err(e) => return fail_with_alert(shell, INVALID_LINK_MESSAGE, e.into()),
        };

        let response = match client.candidate(&query).await {
            Ok(response) => response,
            Err(e) if e.is_not_found() => {
                tracing::info!(candidate_id = %query.candidate_id, "Candidate not found");
                shell.clear();
                return match shell.container_mut(ids::ALERT) {
                    Ok(alert) => {
                        alert.set_text(CANDIDATE_NOT_FOUND_MESSAGE);
                        PageOutcome::NoData
                    }
                    Err(e) => PageOutcome::Failed(e.into()),
                };
            }
            Err(e) => return fail_with_alert(shell, REQUEST_FAILED_MESSAGE, e.into()),
        };

        let view = CandidateView::new(response, query.election_name.clone());
        if let Err(e) = view.apply(shell, config) {
            return fail_with_alert(shell, REQUEST_FAILED_MESSAGE, e.into());
        }

        tracing::info!(
            candidate_id = %query.candidate_id,
            articles = view.articles.len(),
            "Candidate rendered"
        );
        PageOutcome::Rendered
    }
    .instrument(span)
    .await
}

/// Directory query string with its state filter replaced by `state`.
///
/// Used when the state dropdown changes: the rest of the page's query is
/// kept and `load_directory` runs again with the result.
pub fn refilter_directory_query(page_query: &str, state: &str) -> QueryResult<String> {
    let query = DirectoryQuery::parse(page_query)?.with_state_filter(StateFilter::parse(state)?);
    Ok(request::query_string(&query))
}

/// Polling location lookup for an address typed by the user
pub async fn load_polling_location<F: Fetcher>(
    client: &BackendClient<F>,
    address: &str,
    shell: &mut PageShell,
) -> PageOutcome {
    let span = load_span(Page::PollingLocation);
    async {
        let query = match PollingQuery::new(address) {
            Ok(query) => query,
            Err(e) => return fail_polling(shell, e.into()),
        };

        let response = match client.polling_location(&query).await {
            Ok(response) => response,
            Err(e) if e.is_not_found() => return polling_not_found(shell),
            Err(e) => return fail_polling(shell, e.into()),
        };

        let view = PollingView::new(&response);
        if let Err(e) = view.apply(shell) {
            return PageOutcome::Failed(e.into());
        }

        if view.is_empty() {
            tracing::info!("Polling location not found");
            PageOutcome::NoData
        } else {
            tracing::info!(lines = view.lines.len(), "Polling location rendered");
            PageOutcome::Rendered
        }
    }
    .instrument(span)
    .await
}

fn load_span(page: Page) -> tracing::Span {
    let load_id = uuid::Uuid::new_v4();
    tracing::info_span!("page_load", page = page.name(), load_id = %load_id)
}

/// Clear the shell and explain the failure in the alert element
fn fail_with_alert(shell: &mut PageShell, message: &str, failure: PageFailure) -> PageOutcome {
    tracing::warn!(error = %failure, "Page load failed");
    shell.clear();
    if let Ok(alert) = shell.container_mut(ids::ALERT) {
        alert.set_text(message);
    }
    PageOutcome::Failed(failure)
}

fn polling_not_found(shell: &mut PageShell) -> PageOutcome {
    tracing::info!("Polling location not found");
    match shell.container_mut(ids::POLL_ADDRESS) {
        Ok(container) => {
            container.set_text(POLLING_NOT_FOUND_MESSAGE);
            PageOutcome::NoData
        }
        Err(e) => PageOutcome::Failed(e.into()),
    }
}

fn fail_polling(shell: &mut PageShell, failure: PageFailure) -> PageOutcome {
    tracing::warn!(error = %failure, "Polling location lookup failed");
    let message = match &failure {
        PageFailure::Query(_) => ENTER_ADDRESS_MESSAGE,
        _ => POLLING_UNAVAILABLE_MESSAGE,
    };
    if let Ok(container) = shell.container_mut(ids::POLL_ADDRESS) {
        container.set_text(message);
    }
    PageOutcome::Failed(failure)
}
