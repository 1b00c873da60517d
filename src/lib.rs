//! # Voter Central
//!
//! Presentation layer of a civic-information site: fetches election,
//! candidate and polling-location data from the backend over HTTP and
//! renders it to HTML.
//!
//! ## Modules
//!
//! - [`query`]: Page query string parsing
//! - [`api`]: Backend endpoints, response schema and fetchers
//! - [`render`]: Element tree, page shell containers and views
//! - [`pages`]: Page-load flows (parse → fetch → render)
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use voter_central::api::{BackendClient, ReqwestFetcher};
//! use voter_central::config::Config;
//! use voter_central::pages::{load_directory, Page};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let fetcher = ReqwestFetcher::new(config.backend.request_timeout())?;
//!     let client = BackendClient::new(config.backend.base_url.clone(), fetcher);
//!
//!     let mut shell = Page::Directory.shell();
//!     let outcome = load_directory(
//!         &client,
//!         &config.render,
//!         "address=123%20Main%20St&listAllElections=false",
//!         &mut shell,
//!     )
//!     .await;
//!
//!     println!("{:?}\n{}", outcome, shell.to_html());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod pages;
pub mod query;
pub mod render;

// Re-export top-level types for convenience
pub use api::{
    BackendClient, Candidate, CandidateDetail, CandidateId, CandidateResponse, DirectoryResponse,
    Election, FetchError, FetchResult, FetchedBody, Fetcher, NewsArticle,
    PollingLocationResponse, Position,
};

#[cfg(not(target_arch = "wasm32"))]
pub use api::ReqwestFetcher;

pub use config::{BackendConfig, Config, ConfigError, LoggingConfig, RenderConfig};

pub use pages::{
    load_candidate, load_directory, load_page, load_polling_location, refilter_directory_query,
    Page, PageFailure, PageOutcome,
};

pub use query::{CandidateQuery, DirectoryQuery, PollingQuery, QueryError, StateFilter};

pub use render::{CandidateView, Container, DirectoryView, Element, Node, PageShell, PollingView};
