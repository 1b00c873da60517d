//! Backend API
//!
//! Client side of the civic-information backend.
//!
//! # Endpoints
//!
//! - `GET /data?address=..&listAllElections=..[&stateFilter=..]` - Elections
//! - `GET /candidate?candidateId=..[&electionName=..]` - Candidate detail
//! - `GET /pollingLocation?address=..` - Polling location
//!
//! # Example
//!
//! ```rust,ignore
//! use voter_central::api::{BackendClient, ReqwestFetcher};
//! use voter_central::query::DirectoryQuery;
//!
//! let client = BackendClient::new("http://localhost:8080", ReqwestFetcher::new(None)?);
//! let response = client.elections(&DirectoryQuery::for_address("123 Main St")).await?;
//! println!("{} elections", response.elections_data.len());
//! ```

pub mod client;
pub mod dto;
pub mod error;
pub mod fetcher;
pub mod request;

pub use client::BackendClient;
pub use dto::{
    Candidate, CandidateDetail, CandidateId, CandidateResponse, DirectoryResponse, Election,
    NewsArticle, PollingLocationResponse, Position,
};
pub use error::{FetchError, FetchResult};
pub use fetcher::{FetchedBody, Fetcher};
#[cfg(not(target_arch = "wasm32"))]
pub use fetcher::ReqwestFetcher;
pub use request::{build_url, encode_params, query_string, request_url, Endpoint, RequestParams};
