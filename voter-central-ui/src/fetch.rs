//! Browser fetcher
//!
//! Same-origin GETs through the window's fetch.

use async_trait::async_trait;
use gloo_net::http::Request;
use voter_central::api::{FetchError, FetchResult, FetchedBody, Fetcher};

/// Backend origin: the site is served by the backend itself
pub fn backend_base() -> String {
    web_sys::window()
        .and_then(|window| window.location().origin().ok())
        .unwrap_or_default()
}

pub struct BrowserFetcher;

#[async_trait(?Send)]
impl Fetcher for BrowserFetcher {
    async fn get(&self, url: &str) -> FetchResult<FetchedBody> {
        let response = Request::get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(FetchedBody { status, body })
    }
}
