//! Data Fetcher
//!
//! A single GET against the backend. Implementations differ per platform:
//! `reqwest` natively, the browser's fetch in the WASM frontend.

use async_trait::async_trait;

use crate::api::error::{FetchError, FetchResult};

/// Raw response of one GET
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedBody {
    pub status: u16,
    pub body: String,
}

impl FetchedBody {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues one GET and waits for the whole body.
///
/// No retries, no caching. Futures need not be `Send` so browser
/// implementations qualify.
#[async_trait(?Send)]
pub trait Fetcher {
    async fn get(&self, url: &str) -> FetchResult<FetchedBody>;
}

#[async_trait(?Send)]
impl<T: Fetcher + ?Sized> Fetcher for &T {
    async fn get(&self, url: &str) -> FetchResult<FetchedBody> {
        (**self).get(url).await
    }
}

/// Native fetcher backed by a `reqwest` client
#[cfg(not(target_arch = "wasm32"))]
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

#[cfg(not(target_arch = "wasm32"))]
impl ReqwestFetcher {
    /// Create a fetcher. Without a timeout a request waits for as long as
    /// the connection stays open.
    pub fn new(timeout: Option<std::time::Duration>) -> FetchResult<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("voter-central/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| FetchError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait(?Send)]
impl Fetcher for ReqwestFetcher {
    async fn get(&self, url: &str) -> FetchResult<FetchedBody> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_reqwest_error)?;

        Ok(FetchedBody { status, body })
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn map_reqwest_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Network(e.to_string())
    }
}

/// In-memory fetcher for tests: answers every GET with one canned result
/// and records the requested URLs.
#[cfg(test)]
pub mod testing {
    use super::*;
    use std::cell::RefCell;

    pub struct CannedFetcher {
        response: Result<FetchedBody, String>,
        requests: RefCell<Vec<String>>,
    }

    impl CannedFetcher {
        pub fn json(body: serde_json::Value) -> Self {
            Self::with_status(200, &body.to_string())
        }

        pub fn with_status(status: u16, body: &str) -> Self {
            Self {
                response: Ok(FetchedBody {
                    status,
                    body: body.to_string(),
                }),
                requests: RefCell::new(Vec::new()),
            }
        }

        pub fn unreachable(message: &str) -> Self {
            Self {
                response: Err(message.to_string()),
                requests: RefCell::new(Vec::new()),
            }
        }

        pub fn requests(&self) -> Vec<String> {
            self.requests.borrow().clone()
        }
    }

    #[async_trait(?Send)]
    impl Fetcher for CannedFetcher {
        async fn get(&self, url: &str) -> FetchResult<FetchedBody> {
            self.requests.borrow_mut().push(url.to_string());
            match &self.response {
                Ok(body) => Ok(body.clone()),
                Err(message) => Err(FetchError::Network(message.clone())),
            }
        }
    }
}
