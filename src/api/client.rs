//! Backend API Client
//!
//! Typed access to the three backend endpoints on top of any [`Fetcher`].

use serde::de::DeserializeOwned;

use crate::api::dto::{CandidateResponse, DirectoryResponse, PollingLocationResponse};
use crate::api::error::{FetchError, FetchResult};
use crate::api::fetcher::{FetchedBody, Fetcher};
use crate::api::request::{request_url, RequestParams};
use crate::query::{CandidateQuery, DirectoryQuery, PollingQuery};

/// Client for the civic-information backend
pub struct BackendClient<F> {
    base_url: String,
    fetcher: F,
}

impl<F: Fetcher> BackendClient<F> {
    /// Create a client. An empty `base_url` issues site-relative requests.
    pub fn new(base_url: impl Into<String>, fetcher: F) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, fetcher }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Request URL for a set of page parameters
    pub fn url_for<Q: RequestParams>(&self, query: &Q) -> String {
        request_url(&self.base_url, query)
    }

    /// Elections (with positions and candidates) relevant to the query
    pub async fn elections(&self, query: &DirectoryQuery) -> FetchResult<DirectoryResponse> {
        let response: DirectoryResponse = self.get_json(query).await?;
        tracing::debug!(
            elections = response.elections_data.len(),
            alert = response.alert.is_some(),
            "Fetched elections"
        );
        Ok(response)
    }

    /// Official information and news articles for one candidate
    pub async fn candidate(&self, query: &CandidateQuery) -> FetchResult<CandidateResponse> {
        let response: CandidateResponse = self.get_json(query).await?;
        tracing::debug!(
            candidate_id = %query.candidate_id,
            articles = response.news_articles_data.len(),
            "Fetched candidate"
        );
        Ok(response)
    }

    /// Polling location for an address.
    ///
    /// The backend answers an address it has no polling location for with
    /// an empty 200 body, which decodes as a response without an address.
    pub async fn polling_location(
        &self,
        query: &PollingQuery,
    ) -> FetchResult<PollingLocationResponse> {
        let fetched = self.get_success(query).await?;
        if fetched.body.trim().is_empty() {
            tracing::debug!("Empty polling location body");
            return Ok(PollingLocationResponse::default());
        }
        serde_json::from_str(&fetched.body).map_err(FetchError::Decode)
    }

    async fn get_json<Q: RequestParams, T: DeserializeOwned>(&self, query: &Q) -> FetchResult<T> {
        let fetched = self.get_success(query).await?;
        serde_json::from_str(&fetched.body).map_err(FetchError::Decode)
    }

    async fn get_success<Q: RequestParams>(&self, query: &Q) -> FetchResult<FetchedBody> {
        let url = self.url_for(query);
        tracing::debug!(url = %url, "GET");

        let fetched = self.fetcher.get(&url).await?;
        if !fetched.is_success() {
            return Err(FetchError::status(fetched.status, &fetched.body));
        }
        Ok(fetched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fetcher::testing::CannedFetcher;
    use crate::api::fetcher::ReqwestFetcher;
    use axum::{extract::Query, routing::get, Json, Router};
    use serde_json::json;
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_elections_request_and_decode() {
        let fetcher = CannedFetcher::json(json!({
            "electionsData": [{"name": "General", "date": "2020-11-03", "positions": []}]
        }));
        let client = BackendClient::new("http://backend/", &fetcher);

        let response = client
            .elections(&DirectoryQuery::for_address("123 Main St"))
            .await
            .unwrap();

        assert_eq!(response.elections_data[0].name, "General");
        assert_eq!(
            fetcher.requests(),
            vec!["http://backend/data?address=123%20Main%20St&listAllElections=false"]
        );
    }

    #[tokio::test]
    async fn test_status_error() {
        let fetcher = CannedFetcher::with_status(500, "boom");
        let client = BackendClient::new("", fetcher);

        let err = client.candidate(&CandidateQuery::new("1")).await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_decode_error() {
        let fetcher = CannedFetcher::with_status(200, "<html>not json</html>");
        let client = BackendClient::new("", fetcher);

        let err = client
            .polling_location(&PollingQuery::new("1 Main St").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[tokio::test]
    async fn test_blank_polling_body_has_no_address() {
        let fetcher = CannedFetcher::with_status(200, "");
        let client = BackendClient::new("", fetcher);

        let response = client
            .polling_location(&PollingQuery::new("1 Nowhere Rd").unwrap())
            .await
            .unwrap();
        assert!(response.address.is_none());

        // Other endpoints still treat a blank body as a broken response.
        let fetcher = CannedFetcher::with_status(200, "  ");
        let client = BackendClient::new("", fetcher);
        let err = client.elections(&DirectoryQuery::all_elections()).await.unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[tokio::test]
    async fn test_network_error_passes_through() {
        let fetcher = CannedFetcher::unreachable("connection refused");
        let client = BackendClient::new("", &fetcher);

        let err = client
            .elections(&DirectoryQuery::all_elections())
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Network(_)));
        assert_eq!(fetcher.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_against_http_backend() {
        let app = Router::new().route(
            "/pollingLocation",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                Json(json!({
                    "address": {"locationName": "Library", "line1": params["address"].clone()}
                }))
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = BackendClient::new(format!("http://{}", addr), ReqwestFetcher::new(None).unwrap());
        let response = client
            .polling_location(&PollingQuery::new("9 Elm St").unwrap())
            .await
            .unwrap();

        assert_eq!(response.address_lines(), vec!["Library", "9 Elm St"]);
    }
}
