//! Request URLs
//!
//! Maps page parameters onto backend endpoints and builds percent-encoded
//! request URLs.

use crate::query::{CandidateQuery, DirectoryQuery, PollingQuery};

/// Backend endpoints consumed by the pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Election listing for an address
    Data,
    /// Candidate detail with news articles
    Candidate,
    /// Polling location for an address
    PollingLocation,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Data => "/data",
            Endpoint::Candidate => "/candidate",
            Endpoint::PollingLocation => "/pollingLocation",
        }
    }
}

/// Page parameters that map onto exactly one endpoint
pub trait RequestParams {
    const ENDPOINT: Endpoint;

    /// Query parameters in the order they are sent
    fn to_params(&self) -> Vec<(&'static str, String)>;
}

impl RequestParams for DirectoryQuery {
    const ENDPOINT: Endpoint = Endpoint::Data;

    fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("address", self.address.clone()),
            ("listAllElections", self.list_all_elections.to_string()),
        ];
        if let Some(state) = self.state_filter.as_param() {
            params.push(("stateFilter", state.to_string()));
        }
        params
    }
}

impl RequestParams for CandidateQuery {
    const ENDPOINT: Endpoint = Endpoint::Candidate;

    fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("candidateId", self.candidate_id.to_string())];
        if let Some(election_name) = &self.election_name {
            params.push(("electionName", election_name.clone()));
        }
        params
    }
}

impl RequestParams for PollingQuery {
    const ENDPOINT: Endpoint = Endpoint::PollingLocation;

    fn to_params(&self) -> Vec<(&'static str, String)> {
        vec![("address", self.address.clone())]
    }
}

/// Build `{base}{path}?k=v&...` with keys and values percent-encoded.
///
/// Spaces are always encoded as `%20`. An empty `base` yields a
/// site-relative URL.
pub fn build_url(base: &str, endpoint: Endpoint, params: &[(&str, String)]) -> String {
    let mut url = format!("{}{}", base.trim_end_matches('/'), endpoint.path());
    if !params.is_empty() {
        url.push('?');
        url.push_str(&encode_params(params));
    }
    url
}

/// `k=v&...` with keys and values percent-encoded, no leading `?`
pub fn encode_params(params: &[(&str, String)]) -> String {
    let mut encoded = String::new();
    for (i, (key, value)) in params.iter().enumerate() {
        if i > 0 {
            encoded.push('&');
        }
        encoded.push_str(&urlencoding::encode(key));
        encoded.push('=');
        encoded.push_str(&urlencoding::encode(value));
    }
    encoded
}

/// Build the request URL for a set of page parameters
pub fn request_url<Q: RequestParams>(base: &str, query: &Q) -> String {
    build_url(base, Q::ENDPOINT, &query.to_params())
}

/// Page query string carrying the same parameters as the request
pub fn query_string<Q: RequestParams>(query: &Q) -> String {
    encode_params(&query.to_params())
}
