//! Typed page parameters
//!
//! Each page of the site reads a fixed set of named parameters from its
//! query string. These types hold them after validation.

use std::fmt;

use crate::api::CandidateId;
use crate::query::error::{QueryError, QueryResult};
use crate::query::pairs::QueryPairs;

/// Sentinel option of the state filter dropdown meaning "no filter"
pub const NO_STATE_FILTER: &str = "--";

/// State filter dropdown options, in display order
pub const STATES: [&str; 51] = [
    NO_STATE_FILTER, "AL", "AK", "AR", "AZ", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "IA",
    "ID", "IL", "IN", "KS", "KY", "LA", "MA", "MD", "ME", "MI", "MN", "MO", "MS", "MT", "NC",
    "ND", "NE", "NH", "NJ", "NM", "NV", "NY", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN",
    "TX", "UT", "VA", "VT", "WA", "WI", "WV", "WY",
];

/// Restricts an all-elections listing to one state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StateFilter {
    #[default]
    Any,
    State(String),
}

impl StateFilter {
    /// Parse a dropdown value. `--` and the empty string mean no filter.
    pub fn parse(value: &str) -> QueryResult<Self> {
        let value = value.trim();
        if value.is_empty() || value == NO_STATE_FILTER {
            return Ok(StateFilter::Any);
        }

        let code = value.to_ascii_uppercase();
        if STATES[1..].contains(&code.as_str()) {
            Ok(StateFilter::State(code))
        } else {
            Err(QueryError::InvalidParameter {
                name: "stateFilter",
                value: value.to_string(),
                reason: "expected a two-letter state code or '--'".to_string(),
            })
        }
    }

    /// Value to send to the backend, `None` when unfiltered
    pub fn as_param(&self) -> Option<&str> {
        match self {
            StateFilter::Any => None,
            StateFilter::State(code) => Some(code),
        }
    }

    /// Dropdown value, `--` when unfiltered
    pub fn as_str(&self) -> &str {
        self.as_param().unwrap_or(NO_STATE_FILTER)
    }
}

impl fmt::Display for StateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of the directory (election listing) page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryQuery {
    pub address: String,
    pub list_all_elections: bool,
    pub state_filter: StateFilter,
}

impl DirectoryQuery {
    /// Elections relevant to one address
    pub fn for_address(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            list_all_elections: false,
            state_filter: StateFilter::Any,
        }
    }

    /// Every known election, optionally narrowed by state
    pub fn all_elections() -> Self {
        Self {
            address: String::new(),
            list_all_elections: true,
            state_filter: StateFilter::Any,
        }
    }

    pub fn with_state_filter(mut self, filter: StateFilter) -> Self {
        self.state_filter = filter;
        self
    }

    /// Parse `address`, `listAllElections` and `stateFilter`.
    ///
    /// `address` may only be omitted when listing all elections.
    pub fn parse(query: &str) -> QueryResult<Self> {
        let pairs = QueryPairs::parse(query)?;

        let list_all_elections = match pairs.get_non_empty("listAllElections") {
            Some(value) => parse_bool("listAllElections", value)?,
            None => false,
        };

        let address = match pairs.get_non_empty("address") {
            Some(address) => address.trim().to_string(),
            None if list_all_elections => String::new(),
            None => return Err(QueryError::MissingParameter("address")),
        };

        let state_filter = match pairs.get("stateFilter") {
            Some(value) => StateFilter::parse(value)?,
            None => StateFilter::Any,
        };

        Ok(Self {
            address,
            list_all_elections,
            state_filter,
        })
    }
}

/// Parameters of the candidate detail page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateQuery {
    pub candidate_id: CandidateId,
    pub election_name: Option<String>,
}

impl CandidateQuery {
    pub fn new(candidate_id: impl Into<CandidateId>) -> Self {
        Self {
            candidate_id: candidate_id.into(),
            election_name: None,
        }
    }

    pub fn in_election(mut self, election_name: impl Into<String>) -> Self {
        self.election_name = Some(election_name.into());
        self
    }

    /// Parse `candidateId` (required) and `electionName` (optional)
    pub fn parse(query: &str) -> QueryResult<Self> {
        let pairs = QueryPairs::parse(query)?;

        let candidate_id = pairs
            .get_non_empty("candidateId")
            .map(|id| CandidateId::from(id.trim()))
            .ok_or(QueryError::MissingParameter("candidateId"))?;

        let election_name = pairs.get_non_empty("electionName").map(str::to_string);

        Ok(Self {
            candidate_id,
            election_name,
        })
    }
}

/// Parameters of the polling location lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollingQuery {
    pub address: String,
}

impl PollingQuery {
    /// Build from user input. Blank input is rejected.
    pub fn new(address: &str) -> QueryResult<Self> {
        let address = address.trim();
        if address.is_empty() {
            return Err(QueryError::MissingParameter("address"));
        }
        Ok(Self {
            address: address.to_string(),
        })
    }

    /// Parse `address` from a query string
    pub fn parse(query: &str) -> QueryResult<Self> {
        let pairs = QueryPairs::parse(query)?;
        Self::new(pairs.get("address").unwrap_or_default())
    }
}

fn parse_bool(name: &'static str, value: &str) -> QueryResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(QueryError::InvalidParameter {
            name,
            value: value.to_string(),
            reason: "expected 'true' or 'false'".to_string(),
        }),
    }
}
