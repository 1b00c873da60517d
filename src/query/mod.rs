//! Page Query Parser
//!
//! Turns the query string of the current page into typed parameters:
//!
//! - **Pairs**: standard key/value query string decoding
//! - **Params**: per-page parameter sets with validation
//!
//! # Example
//!
//! ```rust
//! use voter_central::query::{DirectoryQuery, StateFilter};
//!
//! let query = DirectoryQuery::parse("?address=123%20Main%20St&listAllElections=false").unwrap();
//! assert_eq!(query.address, "123 Main St");
//! assert_eq!(query.state_filter, StateFilter::Any);
//! ```

mod error;
mod pairs;
mod params;

pub use error::{QueryError, QueryResult};
pub use pairs::{parse_pairs, QueryPairs};
pub use params::{
    CandidateQuery, DirectoryQuery, PollingQuery, StateFilter, NO_STATE_FILTER, STATES,
};
