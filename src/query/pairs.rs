//! Query string tokenizer
//!
//! Splits `application/x-www-form-urlencoded` text into decoded key/value
//! pairs. Keys are looked up by name, so parameter order never matters.

use nom::{
    bytes::complete::take_while,
    character::complete::char,
    combinator::opt,
    multi::separated_list0,
    sequence::{pair, preceded},
    IResult,
};

use crate::query::error::{QueryError, QueryResult};

/// Decoded query string pairs, in the order they appeared
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryPairs {
    pairs: Vec<(String, String)>,
}

impl QueryPairs {
    /// Parse a raw query string. A leading `?` is ignored.
    pub fn parse(query: &str) -> QueryResult<Self> {
        Ok(Self {
            pairs: parse_pairs(query)?,
        })
    }

    /// First value for `key`, if present
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First value for `key`, treating an empty value as absent
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.trim().is_empty())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Parse a raw query string into decoded `(key, value)` pairs.
///
/// Key and value are split on the first `=`; `+` decodes to a space.
/// Empty segments (`a=1&&b=2`) are skipped.
pub fn parse_pairs(query: &str) -> QueryResult<Vec<(String, String)>> {
    let query = query.strip_prefix('?').unwrap_or(query);

    let (_, segments) = segments(query)
        .map_err(|e| QueryError::Decode(format!("Malformed query string: {:?}", e)))?;

    segments
        .into_iter()
        .filter(|(key, value)| !key.is_empty() || value.is_some_and(|v| !v.is_empty()))
        .map(|(key, value)| Ok((decode(key)?, decode(value.unwrap_or(""))?)))
        .collect()
}

fn segments(input: &str) -> IResult<&str, Vec<(&str, Option<&str>)>> {
    separated_list0(char('&'), segment)(input)
}

fn segment(input: &str) -> IResult<&str, (&str, Option<&str>)> {
    pair(
        take_while(|c| c != '=' && c != '&'),
        opt(preceded(char('='), take_while(|c| c != '&'))),
    )(input)
}

fn decode(raw: &str) -> QueryResult<String> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| s.into_owned())
        .map_err(|e| QueryError::Decode(format!("'{}': {}", raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_pairs() {
        let pairs = parse_pairs("?address=123%20Main%20St&listAllElections=false").unwrap();
        assert_eq!(
            pairs,
            vec![
                ("address".to_string(), "123 Main St".to_string()),
                ("listAllElections".to_string(), "false".to_string()),
            ]
        );
    }

    #[test]
    fn test_plus_is_space() {
        let pairs = QueryPairs::parse("address=1600+Amphitheatre+Pkwy").unwrap();
        assert_eq!(pairs.get("address"), Some("1600 Amphitheatre Pkwy"));
    }

    #[test]
    fn test_value_keeps_embedded_equals_and_encoded_ampersand() {
        let pairs = QueryPairs::parse("electionName=A%26B=C&candidateId=7").unwrap();
        assert_eq!(pairs.get("electionName"), Some("A&B=C"));
        assert_eq!(pairs.get("candidateId"), Some("7"));
    }

    #[test]
    fn test_order_independent_lookup() {
        let pairs = QueryPairs::parse("listAllElections=true&address=Boston").unwrap();
        assert_eq!(pairs.get("address"), Some("Boston"));
        assert_eq!(pairs.get("listAllElections"), Some("true"));
    }

    #[test]
    fn test_empty_segments_and_bare_keys() {
        let pairs = QueryPairs::parse("&&flag&x=&=").unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs.get("flag"), Some(""));
        assert_eq!(pairs.get("x"), Some(""));
        assert_eq!(pairs.get_non_empty("x"), None);
    }

    #[test]
    fn test_empty_query() {
        assert!(QueryPairs::parse("").unwrap().is_empty());
        assert!(QueryPairs::parse("?").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_decode_error() {
        let err = parse_pairs("address=%FF%FE").unwrap_err();
        assert!(matches!(err, QueryError::Decode(_)));
    }
}
