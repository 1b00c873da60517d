//! Response Schema
//!
//! Types for the JSON bodies served by the backend endpoints. One schema
//! covers every page; older field spellings (`electionName`,
//! `candidatePositions`, `positionName`, `candidateName`, `isIncumbent`)
//! are accepted as aliases, and positions may list their candidates as
//! parallel `candidateIds`/`candidateNames`/... arrays.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// ============================================
// IDENTIFIERS
// ============================================

/// Backend identifier of a candidate.
///
/// The backend has sent ids both as JSON strings and as numbers, so either
/// is accepted and kept as text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CandidateId(String);

impl CandidateId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CandidateId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for CandidateId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for CandidateId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CandidateId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => CandidateId(text),
            RawId::Number(number) => CandidateId(number.to_string()),
        })
    }
}

// ============================================
// DIRECTORY DTOs
// ============================================

/// Body of `GET /data`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub elections_data: Vec<Election>,
    /// Notice for the user, e.g. when the address was not specific enough
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert: Option<String>,
}

/// A named voting event with its contested positions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Election {
    #[serde(alias = "electionName", default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(alias = "candidatePositions", default, deserialize_with = "null_as_default")]
    pub positions: Vec<Position>,
}

impl Election {
    pub fn candidate_count(&self) -> usize {
        self.positions.iter().map(|p| p.candidates.len()).sum()
    }
}

/// An office contested within an election
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "PositionFields")]
pub struct Position {
    pub name: String,
    pub candidates: Vec<Candidate>,
}

/// Wire form of a position. Candidates arrive either as a `candidates`
/// list or as parallel per-field arrays indexed alike.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PositionFields {
    #[serde(alias = "positionName", default, deserialize_with = "null_as_default")]
    name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    candidates: Vec<Candidate>,
    #[serde(default, deserialize_with = "null_as_default")]
    candidate_ids: Vec<CandidateId>,
    #[serde(default, deserialize_with = "null_as_default")]
    candidate_names: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    candidate_party_affiliation: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    candidate_incumbency: Vec<IncumbencyFlag>,
}

#[derive(Deserialize)]
struct IncumbencyFlag(#[serde(deserialize_with = "incumbency_flag")] bool);

impl From<PositionFields> for Position {
    fn from(fields: PositionFields) -> Self {
        if !fields.candidates.is_empty() || fields.candidate_ids.is_empty() {
            return Self {
                name: fields.name,
                candidates: fields.candidates,
            };
        }

        // Ids drive the rows; a shorter companion array leaves blanks.
        let candidates = fields
            .candidate_ids
            .into_iter()
            .enumerate()
            .map(|(i, id)| Candidate {
                id,
                name: fields.candidate_names.get(i).cloned().unwrap_or_default(),
                party_affiliation: fields
                    .candidate_party_affiliation
                    .get(i)
                    .cloned()
                    .unwrap_or_default(),
                incumbency: fields.candidate_incumbency.get(i).is_some_and(|flag| flag.0),
            })
            .collect();

        Self {
            name: fields.name,
            candidates,
        }
    }
}

/// Candidate summary as listed under a position
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: CandidateId,
    #[serde(alias = "candidateName", default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(alias = "party", default, deserialize_with = "null_as_default")]
    pub party_affiliation: String,
    /// Whether the candidate currently holds the position
    #[serde(alias = "isIncumbent", default, deserialize_with = "incumbency_flag")]
    pub incumbency: bool,
}

// ============================================
// CANDIDATE DTOs
// ============================================

/// Body of `GET /candidate`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateResponse {
    pub candidate_data: CandidateDetail,
    #[serde(default, deserialize_with = "null_as_default")]
    pub news_articles_data: Vec<NewsArticle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_media_data: Option<serde_json::Value>,
}

/// Official information about one candidate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateDetail {
    #[serde(flatten)]
    pub summary: Candidate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(alias = "photoURL", alias = "PhotoURL", default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(alias = "candidateUrl", default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Twitter handle, without the leading `@`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
}

impl CandidateDetail {
    /// Twitter handle if one is usable
    pub fn twitter_handle(&self) -> Option<&str> {
        self.twitter
            .as_deref()
            .map(|h| h.trim().trim_start_matches('@'))
            .filter(|h| !h.is_empty())
    }
}

/// A news article about a candidate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub publisher: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    /// Leading words of `content`, when the backend precomputed them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abbreviated_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summarized_content: Option<String>,
}

// ============================================
// POLLING LOCATION DTOs
// ============================================

/// Body of `GET /pollingLocation`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PollingLocationResponse {
    /// Address fields in the order the backend sent them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<serde_json::Map<String, serde_json::Value>>,
}

impl PollingLocationResponse {
    /// Display lines of the address. Nulls and blank strings are skipped.
    pub fn address_lines(&self) -> Vec<String> {
        let Some(address) = &self.address else {
            return Vec::new();
        };

        address
            .values()
            .filter_map(|value| match value {
                serde_json::Value::Null => None,
                serde_json::Value::String(s) if s.trim().is_empty() => None,
                serde_json::Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            })
            .collect()
    }
}

// ============================================
// FIELD HELPERS
// ============================================

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn incumbency_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawFlag {
        Flag(bool),
        Text(String),
    }

    match Option::<RawFlag>::deserialize(deserializer)? {
        None => Ok(false),
        Some(RawFlag::Flag(flag)) => Ok(flag),
        Some(RawFlag::Text(text)) => match text.trim().to_ascii_lowercase().as_str() {
            "yes" | "true" | "y" => Ok(true),
            "no" | "false" | "n" | "" => Ok(false),
            _ => Err(serde::de::Error::custom(format!(
                "invalid incumbency value '{}'",
                text
            ))),
        },
    }
}
