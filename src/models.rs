//! Frontend Models
//!
//! Data structures shared by the ballot components and server bindings.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Server-assigned submission identifier.
///
/// Opaque: only compared for equality, never validated for format.
/// Page data may carry it as a JSON string or number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SubmissionId(String);

impl SubmissionId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Only an empty string (or JSON null) counts as missing
    pub fn is_missing(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SubmissionId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl<'de> Deserialize<'de> for SubmissionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Int(i64),
            Unsigned(u64),
            Float(f64),
            Null(()),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => SubmissionId::new(s),
            Raw::Int(n) => SubmissionId::new(n.to_string()),
            Raw::Unsigned(n) => SubmissionId::new(n.to_string()),
            Raw::Float(n) => SubmissionId::new(n.to_string()),
            Raw::Null(()) => SubmissionId::new(""),
        })
    }
}

/// One row of a ranking list, as delivered by the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankEntry {
    #[serde(alias = "id")]
    pub submission_id: SubmissionId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    /// Client-side key, unique per rendered row even when ids repeat
    #[serde(skip)]
    pub row_key: u32,
}

/// Ordered submission ids, most-preferred first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankOrder(Vec<SubmissionId>);

impl RankOrder {
    pub fn new(ids: Vec<SubmissionId>) -> Self {
        Self(ids)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Transport form: comma-joined ids
    pub fn serialize(&self) -> String {
        self.0.iter().map(SubmissionId::as_str).collect::<Vec<_>>().join(",")
    }
}

impl FromIterator<SubmissionId> for RankOrder {
    fn from_iter<I: IntoIterator<Item = SubmissionId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Logical form a ranking belongs to, plus where it posts
#[derive(Debug, Clone, PartialEq)]
pub struct FormContext {
    /// e.g. "adult" or "youth"
    pub form_name: String,
    /// Endpoint both auto-save and final submit post to
    pub action: String,
}

/// `GET /refresh_csrf` response
#[derive(Debug, Clone, Deserialize)]
pub struct CsrfRefresh {
    pub csrf_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_id_from_json_variants() {
        let ids: Vec<SubmissionId> = serde_json::from_str(r#"["A", 17, " 42 ", null, ""]"#).unwrap();
        assert_eq!(ids[0].as_str(), "A");
        assert_eq!(ids[1].as_str(), "17");
        // Kept verbatim, never normalized
        assert_eq!(ids[2].as_str(), " 42 ");
        assert!(!ids[2].is_missing());
        assert!(ids[3].is_missing());
        assert!(ids[4].is_missing());
    }

    #[test]
    fn test_large_numeric_id_keeps_every_digit() {
        let ids: Vec<SubmissionId> =
            serde_json::from_str("[18446744073709551615, -3, 9223372036854775807]").unwrap();
        assert_eq!(ids[0].as_str(), "18446744073709551615");
        assert_eq!(ids[1].as_str(), "-3");
        assert_eq!(ids[2].as_str(), "9223372036854775807");
    }

    #[test]
    fn test_whitespace_is_part_of_the_id() {
        assert_ne!(SubmissionId::from("A"), SubmissionId::from("A "));
    }

    #[test]
    fn test_rank_order_serialize() {
        let order: RankOrder = ["A", "B", "C"].into_iter().map(SubmissionId::from).collect();
        assert_eq!(order.serialize(), "A,B,C");
        assert_eq!(RankOrder::default().serialize(), "");
    }

    #[test]
    fn test_rank_entry_accepts_id_alias() {
        let entry: RankEntry = serde_json::from_str(r#"{"id": 5, "title": "Sunset"}"#).unwrap();
        assert_eq!(entry.submission_id.as_str(), "5");
        assert_eq!(entry.title, "Sunset");
        assert_eq!(entry.artist, None);
        assert_eq!(entry.row_key, 0);
    }
}
