//! Completed analysis for one service, as returned by the `/analyze` endpoint.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::attribute::PolicyAttribute;

/// Letter summary of the trust score.
///
/// Unrecognized strings are kept verbatim in [`Grade::Other`] so a backend
/// that starts emitting new grades does not break decoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
    Other(String),
}

impl From<String> for Grade {
    fn from(s: String) -> Self {
        match s.trim() {
            "A" | "a" => Self::A,
            "B" | "b" => Self::B,
            "C" | "c" => Self::C,
            "D" | "d" => Self::D,
            "F" | "f" => Self::F,
            _ => Self::Other(s),
        }
    }
}

impl From<Grade> for String {
    fn from(g: Grade) -> Self {
        g.to_string()
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => f.write_str("A"),
            Self::B => f.write_str("B"),
            Self::C => f.write_str("C"),
            Self::D => f.write_str("D"),
            Self::F => f.write_str("F"),
            Self::Other(s) => f.write_str(s),
        }
    }
}

/// Full analysis result for one service.
///
/// `trust_score` is the authoritative headline number. It is sourced
/// independently of the attributes and is not expected to equal the sum of
/// their `points_earned`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustReport {
    pub service_name: String,
    pub domain: String,
    #[serde(default)]
    pub terms_url: Option<String>,
    #[serde(default)]
    pub privacy_url: Option<String>,
    pub trust_score: u32,
    pub grade: Grade,
    /// ISO 8601 timestamp string.
    pub analyzed_at: String,
    #[serde(default)]
    pub attributes: Vec<PolicyAttribute>,
    /// Set when the backend could only produce a partial result.
    #[serde(default)]
    pub error: Option<String>,
}

impl TrustReport {
    /// External link for the analyzed service.
    pub fn domain_url(&self) -> String {
        format!("https://{}", self.domain.trim())
    }

    pub fn terms_link(&self) -> Option<&str> {
        non_blank(self.terms_url.as_deref())
    }

    pub fn privacy_link(&self) -> Option<&str> {
        non_blank(self.privacy_url.as_deref())
    }

    /// Score clamped into `[0, 100]`.
    pub fn score_percent(&self) -> u32 {
        self.trust_score.min(100)
    }

    /// `true` when the backend flagged the result as partial.
    pub fn is_degraded(&self) -> bool {
        non_blank(self.error.as_deref()).is_some()
    }

    pub fn attribute(&self, id: &str) -> Option<&PolicyAttribute> {
        self.attributes.iter().find(|a| a.id == id)
    }

    /// Parsed `analyzed_at`, when it is valid RFC 3339.
    pub fn analyzed_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(self.analyzed_at.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Human-readable analysis time, falling back to the raw string.
    pub fn analyzed_at_display(&self) -> String {
        match self.analyzed_at_utc() {
            Some(dt) => dt.format("%Y-%m-%d %H:%M UTC").to_string(),
            None => self.analyzed_at.clone(),
        }
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}
