//! One scored policy dimension, e.g. "does the service sell data".

use serde::{Deserialize, Serialize};

/// Qualitative judgment of a policy attribute, independent of its numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Severity {
    Good,
    Neutral,
    Bad,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Neutral => "neutral",
            Self::Bad => "bad",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "good" => Some(Self::Good),
            "neutral" => Some(Self::Neutral),
            "bad" => Some(Self::Bad),
            _ => None,
        }
    }

    /// Glyph shown next to the attribute label.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Good => "✓",
            Self::Neutral => "!",
            Self::Bad => "✗",
        }
    }
}

impl TryFrom<String> for Severity {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
            .ok_or_else(|| format!("unknown severity `{s}`, expected good, neutral or bad"))
    }
}

/// A single policy attribute as returned by the analysis backend.
///
/// `points_earned` is expected in `[0, weight]`, but nothing upstream enforces
/// it. Use [`PolicyAttribute::clamped_points`] and
/// [`PolicyAttribute::clamped_weight`] rather than the raw fields for arithmetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyAttribute {
    pub id: String,
    pub label: String,
    pub value: String,
    pub severity: Severity,
    pub evidence: String,
    pub weight: f64,
    pub points_earned: f64,
}

impl PolicyAttribute {
    /// Weight with negative and non-finite values treated as zero.
    pub fn clamped_weight(&self) -> f64 {
        non_negative(self.weight)
    }

    /// Points earned, clamped into `[0, clamped_weight()]`.
    pub fn clamped_points(&self) -> f64 {
        non_negative(self.points_earned).min(self.clamped_weight())
    }

    /// Label to display, falling back to a title-cased id when the backend sent none.
    pub fn display_label(&self) -> String {
        if self.label.trim().is_empty() {
            humanize_id(&self.id)
        } else {
            self.label.clone()
        }
    }
}

fn non_negative(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}

/// `data_selling` → `Data Selling`.
pub fn humanize_id(id: &str) -> String {
    id.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(weight: f64, points: f64) -> PolicyAttribute {
        PolicyAttribute {
            id: "data_selling".into(),
            label: "Sells User Data".into(),
            value: "Does not sell personal data".into(),
            severity: Severity::Good,
            evidence: "We do not sell your personal information.".into(),
            weight,
            points_earned: points,
        }
    }

    #[test]
    fn severity_wire_format_is_lowercase() {
        let json = serde_json::to_string(&Severity::Neutral).unwrap();
        assert_eq!(json, "\"neutral\"");
        let parsed: Severity = serde_json::from_str("\"bad\"").unwrap();
        assert_eq!(parsed, Severity::Bad);
    }

    #[test]
    fn unknown_severity_rejected() {
        let err = serde_json::from_str::<Severity>("\"meh\"").unwrap_err();
        assert!(err.to_string().contains("unknown severity `meh`"));
        assert_eq!(Severity::parse("Good"), None);
    }

    #[test]
    fn backend_payload_with_integer_weight() {
        let json = r#"{
            "id": "encryption",
            "label": "Data Encryption",
            "value": "Encrypted in transit",
            "severity": "neutral",
            "evidence": "We use TLS...",
            "weight": 10,
            "points_earned": 5.0
        }"#;
        let parsed: PolicyAttribute = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.weight, 10.0);
        assert_eq!(parsed.points_earned, 5.0);
        assert_eq!(parsed.severity, Severity::Neutral);
    }

    #[test]
    fn points_clamped_to_weight() {
        assert_eq!(attr(10.0, 15.0).clamped_points(), 10.0);
        assert_eq!(attr(10.0, -3.0).clamped_points(), 0.0);
        assert_eq!(attr(10.0, 7.5).clamped_points(), 7.5);
    }

    #[test]
    fn negative_or_nan_weight_is_zero() {
        assert_eq!(attr(-5.0, 2.0).clamped_weight(), 0.0);
        assert_eq!(attr(-5.0, 2.0).clamped_points(), 0.0);
        assert_eq!(attr(f64::NAN, 2.0).clamped_weight(), 0.0);
    }

    #[test]
    fn display_label_falls_back_to_id() {
        let mut a = attr(10.0, 10.0);
        a.label = "  ".into();
        assert_eq!(a.display_label(), "Data Selling");
    }

    #[test]
    fn humanize_handles_odd_ids() {
        assert_eq!(humanize_id("third_party_tracking"), "Third Party Tracking");
        assert_eq!(humanize_id("__x__"), "X");
        assert_eq!(humanize_id(""), "");
    }
}
