//! Aggregate points and severity counts over a report's attributes.

use crate::attribute::{PolicyAttribute, Severity};

/// Fill threshold (inclusive) for a good-toned bar.
pub const GOOD_FILL_THRESHOLD: f64 = 70.0;
/// Fill threshold (inclusive) for a neutral-toned bar.
pub const NEUTRAL_FILL_THRESHOLD: f64 = 40.0;

/// Overall points summary and per-severity counts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub total_possible: f64,
    pub total_earned: f64,
    /// Always in `[0, 100]`.
    pub overall_fill_percent: f64,
    pub good_count: usize,
    pub neutral_count: usize,
    pub bad_count: usize,
}

impl ScoreBreakdown {
    pub fn from_attributes(attributes: &[PolicyAttribute]) -> Self {
        let mut out = Self {
            total_possible: 0.0,
            total_earned: 0.0,
            overall_fill_percent: 0.0,
            good_count: 0,
            neutral_count: 0,
            bad_count: 0,
        };

        for attr in attributes {
            out.total_possible += attr.clamped_weight();
            out.total_earned += attr.clamped_points();
            match attr.severity {
                Severity::Good => out.good_count += 1,
                Severity::Neutral => out.neutral_count += 1,
                Severity::Bad => out.bad_count += 1,
            }
        }

        out.overall_fill_percent = fill_percent(out.total_earned, out.total_possible);
        out
    }

    pub fn attribute_count(&self) -> usize {
        self.good_count + self.neutral_count + self.bad_count
    }
}

/// Tone of a numeric bar, derived from its fill percent alone.
///
/// This is a separate channel from [`Severity`]: an attribute can be
/// `bad` while its bar is good-toned, and both are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarTone {
    Good,
    Neutral,
    Bad,
}

impl BarTone {
    pub fn from_fill(percent: f64) -> Self {
        if percent >= GOOD_FILL_THRESHOLD {
            Self::Good
        } else if percent >= NEUTRAL_FILL_THRESHOLD {
            Self::Neutral
        } else {
            Self::Bad
        }
    }
}

/// `earned / possible * 100`, clamped into `[0, 100]`; 0 when `possible` is 0.
pub fn fill_percent(earned: f64, possible: f64) -> f64 {
    if !(possible.is_finite() && possible > 0.0) || !earned.is_finite() {
        return 0.0;
    }
    (earned / possible * 100.0).clamp(0.0, 100.0)
}

/// Fill percent of a single attribute's bar.
pub fn attribute_fill_percent(attr: &PolicyAttribute) -> f64 {
    fill_percent(attr.clamped_points(), attr.clamped_weight())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(severity: Severity, weight: f64, points: f64) -> PolicyAttribute {
        PolicyAttribute {
            id: format!("attr_{weight}_{points}"),
            label: "Label".into(),
            value: "Value".into(),
            severity,
            evidence: String::new(),
            weight,
            points_earned: points,
        }
    }

    #[test]
    fn totals_and_counts() {
        let attrs = vec![
            attr(Severity::Good, 15.0, 15.0),
            attr(Severity::Neutral, 10.0, 5.0),
            attr(Severity::Bad, 10.0, 0.0),
            attr(Severity::Bad, 5.0, 0.0),
        ];
        let b = ScoreBreakdown::from_attributes(&attrs);
        assert_eq!(b.total_possible, 40.0);
        assert_eq!(b.total_earned, 20.0);
        assert_eq!(b.overall_fill_percent, 50.0);
        assert_eq!((b.good_count, b.neutral_count, b.bad_count), (1, 1, 2));
        assert_eq!(b.attribute_count(), 4);
    }

    #[test]
    fn zero_possible_yields_zero_fill() {
        let b = ScoreBreakdown::from_attributes(&[]);
        assert_eq!(b.overall_fill_percent, 0.0);
        assert!(!b.overall_fill_percent.is_nan());

        let zero_weight = [attr(Severity::Good, 0.0, 3.0)];
        let b = ScoreBreakdown::from_attributes(&zero_weight);
        assert_eq!(b.overall_fill_percent, 0.0);
        assert_eq!(attribute_fill_percent(&zero_weight[0]), 0.0);
    }

    #[test]
    fn fill_percent_stays_in_range_for_bad_input() {
        let cases = [
            (5.0, 10.0),
            (15.0, 10.0),
            (-1.0, 10.0),
            (3.0, -2.0),
            (f64::NAN, 10.0),
            (1.0, f64::INFINITY),
            (f64::INFINITY, 1.0),
        ];
        for (earned, possible) in cases {
            let p = fill_percent(earned, possible);
            assert!((0.0..=100.0).contains(&p), "{earned}/{possible} -> {p}");
        }
        for (points, weight) in [(15.0, 10.0), (-4.0, 8.0), (2.0, -1.0)] {
            let p = attribute_fill_percent(&attr(Severity::Neutral, weight, points));
            assert!((0.0..=100.0).contains(&p));
        }
    }

    #[test]
    fn overweight_points_do_not_exceed_hundred() {
        let b = ScoreBreakdown::from_attributes(&[attr(Severity::Good, 10.0, 25.0)]);
        assert_eq!(b.total_earned, 10.0);
        assert_eq!(b.overall_fill_percent, 100.0);
    }

    #[test]
    fn bar_tone_thresholds() {
        assert_eq!(BarTone::from_fill(100.0), BarTone::Good);
        assert_eq!(BarTone::from_fill(70.0), BarTone::Good);
        assert_eq!(BarTone::from_fill(69.9), BarTone::Neutral);
        assert_eq!(BarTone::from_fill(40.0), BarTone::Neutral);
        assert_eq!(BarTone::from_fill(39.9), BarTone::Bad);
        assert_eq!(BarTone::from_fill(0.0), BarTone::Bad);
    }

    #[test]
    fn bar_tone_independent_of_severity() {
        let a = attr(Severity::Bad, 10.0, 10.0);
        assert_eq!(BarTone::from_fill(attribute_fill_percent(&a)), BarTone::Good);
        assert_eq!(a.severity, Severity::Bad);
    }

    #[test]
    fn aggregation_is_idempotent() {
        let attrs = vec![
            attr(Severity::Good, 7.0, 7.0),
            attr(Severity::Neutral, 8.0, 4.0),
        ];
        let snapshot = attrs.clone();
        assert_eq!(
            ScoreBreakdown::from_attributes(&attrs),
            ScoreBreakdown::from_attributes(&attrs)
        );
        assert_eq!(attrs, snapshot);
    }
}
