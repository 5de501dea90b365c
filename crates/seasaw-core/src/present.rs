//! Colors and geometry for rendering grades, bars, and the score ring.

use std::f64::consts::PI;

use crate::attribute::Severity;
use crate::report::Grade;
use crate::score::BarTone;

/// Palette shared by all front ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Green,
    Lime,
    Yellow,
    Orange,
    Red,
    Gray,
}

impl Color {
    pub fn hex(&self) -> &'static str {
        match self {
            Self::Green => "#22c55e",
            Self::Lime => "#84cc16",
            Self::Yellow => "#eab308",
            Self::Orange => "#f97316",
            Self::Red => "#ef4444",
            Self::Gray => "#6b7280",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Lime => "lime",
            Self::Yellow => "yellow",
            Self::Orange => "orange",
            Self::Red => "red",
            Self::Gray => "gray",
        }
    }
}

/// Unrecognized grades fall back to gray.
pub fn grade_color(grade: &Grade) -> Color {
    match grade {
        Grade::A => Color::Green,
        Grade::B => Color::Lime,
        Grade::C => Color::Yellow,
        Grade::D => Color::Orange,
        Grade::F => Color::Red,
        Grade::Other(_) => Color::Gray,
    }
}

pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Good => Color::Green,
        Severity::Neutral => Color::Yellow,
        Severity::Bad => Color::Red,
    }
}

pub fn bar_color(tone: BarTone) -> Color {
    match tone {
        BarTone::Good => Color::Green,
        BarTone::Neutral => Color::Yellow,
        BarTone::Bad => Color::Red,
    }
}

/// Radius of the score ring in view-box units.
pub const RING_RADIUS: f64 = 54.0;

/// Circular progress indicator for the headline score.
///
/// The arc starts at twelve o'clock and sweeps clockwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreRing {
    pub radius: f64,
    pub circumference: f64,
    pub sweep_degrees: f64,
    /// Stroke dash offset that hides the unfilled part of the circle.
    pub dash_offset: f64,
}

impl ScoreRing {
    pub fn for_score(trust_score: u32) -> Self {
        Self::with_radius(trust_score, RING_RADIUS)
    }

    pub fn with_radius(trust_score: u32, radius: f64) -> Self {
        let fraction = f64::from(trust_score.min(100)) / 100.0;
        let circumference = 2.0 * PI * radius;
        Self {
            radius,
            circumference,
            sweep_degrees: fraction * 360.0,
            dash_offset: circumference * (1.0 - fraction),
        }
    }

    /// End point of the arc relative to the ring's center (y grows downward).
    pub fn end_point(&self) -> (f64, f64) {
        let theta = self.sweep_degrees.to_radians();
        (self.radius * theta.sin(), -self.radius * theta.cos())
    }
}

/// Fixed-width text bar, e.g. `███████░░░` for 70%.
pub fn text_gauge(percent: f64, width: usize) -> String {
    let p = if percent.is_finite() {
        percent.clamp(0.0, 100.0)
    } else {
        0.0
    };
    let filled = ((p / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
