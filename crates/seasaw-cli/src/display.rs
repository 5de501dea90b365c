//! Text rendering of trust reports and session states.
//!
//! Everything writes into a `fmt::Write` so the same code backs the terminal
//! output and the tests.

use std::fmt::{self, Write};

use seasaw_core::present::{ScoreRing, bar_color, grade_color, text_gauge};
use seasaw_core::presets::PRESET_SERVICES;
use seasaw_core::score::attribute_fill_percent;
use seasaw_core::{BarTone, PolicyAttribute, ScoreBreakdown, Taxonomy, TrustReport};
use seasaw_session::{AnalysisState, Lifecycle};
use tracing::info;

const OVERALL_GAUGE_WIDTH: usize = 20;
const ATTRIBUTE_GAUGE_WIDTH: usize = 10;
const SCORE_GAUGE_WIDTH: usize = 20;

// ── Public API ──

/// Render whatever the lifecycle currently shows.
pub fn render_lifecycle(lc: &Lifecycle, taxonomy: &Taxonomy) -> String {
    let mut out = String::new();
    let _ = write_lifecycle(&mut out, lc, taxonomy);
    out
}

pub fn write_lifecycle(
    out: &mut impl Write,
    lc: &Lifecycle,
    taxonomy: &Taxonomy,
) -> fmt::Result {
    match lc.state() {
        AnalysisState::Idle => write_welcome(out),
        AnalysisState::Pending => writeln!(
            out,
            "Analyzing {}...",
            lc.active_query().unwrap_or_default()
        ),
        AnalysisState::Success(report) => {
            write_report(out, report, taxonomy, |id| lc.is_expanded(id))
        }
        AnalysisState::Failure(msg) => write_failure(out, msg),
    }
}

/// Idle screen: how to search, plus the numbered presets.
pub fn write_welcome(out: &mut impl Write) -> fmt::Result {
    writeln!(out, "Type a service name to see its trust label.")?;
    writeln!(out, "Popular:")?;
    for (i, name) in PRESET_SERVICES.iter().enumerate() {
        writeln!(out, "  :{:<3} {}", i + 1, name)?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "Commands: :e <attribute_id> toggle evidence, :r analyze another service, :q quit"
    )
}

pub fn write_failure(out: &mut impl Write, message: &str) -> fmt::Result {
    writeln!(out, "✗ Analysis failed")?;
    writeln!(out, "  {message}")?;
    writeln!(out)?;
    writeln!(out, "Try another service name, or :r to start over.")
}

/// Full trust label for one report.
///
/// `expanded` decides which attributes show their evidence.
pub fn write_report(
    out: &mut impl Write,
    report: &TrustReport,
    taxonomy: &Taxonomy,
    expanded: impl Fn(&str) -> bool,
) -> fmt::Result {
    write_header(out, report)?;

    if let Some(err) = report.error.as_deref().filter(|_| report.is_degraded()) {
        writeln!(out, "! Partial result: {}", err.trim())?;
        writeln!(out)?;
    }

    let breakdown = ScoreBreakdown::from_attributes(&report.attributes);
    write_breakdown(out, &breakdown)?;

    let hidden: Vec<&str> = taxonomy
        .uncategorized(report)
        .into_iter()
        .map(|a| a.id.as_str())
        .collect();
    if !hidden.is_empty() {
        info!(
            service = %report.service_name,
            taxonomy = taxonomy.version,
            ids = ?hidden,
            "attributes outside taxonomy"
        );
    }

    for group in taxonomy.classify(report) {
        writeln!(out, "{}", group.title)?;
        for attr in group.attributes {
            write_attribute(out, attr, expanded(&attr.id))?;
        }
        writeln!(out)?;
    }

    write_footer(out, report)
}

// ── Sections ──

fn write_header(out: &mut impl Write, report: &TrustReport) -> fmt::Result {
    writeln!(
        out,
        "=== {} ({}) ===",
        report.service_name,
        report.domain_url()
    )?;

    let ring = ScoreRing::for_score(report.trust_score);
    writeln!(
        out,
        "Trust score  {:>3}/100  {}  grade {} [{}]",
        report.score_percent(),
        text_gauge(ring.sweep_degrees / 3.6, SCORE_GAUGE_WIDTH),
        report.grade,
        grade_color(&report.grade).name()
    )?;
    writeln!(out, "Analyzed     {}", report.analyzed_at_display())?;
    writeln!(out)
}

fn write_breakdown(out: &mut impl Write, b: &ScoreBreakdown) -> fmt::Result {
    writeln!(
        out,
        "Overall      {} {:>3.0}%  ({:.1} / {:.1} pts)",
        text_gauge(b.overall_fill_percent, OVERALL_GAUGE_WIDTH),
        b.overall_fill_percent,
        b.total_earned,
        b.total_possible
    )?;
    writeln!(
        out,
        "             {} good · {} neutral · {} bad",
        b.good_count, b.neutral_count, b.bad_count
    )?;
    writeln!(out)
}

fn write_attribute(
    out: &mut impl Write,
    attr: &PolicyAttribute,
    show_evidence: bool,
) -> fmt::Result {
    let fill = attribute_fill_percent(attr);
    let tone = BarTone::from_fill(fill);
    writeln!(
        out,
        "  {} {:<28} {} {:>4.1}/{:<4} [{}] {}",
        attr.severity.icon(),
        attr.display_label(),
        text_gauge(fill, ATTRIBUTE_GAUGE_WIDTH),
        attr.clamped_points(),
        attr.clamped_weight(),
        bar_color(tone).name(),
        attr.value
    )?;
    if show_evidence && !attr.evidence.trim().is_empty() {
        writeln!(out, "      \"{}\"", attr.evidence.trim())?;
    }
    Ok(())
}

fn write_footer(out: &mut impl Write, report: &TrustReport) -> fmt::Result {
    if let Some(url) = report.terms_link() {
        writeln!(out, "Terms of Service  {url}")?;
    }
    if let Some(url) = report.privacy_link() {
        writeln!(out, "Privacy Policy    {url}")?;
    }
    Ok(())
}
