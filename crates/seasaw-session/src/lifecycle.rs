//! The request lifecycle as a plain state machine.
//!
//! `Idle → Pending → Success | Failure`, with `reset` returning to `Idle` and
//! a new submission moving straight back to `Pending`. Every submission gets a
//! [`Ticket`]; completions carrying an outdated ticket are dropped, so a slow
//! superseded call can never overwrite newer state.

use std::collections::BTreeSet;
use std::sync::Arc;

use seasaw_core::{QueryError, TrustReport, normalize_query};
use seasaw_oracle::OracleError;

/// What the front end should show.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisState {
    Idle,
    Pending,
    Success(Arc<TrustReport>),
    Failure(String),
}

impl AnalysisState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Success(_) => "success",
            Self::Failure(_) => "failure",
        }
    }
}

/// Identifies one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn get(&self) -> u64 {
        self.0
    }
}

/// Current state plus the per-report view state that goes with it.
#[derive(Debug, Clone, PartialEq)]
pub struct Lifecycle {
    state: AnalysisState,
    active_query: Option<String>,
    generation: u64,
    /// Attribute ids whose evidence is revealed. Cleared with every new report.
    expanded: BTreeSet<String>,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            state: AnalysisState::Idle,
            active_query: None,
            generation: 0,
            expanded: BTreeSet::new(),
        }
    }

    pub fn state(&self) -> &AnalysisState {
        &self.state
    }

    /// Query of the latest accepted submission, kept until reset.
    pub fn active_query(&self) -> Option<&str> {
        self.active_query.as_deref()
    }

    pub fn report(&self) -> Option<&Arc<TrustReport>> {
        match &self.state {
            AnalysisState::Success(report) => Some(report),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            AnalysisState::Failure(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, AnalysisState::Pending)
    }

    /// Accept a submission.
    ///
    /// A blank or overlong query leaves everything untouched. Otherwise the
    /// previous result, error and evidence toggles are cleared and the
    /// lifecycle moves to `Pending` under a fresh ticket. Returns the ticket
    /// and the trimmed query to send.
    pub fn begin(&mut self, raw_query: &str) -> Result<(Ticket, String), QueryError> {
        let query = normalize_query(raw_query)?;
        self.generation += 1;
        self.state = AnalysisState::Pending;
        self.active_query = Some(query.clone());
        self.expanded.clear();
        Ok((Ticket(self.generation), query))
    }

    /// Record the outcome of the call started under `ticket`.
    ///
    /// Returns `false` (and changes nothing) when the ticket is stale or the
    /// lifecycle is no longer pending.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        outcome: Result<TrustReport, OracleError>,
    ) -> bool {
        if ticket.0 != self.generation || !self.is_pending() {
            return false;
        }
        self.expanded.clear();
        self.state = match outcome {
            Ok(report) => AnalysisState::Success(Arc::new(report)),
            Err(e) => AnalysisState::Failure(e.user_message()),
        };
        true
    }

    /// Back to `Idle`. Any call still in flight is disowned.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = AnalysisState::Idle;
        self.active_query = None;
        self.expanded.clear();
    }

    /// Flip the evidence toggle for an attribute of the current report.
    ///
    /// Returns the new toggle value; ids not in the current report stay
    /// collapsed.
    pub fn toggle_evidence(&mut self, attribute_id: &str) -> bool {
        let known = self
            .report()
            .is_some_and(|r| r.attribute(attribute_id).is_some());
        if !known {
            return false;
        }
        if self.expanded.remove(attribute_id) {
            false
        } else {
            self.expanded.insert(attribute_id.to_string());
            true
        }
    }

    pub fn is_expanded(&self, attribute_id: &str) -> bool {
        self.expanded.contains(attribute_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seasaw_core::{Grade, PolicyAttribute, Severity};

    fn report(service: &str) -> TrustReport {
        TrustReport {
            service_name: service.into(),
            domain: "example.com".into(),
            terms_url: None,
            privacy_url: None,
            trust_score: 72,
            grade: Grade::B,
            analyzed_at: "2026-02-21T10:00:00Z".into(),
            attributes: vec![PolicyAttribute {
                id: "encryption".into(),
                label: "Data Encryption".into(),
                value: "Encrypted in transit".into(),
                severity: Severity::Neutral,
                evidence: "We use TLS.".into(),
                weight: 10.0,
                points_earned: 5.0,
            }],
            error: None,
        }
    }

    #[test]
    fn starts_idle() {
        let lc = Lifecycle::new();
        assert_eq!(lc.state(), &AnalysisState::Idle);
        assert_eq!(lc.state().as_str(), "idle");
        assert!(lc.active_query().is_none());
    }

    #[test]
    fn state_names() {
        let mut lc = Lifecycle::new();
        let (t, _) = lc.begin("Netflix").unwrap();
        assert_eq!(lc.state().as_str(), "pending");
        lc.complete(t, Ok(report("Netflix")));
        assert_eq!(lc.state().as_str(), "success");
        let (t, _) = lc.begin("Spotify").unwrap();
        lc.complete(t, Err(OracleError::Timeout));
        assert_eq!(lc.state().as_str(), "failure");
    }

    #[test]
    fn blank_query_stays_idle() {
        let mut lc = Lifecycle::new();
        assert_eq!(lc.begin("   "), Err(QueryError::Empty));
        assert_eq!(lc, Lifecycle::new());
    }

    #[test]
    fn blank_query_keeps_previous_result() {
        let mut lc = Lifecycle::new();
        let (t, _) = lc.begin("Netflix").unwrap();
        lc.complete(t, Ok(report("Netflix")));
        let before = lc.clone();
        assert!(lc.begin("").is_err());
        assert_eq!(lc, before);
    }

    #[test]
    fn begin_records_trimmed_query() {
        let mut lc = Lifecycle::new();
        let (_, query) = lc.begin("  Netflix  ").unwrap();
        assert_eq!(query, "Netflix");
        assert_eq!(lc.active_query(), Some("Netflix"));
        assert!(lc.is_pending());
    }

    #[test]
    fn success_then_reset() {
        let mut lc = Lifecycle::new();
        let (t, _) = lc.begin("Netflix").unwrap();
        assert!(lc.complete(t, Ok(report("Netflix"))));
        assert_eq!(lc.report().unwrap().service_name, "Netflix");
        assert!(lc.error().is_none());

        lc.reset();
        assert_eq!(lc.state(), &AnalysisState::Idle);
        assert!(lc.active_query().is_none());
        assert!(lc.report().is_none());
    }

    #[test]
    fn failure_carries_user_message() {
        let mut lc = Lifecycle::new();
        let (t, _) = lc.begin("Netflix").unwrap();
        lc.complete(
            t,
            Err(OracleError::Rejected {
                status: 503,
                detail: "rate limited".into(),
            }),
        );
        assert_eq!(lc.error(), Some("rate limited"));
        assert_eq!(lc.active_query(), Some("Netflix"));
    }

    #[test]
    fn resubmit_clears_previous_error() {
        let mut lc = Lifecycle::new();
        let (t, _) = lc.begin("Netflix").unwrap();
        lc.complete(t, Err(OracleError::Timeout));
        lc.begin("Spotify").unwrap();
        assert!(lc.error().is_none());
        assert!(lc.is_pending());
        assert_eq!(lc.active_query(), Some("Spotify"));
    }

    #[test]
    fn stale_ticket_ignored() {
        let mut lc = Lifecycle::new();
        let (first, _) = lc.begin("Netflix").unwrap();
        let (second, _) = lc.begin("Spotify").unwrap();
        assert!(second > first);

        assert!(!lc.complete(first, Ok(report("Netflix"))));
        assert!(lc.is_pending());
        assert!(lc.complete(second, Ok(report("Spotify"))));
        assert_eq!(lc.report().unwrap().service_name, "Spotify");
    }

    #[test]
    fn completion_after_reset_ignored() {
        let mut lc = Lifecycle::new();
        let (t, _) = lc.begin("Netflix").unwrap();
        lc.reset();
        assert!(!lc.complete(t, Ok(report("Netflix"))));
        assert_eq!(lc.state(), &AnalysisState::Idle);
    }

    #[test]
    fn duplicate_completion_ignored() {
        let mut lc = Lifecycle::new();
        let (t, _) = lc.begin("Netflix").unwrap();
        assert!(lc.complete(t, Ok(report("Netflix"))));
        assert!(!lc.complete(t, Err(OracleError::Timeout)));
        assert!(lc.report().is_some());
    }

    #[test]
    fn evidence_toggles_reset_with_new_report() {
        let mut lc = Lifecycle::new();
        let (t, _) = lc.begin("Netflix").unwrap();
        lc.complete(t, Ok(report("Netflix")));

        assert!(lc.toggle_evidence("encryption"));
        assert!(lc.is_expanded("encryption"));
        assert!(!lc.toggle_evidence("mystery"));
        assert!(!lc.is_expanded("mystery"));

        let (t, _) = lc.begin("Spotify").unwrap();
        assert!(!lc.is_expanded("encryption"));
        lc.complete(t, Ok(report("Spotify")));
        assert!(!lc.is_expanded("encryption"));

        assert!(lc.toggle_evidence("encryption"));
        assert!(!lc.toggle_evidence("encryption"));
    }

    #[test]
    fn toggles_need_a_report() {
        let mut lc = Lifecycle::new();
        assert!(!lc.toggle_evidence("encryption"));
        lc.begin("Netflix").unwrap();
        assert!(!lc.toggle_evidence("encryption"));
    }
}
