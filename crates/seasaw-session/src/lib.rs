//! Analysis request lifecycle: one authoritative state slot, oracle calls on
//! spawned tasks, and a deadline on every call.

mod lifecycle;

pub use lifecycle::{AnalysisState, Lifecycle, Ticket};

use std::sync::Arc;
use std::time::Duration;

use seasaw_core::QueryError;
use seasaw_oracle::{ANALYZE_TIMEOUT, Oracle, OracleError};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Drives a [`Lifecycle`] against an [`Oracle`].
///
/// State lives in a `watch` channel: renderers subscribe and redraw on change
/// (e.g. a progress indicator while pending) without ever waiting on the
/// oracle. A new submission supersedes the previous one; the earlier call is
/// left to finish or time out and its outcome is discarded.
pub struct AnalysisSession {
    oracle: Arc<dyn Oracle>,
    timeout: Duration,
    state: Arc<watch::Sender<Lifecycle>>,
}

impl AnalysisSession {
    /// Session with the standard 120 second deadline.
    pub fn new(oracle: Arc<dyn Oracle>) -> Self {
        Self::with_timeout(oracle, ANALYZE_TIMEOUT)
    }

    pub fn with_timeout(oracle: Arc<dyn Oracle>, timeout: Duration) -> Self {
        let (tx, _rx) = watch::channel(Lifecycle::new());
        Self {
            oracle,
            timeout,
            state: Arc::new(tx),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Lifecycle> {
        self.state.subscribe()
    }

    /// Copy of the current lifecycle.
    pub fn snapshot(&self) -> Lifecycle {
        self.state.borrow().clone()
    }

    /// Start analysing `query`.
    ///
    /// Invalid queries are rejected before anything changes and the oracle is
    /// not contacted. On success the returned handle resolves once the outcome
    /// has been applied (or discarded as stale).
    pub fn submit(&self, query: &str) -> Result<JoinHandle<()>, QueryError> {
        let mut begun = None;
        self.state.send_if_modified(|lc| {
            let result = lc.begin(query);
            let accepted = result.is_ok();
            begun = Some(result);
            accepted
        });

        let Some(begun) = begun else {
            unreachable!("send_if_modified always runs its closure")
        };
        let (ticket, query) = begun.inspect_err(|e| debug!(error = %e, "query rejected"))?;

        info!(ticket = ticket.get(), query = %query, "analysis submitted");

        let oracle = Arc::clone(&self.oracle);
        let state = Arc::clone(&self.state);
        let timeout = self.timeout;
        Ok(tokio::spawn(async move {
            let outcome = match tokio::time::timeout(timeout, oracle.analyze(&query)).await {
                Ok(result) => result,
                Err(_) => Err(OracleError::Timeout),
            };

            match &outcome {
                Ok(report) => info!(
                    ticket = ticket.get(),
                    service = %report.service_name,
                    score = report.trust_score,
                    "analysis succeeded"
                ),
                Err(e) => warn!(ticket = ticket.get(), error = %e, "analysis failed"),
            }

            let applied = state.send_if_modified(|lc| lc.complete(ticket, outcome));
            if applied {
                debug!(
                    ticket = ticket.get(),
                    state = state.borrow().state().as_str(),
                    "analysis outcome applied"
                );
            } else {
                debug!(ticket = ticket.get(), "discarding superseded analysis outcome");
            }
        }))
    }

    /// Submit and wait for the outcome, returning the resulting state.
    pub async fn analyze(&self, query: &str) -> Result<AnalysisState, QueryError> {
        let handle = self.submit(query)?;
        if let Err(e) = handle.await {
            warn!(error = %e, "analysis task ended abnormally");
        }
        Ok(self.state.borrow().state().clone())
    }

    /// Return to idle ("analyze another service").
    pub fn reset(&self) {
        self.state.send_modify(Lifecycle::reset);
        info!("session reset");
    }

    /// Flip the evidence toggle for one attribute of the current report.
    pub fn toggle_evidence(&self, attribute_id: &str) -> bool {
        let mut expanded = false;
        self.state.send_if_modified(|lc| {
            let known = lc
                .report()
                .is_some_and(|r| r.attribute(attribute_id).is_some());
            expanded = lc.toggle_evidence(attribute_id);
            known
        });
        expanded
    }
}
