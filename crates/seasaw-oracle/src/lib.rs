//! Boundary to the policy analysis backend: the [`Oracle`] trait, its
//! configuration and error taxonomy, and an HTTP implementation.

mod config;
mod error;

#[cfg(feature = "http")]
pub mod http;

use async_trait::async_trait;
use seasaw_core::TrustReport;
use serde::{Deserialize, Serialize};

pub use config::{ANALYZE_TIMEOUT, BACKEND_URL_ENV, DEFAULT_BACKEND_URL, OracleConfig};
pub use error::{GENERIC_FAILURE_MESSAGE, OracleError, TIMEOUT_MESSAGE, failure_from_response};

#[cfg(feature = "http")]
pub use http::OracleClient;

/// Body of `POST /analyze`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub query: String,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    /// `llm` or `heuristic`.
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub ollama: String,
}

/// Something that turns a service query into a trust report.
///
/// The query handed in is already trimmed and non-empty. Implementations need
/// not enforce a deadline; callers bound the call themselves.
#[async_trait]
pub trait Oracle: Send + Sync {
    async fn analyze(&self, query: &str) -> Result<TrustReport, OracleError>;
}
