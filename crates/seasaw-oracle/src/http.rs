//! HTTP client for the analysis backend's `/analyze` and `/health` endpoints.

use async_trait::async_trait;
use reqwest::header::CACHE_CONTROL;
use seasaw_core::TrustReport;
use tracing::{info, warn};

use crate::{AnalyzeRequest, HealthStatus, Oracle, OracleConfig, OracleError, failure_from_response};

impl From<reqwest::Error> for OracleError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            OracleError::Timeout
        } else {
            OracleError::Transport(e.to_string())
        }
    }
}

/// HTTP client for the analysis backend.
pub struct OracleClient {
    client: reqwest::Client,
    base_url: String,
}

impl OracleClient {
    /// Build a client whose requests are bounded by `config.timeout`.
    pub fn new(config: OracleConfig) -> Result<Self, OracleError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask the backend whether it is up and which extraction mode it runs in.
    pub async fn health(&self) -> Result<HealthStatus, OracleError> {
        let url = format!("{}/health", self.base_url);
        info!(url = %url, "checking backend health");
        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(failure_from_response(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
                &body,
            ));
        }
        let text = resp.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl Oracle for OracleClient {
    async fn analyze(&self, query: &str) -> Result<TrustReport, OracleError> {
        let url = format!("{}/analyze", self.base_url);
        let body = AnalyzeRequest {
            query: query.trim().to_string(),
        };

        info!(url = %url, query = %body.query, "requesting analysis");
        let resp = self
            .client
            .post(&url)
            .header(CACHE_CONTROL, "no-cache")
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            let err = failure_from_response(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
                &text,
            );
            warn!(status = status.as_u16(), error = %err, "analysis rejected");
            return Err(err);
        }

        let text = resp.text().await?;
        let report: TrustReport = serde_json::from_str(&text).inspect_err(|e| {
            warn!(error = %e, "analysis response did not decode");
        })?;
        info!(
            service = %report.service_name,
            score = report.trust_score,
            grade = %report.grade,
            attributes = report.attributes.len(),
            "analysis received"
        );
        Ok(report)
    }
}
