use std::time::Duration;

/// Environment variable holding the backend base URL.
pub const BACKEND_URL_ENV: &str = "BACKEND_URL";

/// Backend used when `BACKEND_URL` is unset or blank.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Deadline for a single analysis call.
pub const ANALYZE_TIMEOUT: Duration = Duration::from_secs(120);

/// Where the analysis backend lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleConfig {
    /// Base URL without trailing slash, e.g. `http://localhost:8000`.
    pub base_url: String,
    pub timeout: Duration,
}

impl OracleConfig {
    pub fn new(base_url: impl AsRef<str>) -> Self {
        let trimmed = base_url.as_ref().trim().trim_end_matches('/');
        let base_url = if trimmed.is_empty() {
            DEFAULT_BACKEND_URL.to_string()
        } else {
            trimmed.to_string()
        };
        Self {
            base_url,
            timeout: ANALYZE_TIMEOUT,
        }
    }

    /// Read `BACKEND_URL`, falling back to [`DEFAULT_BACKEND_URL`].
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self::new(lookup(BACKEND_URL_ENV).unwrap_or_default())
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BACKEND_URL)
    }
}
