//! Local validation of search queries before they reach the backend.

use thiserror::Error;

/// Longest query the backend accepts.
pub const MAX_QUERY_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("query is empty")]
    Empty,
    #[error("query is {len} characters long (max {max})")]
    TooLong { len: usize, max: usize },
}

/// Trim a raw query and check it is submittable.
pub fn normalize_query(raw: &str) -> Result<String, QueryError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(QueryError::Empty);
    }
    let len = trimmed.chars().count();
    if len > MAX_QUERY_CHARS {
        return Err(QueryError::TooLong {
            len,
            max: MAX_QUERY_CHARS,
        });
    }
    Ok(trimmed.to_string())
}
