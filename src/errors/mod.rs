use anyhow::Context as _;
use thiserror::Error;

/// Errors raised by the ranking core and its input boundary
#[derive(Debug, Error)]
pub enum RankingError {
    #[error("invalid ranking config: `{field}` {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("invalid alias pattern `{pattern}`")]
    InvalidAliasPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("malformed record #{index}: {reason}")]
    MalformedRecord { index: usize, reason: String },
}

impl RankingError {
    pub fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        RankingError::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

/// Add context to parse errors
pub fn parse_context(data_type: &str) -> String {
    format!("Failed to parse {}", data_type)
}

/// Add context to file errors
pub fn io_context(operation: &str, path: &std::path::Path) -> String {
    format!("Failed to {} file: {}", operation, path.display())
}

/// Wrap result with parse context
pub fn with_parse_context<T, E>(result: Result<T, E>, data_type: &str) -> anyhow::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result.context(parse_context(data_type))
}

/// Wrap result with file context
pub fn with_io_context<T, E>(
    result: Result<T, E>,
    operation: &str,
    path: &std::path::Path,
) -> anyhow::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result.with_context(|| io_context(operation, path))
}
