//! Error types for merge-keeper

use thiserror::Error;

/// Errors produced while loading configuration or computing a context policy
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or contradictory configuration
    #[error("config error: {0}")]
    Config(String),

    /// A branch filter or change pattern failed to compile
    #[error("invalid pattern `{pattern}` in {field}: {source}")]
    InvalidPattern {
        /// Configuration field the pattern came from
        field: String,
        /// The offending pattern (after joining alternatives)
        pattern: String,
        /// Underlying regex error
        #[source]
        source: regex::Error,
    },

    /// Failed to read configuration or status input from disk
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid TOML for the expected layout
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Status report is not valid JSON for the expected layout
    #[error("failed to parse status report: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error is a configuration error.
    ///
    /// Pattern compilation failures count as configuration errors.
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config(_) | Self::InvalidPattern { .. })
    }

    /// Prefix configuration errors with where they came from.
    ///
    /// Other errors are returned unchanged.
    #[must_use]
    pub fn within(self, location: impl std::fmt::Display) -> Self {
        match self {
            Self::Config(msg) => Self::Config(format!("{location}: {msg}")),
            Self::InvalidPattern {
                field,
                pattern,
                source,
            } => Self::InvalidPattern {
                field: format!("{location}: {field}"),
                pattern,
                source,
            },
            other => other,
        }
    }
}

/// Result type alias using merge-keeper's Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_pattern_is_config_error() {
        let source = regex::Regex::new("(").unwrap_err();
        let err = Error::InvalidPattern {
            field: "branches".to_string(),
            pattern: "(".to_string(),
            source,
        };
        assert!(err.is_config());
        assert!(err.to_string().contains("branches"));
    }

    #[test]
    fn test_within_prefixes_config_errors() {
        let err = Error::Config("bad".to_string()).within("o/r");
        assert_eq!(err.to_string(), "config error: o/r: bad");

        let source = regex::Regex::new("(").unwrap_err();
        let err = Error::InvalidPattern {
            field: "branches".to_string(),
            pattern: "(".to_string(),
            source,
        }
        .within("keeper.toml");
        assert!(err.to_string().contains("keeper.toml: branches"));
    }

    #[test]
    fn test_within_leaves_io_errors_alone() {
        let err = Error::from(std::io::Error::other("boom")).within("keeper.toml");
        assert_eq!(err.to_string(), "I/O error: boom");
    }

    #[test]
    fn test_io_error_is_not_config_error() {
        let err = Error::from(std::io::Error::other("boom"));
        assert!(!err.is_config());
    }
}
