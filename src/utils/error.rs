//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::fmt;
use thiserror::Error;

/// Errors that can occur while loading a trace
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to read trace file: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid trace format: {0}")]
    InvalidFormat(String),
}

/// Stable, user-facing category of a [`MetricError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    UnsupportedOldChrome,
    NoTracingStarted,
    NoMainFrame,
    ParseError,
}

impl ErrorCode {
    /// Screaming-case identifier shown to users and written to logs
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::UnsupportedOldChrome => "UNSUPPORTED_OLD_CHROME",
            ErrorCode::NoTracingStarted => "NO_TRACING_STARTED",
            ErrorCode::NoMainFrame => "NO_MAIN_FRAME",
            ErrorCode::ParseError => "PARSE_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while computing a metric from a trace
#[derive(Error, Debug)]
pub enum MetricError {
    /// The trace was captured by a browser too old to carry the data a metric needs
    #[error("This version of Chrome is too old to support '{feature_name}'. Use a newer version to see full results.")]
    UnsupportedOldChrome { feature_name: String },

    #[error("No TracingStartedInBrowser event found in trace")]
    NoTracingStarted,

    #[error("Could not determine the main frame of the traced tab")]
    NoMainFrame,

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl MetricError {
    pub fn unsupported_old_chrome(feature_name: impl Into<String>) -> Self {
        MetricError::UnsupportedOldChrome {
            feature_name: feature_name.into(),
        }
    }

    /// Category of this failure
    pub fn code(&self) -> ErrorCode {
        match self {
            MetricError::UnsupportedOldChrome { .. } => ErrorCode::UnsupportedOldChrome,
            MetricError::NoTracingStarted => ErrorCode::NoTracingStarted,
            MetricError::NoMainFrame => ErrorCode::NoMainFrame,
            MetricError::Parse(_) => ErrorCode::ParseError,
        }
    }

    /// Feature name carried by an `UNSUPPORTED_OLD_CHROME` failure
    pub fn feature_name(&self) -> Option<&str> {
        match self {
            MetricError::UnsupportedOldChrome { feature_name } => Some(feature_name),
            _ => None,
        }
    }
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_old_chrome_code_and_detail() {
        let err = MetricError::unsupported_old_chrome("Cumulative Layout Shift All Frames");
        assert_eq!(err.code(), ErrorCode::UnsupportedOldChrome);
        assert_eq!(err.code().as_str(), "UNSUPPORTED_OLD_CHROME");
        assert_eq!(err.feature_name(), Some("Cumulative Layout Shift All Frames"));
        assert!(err.to_string().contains("Cumulative Layout Shift All Frames"));
    }

    #[test]
    fn test_other_codes_have_no_feature_name() {
        assert_eq!(MetricError::NoTracingStarted.code(), ErrorCode::NoTracingStarted);
        assert!(MetricError::NoMainFrame.feature_name().is_none());

        let parse = MetricError::from(ParseError::InvalidFormat("bad".to_string()));
        assert_eq!(parse.code().to_string(), "PARSE_ERROR");
    }
}
