//! Error types for the StudyQuote server.
//!
//! Pricing itself never fails; these errors cover configuration loading and
//! bringing the HTTP listener up.

use std::path::PathBuf;

/// A specialized `Result` type for StudyQuote server operations.
pub type Result<T> = std::result::Result<T, QuoteError>;

/// Errors that can occur while configuring or running the server.
#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration file could not be read or is not valid JSON.
    #[error("Invalid JSON in config file '{path}': {message}\n\nSuggestion: Validate your studyquote.json with a JSON linter")]
    ConfigParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Description of the parse error.
        message: String,
    },

    /// Configuration validation failed.
    #[error("Invalid configuration: {message}\n\nSuggestion: {suggestion}")]
    ConfigValidationError {
        /// Description of the validation failure.
        message: String,
        /// Actionable suggestion for the user.
        suggestion: String,
    },

    // ========================================================================
    // Server Errors
    // ========================================================================
    /// The HTTP listener could not bind its address.
    #[error("Failed to bind {addr}: {source}\n\nSuggestion: Choose another port with --port or STUDYQUOTE_PORT")]
    Bind {
        /// Address that was requested.
        addr: String,
        /// Underlying socket error.
        #[source]
        source: std::io::Error,
    },

    // ========================================================================
    // General I/O Errors
    // ========================================================================
    /// General I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl QuoteError {
    /// Creates a new `ConfigParseError` with the given path and message.
    #[must_use]
    pub fn config_parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ConfigParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new `ConfigValidationError` with the given message and suggestion.
    #[must_use]
    pub fn config_validation(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::ConfigValidationError {
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Creates a new `Bind` error.
    #[must_use]
    pub fn bind(addr: impl Into<String>, source: std::io::Error) -> Self {
        Self::Bind {
            addr: addr.into(),
            source,
        }
    }

    /// Returns `true` if the error comes from configuration input.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(
            self,
            Self::ConfigParseError { .. } | Self::ConfigValidationError { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_parse_display() {
        let err = QuoteError::config_parse("/etc/studyquote.json", "expected value at line 1");
        let msg = err.to_string();
        assert!(msg.contains("Invalid JSON"));
        assert!(msg.contains("/etc/studyquote.json"));
        assert!(msg.contains("Suggestion"));
    }

    #[test]
    fn test_bind_display() {
        let source = std::io::Error::new(std::io::ErrorKind::AddrInUse, "address in use");
        let err = QuoteError::bind("127.0.0.1:5050", source);
        let msg = err.to_string();
        assert!(msg.contains("127.0.0.1:5050"));
        assert!(msg.contains("--port"));
    }

    #[test]
    fn test_is_config() {
        assert!(QuoteError::config_validation("port must be nonzero", "set a port").is_config());

        let io_err: QuoteError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "file not found").into();
        assert!(!io_err.is_config());
        assert!(matches!(io_err, QuoteError::Io(_)));
    }
}
