//! Error types for Jenkins TUI with categorization:
//!
//! - **Connection errors**: transport, authentication, unexpected status, unreadable body
//! - **Not found errors**: the server answered, but the job or build does not exist
//! - **Config errors**: unreadable or invalid persisted configuration (fatal at startup)

use thiserror::Error;

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type shared by the client, the facade and configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The server could not be reached or answered unexpectedly.
    #[error("connection error: {reason}")]
    Connection { reason: String },

    /// A job or build addressed by path does not exist.
    #[error("not found: {resource}")]
    NotFound { resource: String },

    /// Configuration could not be read, parsed or validated.
    #[error("configuration error: {reason}")]
    Config { reason: String },
}

impl Error {
    /// Create a connection error.
    pub fn connection(reason: impl Into<String>) -> Self {
        Self::Connection {
            reason: reason.into(),
        }
    }

    /// Create a not found error.
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// Error returned by every facade operation before a connect has succeeded.
    pub fn not_connected() -> Self {
        Self::connection("not connected to Jenkins server")
    }

    /// Returns the process exit code for this error.
    ///
    /// Exit code scheme:
    /// - 1: configuration (the only error that can abort startup)
    /// - 2: connection
    /// - 3: not found
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config { .. } => 1,
            Self::Connection { .. } => 2,
            Self::NotFound { .. } => 3,
        }
    }

    /// Whether this is a connection error.
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::connection(format!("request timed out: {err}"))
        } else if err.is_decode() {
            Self::connection(format!("failed to parse response: {err}"))
        } else {
            Self::connection(err.to_string())
        }
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Self::config(format!("failed to parse config file: {err}"))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_connection() {
        let err = Error::connection("unexpected status code: 500");
        assert_eq!(
            err.to_string(),
            "connection error: unexpected status code: 500"
        );
    }

    #[test]
    fn test_error_display_not_found() {
        let err = Error::not_found("job 'demo'");
        assert_eq!(err.to_string(), "not found: job 'demo'");
    }

    #[test]
    fn test_not_connected_is_connection_error() {
        let err = Error::not_connected();
        assert!(err.is_connection());
        assert!(err.to_string().contains("not connected"));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(Error::config("bad").exit_code(), 1);
        assert_eq!(Error::connection("down").exit_code(), 2);
        assert_eq!(Error::not_found("job").exit_code(), 3);
    }

    #[test]
    fn test_error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::from(io_err);
        assert!(matches!(err, Error::Config { .. }));
    }
}
