//! Error types for the admin API client

use thiserror::Error;

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur while talking to the admin API
#[derive(Error, Debug)]
pub enum ClientError {
    /// Connection, TLS or timeout failure
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend answered with anything but 200
    #[error("Unexpected status {status} from {url}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Requested URL
        url: String,
    },

    /// Response body did not match the expected shape
    #[error("Failed to decode response from {url}: {message}")]
    Decode {
        /// Requested URL
        url: String,
        /// Decoder message
        message: String,
    },

    /// A record lacks the id an endpoint needs
    #[error("Missing {what}; the request was not sent")]
    MissingId {
        /// Which id was missing
        what: String,
    },

    /// Client could not be built from configuration
    #[error("Invalid client configuration: {message}")]
    Configuration {
        /// Error message
        message: String,
    },

    /// Injected or in-memory backend failure
    #[error("Backend rejected the request: {message}")]
    Rejected {
        /// Error message
        message: String,
    },
}

impl ClientError {
    /// Create an unexpected status error
    pub fn unexpected_status(status: u16, url: impl Into<String>) -> Self {
        Self::UnexpectedStatus {
            status,
            url: url.into(),
        }
    }

    /// Create a decode error
    pub fn decode(url: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Decode {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Create a missing id error
    pub fn missing_id(what: impl Into<String>) -> Self {
        Self::MissingId { what: what.into() }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a rejected error
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// HTTP status when the backend answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the failure happened before any request was sent
    pub const fn is_local(&self) -> bool {
        matches!(self, Self::MissingId { .. } | Self::Configuration { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_display() {
        assert_eq!(
            ClientError::unexpected_status(500, "http://localhost:8090/api/question/list").to_string(),
            "Unexpected status 500 from http://localhost:8090/api/question/list"
        );
        assert_eq!(
            ClientError::missing_id("post id").to_string(),
            "Missing post id; the request was not sent"
        );
        assert_eq!(
            ClientError::decode("u", "expected a sequence").to_string(),
            "Failed to decode response from u: expected a sequence"
        );
    }

    #[test]
    fn test_status_and_locality() {
        assert_eq!(ClientError::unexpected_status(404, "u").status(), Some(404));
        assert_eq!(ClientError::missing_id("x").status(), None);
        assert!(ClientError::missing_id("x").is_local());
        assert!(ClientError::configuration("bad").is_local());
        assert!(!ClientError::rejected("no").is_local());
    }
}
