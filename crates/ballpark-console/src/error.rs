//! Error types for the admin console

use ballpark_client::ClientError;
use thiserror::Error;

/// Result type alias for console operations
pub type Result<T> = std::result::Result<T, ConsoleError>;

/// Errors surfaced by the console and its command line
#[derive(Error, Debug)]
pub enum ConsoleError {
    /// Configuration, validation or other core failure
    #[error(transparent)]
    Core(#[from] ballpark_core::Error),

    /// Admin API failure
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Terminal I/O failure
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Requested record is not in the loaded list
    #[error("No {what} with id {id}")]
    UnknownRecord {
        /// Kind of record
        what: &'static str,
        /// Requested id
        id: String,
    },

    /// Command line value rejected before any request
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },
}

impl ConsoleError {
    /// Create an unknown record error
    pub fn unknown_record(what: &'static str, id: impl ToString) -> Self {
        Self::UnknownRecord {
            what,
            id: id.to_string(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_display() {
        assert_eq!(
            ConsoleError::unknown_record("user", 7).to_string(),
            "No user with id 7"
        );
        assert_eq!(
            ConsoleError::invalid_argument("page size 15 is not offered").to_string(),
            "Invalid argument: page size 15 is not offered"
        );
    }

    #[test]
    fn test_wrapped_errors_keep_their_message() {
        let client = ClientError::unexpected_status(500, "http://localhost:8090/api/admin/users");
        assert_eq!(
            ConsoleError::from(client).to_string(),
            "Unexpected status 500 from http://localhost:8090/api/admin/users"
        );
    }
}
