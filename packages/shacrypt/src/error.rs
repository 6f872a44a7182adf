//! Error handling for crypt records

use thiserror::Error;

/// Errors surfaced while decoding or processing crypt records
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptError {
    /// The string does not start with the scheme prefix
    #[error("Invalid prefix: expected {expected:?}")]
    InvalidPrefix {
        /// Prefix the scheme expected
        expected: &'static str,
    },

    /// The `rounds=` segment is not a decimal integer
    #[error("Malformed rounds segment: {0:?}")]
    MalformedRounds(String),

    /// The digest field holds characters outside the crypt alphabet
    #[error("Malformed digest: characters outside the crypt alphabet")]
    MalformedDigest,

    /// Wrong number of `$`-delimited fields after the prefix
    #[error("Malformed record: unexpected field count {found}")]
    FieldCount {
        /// Number of fields found after the prefix
        found: usize,
    },

    /// A blocking hash task could not complete
    #[error("Task error: {0}")]
    Task(String),
}

impl CryptError {
    /// Create a task error from any displayable cause
    #[must_use]
    pub fn task(msg: impl Into<String>) -> Self {
        Self::Task(msg.into())
    }
}

/// Result type for crypt operations
pub type Result<T> = std::result::Result<T, CryptError>;
