//! Error types for the core crate.

use thiserror::Error;

/// Errors that can occur in the core crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Error when an address cannot be parsed.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Error when a byte-string field is not valid hex or not valid UTF-8.
    #[error("Invalid byte-string encoding: {0}")]
    InvalidEncoding(String),

    /// Error when a type descriptor cannot be parsed.
    #[error("Invalid type tag '{input}': {reason}")]
    InvalidTypeTag {
        /// The descriptor that failed to parse
        input: String,
        /// What the parser expected
        reason: String,
    },

    /// Error when a resource type has no typed decoder.
    #[error("Unknown resource type: {0}")]
    UnknownResource(String),

    /// Error when a resource or table value does not match its declared shape.
    #[error("Decode error for {type_name}: {reason}")]
    Decode {
        /// The type that was being decoded
        type_name: String,
        /// The underlying failure
        reason: String,
    },
}
