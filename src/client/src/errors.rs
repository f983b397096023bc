//! Error types for the client crate.

use thiserror::Error;
use token_core::CoreError;

/// Errors raised by a ledger collaborator, surfaced unchanged.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Error when the HTTP transport fails.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Error when the ledger reports that an object does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Error when the ledger rejects a request.
    #[error("Ledger API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the ledger
        status: u16,
        /// Error body returned by the ledger
        message: String,
    },

    /// Error when a ledger response cannot be parsed.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Error when signing a transaction fails.
    #[error("Signature error: {0}")]
    SignatureError(String),

    /// Error when a transaction does not reach a terminal state in time.
    #[error("Timed out waiting for transaction {0}")]
    Timeout(String),
}

impl From<serde_json::Error> for LedgerError {
    fn from(error: serde_json::Error) -> Self {
        LedgerError::InvalidResponse(error.to_string())
    }
}

/// Errors that can occur in the client crate.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Error when a ledger call fails.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Error when a core operation fails.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Error when an account does not hold the expected resource.
    #[error("Resource {resource} not found on account {address}")]
    ResourceNotFound {
        /// The account that was queried
        address: String,
        /// The expected resource type
        resource: String,
    },

    /// Error when a table has no entry for the requested key.
    #[error("No entry in table {handle} for key {key}")]
    TableItemNotFound {
        /// The table that was queried
        handle: String,
        /// The encoded key
        key: String,
    },

    /// Error when a resource's type does not structurally match the expected type.
    #[error("Type mismatch: expected {expected}, found {actual}")]
    TypeMismatch {
        /// The expected type
        expected: String,
        /// The type reported by the ledger
        actual: String,
    },

    /// Error when a table value does not decode as the declared value type.
    #[error("Failed to decode {type_name}: {reason}")]
    Decode {
        /// The declared value type
        type_name: String,
        /// The underlying failure
        reason: String,
    },

    /// Error when a confirmed transaction did not execute successfully.
    #[error("Transaction {hash} failed: {vm_status}")]
    TransactionFailed {
        /// The transaction hash
        hash: String,
        /// The ledger's execution status
        vm_status: String,
    },

    /// Error when token property lists have different lengths.
    #[error("Property lists differ in length: {keys} keys, {values} values, {types} types")]
    PropertyLengthMismatch {
        keys: usize,
        values: usize,
        types: usize,
    },

    /// Error when the configuration cannot be loaded.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}
