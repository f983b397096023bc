//! Ledger client for token operations.
//!
//! This crate drives token write operations through the
//! build, sign, submit and confirm lifecycle, and resolves token
//! queries through the account resource to table handle to table item
//! indirection. The ledger itself is reached through the [`LedgerClient`]
//! trait; [`RestClient`] implements it over the ledger's REST API.

pub mod account;
pub mod config;
pub mod errors;
pub mod ledger;
pub mod query;
pub mod resolver;
pub mod rest;
pub mod submit;
pub mod token_client;

// Re-export commonly used types
pub use account::{Account, LocalAccount};
pub use config::ClientConfig;
pub use errors::{ClientError, LedgerError};
pub use ledger::LedgerClient;
pub use rest::RestClient;
pub use token_client::TokenClient;
