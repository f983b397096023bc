//! Core primitives for ledger token operations.
//!
//! This crate provides the value types exchanged with the ledger's token
//! module, the byte-string encoding used for text fields, type descriptors,
//! the payload builder for every write operation, and the typed decoder for
//! the on-chain resources that anchor the token tables. Nothing here performs
//! I/O.

pub mod encoding;
pub mod errors;
pub mod payload;
pub mod resource;
pub mod type_tag;
pub mod types;

// Re-export commonly used types
pub use errors::CoreError;
pub use payload::{TransactionPayload, NUMBER_MAX};
pub use resource::{MoveResource, TableHandle, TableItemRequest, TokenResource, TokenStore};
pub use type_tag::{MoveStructTag, TypeTag};
pub use types::{Address, CollectionData, CollectionId, Token, TokenData, TokenDataId, TokenId};
