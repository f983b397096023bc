//! The ledger collaborator and the transaction values it owns.

use crate::account::Account;
use crate::errors::LedgerError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use token_core::encoding::u64_string;
use token_core::{Address, MoveResource, MoveStructTag, TableHandle, TableItemRequest, TransactionPayload};

/// Options applied when drafting a transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransactionOptions {
    /// Gas ceiling for the transaction
    pub max_gas_amount: u64,
}

impl TransactionOptions {
    pub fn with_max_gas(max_gas_amount: u64) -> Self {
        Self { max_gas_amount }
    }
}

/// An unsigned transaction draft, scoped to the sender's sequence number.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TransactionRequest {
    pub sender: Address,
    #[serde(with = "u64_string")]
    pub sequence_number: u64,
    #[serde(with = "u64_string")]
    pub max_gas_amount: u64,
    #[serde(with = "u64_string")]
    pub gas_unit_price: u64,
    #[serde(with = "u64_string")]
    pub expiration_timestamp_secs: u64,
    pub payload: TransactionPayload,
}

/// Authenticator attached to a signed transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TransactionSignature {
    #[serde(rename = "type")]
    pub signature_type: String,
    pub public_key: String,
    pub signature: String,
}

impl TransactionSignature {
    pub fn ed25519(public_key: String, signature: &[u8]) -> Self {
        Self {
            signature_type: "ed25519_signature".to_string(),
            public_key,
            signature: format!("0x{}", hex::encode(signature)),
        }
    }
}

/// A transaction ready for submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SignedTransaction {
    #[serde(flatten)]
    pub request: TransactionRequest,
    pub signature: TransactionSignature,
}

/// Acknowledgement of a submitted transaction.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct PendingTransaction {
    pub hash: String,
}

/// A transaction that reached a terminal state.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TransactionResult {
    pub hash: String,
    pub success: bool,
    pub vm_status: String,
}

/// Raw access to the ledger.
///
/// Implementations surface their own failures as [`LedgerError`]; callers do
/// not retry.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Drafts a transaction for `sender` at its current sequence number.
    async fn generate_transaction(
        &self,
        sender: &Address,
        payload: TransactionPayload,
        options: TransactionOptions,
    ) -> Result<TransactionRequest, LedgerError>;

    /// Signs a draft with the signer's key.
    async fn sign_transaction(
        &self,
        signer: &dyn Account,
        request: TransactionRequest,
    ) -> Result<SignedTransaction, LedgerError>;

    /// Submits a signed transaction.
    async fn submit_transaction(&self, signed: &SignedTransaction) -> Result<PendingTransaction, LedgerError>;

    /// Waits until the transaction is confirmed or failed.
    async fn wait_for_transaction(&self, hash: &str) -> Result<TransactionResult, LedgerError>;

    /// Fetches one resource of an account by type.
    async fn get_account_resource(
        &self,
        address: &Address,
        resource_type: &MoveStructTag,
    ) -> Result<MoveResource, LedgerError>;

    /// Fetches every resource of an account.
    async fn get_account_resources(&self, address: &Address) -> Result<Vec<MoveResource>, LedgerError>;

    /// Looks up one entry of a table.
    async fn get_table_item(&self, handle: &TableHandle, request: &TableItemRequest) -> Result<Value, LedgerError>;
}
