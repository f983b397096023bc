//! REST implementation of the ledger collaborator.

use crate::account::Account;
use crate::config::ClientConfig;
use crate::errors::LedgerError;
use crate::ledger::{
    LedgerClient, PendingTransaction, SignedTransaction, TransactionOptions, TransactionRequest,
    TransactionResult, TransactionSignature,
};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::time::{sleep, Instant};
use token_core::encoding::u64_string;
use token_core::{Address, MoveResource, MoveStructTag, TableHandle, TableItemRequest, TransactionPayload};
use tracing::debug;

#[derive(Deserialize)]
struct AccountInfo {
    #[serde(with = "u64_string")]
    sequence_number: u64,
}

#[derive(Deserialize)]
struct SigningMessage {
    message: String,
}

/// A [`LedgerClient`] talking to a ledger node over HTTP.
#[derive(Debug, Clone)]
pub struct RestClient {
    base_url: String,
    http: reqwest::Client,
    gas_unit_price: u64,
    expiration_secs: u64,
    wait_timeout: Duration,
    poll_interval: Duration,
}

impl RestClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            base_url: config.node_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            gas_unit_price: config.gas_unit_price,
            expiration_secs: config.expiration_secs,
            wait_timeout: Duration::from_secs(config.wait_timeout_secs),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, LedgerError> {
        let response = self.http.get(self.url(path)).send().await?;
        Self::decode(path, response).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, LedgerError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let response = self.http.post(self.url(path)).json(body).send().await?;
        Self::decode(path, response).await
    }

    async fn decode<T: DeserializeOwned>(path: &str, response: reqwest::Response) -> Result<T, LedgerError> {
        let status = response.status();
        let text = response.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Err(LedgerError::NotFound(format!("{}: {}", path, text)));
        }
        if !status.is_success() {
            return Err(LedgerError::Api {
                status: status.as_u16(),
                message: text,
            });
        }
        if text.is_empty() {
            return Err(LedgerError::InvalidResponse(format!("Empty response from node for {}", path)));
        }

        Ok(serde_json::from_str(&text)?)
    }

    fn expiration(&self) -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        now.saturating_add(self.expiration_secs)
    }
}

#[async_trait]
impl LedgerClient for RestClient {
    async fn generate_transaction(
        &self,
        sender: &Address,
        payload: TransactionPayload,
        options: TransactionOptions,
    ) -> Result<TransactionRequest, LedgerError> {
        let account: AccountInfo = self.get(&format!("accounts/{}", sender)).await?;
        debug!("Account {} at sequence number {}", sender, account.sequence_number);

        Ok(TransactionRequest {
            sender: *sender,
            sequence_number: account.sequence_number,
            max_gas_amount: options.max_gas_amount,
            gas_unit_price: self.gas_unit_price,
            expiration_timestamp_secs: self.expiration(),
            payload,
        })
    }

    async fn sign_transaction(
        &self,
        signer: &dyn Account,
        request: TransactionRequest,
    ) -> Result<SignedTransaction, LedgerError> {
        let signing: SigningMessage = self.post("transactions/signing_message", &request).await?;
        let digits = signing.message.strip_prefix("0x").unwrap_or(&signing.message);
        let message = hex::decode(digits)
            .map_err(|e| LedgerError::InvalidResponse(format!("Invalid signing message: {}", e)))?;

        let signature = signer.sign(&message)?;
        Ok(SignedTransaction {
            request,
            signature: TransactionSignature::ed25519(signer.public_key(), &signature),
        })
    }

    async fn submit_transaction(&self, signed: &SignedTransaction) -> Result<PendingTransaction, LedgerError> {
        self.post("transactions", signed).await
    }

    async fn wait_for_transaction(&self, hash: &str) -> Result<TransactionResult, LedgerError> {
        // No deadline when the timeout is beyond what the clock can represent
        let deadline = Instant::now().checked_add(self.wait_timeout);
        let path = format!("transactions/{}", hash);

        loop {
            match self.get::<Value>(&path).await {
                Ok(txn) => {
                    if txn.get("type").and_then(Value::as_str) != Some("pending_transaction") {
                        return Ok(serde_json::from_value(txn)?);
                    }
                }
                // Not yet indexed
                Err(LedgerError::NotFound(_)) => {}
                Err(e) => return Err(e),
            }

            if deadline.map_or(false, |deadline| Instant::now() >= deadline) {
                return Err(LedgerError::Timeout(hash.to_string()));
            }
            debug!("Transaction {} still pending", hash);
            sleep(self.poll_interval).await;
        }
    }

    async fn get_account_resource(
        &self,
        address: &Address,
        resource_type: &MoveStructTag,
    ) -> Result<MoveResource, LedgerError> {
        self.get(&format!("accounts/{}/resource/{}", address, resource_type))
            .await
    }

    async fn get_account_resources(&self, address: &Address) -> Result<Vec<MoveResource>, LedgerError> {
        self.get(&format!("accounts/{}/resources", address)).await
    }

    async fn get_table_item(&self, handle: &TableHandle, request: &TableItemRequest) -> Result<Value, LedgerError> {
        self.post(&format!("tables/{}/item", handle), request).await
    }
}
