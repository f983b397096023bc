//! Submission pipeline: draft, sign, submit, await finality.

use crate::account::Account;
use crate::errors::ClientError;
use crate::ledger::{LedgerClient, TransactionOptions};
use token_core::TransactionPayload;
use tracing::{debug, info};

/// Drives one payload through the full transaction lifecycle.
///
/// A failure at any stage aborts the whole submission. The draft's sequence
/// number is stale afterwards, so callers restart from the beginning.
pub struct SubmissionPipeline<'a, L: LedgerClient + ?Sized> {
    ledger: &'a L,
    max_gas_amount: u64,
}

impl<'a, L: LedgerClient + ?Sized> SubmissionPipeline<'a, L> {
    pub fn new(ledger: &'a L, max_gas_amount: u64) -> Self {
        Self { ledger, max_gas_amount }
    }

    /// Submits `payload` signed by `signer` and returns the confirmed transaction hash.
    pub async fn submit(&self, signer: &dyn Account, payload: TransactionPayload) -> Result<String, ClientError> {
        let sender = signer.address();
        let function = payload.function_name();

        let request = self
            .ledger
            .generate_transaction(&sender, payload, TransactionOptions::with_max_gas(self.max_gas_amount))
            .await?;
        debug!(
            "Drafted {} for {} at sequence number {}",
            function, sender, request.sequence_number
        );

        let signed = self.ledger.sign_transaction(signer, request).await?;
        let pending = self.ledger.submit_transaction(&signed).await?;
        info!("Submitted {} as {}", function, pending.hash);

        let result = self.ledger.wait_for_transaction(&pending.hash).await?;
        if !result.success {
            return Err(ClientError::TransactionFailed {
                hash: result.hash,
                vm_status: result.vm_status,
            });
        }

        info!("Transaction {} confirmed", result.hash);
        Ok(result.hash)
    }
}
