//! Offer, claim and cancel-offer commands.

use token_client::{Account, ClientError, LedgerClient, TokenClient};
use token_core::{Address, TokenId};

/// The side of a pending offer a transfer command acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferAction {
    /// Offer tokens to the counterparty
    Offer { amount: u64 },
    /// Claim tokens offered by the counterparty
    Claim,
    /// Withdraw an offer made to the counterparty
    Cancel,
}

/// Runs one transfer command against `counterparty`.
pub async fn run<L: LedgerClient>(
    client: &TokenClient<L>,
    account: &dyn Account,
    action: TransferAction,
    counterparty: &Address,
    token_id: &TokenId,
) -> Result<String, ClientError> {
    match action {
        TransferAction::Offer { amount } => client.offer_token(account, counterparty, token_id, amount).await,
        TransferAction::Claim => client.claim_token(account, counterparty, token_id).await,
        TransferAction::Cancel => client.cancel_token_offer(account, counterparty, token_id).await,
    }
}
