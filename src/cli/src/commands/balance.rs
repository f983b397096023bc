//! Balance and store commands.

use token_client::query::AccountStores;
use token_client::{ClientError, LedgerClient, TokenClient};
use token_core::{Address, Token, TokenId};
use tracing::debug;

/// Runs the balance command.
///
/// Without an owner this reports the creator's own balance.
pub async fn run<L: LedgerClient>(
    client: &TokenClient<L>,
    owner: Option<&Address>,
    token_id: &TokenId,
) -> Result<Token, ClientError> {
    let data_id = &token_id.token_data_id;
    match owner {
        Some(owner) => {
            debug!("Getting balance for {}", owner);
            client.get_token_balance_for_account(owner, token_id).await
        }
        None => {
            client
                .get_token_balance(
                    &data_id.creator,
                    &data_id.collection,
                    &data_id.name,
                    Some(token_id.property_version),
                )
                .await
        }
    }
}

/// Runs the stores command.
pub async fn stores<L: LedgerClient>(client: &TokenClient<L>, address: &Address) -> Result<AccountStores, ClientError> {
    client.get_account_stores(address).await
}
