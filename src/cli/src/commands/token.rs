//! Token commands.

use token_client::{Account, ClientError, LedgerClient, TokenClient};
use token_core::payload::TokenParams;
use token_core::{Address, TokenData};
use tracing::info;

/// Runs the create-token command.
pub async fn create<L: LedgerClient>(
    client: &TokenClient<L>,
    account: &dyn Account,
    params: &TokenParams,
) -> Result<String, ClientError> {
    info!("Creating token '{}' in '{}'", params.name, params.collection);
    client.create_token_with(account, params).await
}

/// Runs the token-data command.
pub async fn show<L: LedgerClient>(
    client: &TokenClient<L>,
    creator: &Address,
    collection: &str,
    name: &str,
) -> Result<TokenData, ClientError> {
    client.get_token_data(creator, collection, name).await
}
