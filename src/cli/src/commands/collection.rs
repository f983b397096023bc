//! Collection commands.

use token_client::{Account, ClientError, LedgerClient, TokenClient};
use token_core::payload::CollectionParams;
use token_core::{Address, CollectionData};
use tracing::info;

/// Runs the create-collection command.
pub async fn create<L: LedgerClient>(
    client: &TokenClient<L>,
    account: &dyn Account,
    params: &CollectionParams,
) -> Result<String, ClientError> {
    info!("Creating collection '{}'", params.name);
    client.create_collection_with(account, params).await
}

/// Runs the collection command.
pub async fn show<L: LedgerClient>(
    client: &TokenClient<L>,
    creator: &Address,
    name: &str,
) -> Result<CollectionData, ClientError> {
    client.get_collection_data(creator, name).await
}
