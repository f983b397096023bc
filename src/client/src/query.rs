//! Read operations over the token tables.

use crate::errors::ClientError;
use crate::ledger::LedgerClient;
use crate::resolver::ResourceResolver;
use token_core::types::Address;
use token_core::{CollectionData, CollectionId, TableItemRequest, Token, TokenData, TokenDataId, TokenId, TokenStore};
use tracing::debug;

/// Which token resources an account holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AccountStores {
    /// The account holds a collection and token-data registry
    pub collections: bool,
    /// The account holds a token store
    pub token_store: bool,
}

/// Each query is one resource fetch followed by one table lookup.
pub struct QueryFacade<'a, L: LedgerClient + ?Sized> {
    resolver: ResourceResolver<'a, L>,
}

impl<'a, L: LedgerClient + ?Sized> QueryFacade<'a, L> {
    pub fn new(ledger: &'a L) -> Self {
        Self {
            resolver: ResourceResolver::new(ledger),
        }
    }

    pub async fn get_collection_data(&self, id: &CollectionId) -> Result<CollectionData, ClientError> {
        debug!("Querying collection '{}' of {}", id.name, id.creator);
        let handle = self
            .resolver
            .resolve_table_handle(&id.creator, TokenStore::CollectionRegistry)
            .await?;
        self.resolver
            .lookup(&handle, &TableItemRequest::collection(&id.name))
            .await
    }

    pub async fn get_token_data(
        &self,
        creator: &Address,
        collection_name: &str,
        token_name: &str,
    ) -> Result<TokenData, ClientError> {
        debug!("Querying token '{}' in '{}' of {}", token_name, collection_name, creator);
        let id = TokenDataId::new(*creator, collection_name, token_name);
        let handle = self
            .resolver
            .resolve_table_handle(creator, TokenStore::TokenDataRegistry)
            .await?;

        let mut data: TokenData = self.resolver.lookup(&handle, &TableItemRequest::token_data(&id)).await?;
        if data.collection.is_empty() {
            data.collection = id.collection;
        }
        Ok(data)
    }

    /// Balance of a token held by its own creator.
    pub async fn get_token_balance(
        &self,
        creator: &Address,
        collection_name: &str,
        token_name: &str,
        property_version: Option<u64>,
    ) -> Result<Token, ClientError> {
        let token_id = TokenId::new(TokenDataId::new(*creator, collection_name, token_name), property_version);
        self.get_token_balance_for_account(creator, &token_id).await
    }

    pub async fn get_token_balance_for_account(&self, account: &Address, token_id: &TokenId) -> Result<Token, ClientError> {
        debug!(
            "Querying balance of '{}' v{} for {}",
            token_id.token_data_id.name, token_id.property_version, account
        );
        let handle = self
            .resolver
            .resolve_table_handle(account, TokenStore::TokenBalances)
            .await?;
        self.resolver.lookup(&handle, &TableItemRequest::token(token_id)).await
    }

    /// Reports which token resources `account` holds, in one resource listing.
    pub async fn get_account_stores(&self, account: &Address) -> Result<AccountStores, ClientError> {
        let tags = [
            TokenStore::CollectionRegistry.resource_tag(),
            TokenStore::TokenBalances.resource_tag(),
        ];
        let found = self.resolver.find_resources(account, &tags).await?;

        Ok(AccountStores {
            collections: found[0].is_some(),
            token_store: found[1].is_some(),
        })
    }
}
