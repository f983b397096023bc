//! Token client: the five write operations and the read operations.

use crate::account::Account;
use crate::config::{ClientConfig, DEFAULT_MAX_GAS_AMOUNT};
use crate::errors::ClientError;
use crate::ledger::LedgerClient;
use crate::query::{AccountStores, QueryFacade};
use crate::rest::RestClient;
use crate::submit::SubmissionPipeline;
use std::sync::Arc;
use token_core::payload::{self, CollectionParams, TokenParams};
use token_core::types::Address;
use token_core::{CollectionData, CollectionId, Token, TokenData, TokenId};
use tracing::info;

/// Issues, transfers and queries tokens through a [`LedgerClient`].
///
/// The client holds no mutable state; concurrent calls are independent.
pub struct TokenClient<L: LedgerClient> {
    ledger: Arc<L>,
    max_gas_amount: u64,
}

impl TokenClient<RestClient> {
    /// Creates a client backed by the REST ledger client.
    pub fn connect(config: &ClientConfig) -> Self {
        Self::with_config(Arc::new(RestClient::new(config)), config)
    }
}

impl<L: LedgerClient> TokenClient<L> {
    pub fn new(ledger: Arc<L>) -> Self {
        Self {
            ledger,
            max_gas_amount: DEFAULT_MAX_GAS_AMOUNT,
        }
    }

    pub fn with_config(ledger: Arc<L>, config: &ClientConfig) -> Self {
        Self {
            ledger,
            max_gas_amount: config.max_gas_amount,
        }
    }

    /// The underlying ledger client.
    pub fn ledger(&self) -> &L {
        self.ledger.as_ref()
    }

    fn pipeline(&self) -> SubmissionPipeline<'_, L> {
        SubmissionPipeline::new(self.ledger.as_ref(), self.max_gas_amount)
    }

    fn queries(&self) -> QueryFacade<'_, L> {
        QueryFacade::new(self.ledger.as_ref())
    }

    /// Creates an unbounded collection with default mutability.
    pub async fn create_collection(
        &self,
        account: &dyn Account,
        name: &str,
        description: &str,
        uri: &str,
    ) -> Result<String, ClientError> {
        self.create_collection_with(account, &CollectionParams::new(name, description, uri))
            .await
    }

    pub async fn create_collection_with(
        &self,
        account: &dyn Account,
        params: &CollectionParams,
    ) -> Result<String, ClientError> {
        info!("Creating collection '{}' for {}", params.name, account.address());
        self.pipeline()
            .submit(account, payload::create_collection(params))
            .await
    }

    /// Creates a token with default royalty, mutability and no properties.
    pub async fn create_token(
        &self,
        account: &dyn Account,
        collection_name: &str,
        name: &str,
        description: &str,
        supply: u64,
        uri: &str,
    ) -> Result<String, ClientError> {
        let params = TokenParams::new(collection_name, name, description, supply, uri);
        self.create_token_with(account, &params).await
    }

    /// Creates a token. Property lists of unequal length are rejected
    /// before anything is sent.
    pub async fn create_token_with(&self, account: &dyn Account, params: &TokenParams) -> Result<String, ClientError> {
        let properties = &params.properties;
        if !properties.is_consistent() {
            return Err(ClientError::PropertyLengthMismatch {
                keys: properties.keys.len(),
                values: properties.values.len(),
                types: properties.types.len(),
            });
        }

        info!(
            "Creating token '{}' in '{}' for {}",
            params.name,
            params.collection,
            account.address()
        );
        let creator = account.address();
        self.pipeline()
            .submit(account, payload::create_token(&creator, params))
            .await
    }

    /// Offers `amount` of a token to `receiver`, who must claim it.
    pub async fn offer_token(
        &self,
        account: &dyn Account,
        receiver: &Address,
        token_id: &TokenId,
        amount: u64,
    ) -> Result<String, ClientError> {
        info!(
            "Offering {} of '{}' from {} to {}",
            amount,
            token_id.token_data_id.name,
            account.address(),
            receiver
        );
        self.pipeline()
            .submit(account, payload::offer(receiver, token_id, amount))
            .await
    }

    /// Claims a token previously offered by `sender`.
    pub async fn claim_token(&self, account: &dyn Account, sender: &Address, token_id: &TokenId) -> Result<String, ClientError> {
        info!(
            "Claiming '{}' from {} for {}",
            token_id.token_data_id.name,
            sender,
            account.address()
        );
        self.pipeline()
            .submit(account, payload::claim(sender, token_id))
            .await
    }

    /// Withdraws a pending offer made to `receiver`.
    pub async fn cancel_token_offer(
        &self,
        account: &dyn Account,
        receiver: &Address,
        token_id: &TokenId,
    ) -> Result<String, ClientError> {
        info!(
            "Cancelling offer of '{}' from {} to {}",
            token_id.token_data_id.name,
            account.address(),
            receiver
        );
        self.pipeline()
            .submit(account, payload::cancel_offer(receiver, token_id))
            .await
    }

    pub async fn get_collection_data(&self, creator: &Address, collection_name: &str) -> Result<CollectionData, ClientError> {
        self.queries()
            .get_collection_data(&CollectionId::new(*creator, collection_name))
            .await
    }

    pub async fn get_token_data(
        &self,
        creator: &Address,
        collection_name: &str,
        token_name: &str,
    ) -> Result<TokenData, ClientError> {
        self.queries()
            .get_token_data(creator, collection_name, token_name)
            .await
    }

    /// Balance of a token held by its creator; an omitted property version means `0`.
    pub async fn get_token_balance(
        &self,
        creator: &Address,
        collection_name: &str,
        token_name: &str,
        property_version: Option<u64>,
    ) -> Result<Token, ClientError> {
        self.queries()
            .get_token_balance(creator, collection_name, token_name, property_version)
            .await
    }

    pub async fn get_token_balance_for_account(&self, account: &Address, token_id: &TokenId) -> Result<Token, ClientError> {
        self.queries()
            .get_token_balance_for_account(account, token_id)
            .await
    }

    pub async fn get_account_stores(&self, account: &Address) -> Result<AccountStores, ClientError> {
        self.queries().get_account_stores(account).await
    }
}
