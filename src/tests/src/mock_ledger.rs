//! An in-memory ledger emulating the deployed token modules.
//!
//! Transactions execute synchronously on submission; waiting only reads
//! back the recorded outcome. Every collaborator call is recorded so tests
//! can check round-trips and stage ordering.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use token_client::ledger::{
    LedgerClient, PendingTransaction, SignedTransaction, TransactionOptions, TransactionRequest,
    TransactionResult, TransactionSignature,
};
use token_client::{Account, LedgerError, LocalAccount};
use token_core::encoding::decode_text;
use token_core::payload::Argument;
use token_core::{
    Address, CollectionData, MoveResource, MoveStructTag, TableHandle, TableItemRequest, Token,
    TokenDataId, TokenId, TokenStore, TransactionPayload, TypeTag,
};

/// A stage of the transaction lifecycle at which a failure can be injected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Generate,
    Sign,
    Submit,
    Wait,
}

/// Creates a deterministic test account whose address and key derive from `seed`.
pub fn account(seed: u8) -> LocalAccount {
    let address = Address::new([seed; Address::LENGTH]);
    LocalAccount::from_private_key_hex(address, &hex_key(seed)).expect("valid test key")
}

fn hex_key(seed: u8) -> String {
    format!("{:02x}", seed.wrapping_add(0x40)).repeat(32)
}

struct MockTable {
    key_type: TypeTag,
    value_type: TypeTag,
    items: HashMap<String, Value>,
}

#[derive(Default)]
struct LedgerState {
    sequence_numbers: HashMap<Address, u64>,
    resources: HashMap<Address, Vec<MoveResource>>,
    resource_overrides: HashMap<Address, MoveResource>,
    tables: HashMap<TableHandle, MockTable>,
    offers: HashMap<(Address, Address, String), u64>,
    transactions: HashMap<String, TransactionResult>,
    submitted: Vec<SignedTransaction>,
    calls: Vec<&'static str>,
    failures: Vec<Stage>,
    next_handle: u64,
    next_hash: u64,
}

/// In-memory [`LedgerClient`].
#[derive(Default)]
pub struct MockLedger {
    state: Mutex<LedgerState>,
}

fn key_string(key: &Value) -> String {
    key.to_string()
}

fn injected(stage: Stage) -> LedgerError {
    LedgerError::Api {
        status: 500,
        message: format!("injected failure at {:?}", stage),
    }
}

impl MockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().expect("ledger state poisoned")
    }

    /// Makes the next call at `stage` fail.
    pub fn fail_at(&self, stage: Stage) {
        self.state().failures.push(stage);
    }

    /// Names of the collaborator calls made so far, in order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.state().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state().calls.clear();
    }

    /// Every transaction accepted for submission.
    pub fn submitted(&self) -> Vec<SignedTransaction> {
        self.state().submitted.clone()
    }

    pub fn sequence_number(&self, address: &Address) -> u64 {
        self.state().sequence_number(address)
    }

    /// Amount of a pending offer from `sender` to `receiver`, if any.
    pub fn pending_offer(&self, sender: &Address, receiver: &Address, token_id: &TokenId) -> Option<u64> {
        let key = (*sender, *receiver, key_string(&TableItemRequest::token(token_id).key));
        self.state().offers.get(&key).copied()
    }

    /// Adds a raw resource to an account's resource listing.
    pub fn insert_resource(&self, address: Address, resource: MoveResource) {
        self.state().resources.entry(address).or_default().push(resource);
    }

    /// Answers every single-resource fetch for `address` with `resource`.
    pub fn override_resource(&self, address: Address, resource: MoveResource) {
        self.state().resource_overrides.insert(address, resource);
    }
}

impl LedgerState {
    fn record(&mut self, call: &'static str, stage: Option<Stage>) -> Result<(), LedgerError> {
        self.calls.push(call);
        if let Some(stage) = stage {
            if let Some(pos) = self.failures.iter().position(|s| *s == stage) {
                self.failures.remove(pos);
                return Err(injected(stage));
            }
        }
        Ok(())
    }

    fn sequence_number(&self, address: &Address) -> u64 {
        self.sequence_numbers.get(address).copied().unwrap_or(0)
    }

    fn new_table(&mut self, store: TokenStore) -> TableHandle {
        self.next_handle += 1;
        let handle = TableHandle(format!("0x{:x}", 0x1000 + self.next_handle));
        self.tables.insert(
            handle.clone(),
            MockTable {
                key_type: store.key_type(),
                value_type: store.value_type(),
                items: HashMap::new(),
            },
        );
        handle
    }

    fn find(&self, address: &Address, tag: &MoveStructTag) -> Option<&MoveResource> {
        self.resources
            .get(address)?
            .iter()
            .find(|r| r.resource_type == *tag)
    }

    fn handle_of(&self, address: &Address, store: TokenStore) -> Option<TableHandle> {
        let resource = self.find(address, &store.resource_tag())?;
        let mut value = &resource.data;
        for segment in store.field_path().split('.') {
            value = value.get(segment)?;
        }
        value.as_str().map(|h| TableHandle(h.to_string()))
    }

    fn ensure_collections(&mut self, address: Address) -> (TableHandle, TableHandle) {
        if let (Some(collections), Some(token_data)) = (
            self.handle_of(&address, TokenStore::CollectionRegistry),
            self.handle_of(&address, TokenStore::TokenDataRegistry),
        ) {
            return (collections, token_data);
        }

        let collections = self.new_table(TokenStore::CollectionRegistry);
        let token_data = self.new_table(TokenStore::TokenDataRegistry);
        let resource = MoveResource {
            resource_type: TokenStore::CollectionRegistry.resource_tag(),
            data: json!({
                "collection_data": {"handle": collections.0},
                "token_data": {"handle": token_data.0},
            }),
        };
        self.resources.entry(address).or_default().push(resource);
        (collections, token_data)
    }

    fn ensure_token_store(&mut self, address: Address) -> TableHandle {
        if let Some(handle) = self.handle_of(&address, TokenStore::TokenBalances) {
            return handle;
        }

        let handle = self.new_table(TokenStore::TokenBalances);
        let resource = MoveResource {
            resource_type: TokenStore::TokenBalances.resource_tag(),
            data: json!({"tokens": {"handle": handle.0}}),
        };
        self.resources.entry(address).or_default().push(resource);
        handle
    }

    fn table_mut(&mut self, handle: &TableHandle) -> Result<&mut HashMap<String, Value>, String> {
        self.tables
            .get_mut(handle)
            .map(|t| &mut t.items)
            .ok_or_else(|| format!("ETABLE_NOT_FOUND: {}", handle))
    }

    fn balance(&self, owner: &Address, token_id: &TokenId) -> u64 {
        let key = key_string(&TableItemRequest::token(token_id).key);
        self.handle_of(owner, TokenStore::TokenBalances)
            .and_then(|h| self.tables.get(&h))
            .and_then(|t| t.items.get(&key))
            .and_then(|v| serde_json::from_value::<Token>(v.clone()).ok())
            .map_or(0, |t| t.amount)
    }

    fn set_balance(&mut self, owner: Address, token_id: &TokenId, amount: u64) -> Result<(), String> {
        let handle = self.ensure_token_store(owner);
        let key = key_string(&TableItemRequest::token(token_id).key);
        let items = self.table_mut(&handle)?;
        if amount == 0 {
            items.remove(&key);
        } else {
            let token = Token {
                id: token_id.clone(),
                amount,
            };
            items.insert(key, serde_json::to_value(token).map_err(|e| e.to_string())?);
        }
        Ok(())
    }

    fn deposit(&mut self, owner: Address, token_id: &TokenId, amount: u64) -> Result<(), String> {
        let current = self.balance(&owner, token_id);
        self.set_balance(owner, token_id, current + amount)
    }

    fn withdraw(&mut self, owner: Address, token_id: &TokenId, amount: u64) -> Result<(), String> {
        let current = self.balance(&owner, token_id);
        if current < amount {
            return Err(format!("EINSUFFICIENT_BALANCE: {} < {}", current, amount));
        }
        self.set_balance(owner, token_id, current - amount)
    }

    fn execute(&mut self, signer: Address, payload: &TransactionPayload) -> Result<(), String> {
        let args = payload.arguments();
        match payload.function_name().as_str() {
            "token::create_collection_script" => {
                let name = text(args, 0)?;
                let (collections, _) = self.ensure_collections(signer);
                let key = key_string(&TableItemRequest::collection(&name).key);
                let data = CollectionData {
                    name,
                    description: text(args, 1)?,
                    uri: text(args, 2)?,
                    count: 0,
                    maximum: Some(number(args, 3)?),
                };
                let items = self.table_mut(&collections)?;
                if items.contains_key(&key) {
                    return Err("ECOLLECTION_ALREADY_EXISTS".to_string());
                }
                items.insert(key, serde_json::to_value(data).map_err(|e| e.to_string())?);
                Ok(())
            }
            "token::create_token_script" => self.create_token(signer, args),
            "token_transfers::offer_script" => {
                let receiver = address(args, 0)?;
                let token_id = token_id(args)?;
                let amount = number(args, 5)?;
                self.withdraw(signer, &token_id, amount)?;
                let key = (signer, receiver, key_string(&TableItemRequest::token(&token_id).key));
                *self.offers.entry(key).or_insert(0) += amount;
                Ok(())
            }
            "token_transfers::claim_script" => {
                let sender = address(args, 0)?;
                let token_id = token_id(args)?;
                let key = (sender, signer, key_string(&TableItemRequest::token(&token_id).key));
                let amount = self.offers.remove(&key).ok_or("ETOKEN_OFFER_NOT_EXIST")?;
                self.deposit(signer, &token_id, amount)
            }
            "token_transfers::cancel_offer_script" => {
                let receiver = address(args, 0)?;
                let token_id = token_id(args)?;
                let key = (signer, receiver, key_string(&TableItemRequest::token(&token_id).key));
                let amount = self.offers.remove(&key).ok_or("ETOKEN_OFFER_NOT_EXIST")?;
                self.deposit(signer, &token_id, amount)
            }
            other => Err(format!("EFUNCTION_NOT_FOUND: {}", other)),
        }
    }

    fn create_token(&mut self, creator: Address, args: &[Argument]) -> Result<(), String> {
        let collection = text(args, 0)?;
        let name = text(args, 1)?;
        let supply = number(args, 3)?;
        let maximum = number(args, 4)?;
        let payee = address(args, 6)?;
        let keys = texts(args, 10)?;
        let values = texts(args, 11)?;
        let types = texts(args, 12)?;
        if keys.len() != values.len() || values.len() != types.len() {
            return Err("EPROPERTY_LENGTH_MISMATCH".to_string());
        }

        let collections = self
            .handle_of(&creator, TokenStore::CollectionRegistry)
            .ok_or("ECOLLECTIONS_NOT_PUBLISHED")?;
        let token_data = self
            .handle_of(&creator, TokenStore::TokenDataRegistry)
            .ok_or("ECOLLECTIONS_NOT_PUBLISHED")?;

        let collection_key = key_string(&TableItemRequest::collection(&collection).key);
        let data_id = TokenDataId::new(creator, collection.clone(), name.clone());
        let data_key = key_string(&TableItemRequest::token_data(&data_id).key);
        if self.table_mut(&token_data)?.contains_key(&data_key) {
            return Err("ETOKEN_DATA_ALREADY_EXISTS".to_string());
        }

        let collection_items = self.table_mut(&collections)?;
        let stored = collection_items
            .get(&collection_key)
            .ok_or("ECOLLECTION_NOT_PUBLISHED")?;
        let mut collection_data: CollectionData =
            serde_json::from_value(stored.clone()).map_err(|e| e.to_string())?;
        if collection_data.maximum.map_or(false, |max| collection_data.count >= max) {
            return Err("ECREATE_WOULD_EXCEED_COLLECTION_MAXIMUM".to_string());
        }
        collection_data.count += 1;
        collection_items.insert(
            collection_key,
            serde_json::to_value(collection_data).map_err(|e| e.to_string())?,
        );

        let value = json!({
            "name": name,
            "description": text(args, 2)?,
            "uri": text(args, 5)?,
            "maximum": maximum.to_string(),
            "supply": supply.to_string(),
            "royalty": {
                "payee_address": payee.to_hex_literal(),
                "royalty_points_denominator": number(args, 7)?.to_string(),
                "royalty_points_numerator": number(args, 8)?.to_string(),
            },
        });
        self.table_mut(&token_data)?.insert(data_key, value);

        if supply > 0 {
            self.deposit(creator, &TokenId::original(data_id), supply)?;
        }
        Ok(())
    }
}

fn arg(args: &[Argument], index: usize) -> Result<&Argument, String> {
    args.get(index)
        .ok_or_else(|| format!("ENUMBER_OF_ARGUMENTS_MISMATCH: missing argument {}", index))
}

fn text(args: &[Argument], index: usize) -> Result<String, String> {
    let bytes = arg(args, index)?
        .as_bytes()
        .ok_or_else(|| format!("EFAILED_TO_DESERIALIZE_ARGUMENT: {} is not bytes", index))?;
    decode_text(bytes).map_err(|e| e.to_string())
}

fn texts(args: &[Argument], index: usize) -> Result<Vec<String>, String> {
    let items = arg(args, index)?
        .as_vector()
        .ok_or_else(|| format!("EFAILED_TO_DESERIALIZE_ARGUMENT: {} is not a vector", index))?;
    items
        .iter()
        .map(|item| {
            let bytes = item.as_bytes().ok_or("EFAILED_TO_DESERIALIZE_ARGUMENT")?;
            decode_text(bytes).map_err(|e| e.to_string())
        })
        .collect()
}

fn number(args: &[Argument], index: usize) -> Result<u64, String> {
    arg(args, index)?
        .as_u64()
        .ok_or_else(|| format!("EFAILED_TO_DESERIALIZE_ARGUMENT: {} is not u64", index))
}

fn address(args: &[Argument], index: usize) -> Result<Address, String> {
    arg(args, index)?
        .as_address()
        .ok_or_else(|| format!("EFAILED_TO_DESERIALIZE_ARGUMENT: {} is not an address", index))
}

fn token_id(args: &[Argument]) -> Result<TokenId, String> {
    let data_id = TokenDataId::new(address(args, 1)?, text(args, 2)?, text(args, 3)?);
    Ok(TokenId::new(data_id, Some(number(args, 4)?)))
}

#[async_trait]
impl LedgerClient for MockLedger {
    async fn generate_transaction(
        &self,
        sender: &Address,
        payload: TransactionPayload,
        options: TransactionOptions,
    ) -> Result<TransactionRequest, LedgerError> {
        let mut state = self.state();
        state.record("generate_transaction", Some(Stage::Generate))?;
        Ok(TransactionRequest {
            sender: *sender,
            sequence_number: state.sequence_number(sender),
            max_gas_amount: options.max_gas_amount,
            gas_unit_price: 1,
            expiration_timestamp_secs: u64::MAX,
            payload,
        })
    }

    async fn sign_transaction(
        &self,
        signer: &dyn Account,
        request: TransactionRequest,
    ) -> Result<SignedTransaction, LedgerError> {
        self.state().record("sign_transaction", Some(Stage::Sign))?;
        let message = serde_json::to_vec(&request)?;
        let signature = signer.sign(&message)?;
        Ok(SignedTransaction {
            request,
            signature: TransactionSignature::ed25519(signer.public_key(), &signature),
        })
    }

    async fn submit_transaction(&self, signed: &SignedTransaction) -> Result<PendingTransaction, LedgerError> {
        let mut state = self.state();
        state.record("submit_transaction", Some(Stage::Submit))?;

        let sender = signed.request.sender;
        let expected = state.sequence_number(&sender);
        if signed.request.sequence_number != expected {
            return Err(LedgerError::Api {
                status: 400,
                message: format!(
                    "SEQUENCE_NUMBER_TOO_OLD: expected {}, got {}",
                    expected, signed.request.sequence_number
                ),
            });
        }

        state.sequence_numbers.insert(sender, expected + 1);
        state.submitted.push(signed.clone());
        state.next_hash += 1;
        let hash = format!("0x{:064x}", state.next_hash);

        let outcome = state.execute(sender, &signed.request.payload);
        let result = TransactionResult {
            hash: hash.clone(),
            success: outcome.is_ok(),
            vm_status: match outcome {
                Ok(()) => "Executed successfully".to_string(),
                Err(reason) => format!("Move abort: {}", reason),
            },
        };
        state.transactions.insert(hash.clone(), result);
        Ok(PendingTransaction { hash })
    }

    async fn wait_for_transaction(&self, hash: &str) -> Result<TransactionResult, LedgerError> {
        let mut state = self.state();
        state.record("wait_for_transaction", Some(Stage::Wait))?;
        state
            .transactions
            .get(hash)
            .cloned()
            .ok_or_else(|| LedgerError::NotFound(format!("transaction {}", hash)))
    }

    async fn get_account_resource(
        &self,
        address: &Address,
        resource_type: &MoveStructTag,
    ) -> Result<MoveResource, LedgerError> {
        let mut state = self.state();
        state.record("get_account_resource", None)?;
        if let Some(resource) = state.resource_overrides.get(address) {
            return Ok(resource.clone());
        }
        state
            .find(address, resource_type)
            .cloned()
            .ok_or_else(|| LedgerError::NotFound(format!("resource {} on {}", resource_type, address)))
    }

    async fn get_account_resources(&self, address: &Address) -> Result<Vec<MoveResource>, LedgerError> {
        let mut state = self.state();
        state.record("get_account_resources", None)?;
        state
            .resources
            .get(address)
            .cloned()
            .ok_or_else(|| LedgerError::NotFound(format!("account {}", address)))
    }

    async fn get_table_item(&self, handle: &TableHandle, request: &TableItemRequest) -> Result<Value, LedgerError> {
        let mut state = self.state();
        state.record("get_table_item", None)?;
        let table = state
            .tables
            .get(handle)
            .ok_or_else(|| LedgerError::NotFound(format!("table {}", handle)))?;

        if table.key_type != request.key_type || table.value_type != request.value_type {
            return Err(LedgerError::Api {
                status: 400,
                message: format!(
                    "table {} is {} -> {}, request was {} -> {}",
                    handle, table.key_type, table.value_type, request.key_type, request.value_type
                ),
            });
        }

        table
            .items
            .get(&key_string(&request.key))
            .cloned()
            .ok_or_else(|| LedgerError::NotFound(format!("table item {} in {}", request.key, handle)))
    }
}
