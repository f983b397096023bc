//! Payload construction for token write operations.
//!
//! Each builder is a pure function producing a script-function invocation
//! for the deployed token modules. Argument order is fixed by the module
//! signatures and must not be rearranged.

use crate::encoding::{encode_all, encode_text};
use crate::type_tag::TypeTag;
use crate::types::{Address, TokenId};
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use tracing::debug;

/// Largest integer in the JSON-safe range, used wherever a field has no explicit maximum.
pub const NUMBER_MAX: u64 = 9_007_199_254_740_991;

/// Module hosting collection and token creation.
pub const TOKEN_MODULE: &str = "token";

/// Module hosting the offer/claim transfer flow.
pub const TOKEN_TRANSFERS_MODULE: &str = "token_transfers";

/// A deployed module: its publishing address and name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ModuleId {
    pub address: Address,
    pub name: String,
}

/// A function within a deployed module.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScriptFunctionId {
    pub module: ModuleId,
    pub name: String,
}

impl ScriptFunctionId {
    pub fn new(address: Address, module: &str, name: &str) -> Self {
        Self {
            module: ModuleId {
                address,
                name: module.to_string(),
            },
            name: name.to_string(),
        }
    }
}

/// A positional argument of a script-function call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Argument {
    Bool(bool),
    U64(u64),
    Address(Address),
    /// A byte-string, already hex encoded
    Bytes(String),
    Vector(Vec<Argument>),
}

impl Argument {
    pub fn text(value: &str) -> Self {
        Argument::Bytes(encode_text(value))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Argument::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Argument::U64(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_address(&self) -> Option<Address> {
        match self {
            Argument::Address(a) => Some(*a),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&str> {
        match self {
            Argument::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_vector(&self) -> Option<&[Argument]> {
        match self {
            Argument::Vector(items) => Some(items),
            _ => None,
        }
    }
}

impl Serialize for Argument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Argument::Bool(b) => serializer.serialize_bool(*b),
            Argument::U64(n) => serializer.collect_str(n),
            Argument::Address(a) => serializer.serialize_str(&a.to_hex_literal()),
            Argument::Bytes(b) => serializer.serialize_str(b),
            Argument::Vector(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

/// Body of a script-function transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScriptFunctionPayload {
    pub function: ScriptFunctionId,
    pub type_arguments: Vec<TypeTag>,
    pub arguments: Vec<Argument>,
}

/// A transaction payload as accepted by the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransactionPayload {
    ScriptFunctionPayload(ScriptFunctionPayload),
}

impl TransactionPayload {
    fn script_function(module: &str, name: &str, arguments: Vec<Argument>) -> Self {
        TransactionPayload::ScriptFunctionPayload(ScriptFunctionPayload {
            function: ScriptFunctionId::new(Address::ONE, module, name),
            type_arguments: Vec::new(),
            arguments,
        })
    }

    /// The invoked function, as `module::name`.
    pub fn function_name(&self) -> String {
        match self {
            TransactionPayload::ScriptFunctionPayload(p) => {
                format!("{}::{}", p.function.module.name, p.function.name)
            }
        }
    }

    pub fn arguments(&self) -> &[Argument] {
        match self {
            TransactionPayload::ScriptFunctionPayload(p) => &p.arguments,
        }
    }
}

/// Which collection fields may change after creation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollectionMutability {
    pub description: bool,
    pub uri: bool,
    pub maximum: bool,
}

impl CollectionMutability {
    fn to_argument(self) -> Argument {
        flags([self.description, self.uri, self.maximum])
    }
}

/// Which token fields may change after creation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TokenMutability {
    pub maximum: bool,
    pub uri: bool,
    pub royalty: bool,
    pub description: bool,
    pub properties: bool,
}

impl TokenMutability {
    fn to_argument(self) -> Argument {
        flags([
            self.maximum,
            self.uri,
            self.royalty,
            self.description,
            self.properties,
        ])
    }
}

fn flags<const N: usize>(values: [bool; N]) -> Argument {
    Argument::Vector(values.into_iter().map(Argument::Bool).collect())
}

/// Royalty terms for a new token type.
///
/// Defaults: the payee is the creator, numerator and denominator are zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoyaltyOptions {
    pub payee_address: Option<Address>,
    pub denominator: u64,
    pub numerator: u64,
}

/// Initial properties of a token type, as three parallel lists.
///
/// The ledger rejects lists of unequal length.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenProperties {
    pub keys: Vec<String>,
    pub values: Vec<String>,
    pub types: Vec<String>,
}

impl TokenProperties {
    pub fn is_consistent(&self) -> bool {
        self.keys.len() == self.values.len() && self.values.len() == self.types.len()
    }
}

/// Parameters for `create_collection`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CollectionParams {
    pub name: String,
    pub description: String,
    pub uri: String,
    /// `None` means unbounded
    pub maximum: Option<u64>,
    pub mutability: CollectionMutability,
}

impl CollectionParams {
    pub fn new(name: impl Into<String>, description: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            uri: uri.into(),
            ..Default::default()
        }
    }
}

/// Parameters for `create_token`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenParams {
    pub collection: String,
    pub name: String,
    pub description: String,
    pub supply: u64,
    pub uri: String,
    /// `None` means unbounded
    pub maximum: Option<u64>,
    pub royalty: RoyaltyOptions,
    pub mutability: TokenMutability,
    pub properties: TokenProperties,
}

impl TokenParams {
    pub fn new(
        collection: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        supply: u64,
        uri: impl Into<String>,
    ) -> Self {
        Self {
            collection: collection.into(),
            name: name.into(),
            description: description.into(),
            supply,
            uri: uri.into(),
            ..Default::default()
        }
    }
}

/// Builds `token::create_collection_script`.
pub fn create_collection(params: &CollectionParams) -> TransactionPayload {
    debug!("Building create_collection payload for '{}'", params.name);
    TransactionPayload::script_function(
        TOKEN_MODULE,
        "create_collection_script",
        vec![
            Argument::text(&params.name),
            Argument::text(&params.description),
            Argument::text(&params.uri),
            Argument::U64(params.maximum.unwrap_or(NUMBER_MAX)),
            params.mutability.to_argument(),
        ],
    )
}

/// Builds `token::create_token_script` for a token created by `creator`.
pub fn create_token(creator: &Address, params: &TokenParams) -> TransactionPayload {
    debug!(
        "Building create_token payload for '{}' in '{}'",
        params.name, params.collection
    );
    let payee = params.royalty.payee_address.unwrap_or(*creator);
    let encoded = |items: &[String]| Argument::Vector(encode_all(items).into_iter().map(Argument::Bytes).collect());

    TransactionPayload::script_function(
        TOKEN_MODULE,
        "create_token_script",
        vec![
            Argument::text(&params.collection),
            Argument::text(&params.name),
            Argument::text(&params.description),
            Argument::U64(params.supply),
            Argument::U64(params.maximum.unwrap_or(NUMBER_MAX)),
            Argument::text(&params.uri),
            Argument::Address(payee),
            Argument::U64(params.royalty.denominator),
            Argument::U64(params.royalty.numerator),
            params.mutability.to_argument(),
            encoded(&params.properties.keys),
            encoded(&params.properties.values),
            encoded(&params.properties.types),
        ],
    )
}

fn token_arguments(counterparty: &Address, token_id: &TokenId) -> Vec<Argument> {
    let data_id = &token_id.token_data_id;
    vec![
        Argument::Address(*counterparty),
        Argument::Address(data_id.creator),
        Argument::text(&data_id.collection),
        Argument::text(&data_id.name),
        Argument::U64(token_id.property_version),
    ]
}

/// Builds `token_transfers::offer_script`.
pub fn offer(receiver: &Address, token_id: &TokenId, amount: u64) -> TransactionPayload {
    let mut arguments = token_arguments(receiver, token_id);
    arguments.push(Argument::U64(amount));
    TransactionPayload::script_function(TOKEN_TRANSFERS_MODULE, "offer_script", arguments)
}

/// Builds `token_transfers::claim_script`.
pub fn claim(sender: &Address, token_id: &TokenId) -> TransactionPayload {
    TransactionPayload::script_function(
        TOKEN_TRANSFERS_MODULE,
        "claim_script",
        token_arguments(sender, token_id),
    )
}

/// Builds `token_transfers::cancel_offer_script`.
pub fn cancel_offer(receiver: &Address, token_id: &TokenId) -> TransactionPayload {
    TransactionPayload::script_function(
        TOKEN_TRANSFERS_MODULE,
        "cancel_offer_script",
        token_arguments(receiver, token_id),
    )
}
