//! Typed decoding of the account resources behind the token tables.
//!
//! An account's token state lives in two resources. `Collections` holds the
//! collection registry and the token-data registry; `TokenStore` holds the
//! account's balances. Each exposes a table handle, and each table is keyed
//! by its own key shape.

use crate::encoding::encode_text;
use crate::errors::CoreError;
use crate::payload::TOKEN_MODULE;
use crate::type_tag::{MoveStructTag, TypeTag};
use crate::types::{Address, TokenDataId, TokenId};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

/// Opaque reference to one on-chain table.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableHandle(pub String);

impl fmt::Display for TableHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A table field embedded in a resource.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub handle: TableHandle,
}

/// An account resource as returned by the ledger, before typed decoding.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveResource {
    #[serde(rename = "type")]
    pub resource_type: MoveStructTag,
    pub data: Value,
}

/// The logical stores reachable through an account's token resources.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenStore {
    /// Collection name to `CollectionData`
    CollectionRegistry,
    /// `TokenDataId` to `TokenData`
    TokenDataRegistry,
    /// `TokenId` to `Token`
    TokenBalances,
}

fn token_struct(name: &str) -> MoveStructTag {
    MoveStructTag::new(Address::ONE, TOKEN_MODULE, name, Vec::new())
}

impl TokenStore {
    /// The resource that carries this store's table handle.
    pub fn resource_tag(self) -> MoveStructTag {
        match self {
            TokenStore::CollectionRegistry | TokenStore::TokenDataRegistry => token_struct("Collections"),
            TokenStore::TokenBalances => token_struct("TokenStore"),
        }
    }

    /// Path of the handle inside the resource data.
    pub fn field_path(self) -> &'static str {
        match self {
            TokenStore::CollectionRegistry => "collection_data.handle",
            TokenStore::TokenDataRegistry => "token_data.handle",
            TokenStore::TokenBalances => "tokens.handle",
        }
    }

    /// Declared key type of the store's table.
    ///
    /// Collection names are keyed by their raw bytes, so the collection
    /// registry declares `vector<u8>` and receives the hex-encoded name.
    pub fn key_type(self) -> TypeTag {
        match self {
            TokenStore::CollectionRegistry => TypeTag::Vector(Box::new(TypeTag::U8)),
            TokenStore::TokenDataRegistry => token_struct("TokenDataId").into(),
            TokenStore::TokenBalances => token_struct("TokenId").into(),
        }
    }

    pub fn value_type(self) -> TypeTag {
        match self {
            TokenStore::CollectionRegistry => token_struct("CollectionData").into(),
            TokenStore::TokenDataRegistry => token_struct("TokenData").into(),
            TokenStore::TokenBalances => token_struct("Token").into(),
        }
    }
}

/// `0x1::token::Collections`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct CollectionsResource {
    pub collection_data: Table,
    pub token_data: Table,
}

/// `0x1::token::TokenStore`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TokenStoreResource {
    pub tokens: Table,
}

/// A decoded token resource, selected by its type descriptor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenResource {
    Collections(CollectionsResource),
    TokenStore(TokenStoreResource),
}

impl TokenResource {
    /// Decodes resource data according to its fully-qualified type.
    pub fn decode(tag: &MoveStructTag, data: Value) -> Result<Self, CoreError> {
        let decode_error = |e: serde_json::Error| CoreError::Decode {
            type_name: tag.to_string(),
            reason: e.to_string(),
        };

        if *tag == TokenStore::CollectionRegistry.resource_tag() {
            serde_json::from_value(data)
                .map(TokenResource::Collections)
                .map_err(decode_error)
        } else if *tag == TokenStore::TokenBalances.resource_tag() {
            serde_json::from_value(data)
                .map(TokenResource::TokenStore)
                .map_err(decode_error)
        } else {
            Err(CoreError::UnknownResource(tag.to_string()))
        }
    }

    /// Handle of the given store, if this resource carries it.
    pub fn table(&self, store: TokenStore) -> Option<&TableHandle> {
        match (self, store) {
            (TokenResource::Collections(r), TokenStore::CollectionRegistry) => Some(&r.collection_data.handle),
            (TokenResource::Collections(r), TokenStore::TokenDataRegistry) => Some(&r.token_data.handle),
            (TokenResource::TokenStore(r), TokenStore::TokenBalances) => Some(&r.tokens.handle),
            _ => None,
        }
    }
}

/// A typed table-item lookup.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TableItemRequest {
    pub key_type: TypeTag,
    pub value_type: TypeTag,
    pub key: Value,
}

impl TableItemRequest {
    fn new(store: TokenStore, key: Value) -> Self {
        Self {
            key_type: store.key_type(),
            value_type: store.value_type(),
            key,
        }
    }

    /// Lookup in the collection registry, keyed by the encoded collection name.
    pub fn collection(name: &str) -> Self {
        Self::new(TokenStore::CollectionRegistry, Value::String(encode_text(name)))
    }

    /// Lookup in the token-data registry.
    pub fn token_data(id: &TokenDataId) -> Self {
        Self::new(TokenStore::TokenDataRegistry, token_data_key(id))
    }

    /// Lookup in a token store.
    pub fn token(id: &TokenId) -> Self {
        Self::new(
            TokenStore::TokenBalances,
            json!({
                "token_data_id": token_data_key(&id.token_data_id),
                "property_version": id.property_version.to_string(),
            }),
        )
    }
}

// Text fields of the key travel as hex byte-strings, the same encoding the
// payload builder uses for the names they were created with.
fn token_data_key(id: &TokenDataId) -> Value {
    json!({
        "creator": id.creator.to_hex_literal(),
        "collection": encode_text(&id.collection),
        "name": encode_text(&id.name),
    })
}
