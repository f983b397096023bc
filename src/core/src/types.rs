//! Core value types for ledger token operations.

use crate::encoding::{option_u64, u64_string};
use crate::errors::CoreError;
use crate::payload::NUMBER_MAX;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Property version of a token that has never been mutated.
pub const DEFAULT_PROPERTY_VERSION: u64 = 0;

const ADDRESS_LENGTH: usize = 32;

/// A 32-byte ledger account address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address([u8; ADDRESS_LENGTH]);

impl Address {
    /// Length of an address in bytes.
    pub const LENGTH: usize = ADDRESS_LENGTH;

    /// The framework account that hosts the token module.
    pub const ONE: Address = {
        let mut bytes = [0u8; ADDRESS_LENGTH];
        bytes[ADDRESS_LENGTH - 1] = 1;
        Address(bytes)
    };

    /// Creates an address from raw bytes.
    pub const fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Parses a hex address, with or without a `0x` prefix.
    ///
    /// Short forms such as `0x1` are left-padded to the full length.
    pub fn from_hex(input: &str) -> Result<Self, CoreError> {
        let digits = input.strip_prefix("0x").unwrap_or(input);
        if digits.is_empty() || digits.len() > Self::LENGTH * 2 {
            return Err(CoreError::InvalidAddress(format!(
                "'{}' must have between 1 and {} hex digits",
                input,
                Self::LENGTH * 2
            )));
        }

        let padded = format!("{:0>width$}", digits, width = Self::LENGTH * 2);
        let mut bytes = [0u8; Self::LENGTH];
        hex::decode_to_slice(&padded, &mut bytes)
            .map_err(|e| CoreError::InvalidAddress(format!("'{}': {}", input, e)))?;
        Ok(Self(bytes))
    }

    /// Returns the raw bytes of the address.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// Full-length `0x`-prefixed hex form, the canonical payload encoding.
    pub fn to_hex_literal(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Shortest `0x`-prefixed hex form, as used inside type descriptors.
    pub fn to_short_hex(&self) -> String {
        let full = hex::encode(self.0);
        let trimmed = full.trim_start_matches('0');
        if trimmed.is_empty() {
            "0x0".to_string()
        } else {
            format!("0x{}", trimmed)
        }
    }
}

impl From<[u8; ADDRESS_LENGTH]> for Address {
    fn from(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl FromStr for Address {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s.trim())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex_literal())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_short_hex())
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex_literal())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Address::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Identifies a collection: its creator and its name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollectionId {
    /// The account that created the collection
    pub creator: Address,
    /// The collection name, unique per creator
    pub name: String,
}

impl CollectionId {
    pub fn new(creator: Address, name: impl Into<String>) -> Self {
        Self {
            creator,
            name: name.into(),
        }
    }
}

/// Identifies a token type within a collection.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenDataId {
    /// The account that created the token
    pub creator: Address,
    /// The name of the collection holding the token
    pub collection: String,
    /// The token name, unique within the collection
    pub name: String,
}

impl TokenDataId {
    pub fn new(creator: Address, collection: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            creator,
            collection: collection.into(),
            name: name.into(),
        }
    }

    /// The collection this token type belongs to.
    pub fn collection_id(&self) -> CollectionId {
        CollectionId::new(self.creator, self.collection.clone())
    }
}

/// Identifies a specific edition of a token type.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenId {
    /// The token type
    pub token_data_id: TokenDataId,
    /// Incremented each time the token's mutable properties change
    #[serde(with = "u64_string")]
    pub property_version: u64,
}

impl TokenId {
    /// Creates a token ID; an omitted property version means the original edition.
    pub fn new(token_data_id: TokenDataId, property_version: Option<u64>) -> Self {
        Self {
            token_data_id,
            property_version: property_version.unwrap_or(DEFAULT_PROPERTY_VERSION),
        }
    }

    /// The original, unmutated edition of a token type.
    pub fn original(token_data_id: TokenDataId) -> Self {
        Self::new(token_data_id, None)
    }
}

/// A balance record: how much of one token edition an account holds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub id: TokenId,
    #[serde(with = "u64_string")]
    pub amount: u64,
}

/// On-chain collection state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionData {
    pub name: String,
    pub description: String,
    pub uri: String,
    /// Number of token types created in the collection
    #[serde(with = "u64_string")]
    pub count: u64,
    #[serde(default, with = "option_u64")]
    pub maximum: Option<u64>,
}

impl CollectionData {
    /// True when the collection has no effective cap on token types.
    pub fn is_unbounded(&self) -> bool {
        self.maximum.map_or(true, |max| max == NUMBER_MAX)
    }
}

/// Royalty terms attached to a token type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Royalty {
    pub payee_address: Address,
    #[serde(with = "u64_string")]
    pub royalty_points_denominator: u64,
    #[serde(with = "u64_string")]
    pub royalty_points_numerator: u64,
}

/// On-chain token type state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenData {
    /// Filled in from the lookup key when the ledger omits it
    #[serde(default)]
    pub collection: String,
    pub name: String,
    pub description: String,
    pub uri: String,
    #[serde(with = "u64_string")]
    pub maximum: u64,
    #[serde(with = "u64_string")]
    pub supply: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub royalty: Option<Royalty>,
}
