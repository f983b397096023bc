//! Byte-string encoding for text fields.
//!
//! The ledger's token module takes every text argument as `vector<u8>`,
//! transmitted as lowercase hex of the UTF-8 bytes. Integers wider than the
//! JSON safe range travel as decimal strings.

use crate::errors::CoreError;

/// Encodes a human-readable string into the ledger byte-string form.
pub fn encode_text(text: &str) -> String {
    hex::encode(text.as_bytes())
}

/// Decodes a ledger byte-string back into text. An optional `0x` prefix is accepted.
pub fn decode_text(encoded: &str) -> Result<String, CoreError> {
    let digits = encoded.strip_prefix("0x").unwrap_or(encoded);
    let bytes = hex::decode(digits)
        .map_err(|e| CoreError::InvalidEncoding(format!("{}: {}", encoded, e)))?;
    String::from_utf8(bytes).map_err(|e| CoreError::InvalidEncoding(e.to_string()))
}

/// Encodes every item of a list of text fields.
pub fn encode_all<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items.into_iter().map(|s| encode_text(s.as_ref())).collect()
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum U64Repr {
    Number(u64),
    Text(String),
}

impl U64Repr {
    fn into_u64<E: serde::de::Error>(self) -> Result<u64, E> {
        match self {
            U64Repr::Number(n) => Ok(n),
            U64Repr::Text(s) => s
                .parse::<u64>()
                .map_err(|e| E::custom(format!("invalid u64 string '{}': {}", s, e))),
        }
    }
}

/// Serde adapter for `u64` values carried as decimal strings.
pub mod u64_string {
    use super::U64Repr;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        U64Repr::deserialize(deserializer)?.into_u64()
    }
}

/// Serde adapter for Move `Option<u64>`, written as `{"vec": [..]}`.
///
/// Reading also accepts a bare number, a decimal string, or `null`.
pub mod option_u64 {
    use super::U64Repr;
    use serde::ser::SerializeStruct;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OptionRepr {
        Move { vec: Vec<U64Repr> },
        Plain(U64Repr),
    }

    pub fn serialize<S: Serializer>(value: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error> {
        let vec: Vec<String> = value.iter().map(|v| v.to_string()).collect();
        let mut state = serializer.serialize_struct("Option", 1)?;
        state.serialize_field("vec", &vec)?;
        state.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
        match Option::<OptionRepr>::deserialize(deserializer)? {
            None => Ok(None),
            Some(OptionRepr::Plain(v)) => v.into_u64().map(Some),
            Some(OptionRepr::Move { vec }) => match vec.into_iter().next() {
                Some(v) => v.into_u64().map(Some),
                None => Ok(None),
            },
        }
    }
}
