//! Fully-qualified Move type descriptors.
//!
//! Resource and table types are compared structurally: address, module,
//! struct name and the full generic parameter list must all agree. Addresses
//! are normalized on parse, so `0x1::token::TokenStore` and the long-form
//! address spelling of it are equal.

use crate::errors::CoreError;
use crate::types::Address;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A Move type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Bool,
    U8,
    U64,
    U128,
    Address,
    Signer,
    Vector(Box<TypeTag>),
    Struct(Box<MoveStructTag>),
}

/// A Move struct type: `address::module::Name<T1, T2, ...>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MoveStructTag {
    pub address: Address,
    pub module: String,
    pub name: String,
    pub generic_type_params: Vec<TypeTag>,
}

impl MoveStructTag {
    pub fn new(
        address: Address,
        module: impl Into<String>,
        name: impl Into<String>,
        generic_type_params: Vec<TypeTag>,
    ) -> Self {
        Self {
            address,
            module: module.into(),
            name: name.into(),
            generic_type_params,
        }
    }

    /// True when both tags name the same struct, whatever their generic parameters.
    pub fn same_struct(&self, other: &MoveStructTag) -> bool {
        self.address == other.address && self.module == other.module && self.name == other.name
    }
}

impl From<MoveStructTag> for TypeTag {
    fn from(tag: MoveStructTag) -> Self {
        TypeTag::Struct(Box::new(tag))
    }
}

impl fmt::Display for MoveStructTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.address.to_short_hex(), self.module, self.name)?;
        if !self.generic_type_params.is_empty() {
            write!(f, "<")?;
            for (i, param) in self.generic_type_params.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", param)?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Bool => write!(f, "bool"),
            TypeTag::U8 => write!(f, "u8"),
            TypeTag::U64 => write!(f, "u64"),
            TypeTag::U128 => write!(f, "u128"),
            TypeTag::Address => write!(f, "address"),
            TypeTag::Signer => write!(f, "signer"),
            TypeTag::Vector(inner) => write!(f, "vector<{}>", inner),
            TypeTag::Struct(tag) => write!(f, "{}", tag),
        }
    }
}

impl FromStr for TypeTag {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser::new(s);
        let tag = parser.parse_type()?;
        parser.finish()?;
        Ok(tag)
    }
}

impl FromStr for MoveStructTag {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<TypeTag>()? {
            TypeTag::Struct(tag) => Ok(*tag),
            other => Err(CoreError::InvalidTypeTag {
                input: s.to_string(),
                reason: format!("expected a struct type, found '{}'", other),
            }),
        }
    }
}

macro_rules! string_serde {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

string_serde!(TypeTag);
string_serde!(MoveStructTag);

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn error(&self, reason: impl Into<String>) -> CoreError {
        CoreError::InvalidTypeTag {
            input: self.input.to_string(),
            reason: format!("{} at offset {}", reason.into(), self.pos),
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn eat(&mut self, token: &str) -> bool {
        self.skip_whitespace();
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &str) -> Result<(), CoreError> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.error(format!("expected '{}'", token)))
        }
    }

    fn word(&mut self) -> Result<&'a str, CoreError> {
        self.skip_whitespace();
        let rest = self.rest();
        let len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        if len == 0 {
            return Err(self.error("expected an identifier"));
        }
        self.pos += len;
        Ok(&rest[..len])
    }

    fn parse_type(&mut self) -> Result<TypeTag, CoreError> {
        let word = self.word()?;
        let tag = match word {
            "bool" => TypeTag::Bool,
            "u8" => TypeTag::U8,
            "u64" => TypeTag::U64,
            "u128" => TypeTag::U128,
            "address" => TypeTag::Address,
            "signer" => TypeTag::Signer,
            "vector" => {
                self.expect("<")?;
                let inner = self.parse_type()?;
                self.expect(">")?;
                TypeTag::Vector(Box::new(inner))
            }
            _ => TypeTag::Struct(Box::new(self.parse_struct(word)?)),
        };
        Ok(tag)
    }

    fn parse_struct(&mut self, address: &str) -> Result<MoveStructTag, CoreError> {
        let address = Address::from_hex(address).map_err(|e| self.error(e.to_string()))?;
        self.expect("::")?;
        let module = self.word()?;
        self.expect("::")?;
        let name = self.word()?;

        let mut generic_type_params = Vec::new();
        if self.eat("<") {
            loop {
                generic_type_params.push(self.parse_type()?);
                if !self.eat(",") {
                    break;
                }
            }
            self.expect(">")?;
        }

        Ok(MoveStructTag::new(address, module, name, generic_type_params))
    }

    fn finish(&mut self) -> Result<(), CoreError> {
        self.skip_whitespace();
        if self.pos == self.input.len() {
            Ok(())
        } else {
            Err(self.error("unexpected trailing input"))
        }
    }
}
