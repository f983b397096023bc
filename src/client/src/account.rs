//! Signing accounts.

use crate::errors::{ClientError, LedgerError};
use ed25519_dalek::{Keypair, PublicKey, SecretKey, Signer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use token_core::Address;

/// An account able to sign transactions.
pub trait Account: Send + Sync {
    /// The ledger address of the account.
    fn address(&self) -> Address;

    /// The `0x`-prefixed hex public key placed in the transaction authenticator.
    fn public_key(&self) -> String;

    /// Signs a message with the account's private key.
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, LedgerError>;
}

/// On-disk form of a local account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountKeyFile {
    /// The account address
    pub address: Address,
    /// Hex-encoded 32-byte ed25519 private key
    pub private_key: String,
}

/// An ed25519 account whose key is held in memory.
pub struct LocalAccount {
    address: Address,
    keypair: Keypair,
}

impl LocalAccount {
    /// Creates an account from its address and hex-encoded private key.
    pub fn from_private_key_hex(address: Address, private_key: &str) -> Result<Self, ClientError> {
        let digits = private_key.strip_prefix("0x").unwrap_or(private_key);
        let bytes = hex::decode(digits)
            .map_err(|e| LedgerError::SignatureError(format!("Invalid private key: {}", e)))?;
        let secret = SecretKey::from_bytes(&bytes)
            .map_err(|e| LedgerError::SignatureError(format!("Invalid private key: {}", e)))?;
        let public = PublicKey::from(&secret);

        Ok(Self {
            address,
            keypair: Keypair { secret, public },
        })
    }

    /// Loads an account from a JSON key file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ClientError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            ClientError::ConfigError(format!("Failed to read account file {}: {}", path.display(), e))
        })?;
        let key_file: AccountKeyFile = serde_json::from_str(&contents).map_err(|e| {
            ClientError::ConfigError(format!("Invalid account file {}: {}", path.display(), e))
        })?;

        Self::from_private_key_hex(key_file.address, &key_file.private_key)
    }
}

impl Account for LocalAccount {
    fn address(&self) -> Address {
        self.address
    }

    fn public_key(&self) -> String {
        format!("0x{}", hex::encode(self.keypair.public.as_bytes()))
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, LedgerError> {
        Ok(self.keypair.sign(message).to_bytes().to_vec())
    }
}

impl fmt::Debug for LocalAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalAccount")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}
