//! Configuration for the ledger client.

use crate::errors::ClientError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Gas ceiling applied to every token transaction.
pub const DEFAULT_MAX_GAS_AMOUNT: u64 = 4000;

/// Environment variable overriding the node URL.
pub const NODE_URL_ENV: &str = "TOKEN_CLIENT_NODE_URL";

/// Environment variable overriding the gas ceiling.
pub const MAX_GAS_ENV: &str = "TOKEN_CLIENT_MAX_GAS";

/// Configuration for the ledger client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the ledger node's REST API
    pub node_url: String,
    /// The gas ceiling to use for transactions
    pub max_gas_amount: u64,
    /// The gas unit price to use for transactions
    pub gas_unit_price: u64,
    /// Seconds from drafting until a transaction expires
    pub expiration_secs: u64,
    /// Seconds to wait for a transaction to reach a terminal state
    pub wait_timeout_secs: u64,
    /// Milliseconds between transaction status polls
    pub poll_interval_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            node_url: "http://localhost:8080".to_string(),
            max_gas_amount: DEFAULT_MAX_GAS_AMOUNT,
            gas_unit_price: 1,
            expiration_secs: 10,
            wait_timeout_secs: 30,
            poll_interval_ms: 500,
        }
    }
}

impl ClientConfig {
    /// Loads configuration from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ClientError> {
        let path = path.as_ref();
        let mut file = File::open(path)
            .map_err(|e| ClientError::ConfigError(format!("{}: {}", path.display(), e)))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| ClientError::ConfigError(format!("{}: {}", path.display(), e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| ClientError::ConfigError(format!("{}: {}", path.display(), e)))
    }

    /// Saves configuration to a file.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ClientError> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ClientError::ConfigError(e.to_string()))?;
        std::fs::write(path, contents).map_err(|e| ClientError::ConfigError(e.to_string()))?;
        Ok(())
    }

    /// Applies overrides from the environment.
    pub fn apply_env(mut self) -> Result<Self, ClientError> {
        if let Ok(url) = std::env::var(NODE_URL_ENV) {
            self.node_url = url;
        }
        if let Ok(gas) = std::env::var(MAX_GAS_ENV) {
            self.max_gas_amount = gas
                .parse()
                .map_err(|e| ClientError::ConfigError(format!("{}='{}': {}", MAX_GAS_ENV, gas, e)))?;
        }
        Ok(self)
    }
}
