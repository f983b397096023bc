//! Configuration resolution for the CLI.

use anyhow::Result;
use std::path::{Path, PathBuf};
use token_client::ClientConfig;

/// Loads the client configuration from `path` (or defaults), then applies
/// environment overrides and finally the `--node` flag.
pub fn load(path: Option<&Path>, node: Option<String>) -> Result<ClientConfig> {
    let config = match path {
        Some(path) => ClientConfig::from_file(path)?,
        None => ClientConfig::default(),
    };

    let mut config = config.apply_env()?;
    if let Some(node) = node {
        config.node_url = node;
    }
    Ok(config)
}

/// Default location of the account key file.
pub fn default_account_path() -> PathBuf {
    let mut dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    dir.push("token-client");
    dir.push("account.json");
    dir
}
