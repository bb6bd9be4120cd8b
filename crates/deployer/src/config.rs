//! Deployer credentials and package settings.

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

/// Default location of the deployer config file.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Contents of `config.json`.
///
/// ```json
/// {
///   "privateKey": "<hex ed25519 secret key>",
///   "supportedCoins": ["0x2::sui::SUI"]
/// }
/// ```
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployConfig {
    /// Hex-encoded Ed25519 secret key of the deployer
    pub private_key: String,

    /// Payment coin types accepted by the event registry, in order
    pub supported_coins: Vec<String>,
}

impl DeployConfig {
    /// Load from the path in `DEPLOY_CONFIG`, or `config.json`.
    pub fn from_env() -> Result<Self> {
        let path = env::var("DEPLOY_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
        Self::load(&path)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read deployer config {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse deployer config {}", path.display()))?;

        if config.private_key.trim().is_empty() {
            bail!("privateKey is empty in {}", path.display());
        }

        Ok(config)
    }
}

impl fmt::Debug for DeployConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeployConfig")
            .field("private_key", &"<redacted>")
            .field("supported_coins", &self.supported_coins)
            .finish()
    }
}
