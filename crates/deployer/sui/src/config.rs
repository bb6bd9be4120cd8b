//! Sui network configuration.

use std::env;

/// Sui network types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuiNetwork {
    /// Sui mainnet
    #[default]
    Mainnet,
    /// Sui testnet
    Testnet,
    /// Sui devnet
    Devnet,
    /// Local Sui network
    Local,
}

impl SuiNetwork {
    pub fn default_rpc_url(&self) -> &str {
        match self {
            SuiNetwork::Mainnet => "https://fullnode.mainnet.sui.io:443",
            SuiNetwork::Testnet => "https://fullnode.testnet.sui.io:443",
            SuiNetwork::Devnet => "https://fullnode.devnet.sui.io:443",
            SuiNetwork::Local => "http://127.0.0.1:9000",
        }
    }

    pub fn name(&self) -> &str {
        match self {
            SuiNetwork::Mainnet => "mainnet",
            SuiNetwork::Testnet => "testnet",
            SuiNetwork::Devnet => "devnet",
            SuiNetwork::Local => "local",
        }
    }

    fn parse(name: &str) -> Result<Self, String> {
        match name.to_lowercase().as_str() {
            "mainnet" => Ok(SuiNetwork::Mainnet),
            "testnet" => Ok(SuiNetwork::Testnet),
            "devnet" => Ok(SuiNetwork::Devnet),
            "local" => Ok(SuiNetwork::Local),
            other => Err(format!(
                "Invalid SUI_NETWORK: {}. Must be mainnet, testnet, devnet, or local",
                other
            )),
        }
    }
}

/// Default gas budget for deployment transactions (0.5 SUI).
///
/// Publishing a multi-module package costs considerably more than a call.
pub const DEFAULT_GAS_BUDGET: u64 = 500_000_000;

/// Sui-specific configuration.
#[derive(Debug, Clone)]
pub struct SuiConfig {
    /// Sui network to connect to
    pub network: SuiNetwork,

    /// Custom RPC endpoint URL (overrides network default)
    pub rpc_url: Option<String>,

    /// Gas budget for each transaction (in MIST)
    pub gas_budget: u64,

    /// Sui CLI binary used to compile the package
    pub cli_path: String,
}

impl SuiConfig {
    /// Create a new Sui configuration.
    pub fn new(network: SuiNetwork) -> Self {
        Self {
            network,
            rpc_url: None,
            gas_budget: DEFAULT_GAS_BUDGET,
            cli_path: "sui".to_string(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SUI_NETWORK` - Network name (mainnet, testnet, devnet, local) (default: mainnet)
    /// - `SUI_RPC_URL` - Custom RPC endpoint URL
    /// - `SUI_GAS_BUDGET` - Gas budget in MIST (default: 500000000)
    /// - `SUI_CLI_PATH` - Sui CLI binary (default: sui)
    pub fn from_env() -> Result<Self, String> {
        let network = match env::var("SUI_NETWORK") {
            Ok(name) => SuiNetwork::parse(&name)?,
            Err(_) => SuiNetwork::default(),
        };

        let gas_budget = match env::var("SUI_GAS_BUDGET") {
            Ok(value) => value
                .parse::<u64>()
                .map_err(|e| format!("Invalid SUI_GAS_BUDGET '{}': {}", value, e))?,
            Err(_) => DEFAULT_GAS_BUDGET,
        };

        Ok(Self {
            network,
            rpc_url: env::var("SUI_RPC_URL").ok(),
            gas_budget,
            cli_path: env::var("SUI_CLI_PATH").unwrap_or_else(|_| "sui".to_string()),
        })
    }

    /// Set custom RPC URL.
    pub fn with_rpc_url(mut self, url: String) -> Self {
        self.rpc_url = Some(url);
        self
    }

    /// Set gas budget.
    pub fn with_gas_budget(mut self, budget: u64) -> Self {
        self.gas_budget = budget;
        self
    }

    /// Get the RPC URL (custom or default for network).
    pub fn get_rpc_url(&self) -> &str {
        self.rpc_url
            .as_deref()
            .unwrap_or_else(|| self.network.default_rpc_url())
    }

    pub fn validate(&self) -> Result<(), String> {
        let url = self.get_rpc_url();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(format!("Invalid RPC URL format: {}", url));
        }

        if self.gas_budget == 0 {
            return Err("Gas budget must be greater than 0".to_string());
        }

        if self.cli_path.trim().is_empty() {
            return Err("Sui CLI path cannot be empty".to_string());
        }

        Ok(())
    }
}

impl Default for SuiConfig {
    fn default() -> Self {
        Self::new(SuiNetwork::default())
    }
}
