//! Sui adapters for the Ticketland deployment workflow.
//!
//! This crate implements the `deployer-core` traits against Sui:
//! - [`SuiMoveBuilder`]: `sui move build --dump-bytecode-as-base64`
//! - [`SuiSigner`]: Ed25519 key from hex, intent signing
//! - [`SuiChainClient`]: programmable transaction construction and
//!   JSON-RPC execution
//!
//! # Usage
//!
//! ```ignore
//! use deployer_core::{ConsoleReporter, Deployer};
//! use deployer_sui::{SuiChainClient, SuiConfig, SuiMoveBuilder, SuiSigner};
//!
//! let config = SuiConfig::from_env()?;
//! let signer = SuiSigner::from_hex(&private_key)?;
//! let client = SuiChainClient::connect(&config).await?;
//! let build = SuiMoveBuilder::new(&config.cli_path);
//!
//! Deployer::new(&build, &client, &signer, supported_coins)
//!     .run(&mut ConsoleReporter)
//!     .await?;
//! ```

pub mod client;
pub mod config;
pub mod move_build;
pub mod signer;
pub mod utils;

pub use client::SuiChainClient;
pub use config::{SuiConfig, SuiNetwork};
pub use move_build::SuiMoveBuilder;
pub use signer::SuiSigner;
