//! Chain-agnostic deployment workflow for the Ticketland Move package.
//!
//! # Architecture
//!
//! ```text
//! Orchestrator (Deployer)
//!   ├── contract     transaction shapes of the Ticketland package
//!   ├── resolver     object changes → deployment handles
//!   └── transaction  append-only TransactionSpec builder
//!
//! Traits (implemented per chain, e.g. deployer-sui)
//!   ├── BuildInvoker
//!   ├── SigningIdentity
//!   ├── ChainClient
//!   └── Reporter
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use deployer_core::{ConsoleReporter, Deployer};
//!
//! let mut deployer = Deployer::new(&build, &client, &signer, supported_coins);
//! let report = deployer.run(&mut ConsoleReporter).await?;
//! ```

pub mod contract;
pub mod error;
pub mod orchestrator;
pub mod resolver;
pub mod traits;
pub mod transaction;
pub mod types;

#[cfg(test)]
pub mod mock;

pub use contract::DeployedObject;
pub use error::{DeployError, Result};
pub use orchestrator::{DeployState, Deployer};
pub use resolver::resolve;
pub use traits::{BuildInvoker, ChainClient, ConsoleReporter, Reporter, SigningIdentity};
pub use transaction::{
    Argument, Command, Input, MoveTarget, PureValue, TransactionBuilder, TransactionSpec,
};
pub use types::{
    Address, ChangeKind, CompiledPackage, DeploymentReport, ExecutionResult, ObjectChange,
    ObjectId, ResolvedDeploymentHandles, TxDigest,
};
