//! Seams between the orchestrator and the outside world.
//!
//! - [`BuildInvoker`]: external compiler
//! - [`SigningIdentity`]: deployer key
//! - [`ChainClient`]: network submission
//! - [`Reporter`]: user-visible output

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;
use crate::transaction::TransactionSpec;
use crate::types::{Address, CompiledPackage, ExecutionResult};

/// Compiles a package source tree to deployable bytecode.
#[async_trait]
pub trait BuildInvoker: Send + Sync {
    async fn build(&self, package_path: &Path) -> Result<CompiledPackage>;
}

/// Key material and the address derived from it.
pub trait SigningIdentity: Send + Sync {
    fn address(&self) -> Address;
}

/// Signs and submits transactions.
///
/// Implementations must not retry: resubmitting a publish after an
/// ambiguous response can publish the package twice.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Identity type this client knows how to sign with.
    type Signer: SigningIdentity;

    /// Sign `spec`, submit it and wait for the finalized result with object
    /// changes.
    async fn submit(&self, spec: &TransactionSpec, signer: &Self::Signer) -> Result<ExecutionResult>;
}

/// Console output of a deployment run.
pub trait Reporter: Send {
    /// Print a labelled value, e.g. `packageId: 0x...`.
    fn report(&mut self, label: &str, value: &str);
}

/// Prints report lines to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&mut self, label: &str, value: &str) {
        println!("{}: {}", label, value);
    }
}
