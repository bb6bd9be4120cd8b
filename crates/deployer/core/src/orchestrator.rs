//! Deployment workflow: build → publish → resolve → configure.
//!
//! ```text
//! Idle ──build──▶ Built ──publish──▶ Published ──resolve──▶ Resolved
//!                                                              │
//!                 Done ◀──report digest── Configured ◀──update_config
//! ```
//!
//! There is no compensation between the two transactions: if configuration
//! fails, the package stays published and a new run publishes it again.

use std::path::PathBuf;

use crate::contract::{self, PACKAGE_PATH};
use crate::error::Result;
use crate::resolver;
use crate::traits::{BuildInvoker, ChainClient, Reporter, SigningIdentity};
use crate::types::DeploymentReport;

/// Progress of a deployment run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployState {
    Idle,
    Built,
    Published,
    Resolved,
    Configured,
    Done,
}

/// Runs the Ticketland deployment against injected collaborators.
pub struct Deployer<'a, B: BuildInvoker, C: ChainClient> {
    build: &'a B,
    client: &'a C,
    signer: &'a C::Signer,
    package_path: PathBuf,
    supported_coins: Vec<String>,
    state: DeployState,
}

impl<'a, B: BuildInvoker, C: ChainClient> Deployer<'a, B, C> {
    pub fn new(build: &'a B, client: &'a C, signer: &'a C::Signer, supported_coins: Vec<String>) -> Self {
        Self {
            build,
            client,
            signer,
            package_path: PathBuf::from(PACKAGE_PATH),
            supported_coins,
            state: DeployState::Idle,
        }
    }

    /// Override the package source path.
    pub fn with_package_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.package_path = path.into();
        self
    }

    /// State reached by the last (or current) run.
    pub fn state(&self) -> DeployState {
        self.state
    }

    /// Execute the whole workflow once.
    ///
    /// Every run starts from `Idle`, so running twice publishes two
    /// packages. Handles are reported as soon as they are resolved.
    ///
    /// # Errors
    ///
    /// Propagates the first failure unchanged; `state()` then tells how far
    /// the run got.
    pub async fn run(&mut self, reporter: &mut dyn Reporter) -> Result<DeploymentReport> {
        self.state = DeployState::Idle;

        let deployer = self.signer.address();
        reporter.report("Deployer", deployer.as_str());

        tracing::info!("Building package at {}...", self.package_path.display());
        let package = self.build.build(&self.package_path).await?;
        tracing::debug!(
            "Built {} modules with {} dependencies",
            package.modules.len(),
            package.dependencies.len()
        );
        self.state = DeployState::Built;

        tracing::info!("Publishing package...");
        let publish = contract::publish_transaction(package, &deployer)?;
        let published = self.client.submit(&publish, self.signer).await?;
        tracing::info!("✓ Package published. Transaction: {}", published.digest);
        self.state = DeployState::Published;

        let handles = resolver::resolve(&published)?;
        self.state = DeployState::Resolved;

        reporter.report("packageId", handles.package_id.as_str());
        reporter.report("adminCapId", handles.admin_cap_id.as_str());
        reporter.report("operatorCapId", handles.operator_cap_id.as_str());
        reporter.report("attendanceConfigId", handles.attendance_config_id.as_str());
        reporter.report("nftRepository", handles.nft_repository_id.as_str());
        reporter.report("configId", handles.config_id.as_str());
        reporter.report("exchangeRateId", handles.exchange_rate_id.as_str());

        tracing::info!("Updating event registry config...");
        let update = contract::update_config_transaction(&handles, &self.supported_coins, &deployer)?;
        let configured = self.client.submit(&update, self.signer).await?;
        self.state = DeployState::Configured;

        reporter.report("Updated config", configured.digest.as_str());
        self.state = DeployState::Done;

        Ok(DeploymentReport {
            deployer,
            handles,
            publish_digest: published.digest,
            config_digest: configured.digest,
        })
    }
}
