//! Ticketland deployer binary.
//!
//! Composition root: loads configuration, builds the Sui collaborators once
//! and hands them to the deployment workflow.
//!
//! ```bash
//! SUI_NETWORK=testnet cargo run -p ticketland-deployer
//! ```

mod config;

use anyhow::{Context, Result, anyhow};
use deployer_core::{ConsoleReporter, Deployer, SigningIdentity};
use deployer_sui::{SuiChainClient, SuiConfig, SuiMoveBuilder, SuiSigner};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::DeployConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();

    let deploy_config = DeployConfig::from_env()?;
    let sui_config = SuiConfig::from_env().map_err(|e| anyhow!(e))?;
    tracing::info!(
        "Deploying to {} ({})",
        sui_config.network.name(),
        sui_config.get_rpc_url()
    );
    tracing::debug!("Deployer config: {:?}", deploy_config);

    let signer =
        SuiSigner::from_hex(&deploy_config.private_key).context("Failed to load deployer key")?;
    tracing::debug!("Deployer address: {}", signer.address());

    let client = SuiChainClient::connect(&sui_config)
        .await
        .context("Failed to initialize Sui client")?;
    let build = SuiMoveBuilder::new(sui_config.cli_path.clone());

    let mut deployer = Deployer::new(&build, &client, &signer, deploy_config.supported_coins);
    let outcome = deployer.run(&mut ConsoleReporter).await;
    match outcome {
        Ok(report) => {
            tracing::info!(
                "Deployment complete: package {} (publish {}, config {})",
                report.handles.package_id,
                report.publish_digest,
                report.config_digest
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Deployment aborted in state {:?}: {}", deployer.state(), e);
            Err(e).context("Deployment failed")
        }
    }
}

/// Log to stderr so the report on stdout stays clean.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();
}
