//! `sui move build` invocation.

use std::path::Path;

use async_trait::async_trait;
use deployer_core::{BuildInvoker, CompiledPackage, DeployError, Result};
use tokio::process::Command;

/// Compiles packages with the Sui CLI in bytecode-dump mode.
#[derive(Debug, Clone)]
pub struct SuiMoveBuilder {
    cli_path: String,
}

impl SuiMoveBuilder {
    pub fn new(cli_path: impl Into<String>) -> Self {
        Self {
            cli_path: cli_path.into(),
        }
    }

    pub fn cli_path(&self) -> &str {
        &self.cli_path
    }
}

impl Default for SuiMoveBuilder {
    fn default() -> Self {
        Self::new("sui")
    }
}

#[async_trait]
impl BuildInvoker for SuiMoveBuilder {
    async fn build(&self, package_path: &Path) -> Result<CompiledPackage> {
        tracing::debug!(
            "Running {} move build --dump-bytecode-as-base64 --path {}",
            self.cli_path,
            package_path.display()
        );

        let output = Command::new(&self.cli_path)
            .args(["move", "build", "--dump-bytecode-as-base64", "--path"])
            .arg(package_path)
            .output()
            .await
            .map_err(|e| {
                DeployError::BuildFailure(format!("Failed to run '{}': {}", self.cli_path, e))
            })?;

        if !output.status.success() {
            return Err(DeployError::BuildFailure(format!(
                "'{} move build' exited with {}: {}",
                self.cli_path,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let stdout = String::from_utf8(output.stdout)
            .map_err(|e| DeployError::BuildFailure(format!("Compiler output is not UTF-8: {}", e)))?;

        CompiledPackage::from_build_output(&stdout)
    }
}
