//! Common types for package deployment.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::error::{DeployError, Result};

// ============================================================================
// Identifiers
// ============================================================================

/// On-chain object or package identifier (e.g. `0x2`, `0xabc...`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub String);

impl ObjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Network account address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address(pub String);

impl Address {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Transaction digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxDigest(pub String);

impl TxDigest {
    pub fn new(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Compiled Package
// ============================================================================

/// Structured output of `sui move build --dump-bytecode-as-base64`.
#[derive(Debug, Deserialize)]
struct BuildOutput {
    modules: Vec<String>,
    dependencies: Vec<String>,
}

/// Deployable bytecode of a Move package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPackage {
    /// Compiled module bytecode, in build order
    pub modules: Vec<Vec<u8>>,

    /// Package IDs this package links against
    pub dependencies: Vec<ObjectId>,
}

impl CompiledPackage {
    /// Parse the compiler's JSON dump.
    ///
    /// The compiler may print progress lines before the JSON object, so only
    /// the last non-empty line of `stdout` is parsed.
    ///
    /// # Errors
    ///
    /// Returns `BuildFailure` if:
    /// - The output is empty or not the expected JSON structure
    /// - A module is not valid base64
    pub fn from_build_output(stdout: &str) -> Result<Self> {
        let line = stdout
            .lines()
            .rev()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .ok_or_else(|| DeployError::BuildFailure("Compiler produced no output".to_string()))?;

        let output: BuildOutput = serde_json::from_str(line)
            .map_err(|e| DeployError::BuildFailure(format!("Unexpected compiler output: {}", e)))?;

        let modules = output
            .modules
            .iter()
            .enumerate()
            .map(|(index, module)| {
                STANDARD.decode(module).map_err(|e| {
                    DeployError::BuildFailure(format!("Module {} is not valid base64: {}", index, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            modules,
            dependencies: output.dependencies.into_iter().map(ObjectId).collect(),
        })
    }
}

// ============================================================================
// Execution Results
// ============================================================================

/// Kind of a non-package object change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeKind {
    Created,
    Mutated,
    Transferred,
    Deleted,
    Wrapped,
}

/// One object side effect of an executed transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectChange {
    /// A package was published
    Published { package_id: ObjectId },

    /// A regular object was created, mutated, transferred, deleted or wrapped
    Object {
        kind: ChangeKind,
        object_id: ObjectId,
        /// Fully qualified type, `<address>::<module>::<Type>`
        object_type: String,
    },
}

impl ObjectChange {
    pub fn created(object_id: impl Into<String>, object_type: impl Into<String>) -> Self {
        Self::Object {
            kind: ChangeKind::Created,
            object_id: ObjectId::new(object_id),
            object_type: object_type.into(),
        }
    }

    pub fn published(package_id: impl Into<String>) -> Self {
        Self::Published {
            package_id: ObjectId::new(package_id),
        }
    }

    /// Type string of a regular object change.
    pub fn object_type(&self) -> Option<&str> {
        match self {
            Self::Object { object_type, .. } => Some(object_type),
            Self::Published { .. } => None,
        }
    }
}

/// Finalized result of a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub digest: TxDigest,

    /// Object changes, in no meaningful order
    pub object_changes: Vec<ObjectChange>,
}

// ============================================================================
// Deployment Handles
// ============================================================================

/// Object identifiers created by publishing the Ticketland package.
///
/// Every field is populated once resolution succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDeploymentHandles {
    pub package_id: ObjectId,
    pub admin_cap_id: ObjectId,
    pub attendance_config_id: ObjectId,
    pub nft_repository_id: ObjectId,
    pub config_id: ObjectId,
    pub exchange_rate_id: ObjectId,
    pub operator_cap_id: ObjectId,
}

/// Outcome of a complete deployment run.
#[derive(Debug, Clone)]
pub struct DeploymentReport {
    pub deployer: Address,
    pub handles: ResolvedDeploymentHandles,
    pub publish_digest: TxDigest,
    pub config_digest: TxDigest,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_output_parsing() {
        let stdout = "INCLUDING DEPENDENCY Sui\nBUILDING ticketland\n\
                      {\"modules\":[\"AQID\",\"BAU=\"],\"dependencies\":[\"0x1\",\"0x2\"],\"digest\":[1,2]}\n";

        let package = CompiledPackage::from_build_output(stdout).unwrap();
        assert_eq!(package.modules, vec![vec![1, 2, 3], vec![4, 5]]);
        assert_eq!(
            package.dependencies,
            vec![ObjectId::new("0x1"), ObjectId::new("0x2")]
        );
    }

    #[test]
    fn test_build_output_rejects_garbage() {
        for stdout in ["", "   \n", "error[E01001]: unbound module", "{\"modules\":[]}"] {
            assert!(matches!(
                CompiledPackage::from_build_output(stdout),
                Err(DeployError::BuildFailure(_))
            ));
        }
    }

    #[test]
    fn test_build_output_rejects_bad_base64() {
        let err = CompiledPackage::from_build_output(r#"{"modules":["not base64!"],"dependencies":[]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("Module 0"));
    }
}
