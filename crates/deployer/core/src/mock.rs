//! In-memory collaborators for testing the workflow without a compiler or
//! network.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::contract::DeployedObject;
use crate::error::{DeployError, Result};
use crate::traits::{BuildInvoker, ChainClient, Reporter, SigningIdentity};
use crate::transaction::{Command, TransactionSpec};
use crate::types::{Address, CompiledPackage, ExecutionResult, ObjectChange, ObjectId, TxDigest};

/// Publish result with one record per [`DeployedObject`] plus the upgrade
/// capability. Object IDs are `<package>-<label>`.
pub fn publish_result(package_id: &str, digest: &str) -> ExecutionResult {
    let package = ObjectId::new(package_id);
    let mut object_changes = vec![
        ObjectChange::published(package_id),
        ObjectChange::created(format!("{}-upgradeCap", package_id), "0x2::package::UpgradeCap"),
    ];
    object_changes.extend(DeployedObject::ALL.iter().map(|object| {
        ObjectChange::created(format!("{}-{}", package_id, object), object.object_type(&package))
    }));

    ExecutionResult {
        digest: TxDigest::new(digest),
        object_changes,
    }
}

/// Build invoker returning a canned compiler dump.
pub struct MockBuildInvoker {
    stdout: String,
    paths: Mutex<Vec<PathBuf>>,
}

impl MockBuildInvoker {
    pub fn new(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            paths: Mutex::new(Vec::new()),
        }
    }

    pub fn built_paths(&self) -> Vec<PathBuf> {
        self.paths.lock().unwrap().clone()
    }
}

impl Default for MockBuildInvoker {
    fn default() -> Self {
        Self::new(r#"{"modules":["AQID"],"dependencies":[]}"#)
    }
}

#[async_trait]
impl BuildInvoker for MockBuildInvoker {
    async fn build(&self, package_path: &Path) -> Result<CompiledPackage> {
        self.paths.lock().unwrap().push(package_path.to_path_buf());
        CompiledPackage::from_build_output(&self.stdout)
    }
}

/// Identity with a fixed address.
pub struct MockIdentity(pub Address);

impl Default for MockIdentity {
    fn default() -> Self {
        Self(Address::new("0xdeployer"))
    }
}

impl SigningIdentity for MockIdentity {
    fn address(&self) -> Address {
        self.0.clone()
    }
}

#[derive(Default)]
struct ChainState {
    submitted: Vec<TransactionSpec>,
    publishes: usize,
}

/// Chain client that publishes a fresh package on every publish transaction.
///
/// The first package is `0xP`, later ones `0xP2`, `0xP3`, ...
#[derive(Clone, Default)]
pub struct MockChainClient {
    state: Arc<Mutex<ChainState>>,
    /// Object types (`<module>::<Type>`) left out of publish results
    omitted: Vec<String>,
    /// Abort reason for configuration calls
    config_abort: Option<String>,
}

impl MockChainClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn without_object(mut self, module_and_type: &str) -> Self {
        self.omitted.push(module_and_type.to_string());
        self
    }

    pub fn with_config_abort(mut self, reason: &str) -> Self {
        self.config_abort = Some(reason.to_string());
        self
    }

    pub fn submitted(&self) -> Vec<TransactionSpec> {
        self.state.lock().unwrap().submitted.clone()
    }

    pub fn submission_count(&self) -> usize {
        self.state.lock().unwrap().submitted.len()
    }
}

#[async_trait]
impl ChainClient for MockChainClient {
    type Signer = MockIdentity;

    async fn submit(&self, spec: &TransactionSpec, _signer: &MockIdentity) -> Result<ExecutionResult> {
        let mut state = self.state.lock().unwrap();
        state.submitted.push(spec.clone());
        let sequence = state.submitted.len();

        let is_publish = spec
            .commands()
            .iter()
            .any(|command| matches!(command, Command::Publish { .. }));

        if is_publish {
            state.publishes += 1;
            let package_id = match state.publishes {
                1 => "0xP".to_string(),
                n => format!("0xP{}", n),
            };

            let mut result = publish_result(&package_id, &format!("publish-{}", sequence));
            result.object_changes.retain(|change| {
                !change.object_type().is_some_and(|object_type| {
                    self.omitted
                        .iter()
                        .any(|omitted| object_type.ends_with(&format!("::{}", omitted)))
                })
            });
            return Ok(result);
        }

        let digest = TxDigest::new(format!("config-{}", sequence));
        if let Some(reason) = &self.config_abort {
            return Err(DeployError::ExecutionFailure {
                digest,
                reason: reason.clone(),
            });
        }

        Ok(ExecutionResult {
            digest,
            object_changes: vec![],
        })
    }
}

/// Reporter keeping every line in memory.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub lines: Vec<(String, String)>,
}

impl RecordingReporter {
    pub fn value(&self, label: &str) -> Option<&str> {
        self.lines
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, value)| value.as_str())
    }

    pub fn labels(&self) -> Vec<&str> {
        self.lines.iter().map(|(label, _)| label.as_str()).collect()
    }
}

impl Reporter for RecordingReporter {
    fn report(&mut self, label: &str, value: &str) {
        self.lines.push((label.to_string(), value.to_string()));
    }
}
