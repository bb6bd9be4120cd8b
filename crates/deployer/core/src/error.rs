//! Error types for the deployment workflow.

use thiserror::Error;

use crate::types::TxDigest;

/// Errors that can abort a deployment run.
///
/// None of these are recovered internally: every variant propagates to the
/// top of the workflow and terminates the run.
#[derive(Debug, Error)]
pub enum DeployError {
    /// The external compiler failed or produced unparsable output.
    #[error("Build failed: {0}")]
    BuildFailure(String),

    /// A transaction operation referenced a handle that does not exist yet.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Network or transport error while talking to the chain.
    #[error("Submission failed: {0}")]
    SubmissionFailure(String),

    /// The transaction was accepted but aborted on-chain.
    #[error("Transaction {digest} aborted on-chain: {reason}")]
    ExecutionFailure { digest: TxDigest, reason: String },

    /// An expected object could not be uniquely found after publish.
    #[error("Could not resolve {handle}: expected exactly one matching object change, found {found}")]
    ResolutionError { handle: String, found: usize },

    /// Unreadable or invalid configuration (key material, network settings).
    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, DeployError>;
