//! Sui JSON-RPC chain client.

use std::collections::HashMap;

use async_trait::async_trait;
use deployer_core::{
    ChainClient, DeployError, ExecutionResult, Input, ObjectId, Result, TransactionSpec, TxDigest,
};
use sui_sdk::rpc_types::{
    SuiExecutionStatus, SuiObjectDataOptions, SuiTransactionBlockEffectsAPI,
    SuiTransactionBlockResponseOptions,
};
use sui_sdk::{SuiClient, SuiClientBuilder};
use sui_types::base_types::{ObjectRef, SuiAddress};
use sui_types::object::Owner;
use sui_types::transaction::{ObjectArg, SharedObjectMutability, Transaction, TransactionData};

use crate::config::SuiConfig;
use crate::signer::SuiSigner;
use crate::utils::conversion::{self, parse_object_id};

/// Submits deployment transactions to a Sui full node.
pub struct SuiChainClient {
    client: SuiClient,
    gas_budget: u64,
}

impl SuiChainClient {
    /// Connect to the configured full node.
    ///
    /// # Errors
    ///
    /// Returns `Config` for invalid configuration and `SubmissionFailure`
    /// when the node cannot be reached.
    pub async fn connect(config: &SuiConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| DeployError::Config(format!("Invalid configuration: {}", e)))?;

        let url = config.get_rpc_url();
        tracing::debug!("Connecting to Sui {} at {}", config.network.name(), url);

        let client = SuiClientBuilder::default()
            .build(url)
            .await
            .map_err(submission(&format!("Failed to connect to {}", url)))?;

        Ok(Self {
            client,
            gas_budget: config.gas_budget,
        })
    }

    /// Fetch the first gas coin of `owner`.
    async fn gas_coin(&self, owner: SuiAddress) -> Result<ObjectRef> {
        let gas_coins = self
            .client
            .coin_read_api()
            .get_coins(owner, None, None, None)
            .await
            .map_err(submission("Failed to get gas coins"))?;

        let gas_coin = gas_coins.data.first().ok_or_else(|| {
            DeployError::SubmissionFailure(format!("No gas coins available for address {}", owner))
        })?;

        tracing::debug!(
            "Using gas coin: {} with balance: {}",
            gas_coin.coin_object_id,
            gas_coin.balance
        );

        Ok(gas_coin.object_ref())
    }

    /// Resolve an object input to an owned or shared argument.
    async fn object_arg(&self, id: &ObjectId) -> Result<ObjectArg> {
        let object_id = parse_object_id(id.as_str())?;

        let object = self
            .client
            .read_api()
            .get_object_with_options(object_id, SuiObjectDataOptions::new().with_owner())
            .await
            .map_err(submission(&format!("Failed to fetch object {}", id)))?
            .into_object()
            .map_err(submission(&format!("Object {} not found", id)))?;

        let arg = match &object.owner {
            Some(Owner::Shared {
                initial_shared_version,
            }) => ObjectArg::SharedObject {
                id: object.object_id,
                initial_shared_version: *initial_shared_version,
                mutability: SharedObjectMutability::Mutable,
            },
            _ => ObjectArg::ImmOrOwnedObject(object.object_ref()),
        };

        tracing::debug!("Resolved object {}: {:?}", id, arg);
        Ok(arg)
    }
}

#[async_trait]
impl ChainClient for SuiChainClient {
    type Signer = SuiSigner;

    async fn submit(&self, spec: &TransactionSpec, signer: &SuiSigner) -> Result<ExecutionResult> {
        let mut objects = HashMap::new();
        for input in spec.inputs() {
            if let Input::Object(id) = input {
                if !objects.contains_key(id) {
                    let arg = self.object_arg(id).await?;
                    objects.insert(id.clone(), arg);
                }
            }
        }

        let pt = conversion::to_programmable(spec, &objects)?;

        let gas_price = self
            .client
            .read_api()
            .get_reference_gas_price()
            .await
            .map_err(submission("Failed to get reference gas price"))?;

        let sender = signer.sui_address();
        let gas_coin = self.gas_coin(sender).await?;

        let tx_data =
            TransactionData::new_programmable(sender, vec![gas_coin], pt, self.gas_budget, gas_price);
        let signature = signer.sign_transaction(&tx_data);

        tracing::debug!("Executing transaction with {} commands...", spec.commands().len());
        let response = self
            .client
            .quorum_driver_api()
            .execute_transaction_block(
                Transaction::from_data(tx_data, vec![signature]),
                SuiTransactionBlockResponseOptions::new()
                    .with_effects()
                    .with_object_changes(),
                None, // No execution options
            )
            .await
            .map_err(submission("Failed to execute transaction"))?;

        let digest = TxDigest::new(response.digest.to_string());

        let effects = response.effects.as_ref().ok_or_else(|| {
            DeployError::SubmissionFailure(format!("No effects returned for transaction {}", digest))
        })?;

        if let SuiExecutionStatus::Failure { error } = effects.status() {
            tracing::error!("Transaction FAILED on-chain. Digest: {}, Error: {}", digest, error);
            return Err(DeployError::ExecutionFailure {
                digest,
                reason: error.clone(),
            });
        }

        let object_changes =
            conversion::object_changes(&digest, response.object_changes.as_deref())?;

        tracing::debug!(
            "Transaction {} succeeded with {} object changes",
            digest,
            object_changes.len()
        );

        Ok(ExecutionResult {
            digest,
            object_changes,
        })
    }
}

fn submission<E: std::fmt::Display>(context: &str) -> impl FnOnce(E) -> DeployError + '_ {
    move |e| DeployError::SubmissionFailure(format!("{}: {}", context, e))
}
