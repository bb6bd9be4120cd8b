//! Ticketland Move package layout and its two deployment transactions.
//!
//! ## Move Package Reference
//!
//! ```move
//! module ticketland::event_registry {
//!     public struct AdminCap has key, store { id: UID }
//!     public struct Config has key { id: UID, ... }
//!
//!     entry fun update_config(
//!         cap: &AdminCap,
//!         config: &mut Config,
//!         supported_coins: vector<String>,
//!         fee: u64,
//!         fee_address: address,
//!         operators: vector<address>,
//!     );
//! }
//!
//! module ticketland::attendance     { public struct Config has key { .. } }
//! module ticketland::ticket         { public struct NftRepository has key { .. } }
//! module ticketland::price_oracle   { public struct ExchangeRate has key { .. } }
//! module ticketland::primary_market { public struct OperatorCap has key, store { .. } }
//! ```

use std::fmt;

use crate::error::Result;
use crate::transaction::{MoveTarget, PureValue, TransactionBuilder, TransactionSpec};
use crate::types::{Address, CompiledPackage, ObjectId, ResolvedDeploymentHandles};

/// Package source path handed to the compiler.
pub const PACKAGE_PATH: &str = "sources/event_registry.move";

pub const EVENT_REGISTRY_MODULE: &str = "event_registry";
pub const UPDATE_CONFIG_FUNCTION: &str = "update_config";

/// Fee parameter written by the initial configuration.
pub const INITIAL_FEE: u64 = 100;

/// Object created by the package's `init` functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeployedObject {
    AdminCap,
    AttendanceConfig,
    NftRepository,
    Config,
    ExchangeRate,
    OperatorCap,
}

impl DeployedObject {
    pub const ALL: [DeployedObject; 6] = [
        DeployedObject::AdminCap,
        DeployedObject::AttendanceConfig,
        DeployedObject::NftRepository,
        DeployedObject::Config,
        DeployedObject::ExchangeRate,
        DeployedObject::OperatorCap,
    ];

    pub fn module(&self) -> &'static str {
        match self {
            Self::AdminCap | Self::Config => EVENT_REGISTRY_MODULE,
            Self::AttendanceConfig => "attendance",
            Self::NftRepository => "ticket",
            Self::ExchangeRate => "price_oracle",
            Self::OperatorCap => "primary_market",
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::AdminCap => "AdminCap",
            Self::AttendanceConfig | Self::Config => "Config",
            Self::NftRepository => "NftRepository",
            Self::ExchangeRate => "ExchangeRate",
            Self::OperatorCap => "OperatorCap",
        }
    }

    /// Fully qualified type string for a given package.
    pub fn object_type(&self, package_id: &ObjectId) -> String {
        format!("{}::{}::{}", package_id, self.module(), self.type_name())
    }
}

impl fmt::Display for DeployedObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::AdminCap => "adminCapId",
            Self::AttendanceConfig => "attendanceConfigId",
            Self::NftRepository => "nftRepository",
            Self::Config => "configId",
            Self::ExchangeRate => "exchangeRateId",
            Self::OperatorCap => "operatorCapId",
        };
        f.write_str(label)
    }
}

/// Publish `package` and keep its upgrade capability with the deployer.
pub fn publish_transaction(package: CompiledPackage, deployer: &Address) -> Result<TransactionSpec> {
    let mut builder = TransactionBuilder::new();

    let upgrade_cap = builder.publish(package)?;
    let recipient = builder.pure(PureValue::Address(deployer.clone()))?;
    builder.transfer_objects(vec![upgrade_cap], recipient)?;

    Ok(builder.finish())
}

/// Initial `event_registry::update_config` call.
///
/// Argument order is the on-chain function's signature; the deployer is both
/// fee recipient and sole operator.
pub fn update_config_transaction(
    handles: &ResolvedDeploymentHandles,
    supported_coins: &[String],
    deployer: &Address,
) -> Result<TransactionSpec> {
    let mut builder = TransactionBuilder::new();

    let arguments = vec![
        builder.object(handles.admin_cap_id.clone())?,
        builder.object(handles.config_id.clone())?,
        builder.pure(PureValue::Strings(supported_coins.to_vec()))?,
        builder.pure(PureValue::U64(INITIAL_FEE))?,
        builder.pure(PureValue::Address(deployer.clone()))?,
        builder.pure(PureValue::Addresses(vec![deployer.clone()]))?,
    ];

    let target = MoveTarget::new(
        handles.package_id.clone(),
        EVENT_REGISTRY_MODULE,
        UPDATE_CONFIG_FUNCTION,
    );
    builder.move_call(target, arguments)?;

    Ok(builder.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::{Command, Input};

    fn handles(package: &str) -> ResolvedDeploymentHandles {
        let id = |name: &str| ObjectId::new(format!("{}-{}", package, name));
        ResolvedDeploymentHandles {
            package_id: ObjectId::new(package),
            admin_cap_id: id("admin"),
            attendance_config_id: id("attendance"),
            nft_repository_id: id("nft"),
            config_id: id("config"),
            exchange_rate_id: id("rate"),
            operator_cap_id: id("operator"),
        }
    }

    #[test]
    fn test_object_types() {
        let package = ObjectId::new("0xP");
        let types: Vec<String> = DeployedObject::ALL
            .iter()
            .map(|object| object.object_type(&package))
            .collect();

        assert_eq!(
            types,
            vec![
                "0xP::event_registry::AdminCap",
                "0xP::attendance::Config",
                "0xP::ticket::NftRepository",
                "0xP::event_registry::Config",
                "0xP::price_oracle::ExchangeRate",
                "0xP::primary_market::OperatorCap",
            ]
        );
    }

    #[test]
    fn test_publish_transaction_keeps_upgrade_cap() {
        let package = CompiledPackage {
            modules: vec![vec![1, 2, 3]],
            dependencies: vec![],
        };
        let deployer = Address::new("0xd");

        let spec = publish_transaction(package.clone(), &deployer).unwrap();
        assert_eq!(
            spec.commands()[0],
            Command::Publish {
                modules: package.modules,
                dependencies: package.dependencies,
            }
        );
        let Command::TransferObjects { objects, recipient } = &spec.commands()[1] else {
            panic!("expected transfer, got {:?}", spec.commands()[1]);
        };
        assert_eq!(objects.as_slice(), &[crate::transaction::Argument::Result(0)]);
        assert_eq!(
            spec.input(*recipient),
            Some(&Input::Pure(PureValue::Address(deployer)))
        );
    }

    #[test]
    fn test_update_config_argument_order() {
        let deployer = Address::new("0xd");
        let coins = vec!["0x2::sui::SUI".to_string(), "0xc::usdc::USDC".to_string()];

        for package in ["0xP", "0xQ", "0x5eed"] {
            let handles = handles(package);
            let spec = update_config_transaction(&handles, &coins, &deployer).unwrap();

            assert_eq!(spec.commands().len(), 1);
            let (target, arguments) = spec.move_call().unwrap();
            assert_eq!(
                target.to_string(),
                format!("{}::event_registry::update_config", package)
            );
            assert_eq!(arguments.len(), 6);

            let inputs: Vec<&Input> = arguments.iter().map(|a| spec.input(*a).unwrap()).collect();
            assert_eq!(
                inputs,
                vec![
                    &Input::Object(handles.admin_cap_id.clone()),
                    &Input::Object(handles.config_id.clone()),
                    &Input::Pure(PureValue::Strings(coins.clone())),
                    &Input::Pure(PureValue::U64(100)),
                    &Input::Pure(PureValue::Address(deployer.clone())),
                    &Input::Pure(PureValue::Addresses(vec![deployer.clone()])),
                ]
            );
        }
    }
}
