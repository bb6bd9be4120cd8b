//! Type conversion utilities for Sui.
//!
//! ## Conversion Categories
//!
//! 1. **Identifiers**: ObjectId ↔ Sui ObjectID, Address ↔ SuiAddress
//! 2. **Transactions**: TransactionSpec → ProgrammableTransaction
//! 3. **Results**: Sui object changes → chain-agnostic ObjectChange

use std::collections::HashMap;

use deployer_core::{
    Address, Argument, ChangeKind, Command, DeployError, Input, ObjectChange, ObjectId, PureValue,
    Result, TransactionSpec, TxDigest,
};
use sui_json_rpc_types::ObjectChange as SuiObjectChange;
use sui_types::Identifier;
use sui_types::base_types::{ObjectID, SuiAddress};
use sui_types::programmable_transaction_builder::ProgrammableTransactionBuilder;
use sui_types::transaction::{
    Argument as SuiArgument, CallArg, Command as SuiCommand, ObjectArg, ProgrammableTransaction,
};

// ============================================================================
// Identifier Conversions
// ============================================================================

/// Parse a hex object ID, with or without `0x`, short forms allowed (`0x2`).
pub fn parse_object_id(id: &str) -> Result<ObjectID> {
    let hex_str = id.strip_prefix("0x").unwrap_or(id);
    if hex_str.is_empty() || hex_str.len() > ObjectID::LENGTH * 2 {
        return Err(DeployError::InvalidArgument(format!(
            "Invalid object ID '{}': expected up to {} hex characters",
            id,
            ObjectID::LENGTH * 2
        )));
    }

    // Left-pad short literals such as 0x2
    let padded = format!("{:0>64}", hex_str);
    let bytes = hex::decode(&padded)
        .map_err(|e| DeployError::InvalidArgument(format!("Invalid object ID '{}': {}", id, e)))?;

    let mut array = [0u8; ObjectID::LENGTH];
    array.copy_from_slice(&bytes);
    Ok(ObjectID::new(array))
}

/// Parse a hex Sui address.
pub fn parse_address(address: &Address) -> Result<SuiAddress> {
    parse_object_id(address.as_str()).map(SuiAddress::from)
}

/// Chain-agnostic ID of a Sui object.
pub fn object_id(id: &ObjectID) -> ObjectId {
    ObjectId::new(id.to_string())
}

// ============================================================================
// Transaction Conversion
// ============================================================================

/// Convert a [`TransactionSpec`] into a programmable transaction.
///
/// `objects` must hold a resolved [`ObjectArg`] for every `Input::Object` in
/// the transaction; the client fetches them before calling this.
pub fn to_programmable(
    spec: &TransactionSpec,
    objects: &HashMap<ObjectId, ObjectArg>,
) -> Result<ProgrammableTransaction> {
    let mut ptb = ProgrammableTransactionBuilder::new();

    let inputs = spec
        .inputs()
        .iter()
        .map(|input| match input {
            Input::Pure(value) => pure(&mut ptb, value),
            Input::Object(id) => {
                let object_arg = objects.get(id).ok_or_else(|| {
                    DeployError::InvalidArgument(format!("Object {} was not resolved", id))
                })?;
                ptb.input(CallArg::Object(object_arg.clone())).map_err(invalid)
            }
        })
        .collect::<Result<Vec<_>>>()?;

    let mut results: Vec<SuiArgument> = Vec::with_capacity(spec.commands().len());
    for command in spec.commands() {
        let arg = |argument: &Argument| -> Result<SuiArgument> {
            let found = match *argument {
                Argument::Input(index) => inputs.get(index as usize),
                Argument::Result(index) => results.get(index as usize),
            };
            found.copied().ok_or_else(|| {
                DeployError::InvalidArgument(format!("Dangling argument {:?}", argument))
            })
        };

        let result = match command {
            Command::Publish {
                modules,
                dependencies,
            } => {
                let dep_ids = dependencies
                    .iter()
                    .map(|dependency| parse_object_id(dependency.as_str()))
                    .collect::<Result<Vec<_>>>()?;
                ptb.publish_upgradeable(modules.clone(), dep_ids)
            }
            Command::TransferObjects {
                objects: transferred,
                recipient,
            } => {
                let transferred = transferred.iter().map(&arg).collect::<Result<Vec<_>>>()?;
                let recipient = arg(recipient)?;
                ptb.command(SuiCommand::TransferObjects(transferred, recipient))
            }
            Command::MoveCall { target, arguments } => {
                let call_args = arguments.iter().map(&arg).collect::<Result<Vec<_>>>()?;
                ptb.programmable_move_call(
                    parse_object_id(target.package.as_str())?,
                    Identifier::new(target.module.as_str()).map_err(invalid)?,
                    Identifier::new(target.function.as_str()).map_err(invalid)?,
                    vec![], // No type arguments
                    call_args,
                )
            }
        };
        results.push(result);
    }

    Ok(ptb.finish())
}

fn pure(ptb: &mut ProgrammableTransactionBuilder, value: &PureValue) -> Result<SuiArgument> {
    match value {
        PureValue::Address(address) => ptb.pure(parse_address(address)?),
        PureValue::U64(number) => ptb.pure(*number),
        PureValue::Addresses(addresses) => ptb.pure(
            addresses
                .iter()
                .map(parse_address)
                .collect::<Result<Vec<_>>>()?,
        ),
        PureValue::Strings(strings) => ptb.pure(strings.clone()),
    }
    .map_err(invalid)
}

fn invalid(error: impl std::fmt::Display) -> DeployError {
    DeployError::InvalidArgument(error.to_string())
}

// ============================================================================
// Result Conversion
// ============================================================================

/// Convert a Sui object change.
///
/// Types are rendered canonically (full-length addresses) so they compare
/// equal to `<package_id>::<module>::<Type>` built from a displayed
/// [`ObjectID`].
pub fn object_change(change: &SuiObjectChange) -> ObjectChange {
    let (kind, object_id, object_type) = match change {
        SuiObjectChange::Published { package_id, .. } => {
            return ObjectChange::Published {
                package_id: object_id(package_id),
            };
        }
        SuiObjectChange::Created {
            object_id,
            object_type,
            ..
        } => (ChangeKind::Created, object_id, object_type),
        SuiObjectChange::Mutated {
            object_id,
            object_type,
            ..
        } => (ChangeKind::Mutated, object_id, object_type),
        SuiObjectChange::Transferred {
            object_id,
            object_type,
            ..
        } => (ChangeKind::Transferred, object_id, object_type),
        SuiObjectChange::Deleted {
            object_id,
            object_type,
            ..
        } => (ChangeKind::Deleted, object_id, object_type),
        SuiObjectChange::Wrapped {
            object_id,
            object_type,
            ..
        } => (ChangeKind::Wrapped, object_id, object_type),
    };

    ObjectChange::Object {
        kind,
        object_id: self::object_id(object_id),
        object_type: object_type.to_canonical_string(true),
    }
}

/// Convert the object changes of an executed transaction.
///
/// Changes are always requested, so a response without them is malformed.
pub fn object_changes(
    digest: &TxDigest,
    changes: Option<&[SuiObjectChange]>,
) -> Result<Vec<ObjectChange>> {
    let changes = changes.ok_or_else(|| {
        DeployError::SubmissionFailure(format!(
            "No object changes in response for transaction {}",
            digest
        ))
    })?;

    Ok(changes.iter().map(object_change).collect())
}
