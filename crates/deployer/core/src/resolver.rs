//! Extraction of deployment handles from a publish result.
//!
//! Every handle must match exactly one object change. A plain "find first"
//! over the change list would silently accept duplicates, so both zero and
//! multiple matches are errors here.

use crate::contract::DeployedObject;
use crate::error::{DeployError, Result};
use crate::types::{ExecutionResult, ObjectChange, ObjectId, ResolvedDeploymentHandles};

/// Resolve the package ID and every [`DeployedObject`] from `result`.
///
/// # Errors
///
/// Returns `ResolutionError` naming the first handle that does not match
/// exactly one object change.
pub fn resolve(result: &ExecutionResult) -> Result<ResolvedDeploymentHandles> {
    let package_id = unique(
        "packageId",
        result.object_changes.iter().filter_map(|change| match change {
            ObjectChange::Published { package_id } => Some(package_id),
            ObjectChange::Object { .. } => None,
        }),
    )?;

    let find = |object: DeployedObject| -> Result<ObjectId> {
        let object_type = object.object_type(&package_id);
        unique(
            &object.to_string(),
            result.object_changes.iter().filter_map(|change| match change {
                ObjectChange::Object {
                    object_id,
                    object_type: candidate,
                    ..
                } if *candidate == object_type => Some(object_id),
                _ => None,
            }),
        )
    };

    let handles = ResolvedDeploymentHandles {
        admin_cap_id: find(DeployedObject::AdminCap)?,
        attendance_config_id: find(DeployedObject::AttendanceConfig)?,
        nft_repository_id: find(DeployedObject::NftRepository)?,
        config_id: find(DeployedObject::Config)?,
        exchange_rate_id: find(DeployedObject::ExchangeRate)?,
        operator_cap_id: find(DeployedObject::OperatorCap)?,
        package_id,
    };

    tracing::debug!("Resolved deployment handles: {:?}", handles);
    Ok(handles)
}

fn unique<'a>(handle: &str, mut matches: impl Iterator<Item = &'a ObjectId>) -> Result<ObjectId> {
    let first = matches.next();
    let rest = matches.count();

    match first {
        Some(id) if rest == 0 && !id.as_str().is_empty() => Ok(id.clone()),
        Some(_) if rest == 0 => Err(DeployError::ResolutionError {
            handle: format!("{} (empty identifier)", handle),
            found: 1,
        }),
        _ => Err(DeployError::ResolutionError {
            handle: handle.to_string(),
            found: first.map_or(0, |_| 1 + rest),
        }),
    }
}
