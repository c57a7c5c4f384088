//! Access-permission state derived from entity ownership.
//!
//! `.folio/permissions.json` holds one row per (entity, role). A rebuild
//! replaces all rows for the entity: the owner gets full access, each
//! configured viewer role gets view-only access.

use crate::config::read_config;
use crate::entity::Entity;
use crate::manifest::read_manifest;
use crate::utils::get_permissions_path;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tokio::fs;
use tracing::debug;

/// Role name for the entity owner's full-access row
pub const OWNER_ROLE: &str = "owner";

#[derive(Error, Debug)]
pub enum PermissionError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Manifest error: {0}")]
    ManifestError(#[from] crate::manifest::ManifestError),

    #[error("Config error: {0}")]
    ConfigError(#[from] crate::config::ConfigError),

    #[error("Store not initialized")]
    NotInitialized,
}

/// One computed permission row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct JointPermission {
    pub entity_id: String,
    pub role: String,
    pub owned_by: String,
    pub can_view: bool,
    pub can_edit: bool,
}

/// The permissions.json file structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PermissionsFile {
    #[serde(default)]
    pub permissions: Vec<JointPermission>,
}

/// Read all permission rows. Returns an empty set if the file doesn't exist.
pub async fn read_permissions(store_path: &Path) -> Result<Vec<JointPermission>, PermissionError> {
    read_manifest(store_path)
        .await?
        .ok_or(PermissionError::NotInitialized)?;

    let permissions_path = get_permissions_path(store_path);

    if !permissions_path.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(&permissions_path).await?;
    let file: PermissionsFile = serde_json::from_str(&content)?;
    Ok(file.permissions)
}

async fn write_permissions(
    store_path: &Path,
    permissions: Vec<JointPermission>,
) -> Result<(), PermissionError> {
    let file = PermissionsFile { permissions };
    let content = serde_json::to_string_pretty(&file)?;
    fs::write(get_permissions_path(store_path), content).await?;
    Ok(())
}

/// Recompute and persist the permission rows for an entity.
///
/// Replaces every existing row for the entity. Viewer roles come from the
/// store config; an absent config means owner-only access.
pub async fn rebuild_for_entity(store_path: &Path, entity: &Entity) -> Result<(), PermissionError> {
    let mut permissions = read_permissions(store_path).await?;
    permissions.retain(|p| p.entity_id != entity.id);

    permissions.push(JointPermission {
        entity_id: entity.id.clone(),
        role: OWNER_ROLE.to_string(),
        owned_by: entity.owned_by.clone(),
        can_view: true,
        can_edit: true,
    });

    let config = read_config(store_path).await?.unwrap_or_default();
    for role in &config.viewer_roles {
        permissions.push(JointPermission {
            entity_id: entity.id.clone(),
            role: role.clone(),
            owned_by: entity.owned_by.clone(),
            can_view: true,
            can_edit: false,
        });
    }

    write_permissions(store_path, permissions).await?;

    debug!("Rebuilt permissions for entity {}", entity.id);
    Ok(())
}

/// Read the permission rows of a single entity
pub async fn permissions_for_entity(
    store_path: &Path,
    entity_id: &str,
) -> Result<Vec<JointPermission>, PermissionError> {
    let permissions = read_permissions(store_path).await?;
    Ok(permissions
        .into_iter()
        .filter(|p| p.entity_id == entity_id)
        .collect())
}

#[cfg(test)]
#[path = "permission_tests.rs"]
mod tests;
