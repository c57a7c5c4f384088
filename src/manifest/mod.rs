//! Store manifest handling.
//!
//! Every folio store carries a `.folio/manifest.json` marker. Operations on a
//! path without one fail with their module's `NotInitialized` error.

use crate::utils::{
    get_entities_path, get_folio_path, get_images_path, get_manifest_path, now_iso, FOLIO_VERSION,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tokio::fs;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to read manifest: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse manifest: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// The .folio/manifest.json file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolioManifest {
    pub schema_version: u32,
    pub folio_version: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Read the manifest from the store path.
/// Returns `None` if the store has not been initialized.
pub async fn read_manifest(store_path: &Path) -> Result<Option<FolioManifest>, ManifestError> {
    let manifest_path = get_manifest_path(store_path);

    if !manifest_path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&manifest_path).await?;
    let manifest: FolioManifest = serde_json::from_str(&content)?;
    Ok(Some(manifest))
}

/// Write the manifest to the store path
pub async fn write_manifest(
    store_path: &Path,
    manifest: &FolioManifest,
) -> Result<(), ManifestError> {
    let manifest_path = get_manifest_path(store_path);
    let content = serde_json::to_string_pretty(manifest)?;
    fs::write(&manifest_path, content).await?;
    Ok(())
}

/// Create a new empty manifest
#[must_use]
pub fn create_manifest() -> FolioManifest {
    let now = now_iso();
    FolioManifest {
        schema_version: 1,
        folio_version: FOLIO_VERSION.to_string(),
        created_at: now.clone(),
        updated_at: now,
    }
}

/// Update the manifest timestamp
pub fn update_manifest_timestamp(manifest: &mut FolioManifest) {
    manifest.updated_at = now_iso();
}

/// Initialize a folio store at the given path.
///
/// Creates the `.folio` folder structure and writes a fresh manifest. If a
/// manifest already exists it is returned unchanged.
pub async fn init_store(store_path: &Path) -> Result<FolioManifest, ManifestError> {
    if let Some(existing) = read_manifest(store_path).await? {
        return Ok(existing);
    }

    fs::create_dir_all(get_folio_path(store_path)).await?;
    fs::create_dir_all(get_entities_path(store_path)).await?;
    fs::create_dir_all(get_images_path(store_path)).await?;

    let manifest = create_manifest();
    write_manifest(store_path, &manifest).await?;

    Ok(manifest)
}

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod tests;
