//! Store configuration read from `.folio/config.json`.

use crate::utils::get_config_path;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tokio::fs;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Default square dimension for stored cover images
fn default_cover_image_size() -> u32 {
    512
}

/// Folio store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolioConfig {
    /// Square dimension (width and height) cover images are stored at
    #[serde(default = "default_cover_image_size")]
    pub cover_image_size: u32,
    /// Roles granted view access on every permission rebuild,
    /// in addition to the entity owner
    #[serde(default)]
    pub viewer_roles: Vec<String>,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            cover_image_size: default_cover_image_size(),
            viewer_roles: Vec::new(),
        }
    }
}

/// Read the store config from `.folio/config.json`.
/// Returns `None` if no config file exists; callers fall back to defaults.
pub async fn read_config(store_path: &Path) -> Result<Option<FolioConfig>, ConfigError> {
    let config_path = get_config_path(store_path);

    if !config_path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&config_path).await?;
    let config: FolioConfig = serde_json::from_str(&content)?;
    Ok(Some(config))
}

/// Write the store config to `.folio/config.json`
pub async fn write_config(store_path: &Path, config: &FolioConfig) -> Result<(), ConfigError> {
    let config_path = get_config_path(store_path);
    let content = serde_json::to_string_pretty(config)?;
    fs::write(&config_path, content).await?;
    Ok(())
}
