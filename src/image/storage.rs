//! File-backed image storage.

use super::types::{Image, ImageError, ImageUpload};
use super::ImageStore;
use crate::manifest::read_manifest;
use crate::utils::{get_folio_path, get_images_path, now_iso};
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};
use uuid::Uuid;

/// Compute a short SHA-256 content hash for a data filename
fn short_content_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let digest = hex::encode(hasher.finalize());
    digest[..12].to_string()
}

/// Extract a safe file extension from an upload name.
/// Rejects names without a stem (e.g. `..`) or with path separators.
fn file_extension(file_name: &str) -> Result<String, ImageError> {
    if file_name.contains('/') || file_name.contains('\\') {
        return Err(ImageError::InvalidFileName(file_name.to_string()));
    }

    let path = Path::new(file_name);
    if path.file_stem().is_none_or(|s| s.is_empty()) {
        return Err(ImageError::InvalidFileName(file_name.to_string()));
    }

    Ok(path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_else(|| "bin".to_string()))
}

/// File-backed image store writing bytes plus a JSON metadata sidecar
#[derive(Debug, Clone)]
pub struct FsImageStore {
    store_path: PathBuf,
}

impl FsImageStore {
    #[must_use]
    pub fn new(store_path: impl Into<PathBuf>) -> Self {
        Self {
            store_path: store_path.into(),
        }
    }

    fn sidecar_path(&self, image: &Image) -> PathBuf {
        get_images_path(&self.store_path)
            .join(&image.category)
            .join(format!("{}.json", image.id))
    }

    /// Read a stored image's metadata sidecar
    pub async fn read_image(&self, category: &str, id: &str) -> Result<Option<Image>, ImageError> {
        let sidecar = get_images_path(&self.store_path)
            .join(category)
            .join(format!("{id}.json"));

        if !sidecar.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&sidecar).await?;
        Ok(Some(serde_json::from_str(&content)?))
    }
}

#[async_trait]
impl ImageStore for FsImageStore {
    async fn destroy_image(&self, image: Option<&Image>) -> Result<(), ImageError> {
        let Some(image) = image else {
            return Ok(());
        };

        let data_path = get_folio_path(&self.store_path).join(&image.path);
        if data_path.exists() {
            fs::remove_file(&data_path).await?;
        }

        let sidecar = self.sidecar_path(image);
        if sidecar.exists() {
            fs::remove_file(&sidecar).await?;
        }

        debug!("Destroyed image {} ({})", image.id, image.name);
        Ok(())
    }

    async fn store_new(
        &self,
        upload: ImageUpload,
        category: &str,
        owner_id: &str,
        width: u32,
        height: u32,
        crop: bool,
    ) -> Result<Image, ImageError> {
        read_manifest(&self.store_path)
            .await?
            .ok_or(ImageError::NotInitialized)?;

        if upload.data.is_empty() {
            return Err(ImageError::EmptyUpload);
        }

        let extension = file_extension(&upload.file_name)?;
        let id = Uuid::new_v4().to_string();
        let hash = short_content_hash(&upload.data);

        let category_path = get_images_path(&self.store_path).join(category);
        fs::create_dir_all(&category_path).await?;

        let data_file = format!("{id}-{hash}.{extension}");
        fs::write(category_path.join(&data_file), &upload.data).await?;

        let image = Image {
            id: id.clone(),
            name: upload.file_name,
            path: format!("images/{category}/{data_file}"),
            category: category.to_string(),
            owned_by: owner_id.to_string(),
            width,
            height,
            cropped: crop,
            created_at: now_iso(),
        };

        let sidecar_content = serde_json::to_string_pretty(&image)?;
        fs::write(category_path.join(format!("{id}.json")), sidecar_content).await?;

        info!("Stored image {} as {}x{} in {}", image.name, width, height, category);
        Ok(image)
    }
}

#[cfg(test)]
#[path = "storage_tests.rs"]
mod tests;
