//! Tag storage operations for reading/writing per-entity tags.json files.

use super::types::{normalize_tags, Tag, TagError, TagsFile};
use super::TagStore;
use crate::manifest::read_manifest;
use crate::utils::get_entities_path;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Read the tag set of an entity from `.folio/entities/<id>/tags.json`.
/// Returns an empty list if the file doesn't exist.
pub async fn read_tags(store_path: &Path, entity_id: &str) -> Result<Vec<Tag>, TagError> {
    read_manifest(store_path).await?.ok_or(TagError::NotInitialized)?;

    let tags_path = get_entities_path(store_path).join(entity_id).join("tags.json");

    if !tags_path.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(&tags_path).await?;
    let tags_file: TagsFile = serde_json::from_str(&content)?;

    Ok(tags_file.tags)
}

/// Write an entity's tag set to `.folio/entities/<id>/tags.json`.
/// Tags are sorted by name (A-Z), then by value.
pub async fn write_tags(store_path: &Path, entity_id: &str, tags: &[Tag]) -> Result<(), TagError> {
    let entity_path = get_entities_path(store_path).join(entity_id);

    if !entity_path.exists() {
        return Err(TagError::EntityNotFound(entity_id.to_string()));
    }

    let mut sorted_tags = tags.to_vec();
    sorted_tags.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.value.cmp(&b.value)));

    let tags_file = TagsFile { tags: sorted_tags };

    let content = serde_json::to_string_pretty(&tags_file)?;
    fs::write(entity_path.join("tags.json"), content).await?;

    Ok(())
}

/// File-backed tag store writing per-entity tags.json files
#[derive(Debug, Clone)]
pub struct FsTagStore {
    store_path: PathBuf,
}

impl FsTagStore {
    #[must_use]
    pub fn new(store_path: impl Into<PathBuf>) -> Self {
        Self {
            store_path: store_path.into(),
        }
    }
}

#[async_trait]
impl TagStore for FsTagStore {
    async fn replace_tags(&self, entity_id: &str, tags: &[Tag]) -> Result<(), TagError> {
        read_manifest(&self.store_path)
            .await?
            .ok_or(TagError::NotInitialized)?;

        let normalized = normalize_tags(tags);
        write_tags(&self.store_path, entity_id, &normalized).await?;

        debug!("Replaced tags on entity {}: {} tags", entity_id, normalized.len());
        Ok(())
    }
}
