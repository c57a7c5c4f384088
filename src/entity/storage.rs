//! Entity persistence and derived-state capabilities.
//!
//! Each entity lives in `.folio/entities/<uuid>/` as `entity.md` (name as the
//! heading, description as the body) plus a `metadata.json` sidecar.

use super::types::{Entity, EntityMetadata};
use crate::manifest::read_manifest;
use crate::utils::get_entities_path;
use crate::{permission, search};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::debug;

#[derive(Error, Debug)]
pub enum EntityStoreError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Manifest error: {0}")]
    ManifestError(#[from] crate::manifest::ManifestError),

    #[error("Store not initialized")]
    NotInitialized,

    #[error("Entity {0} not found")]
    EntityNotFound(String),

    #[error("Invalid entity format: {0}")]
    InvalidEntityFormat(String),

    #[error("Search error: {0}")]
    SearchError(#[from] search::SearchError),

    #[error("Permission error: {0}")]
    PermissionError(#[from] permission::PermissionError),
}

/// The entity capability set: persistence plus derived state.
/// Slug uniqueness within a kind is enforced by implementations of `save`.
#[async_trait]
pub trait EntityStore {
    /// Persist the entity. May adjust the slug to keep it unique within the
    /// entity's kind, which is why the entity is taken mutably.
    async fn save(&self, entity: &mut Entity) -> Result<(), EntityStoreError>;

    /// Re-read the persisted record by id, capturing store-computed state
    async fn reload(&self, entity: &mut Entity) -> Result<(), EntityStoreError>;

    /// Recompute and persist access-permission state for the entity
    async fn rebuild_permissions(&self, entity: &Entity) -> Result<(), EntityStoreError>;

    /// Submit the entity to the search index
    async fn index_for_search(&self, entity: &Entity) -> Result<(), EntityStoreError>;
}

/// Generate the entity.md content
fn generate_entity_md(name: &str, description: &str) -> String {
    if description.is_empty() {
        format!("# {name}\n")
    } else {
        format!("# {name}\n\n{description}\n")
    }
}

/// Parse entity.md content to extract name and description
fn parse_entity_md(content: &str) -> (String, String) {
    let lines: Vec<&str> = content.lines().collect();

    if lines.is_empty() {
        return (String::new(), String::new());
    }

    let mut name_idx = 0;
    for (idx, line) in lines.iter().enumerate() {
        if line.starts_with('#') {
            name_idx = idx;
            break;
        }
    }

    let name = lines
        .get(name_idx)
        .map(|line| line.strip_prefix('#').map_or(*line, str::trim))
        .unwrap_or("")
        .to_string();

    let description_lines: Vec<&str> = lines[(name_idx + 1)..]
        .iter()
        .skip_while(|line| line.is_empty())
        .copied()
        .collect();
    let description = description_lines.join("\n").trim_end().to_string();

    (name, description)
}

/// Read an entity from its folder on disk
pub async fn load_entity(store_path: &Path, entity_id: &str) -> Result<Entity, EntityStoreError> {
    read_manifest(store_path)
        .await?
        .ok_or(EntityStoreError::NotInitialized)?;

    let entity_path = get_entities_path(store_path).join(entity_id);
    let md_path = entity_path.join("entity.md");
    let metadata_path = entity_path.join("metadata.json");

    if !entity_path.exists() {
        return Err(EntityStoreError::EntityNotFound(entity_id.to_string()));
    }
    if !md_path.exists() || !metadata_path.exists() {
        return Err(EntityStoreError::InvalidEntityFormat(format!(
            "Entity {entity_id} is missing required files"
        )));
    }

    let md_content = fs::read_to_string(&md_path).await?;
    let (name, description) = parse_entity_md(&md_content);

    let metadata_content = fs::read_to_string(&metadata_path).await?;
    let metadata: EntityMetadata = serde_json::from_str(&metadata_content)?;

    Ok(metadata.into_entity(name, description))
}

/// List the ids of all stored entities
pub async fn list_entity_ids(store_path: &Path) -> Result<Vec<String>, EntityStoreError> {
    read_manifest(store_path)
        .await?
        .ok_or(EntityStoreError::NotInitialized)?;

    let entities_path = get_entities_path(store_path);

    if !entities_path.exists() {
        return Ok(Vec::new());
    }

    let mut ids = Vec::new();
    let mut entries = fs::read_dir(&entities_path).await?;

    while let Some(entry) = entries.next_entry().await? {
        if entry.file_type().await?.is_dir() {
            if let Some(folder_name) = entry.file_name().to_str() {
                ids.push(folder_name.to_string());
            }
        }
    }

    ids.sort();
    Ok(ids)
}

/// Write an entity's files into its folder, creating the folder if needed
pub async fn write_entity_files(store_path: &Path, entity: &Entity) -> Result<(), EntityStoreError> {
    let entity_path = get_entities_path(store_path).join(&entity.id);
    fs::create_dir_all(&entity_path).await?;

    let md_content = generate_entity_md(&entity.name, &entity.description);
    fs::write(entity_path.join("entity.md"), md_content).await?;

    let metadata = EntityMetadata::from_entity(entity);
    let metadata_content = serde_json::to_string_pretty(&metadata)?;
    fs::write(entity_path.join("metadata.json"), metadata_content).await?;

    Ok(())
}

/// File-backed entity store
#[derive(Debug, Clone)]
pub struct FsEntityStore {
    store_path: PathBuf,
}

impl FsEntityStore {
    #[must_use]
    pub fn new(store_path: impl Into<PathBuf>) -> Self {
        Self {
            store_path: store_path.into(),
        }
    }

    /// Adjust the entity's slug with a numeric suffix until it is unique
    /// among stored entities of the same kind.
    async fn ensure_unique_slug(&self, entity: &mut Entity) -> Result<(), EntityStoreError> {
        let mut taken = Vec::new();
        for id in list_entity_ids(&self.store_path).await? {
            if id == entity.id {
                continue;
            }
            match load_entity(&self.store_path, &id).await {
                Ok(other) if other.kind == entity.kind => taken.push(other.slug),
                Ok(_) => {}
                // Skip folders that can't be read
                Err(_) => {}
            }
        }

        if !taken.contains(&entity.slug) {
            return Ok(());
        }

        let base = entity.slug.clone();
        let mut suffix = 2u32;
        while taken.contains(&format!("{base}-{suffix}")) {
            suffix += 1;
        }
        entity.slug = format!("{base}-{suffix}");

        debug!("Slug collision on '{}', using '{}'", base, entity.slug);
        Ok(())
    }
}

#[async_trait]
impl EntityStore for FsEntityStore {
    async fn save(&self, entity: &mut Entity) -> Result<(), EntityStoreError> {
        read_manifest(&self.store_path)
            .await?
            .ok_or(EntityStoreError::NotInitialized)?;

        self.ensure_unique_slug(entity).await?;
        write_entity_files(&self.store_path, entity).await?;

        debug!("Saved entity {} ({})", entity.id, entity.slug);
        Ok(())
    }

    async fn reload(&self, entity: &mut Entity) -> Result<(), EntityStoreError> {
        *entity = load_entity(&self.store_path, &entity.id).await?;
        Ok(())
    }

    async fn rebuild_permissions(&self, entity: &Entity) -> Result<(), EntityStoreError> {
        permission::rebuild_for_entity(&self.store_path, entity).await?;
        Ok(())
    }

    async fn index_for_search(&self, entity: &Entity) -> Result<(), EntityStoreError> {
        search::index_entity(&self.store_path, entity).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "storage_tests.rs"]
mod tests;
