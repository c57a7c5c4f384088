//! Full-text search indexing.
//!
//! The index lives in `.folio/search-index.json`: one entry per entity with
//! the lowercased terms of its name and body. `index_entity` upserts; queries
//! match entries containing every query term.

use crate::entity::Entity;
use crate::manifest::read_manifest;
use crate::utils::get_search_index_path;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tokio::fs;
use tracing::debug;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Manifest error: {0}")]
    ManifestError(#[from] crate::manifest::ManifestError),

    #[error("Store not initialized")]
    NotInitialized,
}

/// One indexed entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexEntry {
    pub entity_id: String,
    pub kind: String,
    pub name: String,
    pub slug: String,
    pub terms: Vec<String>,
    pub indexed_at: String,
}

/// The search-index.json file structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchIndexFile {
    #[serde(default)]
    pub entries: Vec<IndexEntry>,
}

/// Split text into lowercased alphanumeric terms, deduplicated and sorted
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    let mut terms: Vec<String> = text
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();
    terms.sort();
    terms.dedup();
    terms
}

/// Read the search index. Returns an empty index if the file doesn't exist.
pub async fn read_index(store_path: &Path) -> Result<SearchIndexFile, SearchError> {
    read_manifest(store_path)
        .await?
        .ok_or(SearchError::NotInitialized)?;

    let index_path = get_search_index_path(store_path);

    if !index_path.exists() {
        return Ok(SearchIndexFile::default());
    }

    let content = fs::read_to_string(&index_path).await?;
    Ok(serde_json::from_str(&content)?)
}

async fn write_index(store_path: &Path, index: &SearchIndexFile) -> Result<(), SearchError> {
    let content = serde_json::to_string_pretty(index)?;
    fs::write(get_search_index_path(store_path), content).await?;
    Ok(())
}

/// Upsert an entity's entry in the search index
pub async fn index_entity(store_path: &Path, entity: &Entity) -> Result<(), SearchError> {
    let mut index = read_index(store_path).await?;

    let mut terms = tokenize(&entity.name);
    terms.extend(tokenize(&entity.description));
    terms.sort();
    terms.dedup();

    let entry = IndexEntry {
        entity_id: entity.id.clone(),
        kind: entity.kind.to_string(),
        name: entity.name.clone(),
        slug: entity.slug.clone(),
        terms,
        indexed_at: crate::utils::now_iso(),
    };

    if let Some(existing) = index.entries.iter_mut().find(|e| e.entity_id == entity.id) {
        *existing = entry;
    } else {
        index.entries.push(entry);
    }

    write_index(store_path, &index).await?;

    debug!("Indexed entity {} ({})", entity.id, entity.name);
    Ok(())
}

/// Find ids of entities whose index entry contains every query term
pub async fn search_entities(store_path: &Path, query: &str) -> Result<Vec<String>, SearchError> {
    let index = read_index(store_path).await?;
    let query_terms = tokenize(query);

    if query_terms.is_empty() {
        return Ok(Vec::new());
    }

    Ok(index
        .entries
        .iter()
        .filter(|entry| {
            query_terms
                .iter()
                .all(|term| entry.terms.binary_search(term).is_ok())
        })
        .map(|entry| entry.entity_id.clone())
        .collect())
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
