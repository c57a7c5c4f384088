//! Tag type definitions and error types.

use crate::manifest::ManifestError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A key/value tag attached to an entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    /// Tag name (key)
    pub name: String,
    /// Tag value; empty for bare tags
    #[serde(default)]
    pub value: String,
}

impl Tag {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// The tags.json file structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TagsFile {
    #[serde(default)]
    pub tags: Vec<Tag>,
}

/// Tag-related errors
#[derive(Error, Debug)]
pub enum TagError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Manifest error: {0}")]
    ManifestError(#[from] ManifestError),

    #[error("Store not initialized")]
    NotInitialized,

    #[error("Entity {0} not found")]
    EntityNotFound(String),
}

/// Normalize user-supplied tags: trim names and values, drop tags with
/// empty names.
#[must_use]
pub fn normalize_tags(tags: &[Tag]) -> Vec<Tag> {
    tags.iter()
        .filter_map(|tag| {
            let name = tag.name.trim();
            if name.is_empty() {
                return None;
            }
            Some(Tag::new(name, tag.value.trim()))
        })
        .collect()
}
