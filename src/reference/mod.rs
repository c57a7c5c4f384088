//! Cross-entity reference rewriting.
//!
//! When an entity's URL changes (a rename regenerates its slug), other
//! entities' Markdown may still point at the old URL. The reference updater
//! rewrites those links to the new URL.

mod updater;

pub use updater::FsReferenceUpdater;

use crate::entity::Entity;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error("Entity store error: {0}")]
    EntityStoreError(#[from] crate::entity::EntityStoreError),

    #[error("Invalid reference pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Collaborator contract for rewriting stored links after a URL change.
#[async_trait]
pub trait ReferenceUpdater {
    /// Rewrite every reference to `old_url` so it points at the entity's
    /// current URL. Returns the number of entities that were rewritten.
    async fn rewrite_references(
        &self,
        entity: &Entity,
        old_url: &str,
    ) -> Result<usize, ReferenceError>;
}
