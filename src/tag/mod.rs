//! Entity tag management.
//!
//! Tags are key/value pairs owned by their entity and stored in
//! `.folio/entities/<id>/tags.json`. Supplying tags on create or update
//! replaces the whole set; there is no merge.

mod storage;
mod types;

pub use storage::{read_tags, write_tags, FsTagStore};
pub use types::{normalize_tags, Tag, TagError, TagsFile};

use async_trait::async_trait;

/// Collaborator contract for wholesale tag replacement on an entity.
#[async_trait]
pub trait TagStore {
    /// Replace the entity's tag set with the given list.
    /// An empty list clears all tags.
    async fn replace_tags(&self, entity_id: &str, tags: &[Tag]) -> Result<(), TagError>;
}
