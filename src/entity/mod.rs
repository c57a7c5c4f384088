//! Entity management module.
//!
//! Entities are the content nodes of the store (books, chapters, pages).
//! `types` holds the record and its local capabilities, `storage` the
//! persistence capability set, `repo` the CRUD orchestration layer.

mod repo;
mod storage;
mod types;

pub use repo::{
    open_fs_repo, CoverImageChange, EntityRepo, FsEntityRepo, RepoError, COVER_CATEGORY,
    DEFAULT_COVER_IMAGE_SIZE,
};
pub use storage::{
    list_entity_ids, load_entity, write_entity_files, EntityStore, EntityStoreError, FsEntityStore,
};
pub use types::{Entity, EntityInput, EntityKind, EntityMetadata};
