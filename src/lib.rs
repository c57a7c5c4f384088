//! folio-store: a file-based content store for books, chapters and pages.
//!
//! Content lives under a `.folio/` folder as Markdown files with JSON
//! metadata sidecars. The [`EntityRepo`] orchestration layer composes four
//! collaborators behind trait seams: an entity store, a tag store, an image
//! store and a reference updater. File-backed implementations of each ship
//! with the crate; tests substitute in-memory fakes through the same traits.
//!
//! ```no_run
//! use folio_store::{init_store, open_fs_repo, Actor, Entity, EntityInput, EntityKind};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let store_path = std::path::Path::new("/tmp/library");
//! init_store(store_path).await?;
//!
//! let repo = open_fs_repo(store_path).await?;
//! let actor = Actor::new("user-1", "Robin");
//!
//! let mut book = Entity::new(EntityKind::Book);
//! let input = EntityInput {
//!     name: Some("Field Guide".to_string()),
//!     ..EntityInput::default()
//! };
//! repo.create(&mut book, &input, &actor).await?;
//! assert_eq!(book.url(), "/books/field-guide");
//! # Ok(())
//! # }
//! ```

pub mod actor;
pub mod config;
pub mod entity;
pub mod image;
pub mod manifest;
pub mod permission;
pub mod reference;
pub mod search;
pub mod tag;
pub mod utils;

// Re-export commonly used types
pub use actor::Actor;
pub use config::{read_config, write_config, ConfigError, FolioConfig};
pub use entity::{
    list_entity_ids, load_entity, open_fs_repo, CoverImageChange, Entity, EntityInput, EntityKind,
    EntityRepo, EntityStore, EntityStoreError, FsEntityRepo, FsEntityStore, RepoError,
};
pub use image::{FsImageStore, Image, ImageError, ImageStore, ImageUpload};
pub use manifest::{init_store, read_manifest, FolioManifest, ManifestError};
pub use permission::{
    permissions_for_entity, read_permissions, JointPermission, PermissionError, OWNER_ROLE,
};
pub use reference::{FsReferenceUpdater, ReferenceError, ReferenceUpdater};
pub use search::{search_entities, IndexEntry, SearchError};
pub use tag::{read_tags, FsTagStore, Tag, TagError, TagStore};
