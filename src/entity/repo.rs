//! CRUD orchestration over the collaborator set.
//!
//! `EntityRepo` composes the entity store, tag store, image store and
//! reference updater into the create/update/cover-image sequences. It holds
//! no state of its own and performs no recovery: every failure propagates to
//! the caller, and side effects applied before a failure remain applied.

use super::storage::{EntityStore, EntityStoreError};
use super::types::{Entity, EntityInput};
use crate::actor::Actor;
use crate::config::{read_config, ConfigError};
use crate::image::{ImageError, ImageStore, ImageUpload};
use crate::reference::{ReferenceError, ReferenceUpdater};
use crate::tag::{TagError, TagStore};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Storage category for entity cover images
pub const COVER_CATEGORY: &str = "cover";

/// Default square dimension for stored cover images
pub const DEFAULT_COVER_IMAGE_SIZE: u32 = 512;

#[derive(Error, Debug)]
pub enum RepoError {
    #[error("Entity store error: {0}")]
    Store(#[from] EntityStoreError),

    #[error("Tag error: {0}")]
    Tag(#[from] TagError),

    #[error("Image upload error: {0}")]
    ImageUpload(#[from] ImageError),

    #[error("Reference error: {0}")]
    Reference(#[from] ReferenceError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// A cover-image mutation. Replacing and removing are mutually exclusive at
/// the call boundary, so a single call can never destroy the image it just
/// stored.
#[derive(Debug, Clone)]
pub enum CoverImageChange {
    /// Replace the cover with the uploaded image
    Set(ImageUpload),
    /// Destroy the cover and clear the entity's reference
    Remove,
}

/// CRUD orchestration layer for entities.
///
/// Collaborators are trait parameters so file-backed production backends and
/// in-memory test fakes plug into the same sequences.
#[derive(Debug, Clone)]
pub struct EntityRepo<S, T, I, R> {
    store: S,
    tags: T,
    images: I,
    references: R,
    cover_image_size: u32,
}

impl<S, T, I, R> EntityRepo<S, T, I, R>
where
    S: EntityStore + Send + Sync,
    T: TagStore + Send + Sync,
    I: ImageStore + Send + Sync,
    R: ReferenceUpdater + Send + Sync,
{
    #[must_use]
    pub fn new(store: S, tags: T, images: I, references: R) -> Self {
        Self {
            store,
            tags,
            images,
            references,
            cover_image_size: DEFAULT_COVER_IMAGE_SIZE,
        }
    }

    /// Override the stored cover image dimension
    #[must_use]
    pub fn with_cover_image_size(mut self, size: u32) -> Self {
        self.cover_image_size = size;
        self
    }

    /// Create a new entity in the store.
    ///
    /// Applies user-supplied fields, stamps authorship from the actor,
    /// regenerates the slug, persists, replaces tags when supplied, reloads
    /// to capture store-computed state, then rebuilds permissions and the
    /// search index.
    pub async fn create(
        &self,
        entity: &mut Entity,
        input: &EntityInput,
        actor: &Actor,
    ) -> Result<(), RepoError> {
        entity.fill(input);
        entity.assign_authorship(actor);
        entity.refresh_slug();
        self.store.save(entity).await?;

        if let Some(ref tags) = input.tags {
            self.tags.replace_tags(&entity.id, tags).await?;
        }

        self.store.reload(entity).await?;
        self.store.rebuild_permissions(entity).await?;
        self.store.index_for_search(entity).await?;

        info!("Created {} {} ({})", entity.kind, entity.id, entity.slug);
        Ok(())
    }

    /// Update an existing entity.
    ///
    /// The slug regenerates only when the name actually changed, so the URL
    /// stays stable across content-only edits. A URL change triggers one
    /// reference rewrite pass with the old URL.
    pub async fn update(
        &self,
        entity: &mut Entity,
        input: &EntityInput,
        actor: &Actor,
    ) -> Result<(), RepoError> {
        let old_url = entity.url();
        let old_name = entity.name.clone();

        entity.fill(input);
        entity.stamp_updated_by(actor);

        if entity.name != old_name {
            entity.refresh_slug();
        }

        entity.touch();
        self.store.save(entity).await?;

        if let Some(ref tags) = input.tags {
            self.tags.replace_tags(&entity.id, tags).await?;
            // Force-touch so consumers observe a change even when no other
            // field moved
            entity.touch();
            self.store.save(entity).await?;
        }

        self.store.rebuild_permissions(entity).await?;
        self.store.index_for_search(entity).await?;

        if entity.url() != old_url {
            self.references.rewrite_references(entity, &old_url).await?;
        }

        info!("Updated {} {} ({})", entity.kind, entity.id, entity.slug);
        Ok(())
    }

    /// Replace or remove the entity's cover image.
    ///
    /// Setting destroys the previous image (if any), stores the upload at
    /// the configured square dimension with cropping, and persists the new
    /// reference. Removing destroys the image and clears the reference.
    pub async fn update_cover_image(
        &self,
        entity: &mut Entity,
        change: CoverImageChange,
    ) -> Result<(), RepoError> {
        match change {
            CoverImageChange::Set(upload) => {
                self.images.destroy_image(entity.cover.as_ref()).await?;
                let image = self
                    .images
                    .store_new(
                        upload,
                        COVER_CATEGORY,
                        &entity.owned_by,
                        self.cover_image_size,
                        self.cover_image_size,
                        true,
                    )
                    .await?;
                entity.cover = Some(image);
                entity.touch();
                self.store.save(entity).await?;
                info!("Set cover image on {} {}", entity.kind, entity.id);
            }
            CoverImageChange::Remove => {
                self.images.destroy_image(entity.cover.as_ref()).await?;
                entity.cover = None;
                entity.touch();
                self.store.save(entity).await?;
                info!("Removed cover image from {} {}", entity.kind, entity.id);
            }
        }

        Ok(())
    }
}

/// An `EntityRepo` wired to the file-backed collaborators
pub type FsEntityRepo = EntityRepo<
    super::storage::FsEntityStore,
    crate::tag::FsTagStore,
    crate::image::FsImageStore,
    crate::reference::FsReferenceUpdater,
>;

/// Open a repo over the file-backed collaborators at the given store path,
/// applying the store config's cover image size when present.
pub async fn open_fs_repo(store_path: &Path) -> Result<FsEntityRepo, RepoError> {
    let config = read_config(store_path).await?.unwrap_or_default();

    Ok(EntityRepo::new(
        super::storage::FsEntityStore::new(store_path),
        crate::tag::FsTagStore::new(store_path),
        crate::image::FsImageStore::new(store_path),
        crate::reference::FsReferenceUpdater::new(store_path),
    )
    .with_cover_image_size(config.cover_image_size))
}

#[cfg(test)]
#[path = "repo_tests.rs"]
mod tests;
