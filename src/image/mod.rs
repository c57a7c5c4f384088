//! Image asset management.
//!
//! Images are stored under `.folio/images/<category>/` as raw bytes next to a
//! JSON metadata sidecar. Data filenames carry a short SHA-256 content hash so
//! re-uploads of identical bytes are recognizable on disk.

mod storage;
mod types;

pub use storage::FsImageStore;
pub use types::{Image, ImageError, ImageUpload};

use async_trait::async_trait;

/// Collaborator contract for image asset storage.
#[async_trait]
pub trait ImageStore {
    /// Destroy a stored image and its metadata. `None` is a no-op, so callers
    /// can pass an entity's cover reference without checking it first.
    async fn destroy_image(&self, image: Option<&Image>) -> Result<(), ImageError>;

    /// Store a new uploaded image under the given category, recording the
    /// requested geometry.
    async fn store_new(
        &self,
        upload: ImageUpload,
        category: &str,
        owner_id: &str,
        width: u32,
        height: u32,
        crop: bool,
    ) -> Result<Image, ImageError>;
}
