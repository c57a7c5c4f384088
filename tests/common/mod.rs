//! Common test utilities

use folio_store::{init_store, Actor, Entity, EntityInput, EntityKind};
use std::path::Path;
use tempfile::TempDir;

/// Create a temporary directory for testing
pub fn create_test_dir() -> TempDir {
    try_init_tracing();
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Initialize a folio store in the given directory
pub async fn init_folio_store(store_path: &Path) {
    init_store(store_path)
        .await
        .expect("Failed to initialize folio store");
}

/// The acting identity used across integration tests
pub fn test_actor() -> Actor {
    Actor::new("user-1", "Robin")
}

/// A fresh entity plus the input that names it
#[allow(dead_code)] // Test utility for integration tests
pub fn named_input(kind: EntityKind, name: &str) -> (Entity, EntityInput) {
    let entity = Entity::new(kind);
    let input = EntityInput {
        name: Some(name.to_string()),
        ..EntityInput::default()
    };
    (entity, input)
}

fn try_init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}
