use super::*;
use crate::config::{write_config, FolioConfig};
use crate::entity::EntityKind;
use crate::manifest::init_store;
use tempfile::tempdir;

fn owned_entity(owner: &str) -> Entity {
    let mut entity = Entity::new(EntityKind::Book);
    entity.name = "Owned Book".to_string();
    entity.refresh_slug();
    entity.owned_by = owner.to_string();
    entity
}

#[tokio::test]
async fn test_read_permissions_uninitialized() {
    let temp_dir = tempdir().expect("Should create temp dir");
    let result = read_permissions(temp_dir.path()).await;
    assert!(matches!(result, Err(PermissionError::NotInitialized)));
}

#[tokio::test]
async fn test_rebuild_creates_owner_row() {
    let temp_dir = tempdir().expect("Should create temp dir");
    let store_path = temp_dir.path();
    init_store(store_path).await.expect("Should init");

    let entity = owned_entity("user-1");
    rebuild_for_entity(store_path, &entity).await.expect("Should rebuild");

    let rows = permissions_for_entity(store_path, &entity.id)
        .await
        .expect("Should read");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].role, OWNER_ROLE);
    assert_eq!(rows[0].owned_by, "user-1");
    assert!(rows[0].can_view);
    assert!(rows[0].can_edit);
}

#[tokio::test]
async fn test_rebuild_adds_configured_viewer_roles() {
    let temp_dir = tempdir().expect("Should create temp dir");
    let store_path = temp_dir.path();
    init_store(store_path).await.expect("Should init");

    let config = FolioConfig {
        viewer_roles: vec!["editor".to_string(), "viewer".to_string()],
        ..FolioConfig::default()
    };
    write_config(store_path, &config).await.expect("Should write config");

    let entity = owned_entity("user-1");
    rebuild_for_entity(store_path, &entity).await.expect("Should rebuild");

    let rows = permissions_for_entity(store_path, &entity.id)
        .await
        .expect("Should read");
    assert_eq!(rows.len(), 3);

    let viewer = rows.iter().find(|r| r.role == "viewer").expect("viewer row");
    assert!(viewer.can_view);
    assert!(!viewer.can_edit);
}

#[tokio::test]
async fn test_rebuild_replaces_previous_rows() {
    let temp_dir = tempdir().expect("Should create temp dir");
    let store_path = temp_dir.path();
    init_store(store_path).await.expect("Should init");

    let mut entity = owned_entity("user-1");
    rebuild_for_entity(store_path, &entity).await.expect("Should rebuild");

    // Ownership changed; rebuild must replace, not accumulate
    entity.owned_by = "user-2".to_string();
    rebuild_for_entity(store_path, &entity).await.expect("Should rebuild");

    let rows = permissions_for_entity(store_path, &entity.id)
        .await
        .expect("Should read");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].owned_by, "user-2");
}

#[tokio::test]
async fn test_rebuild_leaves_other_entities_alone() {
    let temp_dir = tempdir().expect("Should create temp dir");
    let store_path = temp_dir.path();
    init_store(store_path).await.expect("Should init");

    let first = owned_entity("user-1");
    let second = owned_entity("user-2");
    rebuild_for_entity(store_path, &first).await.expect("Should rebuild");
    rebuild_for_entity(store_path, &second).await.expect("Should rebuild");

    let rows = read_permissions(store_path).await.expect("Should read");
    assert_eq!(rows.len(), 2);
}
