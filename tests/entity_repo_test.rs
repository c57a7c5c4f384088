#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{create_test_dir, init_folio_store, named_input, test_actor};
use folio_store::{
    load_entity, open_fs_repo, read_tags, Entity, EntityInput, EntityKind, Tag,
};

// ============ Create ============

#[tokio::test]
async fn test_create_persists_entity_with_derived_slug() {
    let temp_dir = create_test_dir();
    let store_path = temp_dir.path();
    init_folio_store(store_path).await;

    let repo = open_fs_repo(store_path).await.expect("Should open repo");
    let (mut book, input) = named_input(EntityKind::Book, "Field Guide");

    repo.create(&mut book, &input, &test_actor())
        .await
        .expect("Should create");

    assert_eq!(book.slug, "field-guide");
    assert!(!book.slug.is_empty());

    let loaded = load_entity(store_path, &book.id).await.expect("Should load");
    assert_eq!(loaded.name, "Field Guide");
    assert_eq!(loaded.slug, "field-guide");
    assert_eq!(loaded.url(), "/books/field-guide");
}

#[tokio::test]
async fn test_create_stamps_actor_identity() {
    let temp_dir = create_test_dir();
    let store_path = temp_dir.path();
    init_folio_store(store_path).await;

    let repo = open_fs_repo(store_path).await.expect("Should open repo");
    let (mut page, input) = named_input(EntityKind::Page, "Welcome");

    repo.create(&mut page, &input, &test_actor())
        .await
        .expect("Should create");

    let loaded = load_entity(store_path, &page.id).await.expect("Should load");
    assert_eq!(loaded.created_by, "user-1");
    assert_eq!(loaded.updated_by, "user-1");
    assert_eq!(loaded.owned_by, "user-1");
}

#[tokio::test]
async fn test_create_with_tags_replaces_tag_set() {
    let temp_dir = create_test_dir();
    let store_path = temp_dir.path();
    init_folio_store(store_path).await;

    let repo = open_fs_repo(store_path).await.expect("Should open repo");
    let mut book = Entity::new(EntityKind::Book);
    let input = EntityInput {
        name: Some("Tagged".to_string()),
        tags: Some(vec![Tag::new("genre", "fiction"), Tag::new("shelf", "top")]),
        ..EntityInput::default()
    };

    repo.create(&mut book, &input, &test_actor())
        .await
        .expect("Should create");

    let tags = read_tags(store_path, &book.id).await.expect("Should read tags");
    assert_eq!(tags, vec![Tag::new("genre", "fiction"), Tag::new("shelf", "top")]);
}

#[tokio::test]
async fn test_create_reload_captures_deduplicated_slug() {
    let temp_dir = create_test_dir();
    let store_path = temp_dir.path();
    init_folio_store(store_path).await;

    let repo = open_fs_repo(store_path).await.expect("Should open repo");

    let (mut first, input) = named_input(EntityKind::Book, "Intro");
    repo.create(&mut first, &input, &test_actor())
        .await
        .expect("Should create");

    let (mut second, input) = named_input(EntityKind::Book, "Intro");
    repo.create(&mut second, &input, &test_actor())
        .await
        .expect("Should create");

    // The store suffixed the slug; reload brought it back onto the entity
    assert_eq!(first.slug, "intro");
    assert_eq!(second.slug, "intro-2");
}

// ============ Update ============

#[tokio::test]
async fn test_update_unchanged_name_keeps_slug() {
    let temp_dir = create_test_dir();
    let store_path = temp_dir.path();
    init_folio_store(store_path).await;

    let repo = open_fs_repo(store_path).await.expect("Should open repo");
    let (mut page, input) = named_input(EntityKind::Page, "Contact");
    repo.create(&mut page, &input, &test_actor())
        .await
        .expect("Should create");

    let input = EntityInput {
        description: Some("Mail us.".to_string()),
        ..EntityInput::default()
    };
    repo.update(&mut page, &input, &test_actor())
        .await
        .expect("Should update");

    assert_eq!(page.slug, "contact");
    let loaded = load_entity(store_path, &page.id).await.expect("Should load");
    assert_eq!(loaded.description, "Mail us.");
    assert_eq!(loaded.slug, "contact");
}

#[tokio::test]
async fn test_update_changed_name_changes_slug() {
    let temp_dir = create_test_dir();
    let store_path = temp_dir.path();
    init_folio_store(store_path).await;

    let repo = open_fs_repo(store_path).await.expect("Should open repo");
    let (mut page, input) = named_input(EntityKind::Page, "Contact");
    repo.create(&mut page, &input, &test_actor())
        .await
        .expect("Should create");
    let old_slug = page.slug.clone();

    let input = EntityInput {
        name: Some("Contact Us".to_string()),
        ..EntityInput::default()
    };
    repo.update(&mut page, &input, &test_actor())
        .await
        .expect("Should update");

    assert_eq!(page.slug, "contact-us");
    assert_ne!(page.slug, old_slug);
}

#[tokio::test]
async fn test_update_stamps_updater_keeps_creator() {
    let temp_dir = create_test_dir();
    let store_path = temp_dir.path();
    init_folio_store(store_path).await;

    let repo = open_fs_repo(store_path).await.expect("Should open repo");
    let (mut page, input) = named_input(EntityKind::Page, "History");
    repo.create(&mut page, &input, &test_actor())
        .await
        .expect("Should create");

    let editor = folio_store::Actor::new("user-2", "Sam");
    repo.update(&mut page, &EntityInput::default(), &editor)
        .await
        .expect("Should update");

    let loaded = load_entity(store_path, &page.id).await.expect("Should load");
    assert_eq!(loaded.created_by, "user-1");
    assert_eq!(loaded.owned_by, "user-1");
    assert_eq!(loaded.updated_by, "user-2");
}

#[tokio::test]
async fn test_update_with_tags_replaces_wholesale() {
    let temp_dir = create_test_dir();
    let store_path = temp_dir.path();
    init_folio_store(store_path).await;

    let repo = open_fs_repo(store_path).await.expect("Should open repo");
    let mut book = Entity::new(EntityKind::Book);
    let input = EntityInput {
        name: Some("Tagged".to_string()),
        tags: Some(vec![Tag::new("a", "1"), Tag::new("b", "2")]),
        ..EntityInput::default()
    };
    repo.create(&mut book, &input, &test_actor())
        .await
        .expect("Should create");

    let input = EntityInput {
        tags: Some(vec![Tag::new("c", "3")]),
        ..EntityInput::default()
    };
    repo.update(&mut book, &input, &test_actor())
        .await
        .expect("Should update");

    let tags = read_tags(store_path, &book.id).await.expect("Should read tags");
    assert_eq!(tags, vec![Tag::new("c", "3")]);
}

#[tokio::test]
async fn test_update_with_tags_force_touches_timestamp() {
    let temp_dir = create_test_dir();
    let store_path = temp_dir.path();
    init_folio_store(store_path).await;

    let repo = open_fs_repo(store_path).await.expect("Should open repo");
    let (mut book, input) = named_input(EntityKind::Book, "Touched");
    repo.create(&mut book, &input, &test_actor())
        .await
        .expect("Should create");
    let created_stamp = book.updated_at.clone();

    let input = EntityInput {
        tags: Some(vec![Tag::new("only", "tags")]),
        ..EntityInput::default()
    };
    repo.update(&mut book, &input, &test_actor())
        .await
        .expect("Should update");

    let loaded = load_entity(store_path, &book.id).await.expect("Should load");
    assert_ne!(loaded.updated_at, created_stamp);
}

// ============ Reference rewriting ============

#[tokio::test]
async fn test_rename_rewrites_references_in_other_entities() {
    let temp_dir = create_test_dir();
    let store_path = temp_dir.path();
    init_folio_store(store_path).await;

    let repo = open_fs_repo(store_path).await.expect("Should open repo");

    // The concrete scenario: "Intro" with slug "intro", linked from a page
    let (mut intro, input) = named_input(EntityKind::Book, "Intro");
    repo.create(&mut intro, &input, &test_actor())
        .await
        .expect("Should create");
    assert_eq!(intro.url(), "/books/intro");

    let mut linking = Entity::new(EntityKind::Page);
    let input = EntityInput {
        name: Some("Reading List".to_string()),
        description: Some("Start with [the intro](/books/intro).".to_string()),
        ..EntityInput::default()
    };
    repo.create(&mut linking, &input, &test_actor())
        .await
        .expect("Should create");

    let input = EntityInput {
        name: Some("Introduction".to_string()),
        ..EntityInput::default()
    };
    repo.update(&mut intro, &input, &test_actor())
        .await
        .expect("Should update");

    assert_eq!(intro.slug, "introduction");
    assert_eq!(intro.url(), "/books/introduction");

    let loaded = load_entity(store_path, &linking.id).await.expect("Should load");
    assert_eq!(loaded.description, "Start with [the intro](/books/introduction).");
}

#[tokio::test]
async fn test_unchanged_url_leaves_references_alone() {
    let temp_dir = create_test_dir();
    let store_path = temp_dir.path();
    init_folio_store(store_path).await;

    let repo = open_fs_repo(store_path).await.expect("Should open repo");

    let (mut intro, input) = named_input(EntityKind::Book, "Intro");
    repo.create(&mut intro, &input, &test_actor())
        .await
        .expect("Should create");

    let mut linking = Entity::new(EntityKind::Page);
    let input = EntityInput {
        name: Some("Reading List".to_string()),
        description: Some("Start with [the intro](/books/intro).".to_string()),
        ..EntityInput::default()
    };
    repo.create(&mut linking, &input, &test_actor())
        .await
        .expect("Should create");
    let linked_stamp = load_entity(store_path, &linking.id)
        .await
        .expect("Should load")
        .updated_at;

    // Content-only edit, URL unchanged
    let input = EntityInput {
        description: Some("A fresh body.".to_string()),
        ..EntityInput::default()
    };
    repo.update(&mut intro, &input, &test_actor())
        .await
        .expect("Should update");

    let loaded = load_entity(store_path, &linking.id).await.expect("Should load");
    assert_eq!(loaded.description, "Start with [the intro](/books/intro).");
    assert_eq!(loaded.updated_at, linked_stamp);
}
