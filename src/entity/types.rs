//! Entity type definitions.

use crate::actor::Actor;
use crate::image::Image;
use crate::tag::Tag;
use crate::utils::{now_iso, slugify};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// The kind of content node an entity represents
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Book,
    Chapter,
    Page,
}

impl EntityKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Book => "book",
            Self::Chapter => "chapter",
            Self::Page => "page",
        }
    }

    /// The URL path segment for this kind
    #[must_use]
    pub fn url_segment(&self) -> &'static str {
        match self {
            Self::Book => "books",
            Self::Chapter => "chapters",
            Self::Page => "pages",
        }
    }
}

impl std::str::FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "book" => Ok(Self::Book),
            "chapter" => Ok(Self::Chapter),
            "page" => Ok(Self::Page),
            _ => Err(format!("Invalid entity kind: {s}")),
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A content node managed by the store
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// UUID-based entity id (folder name)
    pub id: String,
    pub kind: EntityKind,
    pub name: String,
    /// URL-safe identifier derived from the name; unique within its kind
    pub slug: String,
    /// Markdown body
    pub description: String,
    pub created_by: String,
    pub updated_by: String,
    pub owned_by: String,
    /// Cover image reference, at most one at a time
    pub cover: Option<Image>,
    pub custom_fields: HashMap<String, String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Free-form input applied onto an entity via [`Entity::fill`]
#[derive(Debug, Clone, Default)]
pub struct EntityInput {
    pub name: Option<String>,
    pub description: Option<String>,
    /// `None` leaves tags alone; `Some(list)` replaces the whole set
    pub tags: Option<Vec<Tag>>,
    pub custom_fields: HashMap<String, String>,
}

impl Entity {
    /// Construct a fresh, unpersisted entity of the given kind
    #[must_use]
    pub fn new(kind: EntityKind) -> Self {
        let now = now_iso();
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            name: String::new(),
            slug: String::new(),
            description: String::new(),
            created_by: String::new(),
            updated_by: String::new(),
            owned_by: String::new(),
            cover: None,
            custom_fields: HashMap::new(),
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Apply recognized user-supplied fields. This is the restricted setter:
    /// identity, authorship, slug and cover are never touched here.
    pub fn fill(&mut self, input: &EntityInput) {
        if let Some(ref name) = input.name {
            self.name = name.clone();
        }
        if let Some(ref description) = input.description {
            self.description = description.clone();
        }
        for (key, value) in &input.custom_fields {
            self.custom_fields.insert(key.clone(), value.clone());
        }
    }

    /// Stamp creator, updater and owner from the acting identity. This is the
    /// privileged setter: it runs after [`Entity::fill`] on creation and wins
    /// over any conflicting input.
    pub fn assign_authorship(&mut self, actor: &Actor) {
        self.created_by = actor.id.clone();
        self.updated_by = actor.id.clone();
        self.owned_by = actor.id.clone();
    }

    /// Stamp only the updater identity
    pub fn stamp_updated_by(&mut self, actor: &Actor) {
        self.updated_by = actor.id.clone();
    }

    /// Regenerate the slug from the current name. Falls back to a short id
    /// segment when the name yields an empty slug.
    pub fn refresh_slug(&mut self) {
        let slug = slugify(&self.name);
        if slug.is_empty() {
            self.slug = self.id.chars().take(8).collect();
        } else {
            self.slug = slug;
        }
    }

    /// Bump the modification timestamp
    pub fn touch(&mut self) {
        self.updated_at = now_iso();
    }

    /// The entity's URL, e.g. `/books/intro`
    #[must_use]
    pub fn url(&self) -> String {
        format!("/{}/{}", self.kind.url_segment(), self.slug)
    }
}

/// The metadata.json sidecar for an entity folder.
/// The name and description live in entity.md; everything else lives here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityMetadata {
    pub id: String,
    pub kind: EntityKind,
    pub slug: String,
    pub created_by: String,
    pub updated_by: String,
    pub owned_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<Image>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub custom_fields: HashMap<String, String>,
    pub created_at: String,
    pub updated_at: String,
}

impl EntityMetadata {
    #[must_use]
    pub fn from_entity(entity: &Entity) -> Self {
        Self {
            id: entity.id.clone(),
            kind: entity.kind,
            slug: entity.slug.clone(),
            created_by: entity.created_by.clone(),
            updated_by: entity.updated_by.clone(),
            owned_by: entity.owned_by.clone(),
            cover: entity.cover.clone(),
            custom_fields: entity.custom_fields.clone(),
            created_at: entity.created_at.clone(),
            updated_at: entity.updated_at.clone(),
        }
    }

    /// Rebuild an entity from its sidecar plus the parsed entity.md parts
    #[must_use]
    pub fn into_entity(self, name: String, description: String) -> Entity {
        Entity {
            id: self.id,
            kind: self.kind,
            name,
            slug: self.slug,
            description,
            created_by: self.created_by,
            updated_by: self.updated_by,
            owned_by: self.owned_by,
            cover: self.cover,
            custom_fields: self.custom_fields,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
