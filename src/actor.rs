//! Acting identity passed explicitly into every repo operation.

use serde::{Deserialize, Serialize};

/// The identity performing a store operation.
///
/// Entities are stamped with the actor's id on creation
/// (`created_by`/`updated_by`/`owned_by`) and on update (`updated_by`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    /// Stable actor id (primary key)
    pub id: String,
    /// Human-readable name, for logging only
    pub display_name: String,
}

impl Actor {
    #[must_use]
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}
