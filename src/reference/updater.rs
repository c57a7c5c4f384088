//! File-backed reference rewriting across stored entities.

use super::{ReferenceError, ReferenceUpdater};
use crate::entity::{list_entity_ids, load_entity, write_entity_files, Entity};
use async_trait::async_trait;
use regex::Regex;
use std::path::PathBuf;
use tracing::info;

/// Rewrite occurrences of `old_url` in `content` to `new_url`.
///
/// A trailing boundary keeps the match exact: `/books/intro` must not match
/// inside `/books/intro-2` or `/books/introduction`. Trailing fragments,
/// query strings and sub-paths are preserved.
fn rewrite_url(content: &str, old_url: &str, new_url: &str) -> Result<String, ReferenceError> {
    let pattern = format!(r"{}(?P<after>[^A-Za-z0-9_-]|$)", regex::escape(old_url));
    let re = Regex::new(&pattern)?;

    Ok(re
        .replace_all(content, |caps: &regex::Captures<'_>| {
            format!("{new_url}{}", &caps["after"])
        })
        .into_owned())
}

/// File-backed reference updater scanning every other stored entity
#[derive(Debug, Clone)]
pub struct FsReferenceUpdater {
    store_path: PathBuf,
}

impl FsReferenceUpdater {
    #[must_use]
    pub fn new(store_path: impl Into<PathBuf>) -> Self {
        Self {
            store_path: store_path.into(),
        }
    }
}

#[async_trait]
impl ReferenceUpdater for FsReferenceUpdater {
    async fn rewrite_references(
        &self,
        entity: &Entity,
        old_url: &str,
    ) -> Result<usize, ReferenceError> {
        let new_url = entity.url();
        let mut rewritten = 0;

        for id in list_entity_ids(&self.store_path).await? {
            if id == entity.id {
                continue;
            }

            let Ok(mut other) = load_entity(&self.store_path, &id).await else {
                // Skip folders that can't be read
                continue;
            };

            let updated = rewrite_url(&other.description, old_url, &new_url)?;
            if updated == other.description {
                continue;
            }

            other.description = updated;
            other.touch();
            write_entity_files(&self.store_path, &other).await?;
            rewritten += 1;
        }

        if rewritten > 0 {
            info!(
                "Rewrote references from {} to {} in {} entities",
                old_url, new_url, rewritten
            );
        }

        Ok(rewritten)
    }
}
