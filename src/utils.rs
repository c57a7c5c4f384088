use std::path::{Path, PathBuf};

/// The name of the folio folder
pub const FOLIO_FOLDER: &str = ".folio";

/// The name of the manifest file
pub const MANIFEST_FILE: &str = "manifest.json";

/// The name of the store config file
pub const CONFIG_FILE: &str = "config.json";

/// Current folio schema version
pub const FOLIO_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get the path to the .folio folder
#[must_use]
pub fn get_folio_path(store_path: &Path) -> PathBuf {
    store_path.join(FOLIO_FOLDER)
}

/// Get the path to the manifest file
#[must_use]
pub fn get_manifest_path(store_path: &Path) -> PathBuf {
    get_folio_path(store_path).join(MANIFEST_FILE)
}

/// Get the path to the store config file
#[must_use]
pub fn get_config_path(store_path: &Path) -> PathBuf {
    get_folio_path(store_path).join(CONFIG_FILE)
}

/// Get the path to the entities folder
#[must_use]
pub fn get_entities_path(store_path: &Path) -> PathBuf {
    get_folio_path(store_path).join("entities")
}

/// Get the path to the images folder
#[must_use]
pub fn get_images_path(store_path: &Path) -> PathBuf {
    get_folio_path(store_path).join("images")
}

/// Get the path to the search index file
#[must_use]
pub fn get_search_index_path(store_path: &Path) -> PathBuf {
    get_folio_path(store_path).join("search-index.json")
}

/// Get the path to the permissions file
#[must_use]
pub fn get_permissions_path(store_path: &Path) -> PathBuf {
    get_folio_path(store_path).join("permissions.json")
}

/// Get current timestamp in ISO 8601 format
#[must_use]
pub fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Convert a name to a URL-friendly slug (kebab-case)
#[must_use]
pub fn slugify(name: &str) -> String {
    slug::slugify(name)
}
