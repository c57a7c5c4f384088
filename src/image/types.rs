//! Image type definitions and error types.

use crate::manifest::ManifestError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A stored image asset
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// UUID of the image record
    pub id: String,
    /// Original upload file name
    pub name: String,
    /// Data file path relative to the `.folio` folder
    pub path: String,
    /// Storage category (e.g. "cover")
    pub category: String,
    /// Actor id the image belongs to
    pub owned_by: String,
    /// Stored width in pixels
    pub width: u32,
    /// Stored height in pixels
    pub height: u32,
    /// Whether the image was cropped to the requested geometry
    pub cropped: bool,
    /// ISO timestamp when stored
    pub created_at: String,
}

/// An uploaded image file, as received from a caller
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Original file name, including extension
    pub file_name: String,
    /// Raw image bytes
    pub data: Vec<u8>,
}

impl ImageUpload {
    #[must_use]
    pub fn new(file_name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            data,
        }
    }
}

/// Image storage errors (the dedicated image-upload error kind)
#[derive(Error, Debug)]
pub enum ImageError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Manifest error: {0}")]
    ManifestError(#[from] ManifestError),

    #[error("Store not initialized")]
    NotInitialized,

    #[error("Uploaded image is empty")]
    EmptyUpload,

    #[error("Invalid image file name: {0}")]
    InvalidFileName(String),
}
