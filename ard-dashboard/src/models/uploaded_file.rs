//! Uploaded file descriptor

use serde::{Deserialize, Serialize};

/// File handed to intake by the host's picker or drag-drop surface
///
/// Only the declared attributes are kept; contents are never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    /// Original file name
    pub name: String,
    /// Size in bytes
    pub size_bytes: u64,
    /// Declared media type (e.g. `image/jpeg`)
    pub media_type: String,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, size_bytes: u64, media_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            media_type: media_type.into(),
        }
    }

    /// Media type without parameters, lowercased (`Text/Plain; charset=utf-8` → `text/plain`)
    pub fn essence(&self) -> String {
        self.media_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase()
    }

    /// Type category: text before `/` of the essence (`image/png` → `image`)
    pub fn category(&self) -> String {
        let essence = self.essence();
        match essence.split_once('/') {
            Some((category, _)) => category.to_string(),
            None => essence,
        }
    }
}
