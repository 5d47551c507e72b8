//! Local file fetcher.

use std::path::Path;

use crate::LoadError;

/// Reads a document from disk.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read.
pub async fn fetch(path: &Path) -> Result<String, LoadError> {
    log::debug!("Reading {}", path.display());
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })
}
