//! Fetcher dispatch and implementations for different document sources.
//!
//! Each fetcher retrieves one `GeoJSON` `FeatureCollection`, either from
//! disk or over HTTP.

pub mod file;
pub mod geojson_url;

use std::path::Path;

use film_map_ingest_models::DocumentSource;
use geojson::{FeatureCollection, GeoJson};

use crate::LoadError;

/// Fetches and parses the document behind `source`.
///
/// # Errors
///
/// Returns [`LoadError`] if the document cannot be read or is not a
/// `GeoJSON` `FeatureCollection`.
pub async fn fetch_collection(
    client: &reqwest::Client,
    base_dir: &Path,
    source: &DocumentSource,
) -> Result<FeatureCollection, LoadError> {
    let body = match source {
        DocumentSource::File { path } => file::fetch(&base_dir.join(path)).await?,
        DocumentSource::GeojsonUrl { url } => geojson_url::fetch(client, url).await?,
    };
    parse_collection(&body)
}

/// Parses a document body as a `FeatureCollection`.
///
/// # Errors
///
/// Returns [`LoadError::GeoJson`] for malformed `GeoJSON` and
/// [`LoadError::Conversion`] for valid `GeoJSON` of another type.
pub fn parse_collection(body: &str) -> Result<FeatureCollection, LoadError> {
    match body.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => Ok(collection),
        GeoJson::Feature(_) | GeoJson::Geometry(_) => Err(LoadError::Conversion {
            message: "Expected a GeoJSON FeatureCollection".to_string(),
        }),
    }
}
