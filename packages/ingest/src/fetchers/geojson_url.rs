//! Direct `GeoJSON` URL fetcher.
//!
//! Fetches a standard `GeoJSON` `FeatureCollection` from any URL that
//! returns it directly. One attempt, no retry.

use crate::LoadError;

/// Fetches the response body of a direct `GeoJSON` URL.
///
/// # Errors
///
/// Returns [`LoadError`] if the request fails or returns a non-success
/// status.
pub async fn fetch(client: &reqwest::Client, url: &str) -> Result<String, LoadError> {
    log::debug!("Fetching {url}");
    let resp = client.get(url).send().await?;
    if !resp.status().is_success() {
        return Err(LoadError::Conversion {
            message: format!("GeoJSON request to {url} failed with status {}", resp.status()),
        });
    }
    Ok(resp.text().await?)
}
