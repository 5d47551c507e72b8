#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Film location dataset loading.
//!
//! Fetches the locations and sectors `GeoJSON` documents of a dataset,
//! normalizes them onto the canonical feature schema, and returns a
//! write-once [`FeatureStore`]. Datasets are defined as TOML files embedded
//! at compile time, following the same registry pattern as other sources.
//! Loading is a single attempt: there is no retry and no partial store.

pub mod attribute;
pub mod fetchers;
pub mod normalize;
pub mod registry;

use std::path::PathBuf;

use film_map_feature_models::FeatureStore;
use film_map_ingest_models::DatasetDefinition;
use thiserror::Error;

pub use registry::{all_datasets, find_dataset, parse_dataset};

/// Errors that can occur while loading a dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Reading a local document failed.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Document is not valid `GeoJSON`.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// Dataset definition is not valid TOML for the schema.
    #[error("Dataset definition error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Data conversion or normalization error.
    #[error("Conversion error: {message}")]
    Conversion {
        /// Description of what went wrong.
        message: String,
    },
}

/// Loads datasets, resolving relative file paths against `base_dir`.
#[derive(Debug, Clone)]
pub struct Loader {
    client: reqwest::Client,
    base_dir: PathBuf,
}

impl Loader {
    /// Creates a loader with a default HTTP client.
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self::with_client(reqwest::Client::new(), base_dir)
    }

    /// Creates a loader with a preconfigured HTTP client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            base_dir: base_dir.into(),
        }
    }

    /// Fetches both documents concurrently and builds the feature store.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if either document cannot be fetched or is not
    /// a `GeoJSON` `FeatureCollection`. Nothing is returned for the other
    /// document in that case.
    pub async fn load_store(&self, dataset: &DatasetDefinition) -> Result<FeatureStore, LoadError> {
        log::info!("Loading dataset {} ({})", dataset.id(), dataset.name());

        let (locations, sectors) = tokio::try_join!(
            fetchers::fetch_collection(&self.client, &self.base_dir, &dataset.locations.source),
            fetchers::fetch_collection(&self.client, &self.base_dir, &dataset.sectors.source),
        )?;

        let sectors = normalize::normalize_sectors(&sectors, &dataset.sectors.fields);
        let mut locations = normalize::normalize_locations(&locations, &dataset.locations.fields);

        if dataset.attribute_missing_sectors {
            attribute::attribute_missing_sectors(&mut locations, &sectors);
        }

        log::info!(
            "Loaded {} locations and {} sectors for {}",
            locations.len(),
            sectors.len(),
            dataset.id()
        );

        Ok(FeatureStore::new(locations, sectors))
    }

    /// Loads the dataset, reporting a failure once and falling back to an
    /// empty store.
    pub async fn load_store_or_empty(&self, dataset: &DatasetDefinition) -> FeatureStore {
        match self.load_store(dataset).await {
            Ok(store) => store,
            Err(e) => {
                log::error!("Failed to load dataset {}: {e}", dataset.id());
                FeatureStore::empty()
            }
        }
    }
}
