//! Compile-time registry of film-location datasets.
//!
//! Each entry is a `(name, toml_content)` pair embedded via `include_str!`.
//! Adding a dataset requires creating a TOML file in `datasets/` and adding
//! a corresponding entry here.

use film_map_ingest_models::DatasetDefinition;

use crate::LoadError;

/// Number of registered datasets. Enforced by a test.
#[cfg(test)]
const EXPECTED_DATASET_COUNT: usize = 1;

/// Embedded TOML dataset definitions.
const DATASET_TOMLS: &[(&str, &str)] = &[("valparaiso", include_str!("../datasets/valparaiso.toml"))];

/// Returns all registered datasets.
///
/// # Panics
///
/// Panics if any embedded TOML file fails to parse. Since these are
/// compile-time constants, parse failures indicate a development error
/// and are caught during CI.
#[must_use]
pub fn all_datasets() -> Vec<DatasetDefinition> {
    DATASET_TOMLS
        .iter()
        .map(|(name, toml_str)| {
            toml::de::from_str(toml_str)
                .unwrap_or_else(|e| panic!("Failed to parse dataset '{name}': {e}"))
        })
        .collect()
}

/// Looks up a registered dataset by id.
#[must_use]
pub fn find_dataset(id: &str) -> Option<DatasetDefinition> {
    all_datasets().into_iter().find(|d| d.id == id)
}

/// Parses a dataset definition supplied at runtime.
///
/// # Errors
///
/// Returns [`LoadError::Toml`] if the definition does not match the schema.
pub fn parse_dataset(toml_str: &str) -> Result<DatasetDefinition, LoadError> {
    Ok(toml::de::from_str(toml_str)?)
}
