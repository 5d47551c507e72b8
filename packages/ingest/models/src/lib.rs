#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dataset definition types.
//!
//! Defines the TOML schema for a film-location dataset: where its two
//! `GeoJSON` documents come from and which property keys hold each
//! canonical attribute. Source documents disagree on naming (`año` vs
//! `anio`, `sector` vs `nombre_sector`), so every canonical attribute lists
//! the candidate keys to try, in order.

use film_map_filter_models::FilterConfig;
use serde::{Deserialize, Serialize};

/// A film-location dataset, deserialized from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetDefinition {
    /// Unique dataset identifier (e.g., `"valparaiso"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Fill in missing location sectors from the sector polygons.
    #[serde(default)]
    pub attribute_missing_sectors: bool,
    /// Filter behavior for this dataset.
    #[serde(default)]
    pub filter: FilterConfig,
    /// The point document.
    pub locations: LocationsDocument,
    /// The polygon document.
    pub sectors: SectorsDocument,
}

impl DatasetDefinition {
    /// Returns the dataset identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the human-readable dataset name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Where the locations document comes from and how to read it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationsDocument {
    /// Document source.
    pub source: DocumentSource,
    /// Property key candidates.
    #[serde(default)]
    pub fields: LocationFieldMapping,
}

/// Where the sectors document comes from and how to read it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectorsDocument {
    /// Document source.
    pub source: DocumentSource,
    /// Property key candidates.
    #[serde(default)]
    pub fields: SectorFieldMapping,
}

/// How to fetch a `GeoJSON` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DocumentSource {
    /// A local file. Relative paths resolve against the loader's base
    /// directory.
    File {
        /// Path to the `.geojson` file.
        path: String,
    },
    /// A URL returning a `GeoJSON` `FeatureCollection`.
    GeojsonUrl {
        /// Full URL.
        url: String,
    },
}

impl std::fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File { path } => write!(f, "file {path}"),
            Self::GeojsonUrl { url } => write!(f, "url {url}"),
        }
    }
}

fn keys(candidates: &[&str]) -> Vec<String> {
    candidates.iter().map(ToString::to_string).collect()
}

fn default_year() -> Vec<String> {
    keys(&["año", "anio", "ano", "year"])
}

fn default_film() -> Vec<String> {
    keys(&["nombre_peli", "pelicula", "película", "titulo", "film"])
}

fn default_sector() -> Vec<String> {
    keys(&["sector", "nombre_sector", "barrio"])
}

fn default_director() -> Vec<String> {
    keys(&["director"])
}

fn default_genre() -> Vec<String> {
    keys(&["genero", "género", "genre"])
}

fn default_note() -> Vec<String> {
    keys(&["nota_breve", "nota", "descripcion"])
}

fn default_image() -> Vec<String> {
    keys(&["imagen_asociada", "imagen", "image"])
}

fn default_sector_name() -> Vec<String> {
    keys(&["nombre", "name", "sector", "NOMBRE"])
}

/// Candidate property keys for each location attribute. The first key
/// present with a non-null value wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationFieldMapping {
    /// Production year.
    #[serde(default = "default_year")]
    pub year: Vec<String>,
    /// Film title.
    #[serde(default = "default_film")]
    pub film: Vec<String>,
    /// Sector name.
    #[serde(default = "default_sector")]
    pub sector: Vec<String>,
    /// Director.
    #[serde(default = "default_director")]
    pub director: Vec<String>,
    /// Genre.
    #[serde(default = "default_genre")]
    pub genre: Vec<String>,
    /// Short note.
    #[serde(default = "default_note")]
    pub note: Vec<String>,
    /// Image file name.
    #[serde(default = "default_image")]
    pub image: Vec<String>,
}

impl Default for LocationFieldMapping {
    fn default() -> Self {
        Self {
            year: default_year(),
            film: default_film(),
            sector: default_sector(),
            director: default_director(),
            genre: default_genre(),
            note: default_note(),
            image: default_image(),
        }
    }
}

/// Candidate property keys for the sector name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorFieldMapping {
    /// Sector display name.
    #[serde(default = "default_sector_name")]
    pub name: Vec<String>,
}

impl Default for SectorFieldMapping {
    fn default() -> Self {
        Self {
            name: default_sector_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_definition_gets_default_fields() {
        let def: DatasetDefinition = toml::from_str(
            r#"
            id = "demo"
            name = "Demo"

            [locations.source]
            type = "file"
            path = "locations.geojson"

            [sectors.source]
            type = "geojson_url"
            url = "https://example.org/sectors.geojson"
            "#,
        )
        .unwrap();

        assert!(!def.attribute_missing_sectors);
        assert!(def.filter.restrict_sectors_to_polygons);
        assert_eq!(def.locations.fields, LocationFieldMapping::default());
        assert_eq!(def.sectors.fields.name[0], "nombre");
        assert_eq!(
            def.sectors.source,
            DocumentSource::GeojsonUrl {
                url: "https://example.org/sectors.geojson".to_string()
            }
        );
    }

    #[test]
    fn partial_field_tables_keep_other_defaults() {
        let def: DatasetDefinition = toml::from_str(
            r#"
            id = "demo"
            name = "Demo"

            [filter]
            restrict_sectors_to_polygons = false

            [locations.source]
            type = "file"
            path = "locations.geojson"

            [locations.fields]
            year = ["anio_estreno"]

            [sectors.source]
            type = "file"
            path = "sectors.geojson"
            "#,
        )
        .unwrap();

        assert!(!def.filter.restrict_sectors_to_polygons);
        assert_eq!(def.locations.fields.year, vec!["anio_estreno"]);
        assert_eq!(def.locations.fields.film, default_film());
    }
}
