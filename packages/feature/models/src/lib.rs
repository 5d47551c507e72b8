#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Location and sector feature types for the film map.
//!
//! These are the canonical, source-independent shapes that every dataset is
//! normalized into at load time. Nothing downstream of ingestion ever looks
//! at raw property names.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Placeholder rendered for display fields missing from a location.
pub const MISSING_PLACEHOLDER: &str = "Sin información";

/// A film title as it appears on location features.
///
/// Compared and ordered byte-wise with no case folding or normalization.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilmTitle(pub String);

impl FilmTitle {
    /// Creates a title from anything string-like.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self(title.into())
    }

    /// Returns the title text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FilmTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A neighborhood sector name, shared by location features and sector
/// polygons.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectorName(pub String);

impl SectorName {
    /// Creates a sector name from anything string-like.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the sector name text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SectorName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Display-only attributes of a filming location, shown in its popup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationDetails {
    /// Film director.
    pub director: Option<String>,
    /// Film genre.
    pub genre: Option<String>,
    /// Short note about the scene shot at this location.
    pub note: Option<String>,
    /// File name of the associated still image.
    pub image: Option<String>,
}

impl LocationDetails {
    /// Returns the field value, or [`MISSING_PLACEHOLDER`] when absent.
    #[must_use]
    pub fn display(field: Option<&String>) -> &str {
        field.map_or(MISSING_PLACEHOLDER, String::as_str)
    }
}

/// A filming location point, normalized from the locations document.
///
/// Identity is the feature's position in [`FeatureStore::locations`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationFeature {
    /// Longitude (WGS84).
    pub longitude: f64,
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Production year of the film, if present and numeric.
    pub year: Option<i32>,
    /// Film title.
    pub film: Option<FilmTitle>,
    /// Sector the location belongs to.
    pub sector: Option<SectorName>,
    /// Popup fields.
    pub details: LocationDetails,
    /// Every source property, untouched, for the renderer.
    pub properties: serde_json::Map<String, serde_json::Value>,
}

impl LocationFeature {
    /// Creates a location with no attributes at the given coordinates.
    #[must_use]
    pub fn at(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
            year: None,
            film: None,
            sector: None,
            details: LocationDetails::default(),
            properties: serde_json::Map::new(),
        }
    }

    /// Display label for the popup heading, e.g. `"Ema (2019)"`.
    #[must_use]
    pub fn heading(&self) -> String {
        let title = self.film.as_ref().map_or(MISSING_PLACEHOLDER, FilmTitle::as_str);
        self.year.map_or_else(
            || format!("{title} ({MISSING_PLACEHOLDER})"),
            |year| format!("{title} ({year})"),
        )
    }
}

/// A neighborhood sector polygon, normalized from the sectors document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorFeature {
    /// Display name, also the filter value.
    pub name: SectorName,
    /// Polygon or multipolygon geometry.
    pub geometry: geojson::Geometry,
}

/// The two immutable source collections, populated once per session.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeatureStore {
    locations: Vec<LocationFeature>,
    sectors: Vec<SectorFeature>,
}

impl FeatureStore {
    /// Creates a store from already-normalized collections.
    #[must_use]
    pub const fn new(locations: Vec<LocationFeature>, sectors: Vec<SectorFeature>) -> Self {
        Self { locations, sectors }
    }

    /// A store with nothing loaded.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            locations: Vec::new(),
            sectors: Vec::new(),
        }
    }

    /// Location features in source order.
    #[must_use]
    pub fn locations(&self) -> &[LocationFeature] {
        &self.locations
    }

    /// Sector polygons in source order.
    #[must_use]
    pub fn sectors(&self) -> &[SectorFeature] {
        &self.sectors
    }

    /// Whether neither collection holds any feature.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty() && self.sectors.is_empty()
    }

    /// Distinct names of the sector polygons.
    #[must_use]
    pub fn sector_names(&self) -> BTreeSet<&SectorName> {
        self.sectors.iter().map(|s| &s.name).collect()
    }

    /// Looks up a sector polygon by name. First match wins.
    #[must_use]
    pub fn sector(&self, name: &SectorName) -> Option<&SectorFeature> {
        self.sectors.iter().find(|s| &s.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(name: &str) -> SectorFeature {
        SectorFeature {
            name: SectorName::new(name),
            geometry: geojson::Geometry::new(geojson::Value::Polygon(vec![vec![
                vec![0.0, 0.0],
                vec![1.0, 0.0],
                vec![1.0, 1.0],
                vec![0.0, 1.0],
                vec![0.0, 0.0],
            ]])),
        }
    }

    #[test]
    fn empty_store_has_nothing() {
        let store = FeatureStore::empty();
        assert!(store.is_empty());
        assert!(store.locations().is_empty());
        assert!(store.sector_names().is_empty());
    }

    #[test]
    fn sector_names_are_distinct() {
        let store = FeatureStore::new(
            Vec::new(),
            vec![square("Cerro Alegre"), square("Cerro Alegre"), square("Playa Ancha")],
        );
        let names: Vec<&str> = store.sector_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["Cerro Alegre", "Playa Ancha"]);
        assert!(store.sector(&SectorName::new("Playa Ancha")).is_some());
        assert!(store.sector(&SectorName::new("Cerro Toro")).is_none());
    }

    #[test]
    fn missing_display_fields_use_placeholder() {
        let details = LocationDetails {
            director: Some("Aldo Francia".to_string()),
            ..LocationDetails::default()
        };
        assert_eq!(LocationDetails::display(details.director.as_ref()), "Aldo Francia");
        assert_eq!(LocationDetails::display(details.genre.as_ref()), MISSING_PLACEHOLDER);
    }

    #[test]
    fn heading_falls_back_for_missing_year() {
        let mut feature = LocationFeature::at(-71.62, -33.04);
        feature.film = Some(FilmTitle::new("Ema"));
        assert_eq!(feature.heading(), format!("Ema ({MISSING_PLACEHOLDER})"));
        feature.year = Some(2019);
        assert_eq!(feature.heading(), "Ema (2019)");
    }
}
