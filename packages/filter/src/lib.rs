#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Cross-filtering engine for the film location map.
//!
//! Given the loaded locations and sectors, this crate decides which
//! locations pass the current (date range, film, sector) selection, which
//! values each dropdown may still offer, and how a selection falls back
//! when one of its values stops being reachable. Everything here is
//! synchronous and pure except [`FilterSession`], which holds the selection.

pub mod options;
pub mod predicate;
pub mod reconcile;
pub mod session;

use film_map_feature_models::{FeatureStore, LocationFeature};
use film_map_filter_models::Selection;

pub use options::compute_options;
pub use predicate::matches;
pub use reconcile::reconcile;
pub use session::{FilterSession, FilterView, update};

/// Every location that passes `selection`, in source order.
#[must_use]
pub fn apply<'a>(store: &'a FeatureStore, selection: &Selection) -> Vec<&'a LocationFeature> {
    store
        .locations()
        .iter()
        .filter(|feature| matches(feature, selection))
        .collect()
}

/// Positions of every location that passes `selection`, ascending.
#[must_use]
pub fn apply_indices(store: &FeatureStore, selection: &Selection) -> Vec<usize> {
    store
        .locations()
        .iter()
        .enumerate()
        .filter(|(_, feature)| matches(feature, selection))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use film_map_feature_models::{
        FeatureStore, FilmTitle, LocationFeature, SectorFeature, SectorName,
    };

    pub fn location(year: Option<i32>, film: Option<&str>, sector: Option<&str>) -> LocationFeature {
        LocationFeature {
            year,
            film: film.map(FilmTitle::new),
            sector: sector.map(SectorName::new),
            ..LocationFeature::at(-71.62, -33.04)
        }
    }

    pub fn cerros(names: &[&str]) -> Vec<SectorFeature> {
        names
            .iter()
            .map(|name| SectorFeature {
                name: SectorName::new(*name),
                geometry: geojson::Geometry::new(geojson::Value::Polygon(vec![vec![
                    vec![-71.63, -33.05],
                    vec![-71.61, -33.05],
                    vec![-71.61, -33.03],
                    vec![-71.63, -33.05],
                ]])),
            })
            .collect()
    }

    /// Two locations: 2001 "Película A" in Cerro Alegre, 2015 "Película B"
    /// in Cerro Concepción.
    pub fn two_films() -> FeatureStore {
        FeatureStore::new(
            vec![
                location(Some(2001), Some("Película A"), Some("Cerro Alegre")),
                location(Some(2015), Some("Película B"), Some("Cerro Concepción")),
            ],
            cerros(&["Cerro Alegre", "Cerro Concepción"]),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixtures::two_films;
    use film_map_feature_models::{FilmTitle, SectorName};
    use film_map_filter_models::{Choice, DateRange};

    #[test]
    fn no_filters_returns_both_in_order() {
        let store = two_films();
        let result = apply(&store, &Selection::default());
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].year, Some(2001));
        assert_eq!(result[1].year, Some(2015));
    }

    #[test]
    fn film_filter_returns_only_that_film() {
        let store = two_films();
        let selection = Selection {
            film: Choice::Only(FilmTitle::new("Película A")),
            ..Selection::default()
        };
        let result = apply(&store, &selection);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].year, Some(2001));
        assert_eq!(result[0].film, Some(FilmTitle::new("Película A")));
    }

    #[test]
    fn empty_intersection_returns_nothing() {
        let store = two_films();
        let selection = Selection {
            date: Choice::Only(DateRange::From1951To1973),
            film: Choice::Only(FilmTitle::new("Película B")),
            sector: Choice::All,
        };
        assert!(apply(&store, &selection).is_empty());
    }

    #[test]
    fn apply_is_idempotent() {
        let store = two_films();
        let selection = Selection {
            sector: Choice::Only(SectorName::new("Cerro Concepción")),
            ..Selection::default()
        };
        let first = apply(&store, &selection);
        let second = apply(&store, &selection);
        assert_eq!(first, second);
        assert_eq!(apply_indices(&store, &selection), vec![1]);
        assert_eq!(apply_indices(&store, &selection), apply_indices(&store, &selection));
    }

    #[test]
    fn sentinel_never_rejects_on_its_own_dimension() {
        let store = two_films();
        for feature in store.locations() {
            let pinned = Selection {
                date: Choice::All,
                film: feature.film.clone().map_or(Choice::All, Choice::Only),
                sector: feature.sector.clone().map_or(Choice::All, Choice::Only),
            };
            assert!(matches(feature, &pinned));

            let pinned = Selection {
                film: Choice::All,
                date: Choice::Only(DateRange::Since1990),
                ..pinned
            };
            assert!(matches(feature, &pinned));

            let pinned = Selection {
                sector: Choice::All,
                ..pinned
            };
            assert!(matches(feature, &pinned));
        }
    }
}
