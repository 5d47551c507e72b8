//! Cross-filtered option lists for the three dropdowns.
//!
//! Each dimension's options are the values that still have at least one
//! matching location when that dimension alone is freed and the other two
//! are held at the current selection. All three lists come out of a single
//! pass over the locations.

use std::collections::BTreeMap;

use film_map_feature_models::FeatureStore;
use film_map_filter_models::{
    DateRange, DimensionValue, FilterConfig, FilterOptions, OptionList, Selection,
};

use crate::predicate::{matches_date, matches_film, matches_sector};

/// Running counts for one dimension.
struct Tally<T> {
    all: usize,
    counts: BTreeMap<T, usize>,
}

impl<T: DimensionValue> Tally<T> {
    const fn new() -> Self {
        Self {
            all: 0,
            counts: BTreeMap::new(),
        }
    }

    fn add(&mut self, value: T) {
        *self.counts.entry(value).or_default() += 1;
    }

    fn into_list(self) -> OptionList<T> {
        OptionList::new(self.all, self.counts)
    }
}

/// Computes every dimension's options against the current selection.
///
/// Counts equal the number of locations that pass the full predicate with
/// the option's value substituted into its dimension. Sector values that
/// have no polygon are dropped when
/// [`FilterConfig::restrict_sectors_to_polygons`] is set.
#[must_use]
pub fn compute_options(
    store: &FeatureStore,
    selection: &Selection,
    config: &FilterConfig,
) -> FilterOptions {
    let polygon_sectors = config
        .restrict_sectors_to_polygons
        .then(|| store.sector_names());

    let mut dates = Tally::<DateRange>::new();
    let mut films = Tally::new();
    let mut sectors = Tally::new();

    for feature in store.locations() {
        let date_ok = matches_date(feature.year, &selection.date);
        let film_ok = matches_film(feature.film.as_ref(), &selection.film);
        let sector_ok = matches_sector(feature.sector.as_ref(), &selection.sector);

        if film_ok && sector_ok {
            dates.all += 1;
            if let Some(year) = feature.year {
                for range in DateRange::ALL.iter().filter(|r| r.contains(year)) {
                    dates.add(*range);
                }
            }
        }

        if date_ok && sector_ok {
            films.all += 1;
            if let Some(film) = &feature.film {
                films.add(film.clone());
            }
        }

        if date_ok && film_ok {
            sectors.all += 1;
            if let Some(sector) = &feature.sector {
                let has_polygon = polygon_sectors
                    .as_ref()
                    .is_none_or(|names| names.contains(sector));
                if has_polygon {
                    sectors.add(sector.clone());
                }
            }
        }
    }

    FilterOptions {
        dates: dates.into_list(),
        films: films.into_list(),
        sectors: sectors.into_list(),
    }
}
