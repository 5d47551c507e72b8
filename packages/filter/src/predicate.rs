//! Decides whether a single location passes a selection.

use film_map_feature_models::{FilmTitle, LocationFeature, SectorName};
use film_map_filter_models::{Choice, DateRange, Selection};

/// Whether `feature` passes all three dimensions of `selection`.
///
/// A location without a year never matches a concrete date bucket but
/// always passes the date sentinel; the same holds for missing film and
/// sector attributes.
#[must_use]
pub fn matches(feature: &LocationFeature, selection: &Selection) -> bool {
    matches_sector(feature.sector.as_ref(), &selection.sector)
        && matches_film(feature.film.as_ref(), &selection.film)
        && matches_date(feature.year, &selection.date)
}

/// Date test: the sentinel, or the year inside the chosen bucket.
#[must_use]
pub fn matches_date(year: Option<i32>, date: &Choice<DateRange>) -> bool {
    match date {
        Choice::All => true,
        Choice::Only(range) => year.is_some_and(|y| range.contains(y)),
    }
}

/// Film test: the sentinel, or exact title equality.
#[must_use]
pub fn matches_film(film: Option<&FilmTitle>, choice: &Choice<FilmTitle>) -> bool {
    match choice {
        Choice::All => true,
        Choice::Only(wanted) => film == Some(wanted),
    }
}

/// Sector test: the sentinel, or exact name equality.
#[must_use]
pub fn matches_sector(sector: Option<&SectorName>, choice: &Choice<SectorName>) -> bool {
    match choice {
        Choice::All => true,
        Choice::Only(wanted) => sector == Some(wanted),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{location, two_films};

    #[test]
    fn unconstrained_selection_matches_everything() {
        let bare = LocationFeature::at(-71.6, -33.0);
        assert!(matches(&bare, &Selection::default()));
        for feature in two_films().locations() {
            assert!(matches(feature, &Selection::default()));
        }
    }

    #[test]
    fn missing_year_fails_every_concrete_bucket() {
        let feature = location(None, Some("Ema"), Some("Cerro Alegre"));
        for range in DateRange::ALL {
            assert!(!matches_date(feature.year, &Choice::Only(*range)));
        }
        assert!(matches_date(feature.year, &Choice::All));
    }

    #[test]
    fn year_1950_is_outside_1951_1973() {
        assert!(!matches_date(Some(1950), &Choice::Only(DateRange::From1951To1973)));
        assert!(!matches_date(Some(1950), &Choice::Only(DateRange::Before1950)));
    }

    #[test]
    fn year_1990_matches_only_the_last_bucket() {
        assert!(matches_date(Some(1990), &Choice::Only(DateRange::Since1990)));
        assert!(!matches_date(Some(1990), &Choice::Only(DateRange::From1974To1989)));
    }

    #[test]
    fn film_comparison_is_case_sensitive() {
        let feature = location(Some(2001), Some("Película A"), None);
        assert!(matches_film(
            feature.film.as_ref(),
            &Choice::Only(FilmTitle::new("Película A"))
        ));
        assert!(!matches_film(
            feature.film.as_ref(),
            &Choice::Only(FilmTitle::new("película a"))
        ));
    }

    #[test]
    fn missing_sector_only_passes_the_sentinel() {
        let feature = location(Some(2001), Some("Película A"), None);
        assert!(matches_sector(feature.sector.as_ref(), &Choice::All));
        assert!(!matches_sector(
            feature.sector.as_ref(),
            &Choice::Only(SectorName::new("Cerro Alegre"))
        ));
    }

    #[test]
    fn all_three_tests_must_pass() {
        let feature = location(Some(2001), Some("Película A"), Some("Cerro Alegre"));
        let selection = Selection {
            date: Choice::Only(DateRange::Since1990),
            film: Choice::Only(FilmTitle::new("Película A")),
            sector: Choice::Only(SectorName::new("Cerro Concepción")),
        };
        assert!(!matches(&feature, &selection));
        let selection = Selection {
            sector: Choice::Only(SectorName::new("Cerro Alegre")),
            ..selection
        };
        assert!(matches(&feature, &selection));
    }
}
