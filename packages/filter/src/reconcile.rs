//! Falls selections back to their sentinel once they stop being offered.

use film_map_filter_models::{Choice, DimensionValue, FilterOptions, OptionList, Selection};

/// Resets every concrete value that is missing from its option list.
///
/// All three dimensions are checked against the same `options`, so the
/// result does not depend on the order dimensions are visited in. When two
/// dimensions exclude each other, both fall back together.
#[must_use]
pub fn reconcile(selection: &Selection, options: &FilterOptions) -> Selection {
    Selection {
        date: keep_if_offered(&selection.date, &options.dates),
        film: keep_if_offered(&selection.film, &options.films),
        sector: keep_if_offered(&selection.sector, &options.sectors),
    }
}

fn keep_if_offered<T: DimensionValue>(choice: &Choice<T>, options: &OptionList<T>) -> Choice<T> {
    if options.contains(choice) {
        choice.clone()
    } else {
        log::debug!(
            "Resetting {} selection {:?}: no longer offered",
            T::DIMENSION,
            choice.key()
        );
        Choice::All
    }
}
