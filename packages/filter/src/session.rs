//! Selection state and command dispatch for one viewing session.
//!
//! The session owns the loaded [`FeatureStore`] and the only mutable state
//! in the engine, the [`Selection`]. Every command runs through the same
//! pipeline: apply the command, compute options, reconcile, then recompute
//! options and the filtered feature list for the reconciled selection.

use std::sync::Arc;

use film_map_feature_models::{FeatureStore, LocationFeature, SectorName};
use film_map_filter_models::{FilterCommand, FilterConfig, FilterOptions, Selection};
use serde::Serialize;

use crate::{apply_indices, compute_options, reconcile};

/// Pure reducer: the selection that results from `command`.
///
/// Options are computed once from the post-command selection and every
/// dimension is reconciled against that one computation.
#[must_use]
pub fn update(
    store: &FeatureStore,
    config: &FilterConfig,
    selection: &Selection,
    command: &FilterCommand,
) -> Selection {
    let next = selection.with_command(command);
    let options = compute_options(store, &next, config);
    reconcile(&next, &options)
}

/// Everything the renderer needs after a selection change.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterView<'a> {
    /// The reconciled selection.
    pub selection: &'a Selection,
    /// Matching locations, in source order.
    pub features: Vec<&'a LocationFeature>,
    /// Number of loaded locations.
    pub total: usize,
    /// Option lists for the three dropdowns.
    pub options: &'a FilterOptions,
    /// Sector to highlight, if one is selected.
    pub highlighted_sector: Option<&'a SectorName>,
}

/// A filter session over a write-once feature store.
#[derive(Debug, Clone)]
pub struct FilterSession {
    store: Arc<FeatureStore>,
    config: FilterConfig,
    selection: Selection,
    options: FilterOptions,
    matched: Vec<usize>,
}

impl FilterSession {
    /// Starts a session with every filter at its sentinel.
    #[must_use]
    pub fn new(store: Arc<FeatureStore>, config: FilterConfig) -> Self {
        let selection = Selection::default();
        let options = compute_options(&store, &selection, &config);
        let matched = apply_indices(&store, &selection);
        Self {
            store,
            config,
            selection,
            options,
            matched,
        }
    }

    /// Applies a command and returns the refreshed view.
    pub fn dispatch(&mut self, command: &FilterCommand) -> FilterView<'_> {
        let next = update(&self.store, &self.config, &self.selection, command);
        log::debug!("{command:?}: {:?} -> {next:?}", self.selection);

        self.options = compute_options(&self.store, &next, &self.config);
        self.matched = apply_indices(&self.store, &next);
        self.selection = next;

        self.view()
    }

    /// The current view without changing anything.
    #[must_use]
    pub fn view(&self) -> FilterView<'_> {
        let locations = self.store.locations();
        FilterView {
            selection: &self.selection,
            features: self.matched.iter().map(|&i| &locations[i]).collect(),
            total: locations.len(),
            options: &self.options,
            highlighted_sector: self.selection.sector.value(),
        }
    }

    /// The loaded features.
    #[must_use]
    pub fn store(&self) -> &FeatureStore {
        &self.store
    }

    /// The filter configuration in effect.
    #[must_use]
    pub const fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// The current, reconciled selection.
    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The option lists for the current selection.
    #[must_use]
    pub const fn options(&self) -> &FilterOptions {
        &self.options
    }
}
