#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Filter dimension, selection, and option list types for the film map.
//!
//! The map is filtered along three dimensions: production date range, film
//! title, and sector. Each dimension has an "unconstrained" sentinel that is
//! always selectable. Values travel to and from the UI as plain string keys
//! (`"1951-1973"`, `"all-films"`, `"Cerro Alegre"`, ...).

use std::collections::BTreeMap;

use film_map_feature_models::{FilmTitle, SectorName};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum_macros::{AsRefStr, Display, EnumString};

/// One of the three filter dimensions.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Dimension {
    /// Production year bucket.
    Date,
    /// Film title.
    Film,
    /// Neighborhood sector.
    Sector,
}

impl Dimension {
    /// All dimensions, in dropdown order.
    pub const ALL: &[Self] = &[Self::Date, Self::Film, Self::Sector];

    /// Key of the "unconstrained" option for this dimension.
    #[must_use]
    pub const fn sentinel(self) -> &'static str {
        match self {
            Self::Date => "all-dates",
            Self::Film => "all-films",
            Self::Sector => "all-sectors",
        }
    }

    /// Dropdown label of the "unconstrained" option.
    #[must_use]
    pub const fn sentinel_label(self) -> &'static str {
        match self {
            Self::Date => "Todas las fechas",
            Self::Film => "Todas las películas",
            Self::Sector => "Todos los sectores",
        }
    }
}

/// Fixed production-year buckets, in chronological order.
///
/// The edges are intentionally asymmetric: 1950 falls in no bucket, and 1990
/// belongs only to [`DateRange::Since1990`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum DateRange {
    /// `year < 1950`
    #[serde(rename = "before-1950")]
    #[strum(serialize = "before-1950")]
    Before1950,
    /// `1951 <= year <= 1973`
    #[serde(rename = "1951-1973")]
    #[strum(serialize = "1951-1973")]
    From1951To1973,
    /// `1974 <= year < 1990`
    #[serde(rename = "1974-1990")]
    #[strum(serialize = "1974-1990")]
    From1974To1989,
    /// `year >= 1990`
    #[serde(rename = "1990-present")]
    #[strum(serialize = "1990-present")]
    Since1990,
}

impl DateRange {
    /// All buckets in chronological order.
    pub const ALL: &[Self] = &[
        Self::Before1950,
        Self::From1951To1973,
        Self::From1974To1989,
        Self::Since1990,
    ];

    /// Whether a production year falls inside this bucket.
    #[must_use]
    pub const fn contains(self, year: i32) -> bool {
        match self {
            Self::Before1950 => year < 1950,
            Self::From1951To1973 => year >= 1951 && year <= 1973,
            Self::From1974To1989 => year >= 1974 && year < 1990,
            Self::Since1990 => year >= 1990,
        }
    }

    /// Dropdown label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Before1950 => "Antes de 1950",
            Self::From1951To1973 => "1951-1973",
            Self::From1974To1989 => "1974-1989",
            Self::Since1990 => "1990-Actualidad",
        }
    }
}

/// A concrete value of one filter dimension.
pub trait DimensionValue: Clone + Ord + Sized {
    /// The dimension this value belongs to.
    const DIMENSION: Dimension;

    /// Wire key for this value.
    fn key(&self) -> &str;

    /// Dropdown label for this value.
    fn label(&self) -> &str;

    /// Parses a concrete (non-sentinel) key.
    fn from_key(key: &str) -> Option<Self>;
}

impl DimensionValue for DateRange {
    const DIMENSION: Dimension = Dimension::Date;

    fn key(&self) -> &str {
        self.as_ref()
    }

    fn label(&self) -> &str {
        DateRange::label(*self)
    }

    fn from_key(key: &str) -> Option<Self> {
        key.parse().ok()
    }
}

impl DimensionValue for FilmTitle {
    const DIMENSION: Dimension = Dimension::Film;

    fn key(&self) -> &str {
        self.as_str()
    }

    fn label(&self) -> &str {
        self.as_str()
    }

    fn from_key(key: &str) -> Option<Self> {
        (!key.is_empty()).then(|| Self::new(key))
    }
}

impl DimensionValue for SectorName {
    const DIMENSION: Dimension = Dimension::Sector;

    fn key(&self) -> &str {
        self.as_str()
    }

    fn label(&self) -> &str {
        self.as_str()
    }

    fn from_key(key: &str) -> Option<Self> {
        (!key.is_empty()).then(|| Self::new(key))
    }
}

/// The selected option of one dimension: unconstrained, or one value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Choice<T> {
    /// The sentinel; every feature passes this dimension.
    All,
    /// Only features with exactly this value pass.
    Only(T),
}

impl<T> Default for Choice<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T> Choice<T> {
    /// Whether this is the sentinel.
    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// The concrete value, if any.
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::All => None,
            Self::Only(value) => Some(value),
        }
    }
}

impl<T: DimensionValue> Choice<T> {
    /// Parses a wire key, accepting the dimension's sentinel.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidOptionError`] if the key is neither the sentinel nor
    /// a valid concrete value.
    pub fn from_key(key: &str) -> Result<Self, InvalidOptionError> {
        if key == T::DIMENSION.sentinel() {
            return Ok(Self::All);
        }
        T::from_key(key)
            .map(Self::Only)
            .ok_or_else(|| InvalidOptionError {
                dimension: T::DIMENSION,
                key: key.to_string(),
            })
    }

    /// Wire key, the sentinel key for [`Choice::All`].
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::All => T::DIMENSION.sentinel(),
            Self::Only(value) => value.key(),
        }
    }

    /// Dropdown label.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::All => T::DIMENSION.sentinel_label(),
            Self::Only(value) => value.label(),
        }
    }
}

impl<T: DimensionValue> Serialize for Choice<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl<'de, T: DimensionValue> Deserialize<'de> for Choice<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        Self::from_key(&key).map_err(serde::de::Error::custom)
    }
}

/// Error returned when a wire key names no option of its dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidOptionError {
    /// Dimension the key was parsed for.
    pub dimension: Dimension,
    /// The rejected key.
    pub key: String,
}

impl std::fmt::Display for InvalidOptionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {} option {:?}", self.dimension, self.key)
    }
}

impl std::error::Error for InvalidOptionError {}

/// The currently chosen value of each filter dimension.
///
/// The default is all-sentinel, the state at startup and after a reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    /// Production date bucket.
    pub date: Choice<DateRange>,
    /// Film title.
    pub film: Choice<FilmTitle>,
    /// Sector name.
    pub sector: Choice<SectorName>,
}

impl Selection {
    /// Whether every dimension is at its sentinel.
    #[must_use]
    pub const fn is_unconstrained(&self) -> bool {
        self.date.is_all() && self.film.is_all() && self.sector.is_all()
    }

    /// Returns the selection after a command, before any reconciliation.
    #[must_use]
    pub fn with_command(&self, command: &FilterCommand) -> Self {
        match command {
            FilterCommand::SetDate(date) => Self {
                date: date.clone(),
                ..self.clone()
            },
            FilterCommand::SetFilm(film) => Self {
                film: film.clone(),
                ..self.clone()
            },
            FilterCommand::SetSector(sector) => Self {
                sector: sector.clone(),
                ..self.clone()
            },
            FilterCommand::Reset => Self::default(),
        }
    }
}

/// A change to the selection, as dispatched by the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FilterCommand {
    /// `SET(date, value)`
    SetDate(Choice<DateRange>),
    /// `SET(film, value)`
    SetFilm(Choice<FilmTitle>),
    /// `SET(sector, value)`
    SetSector(Choice<SectorName>),
    /// Every dimension back to its sentinel.
    Reset,
}

impl FilterCommand {
    /// Builds a `SET` command from a dimension and a wire key.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidOptionError`] if the key is not valid for the
    /// dimension.
    pub fn set(dimension: Dimension, key: &str) -> Result<Self, InvalidOptionError> {
        Ok(match dimension {
            Dimension::Date => Self::SetDate(Choice::from_key(key)?),
            Dimension::Film => Self::SetFilm(Choice::from_key(key)?),
            Dimension::Sector => Self::SetSector(Choice::from_key(key)?),
        })
    }

    /// The dimension a `SET` command targets, `None` for a reset.
    #[must_use]
    pub const fn dimension(&self) -> Option<Dimension> {
        match self {
            Self::SetDate(_) => Some(Dimension::Date),
            Self::SetFilm(_) => Some(Dimension::Film),
            Self::SetSector(_) => Some(Dimension::Sector),
            Self::Reset => None,
        }
    }
}

/// One dropdown entry with its match count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", bound(serialize = "T: DimensionValue"))]
pub struct OptionEntry<T> {
    /// Value selected by this entry.
    pub value: Choice<T>,
    /// Dropdown label.
    pub label: String,
    /// Number of features that match with this value substituted in.
    pub count: usize,
}

/// The selectable options of one dimension, sentinel first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent, bound(serialize = "T: DimensionValue"))]
pub struct OptionList<T> {
    entries: Vec<OptionEntry<T>>,
}

impl<T: DimensionValue> OptionList<T> {
    /// Builds a list from the sentinel's count and per-value counts.
    ///
    /// Values come out in ascending key order of `T`.
    #[must_use]
    pub fn new(all_count: usize, counts: BTreeMap<T, usize>) -> Self {
        let sentinel = OptionEntry {
            value: Choice::All,
            label: T::DIMENSION.sentinel_label().to_string(),
            count: all_count,
        };
        let entries = std::iter::once(sentinel)
            .chain(counts.into_iter().map(|(value, count)| OptionEntry {
                label: value.label().to_string(),
                value: Choice::Only(value),
                count,
            }))
            .collect();
        Self { entries }
    }

    /// All entries, sentinel first.
    #[must_use]
    pub fn entries(&self) -> &[OptionEntry<T>] {
        &self.entries
    }

    /// Concrete values, in list order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().filter_map(|e| e.value.value())
    }

    /// Whether a choice is selectable. The sentinel always is.
    #[must_use]
    pub fn contains(&self, choice: &Choice<T>) -> bool {
        match choice {
            Choice::All => true,
            Choice::Only(_) => self.entries.iter().any(|e| &e.value == choice),
        }
    }

    /// Match count of a choice, if it is listed.
    #[must_use]
    pub fn count(&self, choice: &Choice<T>) -> Option<usize> {
        self.entries
            .iter()
            .find(|e| &e.value == choice)
            .map(|e| e.count)
    }
}

/// Option lists for all three dropdowns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    /// Date bucket options, chronological.
    pub dates: OptionList<DateRange>,
    /// Film title options, ascending.
    pub films: OptionList<FilmTitle>,
    /// Sector options, ascending.
    pub sectors: OptionList<SectorName>,
}

const fn default_true() -> bool {
    true
}

/// Per-dataset filter behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FilterConfig {
    /// Only offer sectors that also exist as polygons. Enable when sector
    /// polygons are rendered keyed by the same name.
    #[serde(default = "default_true")]
    pub restrict_sectors_to_polygons: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            restrict_sectors_to_polygons: true,
        }
    }
}
