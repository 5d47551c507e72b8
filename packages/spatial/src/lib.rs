#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! In-memory spatial index over sector polygons.
//!
//! Builds an R-tree from the loaded sector features and provides
//! point-in-polygon lookups (used to attribute locations that carry no
//! sector property) and per-sector bounding boxes (used to frame the
//! highlighted sector).

use std::collections::BTreeMap;

use film_map_feature_models::{SectorFeature, SectorName};
use geo::{Area, BoundingRect, Contains, MultiPolygon};
use rstar::{AABB, RTree, RTreeObject};
use serde::Serialize;

/// A sector polygon stored in the R-tree with its metadata.
struct SectorEntry {
    name: SectorName,
    area: f64,
    envelope: AABB<[f64; 2]>,
    polygon: MultiPolygon<f64>,
}

impl RTreeObject for SectorEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// Axis-aligned bounds of a sector, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    /// Minimum longitude.
    pub west: f64,
    /// Minimum latitude.
    pub south: f64,
    /// Maximum longitude.
    pub east: f64,
    /// Maximum latitude.
    pub north: f64,
}

impl BoundingBox {
    fn union(self, other: Self) -> Self {
        Self {
            west: self.west.min(other.west),
            south: self.south.min(other.south),
            east: self.east.max(other.east),
            north: self.north.max(other.north),
        }
    }

    /// Center point as `(lng, lat)`.
    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (
            f64::midpoint(self.west, self.east),
            f64::midpoint(self.south, self.north),
        )
    }
}

/// Pre-built spatial index for sector polygons.
pub struct SectorIndex {
    sectors: RTree<SectorEntry>,
    bounds: BTreeMap<SectorName, BoundingBox>,
}

impl SectorIndex {
    /// Builds the index from sector features.
    ///
    /// Sectors whose geometry is not a polygon or multipolygon are skipped
    /// with a warning.
    #[must_use]
    pub fn build(sectors: &[SectorFeature]) -> Self {
        let mut entries = Vec::with_capacity(sectors.len());
        let mut bounds: BTreeMap<SectorName, BoundingBox> = BTreeMap::new();

        for sector in sectors {
            let Some(polygon) = to_multipolygon(&sector.geometry) else {
                log::warn!("Sector {} has no polygon geometry, not indexed", sector.name);
                continue;
            };
            let Some(rect) = polygon.bounding_rect() else {
                log::warn!("Sector {} has an empty polygon, not indexed", sector.name);
                continue;
            };

            let bbox = BoundingBox {
                west: rect.min().x,
                south: rect.min().y,
                east: rect.max().x,
                north: rect.max().y,
            };
            bounds
                .entry(sector.name.clone())
                .and_modify(|b| *b = b.union(bbox))
                .or_insert(bbox);

            entries.push(SectorEntry {
                name: sector.name.clone(),
                area: polygon.unsigned_area(),
                envelope: AABB::from_corners([bbox.west, bbox.south], [bbox.east, bbox.north]),
                polygon,
            });
        }

        log::debug!("Indexed {} sector polygons", entries.len());

        Self {
            sectors: RTree::bulk_load(entries),
            bounds,
        }
    }

    /// Number of indexed polygons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sectors.size()
    }

    /// Whether no polygon was indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Looks up the sector containing a point.
    ///
    /// Sectors can overlap; the smallest area wins.
    #[must_use]
    pub fn lookup_sector(&self, lng: f64, lat: f64) -> Option<&SectorName> {
        let point = geo::Point::new(lng, lat);
        let query_env = AABB::from_point([lng, lat]);

        let mut best: Option<&SectorEntry> = None;

        for entry in self.sectors.locate_in_envelope_intersecting(&query_env) {
            if entry.polygon.contains(&point) {
                match best {
                    None => best = Some(entry),
                    Some(current) if entry.area < current.area => {
                        best = Some(entry);
                    }
                    _ => {}
                }
            }
        }

        best.map(|e| &e.name)
    }

    /// Bounds of every polygon carrying `name`, merged.
    #[must_use]
    pub fn bounds(&self, name: &SectorName) -> Option<BoundingBox> {
        self.bounds.get(name).copied()
    }
}

/// Converts a `GeoJSON` geometry into a [`MultiPolygon`].
/// Handles both `Polygon` and `MultiPolygon` geometry types.
fn to_multipolygon(geometry: &geojson::Geometry) -> Option<MultiPolygon<f64>> {
    let geo_geom: geo::Geometry<f64> = geometry.clone().try_into().ok()?;
    match geo_geom {
        geo::Geometry::MultiPolygon(mp) => Some(mp),
        geo::Geometry::Polygon(p) => Some(MultiPolygon(vec![p])),
        _ => None,
    }
}
