//! Fills in missing location sectors from the sector polygons.

use film_map_feature_models::{LocationFeature, SectorFeature};
use film_map_spatial::SectorIndex;

/// Assigns the containing sector to every location that has none.
///
/// Locations that already carry a sector are left alone, even when their
/// point lies in a different polygon. Returns how many were assigned.
pub fn attribute_missing_sectors(
    locations: &mut [LocationFeature],
    sectors: &[SectorFeature],
) -> usize {
    if locations.iter().all(|l| l.sector.is_some()) {
        return 0;
    }

    let index = SectorIndex::build(sectors);
    let mut assigned = 0;

    for location in locations.iter_mut().filter(|l| l.sector.is_none()) {
        if let Some(name) = index.lookup_sector(location.longitude, location.latitude) {
            location.sector = Some(name.clone());
            assigned += 1;
        }
    }

    log::info!("Attributed {assigned} locations to sectors by position");
    assigned
}

#[cfg(test)]
mod tests {
    use super::*;
    use film_map_feature_models::SectorName;

    fn square(name: &str, west: f64, south: f64) -> SectorFeature {
        let (east, north) = (west + 0.01, south + 0.01);
        SectorFeature {
            name: SectorName::new(name),
            geometry: geojson::Geometry::new(geojson::Value::Polygon(vec![vec![
                vec![west, south],
                vec![east, south],
                vec![east, north],
                vec![west, north],
                vec![west, south],
            ]])),
        }
    }

    #[test]
    fn only_missing_sectors_are_filled() {
        let sectors = vec![square("Playa Ancha", -71.65, -33.04)];
        let mut tagged = LocationFeature::at(-71.645, -33.035);
        tagged.sector = Some(SectorName::new("Cerro Alegre"));
        let untagged = LocationFeature::at(-71.645, -33.035);
        let outside = LocationFeature::at(-71.50, -33.00);
        let mut locations = vec![tagged, untagged, outside];

        let assigned = attribute_missing_sectors(&mut locations, &sectors);

        assert_eq!(assigned, 1);
        assert_eq!(locations[0].sector, Some(SectorName::new("Cerro Alegre")));
        assert_eq!(locations[1].sector, Some(SectorName::new("Playa Ancha")));
        assert_eq!(locations[2].sector, None);
    }
}
