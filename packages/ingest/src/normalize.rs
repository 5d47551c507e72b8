//! Normalizes raw `GeoJSON` features onto the canonical feature schema.
//!
//! Uses the dataset's field mappings to pull each attribute out of
//! whichever property key the source happens to use. This is the only
//! place that knows about source property names.

use film_map_feature_models::{
    FilmTitle, LocationDetails, LocationFeature, SectorFeature, SectorName,
};
use film_map_ingest_models::{LocationFieldMapping, SectorFieldMapping};
use geojson::{FeatureCollection, JsonObject, JsonValue};

/// Normalizes every point feature of the locations document.
///
/// Skips features without a point geometry.
#[must_use]
pub fn normalize_locations(
    collection: &FeatureCollection,
    fields: &LocationFieldMapping,
) -> Vec<LocationFeature> {
    collection
        .features
        .iter()
        .enumerate()
        .filter_map(|(i, feature)| {
            let location = normalize_location(feature, fields);
            if location.is_none() {
                log::warn!("Skipping location feature {i}: no point geometry");
            }
            location
        })
        .collect()
}

/// Normalizes a single location feature.
fn normalize_location(
    feature: &geojson::Feature,
    fields: &LocationFieldMapping,
) -> Option<LocationFeature> {
    let (longitude, latitude) = point_coordinates(feature.geometry.as_ref()?)?;
    let properties = feature.properties.clone().unwrap_or_default();

    let year = first_value(&properties, &fields.year).and_then(parse_year);
    let film = text(&properties, &fields.film).map(FilmTitle::new);
    let sector = text(&properties, &fields.sector).map(SectorName::new);
    let details = LocationDetails {
        director: text(&properties, &fields.director),
        genre: text(&properties, &fields.genre),
        note: text(&properties, &fields.note),
        image: text(&properties, &fields.image),
    };

    Some(LocationFeature {
        longitude,
        latitude,
        year,
        film,
        sector,
        details,
        properties,
    })
}

/// Normalizes every polygon feature of the sectors document.
///
/// Skips features with a missing name or a non-polygon geometry.
#[must_use]
pub fn normalize_sectors(
    collection: &FeatureCollection,
    fields: &SectorFieldMapping,
) -> Vec<SectorFeature> {
    collection
        .features
        .iter()
        .enumerate()
        .filter_map(|(i, feature)| {
            let sector = normalize_sector(feature, fields);
            if sector.is_none() {
                log::warn!("Skipping sector feature {i}: missing name or polygon");
            }
            sector
        })
        .collect()
}

/// Normalizes a single sector feature.
fn normalize_sector(feature: &geojson::Feature, fields: &SectorFieldMapping) -> Option<SectorFeature> {
    let name = text(feature.properties.as_ref()?, &fields.name)?;
    let geometry = feature.geometry.as_ref()?;

    match geometry.value {
        geojson::Value::Polygon(_) | geojson::Value::MultiPolygon(_) => Some(SectorFeature {
            name: SectorName::new(name),
            geometry: geometry.clone(),
        }),
        _ => None,
    }
}

/// Extracts `(lng, lat)` from a point geometry.
fn point_coordinates(geometry: &geojson::Geometry) -> Option<(f64, f64)> {
    match &geometry.value {
        geojson::Value::Point(coords) if coords.len() >= 2 => Some((coords[0], coords[1])),
        _ => None,
    }
}

/// First candidate key present with a non-null value.
fn first_value<'a>(properties: &'a JsonObject, candidates: &[String]) -> Option<&'a JsonValue> {
    candidates
        .iter()
        .filter_map(|key| properties.get(key))
        .find(|value| !value.is_null())
}

/// First candidate value as trimmed, non-empty text. Numbers are
/// rendered as text; other JSON types are ignored.
fn text(properties: &JsonObject, candidates: &[String]) -> Option<String> {
    let value = first_value(properties, candidates)?;
    let s = match value {
        JsonValue::String(s) => s.trim().to_string(),
        JsonValue::Number(n) => n.to_string(),
        _ => return None,
    };
    (!s.is_empty()).then_some(s)
}

/// Parses a production year from a JSON integer, an integral float, or a
/// string holding an integer. Anything else yields `None`.
#[must_use]
pub fn parse_year(value: &JsonValue) -> Option<i32> {
    match value {
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                return i32::try_from(i).ok();
            }
            let f = n.as_f64()?;
            if f.fract() != 0.0 || f < f64::from(i32::MIN) || f > f64::from(i32::MAX) {
                return None;
            }
            #[allow(clippy::cast_possible_truncation)]
            Some(f as i32)
        }
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetchers::parse_collection;
    use serde_json::json;

    fn collection(features: &JsonValue) -> FeatureCollection {
        let doc = json!({ "type": "FeatureCollection", "features": features });
        parse_collection(&doc.to_string()).unwrap()
    }

    fn point(properties: &JsonValue) -> JsonValue {
        json!({
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [-71.63, -33.042] },
            "properties": properties,
        })
    }

    #[test]
    fn maps_source_field_names_onto_canonical_attributes() {
        let doc = collection(&json!([point(&json!({
            "año": 2019,
            "nombre_peli": "Ema",
            "director": "Pablo Larraín",
            "genero": "Drama",
            "nota_breve": "Miradores",
            "imagen_asociada": "ema.jpg",
            "sector": "Cerro Alegre",
        }))]));
        let locations = normalize_locations(&doc, &LocationFieldMapping::default());

        assert_eq!(locations.len(), 1);
        let ema = &locations[0];
        assert_eq!(ema.year, Some(2019));
        assert_eq!(ema.film, Some(FilmTitle::new("Ema")));
        assert_eq!(ema.sector, Some(SectorName::new("Cerro Alegre")));
        assert_eq!(ema.details.director.as_deref(), Some("Pablo Larraín"));
        assert_eq!(ema.details.image.as_deref(), Some("ema.jpg"));
        assert!((ema.longitude - -71.63).abs() < f64::EPSILON);
        assert_eq!(ema.properties["nota_breve"], "Miradores");
    }

    #[test]
    fn falls_through_to_alternate_keys() {
        let doc = collection(&json!([
            point(&json!({ "anio": "1972", "pelicula": "Ya no basta con rezar", "nombre_sector": "Plan" })),
            point(&json!({ "año": null, "anio": 1969, "sector": "  " })),
        ]));
        let locations = normalize_locations(&doc, &LocationFieldMapping::default());

        assert_eq!(locations[0].year, Some(1972));
        assert_eq!(locations[0].film, Some(FilmTitle::new("Ya no basta con rezar")));
        assert_eq!(locations[0].sector, Some(SectorName::new("Plan")));
        assert_eq!(locations[1].year, Some(1969));
        assert_eq!(locations[1].sector, None);
    }

    #[test]
    fn skips_features_without_points() {
        let doc = collection(&json!([
            { "type": "Feature", "geometry": null, "properties": { "año": 2001 } },
            {
                "type": "Feature",
                "geometry": { "type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]] },
                "properties": {},
            },
            point(&json!({})),
        ]));
        let locations = normalize_locations(&doc, &LocationFieldMapping::default());
        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].year, None);
        assert_eq!(locations[0].film, None);
    }

    #[test]
    fn parses_years_leniently_but_not_loosely() {
        assert_eq!(parse_year(&json!(1963)), Some(1963));
        assert_eq!(parse_year(&json!(1963.0)), Some(1963));
        assert_eq!(parse_year(&json!(" 1990 ")), Some(1990));
        assert_eq!(parse_year(&json!(1963.5)), None);
        assert_eq!(parse_year(&json!("década del 60")), None);
        assert_eq!(parse_year(&json!(true)), None);
        assert_eq!(parse_year(&json!(9_999_999_999_i64)), None);
    }

    #[test]
    fn normalizes_sector_polygons() {
        let doc = collection(&json!([
            {
                "type": "Feature",
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[-71.632, -33.044], [-71.629, -33.044], [-71.629, -33.04], [-71.632, -33.044]]],
                },
                "properties": { "name": "Cerro Alegre" },
            },
            {
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [-71.62, -33.04] },
                "properties": { "nombre": "Muelle Prat" },
            },
            {
                "type": "Feature",
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]],
                },
                "properties": { "nombre": "" },
            },
        ]));
        let sectors = normalize_sectors(&doc, &SectorFieldMapping::default());
        assert_eq!(sectors.len(), 1);
        assert_eq!(sectors[0].name, SectorName::new("Cerro Alegre"));
    }
}
