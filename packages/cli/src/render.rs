//! Turns a filter view into what the map renderer consumes.

use film_map_feature_models::{LocationDetails, LocationFeature, SectorName};
use film_map_filter::{FilterSession, FilterView};
use film_map_spatial::{BoundingBox, SectorIndex};
use serde::Serialize;

/// The highlighted sector and where to frame the map.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight<'a> {
    /// Selected sector.
    pub name: &'a SectorName,
    /// Bounds of its polygon, `None` if the sector has no polygon.
    pub bounds: Option<BoundingBox>,
}

/// Render payload: the filter view plus highlight geometry.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderPayload<'a> {
    #[serde(flatten)]
    pub view: FilterView<'a>,
    pub highlight: Option<Highlight<'a>>,
}

#[must_use]
pub fn payload<'a>(session: &'a FilterSession, index: &SectorIndex) -> RenderPayload<'a> {
    let view = session.view();
    let highlight = view.highlighted_sector.map(|name| Highlight {
        name,
        bounds: index.bounds(name),
    });
    RenderPayload { view, highlight }
}

/// Popup text for one location.
#[must_use]
pub fn popup(feature: &LocationFeature) -> String {
    let details = &feature.details;
    format!(
        "{}\n  {}\n  {}\n  {}\n  images/{}",
        feature.heading(),
        LocationDetails::display(details.director.as_ref()),
        LocationDetails::display(details.genre.as_ref()),
        LocationDetails::display(details.note.as_ref()),
        LocationDetails::display(details.image.as_ref()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use film_map_feature_models::{FeatureStore, FilmTitle, MISSING_PLACEHOLDER, SectorFeature};
    use film_map_filter_models::{Dimension, FilterCommand, FilterConfig};
    use std::sync::Arc;

    fn store() -> FeatureStore {
        let mut ema = LocationFeature::at(-71.6305, -33.042);
        ema.year = Some(2019);
        ema.film = Some(FilmTitle::new("Ema"));
        ema.sector = Some(SectorName::new("Cerro Alegre"));
        ema.details.director = Some("Pablo Larraín".to_string());

        let sector = SectorFeature {
            name: SectorName::new("Cerro Alegre"),
            geometry: geojson::Geometry::new(geojson::Value::Polygon(vec![vec![
                vec![-71.632, -33.044],
                vec![-71.629, -33.044],
                vec![-71.629, -33.040],
                vec![-71.632, -33.040],
                vec![-71.632, -33.044],
            ]])),
        };
        FeatureStore::new(vec![ema], vec![sector])
    }

    #[test]
    fn payload_frames_the_selected_sector() {
        let store = store();
        let index = SectorIndex::build(store.sectors());
        let mut session = FilterSession::new(Arc::new(store), FilterConfig::default());
        session.dispatch(&FilterCommand::set(Dimension::Sector, "Cerro Alegre").unwrap());

        let json = serde_json::to_value(payload(&session, &index)).unwrap();
        assert_eq!(json["highlight"]["name"], "Cerro Alegre");
        assert_eq!(json["highlight"]["bounds"]["west"], -71.632);
        assert_eq!(json["features"].as_array().map(Vec::len), Some(1));
        assert_eq!(json["total"], 1);
    }

    #[test]
    fn payload_without_sector_has_no_highlight() {
        let store = store();
        let index = SectorIndex::build(store.sectors());
        let session = FilterSession::new(Arc::new(store), FilterConfig::default());

        let json = serde_json::to_value(payload(&session, &index)).unwrap();
        assert!(json["highlight"].is_null());
    }

    #[test]
    fn popup_uses_placeholders_for_missing_fields() {
        let store = store();
        let text = popup(&store.locations()[0]);
        assert!(text.starts_with("Ema (2019)"));
        assert!(text.contains("Pablo Larraín"));
        assert!(text.contains(MISSING_PLACEHOLDER));
    }
}
