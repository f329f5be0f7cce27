/// Declarative map layer descriptions.
///
/// The map widget is not part of this crate. What it needs from us is plain
/// geometry and styling: a translucent rectangle per flood zone, the fire
/// stations, the selected point, and the synthetic exposure points. These
/// structs serialize to JSON in a deck.gl-like shape (`[lon, lat]` positions,
/// RGB(A) colour arrays, radii in metres).

use serde::Serialize;

use crate::model::{Coordinate, ExposurePoint, FireStation, FloodZone, INDIA_CENTER};
use crate::stations::FIRE_STATION_REGISTRY;
use crate::zones::FLOOD_ZONE_REGISTRY;

pub const FLOOD_ZONE_FILL: [u8; 4] = [255, 0, 0, 50];
pub const FIRE_STATION_FILL: [u8; 4] = [255, 0, 0, 255];
pub const SELECTED_FILL: [u8; 4] = [0, 128, 255, 255];
pub const EXPOSURE_FILL: [u8; 4] = [255, 165, 0, 255];

pub const FIRE_STATION_RADIUS_M: f64 = 80.0;
pub const SELECTED_RADIUS_M: f64 = 150.0;
pub const EXPOSURE_RADIUS_M: f64 = 70.0;

/// Initial camera over the Indian subcontinent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            latitude: INDIA_CENTER.latitude,
            longitude: INDIA_CENTER.longitude,
            zoom: 5.0,
        }
    }
}

/// One marker in a scatter layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    /// `[lon, lat]`
    pub position: [f64; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ScatterPoint {
    fn at(c: Coordinate, label: Option<String>) -> Self {
        Self {
            position: [c.longitude, c.latitude],
            label,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum MapLayer {
    PolygonLayer {
        id: String,
        /// Closed rings of `[lon, lat]` vertices.
        polygons: Vec<Vec<[f64; 2]>>,
        fill_color: [u8; 4],
        pickable: bool,
    },
    ScatterplotLayer {
        id: String,
        points: Vec<ScatterPoint>,
        fill_color: [u8; 4],
        radius: f64,
        pickable: bool,
    },
}

impl MapLayer {
    pub fn id(&self) -> &str {
        match self {
            MapLayer::PolygonLayer { id, .. } | MapLayer::ScatterplotLayer { id, .. } => id,
        }
    }
}

/// Everything the map widget needs for one render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapScene {
    pub initial_view_state: ViewState,
    pub layers: Vec<MapLayer>,
}

fn zone_layer(zone: &FloodZone) -> MapLayer {
    MapLayer::PolygonLayer {
        id: format!("flood-zone:{}", zone.name),
        polygons: vec![zone.bounds.ring()],
        fill_color: FLOOD_ZONE_FILL,
        pickable: false,
    }
}

fn station_layer(stations: &[FireStation]) -> MapLayer {
    MapLayer::ScatterplotLayer {
        id: "fire-stations".to_string(),
        points: stations
            .iter()
            .map(|s| ScatterPoint::at(s.location, Some(s.name.to_string())))
            .collect(),
        fill_color: FIRE_STATION_FILL,
        radius: FIRE_STATION_RADIUS_M,
        pickable: true,
    }
}

/// Builds the layer stack, bottom to top: flood zones, fire stations, the
/// selected point, exposure points.
pub fn build_layers(selected: Coordinate, exposure: &[ExposurePoint]) -> Vec<MapLayer> {
    let mut layers: Vec<MapLayer> = FLOOD_ZONE_REGISTRY.iter().map(zone_layer).collect();

    layers.push(station_layer(FIRE_STATION_REGISTRY));

    layers.push(MapLayer::ScatterplotLayer {
        id: "selected-location".to_string(),
        points: vec![ScatterPoint::at(selected, None)],
        fill_color: SELECTED_FILL,
        radius: SELECTED_RADIUS_M,
        pickable: false,
    });

    layers.push(MapLayer::ScatterplotLayer {
        id: "exposure".to_string(),
        points: exposure
            .iter()
            .map(|p| ScatterPoint::at(p.location, Some(p.risk.to_string())))
            .collect(),
        fill_color: EXPOSURE_FILL,
        radius: EXPOSURE_RADIUS_M,
        pickable: true,
    });

    layers
}

/// Full scene with the default camera.
pub fn build_scene(selected: Coordinate, exposure: &[ExposurePoint]) -> MapScene {
    MapScene {
        initial_view_state: ViewState::default(),
        layers: build_layers(selected, exposure),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::exposure;

    #[test]
    fn test_layer_stack_order() {
        let selected = Coordinate::new(19.076, 72.8777);
        let points = exposure::generate(selected, 5, 42);
        let layers = build_layers(selected, &points);

        assert_eq!(layers.len(), FLOOD_ZONE_REGISTRY.len() + 3);
        let ids: Vec<_> = layers.iter().map(|l| l.id()).collect();
        assert_eq!(ids[0], "flood-zone:Mumbai Flood Zone");
        assert_eq!(&ids[5..], ["fire-stations", "selected-location", "exposure"]);
    }

    #[test]
    fn test_zone_polygons_are_four_vertex_rectangles() {
        let layers = build_layers(INDIA_CENTER, &[]);
        for layer in &layers[..FLOOD_ZONE_REGISTRY.len()] {
            match layer {
                MapLayer::PolygonLayer { polygons, fill_color, .. } => {
                    assert_eq!(polygons.len(), 1);
                    assert_eq!(polygons[0].len(), 4);
                    assert_eq!(*fill_color, FLOOD_ZONE_FILL);
                }
                other => panic!("expected polygon layer, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_selected_point_is_lon_lat_ordered() {
        let layers = build_layers(Coordinate::new(12.97, 77.59), &[]);
        match &layers[FLOOD_ZONE_REGISTRY.len() + 1] {
            MapLayer::ScatterplotLayer { points, radius, .. } => {
                assert_eq!(points[0].position, [77.59, 12.97]);
                assert_eq!(*radius, SELECTED_RADIUS_M);
            }
            other => panic!("expected scatter layer, got {:?}", other),
        }
    }

    #[test]
    fn test_scene_serializes_with_layer_type_tags() {
        let scene = build_scene(INDIA_CENTER, &exposure::generate(INDIA_CENTER, 2, 42));
        let json = serde_json::to_value(&scene).expect("scene serializes");

        assert_eq!(json["initial_view_state"]["zoom"], 5.0);
        assert_eq!(json["layers"][0]["type"], "PolygonLayer");
        assert_eq!(json["layers"][5]["type"], "ScatterplotLayer");
        assert_eq!(json["layers"][5]["points"].as_array().map(Vec::len), Some(10));
        assert_eq!(json["layers"][7]["points"].as_array().map(Vec::len), Some(2));
        // Unlabelled points omit the label key entirely.
        assert!(json["layers"][6]["points"][0].get("label").is_none());
    }
}
