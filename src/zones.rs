/// Urban flood zone registry.
///
/// Defines the metro areas treated as urban-flood-prone, each as an
/// axis-aligned lat/lon rectangle. This is the single source of truth for
/// zone geometry; the map layers and the assessment both read from here.
///
/// Zones are not guaranteed to be disjoint. Lookups return the first zone
/// in table order that contains the point, so table order is part of the
/// contract.

use crate::model::{BoundingBox, Coordinate, FloodZone, LOW_URBAN_FLOOD_RISK};

// ---------------------------------------------------------------------------
// Zone table
// ---------------------------------------------------------------------------

/// All urban flood zones, in lookup priority order.
pub static FLOOD_ZONE_REGISTRY: &[FloodZone] = &[
    FloodZone {
        name: "Mumbai Flood Zone",
        bounds: BoundingBox::new(Coordinate::new(18.90, 72.75), Coordinate::new(19.15, 72.95)),
    },
    FloodZone {
        name: "Chennai Flood Zone",
        bounds: BoundingBox::new(Coordinate::new(13.00, 80.20), Coordinate::new(13.15, 80.30)),
    },
    FloodZone {
        name: "Kolkata Flood Zone",
        bounds: BoundingBox::new(Coordinate::new(22.45, 88.30), Coordinate::new(22.60, 88.45)),
    },
    FloodZone {
        name: "Delhi Flood Zone",
        bounds: BoundingBox::new(Coordinate::new(28.55, 77.15), Coordinate::new(28.75, 77.35)),
    },
    FloodZone {
        name: "Bengaluru Flood Zone",
        bounds: BoundingBox::new(Coordinate::new(12.90, 77.50), Coordinate::new(13.05, 77.65)),
    },
];

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Returns the first zone in `zones` whose rectangle contains `point`.
pub fn zone_containing_in(zones: &[FloodZone], point: Coordinate) -> Option<&FloodZone> {
    zones.iter().find(|z| z.bounds.contains(point))
}

/// Looks up `point` against the built-in zone table.
pub fn zone_containing(point: Coordinate) -> Option<&'static FloodZone> {
    zone_containing_in(FLOOD_ZONE_REGISTRY, point)
}

/// Human-readable urban flood label for a zone lookup result.
pub fn label_for(zone: Option<&FloodZone>) -> String {
    match zone {
        Some(z) => format!("High Urban Flood Risk ({})", z.name),
        None => LOW_URBAN_FLOOD_RISK.to_string(),
    }
}

/// Urban flood label for `point` against the built-in zone table.
pub fn urban_flood_label(point: Coordinate) -> String {
    label_for(zone_containing(point))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
