//! One full risk assessment pass for a selected coordinate.
//!
//! The pass is synchronous: the elevation lookup is awaited before anything
//! that depends on it, and the other checks read only static tables. No
//! failure aborts the pass; problems are logged and copied into
//! `RiskAssessment::warnings`, and the affected fields stay `None`.

use crate::analysis::{exposure, thresholds};
use crate::ingest::elevation::{lookup_elevation, ElevationSource};
use crate::logging::{self, Component};
use crate::model::{Coordinate, FireStation, FloodZone, RiskAssessment};
use crate::stations::{self, DEFAULT_AVERAGE_SPEED_KMH, FIRE_STATION_REGISTRY};
use crate::zones::{self, FLOOD_ZONE_REGISTRY};

/// Tunables for an assessment pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssessmentOptions {
    pub average_speed_kmh: f64,
    pub exposure_count: usize,
    pub exposure_seed: u64,
}

impl Default for AssessmentOptions {
    fn default() -> Self {
        Self {
            average_speed_kmh: DEFAULT_AVERAGE_SPEED_KMH,
            exposure_count: exposure::DEFAULT_EXPOSURE_COUNT,
            exposure_seed: exposure::DEFAULT_EXPOSURE_SEED,
        }
    }
}

/// Assesses `point` against the built-in zone and station tables.
pub fn assess(
    point: Coordinate,
    elevation: &dyn ElevationSource,
    options: &AssessmentOptions,
) -> RiskAssessment {
    assess_with(point, elevation, FLOOD_ZONE_REGISTRY, FIRE_STATION_REGISTRY, options)
}

/// Assesses `point` against caller-supplied reference tables.
pub fn assess_with(
    point: Coordinate,
    elevation: &dyn ElevationSource,
    flood_zones: &[FloodZone],
    fire_stations: &[FireStation],
    options: &AssessmentOptions,
) -> RiskAssessment {
    let context = point.to_string();
    let mut warnings = Vec::new();

    let (elevation_m, lookup_error) = lookup_elevation(elevation, point);
    if let Some(e) = lookup_error {
        warnings.push(format!("Error fetching elevation data: {}", e));
    }
    let flood_risk = thresholds::classify_flood_risk(elevation_m);

    let zone = zones::zone_containing_in(flood_zones, point);
    logging::debug(
        Component::Zones,
        Some(&context),
        &format!("zone: {}", zone.map(|z| z.name).unwrap_or("none")),
    );
    let urban_flood_zone = zones::label_for(zone);

    let (nearest_station, response_time_minutes) =
        match stations::nearest_station_in(fire_stations, point, options.average_speed_kmh) {
            Ok(nearest) => {
                logging::debug(
                    Component::Stations,
                    Some(&context),
                    &format!(
                        "nearest {} at {:.2} km, eta {} min",
                        nearest.name, nearest.distance_km, nearest.eta_minutes
                    ),
                );
                (Some(nearest.name.to_string()), Some(nearest.eta_minutes))
            }
            Err(e) => {
                logging::error(Component::Stations, Some(&context), &e.to_string());
                warnings.push(e.to_string());
                (None, None)
            }
        };

    let exposure_points = exposure::generate(point, options.exposure_count, options.exposure_seed);

    RiskAssessment {
        coordinate: point,
        elevation_m,
        flood_risk,
        urban_flood_zone,
        nearest_station,
        response_time_minutes,
        exposure_points,
        warnings,
    }
}
