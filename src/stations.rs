/// Fire station registry and response-time estimation.
///
/// Defines the canonical list of fire stations used for response-time
/// estimates, two per covered metro. This is the single source of truth for
/// station locations; the map layers and the assessment both read from here.
///
/// Distances are WGS84 geodesic (ellipsoidal) surface distances. Travel time
/// assumes a fixed average road speed, so the estimate is a straight-line
/// lower bound rather than a routed drive time.

use geo::{GeodesicDistance, Point};

use crate::model::{Coordinate, FireStation, RegistryError};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Assumed average fire brigade road speed.
pub const DEFAULT_AVERAGE_SPEED_KMH: f64 = 40.0;

// ---------------------------------------------------------------------------
// Station table
// ---------------------------------------------------------------------------

/// All fire stations, grouped by metro. Table order breaks distance ties.
pub static FIRE_STATION_REGISTRY: &[FireStation] = &[
    FireStation { name: "Mumbai Fire Station 1", location: Coordinate::new(19.015, 72.85) },
    FireStation { name: "Mumbai Fire Station 2", location: Coordinate::new(18.975, 72.81) },
    FireStation { name: "Chennai Fire Station 1", location: Coordinate::new(13.080, 80.275) },
    FireStation { name: "Chennai Fire Station 2", location: Coordinate::new(13.065, 80.250) },
    FireStation { name: "Kolkata Fire Station 1", location: Coordinate::new(22.57, 88.36) },
    FireStation { name: "Kolkata Fire Station 2", location: Coordinate::new(22.53, 88.38) },
    FireStation { name: "Delhi Fire Station 1", location: Coordinate::new(28.65, 77.20) },
    FireStation { name: "Delhi Fire Station 2", location: Coordinate::new(28.62, 77.22) },
    FireStation { name: "Bengaluru Fire Station 1", location: Coordinate::new(12.98, 77.58) },
    FireStation { name: "Bengaluru Fire Station 2", location: Coordinate::new(12.95, 77.60) },
];

// ---------------------------------------------------------------------------
// Distance and ETA
// ---------------------------------------------------------------------------

/// Geodesic distance between two points, in kilometres.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let pa = Point::new(a.longitude, a.latitude);
    let pb = Point::new(b.longitude, b.latitude);
    pa.geodesic_distance(&pb) / 1000.0
}

/// Minutes to cover `distance_km` at `speed_kmh`, rounded to one decimal.
pub fn eta_minutes(distance_km: f64, speed_kmh: f64) -> f64 {
    let minutes = distance_km / speed_kmh * 60.0;
    (minutes * 10.0).round() / 10.0
}

// ---------------------------------------------------------------------------
// Nearest-station query
// ---------------------------------------------------------------------------

/// Result of a nearest-station lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct NearestStation {
    pub name: &'static str,
    pub distance_km: f64,
    pub eta_minutes: f64,
}

/// Finds the station in `stations` closest to `point`.
///
/// Ties go to the station listed first; a later station only replaces the
/// current best when strictly closer. Returns `RegistryError::NoStations`
/// for an empty slice rather than inventing a minimum.
pub fn nearest_station_in(
    stations: &[FireStation],
    point: Coordinate,
    speed_kmh: f64,
) -> Result<NearestStation, RegistryError> {
    let mut best: Option<(&FireStation, f64)> = None;

    for station in stations {
        let d = distance_km(point, station.location);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((station, d)),
        }
    }

    let (station, d) = best.ok_or(RegistryError::NoStations)?;
    Ok(NearestStation {
        name: station.name,
        distance_km: d,
        eta_minutes: eta_minutes(d, speed_kmh),
    })
}

/// Nearest station from the built-in table at the default road speed.
pub fn nearest_station(point: Coordinate) -> Result<NearestStation, RegistryError> {
    nearest_station_in(FIRE_STATION_REGISTRY, point, DEFAULT_AVERAGE_SPEED_KMH)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_has_two_stations_per_metro() {
        assert_eq!(FIRE_STATION_REGISTRY.len(), 10);
        for metro in ["Mumbai", "Chennai", "Kolkata", "Delhi", "Bengaluru"] {
            let count = FIRE_STATION_REGISTRY
                .iter()
                .filter(|s| s.name.starts_with(metro))
                .count();
            assert_eq!(count, 2, "expected two stations for {}", metro);
        }
    }

    #[test]
    fn test_no_duplicate_station_names() {
        let mut seen = std::collections::HashSet::new();
        for station in FIRE_STATION_REGISTRY {
            assert!(
                seen.insert(station.name),
                "duplicate station '{}' found in FIRE_STATION_REGISTRY",
                station.name
            );
        }
    }

    #[test]
    fn test_all_stations_inside_india_input_box() {
        for station in FIRE_STATION_REGISTRY {
            assert!(
                station.location.is_within_india(),
                "station '{}' lies outside the accepted input box",
                station.name
            );
        }
    }

    #[test]
    fn test_eta_for_40_km_is_one_hour() {
        assert_eq!(eta_minutes(40.0, 40.0), 60.0);
    }

    #[test]
    fn test_eta_for_20_km_is_half_an_hour() {
        assert_eq!(eta_minutes(20.0, 40.0), 30.0);
    }

    #[test]
    fn test_eta_is_rounded_to_one_decimal() {
        // 7.3 km at 40 km/h = 10.95 min exactly in decimal; the float lands
        // just either side, so only check the precision.
        let eta = eta_minutes(7.3, 40.0);
        assert!((eta * 10.0 - (eta * 10.0).round()).abs() < 1e-9);

        assert_eq!(eta_minutes(1.0, 40.0), 1.5);
        assert_eq!(eta_minutes(1.234, 40.0), 1.9);
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let p = Coordinate::new(19.015, 72.85);
        assert!(distance_km(p, p).abs() < 1e-9);
    }

    #[test]
    fn test_one_degree_of_latitude_is_about_110_km() {
        let d = distance_km(Coordinate::new(20.0, 78.0), Coordinate::new(21.0, 78.0));
        assert!((d - 110.7).abs() < 0.5, "got {} km", d);
    }

    #[test]
    fn test_nearest_for_central_mumbai_is_a_mumbai_station() {
        let nearest = nearest_station(Coordinate::new(19.0760, 72.8777)).expect("registry is not empty");
        assert!(nearest.name.starts_with("Mumbai"), "got {}", nearest.name);
        assert!(nearest.distance_km < 10.0);
        assert!(nearest.eta_minutes < 15.0);
    }

    #[test]
    fn test_nearest_for_each_station_location_is_itself() {
        for station in FIRE_STATION_REGISTRY {
            let nearest = nearest_station(station.location).expect("registry is not empty");
            assert_eq!(nearest.name, station.name);
            assert_eq!(nearest.eta_minutes, 0.0);
        }
    }

    #[test]
    fn test_equidistant_stations_resolve_to_first_listed() {
        let shared = Coordinate::new(15.0, 75.0);
        let stations = [
            FireStation { name: "First", location: shared },
            FireStation { name: "Second", location: shared },
        ];
        for _ in 0..3 {
            let nearest = nearest_station_in(&stations, Coordinate::new(15.1, 75.1), 40.0)
                .expect("two stations present");
            assert_eq!(nearest.name, "First");
        }
    }

    #[test]
    fn test_empty_registry_is_an_error() {
        let result = nearest_station_in(&[], Coordinate::new(19.0, 72.8), 40.0);
        assert_eq!(result, Err(RegistryError::NoStations));
    }

    #[test]
    fn test_faster_speed_shortens_eta() {
        let point = Coordinate::new(28.70, 77.10);
        let slow = nearest_station_in(FIRE_STATION_REGISTRY, point, 20.0).expect("non-empty");
        let fast = nearest_station_in(FIRE_STATION_REGISTRY, point, 60.0).expect("non-empty");
        assert_eq!(slow.name, fast.name);
        assert!(fast.eta_minutes < slow.eta_minutes);
    }
}
