//! Elevation-based flood risk thresholds.
//!
//! Low-lying ground floods first. The cut-offs are coarse heuristics for
//! coastal and riverine Indian metros, not a hydrological model.

use crate::model::FloodRisk;

/// Below this elevation (metres) the site is high risk.
pub const HIGH_RISK_BELOW_M: f64 = 5.0;

/// Below this elevation (metres), and at or above `HIGH_RISK_BELOW_M`, the
/// site is medium risk. At or above it the site is low risk.
pub const MEDIUM_RISK_BELOW_M: f64 = 15.0;

/// Classifies an elevation reading.
///
/// Total over its input: a missing (or NaN) elevation is `Unknown`, never an
/// error.
///
///   e < 5        →  High
///   5 ≤ e < 15   →  Medium
///   e ≥ 15       →  Low
pub fn classify_flood_risk(elevation_m: Option<f64>) -> FloodRisk {
    match elevation_m {
        None => FloodRisk::Unknown,
        Some(e) if e.is_nan() => FloodRisk::Unknown,
        Some(e) if e < HIGH_RISK_BELOW_M => FloodRisk::High,
        Some(e) if e < MEDIUM_RISK_BELOW_M => FloodRisk::Medium,
        Some(_) => FloodRisk::Low,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_elevation_is_unknown() {
        assert_eq!(classify_flood_risk(None), FloodRisk::Unknown);
    }

    #[test]
    fn test_nan_elevation_is_unknown() {
        assert_eq!(classify_flood_risk(Some(f64::NAN)), FloodRisk::Unknown);
    }

    #[test]
    fn test_boundaries_are_exact() {
        assert_eq!(classify_flood_risk(Some(4.999)), FloodRisk::High);
        assert_eq!(classify_flood_risk(Some(5.0)), FloodRisk::Medium);
        assert_eq!(classify_flood_risk(Some(14.999)), FloodRisk::Medium);
        assert_eq!(classify_flood_risk(Some(15.0)), FloodRisk::Low);
    }

    #[test]
    fn test_below_sea_level_is_high() {
        assert_eq!(classify_flood_risk(Some(-2.0)), FloodRisk::High);
    }

    #[test]
    fn test_infinite_elevations_still_classify() {
        assert_eq!(classify_flood_risk(Some(f64::NEG_INFINITY)), FloodRisk::High);
        assert_eq!(classify_flood_risk(Some(f64::INFINITY)), FloodRisk::Low);
    }

    #[test]
    fn test_severity_never_increases_with_elevation() {
        // Sweep -10 m .. 40 m in 0.25 m steps; higher ground must never be
        // classified as more severe than lower ground.
        let mut previous = classify_flood_risk(Some(-10.0));
        for step in 1..=200 {
            let e = -10.0 + step as f64 * 0.25;
            let current = classify_flood_risk(Some(e));
            assert!(
                current <= previous,
                "severity rose from {:?} to {:?} at {} m",
                previous,
                current,
                e
            );
            previous = current;
        }
    }
}
