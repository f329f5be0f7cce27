//! Data Source Verification Module
//!
//! Checks the configured elevation service against every reference location
//! the tool knows about (each fire station and the centre of each flood zone)
//! to confirm it is reachable and returning usable values before it is
//! relied on for assessments.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::ingest::elevation::ElevationSource;
use crate::logging::{self, Component};
use crate::model::Coordinate;
use crate::stations::FIRE_STATION_REGISTRY;
use crate::zones::FLOOD_ZONE_REGISTRY;

// ============================================================================
// Verification Results
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    pub timestamp: String,
    pub service_url: String,
    pub results: Vec<ElevationVerification>,
    pub summary: VerificationSummary,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerificationSummary {
    pub total: usize,
    pub working: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElevationVerification {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub status: VerificationStatus,
    pub elevation_m: Option<f64>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum VerificationStatus {
    Success,
    Failed,
}

// ============================================================================
// Reference points
// ============================================================================

/// Every named location worth probing: stations first, then zone centres.
pub fn reference_points() -> Vec<(String, Coordinate)> {
    let stations = FIRE_STATION_REGISTRY
        .iter()
        .map(|s| (s.name.to_string(), s.location));
    let zones = FLOOD_ZONE_REGISTRY
        .iter()
        .map(|z| (format!("{} (centre)", z.name), z.bounds.center()));
    stations.chain(zones).collect()
}

// ============================================================================
// Verification
// ============================================================================

pub fn verify_point(source: &dyn ElevationSource, name: &str, point: Coordinate) -> ElevationVerification {
    let mut result = ElevationVerification {
        name: name.to_string(),
        latitude: point.latitude,
        longitude: point.longitude,
        status: VerificationStatus::Failed,
        elevation_m: None,
        error_message: None,
    };

    match source.lookup(point) {
        Ok(elevation) => {
            result.status = VerificationStatus::Success;
            result.elevation_m = Some(elevation);
        }
        Err(e) => {
            logging::log_elevation_failure(name, "Verification lookup", &e);
            result.error_message = Some(e.to_string());
        }
    }

    result
}

/// Checks every reference point through `source`.
pub fn run_verification(source: &dyn ElevationSource, service_url: &str) -> VerificationReport {
    let mut report = VerificationReport {
        timestamp: Utc::now().to_rfc3339(),
        service_url: service_url.to_string(),
        results: Vec::new(),
        summary: VerificationSummary::default(),
    };

    for (name, point) in reference_points() {
        let result = verify_point(source, &name, point);
        match result.status {
            VerificationStatus::Success => report.summary.working += 1,
            VerificationStatus::Failed => report.summary.failed += 1,
        }
        report.summary.total += 1;
        report.results.push(result);
    }

    logging::log_batch_summary(
        Component::Elevation,
        report.summary.total,
        report.summary.working,
        report.summary.failed,
    );

    report
}

pub fn print_summary(report: &VerificationReport) {
    println!("═══════════════════════════════════════════════════════════");
    println!("📊 ELEVATION SERVICE VERIFICATION");
    println!("═══════════════════════════════════════════════════════════");
    println!("Service: {}", report.service_url);
    println!();

    for result in &report.results {
        match (&result.status, result.elevation_m) {
            (VerificationStatus::Success, Some(e)) => {
                println!("  ✓ {:<36} {:>8.1} m", result.name, e)
            }
            _ => println!(
                "  ✗ {:<36} {}",
                result.name,
                result.error_message.as_deref().unwrap_or("Unknown")
            ),
        }
    }
    println!();

    let success_rate = if report.summary.total > 0 {
        (report.summary.working as f64 / report.summary.total as f64) * 100.0
    } else {
        0.0
    };

    println!(
        "Overall Success Rate: {:.1}% ({}/{})",
        success_rate, report.summary.working, report.summary.total
    );
    println!("═══════════════════════════════════════════════════════════");
}
