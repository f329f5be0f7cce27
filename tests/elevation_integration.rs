/// Live elevation service tests
///
/// These hit the public Open-Elevation API and are marked #[ignore] so
/// normal runs do not depend on external availability.
///
/// Run with: cargo test --test elevation_integration -- --ignored --test-threads=1
///
/// Note: the public instance is rate limited and occasionally down; a
/// failure here says more about the service than about this crate.

use std::time::Duration;

use uwrisk_service::analysis::assessment::{assess, AssessmentOptions};
use uwrisk_service::ingest::elevation::{
    build_lookup_url, ElevationSource, OpenElevationClient, OPEN_ELEVATION_BASE_URL,
};
use uwrisk_service::model::{Coordinate, ElevationError};
use uwrisk_service::verify::{print_summary, run_verification};

fn live_client() -> OpenElevationClient {
    OpenElevationClient::new(OPEN_ELEVATION_BASE_URL, Some(Duration::from_secs(30)))
        .expect("Failed to create HTTP client")
}

#[test]
#[ignore] // Don't run in CI - depends on external API
fn test_lookup_returns_plausible_elevation_for_delhi() {
    let point = Coordinate::new(28.6139, 77.2090);
    println!("Testing elevation API: {}", build_lookup_url(OPEN_ELEVATION_BASE_URL, point));

    let elevation = live_client().lookup(point).expect("Delhi lookup should succeed");

    println!("✓ Delhi elevation: {} m", elevation);
    assert!(
        (150.0..=300.0).contains(&elevation),
        "Delhi sits around 200-220 m, got {}",
        elevation
    );
}

#[test]
#[ignore] // Don't run in CI - depends on external API
fn test_live_assessment_for_mumbai_has_elevation() {
    let result = assess(
        Coordinate::new(19.0760, 72.8777),
        &live_client(),
        &AssessmentOptions::default(),
    );
    assert!(result.elevation_m.is_some(), "warnings: {:?}", result.warnings);
}

#[test]
#[ignore] // Don't run in CI - depends on external API
fn test_unreachable_host_is_a_request_error() {
    let client = OpenElevationClient::new("http://127.0.0.1:9", Some(Duration::from_secs(2)))
        .expect("client builds");
    let result = client.lookup(Coordinate::new(20.0, 75.0));
    assert!(matches!(result, Err(ElevationError::Request(_))), "got {:?}", result);
}

#[test]
#[ignore] // Don't run in CI - depends on external API
fn test_full_verification_report() {
    println!("\n🚀 Running Elevation Service Verification");
    println!("═══════════════════════════════════════════════════════════\n");

    let client = live_client();
    let report = run_verification(&client, client.base_url());

    print_summary(&report);

    assert!(report.summary.working > 0, "No reference locations returned elevation data!");
}
