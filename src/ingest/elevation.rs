/// Open-Elevation API client
///
/// Retrieves a single ground elevation value for a coordinate from the
/// public Open-Elevation lookup endpoint. Lookups are best-effort: one
/// request, no retries, and every failure collapses to "no elevation" at
/// the `lookup_elevation` boundary so that flood classification degrades to
/// `Unknown` instead of aborting the assessment.
///
/// API Documentation: https://github.com/Jorl17/open-elevation/blob/master/docs/api.md

use serde::Deserialize;
use std::time::Duration;

use crate::logging;
use crate::model::{Coordinate, ElevationError};

/// Public Open-Elevation instance.
pub const OPEN_ELEVATION_BASE_URL: &str = "https://api.open-elevation.com";

// ============================================================================
// API Response Structures
// ============================================================================

/// Lookup response body. Everything other than `results` is ignored.
#[derive(Debug, Deserialize)]
pub struct LookupResponse {
    pub results: Option<Vec<LookupResult>>,
}

/// One entry of `results`; the service echoes the coordinate back as well.
#[derive(Debug, Deserialize)]
pub struct LookupResult {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
}

// ============================================================================
// Source trait
// ============================================================================

/// Anything that can answer "how high is the ground here, in metres".
///
/// The assessment takes a `&dyn ElevationSource` so tests and offline runs
/// can swap in a stub without touching the network.
pub trait ElevationSource {
    fn lookup(&self, point: Coordinate) -> Result<f64, ElevationError>;
}

/// Source used with `--offline`; every lookup reports `Disabled`.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineElevation;

impl ElevationSource for OfflineElevation {
    fn lookup(&self, _point: Coordinate) -> Result<f64, ElevationError> {
        Err(ElevationError::Disabled)
    }
}

// ============================================================================
// HTTP client
// ============================================================================

/// Blocking client for an Open-Elevation compatible endpoint.
pub struct OpenElevationClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl OpenElevationClient {
    /// Client against `base_url` using the transport's default timeout
    /// unless `timeout` is given.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ElevationError> {
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let client = builder
            .build()
            .map_err(|e| ElevationError::Request(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl ElevationSource for OpenElevationClient {
    fn lookup(&self, point: Coordinate) -> Result<f64, ElevationError> {
        let url = build_lookup_url(&self.base_url, point);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .map_err(|e| ElevationError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ElevationError::HttpStatus(response.status().as_u16()));
        }

        let body = response
            .text()
            .map_err(|e| ElevationError::Request(e.to_string()))?;

        parse_lookup_response(&body)
    }
}

/// Builds the single-location lookup URL.
pub fn build_lookup_url(base_url: &str, point: Coordinate) -> String {
    format!(
        "{}/api/v1/lookup?locations={},{}",
        base_url.trim_end_matches('/'),
        point.latitude,
        point.longitude
    )
}

/// Extracts `results[0].elevation` from a lookup response body.
pub fn parse_lookup_response(body: &str) -> Result<f64, ElevationError> {
    let parsed: LookupResponse =
        serde_json::from_str(body).map_err(|e| ElevationError::Parse(e.to_string()))?;

    parsed
        .results
        .and_then(|results| results.into_iter().next())
        .and_then(|first| first.elevation)
        .filter(|e| e.is_finite())
        .ok_or(ElevationError::NoResult)
}

// ============================================================================
// Best-effort boundary
// ============================================================================

/// Looks up elevation, logging and swallowing any failure.
///
/// Returns the error alongside `None` so the caller can surface it as a
/// non-blocking warning.
pub fn lookup_elevation(
    source: &dyn ElevationSource,
    point: Coordinate,
) -> (Option<f64>, Option<ElevationError>) {
    match source.lookup(point) {
        Ok(elevation) => {
            logging::debug(
                logging::Component::Elevation,
                Some(&point.to_string()),
                &format!("elevation {} m", elevation),
            );
            (Some(elevation), None)
        }
        Err(e) => {
            logging::log_elevation_failure(&point.to_string(), "Elevation lookup", &e);
            (None, Some(e))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_url_matches_open_elevation_format() {
        let url = build_lookup_url(OPEN_ELEVATION_BASE_URL, Coordinate::new(19.076, 72.8777));
        assert_eq!(
            url,
            "https://api.open-elevation.com/api/v1/lookup?locations=19.076,72.8777"
        );
    }

    #[test]
    fn test_lookup_url_tolerates_trailing_slash() {
        let url = build_lookup_url("http://localhost:8080/", Coordinate::new(12.5, 77.5));
        assert_eq!(url, "http://localhost:8080/api/v1/lookup?locations=12.5,77.5");
    }

    #[test]
    fn test_parse_uses_first_result() {
        let body = r#"{"results":[
            {"latitude":19.076,"longitude":72.8777,"elevation":2.0},
            {"latitude":28.6,"longitude":77.2,"elevation":216.0}
        ]}"#;
        assert_eq!(parse_lookup_response(body), Ok(2.0));
    }

    #[test]
    fn test_parse_accepts_integer_elevation() {
        let body = r#"{"results":[{"latitude":28.6,"longitude":77.2,"elevation":216}]}"#;
        assert_eq!(parse_lookup_response(body), Ok(216.0));
    }

    #[test]
    fn test_parse_empty_results_is_no_result() {
        assert_eq!(parse_lookup_response(r#"{"results":[]}"#), Err(ElevationError::NoResult));
    }

    #[test]
    fn test_parse_missing_results_key_is_no_result() {
        assert_eq!(
            parse_lookup_response(r#"{"error":"Invalid JSON."}"#),
            Err(ElevationError::NoResult)
        );
    }

    #[test]
    fn test_parse_null_elevation_is_no_result() {
        let body = r#"{"results":[{"latitude":1.0,"longitude":2.0,"elevation":null}]}"#;
        assert_eq!(parse_lookup_response(body), Err(ElevationError::NoResult));
    }

    #[test]
    fn test_parse_garbage_is_parse_error() {
        let result = parse_lookup_response("<html>502 Bad Gateway</html>");
        assert!(matches!(result, Err(ElevationError::Parse(_))), "got {:?}", result);
    }

    #[test]
    fn test_offline_source_never_returns_a_value() {
        let (elevation, err) = lookup_elevation(&OfflineElevation, Coordinate::new(20.0, 75.0));
        assert_eq!(elevation, None);
        assert_eq!(err, Some(ElevationError::Disabled));
    }

    #[test]
    fn test_client_keeps_base_url_without_trailing_slash() {
        let client = OpenElevationClient::new("http://localhost:8080/", None).expect("client builds");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }
}
