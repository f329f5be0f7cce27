/// Core data types for the underwriting risk tool.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no I/O and no external dependencies, only types and the small
/// amount of arithmetic that belongs to them (containment, clamping).

use std::fmt;

// ---------------------------------------------------------------------------
// Geography
// ---------------------------------------------------------------------------

/// Southern edge of the accepted input box.
pub const INDIA_LAT_MIN: f64 = 6.0;
/// Northern edge of the accepted input box.
pub const INDIA_LAT_MAX: f64 = 37.0;
/// Western edge of the accepted input box.
pub const INDIA_LON_MIN: f64 = 68.0;
/// Eastern edge of the accepted input box.
pub const INDIA_LON_MAX: f64 = 97.5;

/// Approximate geographic centre of India, used as the initial selection.
pub const INDIA_CENTER: Coordinate = Coordinate::new(20.5937, 78.9629);

/// A WGS84 point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Clamps the point into the India input box and rounds both axes to
    /// six decimal places, matching the precision of the input fields.
    pub fn clamped_to_india(self) -> Self {
        Self {
            latitude: round_6dp(self.latitude.clamp(INDIA_LAT_MIN, INDIA_LAT_MAX)),
            longitude: round_6dp(self.longitude.clamp(INDIA_LON_MIN, INDIA_LON_MAX)),
        }
    }

    /// True if the point already lies inside the India input box.
    pub fn is_within_india(&self) -> bool {
        (INDIA_LAT_MIN..=INDIA_LAT_MAX).contains(&self.latitude)
            && (INDIA_LON_MIN..=INDIA_LON_MAX).contains(&self.longitude)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

fn round_6dp(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}

/// Axis-aligned rectangle in lat/lon space.
///
/// Containment is inclusive on all four edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Coordinate,
    pub max: Coordinate,
}

impl BoundingBox {
    pub const fn new(min: Coordinate, max: Coordinate) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, point: Coordinate) -> bool {
        self.min.latitude <= point.latitude
            && point.latitude <= self.max.latitude
            && self.min.longitude <= point.longitude
            && point.longitude <= self.max.longitude
    }

    /// A box is well-formed when min is strictly below max on both axes.
    pub fn is_well_formed(&self) -> bool {
        self.min.latitude < self.max.latitude && self.min.longitude < self.max.longitude
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.min.latitude + self.max.latitude) / 2.0,
            (self.min.longitude + self.max.longitude) / 2.0,
        )
    }

    /// Corner ring as `[lon, lat]` pairs, counter-clockwise from the
    /// south-west corner. This is the vertex order map widgets expect.
    pub fn ring(&self) -> Vec<[f64; 2]> {
        vec![
            [self.min.longitude, self.min.latitude],
            [self.max.longitude, self.min.latitude],
            [self.max.longitude, self.max.latitude],
            [self.min.longitude, self.max.latitude],
        ]
    }
}

// ---------------------------------------------------------------------------
// Reference data records
// ---------------------------------------------------------------------------

/// A metro area flagged as prone to urban flooding.
#[derive(Debug, Clone, PartialEq)]
pub struct FloodZone {
    pub name: &'static str,
    pub bounds: BoundingBox,
}

/// A fire station used for response-time estimates.
#[derive(Debug, Clone, PartialEq)]
pub struct FireStation {
    pub name: &'static str,
    pub location: Coordinate,
}

// ---------------------------------------------------------------------------
// Risk labels
// ---------------------------------------------------------------------------

/// Elevation-based flood risk.
///
/// Variants are declared in ascending order of severity so that the derived
/// `Ord` reads naturally: `Low < Medium < High`. `Unknown` sorts first but is
/// not a severity; it means no elevation was available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FloodRisk {
    Unknown,
    Low,
    Medium,
    High,
}

impl fmt::Display for FloodRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FloodRisk::Unknown => write!(f, "Unknown"),
            FloodRisk::Low => write!(f, "Low Flood Risk"),
            FloodRisk::Medium => write!(f, "Medium Flood Risk"),
            FloodRisk::High => write!(f, "High Flood Risk"),
        }
    }
}

/// Illustrative risk category attached to a synthetic exposure point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExposureRisk {
    Low,
    Medium,
    High,
}

impl ExposureRisk {
    /// Draw table for the sampler; the index of each label is its draw value.
    pub const ALL: [ExposureRisk; 3] = [ExposureRisk::Low, ExposureRisk::Medium, ExposureRisk::High];
}

impl fmt::Display for ExposureRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExposureRisk::Low => write!(f, "Low"),
            ExposureRisk::Medium => write!(f, "Medium"),
            ExposureRisk::High => write!(f, "High"),
        }
    }
}

/// A synthetic nearby property, used for map decoration and the report table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExposurePoint {
    pub location: Coordinate,
    pub risk: ExposureRisk,
}

// ---------------------------------------------------------------------------
// Assessment
// ---------------------------------------------------------------------------

/// Label reported when the point is outside every flood zone.
pub const LOW_URBAN_FLOOD_RISK: &str = "Low Urban Flood Risk";

/// Everything computed for one selected coordinate.
///
/// Built fresh on every assessment pass and discarded on the next one.
/// Absent values stay `None` here; the report decides how to print them.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskAssessment {
    pub coordinate: Coordinate,
    pub elevation_m: Option<f64>,
    pub flood_risk: FloodRisk,
    pub urban_flood_zone: String,
    pub nearest_station: Option<String>,
    pub response_time_minutes: Option<f64>,
    pub exposure_points: Vec<ExposurePoint>,
    /// Non-fatal problems hit while assessing (elevation outage etc.).
    pub warnings: Vec<String>,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise when fetching an elevation value.
#[derive(Debug, Clone, PartialEq)]
pub enum ElevationError {
    /// The request never produced a response (DNS, TLS, connection reset).
    Request(String),
    /// Non-2xx HTTP response from the elevation API.
    HttpStatus(u16),
    /// The response body could not be deserialized.
    Parse(String),
    /// The body parsed but carried no usable `results[0].elevation`.
    NoResult,
    /// Lookups are switched off for this run.
    Disabled,
}

impl fmt::Display for ElevationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElevationError::Request(msg) => write!(f, "Request failed: {}", msg),
            ElevationError::HttpStatus(code) => write!(f, "HTTP error: {}", code),
            ElevationError::Parse(msg) => write!(f, "Parse error: {}", msg),
            ElevationError::NoResult => write!(f, "No elevation result in response"),
            ElevationError::Disabled => write!(f, "Elevation lookup disabled"),
        }
    }
}

impl std::error::Error for ElevationError {}

/// Errors from the static reference registries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Nearest-station query against an empty station list.
    NoStations,
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::NoStations => write!(f, "No fire stations available"),
        }
    }
}

impl std::error::Error for RegistryError {}
