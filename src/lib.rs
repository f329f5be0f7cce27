//! Property insurance underwriting risk analysis for locations in India.
//!
//! Given a coordinate, the tool estimates elevation-based flood risk,
//! urban flood-zone membership, the nearest fire station with a response
//! time, and a seeded sample of nearby exposure points. Results can be
//! exported as map layer JSON, plain text, or a PDF report.

pub mod analysis;
pub mod config;
pub mod ingest;
pub mod layers;
pub mod logging;
pub mod model;
pub mod report;
pub mod session;
pub mod stations;
pub mod verify;
pub mod zones;
