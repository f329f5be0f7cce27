//! Underwriting risk report.
//!
//! A report is built in two steps. `ReportDocument::from_assessment` turns a
//! `RiskAssessment` into fixed text content (every absent value already
//! replaced by "N/A"), and a renderer lays that content out: `render_text`
//! for terminals, `pdf::render_pdf` for the downloadable document.

pub mod pdf;

use std::fmt;

use crate::model::RiskAssessment;

/// Placeholder printed for any value that could not be determined.
pub const NOT_AVAILABLE: &str = "N/A";

pub const REPORT_TITLE: &str = "Property Insurance Underwriting Risk Analysis Report";
pub const EXPOSURE_HEADING: &str = "Nearby Properties Exposure Risk:";
pub const EXPOSURE_COLUMNS: [&str; 3] = ["Latitude", "Longitude", "Risk Level"];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum ReportError {
    /// The PDF backend refused the document.
    Pdf(String),
    /// Writing the rendered report failed.
    Io(std::io::Error),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::Pdf(msg) => write!(f, "PDF error: {}", msg),
            ReportError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for ReportError {}

impl From<std::io::Error> for ReportError {
    fn from(e: std::io::Error) -> Self {
        ReportError::Io(e)
    }
}

// ---------------------------------------------------------------------------
// Document content
// ---------------------------------------------------------------------------

/// One labelled scalar line of the report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportField {
    pub label: &'static str,
    pub value: String,
}

impl fmt::Display for ReportField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.value)
    }
}

/// Report content, independent of the output format.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    pub title: String,
    pub fields: Vec<ReportField>,
    pub table_heading: String,
    pub columns: [&'static str; 3],
    pub rows: Vec<[String; 3]>,
}

impl ReportDocument {
    pub fn from_assessment(assessment: &RiskAssessment) -> Self {
        let c = assessment.coordinate;

        let elevation = match assessment.elevation_m {
            Some(e) => format!("{} meters", plain_number(e)),
            None => NOT_AVAILABLE.to_string(),
        };
        let response_time = match assessment.response_time_minutes {
            Some(t) => format!("{:.1} minutes", t),
            None => NOT_AVAILABLE.to_string(),
        };

        let fields = vec![
            ReportField {
                label: "Location Coordinates",
                value: format!("Latitude {:.6}, Longitude {:.6}", c.latitude, c.longitude),
            },
            ReportField { label: "Elevation", value: elevation },
            ReportField {
                label: "Flood Risk (Elevation Based)",
                value: assessment.flood_risk.to_string(),
            },
            ReportField {
                label: "Urban Flood Risk Zone",
                value: assessment.urban_flood_zone.clone(),
            },
            ReportField {
                label: "Nearest Fire Station",
                value: assessment
                    .nearest_station
                    .clone()
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            },
            ReportField {
                label: "Fire Brigade Response Time Estimate",
                value: response_time,
            },
        ];

        let rows = assessment
            .exposure_points
            .iter()
            .map(|p| {
                [
                    format!("{:.6}", p.location.latitude),
                    format!("{:.6}", p.location.longitude),
                    p.risk.to_string(),
                ]
            })
            .collect();

        Self {
            title: REPORT_TITLE.to_string(),
            fields,
            table_heading: EXPOSURE_HEADING.to_string(),
            columns: EXPOSURE_COLUMNS,
            rows,
        }
    }
}

/// Shortest decimal that reads back as exactly `value`, always with a
/// fractional part ("2.0", "4.96"). Never rounds, so a printed elevation
/// sits on the same side of every flood threshold as the stored one.
fn plain_number(value: f64) -> String {
    let s = value.to_string();
    if value.is_finite() && !s.contains('.') {
        format!("{}.0", s)
    } else {
        s
    }
}

// ---------------------------------------------------------------------------
// Renderers
// ---------------------------------------------------------------------------

const TEXT_COLUMN_WIDTH: usize = 14;

/// Plain-text rendition with a fixed-width exposure table.
pub fn render_text(doc: &ReportDocument) -> String {
    let mut out = String::new();
    out.push_str(&doc.title);
    out.push('\n');
    out.push_str(&"=".repeat(doc.title.len()));
    out.push_str("\n\n");

    for field in &doc.fields {
        out.push_str(&field.to_string());
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&doc.table_heading);
    out.push('\n');
    out.push_str(&text_row(&doc.columns.map(String::from)));
    out.push_str(&"-".repeat(TEXT_COLUMN_WIDTH * 3 + 2));
    out.push('\n');
    for row in &doc.rows {
        out.push_str(&text_row(row));
    }
    out
}

fn text_row(cells: &[String; 3]) -> String {
    let line = format!(
        "{:<w$} {:<w$} {}",
        cells[0],
        cells[1],
        cells[2],
        w = TEXT_COLUMN_WIDTH
    );
    format!("{}\n", line.trim_end())
}

/// Short terminal summary: the report fields without the title block, then
/// one line per exposure point.
pub fn render_summary(doc: &ReportDocument) -> String {
    let mut out = String::new();
    for field in &doc.fields {
        out.push_str(&format!("{}\n", field));
    }
    out.push_str("Exposure:\n");
    for row in &doc.rows {
        out.push_str(&format!("  {}, {}  {}\n", row[0], row[1], row[2]));
    }
    out
}

/// Renders an assessment straight to PDF bytes.
pub fn render(assessment: &RiskAssessment) -> Result<Vec<u8>, ReportError> {
    pdf::render_pdf(&ReportDocument::from_assessment(assessment))
}
