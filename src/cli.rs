use std::path::PathBuf;

/// Underwriting risk CLI (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "uwrisk", version, about, propagate_version = true)]
pub struct Cli {
    /// Config file (defaults to $UWRISK_CONFIG, then ./uwrisk.toml)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Assess a location and print the risk summary
    Assess(AssessArgs),

    /// Print map layer JSON for a location
    Layers(LocationArgs),

    /// List the urban flood zones
    Zones,

    /// List the fire stations
    Stations,

    /// Check the elevation service against every reference location
    Verify(VerifyArgs),
}

#[derive(clap::Args, Debug)]
pub struct LocationArgs {
    /// Latitude in decimal degrees (clamped to 6.0..=37.0)
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    /// Longitude in decimal degrees (clamped to 68.0..=97.5)
    #[arg(long, allow_negative_numbers = true)]
    pub lon: f64,
}

#[derive(clap::Args, Debug)]
pub struct AssessArgs {
    #[command(flatten)]
    pub location: LocationArgs,

    /// Skip the elevation lookup (flood risk reports Unknown)
    #[arg(long)]
    pub offline: bool,

    /// Write the PDF report to this file
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub pdf: Option<PathBuf>,

    /// Print the full text report instead of the short summary
    #[arg(long)]
    pub text: bool,

    /// Write map layer JSON to this file
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub layers: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct VerifyArgs {
    /// Also save the full report as JSON
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub json: Option<PathBuf>,
}
