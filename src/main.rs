mod cli;

use std::error::Error;
use std::fs;

use clap::Parser;

use cli::{AssessArgs, Cli, Commands, LocationArgs, VerifyArgs};
use uwrisk_service::analysis::{assessment, exposure};
use uwrisk_service::config::AppConfig;
use uwrisk_service::ingest::elevation::{ElevationSource, OfflineElevation, OpenElevationClient};
use uwrisk_service::layers;
use uwrisk_service::logging::{self, Component};
use uwrisk_service::report::{self, ReportDocument, ReportError};
use uwrisk_service::session::Session;
use uwrisk_service::stations::FIRE_STATION_REGISTRY;
use uwrisk_service::verify;
use uwrisk_service::zones::FLOOD_ZONE_REGISTRY;

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let (config, config_path) = AppConfig::load(cli.config.as_deref())?;
    let mut level = config.log_level()?;
    for _ in 0..cli.verbose {
        level = level.more_verbose();
    }
    logging::init_logger(level, config.logging.file.as_deref(), config.logging.timestamps);

    match &config_path {
        Some(p) => logging::info(Component::Config, None, &format!("Loaded config from {}", p.display())),
        None => logging::debug(Component::Config, None, "No config file found, using defaults"),
    }

    match &cli.command {
        Commands::Assess(args) => run_assess(&config, args),
        Commands::Layers(args) => run_layers(&config, args),
        Commands::Zones => {
            run_zones();
            Ok(())
        }
        Commands::Stations => {
            run_stations();
            Ok(())
        }
        Commands::Verify(args) => run_verify(&config, args),
    }
}

fn elevation_source(config: &AppConfig, offline: bool) -> Result<Box<dyn ElevationSource>, Box<dyn Error>> {
    if offline {
        return Ok(Box::new(OfflineElevation));
    }
    let client = OpenElevationClient::new(&config.elevation.base_url, config.elevation.timeout())?;
    Ok(Box::new(client))
}

fn run_assess(config: &AppConfig, args: &AssessArgs) -> Result<(), Box<dyn Error>> {
    let mut session = Session::new();
    let point = session.update_location(args.location.lat, args.location.lon);

    let source = elevation_source(config, args.offline)?;
    let result = assessment::assess(point, source.as_ref(), &config.assessment_options());

    for warning in &result.warnings {
        eprintln!("⚠ {}", warning);
    }

    let doc = ReportDocument::from_assessment(&result);
    if args.text {
        print!("{}", report::render_text(&doc));
    } else {
        print!("{}", report::render_summary(&doc));
    }

    if let Some(path) = &args.pdf {
        let bytes = report::pdf::render_pdf(&doc)?;
        fs::write(path, bytes).map_err(ReportError::from)?;
        logging::info(Component::Report, None, &format!("PDF report written to {}", path.display()));
        println!("📄 PDF report saved to: {}", path.display());
    }

    if let Some(path) = &args.layers {
        let scene = layers::build_scene(result.coordinate, &result.exposure_points);
        fs::write(path, serde_json::to_string_pretty(&scene)?)?;
        println!("🗺  Map layers saved to: {}", path.display());
    }

    Ok(())
}

fn run_layers(config: &AppConfig, args: &LocationArgs) -> Result<(), Box<dyn Error>> {
    let mut session = Session::new();
    let point = session.update_location(args.lat, args.lon);
    let points = exposure::generate(point, config.exposure.count, config.exposure.seed);
    let scene = layers::build_scene(point, &points);
    println!("{}", serde_json::to_string_pretty(&scene)?);
    Ok(())
}

fn run_zones() {
    println!("{:<24} {:>10} {:>10} {:>10} {:>10}", "Zone", "Lat min", "Lon min", "Lat max", "Lon max");
    for zone in FLOOD_ZONE_REGISTRY {
        let b = zone.bounds;
        println!(
            "{:<24} {:>10.4} {:>10.4} {:>10.4} {:>10.4}",
            zone.name, b.min.latitude, b.min.longitude, b.max.latitude, b.max.longitude
        );
    }
}

fn run_stations() {
    println!("{:<26} {:>10} {:>10}", "Station", "Lat", "Lon");
    for station in FIRE_STATION_REGISTRY {
        println!(
            "{:<26} {:>10.4} {:>10.4}",
            station.name, station.location.latitude, station.location.longitude
        );
    }
}

fn run_verify(config: &AppConfig, args: &VerifyArgs) -> Result<(), Box<dyn Error>> {
    println!("🔍 Verifying elevation service...\n");
    let client = OpenElevationClient::new(&config.elevation.base_url, config.elevation.timeout())?;
    let report = verify::run_verification(&client, client.base_url());

    verify::print_summary(&report);

    if let Some(path) = &args.json {
        fs::write(path, serde_json::to_string_pretty(&report)?)?;
        println!("\n📄 Full report saved to: {}\n", path.display());
    }

    if report.summary.working == 0 {
        return Err("No reference locations returned elevation data".into());
    }
    Ok(())
}
