mod catalog;
mod config;
mod predict;
mod tle;
mod web;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::predict::predict_passes_for_tle;
use crate::tle::{build_tle, generate_history, DEFAULT_OFFSETS_MINUTES};

#[derive(Parser)]
#[command(name = "tle-pass")]
#[command(about = "Back-dated TLE generation and ground-station pass prediction")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print TLEs for an object at its epoch and at minutes before it
    Tle {
        /// GP JSON file or directory of GP JSON files
        catalog: PathBuf,
        norad_id: u32,
        /// Minutes before epoch (repeatable or comma-separated)
        #[arg(short = 'o', long = "offset", value_delimiter = ',')]
        offsets: Vec<u32>,
    },
    /// Predict upcoming passes over the configured ground station
    Passes {
        #[arg(short, long, default_value = "config.yaml")]
        config: String,
        norad_id: u32,
        #[arg(short = 'n', long)]
        count: Option<usize>,
        /// Search start (RFC 3339), defaults to now
        #[arg(long)]
        start: Option<DateTime<Utc>>,
    },
    /// Serve the HTTP API
    Serve {
        #[arg(short, long, default_value = "config.yaml")]
        config: String,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Tle {
            catalog,
            norad_id,
            offsets,
        } => tle(&catalog, norad_id, offsets),
        Commands::Passes {
            config,
            norad_id,
            count,
            start,
        } => passes(&config, norad_id, count, start),
        Commands::Serve { config } => serve(&config),
    }
}

fn tle(catalog_path: &Path, norad_id: u32, offsets: Vec<u32>) -> ExitCode {
    let catalog = match Catalog::load(catalog_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading catalog: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let record = match catalog.get(norad_id) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let offsets = if offsets.is_empty() {
        DEFAULT_OFFSETS_MINUTES.to_vec()
    } else {
        offsets
    };

    match generate_history(record, &offsets) {
        Ok(history) => {
            println!("{}", record.display_name());
            for entry in &history.entries {
                println!("# T-{} min", entry.minutes_before);
                println!("{}", entry.tle);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Encoding error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: &str) -> Option<Config> {
    match Config::from_file(path) {
        Ok(c) => Some(c),
        Err(e) => {
            eprintln!("Error loading config {}: {}", path, e);
            None
        }
    }
}

fn passes(
    config_path: &str,
    norad_id: u32,
    count: Option<usize>,
    start: Option<DateTime<Utc>>,
) -> ExitCode {
    let Some(config) = load_config(config_path) else {
        return ExitCode::FAILURE;
    };
    let station = match config.ground_station() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let catalog = match Catalog::load(&config.catalog.path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading catalog: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let record = match catalog.get(norad_id) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let tle = match build_tle(record, 0) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Encoding error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let query = config.predict.query(start.unwrap_or_else(Utc::now), count);
    let passes = match predict_passes_for_tle(&station, record.object_name.clone(), &tle, &query) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Prediction failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!(
        "{} over {} at {:.3} MHz",
        record.display_name(),
        config.station.name.as_deref().unwrap_or("station"),
        query.transmit_frequency_hz / 1e6
    );
    for (i, pass) in passes.iter().enumerate() {
        println!(
            "  {:2}: rise {} az {:5.1}  peak {} el {:5.2}  set {} az {:5.1}  doppler {:+.0} Hz",
            i + 1,
            pass.rise_time.format("%Y-%m-%d %H:%M:%S"),
            pass.rise_azimuth_deg,
            pass.peak_time.format("%H:%M:%S"),
            pass.peak_altitude_deg,
            pass.set_time.format("%H:%M:%S"),
            pass.set_azimuth_deg,
            pass.doppler_shift_hz
        );
    }
    ExitCode::SUCCESS
}

fn serve(config_path: &str) -> ExitCode {
    let Some(config) = load_config(config_path) else {
        return ExitCode::FAILURE;
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(web::run_server(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}
