mod feed;
mod geocode;
mod telemetry;
mod web;

use chrono::Utc;
use clap::{Parser, Subcommand};
use std::process::ExitCode;

use crate::telemetry::{geodetic_at_epoch, ObservationClock};
use crate::web::{AppState, Config};

#[derive(Parser)]
#[command(name = "iss-tracker")]
#[command(about = "Live ISS position and speed over HTTP")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP API
    Serve {
        #[arg(short, long)]
        config: Option<String>,
    },
    /// Print the state vector closest to the current time
    Now {
        #[arg(short, long)]
        config: Option<String>,
    },
    /// Convert an inertial position (km) at a feed epoch to latitude, longitude and altitude
    Locate {
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
        #[arg(allow_negative_numbers = true)]
        z: f64,
        /// Epoch in feed format, e.g. 2024-067T08:28:00.000Z
        epoch: String,
        #[arg(long, value_enum, default_value_t = ObservationClock::Epoch)]
        clock: ObservationClock,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => serve(config.as_deref()).await,
        Commands::Now { config } => now(config.as_deref()).await,
        Commands::Locate {
            x,
            y,
            z,
            epoch,
            clock,
        } => locate(x, y, z, &epoch, clock),
    }
}

fn load_config(path: Option<&str>) -> Option<Config> {
    let Some(path) = path else {
        return Some(Config::default());
    };
    match Config::from_file(path) {
        Ok(config) => Some(config),
        Err(e) => {
            eprintln!("Error loading config {}: {}", path, e);
            None
        }
    }
}

async fn serve(path: Option<&str>) -> ExitCode {
    let Some(config) = load_config(path) else {
        return ExitCode::FAILURE;
    };

    match web::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn now(path: Option<&str>) -> ExitCode {
    let Some(config) = load_config(path) else {
        return ExitCode::FAILURE;
    };
    let state = match AppState::from_config(config) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match web::api::now::report_at(&state, Utc::now()).await {
        Ok(report) => print_json(&report),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn locate(x: f64, y: f64, z: f64, epoch: &str, clock: ObservationClock) -> ExitCode {
    match geodetic_at_epoch(x, y, z, epoch, clock) {
        Ok(position) => print_json(&position),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
