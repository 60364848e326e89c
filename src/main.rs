//! Timetable Worker - command line front end for the schedule engine
//!
//! Reads schedule requests (JSON) or CSV tables and writes results as JSON.

mod cli;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{error, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use timetable_worker::config::Config;
use timetable_worker::services::batch::calculate_batch;
use timetable_worker::services::import::{parse_time_points_csv, parse_travel_times_csv};
use timetable_worker::types::{DayTypeTimeBands, ScheduleRequest};
use timetable_worker::ScheduleOrchestrator;

use cli::{Cli, Command};

fn read_request(path: &Path) -> Result<ScheduleRequest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse schedule request {}", path.display()))
}

fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    match output {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn import_request(stops: &Path, travel_times: &Path, bands: Option<&PathBuf>) -> Result<ScheduleRequest> {
    let stops_csv = std::fs::read_to_string(stops)
        .with_context(|| format!("Failed to read {}", stops.display()))?;
    let times_csv = std::fs::read_to_string(travel_times)
        .with_context(|| format!("Failed to read {}", travel_times.display()))?;

    let time_bands = match bands {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str::<DayTypeTimeBands>(&content)
                .with_context(|| format!("Failed to parse time bands {}", path.display()))?
        }
        None => DayTypeTimeBands::default(),
    };

    Ok(ScheduleRequest {
        time_points: parse_time_points_csv(&stops_csv)?,
        travel_times: parse_travel_times_csv(&times_csv)?,
        time_bands,
    })
}

async fn run(command: Command, orchestrator: ScheduleOrchestrator) -> Result<()> {
    match command {
        Command::Calculate { input, output } => {
            let request = read_request(&input)?;
            let results = orchestrator.calculate_request(&request)?;
            for warning in &results.warnings {
                warn!("{}", warning);
            }
            write_json(&results, output.as_deref())
        }
        Command::Validate { input } => {
            let request = read_request(&input)?;
            let validation = orchestrator.validate(&request.time_points, &request.travel_times);
            write_json(&validation, None)?;
            if !validation.is_valid {
                anyhow::bail!("{} validation errors in {}", validation.errors.len(), input.display());
            }
            Ok(())
        }
        Command::Audit { input } => {
            let request = read_request(&input)?;
            let audits = orchestrator.audit_matrices(&request.time_points, &request.travel_times);
            write_json(&audits, None)
        }
        Command::Import {
            stops,
            travel_times,
            bands,
            output,
        } => {
            let request = import_request(&stops, &travel_times, bands.as_ref())?;
            write_json(&request, output.as_deref())
        }
        Command::Batch { inputs } => {
            let mut requests = Vec::with_capacity(inputs.len());
            for path in &inputs {
                requests.push((path.display().to_string(), read_request(path)?));
            }
            let outcomes = calculate_batch(Arc::new(orchestrator), requests).await;
            let failed = outcomes.iter().filter(|o| !o.is_success()).count();
            write_json(&outcomes, None)?;
            if failed > 0 {
                anyhow::bail!("{} of {} routes failed", failed, outcomes.len());
            }
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;

    std::fs::create_dir_all(&config.logs_dir).ok();

    // File appender for persistent logs (daily rotation)
    let file_appender = RollingFileAppender::new(Rotation::DAILY, &config.logs_dir, "timetable-worker.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    // stderr keeps stdout free for JSON output
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,timetable_worker=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    let orchestrator = ScheduleOrchestrator::new(config.engine);
    info!("Configuration loaded: {:?}", orchestrator.config());

    if let Err(e) = run(cli.command, orchestrator).await {
        error!("{:#}", e);
        return Err(e);
    }

    Ok(())
}
