//! CLI argument parsing for the timetable-worker binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "timetable-worker", about = "Bus timetable generation from travel time data")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate trips for all day types from a schedule request
    Calculate {
        /// Schedule request JSON
        #[arg(long)]
        input: PathBuf,
        /// Write results here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Check travel time data without generating trips
    Validate {
        #[arg(long)]
        input: PathBuf,
    },
    /// Report missing consecutive connections per day type
    Audit {
        #[arg(long)]
        input: PathBuf,
    },
    /// Build a schedule request from CSV tables
    Import {
        /// Time point CSV (id, name, sequence)
        #[arg(long)]
        stops: PathBuf,
        /// Travel time CSV (from, to, weekday, saturday, sunday)
        #[arg(long)]
        travel_times: PathBuf,
        /// Optional time band JSON ({"weekday": [...], ...})
        #[arg(long)]
        bands: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Calculate several schedule requests concurrently
    Batch {
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
}
