//! Travel-time matrix and trip generation engine for bus timetables.
//!
//! Turns sparse stop-to-stop travel time observations into per-day-type
//! matrices, estimates missing connections, and expands frequency-based
//! time bands into concrete trips.

pub mod config;
pub mod defaults;
pub mod services;
pub mod types;

pub use services::orchestrator::{ScheduleError, ScheduleOrchestrator};
