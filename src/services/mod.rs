//! Schedule engine services

pub mod batch;
pub mod config;
pub mod cumulative;
pub mod import;
pub mod matrix;
pub mod orchestrator;
pub mod time_codec;
pub mod trip_generator;
pub mod validation;
