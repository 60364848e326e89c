//! Configuration management

use anyhow::{self, Context, Result};

use crate::services::config::EngineConfig;
use crate::services::matrix::EstimationPolicy;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory for rolling log files
    pub logs_dir: String,

    /// Engine settings
    pub engine: EngineConfig,
}

fn env_i32(key: &str, default: i32) -> Result<i32> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be an integer, got '{}'", key, raw)),
        Err(_) => Ok(default),
    }
}

fn env_bool(key: &str, default: bool) -> Result<bool> {
    match std::env::var(key) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => anyhow::bail!("{} must be a boolean, got '{}'", key, raw),
        },
        Err(_) => Ok(default),
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let logs_dir = std::env::var("LOGS_DIR").unwrap_or_else(|_| "./logs".to_string());

        let defaults = EngineConfig::default();

        let adjacent_default = env_i32(
            "SCHEDULE_ADJACENT_DEFAULT_MINUTES",
            defaults.estimation.adjacent_default_minutes,
        )?;
        if adjacent_default <= 0 {
            anyhow::bail!(
                "SCHEDULE_ADJACENT_DEFAULT_MINUTES must be positive (current: {})",
                adjacent_default
            );
        }

        let long_segment = env_i32("SCHEDULE_LONG_SEGMENT_MINUTES", defaults.long_segment_warning_minutes)?;
        if long_segment <= 0 {
            anyhow::bail!("SCHEDULE_LONG_SEGMENT_MINUTES must be positive (current: {})", long_segment);
        }

        let dwell = env_i32("SCHEDULE_DWELL_MINUTES", defaults.dwell_minutes)?;
        if dwell < 0 {
            anyhow::bail!("SCHEDULE_DWELL_MINUTES cannot be negative (current: {})", dwell);
        }

        let engine = EngineConfig {
            assume_symmetric: env_bool("SCHEDULE_ASSUME_SYMMETRIC", defaults.assume_symmetric)?,
            estimation: EstimationPolicy::new(adjacent_default),
            long_segment_warning_minutes: long_segment,
            dwell_minutes: dwell,
            strict_validation: env_bool("SCHEDULE_STRICT_VALIDATION", defaults.strict_validation)?,
        };

        if !engine.assume_symmetric {
            tracing::warn!("SCHEDULE_ASSUME_SYMMETRIC is off: reverse travel times must be observed explicitly");
        }

        Ok(Self { logs_dir, engine })
    }
}
