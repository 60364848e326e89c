//! Engine configuration

use crate::defaults::{DEFAULT_DWELL_MINUTES, DEFAULT_LONG_SEGMENT_WARNING_MINUTES};
use crate::services::matrix::{EstimationPolicy, MatrixOptions};
use crate::services::validation::ValidationPolicy;

/// Configuration for the schedule engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Backfill reverse travel times from one-directional observations
    pub assume_symmetric: bool,
    /// Estimation constants for missing connections
    pub estimation: EstimationPolicy,
    /// Segments longer than this produce a warning
    pub long_segment_warning_minutes: i32,
    /// Minutes held at every stop (0 = arrival equals departure)
    pub dwell_minutes: i32,
    /// Reject data with any missing consecutive travel time instead of estimating
    pub strict_validation: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            assume_symmetric: true,
            estimation: EstimationPolicy::default(),
            long_segment_warning_minutes: DEFAULT_LONG_SEGMENT_WARNING_MINUTES,
            dwell_minutes: DEFAULT_DWELL_MINUTES,
            strict_validation: false,
        }
    }
}

impl EngineConfig {
    /// Strict configuration: every consecutive pair must be observed
    pub fn strict() -> Self {
        Self {
            strict_validation: true,
            ..Self::default()
        }
    }

    pub fn matrix_options(&self) -> MatrixOptions {
        MatrixOptions {
            assume_symmetric: self.assume_symmetric,
        }
    }

    pub fn validation_policy(&self) -> ValidationPolicy {
        ValidationPolicy {
            estimate_missing: !self.strict_validation,
            assume_symmetric: self.assume_symmetric,
            long_segment_warning_minutes: self.long_segment_warning_minutes,
        }
    }
}
