//! Structural checks over time points and travel time observations.
//!
//! Runs before any matrix is built. Errors make the data unusable for trip
//! generation; warnings are passed through to the caller.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::defaults::{DEFAULT_LONG_SEGMENT_WARNING_MINUTES, MAX_SEGMENT_MINUTES};
use crate::types::{ordered_by_sequence, DayType, TimePoint, TravelTime};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Validation rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationPolicy {
    /// Consecutive gaps will be filled by estimation, so they only warn.
    /// The data is still rejected when no consecutive pair is observed at all.
    pub estimate_missing: bool,
    /// An observation B->A also covers A->B
    pub assume_symmetric: bool,
    /// Segments longer than this are reported as unusually long
    pub long_segment_warning_minutes: i32,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            estimate_missing: true,
            assume_symmetric: true,
            long_segment_warning_minutes: DEFAULT_LONG_SEGMENT_WARNING_MINUTES,
        }
    }
}

impl ValidationPolicy {
    /// Every consecutive pair must be observed
    pub fn strict() -> Self {
        Self {
            estimate_missing: false,
            ..Self::default()
        }
    }
}

/// Validate with the default policy
pub fn validate_travel_times(time_points: &[TimePoint], travel_times: &[TravelTime]) -> ValidationResult {
    ScheduleDataValidator::default().validate(time_points, travel_times)
}

#[derive(Debug, Clone, Default)]
pub struct ScheduleDataValidator {
    policy: ValidationPolicy,
}

impl ScheduleDataValidator {
    pub fn new(policy: ValidationPolicy) -> Self {
        Self { policy }
    }

    pub fn validate(&self, time_points: &[TimePoint], travel_times: &[TravelTime]) -> ValidationResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        let names: HashMap<&str, &str> = time_points
            .iter()
            .map(|p| (p.id.as_str(), p.name.as_str()))
            .collect();
        let name_of = |id: &str| -> String { names.get(id).map(|n| n.to_string()).unwrap_or_else(|| id.to_string()) };

        for tt in travel_times {
            let from = tt.from_time_point.as_str();
            let to = tt.to_time_point.as_str();

            for id in [from, to] {
                if !names.contains_key(id) {
                    errors.push(format!("Unknown time point '{}' in travel time {} -> {}", id, from, to));
                }
            }

            for day_type in DayType::ALL {
                let minutes = tt.minutes_for(day_type);
                if minutes < 0 {
                    errors.push(format!(
                        "Negative travel time from {} to {} on {}: {} minutes",
                        name_of(from),
                        name_of(to),
                        day_type,
                        minutes
                    ));
                } else if minutes > MAX_SEGMENT_MINUTES {
                    errors.push(format!(
                        "Travel time from {} to {} on {} exceeds {} minutes: {} minutes",
                        name_of(from),
                        name_of(to),
                        day_type,
                        MAX_SEGMENT_MINUTES,
                        minutes
                    ));
                } else if minutes > self.policy.long_segment_warning_minutes {
                    warnings.push(format!(
                        "Unusually long travel time from {} to {} on {}: {} minutes",
                        name_of(from),
                        name_of(to),
                        day_type,
                        minutes
                    ));
                }
            }
        }

        // Fewer than two stops leave no consecutive pair to require
        if time_points.len() < 2 {
            return Self::finish(time_points, travel_times, errors, warnings);
        }

        let observed: HashSet<(&str, &str)> = travel_times
            .iter()
            .map(|tt| (tt.from_time_point.as_str(), tt.to_time_point.as_str()))
            .collect();
        let is_observed = |from: &str, to: &str| {
            observed.contains(&(from, to)) || (self.policy.assume_symmetric && observed.contains(&(to, from)))
        };

        let ordered = ordered_by_sequence(time_points);
        let required: Vec<(&TimePoint, &TimePoint)> = ordered
            .windows(2)
            .filter(|pair| pair[0].sequence != pair[1].sequence)
            .map(|pair| (pair[0], pair[1]))
            .collect();
        let missing: Vec<(&TimePoint, &TimePoint)> = required
            .iter()
            .filter(|(from, to)| !is_observed(&from.id, &to.id))
            .copied()
            .collect();

        if !self.policy.estimate_missing {
            for (from, to) in &missing {
                errors.push(format!("Missing travel time from {} to {}", from.name, to.name));
            }
        } else if !required.is_empty() && missing.len() == required.len() {
            errors.push(format!(
                "Missing travel time for all {} consecutive time point pairs",
                required.len()
            ));
        } else {
            for (from, to) in &missing {
                warnings.push(format!(
                    "Missing travel time from {} to {}, it will be estimated",
                    from.name, to.name
                ));
            }
        }

        Self::finish(time_points, travel_times, errors, warnings)
    }

    fn finish(
        time_points: &[TimePoint],
        travel_times: &[TravelTime],
        errors: Vec<String>,
        warnings: Vec<String>,
    ) -> ValidationResult {
        debug!(
            "Validated {} time points and {} travel times: {} errors, {} warnings",
            time_points.len(),
            travel_times.len(),
            errors.len(),
            warnings.len()
        );

        ValidationResult {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}
