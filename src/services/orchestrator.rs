//! Schedule orchestration: validate, build matrices, generate trips.
//!
//! The single hard failure is invalid input data, returned as
//! [`ScheduleError`]. Everything else (gaps, long segments under a day) is
//! absorbed as estimates or warnings and never aborts generation.

use std::time::Instant;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::services::config::EngineConfig;
use crate::services::matrix::{
    calculate_travel_times, handle_missing_connections, validate_matrix_completeness, DayTypeMatrices,
    MatrixCompletenessReport,
};
use crate::services::trip_generator::TripGenerator;
use crate::services::validation::{ScheduleDataValidator, ValidationResult};
use crate::types::{
    CalculationMetadata, CalculationResults, DayType, DayTypeTimeBands, ScheduleRequest, TimePoint, TravelTime,
};

/// Reported calculation time never drops below this, so it stays positive on
/// coarse clocks.
const MIN_REPORTED_CALCULATION_MS: f64 = 0.001;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("Invalid travel time data: {}", .errors.join("; "))]
    InvalidTravelTimeData { errors: Vec<String> },
}

/// Gap report for one day type, before and after estimation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixAudit {
    pub day_type: DayType,
    pub observed: MatrixCompletenessReport,
    pub enhanced: MatrixCompletenessReport,
}

/// Public entry point of the engine. Holds configuration only; every call
/// works on its own data.
#[derive(Debug, Clone)]
pub struct ScheduleOrchestrator {
    config: EngineConfig,
    validator: ScheduleDataValidator,
    generator: TripGenerator,
}

impl Default for ScheduleOrchestrator {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl ScheduleOrchestrator {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            validator: ScheduleDataValidator::new(config.validation_policy()),
            generator: TripGenerator::with_dwell(config.dwell_minutes),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validate without generating anything
    pub fn validate(&self, time_points: &[TimePoint], travel_times: &[TravelTime]) -> ValidationResult {
        self.validator.validate(time_points, travel_times)
    }

    /// Matrices for all day types with missing connections estimated
    pub fn enhanced_matrices(&self, time_points: &[TimePoint], travel_times: &[TravelTime]) -> DayTypeMatrices {
        let observed = calculate_travel_times(travel_times, &self.config.matrix_options());
        self.enhance(time_points, &observed)
    }

    /// Consecutive-pair gap reports for every day type
    pub fn audit_matrices(&self, time_points: &[TimePoint], travel_times: &[TravelTime]) -> Vec<MatrixAudit> {
        let observed = calculate_travel_times(travel_times, &self.config.matrix_options());
        let enhanced = self.enhance(time_points, &observed);

        DayType::ALL
            .iter()
            .map(|&day_type| MatrixAudit {
                day_type,
                observed: validate_matrix_completeness(time_points, observed.for_day(day_type)),
                enhanced: validate_matrix_completeness(time_points, enhanced.for_day(day_type)),
            })
            .collect()
    }

    /// Validate, build matrices and generate trips for all three day types.
    pub fn calculate_optimized_schedule(
        &self,
        time_points: &[TimePoint],
        travel_times: &[TravelTime],
        time_bands: &DayTypeTimeBands,
    ) -> Result<CalculationResults, ScheduleError> {
        let validation = self.validator.validate(time_points, travel_times);
        if !validation.is_valid {
            warn!(
                "Rejecting schedule calculation: {} validation errors",
                validation.errors.len()
            );
            return Err(ScheduleError::InvalidTravelTimeData {
                errors: validation.errors,
            });
        }
        for warning in &validation.warnings {
            debug!("Validation warning: {}", warning);
        }

        let started_at = Instant::now();

        let observed = calculate_travel_times(travel_times, &self.config.matrix_options());
        let matrices = self.enhance(time_points, &observed);

        let [weekday, saturday, sunday] = DayType::ALL.map(|day_type| {
            self.generator.generate_trips_from_time_bands(
                time_bands.for_day(day_type),
                time_points,
                matrices.for_day(day_type),
                day_type,
            )
        });

        let calculation_time = (started_at.elapsed().as_secs_f64() * 1000.0).max(MIN_REPORTED_CALCULATION_MS);

        let metadata = CalculationMetadata {
            total_time_points: time_points.len(),
            total_trips: weekday.len() + saturday.len() + sunday.len(),
            weekday_trips: weekday.len(),
            saturday_trips: saturday.len(),
            sunday_trips: sunday.len(),
            calculation_time,
            generated_at: Utc::now(),
        };

        info!(
            "Schedule calculated: {} time points, {} trips ({} weekday, {} saturday, {} sunday) in {:.2} ms",
            metadata.total_time_points,
            metadata.total_trips,
            metadata.weekday_trips,
            metadata.saturday_trips,
            metadata.sunday_trips,
            metadata.calculation_time,
        );

        Ok(CalculationResults {
            weekday,
            saturday,
            sunday,
            metadata,
            warnings: validation.warnings,
        })
    }

    /// Convenience wrapper for a whole request document
    pub fn calculate_request(&self, request: &ScheduleRequest) -> Result<CalculationResults, ScheduleError> {
        self.calculate_optimized_schedule(&request.time_points, &request.travel_times, &request.time_bands)
    }

    fn enhance(&self, time_points: &[TimePoint], observed: &DayTypeMatrices) -> DayTypeMatrices {
        let mut enhanced = DayTypeMatrices::default();
        for day_type in DayType::ALL {
            *enhanced.for_day_mut(day_type) =
                handle_missing_connections(time_points, observed.for_day(day_type), &self.config.estimation);
        }
        enhanced
    }
}
