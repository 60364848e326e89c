//! Timetable types: time bands, trips and calculation results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DayType, TimePoint, TravelTime};

/// A period of uniform headway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBand {
    /// "HH:MM"
    pub start_time: String,
    /// "HH:MM", inclusive
    pub end_time: String,
    /// Minutes between departures
    pub frequency: i32,
}

impl TimeBand {
    pub fn new(start_time: impl Into<String>, end_time: impl Into<String>, frequency: i32) -> Self {
        Self {
            start_time: start_time.into(),
            end_time: end_time.into(),
            frequency,
        }
    }
}

/// Time bands for each day type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayTypeTimeBands {
    #[serde(default)]
    pub weekday: Vec<TimeBand>,
    #[serde(default)]
    pub saturday: Vec<TimeBand>,
    #[serde(default)]
    pub sunday: Vec<TimeBand>,
}

impl DayTypeTimeBands {
    pub fn for_day(&self, day_type: DayType) -> &[TimeBand] {
        match day_type {
            DayType::Weekday => &self.weekday,
            DayType::Saturday => &self.saturday,
            DayType::Sunday => &self.sunday,
        }
    }
}

/// Arrival/departure at one time point of a trip.
///
/// Times are "HH:MM" but may run past "24:00" for after-midnight service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub time_point_id: String,
    pub arrival_time: String,
    pub departure_time: String,
}

/// One generated trip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripCalculationResult {
    pub trip_id: String,
    pub schedule_entries: Vec<ScheduleEntry>,
    /// Sum of consecutive segment minutes at generation time
    pub total_travel_time: i32,
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// Timing and size information for one orchestration call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationMetadata {
    pub total_time_points: usize,
    pub total_trips: usize,
    pub weekday_trips: usize,
    pub saturday_trips: usize,
    pub sunday_trips: usize,
    /// Wall-clock duration of matrix building and trip generation (milliseconds)
    pub calculation_time: f64,
    pub generated_at: DateTime<Utc>,
}

/// Complete result of an orchestration call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResults {
    pub weekday: Vec<TripCalculationResult>,
    pub saturday: Vec<TripCalculationResult>,
    pub sunday: Vec<TripCalculationResult>,
    pub metadata: CalculationMetadata,
    /// Soft validation warnings that did not block generation
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl CalculationResults {
    pub fn trips_for(&self, day_type: DayType) -> &[TripCalculationResult] {
        match day_type {
            DayType::Weekday => &self.weekday,
            DayType::Saturday => &self.saturday,
            DayType::Sunday => &self.sunday,
        }
    }
}

/// Input document for a schedule calculation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    pub time_points: Vec<TimePoint>,
    #[serde(default)]
    pub travel_times: Vec<TravelTime>,
    #[serde(default)]
    pub time_bands: DayTypeTimeBands,
}
