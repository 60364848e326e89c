//! Trip generation from frequency-based time bands.
//!
//! Given the route's time points and a travel time matrix, each trip is laid
//! out by walking the stops in sequence order and adding the cumulative
//! travel time to the trip's start. Arrival equals departure at every stop
//! unless a dwell time is configured.
//!
//! Times are rendered without wrapping at midnight, so a trip leaving at
//! 23:50 may reach its last stop at "24:15".

use tracing::{debug, warn};

use crate::defaults::DEFAULT_DWELL_MINUTES;
use crate::services::cumulative::{calculate_sequential_travel_times, total_travel_minutes, CumulativeTime};
use crate::services::matrix::TravelTimeMatrix;
use crate::services::time_codec::{format_service_time, time_to_minutes};
use crate::types::{DayType, ScheduleEntry, TimeBand, TimePoint, TripCalculationResult};

/// Number of trips a band produces: `floor((end - start) / frequency) + 1`.
///
/// Bands with a non-positive frequency or an end before their start produce
/// no trips.
pub fn band_trip_count(band: &TimeBand) -> usize {
    let start = time_to_minutes(&band.start_time);
    let end = time_to_minutes(&band.end_time);
    if band.frequency <= 0 || end < start {
        return 0;
    }
    ((end - start) / band.frequency + 1) as usize
}

/// Trip ID pattern "<dayType>_band<n>_trip<m>" (both 1-based)
pub fn trip_id(day_type: DayType, band_index: usize, trip_index: usize) -> String {
    format!("{}_band{}_trip{}", day_type.as_str(), band_index + 1, trip_index + 1)
}

/// Generates trips for a route
#[derive(Debug, Clone)]
pub struct TripGenerator {
    dwell_minutes: i32,
}

impl Default for TripGenerator {
    fn default() -> Self {
        Self {
            dwell_minutes: DEFAULT_DWELL_MINUTES,
        }
    }
}

impl TripGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generator that holds the vehicle `dwell_minutes` at every stop
    pub fn with_dwell(dwell_minutes: i32) -> Self {
        Self {
            dwell_minutes: dwell_minutes.max(0),
        }
    }

    /// Lay out a single trip departing the first stop at `start_time`.
    ///
    /// Produces exactly one entry per time point. No plausibility checks are
    /// made here, so the result is always valid.
    pub fn generate_trip_schedule(
        &self,
        trip_id: &str,
        start_time: &str,
        time_points: &[TimePoint],
        matrix: &TravelTimeMatrix,
    ) -> TripCalculationResult {
        let cumulative = calculate_sequential_travel_times(time_points, matrix);
        self.build_trip(trip_id.to_string(), time_to_minutes(start_time), &cumulative)
    }

    /// Expand `bands` into trips for one day type.
    ///
    /// Each band emits a trip at its start and every `frequency` minutes
    /// after, up to and including its end time. Cumulative travel times are
    /// resolved once and shared by all trips.
    pub fn generate_trips_from_time_bands(
        &self,
        bands: &[TimeBand],
        time_points: &[TimePoint],
        matrix: &TravelTimeMatrix,
        day_type: DayType,
    ) -> Vec<TripCalculationResult> {
        let cumulative = calculate_sequential_travel_times(time_points, matrix);
        let mut trips = Vec::with_capacity(bands.iter().map(band_trip_count).sum());

        for (band_index, band) in bands.iter().enumerate() {
            if band.frequency <= 0 {
                warn!(
                    "Skipping {} band {} ({}-{}): frequency must be positive, got {}",
                    day_type,
                    band_index + 1,
                    band.start_time,
                    band.end_time,
                    band.frequency
                );
                continue;
            }

            let start = time_to_minutes(&band.start_time);
            let end = time_to_minutes(&band.end_time);
            if end < start {
                warn!(
                    "Skipping {} band {}: end {} is before start {}",
                    day_type,
                    band_index + 1,
                    band.end_time,
                    band.start_time
                );
                continue;
            }

            let mut departure = start;
            let mut trip_index = 0;
            while departure <= end {
                trips.push(self.build_trip(trip_id(day_type, band_index, trip_index), departure, &cumulative));
                departure += band.frequency;
                trip_index += 1;
            }
        }

        debug!(
            "Generated {} {} trips from {} bands over {} time points",
            trips.len(),
            day_type,
            bands.len(),
            time_points.len()
        );

        trips
    }

    fn build_trip(&self, trip_id: String, start_minutes: i32, cumulative: &[CumulativeTime]) -> TripCalculationResult {
        let schedule_entries = cumulative
            .iter()
            .enumerate()
            .map(|(index, stop)| {
                let dwell_so_far = self.dwell_minutes.saturating_mul(index as i32);
                let arrival = start_minutes
                    .saturating_add(stop.minutes)
                    .saturating_add(dwell_so_far);
                let departure = arrival.saturating_add(self.dwell_minutes);
                ScheduleEntry {
                    time_point_id: stop.time_point_id.clone(),
                    arrival_time: format_service_time(arrival),
                    departure_time: format_service_time(departure),
                }
            })
            .collect();

        TripCalculationResult {
            trip_id,
            schedule_entries,
            total_travel_time: total_travel_minutes(cumulative),
            is_valid: true,
            errors: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn route() -> (Vec<TimePoint>, TravelTimeMatrix) {
        let points = vec![
            TimePoint::new("a", "A", 1),
            TimePoint::new("b", "B", 2),
            TimePoint::new("c", "C", 3),
        ];
        let mut matrix = TravelTimeMatrix::new();
        matrix.insert("a", "b", 10);
        matrix.insert("b", "c", 15);
        (points, matrix)
    }

    #[test]
    fn single_trip_accumulates_travel_time() {
        let (points, matrix) = route();
        let trip = TripGenerator::new().generate_trip_schedule("t1", "08:00", &points, &matrix);

        assert_eq!(trip.trip_id, "t1");
        assert!(trip.is_valid);
        assert!(trip.errors.is_empty());
        assert_eq!(trip.total_travel_time, 25);

        let times: Vec<(&str, &str)> = trip
            .schedule_entries
            .iter()
            .map(|e| (e.time_point_id.as_str(), e.arrival_time.as_str()))
            .collect();
        assert_eq!(times, vec![("a", "08:00"), ("b", "08:10"), ("c", "08:25")]);
        assert!(trip.schedule_entries.iter().all(|e| e.arrival_time == e.departure_time));
    }

    #[test]
    fn late_trip_runs_past_midnight() {
        let (points, matrix) = route();
        let trip = TripGenerator::new().generate_trip_schedule("late", "23:50", &points, &matrix);
        assert_eq!(trip.schedule_entries[1].arrival_time, "24:00");
        assert_eq!(trip.schedule_entries[2].arrival_time, "24:15");
    }

    #[test]
    fn dwell_separates_arrival_and_departure() {
        let (points, matrix) = route();
        let trip = TripGenerator::with_dwell(2).generate_trip_schedule("t", "08:00", &points, &matrix);

        let b = &trip.schedule_entries[1];
        assert_eq!(b.arrival_time, "08:12");
        assert_eq!(b.departure_time, "08:14");
        let c = &trip.schedule_entries[2];
        assert_eq!(c.arrival_time, "08:29");
        // Dwell is not travel
        assert_eq!(trip.total_travel_time, 25);
    }

    #[test]
    fn huge_travel_times_do_not_overflow() {
        let points = vec![TimePoint::new("a", "A", 1), TimePoint::new("b", "B", 2)];
        let mut matrix = TravelTimeMatrix::new();
        matrix.insert("a", "b", i32::MAX);

        let trip = TripGenerator::with_dwell(5).generate_trip_schedule("t", "23:00", &points, &matrix);
        assert_eq!(trip.schedule_entries.len(), 2);
        assert_eq!(trip.total_travel_time, i32::MAX);
        assert_eq!(trip.schedule_entries[1].arrival_time, format_service_time(i32::MAX));
    }

    #[test]
    fn band_end_is_inclusive() {
        let (points, matrix) = route();
        let bands = vec![TimeBand::new("08:00", "08:30", 15)];
        let trips = TripGenerator::new().generate_trips_from_time_bands(&bands, &points, &matrix, DayType::Weekday);

        assert_eq!(trips.len(), 3);
        let starts: Vec<&str> = trips.iter().map(|t| t.schedule_entries[0].departure_time.as_str()).collect();
        assert_eq!(starts, vec!["08:00", "08:15", "08:30"]);
        assert_eq!(band_trip_count(&bands[0]), 3);
    }

    #[test]
    fn band_not_landing_on_end_stops_before_it() {
        let band = TimeBand::new("06:00", "07:00", 25);
        assert_eq!(band_trip_count(&band), 3); // 06:00, 06:25, 06:50
    }

    #[test]
    fn trip_ids_follow_pattern() {
        let (points, matrix) = route();
        let bands = vec![
            TimeBand::new("06:00", "06:30", 30),
            TimeBand::new("07:00", "07:00", 10),
        ];
        let trips = TripGenerator::new().generate_trips_from_time_bands(&bands, &points, &matrix, DayType::Saturday);
        let ids: Vec<&str> = trips.iter().map(|t| t.trip_id.as_str()).collect();
        assert_eq!(ids, vec!["saturday_band1_trip1", "saturday_band1_trip2", "saturday_band2_trip1"]);
    }

    #[test]
    fn invalid_bands_are_skipped() {
        let (points, matrix) = route();
        let bands = vec![
            TimeBand::new("08:00", "09:00", 0),
            TimeBand::new("10:00", "09:00", 15),
            TimeBand::new("12:00", "12:20", 10),
        ];
        let trips = TripGenerator::new().generate_trips_from_time_bands(&bands, &points, &matrix, DayType::Sunday);
        assert_eq!(trips.len(), 3);
        assert_eq!(trips[0].trip_id, "sunday_band3_trip1");
        assert_eq!(band_trip_count(&bands[0]), 0);
        assert_eq!(band_trip_count(&bands[1]), 0);
    }

    #[test]
    fn inputs_are_not_modified() {
        let (points, matrix) = route();
        let points_before = points.clone();
        let matrix_before = matrix.clone();
        let bands = vec![TimeBand::new("06:00", "22:00", 10)];
        let _ = TripGenerator::new().generate_trips_from_time_bands(&bands, &points, &matrix, DayType::Weekday);
        assert_eq!(points, points_before);
        assert_eq!(matrix, matrix_before);
    }

    #[test]
    fn full_day_on_fifteen_stops_is_fast() {
        let points: Vec<TimePoint> = (0..15)
            .map(|i| TimePoint::new(format!("s{}", i), format!("Stop {}", i), i + 1))
            .collect();
        let mut matrix = TravelTimeMatrix::new();
        for i in 0..14 {
            matrix.insert(&format!("s{}", i), &format!("s{}", i + 1), 4);
        }
        let bands = vec![
            TimeBand::new("05:00", "09:00", 10),
            TimeBand::new("09:00", "15:00", 15),
            TimeBand::new("15:00", "19:00", 10),
            TimeBand::new("19:00", "23:30", 30),
        ];

        let generator = TripGenerator::new();
        let started = Instant::now();
        let mut total = 0;
        for day in DayType::ALL {
            let trips = generator.generate_trips_from_time_bands(&bands, &points, &matrix, day);
            assert!(trips.iter().all(|t| t.schedule_entries.len() == 15 && t.total_travel_time == 56));
            total += trips.len();
        }
        let elapsed = started.elapsed();

        let per_day: usize = bands.iter().map(band_trip_count).sum();
        assert_eq!(total, per_day * 3);
        assert!(elapsed.as_millis() < 1000, "trip generation took {:?}", elapsed);
    }
}
