//! Cumulative elapsed time along a route.
//!
//! Walks the time points in sequence order and sums consecutive legs from the
//! matrix. This does NOT estimate missing legs: a missing entry contributes
//! zero minutes. Callers that need estimates enhance the matrix first.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::services::matrix::TravelTimeMatrix;
use crate::types::{ordered_by_sequence, TimePoint};

/// Elapsed minutes from the first stop to `time_point_id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CumulativeTime {
    pub time_point_id: String,
    pub minutes: i32,
}

/// Compute cumulative times in ascending sequence order.
///
/// The caller's array order is not trusted. Ties in `sequence` keep their
/// original relative order. The first stop is always 0.
pub fn calculate_sequential_travel_times(
    time_points: &[TimePoint],
    matrix: &TravelTimeMatrix,
) -> Vec<CumulativeTime> {
    let ordered = ordered_by_sequence(time_points);
    let mut result = Vec::with_capacity(ordered.len());
    let mut elapsed: i32 = 0;
    let mut previous: Option<&TimePoint> = None;

    for point in ordered {
        if let Some(prev) = previous {
            match matrix.get(&prev.id, &point.id) {
                Some(minutes) => elapsed = elapsed.saturating_add(minutes),
                None => debug!("No travel time {} -> {}, counting 0 minutes", prev.id, point.id),
            }
        }

        result.push(CumulativeTime {
            time_point_id: point.id.clone(),
            minutes: elapsed,
        });
        previous = Some(point);
    }

    result
}

/// Total minutes from the first to the last stop
pub fn total_travel_minutes(cumulative: &[CumulativeTime]) -> i32 {
    cumulative.last().map(|c| c.minutes).unwrap_or(0)
}
