//! Gap filling for travel time matrices

use tracing::debug;

use super::TravelTimeMatrix;
use crate::defaults::{DEFAULT_ADJACENT_TRAVEL_MINUTES, MAX_ESTIMATED_TRAVEL_MINUTES};
use crate::types::{ordered_by_sequence, TimePoint};

/// Constants of the estimation heuristic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimationPolicy {
    /// Minutes assumed between stops whose sequence numbers differ by one.
    /// Longer gaps extrapolate linearly from this value.
    pub adjacent_default_minutes: i32,
}

impl Default for EstimationPolicy {
    fn default() -> Self {
        Self {
            adjacent_default_minutes: DEFAULT_ADJACENT_TRAVEL_MINUTES,
        }
    }
}

impl EstimationPolicy {
    pub fn new(adjacent_default_minutes: i32) -> Self {
        Self {
            adjacent_default_minutes: adjacent_default_minutes.max(0),
        }
    }

    /// Linear estimate for a gap of `span` sequence steps, capped at
    /// `MAX_ESTIMATED_TRAVEL_MINUTES`
    pub fn linear_estimate(&self, span: i64) -> i32 {
        (self.adjacent_default_minutes as i64)
            .saturating_mul(span)
            .clamp(0, MAX_ESTIMATED_TRAVEL_MINUTES as i64) as i32
    }
}

/// Return a copy of `matrix` with forward gaps filled.
///
/// For every pair `a.sequence < b.sequence` without an entry:
/// - adjacent pairs (sequence difference 1) get the adjacent default;
/// - longer pairs get the linear estimate, or the shortest path through
///   intermediate stops if that is smaller.
///
/// Pairs are visited in increasing distance along the route, so intermediate
/// legs are already known (observed or estimated) when a longer pair is
/// estimated. Existing entries are never overwritten, which makes the
/// function idempotent.
pub fn handle_missing_connections(
    time_points: &[TimePoint],
    matrix: &TravelTimeMatrix,
    policy: &EstimationPolicy,
) -> TravelTimeMatrix {
    let ordered = ordered_by_sequence(time_points);
    let n = ordered.len();
    let mut enhanced = matrix.clone();
    let mut estimated = 0usize;

    for distance in 1..n {
        for i in 0..n - distance {
            let j = i + distance;
            let (from, to) = (ordered[i], ordered[j]);
            let span = to.sequence as i64 - from.sequence as i64;

            if span <= 0 || from.id == to.id || enhanced.contains(&from.id, &to.id) {
                continue;
            }

            let minutes = if span == 1 {
                policy.adjacent_default_minutes
            } else {
                let linear = policy.linear_estimate(span);
                let via = (i + 1..j)
                    .filter_map(|k| {
                        let mid = ordered[k];
                        Some(enhanced.get(&from.id, &mid.id)?.saturating_add(enhanced.get(&mid.id, &to.id)?))
                    })
                    .min();
                match via {
                    Some(path) if path < linear => path,
                    _ => linear,
                }
            };

            enhanced.insert(&from.id, &to.id, minutes);
            estimated += 1;
        }
    }

    if estimated > 0 {
        debug!("Estimated {} missing connections across {} time points", estimated, n);
    }

    enhanced
}
