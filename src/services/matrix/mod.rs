//! Travel time matrices between time points
//!
//! Built per day type from directed observations, optionally enhanced with
//! estimated entries for missing connections.

mod audit;
mod estimation;

pub use audit::{validate_matrix_completeness, MatrixCompletenessReport};
pub use estimation::{handle_missing_connections, EstimationPolicy};

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::types::{DayType, TravelTime};

/// Pairwise travel minutes for one day type: `from id -> to id -> minutes`.
///
/// Not complete by construction. Values are never negative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TravelTimeMatrix {
    entries: BTreeMap<String, BTreeMap<String, i32>>,
}

impl TravelTimeMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Travel minutes from `from` to `to`, if known
    pub fn get(&self, from: &str, to: &str) -> Option<i32> {
        self.entries.get(from).and_then(|row| row.get(to)).copied()
    }

    pub fn contains(&self, from: &str, to: &str) -> bool {
        self.get(from, to).is_some()
    }

    /// Set an entry. Negative values are clamped to 0.
    pub fn insert(&mut self, from: &str, to: &str, minutes: i32) {
        self.entries
            .entry(from.to_string())
            .or_default()
            .insert(to.to_string(), minutes.max(0));
    }

    /// Number of defined entries
    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate `(from, to, minutes)` in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, i32)> {
        self.entries.iter().flat_map(|(from, row)| {
            row.iter()
                .map(move |(to, minutes)| (from.as_str(), to.as_str(), *minutes))
        })
    }
}

/// Options for matrix construction
#[derive(Debug, Clone)]
pub struct MatrixOptions {
    /// Any A->B observation also populates B->A unless B->A is observed directly
    pub assume_symmetric: bool,
}

impl Default for MatrixOptions {
    fn default() -> Self {
        Self { assume_symmetric: true }
    }
}

/// One matrix per day type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayTypeMatrices {
    pub weekday: TravelTimeMatrix,
    pub saturday: TravelTimeMatrix,
    pub sunday: TravelTimeMatrix,
}

impl DayTypeMatrices {
    pub fn for_day(&self, day_type: DayType) -> &TravelTimeMatrix {
        match day_type {
            DayType::Weekday => &self.weekday,
            DayType::Saturday => &self.saturday,
            DayType::Sunday => &self.sunday,
        }
    }

    pub fn for_day_mut(&mut self, day_type: DayType) -> &mut TravelTimeMatrix {
        match day_type {
            DayType::Weekday => &mut self.weekday,
            DayType::Saturday => &mut self.saturday,
            DayType::Sunday => &mut self.sunday,
        }
    }
}

/// Build the matrix for one day type.
///
/// Every observation sets `matrix[from][to]`. With `assume_symmetric` the
/// reverse entry is backfilled with the same value unless the reverse pair
/// was observed itself, in which case the explicit observation wins.
/// Negative durations are left out of the matrix; rejecting them is the
/// validator's job.
pub fn build_matrix(
    travel_times: &[TravelTime],
    day_type: DayType,
    options: &MatrixOptions,
) -> TravelTimeMatrix {
    let observed: HashSet<(&str, &str)> = travel_times
        .iter()
        .filter(|tt| tt.minutes_for(day_type) >= 0)
        .map(|tt| (tt.from_time_point.as_str(), tt.to_time_point.as_str()))
        .collect();

    let mut matrix = TravelTimeMatrix::new();

    for tt in travel_times {
        let from = tt.from_time_point.as_str();
        let to = tt.to_time_point.as_str();
        let minutes = tt.minutes_for(day_type);

        if minutes < 0 {
            warn!(
                "Skipping negative {} travel time {} -> {} ({} min)",
                day_type, from, to, minutes
            );
            continue;
        }

        matrix.insert(from, to, minutes);

        if options.assume_symmetric && from != to && !observed.contains(&(to, from)) {
            matrix.insert(to, from, minutes);
        }
    }

    debug!(
        "Built {} matrix with {} entries from {} observations",
        day_type,
        matrix.len(),
        travel_times.len()
    );

    matrix
}

/// Build the matrices for all three day types.
pub fn calculate_travel_times(travel_times: &[TravelTime], options: &MatrixOptions) -> DayTypeMatrices {
    DayTypeMatrices {
        weekday: build_matrix(travel_times, DayType::Weekday, options),
        saturday: build_matrix(travel_times, DayType::Saturday, options),
        sunday: build_matrix(travel_times, DayType::Sunday, options),
    }
}
