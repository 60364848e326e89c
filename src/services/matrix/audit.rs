//! Completeness report for consecutive connections

use serde::{Deserialize, Serialize};

use super::TravelTimeMatrix;
use crate::types::{ordered_by_sequence, TimePoint};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixCompletenessReport {
    pub is_complete: bool,
    /// "<from name> -> <to name>" for each consecutive pair without an entry
    pub missing_connections: Vec<String>,
}

/// Report consecutive stop pairs (in sequence order) that have no entry.
///
/// Non-adjacent gaps are not reported; cumulative summation walks only the
/// consecutive legs. Stops sharing a sequence number form no leg.
pub fn validate_matrix_completeness(
    time_points: &[TimePoint],
    matrix: &TravelTimeMatrix,
) -> MatrixCompletenessReport {
    let missing_connections: Vec<String> = ordered_by_sequence(time_points)
        .windows(2)
        .filter(|pair| pair[0].sequence != pair[1].sequence && !matrix.contains(&pair[0].id, &pair[1].id))
        .map(|pair| format!("{} -> {}", pair[0].name, pair[1].name))
        .collect();

    MatrixCompletenessReport {
        is_complete: missing_connections.is_empty(),
        missing_connections,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route() -> Vec<TimePoint> {
        vec![
            TimePoint::new("c", "Mall", 3),
            TimePoint::new("a", "Downtown", 1),
            TimePoint::new("b", "Main St", 2),
        ]
    }

    #[test]
    fn complete_matrix_reports_nothing() {
        let mut matrix = TravelTimeMatrix::new();
        matrix.insert("a", "b", 5);
        matrix.insert("b", "c", 6);

        let report = validate_matrix_completeness(&route(), &matrix);
        assert!(report.is_complete);
        assert!(report.missing_connections.is_empty());
    }

    #[test]
    fn missing_consecutive_pair_is_named() {
        let mut matrix = TravelTimeMatrix::new();
        matrix.insert("a", "b", 5);

        let report = validate_matrix_completeness(&route(), &matrix);
        assert!(!report.is_complete);
        assert_eq!(report.missing_connections, vec!["Main St -> Mall".to_string()]);
    }

    #[test]
    fn non_adjacent_gaps_are_ignored() {
        let mut matrix = TravelTimeMatrix::new();
        matrix.insert("a", "b", 5);
        matrix.insert("b", "c", 6);
        // a -> c missing but not consecutive
        let report = validate_matrix_completeness(&route(), &matrix);
        assert!(report.is_complete);
    }

    #[test]
    fn tied_sequences_are_not_reported() {
        let points = vec![
            TimePoint::new("a", "Downtown", 1),
            TimePoint::new("b", "Main St", 2),
            TimePoint::new("b2", "Main St bay 2", 2),
        ];
        let mut matrix = TravelTimeMatrix::new();
        matrix.insert("a", "b", 5);

        let report = validate_matrix_completeness(&points, &matrix);
        assert!(report.is_complete, "{:?}", report.missing_connections);

        let report = validate_matrix_completeness(&points, &TravelTimeMatrix::new());
        assert_eq!(report.missing_connections, vec!["Downtown -> Main St".to_string()]);
    }

    #[test]
    fn empty_and_single_stop_routes_are_complete() {
        let matrix = TravelTimeMatrix::new();
        assert!(validate_matrix_completeness(&[], &matrix).is_complete);
        assert!(validate_matrix_completeness(&[TimePoint::new("a", "A", 1)], &matrix).is_complete);
    }
}
