//! Time point (stop) types

use serde::{Deserialize, Serialize};

/// A named, sequenced stop along a route.
///
/// `sequence` defines the order of stops. Duplicate sequence values are
/// tolerated; ties keep the caller's array order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimePoint {
    pub id: String,
    pub name: String,
    pub sequence: i32,
}

impl TimePoint {
    pub fn new(id: impl Into<String>, name: impl Into<String>, sequence: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sequence,
        }
    }
}

/// Return references to `points` sorted by ascending `sequence`.
///
/// The sort is stable, so stops sharing a sequence number stay in the order
/// the caller supplied them.
pub fn ordered_by_sequence(points: &[TimePoint]) -> Vec<&TimePoint> {
    let mut ordered: Vec<&TimePoint> = points.iter().collect();
    ordered.sort_by_key(|p| p.sequence);
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_by_sequence_ignores_array_order() {
        let points = vec![
            TimePoint::new("c", "C", 3),
            TimePoint::new("a", "A", 1),
            TimePoint::new("b", "B", 2),
        ];
        let ids: Vec<&str> = ordered_by_sequence(&points).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn ordered_by_sequence_keeps_ties_in_input_order() {
        let points = vec![
            TimePoint::new("x", "X", 2),
            TimePoint::new("first", "First", 1),
            TimePoint::new("y", "Y", 2),
        ];
        let ids: Vec<&str> = ordered_by_sequence(&points).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "x", "y"]);
    }

    #[test]
    fn test_time_point_deserialize() {
        let json = r#"{"id":"downtown","name":"Downtown Terminal","sequence":1}"#;
        let point: TimePoint = serde_json::from_str(json).unwrap();
        assert_eq!(point, TimePoint::new("downtown", "Downtown Terminal", 1));
    }
}
