//! Travel time observation types

use serde::{Deserialize, Serialize};

/// Service day type. Each day type has its own matrix and band set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    Weekday,
    Saturday,
    Sunday,
}

impl DayType {
    pub const ALL: [DayType; 3] = [DayType::Weekday, DayType::Saturday, DayType::Sunday];

    pub const fn as_str(self) -> &'static str {
        match self {
            DayType::Weekday => "weekday",
            DayType::Saturday => "saturday",
            DayType::Sunday => "sunday",
        }
    }
}

impl std::fmt::Display for DayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Observed directed duration between two time points, in minutes per day type.
///
/// Values are signed so that bad input can reach the validator instead of
/// failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelTime {
    pub from_time_point: String,
    pub to_time_point: String,
    pub weekday: i32,
    pub saturday: i32,
    pub sunday: i32,
}

impl TravelTime {
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        weekday: i32,
        saturday: i32,
        sunday: i32,
    ) -> Self {
        Self {
            from_time_point: from.into(),
            to_time_point: to.into(),
            weekday,
            saturday,
            sunday,
        }
    }

    /// Same duration for every day type.
    pub fn uniform(from: impl Into<String>, to: impl Into<String>, minutes: i32) -> Self {
        Self::new(from, to, minutes, minutes, minutes)
    }

    pub fn minutes_for(&self, day_type: DayType) -> i32 {
        match day_type {
            DayType::Weekday => self.weekday,
            DayType::Saturday => self.saturday,
            DayType::Sunday => self.sunday,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minutes_for_picks_day_type_column() {
        let tt = TravelTime::new("a", "b", 8, 7, 6);
        assert_eq!(tt.minutes_for(DayType::Weekday), 8);
        assert_eq!(tt.minutes_for(DayType::Saturday), 7);
        assert_eq!(tt.minutes_for(DayType::Sunday), 6);
    }

    #[test]
    fn test_travel_time_deserialize_camel_case() {
        let json = r#"{
            "fromTimePoint": "downtown",
            "toTimePoint": "mainst",
            "weekday": 8,
            "saturday": 7,
            "sunday": 6
        }"#;
        let tt: TravelTime = serde_json::from_str(json).unwrap();
        assert_eq!(tt.from_time_point, "downtown");
        assert_eq!(tt.to_time_point, "mainst");
        assert_eq!(tt.sunday, 6);
    }

    #[test]
    fn test_day_type_serialization() {
        for day in DayType::ALL {
            let json = serde_json::to_string(&day).unwrap();
            assert_eq!(json, format!("\"{}\"", day.as_str()));
            let back: DayType = serde_json::from_str(&json).unwrap();
            assert_eq!(back, day);
        }
    }
}
