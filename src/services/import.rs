//! CSV import of time points and travel times
//!
//! Accepts `;` or `,` delimited tables with a header row. Column names are
//! matched case-sensitively against a few common aliases.

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{info, warn};

use crate::types::{TimePoint, TravelTime};

#[derive(Debug, Deserialize)]
struct CsvTimePointRow {
    #[serde(alias = "stop_id", alias = "time_point_id", alias = "timePointId")]
    id: String,
    #[serde(default, alias = "stop_name", alias = "time_point_name")]
    name: Option<String>,
    #[serde(default, alias = "seq", alias = "order", alias = "stop_sequence")]
    sequence: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct CsvTravelTimeRow {
    #[serde(alias = "from_time_point", alias = "fromTimePoint", alias = "from_stop")]
    from: String,
    #[serde(alias = "to_time_point", alias = "toTimePoint", alias = "to_stop")]
    to: String,
    #[serde(alias = "minutes", alias = "travel_time")]
    weekday: i32,
    #[serde(default)]
    saturday: Option<i32>,
    #[serde(default)]
    sunday: Option<i32>,
}

fn detect_delimiter(content: &str) -> u8 {
    let header = content.lines().next().unwrap_or_default();
    if header.contains(';') {
        b';'
    } else {
        b','
    }
}

fn reader(content: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .delimiter(detect_delimiter(content))
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes())
}

/// Parse a time point table.
///
/// Missing names fall back to the id; a missing sequence falls back to the
/// row position (1-based).
pub fn parse_time_points_csv(content: &str) -> Result<Vec<TimePoint>> {
    let mut points = Vec::new();

    for (index, record) in reader(content).deserialize::<CsvTimePointRow>().enumerate() {
        // +2: header row and 1-based numbering
        let row = record.with_context(|| format!("Invalid time point on row {}", index + 2))?;
        if row.id.is_empty() {
            anyhow::bail!("Time point on row {} has an empty id", index + 2);
        }

        let name = row.name.filter(|n| !n.is_empty()).unwrap_or_else(|| row.id.clone());
        let sequence = row.sequence.unwrap_or(index as i32 + 1);
        points.push(TimePoint {
            id: row.id,
            name,
            sequence,
        });
    }

    info!("Imported {} time points", points.len());
    Ok(points)
}

/// Parse a travel time table.
///
/// Saturday and Sunday columns are optional and default to the weekday value.
pub fn parse_travel_times_csv(content: &str) -> Result<Vec<TravelTime>> {
    let mut travel_times = Vec::new();

    for (index, record) in reader(content).deserialize::<CsvTravelTimeRow>().enumerate() {
        let row = record.with_context(|| format!("Invalid travel time on row {}", index + 2))?;
        if row.from == row.to {
            warn!("Travel time on row {} starts and ends at '{}'", index + 2, row.from);
        }

        travel_times.push(TravelTime {
            saturday: row.saturday.unwrap_or(row.weekday),
            sunday: row.sunday.unwrap_or(row.weekday),
            weekday: row.weekday,
            from_time_point: row.from,
            to_time_point: row.to,
        });
    }

    info!("Imported {} travel times", travel_times.len());
    Ok(travel_times)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_semicolon_time_points() {
        let csv = "id;name;sequence\ndowntown;Downtown Terminal;1\nmainst;Main Street;2\n";
        let points = parse_time_points_csv(csv).unwrap();
        assert_eq!(
            points,
            vec![
                TimePoint::new("downtown", "Downtown Terminal", 1),
                TimePoint::new("mainst", "Main Street", 2),
            ]
        );
    }

    #[test]
    fn time_point_defaults_from_row() {
        let csv = "stop_id,stop_name\nA,\nB,Beta\n";
        let points = parse_time_points_csv(csv).unwrap();
        assert_eq!(points[0], TimePoint::new("A", "A", 1));
        assert_eq!(points[1], TimePoint::new("B", "Beta", 2));
    }

    #[test]
    fn parses_travel_times_with_aliases() {
        let csv = "from_time_point,to_time_point,weekday,saturday,sunday\ndowntown, mainst ,8,7,6\n";
        let times = parse_travel_times_csv(csv).unwrap();
        assert_eq!(times, vec![TravelTime::new("downtown", "mainst", 8, 7, 6)]);
    }

    #[test]
    fn weekend_columns_default_to_weekday() {
        let csv = "from;to;minutes\na;b;12\n";
        let times = parse_travel_times_csv(csv).unwrap();
        assert_eq!(times, vec![TravelTime::uniform("a", "b", 12)]);
    }

    #[test]
    fn negative_values_pass_through_for_validation() {
        let csv = "from,to,weekday\na,b,-3\n";
        let times = parse_travel_times_csv(csv).unwrap();
        assert_eq!(times[0].weekday, -3);
    }

    #[test]
    fn bad_number_reports_row() {
        let csv = "from,to,weekday\na,b,5\na,c,soon\n";
        let err = parse_travel_times_csv(csv).unwrap_err();
        assert!(err.to_string().contains("row 3"), "{}", err);
    }
}
