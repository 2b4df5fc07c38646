//! Trip records and the time fields derived from their start timestamps.

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::Deserialize;

/// Timestamp layouts seen across the city files, tried in order.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
];

/// One CSV row exactly as it appears on disk.
///
/// Optional columns (`Gender`, `Birth Year`) deserialize to `None` both when
/// the cell is empty and when the column is missing from the file. Numeric
/// cells that do not parse also read as `None`.
#[derive(Debug, Deserialize)]
pub(crate) struct RawTrip {
    #[serde(rename = "Start Time")]
    start_time: Option<String>,
    #[serde(rename = "End Time")]
    end_time: Option<String>,
    #[serde(rename = "Trip Duration", deserialize_with = "csv::invalid_option")]
    trip_duration: Option<f64>,
    #[serde(rename = "Start Station")]
    start_station: Option<String>,
    #[serde(rename = "End Station")]
    end_station: Option<String>,
    #[serde(rename = "User Type")]
    user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    #[serde(rename = "Birth Year", default, deserialize_with = "csv::invalid_option")]
    birth_year: Option<f64>,
}

/// Calendar fields derived once from a trip's start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeParts {
    /// 1 = January .. 12 = December
    pub month: u32,
    /// 0 = Monday .. 6 = Sunday
    pub day_of_week: u32,
    /// 0..=23
    pub hour: u32,
}

impl TimeParts {
    pub fn from_datetime(ts: &NaiveDateTime) -> Self {
        TimeParts {
            month: ts.month(),
            day_of_week: ts.weekday().num_days_from_monday(),
            hour: ts.hour(),
        }
    }
}

/// A single bike-share trip with its derived time fields.
///
/// `parts` is `Some` exactly when `start_time` parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<String>,
    pub trip_duration: Option<f64>,
    pub start_station: Option<String>,
    pub end_station: Option<String>,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
    pub parts: Option<TimeParts>,
}

impl TripRecord {
    /// Converts a decoded CSV row, deriving time fields from the start time.
    pub(crate) fn from_raw(raw: RawTrip) -> Self {
        let start_time = raw.start_time.as_deref().and_then(parse_timestamp);

        TripRecord {
            parts: start_time.as_ref().map(TimeParts::from_datetime),
            start_time,
            end_time: raw.end_time,
            trip_duration: raw.trip_duration,
            start_station: raw.start_station,
            end_station: raw.end_station,
            user_type: raw.user_type,
            gender: raw.gender,
            birth_year: raw.birth_year.map(|y| y.trunc() as i32),
        }
    }
}

/// Parses a start/end timestamp, returning `None` for anything unrecognised.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
}
