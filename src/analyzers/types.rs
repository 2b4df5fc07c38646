//! Report types produced by the statistics engine.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::filter::Selection;

/// Overview of the selection and the rows it kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterSummary {
    pub total_rides: usize,
    pub filtered_rides: usize,
    pub start_stations: usize,
    pub end_stations: usize,
}

/// Most frequent month, weekday and start hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TravelTimes {
    /// 1 = January
    pub month: u32,
    /// 0 = Monday
    pub day_of_week: u32,
    pub hour: u32,
}

/// A value together with how many filtered rows carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub value: String,
    pub count: usize,
}

/// Most frequent start station to end station combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopularTrip {
    pub start: String,
    pub end: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationStats {
    pub start: CategoryCount,
    pub end: CategoryCount,
    pub trip: PopularTrip,
    pub filtered_rides: usize,
}

/// Total and mean trip duration, truncated to whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DurationStats {
    pub total_seconds: u64,
    pub mean_seconds: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub most_recent: i32,
    pub most_common: i32,
}

/// Rider breakdown. `genders`/`birth_years` are `None` when the city file
/// has no such column or (for birth years) no usable values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserStats {
    pub user_types: Vec<CategoryCount>,
    pub genders: Option<Vec<CategoryCount>>,
    pub birth_years: Option<BirthYearStats>,
}

/// Every report segment for one selection. A `None` segment had no data.
#[derive(Debug, Clone, Serialize)]
pub struct CityReport {
    pub generated_at: DateTime<Utc>,
    pub selection: Selection,
    pub summary: FilterSummary,
    pub travel_times: Option<TravelTimes>,
    pub stations: Option<StationStats>,
    pub durations: Option<DurationStats>,
    pub users: Option<UserStats>,
}
