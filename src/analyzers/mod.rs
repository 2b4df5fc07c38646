//! Descriptive statistics over a filtered set of trips.
//!
//! Each segment is computed independently from a shared, read-only view of
//! the filtered rows and returns `None` when the rows hold no data for it.

pub mod duration;
pub mod stations;
pub mod summary;
pub mod travel;
pub mod types;
pub mod users;
pub mod utility;

use chrono::Utc;

use crate::analyzers::types::CityReport;
use crate::filter::Selection;
use crate::loader::Dataset;

/// Computes every report segment for `filtered`.
///
/// `total_rides` is the row count of the city file before filtering.
pub fn build_report(selection: &Selection, total_rides: usize, filtered: &Dataset) -> CityReport {
    let trips = &filtered.trips;

    CityReport {
        generated_at: Utc::now(),
        selection: selection.clone(),
        summary: summary::summarize(total_rides, trips),
        travel_times: travel::travel_times(trips),
        stations: stations::station_stats(trips),
        durations: duration::duration_stats(trips),
        users: users::user_stats(filtered),
    }
}
