use std::collections::HashSet;

use crate::analyzers::types::FilterSummary;
use crate::trip::TripRecord;

/// Counts rows and distinct stations in the filtered set.
///
/// Defined for empty input, unlike the other segments.
pub fn summarize(total_rides: usize, trips: &[TripRecord]) -> FilterSummary {
    let start_stations: HashSet<_> = trips
        .iter()
        .filter_map(|t| t.start_station.as_deref())
        .collect();
    let end_stations: HashSet<_> = trips
        .iter()
        .filter_map(|t| t.end_station.as_deref())
        .collect();

    FilterSummary {
        total_rides,
        filtered_rides: trips.len(),
        start_stations: start_stations.len(),
        end_stations: end_stations.len(),
    }
}
