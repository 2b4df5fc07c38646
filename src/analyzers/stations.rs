use crate::analyzers::types::{CategoryCount, PopularTrip, StationStats};
use crate::analyzers::utility::{counts, max_count, mode};
use crate::trip::TripRecord;

/// Most popular start station, end station and start/end combination.
///
/// Station ties resolve to the alphabetically first name. Combinations are
/// grouped in ascending (start, end) order and the first group with the
/// highest count wins. Rows missing either station are left out of the
/// combination count.
pub fn station_stats(trips: &[TripRecord]) -> Option<StationStats> {
    let (start, start_count) = mode(trips.iter().filter_map(|t| t.start_station.as_deref()))?;
    let (end, end_count) = mode(trips.iter().filter_map(|t| t.end_station.as_deref()))?;

    let pairs = counts(
        trips
            .iter()
            .filter_map(|t| Some((t.start_station.as_deref()?, t.end_station.as_deref()?))),
    );
    let ((trip_start, trip_end), trip_count) = max_count(pairs)?;

    Some(StationStats {
        start: CategoryCount {
            value: start.to_string(),
            count: start_count,
        },
        end: CategoryCount {
            value: end.to_string(),
            count: end_count,
        },
        trip: PopularTrip {
            start: trip_start.to_string(),
            end: trip_end.to_string(),
            count: trip_count,
        },
        filtered_rides: trips.len(),
    })
}
