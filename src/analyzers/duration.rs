use crate::analyzers::types::DurationStats;
use crate::analyzers::utility::mean;
use crate::trip::TripRecord;

/// Sum and mean of trip durations, both truncated to whole seconds.
/// Rows with no duration are skipped; `None` when no row has one.
pub fn duration_stats(trips: &[TripRecord]) -> Option<DurationStats> {
    let durations: Vec<f64> = trips.iter().filter_map(|t| t.trip_duration).collect();
    let mean = mean(&durations)?;
    let total: f64 = durations.iter().sum();

    Some(DurationStats {
        total_seconds: total.trunc() as u64,
        mean_seconds: mean.trunc() as u64,
    })
}
