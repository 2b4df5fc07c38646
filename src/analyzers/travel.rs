use crate::analyzers::types::TravelTimes;
use crate::analyzers::utility::mode;
use crate::trip::TripRecord;

/// Most frequent month, day of week and start hour.
///
/// Rows without a parseable start time are ignored. Ties resolve to the
/// smallest value (earliest month, Monday-first day, earliest hour).
/// Returns `None` when no row has time fields.
pub fn travel_times(trips: &[TripRecord]) -> Option<TravelTimes> {
    let parts: Vec<_> = trips.iter().filter_map(|t| t.parts).collect();

    let (month, _) = mode(parts.iter().map(|p| p.month))?;
    let (day_of_week, _) = mode(parts.iter().map(|p| p.day_of_week))?;
    let (hour, _) = mode(parts.iter().map(|p| p.hour))?;

    Some(TravelTimes {
        month,
        day_of_week,
        hour,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::read_dataset;

    fn trips(csv_rows: &str) -> Vec<TripRecord> {
        let csv = format!(
            "Start Time,End Time,Trip Duration,Start Station,End Station,User Type\n{csv_rows}"
        );
        read_dataset(csv.as_bytes()).unwrap().trips
    }

    #[test]
    fn test_travel_times_modes() {
        let trips = trips(
            "2017-03-01 17:00:00,x,60,A,B,Subscriber\n\
             2017-03-08 17:30:00,x,60,A,B,Subscriber\n\
             2017-04-02 09:00:00,x,60,A,B,Subscriber\n",
        );
        let stats = travel_times(&trips).unwrap();

        assert_eq!(stats.month, 3);
        assert_eq!(stats.day_of_week, 2);
        assert_eq!(stats.hour, 17);
    }

    #[test]
    fn test_travel_times_tie_picks_smallest() {
        // January Monday 10h, January Tuesday 9h, February Monday 9h, February Tuesday 10h
        let trips = trips(
            "2017-01-02 10:00:00,x,60,A,B,Subscriber\n\
             2017-01-03 09:00:00,x,60,A,B,Subscriber\n\
             2017-02-06 09:00:00,x,60,A,B,Subscriber\n\
             2017-02-07 10:00:00,x,60,A,B,Subscriber\n",
        );
        let stats = travel_times(&trips).unwrap();

        assert_eq!(stats.month, 1);
        assert_eq!(stats.day_of_week, 0);
        assert_eq!(stats.hour, 9);
    }

    #[test]
    fn test_travel_times_ignores_missing_times() {
        let trips = trips(
            "bad,x,60,A,B,Subscriber\n\
             bad,x,60,A,B,Subscriber\n\
             2017-05-05 23:10:00,x,60,A,B,Subscriber\n",
        );
        let stats = travel_times(&trips).unwrap();

        assert_eq!(stats.month, 5);
        assert_eq!(stats.hour, 23);
    }

    #[test]
    fn test_travel_times_no_data() {
        assert!(travel_times(&[]).is_none());
        assert!(travel_times(&trips("bad,x,60,A,B,Subscriber\n")).is_none());
    }
}
