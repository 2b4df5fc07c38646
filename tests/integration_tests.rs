use bikeshare_stats::analyzers::build_report;
use bikeshare_stats::analyzers::types::CategoryCount;
use bikeshare_stats::config::City;
use bikeshare_stats::filter::{self, Choice, Selection};
use bikeshare_stats::loader::read_dataset;
use bikeshare_stats::output::{hour_12_str, seconds_str};
use chrono::{Month, Weekday};
use std::path::PathBuf;

fn selection(month: Choice<Month>, day: Choice<Weekday>) -> Selection {
    Selection {
        city: City {
            name: "chicago".to_string(),
            file: PathBuf::from("tests/fixtures/sample_city.csv"),
        },
        month,
        day,
    }
}

fn count(value: &str, count: usize) -> CategoryCount {
    CategoryCount {
        value: value.to_string(),
        count,
    }
}

#[test]
fn test_full_pipeline_all_filters() {
    let bytes = include_bytes!("fixtures/sample_city.csv");
    let dataset = read_dataset(&bytes[..]).expect("Failed to read fixture");
    assert_eq!(dataset.len(), 10);

    let selection = selection(Choice::All, Choice::All);
    let filtered = filter::apply(&dataset, &selection);
    assert_eq!(filtered.len(), 10);

    let report = build_report(&selection, dataset.len(), &filtered);

    assert_eq!(report.summary.total_rides, 10);
    assert_eq!(report.summary.filtered_rides, 10);
    assert_eq!(report.summary.start_stations, 3);
    assert_eq!(report.summary.end_stations, 3);

    let times = report.travel_times.unwrap();
    assert_eq!(times.month, 1);
    assert_eq!(times.day_of_week, 0);
    assert_eq!(hour_12_str(times.hour), "8 AM");

    let stations = report.stations.unwrap();
    assert_eq!(stations.start, count("Canal St & Adams St", 5));
    assert_eq!(stations.end, count("Clinton St & Madison St", 5));
    assert_eq!(stations.trip.start, "Canal St & Adams St");
    assert_eq!(stations.trip.end, "Clinton St & Madison St");
    assert_eq!(stations.trip.count, 4);
    assert_eq!(stations.filtered_rides, 10);

    let durations = report.durations.unwrap();
    assert_eq!(durations.total_seconds, 8600);
    assert_eq!(durations.mean_seconds, 860);
    assert_eq!(seconds_str(durations.total_seconds), "2 hours, 23 minutes, 20 seconds");
    assert_eq!(seconds_str(durations.mean_seconds), "14 minutes, 20 seconds");

    let users = report.users.unwrap();
    assert_eq!(users.user_types, vec![count("Subscriber", 7), count("Customer", 3)]);
    assert_eq!(users.genders, Some(vec![count("Male", 5), count("Female", 3)]));
    let years = users.birth_years.unwrap();
    assert_eq!(years.earliest, 1978);
    assert_eq!(years.most_recent, 2000);
    assert_eq!(years.most_common, 1985);
}

#[test]
fn test_full_pipeline_month_and_day() {
    let bytes = include_bytes!("fixtures/sample_city.csv");
    let dataset = read_dataset(&bytes[..]).unwrap();

    let january_only = selection(Choice::Only(Month::January), Choice::All);
    let january = filter::apply(&dataset, &january_only);
    assert_eq!(january.len(), 5);
    let durations = build_report(&january_only, 10, &january).durations.unwrap();
    assert_eq!(durations.total_seconds, 1920);
    assert_eq!(durations.mean_seconds, 384);

    let selection = selection(Choice::Only(Month::January), Choice::Only(Weekday::Mon));
    let filtered = filter::apply(&dataset, &selection);
    assert_eq!(filtered.len(), 3);

    let report = build_report(&selection, dataset.len(), &filtered);
    assert_eq!(report.summary.total_rides, 10);
    assert_eq!(report.summary.filtered_rides, 3);
    let stations = report.stations.unwrap();
    assert_eq!(stations.trip.count, 3);
    assert_eq!(stations.start, count("Canal St & Adams St", 3));
}

#[test]
fn test_full_pipeline_empty_selection() {
    let bytes = include_bytes!("fixtures/sample_city.csv");
    let dataset = read_dataset(&bytes[..]).unwrap();

    let selection = selection(Choice::Only(Month::April), Choice::All);
    let filtered = filter::apply(&dataset, &selection);
    let report = build_report(&selection, dataset.len(), &filtered);

    assert_eq!(report.summary.filtered_rides, 0);
    assert!(report.travel_times.is_none());
    assert!(report.stations.is_none());
    assert!(report.durations.is_none());
    assert!(report.users.is_none());
}
