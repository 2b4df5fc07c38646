//! Console formatting for report segments, timing lines and raw rows.
//!
//! Every printer writes to a caller-supplied [`Write`] so the interactive
//! session, the one-shot report and the tests share the same code.

use anyhow::Result;
use csv::WriterBuilder;
use std::fmt::Display;
use std::io::Write;
use std::ops::Range;
use std::time::Instant;

use crate::analyzers::types::{
    CityReport, DurationStats, FilterSummary, StationStats, TravelTimes, UserStats,
};
use crate::filter::{Selection, day_name, month_name};
use crate::loader::Dataset;

pub const LINE_WIDTH: usize = 90;
/// Raw rows shown per page.
pub const PAGE_SIZE: usize = 5;
const LABEL_WIDTH: usize = 28;

/// Converts a 0-23 hour into 12-hour clock text, e.g. `17` -> `5 PM`.
pub fn hour_12_str(hour: u32) -> String {
    match hour {
        0 => "12 AM".to_string(),
        12 => "12 PM".to_string(),
        h if h < 12 => format!("{h} AM"),
        h => format!("{} PM", h - 12),
    }
}

/// Breaks a number of seconds into weeks, days, hours, minutes and seconds.
///
/// Larger units appear only when nonzero. Seconds appear whenever the total
/// exceeds 59, and on their own for shorter totals.
pub fn seconds_str(total_seconds: u64) -> String {
    let (minutes, seconds) = (total_seconds / 60, total_seconds % 60);
    let (hours, minutes) = (minutes / 60, minutes % 60);
    let (days, hours) = (hours / 24, hours % 24);
    let (weeks, days) = (days / 7, days % 7);

    let mut parts = Vec::new();
    let units = [
        (weeks, "weeks"),
        (days, "days"),
        (hours, "hours"),
        (minutes, "minutes"),
    ];
    for (value, unit) in units {
        if value > 0 {
            parts.push(format!("{value} {unit}"));
        }
    }
    if total_seconds > 59 || parts.is_empty() {
        parts.push(format!("{seconds} seconds"));
    }

    parts.join(", ")
}

/// Capitalizes each word: `new york city` -> `New York City`.
pub fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn print_line<W: Write>(out: &mut W, ch: char) -> Result<()> {
    writeln!(out, "{}", ch.to_string().repeat(LINE_WIDTH))?;
    Ok(())
}

/// Prints the time since `started`, right-aligned, followed by a rule.
pub fn print_elapsed<W: Write>(out: &mut W, started: Instant) -> Result<()> {
    let text = format!("[... {:.3} seconds]", started.elapsed().as_secs_f64());
    writeln!(out, "{text:>LINE_WIDTH$}")?;
    print_line(out, '-')
}

/// Writes `name: value` with the name right-aligned. An empty name
/// continues the previous line's value column.
fn label<W: Write>(out: &mut W, name: &str, value: impl Display) -> Result<()> {
    let name = if name.is_empty() {
        String::new()
    } else {
        format!("{name}:")
    };
    writeln!(out, "{name:>LABEL_WIDTH$}  {value}")?;
    Ok(())
}

fn no_data<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "    No data for this filter.")?;
    Ok(())
}

pub fn print_banner<W: Write>(out: &mut W) -> Result<()> {
    print_line(out, '=')?;
    writeln!(out, "\n  Hello! Let's explore some US bikeshare data!\n")?;
    Ok(())
}

pub fn print_summary<W: Write>(
    out: &mut W,
    selection: &Selection,
    summary: &FilterSummary,
) -> Result<()> {
    writeln!(out, "  Gathering statistics for {}...", title_case(&selection.city.name))?;
    label(out, "Filters (month, day)", format!("{}, {}", selection.month, selection.day))?;
    label(out, "Total rides in dataset", summary.total_rides)?;
    label(out, "Rides in filtered set", summary.filtered_rides)?;
    label(out, "Number of start stations", summary.start_stations)?;
    label(out, "Number of end stations", summary.end_stations)
}

pub fn print_travel_times<W: Write>(out: &mut W, stats: Option<&TravelTimes>) -> Result<()> {
    writeln!(out, "  Most Frequent Times of Travel...")?;
    let Some(stats) = stats else {
        return no_data(out);
    };

    label(out, "Month", month_name(stats.month).unwrap_or("unknown"))?;
    label(out, "Day of the week", day_name(stats.day_of_week).unwrap_or("unknown"))?;
    label(out, "Start hour", hour_12_str(stats.hour))
}

pub fn print_stations<W: Write>(out: &mut W, stats: Option<&StationStats>) -> Result<()> {
    writeln!(out, "  Most Popular Stations and Trip...")?;
    let Some(stats) = stats else {
        return no_data(out);
    };

    let total = stats.filtered_rides;
    label(out, "Start station", &stats.start.value)?;
    label(out, "", format!("{}/{} trips", stats.start.count, total))?;
    label(out, "End station", &stats.end.value)?;
    label(out, "", format!("{}/{} trips", stats.end.count, total))?;
    label(out, "Frequent trip", format!("{}, {}", stats.trip.start, stats.trip.end))?;
    label(out, "", format!("{} trips", stats.trip.count))
}

pub fn print_durations<W: Write>(out: &mut W, stats: Option<&DurationStats>) -> Result<()> {
    writeln!(out, "  Trip Duration...")?;
    let Some(stats) = stats else {
        return no_data(out);
    };

    label(out, "Total travel time", format!("{} seconds", stats.total_seconds))?;
    label(out, "", seconds_str(stats.total_seconds))?;
    label(out, "Mean travel time", format!("{} seconds", stats.mean_seconds))?;
    label(out, "", seconds_str(stats.mean_seconds))
}

pub fn print_users<W: Write>(out: &mut W, stats: Option<&UserStats>) -> Result<()> {
    writeln!(out, "  User Stats...")?;
    let Some(stats) = stats else {
        return no_data(out);
    };

    for entry in &stats.user_types {
        label(out, &entry.value, entry.count)?;
    }
    for entry in stats.genders.iter().flatten() {
        label(out, &entry.value, entry.count)?;
    }
    if let Some(years) = &stats.birth_years {
        writeln!(out, "    Year of Birth...")?;
        label(out, "Earliest", years.earliest)?;
        label(out, "Most recent", years.most_recent)?;
        label(out, "Most common", years.most_common)?;
    }
    Ok(())
}

/// Prints every segment of a finished report, separated by rules.
pub fn print_report<W: Write>(out: &mut W, report: &CityReport) -> Result<()> {
    print_summary(out, &report.selection, &report.summary)?;
    print_line(out, '-')?;
    print_travel_times(out, report.travel_times.as_ref())?;
    print_line(out, '-')?;
    print_stations(out, report.stations.as_ref())?;
    print_line(out, '-')?;
    print_durations(out, report.durations.as_ref())?;
    print_line(out, '-')?;
    print_users(out, report.users.as_ref())?;
    print_line(out, '-')
}

/// Writes a report as pretty-printed JSON.
pub fn print_json<W: Write>(out: &mut W, report: &CityReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

/// Walks a table of `len` rows one fixed-size page at a time.
#[derive(Debug, Clone)]
pub struct Pager {
    len: usize,
    page_size: usize,
    next: usize,
}

impl Pager {
    pub fn new(len: usize, page_size: usize) -> Self {
        Self {
            len,
            page_size: page_size.max(1),
            next: 0,
        }
    }

    /// Returns the next window of row indices, clamped to the table end.
    pub fn next_page(&mut self) -> Option<Range<usize>> {
        if self.is_exhausted() {
            return None;
        }
        let range = self.next..(self.next + self.page_size).min(self.len);
        self.next = range.end;
        Some(range)
    }

    pub fn is_exhausted(&self) -> bool {
        self.next >= self.len
    }
}

/// Prints the rows in `range` as CSV, numbered from 1.
///
/// Optional columns are included only when the dataset has them.
pub fn print_rows<W: Write>(out: &mut W, dataset: &Dataset, range: Range<usize>) -> Result<()> {
    let first = range.start;
    let Some(rows) = dataset.trips.get(range) else {
        return Ok(());
    };

    let mut writer = WriterBuilder::new().from_writer(&mut *out);

    let mut header = vec![
        "#",
        "Start Time",
        "End Time",
        "Trip Duration",
        "Start Station",
        "End Station",
        "User Type",
    ];
    if dataset.has_gender {
        header.push("Gender");
    }
    if dataset.has_birth_year {
        header.push("Birth Year");
    }
    writer.write_record(&header)?;

    for (offset, trip) in rows.iter().enumerate() {
        let mut record = vec![
            (first + offset + 1).to_string(),
            trip.start_time
                .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default(),
            trip.end_time.clone().unwrap_or_default(),
            trip.trip_duration.map(|d| d.to_string()).unwrap_or_default(),
            trip.start_station.clone().unwrap_or_default(),
            trip.end_station.clone().unwrap_or_default(),
            trip.user_type.clone().unwrap_or_default(),
        ];
        if dataset.has_gender {
            record.push(trip.gender.clone().unwrap_or_default());
        }
        if dataset.has_birth_year {
            record.push(trip.birth_year.map(|y| y.to_string()).unwrap_or_default());
        }
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::build_report;
    use crate::config::City;
    use crate::filter::Choice;
    use crate::loader::read_dataset;
    use chrono::Month;
    use std::path::PathBuf;

    const TRIPS: &str = "\
Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender
2017-01-02 08:15:00,2017-01-02 08:20:00,300,A,B,Subscriber,Male
2017-01-03 17:05:00,2017-01-03 17:12:00,420,B,C,Customer,
bad,2017-01-03 18:00:00,60,B,C,Customer,Female
2017-01-04 09:00:00,x,60,A,B,Subscriber,Female
2017-01-05 09:00:00,x,60,A,B,Subscriber,Female
2017-01-06 09:00:00,x,60,A,B,Subscriber,Male
2017-01-07 09:00:00,x,60,A,B,Subscriber,Male
";

    fn selection() -> Selection {
        Selection {
            city: City {
                name: "new york city".to_string(),
                file: PathBuf::from("new_york_city.csv"),
            },
            month: Choice::Only(Month::January),
            day: Choice::All,
        }
    }

    fn rendered(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_hour_12_str() {
        assert_eq!(hour_12_str(0), "12 AM");
        assert_eq!(hour_12_str(5), "5 AM");
        assert_eq!(hour_12_str(11), "11 AM");
        assert_eq!(hour_12_str(12), "12 PM");
        assert_eq!(hour_12_str(17), "5 PM");
        assert_eq!(hour_12_str(23), "11 PM");
    }

    #[test]
    fn test_seconds_str() {
        assert_eq!(seconds_str(0), "0 seconds");
        assert_eq!(seconds_str(45), "45 seconds");
        assert_eq!(seconds_str(60), "1 minutes, 0 seconds");
        assert_eq!(seconds_str(3600), "1 hours, 0 seconds");
        assert_eq!(seconds_str(90061), "1 days, 1 hours, 1 minutes, 1 seconds");
        assert_eq!(
            seconds_str(694861),
            "1 weeks, 1 days, 1 hours, 1 minutes, 1 seconds"
        );
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("new york city"), "New York City");
        assert_eq!(title_case("chicago"), "Chicago");
    }

    #[test]
    fn test_pager_stops_at_end() {
        let mut pager = Pager::new(7, PAGE_SIZE);

        assert_eq!(pager.next_page(), Some(0..5));
        assert_eq!(pager.next_page(), Some(5..7));
        assert!(pager.is_exhausted());
        assert_eq!(pager.next_page(), None);
        assert_eq!(pager.next_page(), None);
    }

    #[test]
    fn test_pager_empty_table() {
        let mut pager = Pager::new(0, PAGE_SIZE);
        assert_eq!(pager.next_page(), None);
    }

    #[test]
    fn test_print_rows_numbers_and_columns() {
        let data = read_dataset(TRIPS.as_bytes()).unwrap();
        let text = rendered(|out| print_rows(out, &data, 1..3));
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("User Type,Gender"));
        assert!(lines[1].starts_with("2,2017-01-03 17:05:00,"));
        // unparseable start time prints as an empty cell
        assert!(lines[2].starts_with("3,,2017-01-03 18:00:00,60,B,C,Customer,Female"));
    }

    #[test]
    fn test_print_rows_out_of_range_prints_nothing() {
        let data = read_dataset(TRIPS.as_bytes()).unwrap();
        let text = rendered(|out| print_rows(out, &data, 10..15));
        assert!(text.is_empty());
    }

    #[test]
    fn test_print_report_values() {
        let data = read_dataset(TRIPS.as_bytes()).unwrap();
        let report = build_report(&selection(), 10, &data);
        let text = rendered(|out| print_report(out, &report));

        assert!(text.contains("Gathering statistics for New York City"));
        assert!(text.contains("January, all"));
        assert!(text.contains("9 AM"));
        assert!(text.contains("5/7 trips"));
        assert!(text.contains("1020 seconds"));
        assert!(text.contains("17 minutes, 0 seconds"));
        assert!(!text.contains("Year of Birth"));
    }

    #[test]
    fn test_print_segments_without_data() {
        let text = rendered(|out| {
            print_travel_times(out, None)?;
            print_stations(out, None)?;
            print_durations(out, None)?;
            print_users(out, None)
        });
        assert_eq!(text.matches("No data for this filter.").count(), 4);
    }

    #[test]
    fn test_print_json_is_valid() {
        let report = build_report(&selection(), 0, &Dataset::default());
        let text = rendered(|out| print_json(out, &report));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["selection"]["month"], "January");
        assert_eq!(value["selection"]["day"], "all");
        assert!(value["travel_times"].is_null());
        assert_eq!(value["summary"]["filtered_rides"], 0);
    }

    #[test]
    fn test_print_elapsed_is_right_aligned() {
        let text = rendered(|out| print_elapsed(out, Instant::now()));
        let first = text.lines().next().unwrap();

        assert_eq!(first.len(), LINE_WIDTH);
        assert!(first.trim_start().starts_with("[... "));
    }
}
