//! Month/day filter selection and application.
//!
//! The `parse_*` functions validate a single answer to one of the filter
//! prompts; [`apply`] narrows a loaded [`Dataset`] to the chosen selection.

use chrono::{Month, Weekday};
use serde::Serialize;
use std::fmt;

use crate::config::City;
use crate::loader::Dataset;
use crate::trip::TripRecord;

/// Months the city files cover, offered as `1..=SELECTABLE_MONTHS`.
pub const SELECTABLE_MONTHS: u8 = 6;

/// A filter value: either one specific item or no filter at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice<T> {
    All,
    Only(T),
}

impl fmt::Display for Choice<Month> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::All => f.write_str("all"),
            Choice::Only(m) => f.write_str(m.name()),
        }
    }
}

impl fmt::Display for Choice<Weekday> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::All => f.write_str("all"),
            Choice::Only(d) => f.write_str(weekday_name(*d)),
        }
    }
}

impl<T> Serialize for Choice<T>
where
    Choice<T>: fmt::Display,
{
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The (city, month, day) triple chosen for one session iteration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub city: City,
    pub month: Choice<Month>,
    pub day: Choice<Weekday>,
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Name of a 1-based month number.
pub fn month_name(month: u32) -> Option<&'static str> {
    let month = u8::try_from(month).ok()?;
    Month::try_from(month).ok().map(|m| m.name())
}

/// Name of a 0-based (Monday = 0) day-of-week number.
pub fn day_name(day_of_week: u32) -> Option<&'static str> {
    let day = u8::try_from(day_of_week).ok()?;
    Weekday::try_from(day).ok().map(weekday_name)
}

fn is_all(input: &str) -> bool {
    input.eq_ignore_ascii_case("a") || input.eq_ignore_ascii_case("all")
}

/// Accepts `1`..`6` (January..June) or `a`/`all`.
pub fn parse_month_choice(input: &str) -> Option<Choice<Month>> {
    let input = input.trim();
    if is_all(input) {
        return Some(Choice::All);
    }

    let n = menu_number(input)?;
    if !(1..=usize::from(SELECTABLE_MONTHS)).contains(&n) {
        return None;
    }
    Month::try_from(u8::try_from(n).ok()?).ok().map(Choice::Only)
}

/// Accepts `1`..`7` (Monday..Sunday) or `a`/`all`.
pub fn parse_day_choice(input: &str) -> Option<Choice<Weekday>> {
    let input = input.trim();
    if is_all(input) {
        return Some(Choice::All);
    }

    let n = menu_number(input)?;
    if !(1..=7).contains(&n) {
        return None;
    }
    Weekday::try_from(u8::try_from(n - 1).ok()?).ok().map(Choice::Only)
}

/// Accepts a 1-based menu number and returns the 0-based city index.
pub fn parse_city_choice(input: &str, city_count: usize) -> Option<usize> {
    let n = menu_number(input.trim())?;
    (1..=city_count).contains(&n).then(|| n - 1)
}

/// Parses a menu number written exactly as shown: plain digits, no sign and
/// no leading zero.
fn menu_number(input: &str) -> Option<usize> {
    let bytes = input.as_bytes();
    if bytes.first().is_none_or(|&b| b == b'0') || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    input.parse().ok()
}

fn month_matches(trip: &TripRecord, month: Choice<Month>) -> bool {
    match month {
        Choice::All => true,
        Choice::Only(m) => trip
            .parts
            .is_some_and(|p| p.month == m.number_from_month()),
    }
}

fn day_matches(trip: &TripRecord, day: Choice<Weekday>) -> bool {
    match day {
        Choice::All => true,
        Choice::Only(d) => trip
            .parts
            .is_some_and(|p| p.day_of_week == d.num_days_from_monday()),
    }
}

/// Keeps rows whose start month equals `month`.
pub fn filter_month(dataset: &Dataset, month: Choice<Month>) -> Dataset {
    dataset.with_trips(
        dataset
            .trips
            .iter()
            .filter(|t| month_matches(t, month))
            .cloned()
            .collect(),
    )
}

/// Keeps rows whose start weekday equals `day`.
pub fn filter_day(dataset: &Dataset, day: Choice<Weekday>) -> Dataset {
    dataset.with_trips(
        dataset
            .trips
            .iter()
            .filter(|t| day_matches(t, day))
            .cloned()
            .collect(),
    )
}

/// Narrows `dataset` to rows matching both the month and day of `selection`.
///
/// Rows without derived time fields only survive when both filters are `All`.
#[tracing::instrument(skip_all, fields(month = %selection.month, day = %selection.day))]
pub fn apply(dataset: &Dataset, selection: &Selection) -> Dataset {
    let filtered = dataset.with_trips(
        dataset
            .trips
            .iter()
            .filter(|t| month_matches(t, selection.month) && day_matches(t, selection.day))
            .cloned()
            .collect(),
    );

    tracing::debug!(before = dataset.len(), after = filtered.len(), "Filter applied");
    filtered
}
