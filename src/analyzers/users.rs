use crate::analyzers::types::{BirthYearStats, CategoryCount, UserStats};
use crate::analyzers::utility::{mode, value_counts};
use crate::loader::Dataset;

fn frequency_table<'a>(values: impl Iterator<Item = &'a str>) -> Vec<CategoryCount> {
    value_counts(values)
        .into_iter()
        .map(|(value, count)| CategoryCount {
            value: value.to_string(),
            count,
        })
        .collect()
}

fn birth_year_stats(years: &[i32]) -> Option<BirthYearStats> {
    Some(BirthYearStats {
        earliest: *years.iter().min()?,
        most_recent: *years.iter().max()?,
        most_common: mode(years.iter().copied())?.0,
    })
}

/// Rider breakdown by user type and, where the city records them, gender
/// and birth year. `None` for an empty dataset.
pub fn user_stats(dataset: &Dataset) -> Option<UserStats> {
    if dataset.is_empty() {
        return None;
    }
    let trips = &dataset.trips;

    let user_types = frequency_table(trips.iter().filter_map(|t| t.user_type.as_deref()));

    let genders = dataset
        .has_gender
        .then(|| frequency_table(trips.iter().filter_map(|t| t.gender.as_deref())));

    let birth_years = if dataset.has_birth_year {
        let years: Vec<i32> = trips.iter().filter_map(|t| t.birth_year).collect();
        birth_year_stats(&years)
    } else {
        None
    };

    Some(UserStats {
        user_types,
        genders,
        birth_years,
    })
}
