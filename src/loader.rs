//! Reads a city's CSV file into an in-memory [`Dataset`].

use anyhow::{Context, Result, bail};
use std::fs::File;
use std::io::Read;
use tracing::{debug, info, warn};

use crate::config::City;
use crate::trip::{RawTrip, TripRecord};

const REQUIRED_COLUMNS: &[&str] = &[
    "Start Time",
    "End Time",
    "Trip Duration",
    "Start Station",
    "End Station",
    "User Type",
];

/// Trip rows for one city plus which optional columns the file carried.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub trips: Vec<TripRecord>,
    pub has_gender: bool,
    pub has_birth_year: bool,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    /// Returns a dataset with the same column layout but only the given rows.
    pub fn with_trips(&self, trips: Vec<TripRecord>) -> Self {
        Dataset {
            trips,
            has_gender: self.has_gender,
            has_birth_year: self.has_birth_year,
        }
    }
}

/// Loads the full, unfiltered dataset for `city`.
///
/// # Errors
///
/// Fails when the file cannot be opened, lacks a required column, or cannot
/// be read as CSV. Short rows, unparseable start times and non-numeric cells
/// are not errors.
#[tracing::instrument(skip(city), fields(city = %city.name, file = %city.file.display()))]
pub fn load_city(city: &City) -> Result<Dataset> {
    let file = File::open(&city.file)
        .with_context(|| format!("cannot open {}", city.file.display()))?;
    let dataset = read_dataset(file)
        .with_context(|| format!("cannot read data for {}", city.name))?;

    info!(rows = dataset.len(), "City data loaded");
    Ok(dataset)
}

/// Decodes trip rows from any CSV byte source.
///
/// Rows shorter than the header are padded with empty cells, so their
/// missing trailing values read as `None`.
pub fn read_dataset<R: Read>(reader: R) -> Result<Dataset> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let has_column = |name: &str| headers.iter().any(|h| h == name);

    for &column in REQUIRED_COLUMNS {
        if !has_column(column) {
            bail!("missing required column '{column}'");
        }
    }

    let has_gender = has_column("Gender");
    let has_birth_year = has_column("Birth Year");
    debug!(has_gender, has_birth_year, "Optional columns detected");

    let mut trips = Vec::new();
    let mut bad_timestamps = 0usize;
    let mut short_rows = 0usize;

    for (idx, result) in rdr.records().enumerate() {
        let mut record = result.with_context(|| format!("unreadable row {}", idx + 1))?;
        if record.len() < headers.len() {
            short_rows += 1;
            while record.len() < headers.len() {
                record.push_field("");
            }
        }

        let raw: RawTrip = record
            .deserialize(Some(&headers))
            .with_context(|| format!("malformed row {}", idx + 1))?;
        let trip = TripRecord::from_raw(raw);
        if trip.parts.is_none() {
            bad_timestamps += 1;
        }
        trips.push(trip);
    }

    if short_rows > 0 {
        warn!(short_rows, "Rows with missing trailing cells padded with empty values");
    }
    if bad_timestamps > 0 {
        warn!(bad_timestamps, "Rows with unparseable start time kept without time fields");
    }

    Ok(Dataset {
        trips,
        has_gender,
        has_birth_year,
    })
}
