//! City registry: which cities can be analyzed and where their data lives.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Cities shipped with the tool, in menu order.
const BUILTIN_CITIES: &[(&str, &str)] = &[
    ("chicago", "chicago.csv"),
    ("new york city", "new_york_city.csv"),
    ("washington", "washington.csv"),
];

/// A supported city and the CSV file holding its trips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub file: PathBuf,
}

/// Ordered mapping of city name to data file.
///
/// Can be replaced by a JSON file holding an array of entries:
/// ```json
/// [
///   { "name": "chicago", "file": "chicago.csv" },
///   { "name": "boston", "file": "/data/bluebikes.csv" }
/// ]
/// ```
/// Relative paths are resolved against the data directory.
#[derive(Debug, Clone)]
pub struct CityRegistry {
    cities: Vec<City>,
}

impl CityRegistry {
    /// Builds the default three-city registry rooted at `data_dir`.
    pub fn builtin(data_dir: &Path) -> Self {
        let cities = BUILTIN_CITIES
            .iter()
            .map(|(name, file)| City {
                name: name.to_string(),
                file: data_dir.join(file),
            })
            .collect();
        Self { cities }
    }

    /// Loads the registry from a JSON file at `path`.
    pub fn load(path: &Path, data_dir: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read city registry {}", path.display()))?;
        Self::from_json(&content, data_dir)
            .with_context(|| format!("invalid city registry {}", path.display()))
    }

    pub fn from_json(content: &str, data_dir: &Path) -> Result<Self> {
        let entries: Vec<City> = serde_json::from_str(content)?;
        if entries.is_empty() {
            bail!("city registry is empty");
        }

        let cities = entries
            .into_iter()
            .map(|city| City {
                file: data_dir.join(&city.file),
                name: city.name,
            })
            .collect();
        Ok(Self { cities })
    }

    /// Returns the city at a 0-based menu position.
    pub fn get(&self, index: usize) -> Option<&City> {
        self.cities.get(index)
    }

    /// Looks a city up by name, ignoring case.
    pub fn find(&self, name: &str) -> Option<&City> {
        let name = name.trim();
        self.cities.iter().find(|c| c.name.eq_ignore_ascii_case(name))
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &City> {
        self.cities.iter()
    }
}
