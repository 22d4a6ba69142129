//! Locating and reading airport datasets.
//!
//! Two formats are understood:
//!
//! - JSON: an array of [`AirportRecord`] objects
//!   (`ident`, `name`, `type`, `latitude`, `longitude`, ...).
//! - CSV: the OurAirports export (`ident`, `type`, `name`, `latitude_deg`,
//!   `longitude_deg`, `continent`, `iata_code`, `gps_code`, ...).

use std::env;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use directories::ProjectDirs;
use serde::Deserialize;
use tracing::{info, warn};

use crate::airport::{AirportCategory, AirportRecord, CoordinateValue};
use crate::error::{Error, Result};

/// Environment variable pointing at a dataset file.
pub const DATASET_ENV: &str = "FLIGHTPATH_DATASET";

/// Default filename for the cached dataset.
const DATASET_FILENAME: &str = "airports.json";

/// Categories kept by the default filter.
pub const DEFAULT_CATEGORIES: [AirportCategory; 2] =
    [AirportCategory::Medium, AirportCategory::Large];

/// Resolve the default dataset location using platform-specific project directories.
pub fn default_dataset_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("com", "flightpath", "flightpath").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().join(DATASET_FILENAME))
}

/// Resolve the dataset to load: explicit path, then `FLIGHTPATH_DATASET`,
/// then the default location. The file must exist.
pub fn resolve_dataset_path(override_path: Option<&Path>) -> Result<PathBuf> {
    let path = match override_path {
        Some(path) => path.to_path_buf(),
        None => match env::var_os(DATASET_ENV) {
            Some(value) => PathBuf::from(value),
            None => default_dataset_path()?,
        },
    };

    if !path.is_file() {
        return Err(Error::DatasetNotFound { path });
    }
    Ok(path)
}

/// Read all records from a `.json` or `.csv` dataset.
pub fn load_records(path: &Path) -> Result<Vec<AirportRecord>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let file = File::open(path).map_err(|err| match err.kind() {
        std::io::ErrorKind::NotFound => Error::DatasetNotFound {
            path: path.to_path_buf(),
        },
        _ => Error::Io(err),
    })?;

    let records = match extension.as_deref() {
        Some("json") => records_from_json(BufReader::new(file))?,
        Some("csv") => records_from_csv(file)?,
        _ => {
            return Err(Error::DatasetFormat {
                path: path.to_path_buf(),
                message: "expected a .json or .csv file".to_string(),
            })
        }
    };

    info!(path = %path.display(), records = records.len(), "loaded airport dataset");
    Ok(records)
}

/// Parse a JSON array of airport records.
pub fn records_from_json<R: Read>(reader: R) -> Result<Vec<AirportRecord>> {
    Ok(serde_json::from_reader(reader)?)
}

#[derive(Debug, Deserialize)]
struct OurAirportsRow {
    ident: String,
    #[serde(rename = "type")]
    kind: String,
    name: String,
    latitude_deg: String,
    longitude_deg: String,
    #[serde(default)]
    continent: Option<String>,
    #[serde(default)]
    iata_code: Option<String>,
    #[serde(default)]
    gps_code: Option<String>,
}

impl From<OurAirportsRow> for AirportRecord {
    fn from(row: OurAirportsRow) -> Self {
        AirportRecord {
            ident: row.ident,
            name: row.name,
            kind: row.kind,
            latitude: CoordinateValue::Text(row.latitude_deg),
            longitude: CoordinateValue::Text(row.longitude_deg),
            continent: non_empty(row.continent),
            iata: non_empty(row.iata_code),
            icao: non_empty(row.gps_code),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

/// Parse an OurAirports-style CSV export. Extra columns are ignored.
pub fn records_from_csv<R: Read>(reader: R) -> Result<Vec<AirportRecord>> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::Fields).from_reader(reader);
    let mut records = Vec::new();
    for row in csv_reader.deserialize::<OurAirportsRow>() {
        records.push(row?.into());
    }
    Ok(records)
}

/// Selection applied to raw records before graph construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFilter {
    pub categories: Vec<AirportCategory>,
    /// Two-letter continent code (`NA`, `EU`, ...); `None` keeps all.
    pub continent: Option<String>,
}

impl Default for RecordFilter {
    fn default() -> Self {
        Self {
            categories: DEFAULT_CATEGORIES.to_vec(),
            continent: None,
        }
    }
}

impl RecordFilter {
    /// Keep every small, medium and large airport.
    pub fn all_categories() -> Self {
        Self {
            categories: vec![
                AirportCategory::Small,
                AirportCategory::Medium,
                AirportCategory::Large,
            ],
            continent: None,
        }
    }

    pub fn with_continent(mut self, continent: impl Into<String>) -> Self {
        self.continent = Some(continent.into());
        self
    }

    pub fn matches(&self, record: &AirportRecord) -> bool {
        let category_ok = record
            .category()
            .is_some_and(|category| self.categories.contains(&category));
        let continent_ok = match (&self.continent, &record.continent) {
            (None, _) => true,
            (Some(wanted), Some(actual)) => wanted.eq_ignore_ascii_case(actual),
            (Some(_), None) => false,
        };
        category_ok && continent_ok
    }
}

/// Drop records the filter rejects.
pub fn filter_records(records: Vec<AirportRecord>, filter: &RecordFilter) -> Vec<AirportRecord> {
    let before = records.len();
    let kept: Vec<_> = records
        .into_iter()
        .filter(|record| filter.matches(record))
        .collect();
    if kept.is_empty() && before > 0 {
        warn!(before, "record filter removed every airport");
    }
    kept
}
