use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geo::haversine;

/// Canonical form of an airport code: trimmed and upper-cased.
///
/// Applied both when records become vertices and when route queries look
/// codes up, so the two always agree.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Size classification published for each airport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AirportCategory {
    #[default]
    #[serde(rename = "small_airport")]
    Small,
    #[serde(rename = "medium_airport")]
    Medium,
    #[serde(rename = "large_airport")]
    Large,
}

impl AirportCategory {
    /// Identifier used by the upstream dataset.
    pub fn as_str(self) -> &'static str {
        match self {
            AirportCategory::Small => "small_airport",
            AirportCategory::Medium => "medium_airport",
            AirportCategory::Large => "large_airport",
        }
    }
}

impl fmt::Display for AirportCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AirportCategory {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "small_airport" | "small" => Ok(AirportCategory::Small),
            "medium_airport" | "medium" => Ok(AirportCategory::Medium),
            "large_airport" | "large" => Ok(AirportCategory::Large),
            other => Err(format!("unrecognised airport category '{other}'")),
        }
    }
}

/// Airport vertex. Two airports are equal when their codes match.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Airport {
    pub code: String,
    pub name: String,
    pub category: AirportCategory,
    pub latitude: f64,
    pub longitude: f64,
}

impl Airport {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        category: AirportCategory,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            category,
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to `other` in nautical miles.
    pub fn distance_to(&self, other: &Airport) -> f64 {
        haversine(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}

impl PartialEq for Airport {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Airport {}

impl Hash for Airport {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

/// Coordinate value as published upstream: either a JSON number or a
/// numeric-looking string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CoordinateValue {
    Number(f64),
    Text(String),
}

impl CoordinateValue {
    fn parse(&self) -> Option<f64> {
        match self {
            CoordinateValue::Number(value) => Some(*value),
            CoordinateValue::Text(text) => text.trim().parse::<f64>().ok(),
        }
    }
}

impl fmt::Display for CoordinateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateValue::Number(value) => write!(f, "{value}"),
            CoordinateValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<f64> for CoordinateValue {
    fn from(value: f64) -> Self {
        CoordinateValue::Number(value)
    }
}

impl From<&str> for CoordinateValue {
    fn from(value: &str) -> Self {
        CoordinateValue::Text(value.to_string())
    }
}

/// Raw airport record produced by the dataset collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirportRecord {
    pub ident: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub latitude: CoordinateValue,
    pub longitude: CoordinateValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iata: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icao: Option<String>,
}

impl AirportRecord {
    /// Parse the category field without validating coordinates.
    pub fn category(&self) -> Option<AirportCategory> {
        self.kind.parse().ok()
    }

    /// Validate the record and convert it into an [`Airport`].
    pub fn to_airport(&self) -> Result<Airport> {
        let category = self
            .kind
            .parse::<AirportCategory>()
            .map_err(|_| Error::InvalidCategory {
                code: self.ident.clone(),
                value: self.kind.clone(),
            })?;
        let latitude = self.coordinate("latitude", &self.latitude, 90.0)?;
        let longitude = self.coordinate("longitude", &self.longitude, 180.0)?;

        Ok(Airport::new(
            normalize_code(&self.ident),
            self.name.clone(),
            category,
            latitude,
            longitude,
        ))
    }

    fn coordinate(&self, field: &'static str, value: &CoordinateValue, limit: f64) -> Result<f64> {
        value
            .parse()
            .filter(|parsed| parsed.is_finite() && parsed.abs() <= limit)
            .ok_or_else(|| Error::InvalidCoordinate {
                code: self.ident.clone(),
                field,
                value: value.to_string(),
            })
    }
}
