use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Convenient result alias for the flight path library.
pub type Result<T> = std::result::Result<T, Error>;

/// Which end of a route query an airport code was supplied for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    Start,
    Destination,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Endpoint::Start => "start",
            Endpoint::Destination => "destination",
        };
        f.write_str(value)
    }
}

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A latitude or longitude was unparsable, non-finite, or out of range.
    #[error("invalid {field} '{value}' for airport {code}")]
    InvalidCoordinate {
        code: String,
        field: &'static str,
        value: String,
    },

    /// An airport record carried a type outside small/medium/large.
    #[error("invalid airport category '{value}' for airport {code}")]
    InvalidCategory { code: String, value: String },

    /// Raised when a vertex with the same code already exists in the graph.
    #[error("airport {code} is already present in the graph")]
    DuplicateAirport { code: String },

    /// A graph operation referenced a code that is not a vertex.
    #[error("airport {code} is not a vertex of the graph")]
    UnknownVertex { code: String },

    /// Raised when a route query names an airport that is not in the graph.
    #[error("unknown {endpoint} airport: {code}{}", format_suggestions(.suggestions))]
    UnknownAirport {
        endpoint: Endpoint,
        code: String,
        suggestions: Vec<String>,
    },

    /// Dataset could not be located at the resolved path.
    #[error("dataset not found at {path}")]
    DatasetNotFound { path: PathBuf },

    /// The dataset file could not be interpreted.
    #[error("unsupported dataset {path}: {message}")]
    DatasetFormat { path: PathBuf, message: String },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for settings and dataset cache")]
    ProjectDirsUnavailable,

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON parsing and serialization errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Wrapper for CSV parsing errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
