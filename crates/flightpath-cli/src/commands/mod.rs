//! Handlers for the CLI subcommands.
//!
//! Each module owns one subcommand. `main.rs` parses arguments into a
//! [`CommandContext`] plus the subcommand's own args and dispatches here.

pub mod config;
pub mod graph;
pub mod route;
pub mod search;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing::debug;

use flightpath_lib::{
    build_airport_graph, filter_records, load_records, resolve_dataset_path, settings_path,
    AirportGraph, AirportRecord, GraphBuildOptions, RecordFilter, Settings,
};

use crate::output::OutputFormat;
use crate::terminal::ColorPalette;

/// Options shared by every subcommand.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub dataset: Option<PathBuf>,
    pub config_dir: Option<PathBuf>,
    pub format: OutputFormat,
    pub filter: RecordFilter,
    pub palette: ColorPalette,
}

impl CommandContext {
    pub fn settings_path(&self) -> Result<PathBuf> {
        settings_path(self.config_dir.as_deref()).context("failed to locate the settings file")
    }

    pub fn load_settings(&self) -> Result<Settings> {
        let path = self.settings_path()?;
        Settings::load(&path)
            .with_context(|| format!("failed to read settings from {}", path.display()))
    }

    /// Read and filter the dataset.
    pub fn load_records(&self) -> Result<Vec<AirportRecord>> {
        let path = resolve_dataset_path(self.dataset.as_deref())
            .context("failed to locate the airport dataset (use --dataset or FLIGHTPATH_DATASET)")?;
        let records = load_records(&path)
            .with_context(|| format!("failed to load dataset from {}", path.display()))?;
        Ok(filter_records(records, &self.filter))
    }

    /// Load the dataset and connect every pair within `options.threshold_nm`.
    pub fn load_graph(&self, options: &GraphBuildOptions) -> Result<AirportGraph> {
        let records = self.load_records()?;
        debug!(records = records.len(), threshold_nm = options.threshold_nm, "building graph");
        build_airport_graph(&records, options).context("failed to build the airport graph")
    }
}

/// Explicit `--range` wins over the saved setting; neither being set is an error.
pub fn effective_range(flag: Option<u32>, settings: &Settings) -> Result<u32> {
    match flag {
        Some(0) => bail!("--range must be greater than zero"),
        Some(range) => Ok(range),
        None if settings.is_range_configured() => Ok(settings.range_nm),
        None => bail!(
            "aircraft range is not configured; pass --range <NM> or run `flightpath config set-range <NM>`"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_overrides_saved_range() {
        let settings = Settings {
            range_nm: 300,
            ..Settings::default()
        };
        assert_eq!(effective_range(Some(120), &settings).unwrap(), 120);
        assert_eq!(effective_range(None, &settings).unwrap(), 300);
    }

    #[test]
    fn missing_range_is_an_error() {
        let err = effective_range(None, &Settings::default()).unwrap_err();
        assert!(err.to_string().contains("set-range"));
        assert!(effective_range(Some(0), &Settings::default()).is_err());
    }
}
