//! Config command handler: inspect and update persisted settings.

use anyhow::{bail, Context, Result};

use flightpath_lib::{OutputMode, SearchAlgorithm};

use super::CommandContext;
use crate::output::OutputFormat;

/// Settings operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    Show,
    SetRange(u32),
    SetMode(OutputMode),
    SetBuffer(u32),
    SetAlgorithm(SearchAlgorithm),
    SetParallel(bool),
}

pub fn handle_config_command(ctx: &CommandContext, action: &ConfigAction) -> Result<()> {
    let path = ctx.settings_path()?;
    let mut settings = ctx.load_settings()?;

    match action {
        ConfigAction::Show => {
            match ctx.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&settings)?),
                OutputFormat::Text => {
                    let range = if settings.is_range_configured() {
                        format!("{}nm", settings.range_nm)
                    } else {
                        "not set".to_string()
                    };
                    println!("Settings file: {}", path.display());
                    println!("Range: {range}");
                    println!("Output mode: {}", settings.output_mode);
                    println!("Algorithm: {}", settings.algorithm);
                    println!("Buffer: {}nm", settings.buffer_nm);
                    println!("Parallel build: {}", settings.parallel);
                }
            }
            return Ok(());
        }
        ConfigAction::SetRange(0) => bail!("range must be greater than zero"),
        ConfigAction::SetRange(range) => settings.range_nm = *range,
        ConfigAction::SetMode(mode) => settings.output_mode = *mode,
        ConfigAction::SetBuffer(buffer) => settings.buffer_nm = *buffer,
        ConfigAction::SetAlgorithm(algorithm) => settings.algorithm = *algorithm,
        ConfigAction::SetParallel(parallel) => settings.parallel = *parallel,
    }

    settings
        .save(&path)
        .with_context(|| format!("failed to write settings to {}", path.display()))?;
    println!("Saved settings to {}", path.display());
    Ok(())
}
