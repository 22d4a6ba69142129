//! Route command handler for computing paths between airports.

use anyhow::{Context, Result};
use clap::ValueEnum;

use flightpath_lib::{
    plan_route, Error as RouteError, OutcomeSummary, OutputMode, RouteRequest, SearchAlgorithm,
    Settings,
};

use super::{effective_range, CommandContext};

/// Search algorithm names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlgorithmArg {
    /// Shortest total distance.
    Min,
    /// Shortest distance, preferring fewer hops within the buffer.
    HopAware,
}

impl From<AlgorithmArg> for SearchAlgorithm {
    fn from(value: AlgorithmArg) -> Self {
        match value {
            AlgorithmArg::Min => SearchAlgorithm::Min,
            AlgorithmArg::HopAware => SearchAlgorithm::HopAware,
        }
    }
}

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Departure airport code.
    pub from: String,
    /// Arrival airport code.
    pub to: String,
    /// Aircraft range override (nautical miles).
    pub range: Option<u32>,
    pub algorithm: Option<AlgorithmArg>,
    /// Hop-aware buffer override (nautical miles).
    pub buffer: Option<u32>,
    /// Print airport names instead of codes.
    pub names: bool,
    /// Build the graph on a single thread.
    pub sequential: bool,
}

impl RouteCommandArgs {
    /// Merge CLI overrides onto the saved settings.
    pub fn to_request(&self, settings: &Settings) -> RouteRequest {
        let mut search = settings.search_config();
        if let Some(algorithm) = self.algorithm {
            search.algorithm = algorithm.into();
        }
        if let Some(buffer) = self.buffer {
            search.buffer_nm = buffer;
        }
        RouteRequest {
            start: self.from.clone(),
            goal: self.to.clone(),
            search,
        }
    }

    pub fn output_mode(&self, settings: &Settings) -> OutputMode {
        if self.names {
            OutputMode::Names
        } else {
            settings.output_mode
        }
    }
}

/// Handle the route subcommand.
///
/// An unreachable destination is a normal result and exits successfully;
/// unknown airport codes are errors.
pub fn handle_route_command(ctx: &CommandContext, args: &RouteCommandArgs) -> Result<()> {
    let settings = ctx.load_settings()?;
    let range_nm = effective_range(args.range, &settings)?;

    let mut options = settings.build_options();
    options.threshold_nm = range_nm;
    if args.sequential {
        options = options.sequential();
    }
    let graph = ctx.load_graph(&options)?;

    let request = args.to_request(&settings);
    let outcome = match plan_route(&graph, &request) {
        Ok(outcome) => outcome,
        Err(err) => return Err(handle_route_failure(err)),
    };

    let summary = OutcomeSummary::from_outcome(&graph, &outcome, range_nm);
    ctx.format
        .render_outcome(&summary, args.output_mode(&settings), &ctx.palette)
        .context("failed to write route output")
}

fn handle_route_failure(err: RouteError) -> anyhow::Error {
    match err {
        RouteError::UnknownAirport {
            endpoint,
            code,
            suggestions,
        } => anyhow::anyhow!(format_unknown_airport_message(
            &endpoint.to_string(),
            &code,
            &suggestions
        )),
        other => anyhow::Error::new(other),
    }
}

fn format_unknown_airport_message(endpoint: &str, code: &str, suggestions: &[String]) -> String {
    let mut message = format!("Unknown {endpoint} airport '{code}'.");
    match suggestions {
        [] => {}
        [only] => message.push_str(&format!(" Did you mean '{only}'?")),
        many => {
            let joined = many
                .iter()
                .map(|s| format!("'{s}'"))
                .collect::<Vec<_>>()
                .join(", ");
            message.push_str(&format!(" Did you mean one of: {joined}?"));
        }
    }
    message
}
