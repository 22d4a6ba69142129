//! Graph command handler: build the range-limited graph and report on it.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use flightpath_lib::AirportGraph;

use super::{effective_range, CommandContext};
use crate::output::GraphStats;

/// Arguments for the graph command.
#[derive(Debug, Clone, Default)]
pub struct GraphCommandArgs {
    pub range: Option<u32>,
    /// Write a Graphviz DOT file here.
    pub dot: Option<PathBuf>,
    /// Print every adjacency list to stdout.
    pub print: bool,
    pub sequential: bool,
}

pub fn handle_graph_command(ctx: &CommandContext, args: &GraphCommandArgs) -> Result<()> {
    let settings = ctx.load_settings()?;
    let range_nm = effective_range(args.range, &settings)?;

    let mut options = settings.build_options();
    options.threshold_nm = range_nm;
    if args.sequential {
        options = options.sequential();
    }
    let graph = ctx.load_graph(&options)?;

    if let Some(path) = &args.dot {
        fs::write(path, graph.to_dot())
            .with_context(|| format!("failed to write DOT file {}", path.display()))?;
        info!(path = %path.display(), "wrote DOT export");
    }

    if args.print {
        print!("{}", graph.adjacency_listing());
    }

    ctx.format.render_graph_stats(&graph_stats(&graph, range_nm))
}

pub fn graph_stats(graph: &AirportGraph, range_nm: u32) -> GraphStats {
    let isolated = (0..graph.vertex_count())
        .filter(|&index| graph.neighbours(index).is_empty())
        .count();
    GraphStats {
        range_nm,
        airports: graph.vertex_count(),
        edges: graph.edge_count(),
        isolated,
    }
}
