//! Search command handler: find airports by name or code.

use anyhow::{Context, Result};

use flightpath_lib::{AirportGraph, AirportRecord};

use super::CommandContext;

/// Handle the search subcommand.
pub fn handle_search_command(ctx: &CommandContext, query: &str) -> Result<()> {
    let records = ctx.load_records()?;
    let graph = vertices_only(&records)?;
    let matches = graph.search_names(query);
    ctx.format.render_matches(query, &matches)
}

/// Airports without edges; lookups never need the range.
fn vertices_only(records: &[AirportRecord]) -> Result<AirportGraph> {
    let mut graph = AirportGraph::with_capacity(records.len());
    for record in records {
        let airport = record
            .to_airport()
            .with_context(|| format!("invalid dataset record {}", record.ident))?;
        graph.add_vertex(airport)?;
    }
    Ok(graph)
}
