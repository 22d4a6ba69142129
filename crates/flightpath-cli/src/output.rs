//! Output formatting for command results.
//!
//! Text output is assembled from the library summaries and decorated with a
//! [`ColorPalette`]; JSON output serializes the summaries unchanged.

use std::fmt::Write;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use flightpath_lib::{AirportMatch, NoPathSummary, OutcomeSummary, OutputMode, RouteSummary};

use crate::terminal::{format_with_separators, ColorPalette};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    /// Print a route outcome.
    pub fn render_outcome(
        self,
        summary: &OutcomeSummary,
        mode: OutputMode,
        palette: &ColorPalette,
    ) -> Result<()> {
        match self {
            OutputFormat::Json => print_json(summary),
            OutputFormat::Text => {
                let text = match summary {
                    OutcomeSummary::Found(route) => format_route_text(route, mode, palette),
                    OutcomeSummary::NoPath(no_path) => format_no_path_text(no_path, palette),
                };
                print!("{text}");
                Ok(())
            }
        }
    }

    /// Print airport search matches.
    pub fn render_matches(self, query: &str, matches: &[AirportMatch]) -> Result<()> {
        match self {
            OutputFormat::Json => print_json(&SearchResult {
                query,
                count: matches.len(),
                matches,
            }),
            OutputFormat::Text => {
                print!("{}", format_matches_text(query, matches));
                Ok(())
            }
        }
    }

    /// Print graph construction statistics.
    pub fn render_graph_stats(self, stats: &GraphStats) -> Result<()> {
        match self {
            OutputFormat::Json => print_json(stats),
            OutputFormat::Text => {
                print!("{}", format_graph_stats_text(stats));
                Ok(())
            }
        }
    }
}

#[derive(Serialize)]
struct SearchResult<'a> {
    query: &'a str,
    count: usize,
    matches: &'a [AirportMatch],
}

/// Size of a constructed graph.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GraphStats {
    pub range_nm: u32,
    pub airports: usize,
    pub edges: usize,
    /// Airports without any neighbour within range.
    pub isolated: usize,
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Render a found route: path line, one line per leg, then totals.
///
/// With [`ColorPalette::plain`] this matches [`RouteSummary::render`].
pub fn format_route_text(summary: &RouteSummary, mode: OutputMode, palette: &ColorPalette) -> String {
    if palette.is_plain() {
        return summary.render(mode);
    }

    let mut buffer = String::new();
    let last = summary.stops.len().saturating_sub(1);
    let labels: Vec<String> = summary
        .stops
        .iter()
        .enumerate()
        .map(|(index, stop)| {
            let label = match mode {
                OutputMode::Codes => stop.code.as_str(),
                OutputMode::Names => stop.name.as_str(),
            };
            let tag = if index == 0 {
                palette.tag_depart
            } else if index == last {
                palette.tag_arrive
            } else {
                palette.white_bold
            };
            format!("{tag}{label}{}", palette.reset)
        })
        .collect();
    let arrow = format!(" {}->{} ", palette.gray, palette.reset);
    let _ = writeln!(buffer, "{}", labels.join(&arrow));

    for (stop, label) in summary.stops.iter().zip(&labels).skip(1) {
        if let Some(leg) = stop.leg_nm {
            let _ = writeln!(
                buffer,
                "{}{:>3}:{} {} ({}{}nm{})",
                palette.gray, stop.index, palette.reset, label, palette.green, leg, palette.reset
            );
        }
    }

    let _ = writeln!(
        buffer,
        "Total distance: {}{}nm{} ({} {}, algorithm: {})",
        palette.green,
        format_with_separators(u64::from(summary.distance_nm)),
        palette.reset,
        summary.hops,
        if summary.hops == 1 { "hop" } else { "hops" },
        summary.algorithm
    );
    buffer
}

pub fn format_no_path_text(summary: &NoPathSummary, palette: &ColorPalette) -> String {
    format!("{}{}{}", palette.red, summary.render(), palette.reset)
}

pub fn format_matches_text(query: &str, matches: &[AirportMatch]) -> String {
    if matches.is_empty() {
        return format!("No airports match '{}'\n", query.trim());
    }
    let mut buffer = String::new();
    for airport in matches {
        let _ = writeln!(buffer, "{airport}");
    }
    buffer
}

pub fn format_graph_stats_text(stats: &GraphStats) -> String {
    format!(
        "Graph: {} airports, {} edges within {}nm ({} isolated)\n",
        format_with_separators(stats.airports as u64),
        format_with_separators(stats.edges as u64),
        format_with_separators(u64::from(stats.range_nm)),
        format_with_separators(stats.isolated as u64),
    )
}
