use std::fmt::{self, Write};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::graph::AirportGraph;
use crate::path::SearchAlgorithm;
use crate::routing::{RouteOutcome, RoutePlan};

/// How airports in a path are labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// Airport codes (`CYOW -> KJFK`).
    #[default]
    Codes,
    /// Airport display names.
    Names,
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            OutputMode::Codes => "codes",
            OutputMode::Names => "names",
        };
        f.write_str(value)
    }
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "codes" | "code" => Ok(OutputMode::Codes),
            "names" | "name" => Ok(OutputMode::Names),
            other => Err(format!("unknown output mode '{other}'")),
        }
    }
}

/// Airport visited along a route.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteStop {
    pub index: usize,
    pub code: String,
    pub name: String,
    /// Length of the leg that arrives here; `None` for the departure airport.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leg_nm: Option<u32>,
}

impl RouteStop {
    fn label(&self, mode: OutputMode) -> &str {
        match mode {
            OutputMode::Codes => &self.code,
            OutputMode::Names => &self.name,
        }
    }
}

/// Structured representation of a found route for rendering or serialising.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteSummary {
    pub algorithm: SearchAlgorithm,
    pub range_nm: u32,
    pub hops: usize,
    pub distance_nm: u32,
    pub stops: Vec<RouteStop>,
}

impl RouteSummary {
    /// Resolve the codes and names of every stop in `plan`.
    pub fn from_plan(graph: &AirportGraph, plan: &RoutePlan, range_nm: u32) -> Self {
        let stops = plan
            .steps
            .iter()
            .enumerate()
            .map(|(index, &vertex)| {
                let airport = graph.airport(vertex);
                let leg_nm = index
                    .checked_sub(1)
                    .and_then(|previous| graph.direct_edge(plan.steps[previous], vertex))
                    .map(|edge| edge.weight);
                RouteStop {
                    index,
                    code: airport.map(|a| a.code.clone()).unwrap_or_default(),
                    name: airport
                        .map(|a| a.name.clone())
                        .unwrap_or_else(|| "<unknown>".to_string()),
                    leg_nm,
                }
            })
            .collect();

        Self {
            algorithm: plan.algorithm,
            range_nm,
            hops: plan.hop_count(),
            distance_nm: plan.distance_nm,
            stops,
        }
    }

    /// Stops joined by arrows, labelled per `mode`.
    pub fn path_line(&self, mode: OutputMode) -> String {
        self.stops
            .iter()
            .map(|stop| stop.label(mode))
            .collect::<Vec<_>>()
            .join(" -> ")
    }

    /// Plain-text rendering: path line, per-leg breakdown, totals.
    pub fn render(&self, mode: OutputMode) -> String {
        let mut buffer = String::new();
        let _ = writeln!(buffer, "{}", self.path_line(mode));
        for stop in self.stops.iter().skip(1) {
            if let Some(leg) = stop.leg_nm {
                let _ = writeln!(buffer, "{:>3}: {} ({}nm)", stop.index, stop.label(mode), leg);
            }
        }
        let _ = writeln!(
            buffer,
            "Total distance: {}nm ({} {}, algorithm: {})",
            self.distance_nm,
            self.hops,
            if self.hops == 1 { "hop" } else { "hops" },
            self.algorithm
        );
        buffer
    }
}

/// Negative result for a valid pair of airports.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NoPathSummary {
    pub start: String,
    pub goal: String,
    pub range_nm: u32,
}

impl NoPathSummary {
    pub fn render(&self) -> String {
        format!(
            "No path found between {} and {} within a range of {}nm\n",
            self.start, self.goal, self.range_nm
        )
    }
}

/// Serializable view of a [`RouteOutcome`].
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeSummary {
    Found(RouteSummary),
    NoPath(NoPathSummary),
}

impl OutcomeSummary {
    pub fn from_outcome(graph: &AirportGraph, outcome: &RouteOutcome, range_nm: u32) -> Self {
        match outcome {
            RouteOutcome::Found(plan) => {
                OutcomeSummary::Found(RouteSummary::from_plan(graph, plan, range_nm))
            }
            RouteOutcome::NoPath { start, goal } => OutcomeSummary::NoPath(NoPathSummary {
                start: code_of(graph, *start),
                goal: code_of(graph, *goal),
                range_nm,
            }),
        }
    }

    pub fn render(&self, mode: OutputMode) -> String {
        match self {
            OutcomeSummary::Found(summary) => summary.render(mode),
            OutcomeSummary::NoPath(summary) => summary.render(),
        }
    }
}

fn code_of(graph: &AirportGraph, vertex: usize) -> String {
    graph
        .airport(vertex)
        .map(|airport| airport.code.clone())
        .unwrap_or_default()
}
