//! Route planning between two airport codes.
//!
//! This module provides:
//! - [`RouteRequest`] - start and destination codes plus the search policy
//! - [`RoutePlan`] - a found route, ordered from start to destination
//! - [`RouteOutcome`] - found route or an explicit "no path" result
//! - [`plan_route`] - main entry point
//!
//! Unknown codes are errors that name the offending endpoint. An unreachable
//! destination is not an error: it is reported as [`RouteOutcome::NoPath`].
//!
//! # Example
//!
//! ```ignore
//! use flightpath_lib::{build_airport_graph, plan_route, GraphBuildOptions, RouteRequest};
//!
//! let graph = build_airport_graph(&records, &GraphBuildOptions::new(250))?;
//! let outcome = plan_route(&graph, &RouteRequest::new("CYOW", "KJFK"))?;
//! if let Some(plan) = outcome.plan() {
//!     println!("{} nm in {} hops", plan.distance_nm, plan.hop_count());
//! }
//! ```

mod planner;

pub use crate::airport::normalize_code;
pub use planner::{select_planner, HopAwarePlanner, MinPlanner, RoutePlanner};

use serde::Serialize;
use tracing::debug;

use crate::error::{Endpoint, Error, Result};
use crate::graph::{AirportGraph, VertexIndex};
use crate::path::{SearchAlgorithm, SearchConfig};

/// Number of alternative codes offered when an airport is unknown.
const MAX_SUGGESTIONS: usize = 3;

/// High-level route planning request.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub start: String,
    pub goal: String,
    pub search: SearchConfig,
}

impl RouteRequest {
    /// Hop-aware request with the default buffer.
    pub fn new(start: impl Into<String>, goal: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            goal: goal.into(),
            search: SearchConfig::default(),
        }
    }

    pub fn with_algorithm(mut self, algorithm: SearchAlgorithm) -> Self {
        self.search.algorithm = algorithm;
        self
    }

    pub fn with_buffer(mut self, buffer_nm: u32) -> Self {
        self.search.buffer_nm = buffer_nm;
        self
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutePlan {
    pub algorithm: SearchAlgorithm,
    pub start: VertexIndex,
    pub goal: VertexIndex,
    /// Vertices from start to destination, inclusive.
    pub steps: Vec<VertexIndex>,
    /// Total distance in whole nautical miles.
    pub distance_nm: u32,
}

impl RoutePlan {
    /// Number of legs flown.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// Result of a route query against a valid pair of airports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    Found(RoutePlan),
    /// The destination cannot be reached within the graph's range.
    NoPath {
        start: VertexIndex,
        goal: VertexIndex,
    },
}

impl RouteOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, RouteOutcome::Found(_))
    }

    pub fn plan(&self) -> Option<&RoutePlan> {
        match self {
            RouteOutcome::Found(plan) => Some(plan),
            RouteOutcome::NoPath { .. } => None,
        }
    }
}

fn resolve_airport(graph: &AirportGraph, code: &str, endpoint: Endpoint) -> Result<VertexIndex> {
    let normalized = normalize_code(code);
    graph
        .index_of(&normalized)
        .ok_or_else(|| Error::UnknownAirport {
            endpoint,
            suggestions: graph.fuzzy_code_matches(&normalized, MAX_SUGGESTIONS),
            code: normalized,
        })
}

/// Compute a route between the request's airports.
pub fn plan_route(graph: &AirportGraph, request: &RouteRequest) -> Result<RouteOutcome> {
    let start = resolve_airport(graph, &request.start, Endpoint::Start)?;
    let goal = resolve_airport(graph, &request.goal, Endpoint::Destination)?;

    let planner = select_planner(request);
    let path = planner.find_path(graph, start, goal);

    if !path.is_found() {
        debug!(start, goal, algorithm = %planner.algorithm(), "no path within range");
        return Ok(RouteOutcome::NoPath { start, goal });
    }

    debug!(
        start,
        goal,
        hops = path.hop_count(),
        distance_nm = path.distance_nm(),
        algorithm = %planner.algorithm(),
        "route planned"
    );
    Ok(RouteOutcome::Found(RoutePlan {
        algorithm: planner.algorithm(),
        start,
        goal,
        steps: path.vertices(),
        distance_nm: path.distance_nm(),
    }))
}
