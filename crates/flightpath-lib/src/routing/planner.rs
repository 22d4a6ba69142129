//! Route planning strategies.
//!
//! Each planner wraps one search policy so `plan_route` can dispatch on the
//! requested algorithm without knowing how the search works.

use crate::graph::{AirportGraph, VertexIndex};
use crate::path::{shortest_path, SearchAlgorithm, SearchConfig, ShortestPath};

use super::RouteRequest;

/// Trait for route planning strategies.
pub trait RoutePlanner: Send + Sync {
    /// The algorithm identifier for this planner.
    fn algorithm(&self) -> SearchAlgorithm;

    /// Run the search. An unreachable goal yields [`ShortestPath::none`].
    fn find_path(&self, graph: &AirportGraph, start: VertexIndex, goal: VertexIndex) -> ShortestPath;
}

/// Pure minimum-distance planner.
#[derive(Debug, Clone, Default)]
pub struct MinPlanner;

impl RoutePlanner for MinPlanner {
    fn algorithm(&self) -> SearchAlgorithm {
        SearchAlgorithm::Min
    }

    fn find_path(&self, graph: &AirportGraph, start: VertexIndex, goal: VertexIndex) -> ShortestPath {
        shortest_path(graph, start, goal, &SearchConfig::min())
    }
}

/// Planner preferring fewer landings within a distance buffer.
#[derive(Debug, Clone)]
pub struct HopAwarePlanner {
    buffer_nm: u32,
}

impl HopAwarePlanner {
    pub fn new(buffer_nm: u32) -> Self {
        Self { buffer_nm }
    }
}

impl Default for HopAwarePlanner {
    fn default() -> Self {
        Self::new(SearchConfig::default().buffer_nm)
    }
}

impl RoutePlanner for HopAwarePlanner {
    fn algorithm(&self) -> SearchAlgorithm {
        SearchAlgorithm::HopAware
    }

    fn find_path(&self, graph: &AirportGraph, start: VertexIndex, goal: VertexIndex) -> ShortestPath {
        shortest_path(graph, start, goal, &SearchConfig::hop_aware(self.buffer_nm))
    }
}

/// Select the planner matching the request's search configuration.
pub fn select_planner(request: &RouteRequest) -> Box<dyn RoutePlanner> {
    match request.search.algorithm {
        SearchAlgorithm::Min => Box::new(MinPlanner),
        SearchAlgorithm::HopAware => Box::new(HopAwarePlanner::new(request.search.buffer_nm)),
    }
}
