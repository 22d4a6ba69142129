//! Shortest-path search over an [`AirportGraph`].
//!
//! Two policies are available. [`SearchAlgorithm::Min`] is plain Dijkstra on
//! edge weight. [`SearchAlgorithm::HopAware`] trades global optimality for
//! fewer landings: a relaxation may accept a longer path when it stays within
//! the configured buffer and saves a hop, and the search stops as soon as a
//! finalized airport has a direct edge to the destination.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::graph::{AirportGraph, VertexIndex};

/// Tolerance in nautical miles within which fewer hops win over distance.
pub const DEFAULT_BUFFER_NM: u32 = 50;

const UNREACHED: u32 = u32::MAX;

/// Shortest-path policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchAlgorithm {
    /// Minimum total distance.
    Min,
    /// Distance with a hop-count preference and direct-edge early exit.
    #[default]
    HopAware,
}

impl fmt::Display for SearchAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            SearchAlgorithm::Min => "min",
            SearchAlgorithm::HopAware => "hop-aware",
        };
        f.write_str(value)
    }
}

/// Parameters for a single search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub algorithm: SearchAlgorithm,
    pub buffer_nm: u32,
}

impl SearchConfig {
    pub fn min() -> Self {
        Self {
            algorithm: SearchAlgorithm::Min,
            ..Self::default()
        }
    }

    pub fn hop_aware(buffer_nm: u32) -> Self {
        Self {
            algorithm: SearchAlgorithm::HopAware,
            buffer_nm,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            algorithm: SearchAlgorithm::HopAware,
            buffer_nm: DEFAULT_BUFFER_NM,
        }
    }
}

/// Result of a search: vertices from the destination back to the source, or
/// the empty "no path" sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShortestPath {
    reversed: Vec<VertexIndex>,
    distance_nm: u32,
}

impl ShortestPath {
    /// The sentinel returned when the destination is unreachable.
    pub fn none() -> Self {
        Self::default()
    }

    fn zero_length(vertex: VertexIndex) -> Self {
        Self {
            reversed: vec![vertex],
            distance_nm: 0,
        }
    }

    pub fn is_found(&self) -> bool {
        !self.reversed.is_empty()
    }

    /// Vertices from destination to source.
    pub fn reversed(&self) -> &[VertexIndex] {
        &self.reversed
    }

    /// Vertices from source to destination.
    pub fn vertices(&self) -> Vec<VertexIndex> {
        self.reversed.iter().rev().copied().collect()
    }

    pub fn distance_nm(&self) -> u32 {
        self.distance_nm
    }

    pub fn hop_count(&self) -> usize {
        self.reversed.len().saturating_sub(1)
    }
}

/// Find a path from `start` to `goal` using the configured policy.
///
/// `start == goal` yields a zero-length path of distance 0. Indices outside
/// the graph yield [`ShortestPath::none`].
pub fn shortest_path(
    graph: &AirportGraph,
    start: VertexIndex,
    goal: VertexIndex,
    config: &SearchConfig,
) -> ShortestPath {
    let count = graph.vertex_count();
    if start >= count || goal >= count {
        return ShortestPath::none();
    }
    if start == goal {
        return ShortestPath::zero_length(start);
    }

    match config.algorithm {
        SearchAlgorithm::Min => min_distance(graph, start, goal),
        SearchAlgorithm::HopAware => hop_aware(graph, start, goal, config.buffer_nm),
    }
}

fn min_distance(graph: &AirportGraph, start: VertexIndex, goal: VertexIndex) -> ShortestPath {
    if let Some(edge) = graph.direct_edge(start, goal) {
        return ShortestPath {
            reversed: vec![goal, start],
            distance_nm: edge.weight,
        };
    }

    let count = graph.vertex_count();
    let mut distances = vec![UNREACHED; count];
    let mut parents: Vec<Option<VertexIndex>> = vec![None; count];
    let mut visited = vec![false; count];
    let mut queue = BinaryHeap::new();

    distances[start] = 0;
    queue.push(Reverse((0u32, start)));

    while let Some(Reverse((_, current))) = queue.pop() {
        if visited[current] {
            continue;
        }
        visited[current] = true;

        for edge in graph.neighbours(current) {
            let next = edge.target;
            let candidate = distances[current].saturating_add(edge.weight);
            if distances[next] > candidate {
                distances[next] = candidate;
                parents[next] = Some(current);
                queue.push(Reverse((candidate, next)));
            }
        }
    }

    if distances[goal] == UNREACHED {
        return ShortestPath::none();
    }
    ShortestPath {
        reversed: walk_parents(&parents, start, goal),
        distance_nm: distances[goal],
    }
}

fn hop_aware(
    graph: &AirportGraph,
    start: VertexIndex,
    goal: VertexIndex,
    buffer_nm: u32,
) -> ShortestPath {
    let count = graph.vertex_count();
    let mut distances = vec![UNREACHED; count];
    let mut hops = vec![usize::MAX; count];
    let mut parents: Vec<Option<VertexIndex>> = vec![None; count];
    let mut visited = vec![false; count];
    let mut queue = BinaryHeap::new();

    distances[start] = 0;
    hops[start] = 0;
    queue.push(Reverse((0u32, 0usize, start)));

    while let Some(Reverse((_, _, current))) = queue.pop() {
        if visited[current] {
            continue;
        }
        visited[current] = true;

        if current == goal {
            break;
        }

        // Landing straight at the destination from any finalized airport ends
        // the search, even if a shorter multi-hop route might exist.
        if let Some(edge) = graph.direct_edge(current, goal) {
            distances[goal] = distances[current].saturating_add(edge.weight);
            hops[goal] = hops[current] + 1;
            parents[goal] = Some(current);
            break;
        }

        let next_hops = hops[current] + 1;
        for edge in graph.neighbours(current) {
            let next = edge.target;
            // Finalized airports keep their distance and parent, so parent
            // links only point at airports finalized earlier.
            if visited[next] {
                continue;
            }
            let candidate = distances[current].saturating_add(edge.weight);
            let shorter = distances[next] > candidate;
            let fewer_hops_within_buffer = candidate <= distances[next].saturating_add(buffer_nm)
                && hops[next] > next_hops;

            if shorter || fewer_hops_within_buffer {
                distances[next] = candidate;
                hops[next] = next_hops;
                parents[next] = Some(current);
                queue.push(Reverse((candidate, next_hops, next)));
            }
        }
    }

    if distances[goal] == UNREACHED {
        return ShortestPath::none();
    }
    ShortestPath {
        reversed: walk_parents(&parents, start, goal),
        distance_nm: distances[goal],
    }
}

fn walk_parents(
    parents: &[Option<VertexIndex>],
    start: VertexIndex,
    goal: VertexIndex,
) -> Vec<VertexIndex> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(node) = current {
        path.push(node);
        if node == start {
            break;
        }
        current = parents[node];
    }
    path
}
