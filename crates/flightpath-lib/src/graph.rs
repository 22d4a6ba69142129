//! Range-limited airport graph.
//!
//! Vertices are airports addressed by their position in insertion order.
//! Edges are undirected: every connection is stored once in each endpoint's
//! adjacency list, weighted by the great-circle distance truncated to whole
//! nautical miles. Bulk construction enumerates every unordered pair and keeps
//! only those within the configured threshold, which models aircraft range.

use std::collections::HashMap;
use std::fmt::{self, Write};
use std::sync::{Mutex, PoisonError};

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::airport::{Airport, AirportRecord};
use crate::error::{Error, Result};

/// Position of an airport within [`AirportGraph`].
pub type VertexIndex = usize;

/// Minimum Jaro-Winkler similarity for a code to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// Directed half of an undirected connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub source: VertexIndex,
    pub target: VertexIndex,
    /// Distance in whole nautical miles.
    pub weight: u32,
}

/// Options controlling bulk graph construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphBuildOptions {
    /// Maximum edge length in nautical miles (inclusive).
    pub threshold_nm: u32,
    /// Split pair enumeration across the worker pool.
    pub parallel: bool,
}

impl GraphBuildOptions {
    pub fn new(threshold_nm: u32) -> Self {
        Self {
            threshold_nm,
            ..Self::default()
        }
    }

    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for GraphBuildOptions {
    fn default() -> Self {
        Self {
            threshold_nm: 0,
            parallel: true,
        }
    }
}

/// Airport returned from a name search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AirportMatch {
    pub code: String,
    pub name: String,
}

impl fmt::Display for AirportMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.name)
    }
}

/// Airports plus the adjacency lists connecting them.
#[derive(Debug, Clone, Default)]
pub struct AirportGraph {
    vertices: Vec<Airport>,
    index: HashMap<String, VertexIndex>,
    adjacency: Vec<Vec<Edge>>,
}

impl AirportGraph {
    /// Create an empty graph with room for `capacity` airports.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            adjacency: Vec::with_capacity(capacity),
        }
    }

    /// Add every airport as a vertex, then connect all pairs within range.
    pub fn from_airports(airports: Vec<Airport>, options: &GraphBuildOptions) -> Result<Self> {
        let mut graph = Self::with_capacity(airports.len());
        for airport in airports {
            graph.add_vertex(airport)?;
        }
        graph.connect_within(options);
        Ok(graph)
    }

    /// Append an airport and return its vertex index.
    ///
    /// Codes are unique: inserting a second airport with a known code fails
    /// with [`Error::DuplicateAirport`] and leaves the graph untouched.
    pub fn add_vertex(&mut self, airport: Airport) -> Result<VertexIndex> {
        if self.index.contains_key(&airport.code) {
            return Err(Error::DuplicateAirport { code: airport.code });
        }

        let position = self.vertices.len();
        self.index.insert(airport.code.clone(), position);
        self.vertices.push(airport);
        self.adjacency.push(Vec::new());
        Ok(position)
    }

    /// Connect two existing airports in both directions.
    ///
    /// Connecting an airport to itself is allowed and stores two zero-weight
    /// entries in its own list.
    pub fn add_edge(&mut self, source: &Airport, dest: &Airport) -> Result<()> {
        let source_index = self.require_index(&source.code)?;
        let dest_index = self.require_index(&dest.code)?;
        let weight = truncate_distance(source.distance_to(dest));
        push_edge_pair(&mut self.adjacency, source_index, dest_index, weight);
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn insert_weighted_edge(&mut self, source: VertexIndex, dest: VertexIndex, weight: u32) {
        push_edge_pair(&mut self.adjacency, source, dest, weight);
    }

    /// Add an edge for every unordered pair of vertices whose distance does
    /// not exceed `options.threshold_nm`. Returns the number of edges added.
    ///
    /// Parallel and sequential construction yield identical adjacency lists.
    pub fn connect_within(&mut self, options: &GraphBuildOptions) -> usize {
        let threshold = f64::from(options.threshold_nm);
        let added = if options.parallel && self.vertices.len() > 1 {
            self.connect_parallel(threshold)
        } else {
            self.connect_sequential(threshold)
        };

        info!(
            vertices = self.vertices.len(),
            edges = added,
            threshold_nm = options.threshold_nm,
            parallel = options.parallel,
            "connected airports within range"
        );
        added
    }

    fn connect_sequential(&mut self, threshold: f64) -> usize {
        let count = self.vertices.len();
        let mut added = 0;
        for i in 0..count {
            for j in (i + 1)..count {
                let distance = self.vertices[i].distance_to(&self.vertices[j]);
                if distance <= threshold {
                    push_edge_pair(&mut self.adjacency, i, j, truncate_distance(distance));
                    added += 1;
                }
            }
        }
        added
    }

    fn connect_parallel(&mut self, threshold: f64) -> usize {
        let count = self.vertices.len();
        let workers = rayon::current_num_threads().max(1);
        let rows_per_worker = count.div_ceil(workers).max(1);
        debug!(workers, rows_per_worker, "partitioning pair enumeration");

        let vertices = &self.vertices;
        let adjacency = Mutex::new(std::mem::take(&mut self.adjacency));

        let added: usize = (0..count)
            .step_by(rows_per_worker)
            .collect::<Vec<_>>()
            .into_par_iter()
            .map(|first_row| {
                let last_row = (first_row + rows_per_worker).min(count);
                let mut added = 0;
                for i in first_row..last_row {
                    for j in (i + 1)..count {
                        let distance = vertices[i].distance_to(&vertices[j]);
                        if distance <= threshold {
                            let mut lists = adjacency.lock().unwrap_or_else(PoisonError::into_inner);
                            push_edge_pair(&mut lists, i, j, truncate_distance(distance));
                            added += 1;
                        }
                    }
                }
                added
            })
            .sum();

        let mut lists = adjacency
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        // A sequential build appends neighbours in ascending index order.
        for list in &mut lists {
            list.sort_by_key(|edge| edge.target);
        }
        self.adjacency = lists;
        added
    }

    fn require_index(&self, code: &str) -> Result<VertexIndex> {
        self.index_of(code).ok_or_else(|| Error::UnknownVertex {
            code: code.to_string(),
        })
    }

    /// Whether `code` names a vertex.
    pub fn is_valid_vertex(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    pub fn index_of(&self, code: &str) -> Option<VertexIndex> {
        self.index.get(code).copied()
    }

    pub fn try_lookup(&self, code: &str) -> Option<&Airport> {
        self.index_of(code).map(|position| &self.vertices[position])
    }

    pub fn airport(&self, index: VertexIndex) -> Option<&Airport> {
        self.vertices.get(index)
    }

    pub fn airports(&self) -> &[Airport] {
        &self.vertices
    }

    /// Display name for a code, if the airport exists.
    pub fn airport_name(&self, code: &str) -> Option<&str> {
        self.try_lookup(code).map(|airport| airport.name.as_str())
    }

    /// Edges leaving `index`, in insertion order.
    pub fn neighbours(&self, index: VertexIndex) -> &[Edge] {
        self.adjacency
            .get(index)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// First edge from `source` straight to `target`, if any.
    pub fn direct_edge(&self, source: VertexIndex, target: VertexIndex) -> Option<&Edge> {
        self.neighbours(source)
            .iter()
            .find(|edge| edge.target == target)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of undirected edges. A self-edge counts once.
    pub fn edge_count(&self) -> usize {
        self.adjacency
            .iter()
            .flatten()
            .filter(|edge| edge.source <= edge.target)
            .count()
            - self.self_edge_count()
    }

    fn self_edge_count(&self) -> usize {
        // Each self-edge is stored twice in the same list.
        self.adjacency
            .iter()
            .flatten()
            .filter(|edge| edge.source == edge.target)
            .count()
            / 2
    }

    /// Case-insensitive substring search over airport names and codes.
    pub fn search_names(&self, query: &str) -> Vec<AirportMatch> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.vertices
            .iter()
            .filter(|airport| {
                airport.name.to_lowercase().contains(&needle)
                    || airport.code.to_lowercase().contains(&needle)
            })
            .map(|airport| AirportMatch {
                code: airport.code.clone(),
                name: airport.name.clone(),
            })
            .collect()
    }

    /// Known codes most similar to `code`, best match first.
    pub fn fuzzy_code_matches(&self, code: &str, limit: usize) -> Vec<String> {
        let wanted = code.trim().to_uppercase();
        let mut scored: Vec<(f64, &str)> = self
            .vertices
            .iter()
            .map(|airport| {
                (
                    strsim::jaro_winkler(&wanted, &airport.code.to_uppercase()),
                    airport.code.as_str(),
                )
            })
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, code)| code.to_string())
            .collect()
    }

    /// Write one line per vertex listing its neighbours and edge weights.
    pub fn write_adjacency<W: Write>(&self, out: &mut W) -> fmt::Result {
        for (position, airport) in self.vertices.iter().enumerate() {
            write!(out, "Airport {} ({}) -> ", airport.code, airport.name)?;
            for edge in &self.adjacency[position] {
                write!(out, "{} ({}), ", self.vertices[edge.target].code, edge.weight)?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    pub fn adjacency_listing(&self) -> String {
        let mut buffer = String::new();
        let _ = self.write_adjacency(&mut buffer);
        buffer
    }

    /// Export the graph in Graphviz DOT format. Each undirected edge is
    /// written once, from its lower-indexed endpoint.
    pub fn write_dot<W: Write>(&self, out: &mut W) -> fmt::Result {
        writeln!(out, "graph airports {{")?;
        for airport in &self.vertices {
            writeln!(
                out,
                "    \"{}\" [label=\"{}\\n{}\"];",
                escape_dot(&airport.code),
                escape_dot(&airport.code),
                escape_dot(&airport.name)
            )?;
        }
        for edge in self.adjacency.iter().flatten() {
            if edge.source < edge.target {
                writeln!(
                    out,
                    "    \"{}\" -- \"{}\" [label=\"{}\"];",
                    escape_dot(&self.vertices[edge.source].code),
                    escape_dot(&self.vertices[edge.target].code),
                    edge.weight
                )?;
            }
        }
        writeln!(out, "}}")
    }

    pub fn to_dot(&self) -> String {
        let mut buffer = String::new();
        let _ = self.write_dot(&mut buffer);
        buffer
    }
}

/// Parse `records` into airports and build the range-limited graph.
///
/// Invalid or duplicate records abort construction.
pub fn build_airport_graph(
    records: &[AirportRecord],
    options: &GraphBuildOptions,
) -> Result<AirportGraph> {
    let airports = records
        .iter()
        .map(AirportRecord::to_airport)
        .collect::<Result<Vec<_>>>()?;
    AirportGraph::from_airports(airports, options)
}

fn push_edge_pair(adjacency: &mut [Vec<Edge>], source: VertexIndex, dest: VertexIndex, weight: u32) {
    adjacency[source].push(Edge {
        source,
        target: dest,
        weight,
    });
    adjacency[dest].push(Edge {
        source: dest,
        target: source,
        weight,
    });
}

fn truncate_distance(distance: f64) -> u32 {
    distance as u32
}

fn escape_dot(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airport::AirportCategory;

    fn airport(code: &str, lat: f64, lon: f64) -> Airport {
        Airport::new(code, format!("{code} Field"), AirportCategory::Medium, lat, lon)
    }

    #[test]
    fn duplicate_codes_are_rejected_without_side_effects() {
        let mut graph = AirportGraph::with_capacity(2);
        graph.add_vertex(airport("AAAA", 0.0, 0.0)).unwrap();
        let err = graph
            .add_vertex(airport("AAAA", 1.0, 1.0))
            .expect_err("duplicate");
        assert!(matches!(err, Error::DuplicateAirport { ref code } if code == "AAAA"));
        assert_eq!(graph.vertex_count(), 1);
        assert_eq!(graph.try_lookup("AAAA").unwrap().latitude, 0.0);
    }

    #[test]
    fn add_edge_requires_both_vertices() {
        let mut graph = AirportGraph::with_capacity(1);
        let known = airport("AAAA", 0.0, 0.0);
        graph.add_vertex(known.clone()).unwrap();
        let err = graph
            .add_edge(&known, &airport("BBBB", 0.0, 1.0))
            .expect_err("unknown vertex");
        assert!(matches!(err, Error::UnknownVertex { ref code } if code == "BBBB"));
        assert!(graph.neighbours(0).is_empty());
    }

    #[test]
    fn edge_count_handles_self_edges() {
        let mut graph = AirportGraph::with_capacity(2);
        let a = airport("AAAA", 0.0, 0.0);
        let b = airport("BBBB", 0.0, 1.0);
        graph.add_vertex(a.clone()).unwrap();
        graph.add_vertex(b.clone()).unwrap();
        graph.add_edge(&a, &b).unwrap();
        graph.add_edge(&a, &a).unwrap();
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.neighbours(0).len(), 3);
    }

    #[test]
    fn parallel_build_matches_sequential_build() {
        let airports: Vec<_> = (0..40)
            .map(|i| airport(&format!("P{i:03}"), (i % 7) as f64 * 1.5, (i / 7) as f64 * 1.5))
            .collect();
        let options = GraphBuildOptions::new(200);
        let parallel = AirportGraph::from_airports(airports.clone(), &options).unwrap();
        let sequential =
            AirportGraph::from_airports(airports, &options.sequential()).unwrap();

        assert!(parallel.edge_count() > 0);
        assert_eq!(parallel.edge_count(), sequential.edge_count());
        assert_eq!(parallel.adjacency_listing(), sequential.adjacency_listing());
    }

    #[test]
    fn fuzzy_matches_suggest_close_codes() {
        let mut graph = AirportGraph::with_capacity(3);
        for code in ["KJFK", "KLAX", "CYOW"] {
            graph.add_vertex(airport(code, 0.0, 0.0)).unwrap();
        }
        let suggestions = graph.fuzzy_code_matches("kjfx", 2);
        assert_eq!(suggestions.first().map(String::as_str), Some("KJFK"));
    }

    #[test]
    fn dot_escapes_quotes() {
        let mut graph = AirportGraph::with_capacity(1);
        graph
            .add_vertex(Airport::new(
                "QQQQ",
                "The \"Quoted\" Strip",
                AirportCategory::Small,
                0.0,
                0.0,
            ))
            .unwrap();
        assert!(graph.to_dot().contains("The \\\"Quoted\\\" Strip"));
    }
}
