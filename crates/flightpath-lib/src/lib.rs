//! Flight path library entry points.
//!
//! This crate turns a list of airports into a range-limited graph, where two
//! airports are connected when the great-circle distance between them is
//! within the aircraft's range, and plans routes across that graph. Higher
//! level consumers (the CLI) should only depend on the functions exported here
//! instead of reimplementing behavior.
//!

pub mod airport;
pub mod config;
pub mod dataset;
pub mod error;
pub mod geo;
pub mod graph;
pub mod output;
pub mod path;
pub mod routing;

pub use airport::{Airport, AirportCategory, AirportRecord, CoordinateValue};
pub use config::{settings_path, Settings};
pub use dataset::{
    default_dataset_path, filter_records, load_records, resolve_dataset_path, RecordFilter,
};
pub use error::{Endpoint, Error, Result};
pub use geo::{haversine, EARTH_RADIUS_NM};
pub use graph::{build_airport_graph, AirportGraph, AirportMatch, Edge, GraphBuildOptions, VertexIndex};
pub use output::{NoPathSummary, OutcomeSummary, OutputMode, RouteStop, RouteSummary};
pub use path::{shortest_path, SearchAlgorithm, SearchConfig, ShortestPath, DEFAULT_BUFFER_NM};
pub use routing::{plan_route, RouteOutcome, RoutePlan, RouteRequest};
