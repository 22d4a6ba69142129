//! Shared fixture helpers for integration tests.

use std::path::PathBuf;

use flightpath_lib::{build_airport_graph, load_records, AirportGraph, AirportRecord, GraphBuildOptions};

/// Path to fixtures directory shared by the workspace's tests.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Records from a fixture file under `docs/fixtures`.
pub fn fixture_records(name: &str) -> Vec<AirportRecord> {
    load_records(&fixtures_dir().join(name)).expect("fixture loads")
}

/// Build a graph from a fixture with the given threshold.
#[allow(dead_code)]
pub fn fixture_graph(name: &str, threshold_nm: u32) -> AirportGraph {
    build_airport_graph(&fixture_records(name), &GraphBuildOptions::new(threshold_nm))
        .expect("fixture graph builds")
}
