use criterion::{criterion_group, criterion_main, Criterion};
use flightpath_lib::{
    plan_route, Airport, AirportCategory, AirportGraph, GraphBuildOptions, RouteRequest,
    SearchAlgorithm,
};
use once_cell::sync::Lazy;
use std::hint::black_box;

const GRID: usize = 30;
const RANGE_NM: u32 = 150;

fn grid_airports() -> Vec<Airport> {
    let mut airports = Vec::with_capacity(GRID * GRID);
    for row in 0..GRID {
        for col in 0..GRID {
            airports.push(Airport::new(
                format!("G{row:02}{col:02}"),
                format!("Grid {row}/{col}"),
                AirportCategory::Medium,
                30.0 + row as f64,
                -100.0 + col as f64,
            ));
        }
    }
    airports
}

static AIRPORTS: Lazy<Vec<Airport>> = Lazy::new(grid_airports);
static GRAPH: Lazy<AirportGraph> = Lazy::new(|| {
    AirportGraph::from_airports(AIRPORTS.clone(), &GraphBuildOptions::new(RANGE_NM))
        .expect("grid builds")
});
static CORNER_TO_CORNER: Lazy<RouteRequest> =
    Lazy::new(|| RouteRequest::new("G0000", format!("G{0:02}{0:02}", GRID - 1)));

fn benchmark_graph_build(c: &mut Criterion) {
    c.bench_function("build_grid_parallel", |b| {
        b.iter(|| {
            let graph = AirportGraph::from_airports(
                AIRPORTS.clone(),
                &GraphBuildOptions::new(RANGE_NM),
            )
            .expect("grid builds");
            black_box(graph.edge_count())
        });
    });

    c.bench_function("build_grid_sequential", |b| {
        b.iter(|| {
            let graph = AirportGraph::from_airports(
                AIRPORTS.clone(),
                &GraphBuildOptions::new(RANGE_NM).sequential(),
            )
            .expect("grid builds");
            black_box(graph.edge_count())
        });
    });
}

fn benchmark_pathfinding(c: &mut Criterion) {
    let graph = &*GRAPH;

    c.bench_function("hop_aware_corner_to_corner", |b| {
        let request = &*CORNER_TO_CORNER;
        b.iter(|| {
            let outcome = plan_route(graph, request).expect("codes exist");
            black_box(outcome.plan().map(|plan| plan.hop_count()))
        });
    });

    c.bench_function("min_corner_to_corner", |b| {
        let request = CORNER_TO_CORNER
            .clone()
            .with_algorithm(SearchAlgorithm::Min);
        b.iter(|| {
            let outcome = plan_route(graph, &request).expect("codes exist");
            black_box(outcome.plan().map(|plan| plan.distance_nm))
        });
    });
}

criterion_group!(benches, benchmark_graph_build, benchmark_pathfinding);
criterion_main!(benches);
