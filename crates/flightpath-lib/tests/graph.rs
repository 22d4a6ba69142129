mod common;

use flightpath_lib::{
    build_airport_graph, Airport, AirportCategory, AirportGraph, Error, GraphBuildOptions,
};

use common::{fixture_graph, fixture_records};

fn yow() -> Airport {
    Airport::new("YOW", "Ottawa", AirportCategory::Medium, 45.3225, -75.6692)
}

fn jfk() -> Airport {
    Airport::new("JFK", "New York", AirportCategory::Large, 40.6413, -73.7781)
}

fn lax() -> Airport {
    Airport::new("LAX", "Los Angeles", AirportCategory::Large, 33.9416, -118.4085)
}

fn three_airport_graph() -> AirportGraph {
    let mut graph = AirportGraph::with_capacity(3);
    for airport in [yow(), jfk(), lax()] {
        graph.add_vertex(airport).expect("unique code");
    }
    graph
}

#[test]
fn adjacency_lists_truncated_weights_in_insertion_order() {
    let mut graph = three_airport_graph();
    graph.add_edge(&yow(), &jfk()).unwrap();
    graph.add_edge(&jfk(), &lax()).unwrap();
    graph.add_edge(&yow(), &lax()).unwrap();

    let expected = "Airport YOW (Ottawa) -> JFK (293), LAX (2063), \n\
                    Airport JFK (New York) -> YOW (293), LAX (2145), \n\
                    Airport LAX (Los Angeles) -> JFK (2145), YOW (2063), \n";
    assert_eq!(graph.adjacency_listing(), expected);
}

#[test]
fn adjacency_is_symmetric() {
    let mut graph = three_airport_graph();
    graph.add_edge(&yow(), &jfk()).unwrap();
    graph.add_edge(&jfk(), &lax()).unwrap();

    for index in 0..graph.vertex_count() {
        for edge in graph.neighbours(index) {
            let back = graph
                .direct_edge(edge.target, edge.source)
                .expect("reverse edge present");
            assert_eq!(back.weight, edge.weight);
        }
    }
}

#[test]
fn self_edge_appears_twice_with_zero_weight() {
    let mut graph = three_airport_graph();
    graph.add_edge(&yow(), &yow()).unwrap();

    let edges = graph.neighbours(0);
    assert_eq!(edges.len(), 2);
    assert!(edges.iter().all(|edge| edge.target == 0 && edge.weight == 0));
    assert!(graph
        .adjacency_listing()
        .starts_with("Airport YOW (Ottawa) -> YOW (0), YOW (0), \n"));
}

#[test]
fn unknown_endpoint_fails_loudly() {
    let mut graph = AirportGraph::with_capacity(1);
    graph.add_vertex(yow()).unwrap();
    let err = graph.add_edge(&yow(), &lax()).expect_err("LAX missing");
    assert!(matches!(err, Error::UnknownVertex { ref code } if code == "LAX"));
}

#[test]
fn lookups_and_validation() {
    let graph = three_airport_graph();
    assert!(graph.is_valid_vertex("JFK"));
    assert!(!graph.is_valid_vertex("jfk"));
    assert_eq!(graph.index_of("LAX"), Some(2));
    assert_eq!(graph.airport_name("YOW"), Some("Ottawa"));
    assert!(graph.try_lookup("SFO").is_none());
}

#[test]
fn name_search_is_case_insensitive() {
    let graph = three_airport_graph();
    let matches: Vec<String> = graph
        .search_names("new")
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(matches, vec!["JFK: New York".to_string()]);
    assert!(graph.search_names("   ").is_empty());
}

#[test]
fn threshold_filters_edges() {
    let counts: Vec<usize> = [1000, 280, 250, 100, 40]
        .iter()
        .map(|&threshold| fixture_graph("five_airports.json", threshold).edge_count())
        .collect();
    assert!(
        counts.windows(2).all(|pair| pair[0] >= pair[1]),
        "edge count must not grow as the threshold shrinks: {counts:?}"
    );
    assert_eq!(counts[3], 1);
    assert_eq!(counts[4], 0);
}

#[test]
fn threshold_100_keeps_only_the_closest_pair() {
    let graph = fixture_graph("five_airports.json", 100);
    let gulf = graph.index_of("XGCR").unwrap();
    let bayou = graph.index_of("XBAY").unwrap();

    assert_eq!(graph.edge_count(), 1);
    let edge = graph.direct_edge(gulf, bayou).expect("closest pair connected");
    assert_eq!(edge.weight, 45);
}

#[test]
fn threshold_250_forms_four_airport_cluster() {
    let graph = fixture_graph("five_airports.json", 250);
    assert_eq!(graph.edge_count(), 4);

    let prairie = graph.index_of("XPRA").unwrap();
    assert!(graph.neighbours(prairie).is_empty());
    for code in ["XGCR", "XBAY", "XDLT", "XOZK"] {
        let index = graph.index_of(code).unwrap();
        assert!(!graph.neighbours(index).is_empty(), "{code} is connected");
    }
}

#[test]
fn threshold_280_connects_all_five() {
    let graph = fixture_graph("five_airports.json", 280);
    assert_eq!(graph.edge_count(), 5);
    assert!(graph
        .airports()
        .iter()
        .enumerate()
        .all(|(index, _)| !graph.neighbours(index).is_empty()));
}

#[test]
fn rebuilding_is_deterministic() {
    let records = fixture_records("five_airports.json");
    let first = build_airport_graph(&records, &GraphBuildOptions::new(280)).unwrap();
    let second = build_airport_graph(&records, &GraphBuildOptions::new(280)).unwrap();
    let sequential =
        build_airport_graph(&records, &GraphBuildOptions::new(280).sequential()).unwrap();

    assert_eq!(first.adjacency_listing(), second.adjacency_listing());
    assert_eq!(first.adjacency_listing(), sequential.adjacency_listing());
}

#[test]
fn duplicate_records_abort_construction() {
    let mut records = fixture_records("five_airports.json");
    records.push(records[0].clone());
    let err = build_airport_graph(&records, &GraphBuildOptions::new(100)).expect_err("duplicate");
    assert!(matches!(err, Error::DuplicateAirport { ref code } if code == "XGCR"));
}

#[test]
fn dot_export_writes_each_edge_once() {
    let graph = fixture_graph("five_airports.json", 280);
    let dot = graph.to_dot();

    assert!(dot.starts_with("graph airports {\n"));
    assert!(dot.ends_with("}\n"));
    let edge_lines = dot.lines().filter(|line| line.contains(" -- ")).count();
    assert_eq!(edge_lines, graph.edge_count());
    assert!(dot.contains("\"XGCR\" -- \"XBAY\" [label=\"45\"];"));
}
