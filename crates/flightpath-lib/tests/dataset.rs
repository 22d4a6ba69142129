mod common;

use flightpath_lib::{
    filter_records, load_records, resolve_dataset_path, AirportCategory, CoordinateValue, Error,
    RecordFilter,
};

use common::{fixture_records, fixtures_dir};

#[test]
fn json_fixture_accepts_string_coordinates() {
    let records = fixture_records("five_airports.json");
    assert_eq!(records.len(), 5);
    assert!(matches!(records[0].latitude, CoordinateValue::Text(_)));

    let airport = records[0].to_airport().expect("valid record");
    assert_eq!(airport.code, "XGCR");
    assert_eq!(airport.category, AirportCategory::Medium);
    assert_eq!(airport.latitude, 30.0);
    assert_eq!(airport.longitude, -90.0);
}

#[test]
fn json_fixture_accepts_numeric_coordinates() {
    let records = fixture_records("chain_airports.json");
    assert!(matches!(records[0].latitude, CoordinateValue::Number(_)));
    assert!(records
        .iter()
        .all(|record| record.category() == Some(AirportCategory::Small)));
}

#[test]
fn csv_fixture_maps_ourairports_columns() {
    let records = fixture_records("ourairports_sample.csv");
    assert_eq!(records.len(), 8);

    let ottawa = &records[0];
    assert_eq!(ottawa.ident, "CYOW");
    assert_eq!(ottawa.kind, "large_airport");
    assert_eq!(ottawa.continent.as_deref(), Some("NA"));
    assert_eq!(ottawa.iata.as_deref(), Some("YOW"));
    assert_eq!(ottawa.icao.as_deref(), Some("CYOW"));

    let helipad = records.last().unwrap();
    assert_eq!(helipad.category(), None);
    assert_eq!(helipad.iata, None);
}

#[test]
fn default_filter_drops_small_fields_and_heliports() {
    let kept = filter_records(
        fixture_records("ourairports_sample.csv"),
        &RecordFilter::default(),
    );
    let idents: Vec<_> = kept.iter().map(|record| record.ident.as_str()).collect();
    assert_eq!(idents, vec!["CYOW", "KJFK", "KLAX", "KBOS", "CYUL", "EGLL"]);
}

#[test]
fn continent_filter_is_case_insensitive() {
    let kept = filter_records(
        fixture_records("ourairports_sample.csv"),
        &RecordFilter::default().with_continent("eu"),
    );
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].ident, "EGLL");
}

#[test]
fn explicit_dataset_path_must_exist() {
    let present = fixtures_dir().join("five_airports.json");
    assert_eq!(resolve_dataset_path(Some(&present)).unwrap(), present);

    let absent = fixtures_dir().join("does_not_exist.json");
    let err = resolve_dataset_path(Some(&absent)).expect_err("missing file");
    assert!(matches!(err, Error::DatasetNotFound { .. }));
}

#[test]
fn malformed_json_reports_parse_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "[{\"ident\": \"XAAA\"").expect("write");

    let err = load_records(&path).expect_err("truncated document");
    assert!(matches!(err, Error::Json(_)));
}

#[test]
fn out_of_range_coordinates_are_rejected() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("bad.json");
    std::fs::write(
        &path,
        r#"[{"ident":"XBAD","name":"Bad","type":"small_airport","latitude":"95.0","longitude":0}]"#,
    )
    .expect("write");

    let records = load_records(&path).expect("document parses");
    let err = records[0].to_airport().expect_err("latitude out of range");
    assert!(matches!(err, Error::InvalidCoordinate { field: "latitude", .. }));
}
