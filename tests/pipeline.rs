use parcelgrid::gate::{accept_value, fallback_geometry};
use parcelgrid::{
    Geometry, PipelineConfig, RejectReason, SurveyGeometry, parse_coordinates,
    parse_coordinates_with, resolve, resolve_first, resolve_value,
};
use serde_json::json;

#[test]
fn test_square_parcel_end_to_end() {
    let text = "2000000 4000000\n2000100 4000000\n2000100 4000100\n2000000 4000100";
    let polygon = parse_coordinates(text).unwrap();
    let ring = polygon.outer_ring().unwrap();

    assert_eq!(ring.len(), 5);
    assert_eq!(ring.first(), ring.last());
    assert!((ring[0][0] - 178.75).abs() < 1e-3);
    assert!((ring[0][1] + 17.0).abs() < 1e-3);

    let value = serde_json::to_value(&polygon).unwrap();
    assert_eq!(value["type"], "Polygon");
    assert_eq!(value["coordinates"][0].as_array().unwrap().len(), 5);
}

#[test]
fn test_messy_survey_file() {
    // Header, point IDs, elevations, mixed delimiters and CRLF endings
    let text = "PT;EASTING;NORTHING;RL\r\n\
                1;2000000.00;4000000.00;12.4\r\n\
                2,\t2000100.00,4000000.00,12.9\r\n\
                3   2000100.00   4000100.00   13.1\r\n\
                \r\n\
                4;2000000.00;4000100.00;12.7\r\n";

    let report = parse_coordinates_with(text, &PipelineConfig::default());
    assert_eq!(report.accepted(), 4);
    assert_eq!(report.lines, 5);

    let ring = report.polygon.as_ref().unwrap().outer_ring().unwrap();
    assert_eq!(ring.len(), 5);
    assert!((report.grid_area().unwrap() - 10_000.0).abs() < 1e-6);
}

#[test]
fn test_already_closed_input_is_not_doubled() {
    let text = "2000000 4000000\n2000100 4000000\n2000100 4000100\n2000000 4000000";
    let polygon = parse_coordinates(text).unwrap();
    assert_eq!(polygon.outer_ring().unwrap().len(), 4);
}

#[test]
fn test_prose_returns_none() {
    assert!(parse_coordinates("This contract concerns the land described below.").is_none());
    assert!(parse_coordinates("").is_none());
}

#[test]
fn test_leading_id_line() {
    let polygon = parse_coordinates("3 2000000 4000000").unwrap();
    let ring = polygon.outer_ring().unwrap();
    assert!((ring[0][0] - 178.75).abs() < 1e-3);
    assert!((ring[0][1] + 17.0).abs() < 1e-3);
}

#[test]
fn test_two_small_columns_are_still_projected() {
    // Small values are taken as-is; they project far outside the window
    let report = parse_coordinates_with("1500 2500", &PipelineConfig::default());
    assert!(report.polygon.is_none());
    assert!(matches!(
        report.diagnostics[0].reason,
        RejectReason::ImplausibleResult { .. } | RejectReason::ProjectionFailure { .. }
    ));
}

#[test]
fn test_implausible_point_is_dropped() {
    let text = "2000000 4000000\n2000000 1455000\n2000100 4000000";
    let report = parse_coordinates_with(text, &PipelineConfig::default());

    assert_eq!(report.accepted(), 2);
    let reason = &report.diagnostics[0].reason;
    match reason {
        RejectReason::ImplausibleResult { latitude, .. } => assert!(*latitude < -25.0),
        other => panic!("unexpected reason {other:?}"),
    }
    assert_eq!(report.diagnostics[0].line, 2);
}

#[test]
fn test_gate_rejects_empty_ring_and_substitutes_placeholder() {
    let candidate = json!({"type": "Polygon", "coordinates": [[]]});
    assert!(accept_value(&candidate).is_err());

    let resolved = resolve_value(Some(&candidate));
    assert_eq!(resolved, fallback_geometry());

    let value = serde_json::to_value(&resolved).unwrap();
    assert_eq!(value["source"], "missing");
    assert_eq!(value["geometry"]["coordinates"][0].as_array().unwrap().len(), 5);
}

#[test]
fn test_pipeline_output_beats_extracted_geometry() {
    let parsed = parse_coordinates("2000000 4000000\n2000100 4000000\n2000100 4000100")
        .map(SurveyGeometry::from);
    let extracted = accept_value(&json!({"type": "Point", "coordinates": [178.4, -18.1]})).ok();

    let resolved = resolve_first([parsed.clone(), extracted.clone()]);
    assert_eq!(resolved, Geometry::Surveyed(parsed.unwrap()));

    let resolved = resolve_first([parse_coordinates("nothing here").map(SurveyGeometry::from), extracted]);
    assert!(matches!(resolved, Geometry::Surveyed(SurveyGeometry::Point(_))));
}

#[test]
fn test_null_pipeline_result_gets_placeholder() {
    let resolved = resolve(parse_coordinates("n/a").map(SurveyGeometry::from));
    assert!(resolved.is_placeholder());
}
