//! Tests for data module

use super::*;
use approx::assert_abs_diff_eq;

fn lending_fixture() -> Dataset {
    DatasetBuilder::new()
        .with_column("genre", ["fiction", "science", "fiction", "history", "science"])
        .unwrap()
        .with_column("loans", [12.0, 7.0, 15.0, 3.0, 9.0])
        .unwrap()
        .with_column("rating", [4.5, 3.9, 4.8, 4.1, 3.5])
        .unwrap()
        .build()
}

#[test]
fn test_value_numeric_projection() {
    assert_eq!(Value::Number(3.5).as_f64(), Some(3.5));
    assert_eq!(Value::from("42").as_f64(), Some(42.0));
    assert_eq!(Value::from(" 1.5 ").as_f64(), Some(1.5));
    assert_eq!(Value::from("n/a").as_f64(), None);
    assert_eq!(Value::Number(f64::NAN).as_f64(), None);
    assert_eq!(Value::Bool(true).as_f64(), None);
    assert_eq!(Value::Null.as_f64(), None);
}

#[test]
fn test_dataset_from_json() {
    let json = r#"[
        {"title": "Dune", "loans": 12, "rating": 4.5, "available": true},
        {"title": "Emma", "loans": "7", "rating": null},
        {"title": "Ulysses", "loans": "lost"}
    ]"#;

    let dataset = Dataset::from_json_str(json).unwrap();
    assert_eq!(dataset.len(), 3);
    assert_eq!(
        dataset.field_names(),
        vec!["title", "loans", "rating", "available"]
    );

    let first = dataset.get(0).unwrap();
    assert_eq!(first.get("available"), Some(&Value::Bool(true)));
    assert_eq!(dataset.get(1).unwrap().get("rating"), Some(&Value::Null));
}

#[test]
fn test_field_vector_filters_non_numeric() {
    let json = r#"[
        {"loans": 12}, {"loans": "7"}, {"loans": "lost"}, {"loans": null}, {"other": 1}
    ]"#;
    let dataset = Dataset::from_json_str(json).unwrap();

    let loans = dataset.field_vector("loans").unwrap();
    assert_eq!(loans.as_slice(), &[12.0, 7.0]);

    let from_raw = FieldVector::from_values(vec![1.0, f64::NAN, 3.0]);
    assert_eq!(from_raw.len(), 2);
    assert_abs_diff_eq!(from_raw.mean().unwrap(), 2.0);
}

#[test]
fn test_unknown_field_fails_fast() {
    let dataset = lending_fixture();

    let err = dataset.field_vector("pages").unwrap_err();
    assert!(matches!(err, DataError::FieldNotFound { ref field, .. } if field == "pages"));

    // An empty dataset has no schema to check against
    let empty = Dataset::default();
    assert!(empty.field_vector("pages").unwrap().is_empty());
}

#[test]
fn test_dataset_builder_dimension_check() {
    let result = DatasetBuilder::new()
        .with_column("a", [1.0, 2.0])
        .unwrap()
        .with_column("b", [1.0, 2.0, 3.0]);

    assert!(matches!(result, Err(DataError::DimensionMismatch { .. })));
}

#[test]
fn test_group_by_category() {
    let dataset = lending_fixture();
    let groups = dataset.group_by("genre", "loans").unwrap();

    let keys: Vec<&str> = groups.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["fiction", "science", "history"]);
    assert_eq!(groups["fiction"].as_slice(), &[12.0, 15.0]);
    assert_eq!(groups["science"].as_slice(), &[7.0, 9.0]);
    assert_eq!(groups["history"].as_slice(), &[3.0]);
}

#[test]
fn test_where_eq_and_filter() {
    let dataset = lending_fixture();

    let fiction = dataset.where_eq("genre", &Value::from("fiction")).unwrap();
    assert_eq!(fiction.len(), 2);

    let popular = dataset.filter(|r| r.get_f64("loans").is_some_and(|v| v > 8.0));
    assert_eq!(popular.len(), 3);

    // Filtering never touches the source
    assert_eq!(dataset.len(), 5);
}

#[test]
fn test_observations_drop_incomplete_rows() {
    let json = r#"[
        {"x": 1, "y": 2}, {"x": 2}, {"x": "two", "y": 4}, {"x": 3, "y": 6}
    ]"#;
    let dataset = Dataset::from_json_str(json).unwrap();

    let obs = dataset.observations("x", "y").unwrap();
    assert_eq!(obs, vec![Observation::new(1.0, 2.0), Observation::new(3.0, 6.0)]);
}

#[test]
fn test_points_require_every_coordinate() {
    let dataset = lending_fixture();
    let points = dataset.points(&["loans", "rating"]).unwrap();
    assert_eq!(points.len(), 5);
    assert_eq!(points.ndims(), 2);
    assert_eq!(points.row(2).to_vec(), vec![15.0, 4.8]);

    let json = r#"[{"a": 1, "b": 2}, {"a": 3}]"#;
    let sparse = Dataset::from_json_str(json).unwrap();
    let err = sparse.points(&["a", "b"]).unwrap_err();
    assert!(matches!(err, DataError::MissingData { row: 1, .. }));

    let err = dataset.points(&["genre"]).unwrap_err();
    assert!(matches!(err, DataError::NonNumericData { row: 0, .. }));
}

#[test]
fn test_min_max_normalization() {
    let points = Points::from_rows(
        &["a", "b", "c"],
        &[
            vec![10.0, -1.0, 5.0],
            vec![20.0, 1.0, 5.0],
            vec![15.0, 0.0, 5.0],
        ],
    )
    .unwrap();
    assert!(!points.is_unit_scaled());

    let normalized = points.min_max_normalize();
    assert!(normalized.is_unit_scaled());
    assert_eq!(normalized.row(0).to_vec(), vec![0.0, 0.0, 0.0]);
    assert_eq!(normalized.row(1).to_vec(), vec![1.0, 1.0, 0.0]);
    assert_eq!(normalized.row(2).to_vec(), vec![0.5, 0.5, 0.0]);

    // Input is untouched
    assert_eq!(points.row(0).to_vec(), vec![10.0, -1.0, 5.0]);
}

#[test]
fn test_time_series_sorted_by_date() {
    let json = r#"[
        {"date": "2024-03-03", "loans": 30},
        {"date": "2024-03-01", "loans": 10},
        {"date": "not a date", "loans": 99},
        {"date": "2024-03-02T08:30:00Z", "loans": 20},
        {"date": "2024-03-04", "loans": null}
    ]"#;
    let dataset = Dataset::from_json_str(json).unwrap();

    let series = dataset.time_series("date", "loans").unwrap();
    assert_eq!(series.values(), &[10.0, 20.0, 30.0]);
    assert_eq!(series.timestamps[0].to_string(), "2024-03-01 00:00:00");
}
