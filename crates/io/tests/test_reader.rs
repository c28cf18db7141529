//! Integration test: measurement and reference CSV reading.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use wavematch_io::{IoError, ReaderConfig, read_measurements, read_reference};

fn csv_file(content: &str) -> NamedTempFile {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(content.as_bytes()).unwrap();
    f
}

#[test]
fn read_measurements_file_not_found() {
    let path = Path::new("/tmp/wavematch_test_nonexistent_file.csv");
    let err = read_measurements(path, &ReaderConfig::default()).unwrap_err();
    assert!(
        matches!(err, IoError::FileNotFound { .. }),
        "expected FileNotFound, got {err:?}",
    );
}

#[test]
fn read_measurements_invalid_config_rejects_early() {
    let path = Path::new("/tmp/wavematch_test_nonexistent_file.csv");
    let config = ReaderConfig::default().with_reference_column(Some(""));
    let err = read_measurements(path, &config).unwrap_err();
    assert!(
        matches!(err, IoError::Validation { .. }),
        "expected Validation error, got {err:?}",
    );
}

#[test]
fn measurement_columns_keep_file_order() {
    let f = csv_file("Sensor1,Sensor2,Sensor3\n1,4,7\n2,5,8\n3,6,9\n");
    let table = read_measurements(f.path(), &ReaderConfig::default()).unwrap();
    assert_eq!(table.len(), 3);
    assert_eq!(
        table.names().collect::<Vec<_>>(),
        vec!["Sensor1", "Sensor2", "Sensor3"]
    );
    assert_eq!(table.get("Sensor2").unwrap().values(), &[4.0, 5.0, 6.0]);
}

#[test]
fn measurement_trailing_empty_cells_are_trimmed() {
    let f = csv_file("a,b\n1.5,1\n2.5,\n3.5,NaN\n4.5,\n");
    let table = read_measurements(f.path(), &ReaderConfig::default()).unwrap();
    assert_eq!(table.get("a").unwrap().len(), 4);
    assert_eq!(table.get("b").unwrap().values(), &[1.0]);
}

#[test]
fn measurement_interior_gap_rejects_only_that_column() {
    let f = csv_file("a,b\n1,1\n,2\n3,3\n");
    let table = read_measurements(f.path(), &ReaderConfig::default()).unwrap();
    assert_eq!(table.names().collect::<Vec<_>>(), vec!["a", "b"]);
    let rejected: Vec<_> = table.rejected().collect();
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0].name(), "a");
    assert_eq!(rejected[0].reason(), "row 3: missing value");
    assert_eq!(table.get("b").unwrap().values(), &[1.0, 2.0, 3.0]);
}

#[test]
fn measurement_problems_are_listed_per_column() {
    let f = csv_file("a,b,c,d\nx,1,,1\n2,oops,,2\n");
    let table = read_measurements(f.path(), &ReaderConfig::default()).unwrap();
    assert_eq!(table.len(), 4);
    let reasons: Vec<(&str, &str)> = table.rejected().map(|r| (r.name(), r.reason())).collect();
    assert_eq!(
        reasons,
        vec![
            ("a", "row 2: cannot parse \"x\""),
            ("b", "row 3: cannot parse \"oops\""),
            ("c", "no values"),
        ]
    );
    assert!(matches!(table.entries()[3], Ok(ref c) if c.name() == "d"));
}

#[test]
fn long_problem_lists_are_truncated() {
    let mut content = String::from("a,b\n");
    for i in 0..8 {
        content.push_str(&format!("bad{i},{i}\n"));
    }
    content.push_str("1,8\n");
    let f = csv_file(&content);
    let table = read_measurements(f.path(), &ReaderConfig::default()).unwrap();
    let rejected = table.rejected().next().unwrap();
    assert!(rejected.reason().starts_with("row 2: cannot parse \"bad0\"; "));
    assert!(rejected.reason().ends_with(" (and 3 more)"), "{}", rejected.reason());
    assert_eq!(table.get("b").unwrap().len(), 9);
}

#[test]
fn measurement_index_column_is_dropped() {
    let f = csv_file(",s1\n0,0.1\n1,0.2\n");
    let table = read_measurements(f.path(), &ReaderConfig::default()).unwrap();
    assert_eq!(table.names().collect::<Vec<_>>(), vec!["s1"]);

    let kept = read_measurements(f.path(), &ReaderConfig::default().with_drop_unnamed(false)).unwrap();
    assert_eq!(kept.len(), 2);
}

#[test]
fn measurement_duplicate_headers_rejected() {
    let f = csv_file("a,a\n1,2\n");
    let err = read_measurements(f.path(), &ReaderConfig::default()).unwrap_err();
    assert!(err.to_string().contains("duplicate column 'a'"));
}

#[test]
fn reference_drops_auxiliary_columns_and_rows() {
    let f = csv_file(
        "Unnamed: 0,SourceSignal,Unnamed: 2,Empty\n\
         0,0.0,,\n\
         1,0.5,x,\n\
         2,,,\n\
         3,1.0,,\n\
         4,,,\n",
    );
    let column = read_reference(f.path(), &ReaderConfig::default()).unwrap();
    assert_eq!(column.name(), "SourceSignal");
    assert_eq!(column.values(), &[0.0, 0.5, 1.0]);
}

#[test]
fn reference_rows_missing_in_any_column_are_dropped() {
    let f = csv_file("time,signal\n0,1.0\n1,\n,3.0\n3,4.0\n");
    let config = ReaderConfig::default().with_reference_column(Some("signal"));
    let column = read_reference(f.path(), &config).unwrap();
    assert_eq!(column.values(), &[1.0, 4.0]);
}

#[test]
fn reference_with_several_columns_needs_a_name() {
    let f = csv_file("time,signal\n0,1.0\n1,2.0\n");
    match read_reference(f.path(), &ReaderConfig::default()).unwrap_err() {
        IoError::AmbiguousReference { columns, .. } => {
            assert_eq!(columns, vec!["time".to_string(), "signal".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn reference_missing_named_column() {
    let f = csv_file("signal\n1.0\n");
    let config = ReaderConfig::default().with_reference_column(Some("SourceSignal"));
    let err = read_reference(f.path(), &config).unwrap_err();
    assert!(matches!(err, IoError::MissingColumn { ref name, .. } if name == "SourceSignal"));
}

#[test]
fn reference_non_numeric_cell_rejected() {
    let f = csv_file("signal\n1.0\nabc\n2.0\n");
    let err = read_reference(f.path(), &ReaderConfig::default()).unwrap_err();
    assert!(matches!(err, IoError::Validation { count: 1, .. }));
}
