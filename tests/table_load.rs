use std::io::Write;

use tempfile::NamedTempFile;

use arealog::area::table::{AreaLookupTable, TableError};

#[test]
fn from_tokens_groups_by_region_suffix() {
    let table = AreaLookupTable::from_tokens(["F12TA", " g07ta ", "KM72A", "F12TA"]).expect("table");

    assert_eq!(table.len(), 3);
    assert_eq!(table.regions(), vec!["2A", "TA"]);
    assert!(table.contains("G07TA"));
    assert!(!table.contains("g07ta"));
    assert!(table.has_region("TA"));
    assert_eq!(table.region("TA").map(|s| s.len()), Some(2));
    assert!(table.region("ZZ").is_none());
}

#[test]
fn malformed_tokens_are_rejected() {
    for bad in ["F12T", "F12TAX", "F1-TA", "", "F12 A"] {
        let err = AreaLookupTable::from_tokens([bad]).expect_err(bad);
        assert!(matches!(err, TableError::InvalidToken(_)), "{bad:?}: {err:?}");
    }
}

#[test]
fn from_regions_checks_token_suffix() {
    let err = AreaLookupTable::from_regions([("TA", vec!["F12TB"])]).expect_err("mismatch");
    assert!(matches!(err, TableError::RegionMismatch { .. }));
}

#[test]
fn json_file_loads_and_answers_lookups() {
    let mut file = NamedTempFile::new().expect("tmp");
    write!(file, r#"{{"TA": ["F12TA", "G07TA"], "2A": ["KM72A"]}}"#).expect("write");

    let table = AreaLookupTable::load(file.path()).expect("load");
    assert_eq!(table.len(), 3);
    assert!(table.contains("KM72A"));
    assert_eq!(table, AreaLookupTable::from_tokens(["KM72A", "G07TA", "F12TA"]).expect("table"));
}

#[test]
fn empty_or_missing_table_is_a_configuration_error() {
    assert!(matches!(AreaLookupTable::from_json_str("{}"), Err(TableError::Empty)));
    assert!(matches!(
        AreaLookupTable::from_json_str(r#"{"TA": []}"#),
        Err(TableError::Empty)
    ));
    assert!(matches!(
        AreaLookupTable::from_json_str("[1, 2]"),
        Err(TableError::Json(_))
    ));

    let dir = tempfile::tempdir().expect("tmp");
    let missing = dir.path().join("areas.json");
    assert!(matches!(AreaLookupTable::load(&missing), Err(TableError::Io(_))));
}
