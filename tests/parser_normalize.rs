use arealog::{
    parser::{normalize, parse, parse_all, project},
    record::{Field, NormalizedRecord},
};

#[test]
fn parse_upcases_and_trims_names_and_values() {
    let parsed = parse("< call :5>  W1ABC  <qso_date:8>20240101\n<Comment:4>hi there ");

    assert_eq!(parsed.len(), 3);
    assert_eq!(parsed["CALL"], "W1ABC");
    assert_eq!(parsed["QSO_DATE"], "20240101");
    assert_eq!(parsed["COMMENT"], "hi there");
}

#[test]
fn declared_length_does_not_bound_the_value() {
    let parsed = parse("<CALL:2>W1ABC<FREQ:99>14.205");

    assert_eq!(parsed["CALL"], "W1ABC");
    assert_eq!(parsed["FREQ"], "14.205");
}

#[test]
fn later_duplicate_tag_wins() {
    let parsed = parse("<CALL:5>W1ABC<call:5>K2XYZ<CALL:4>N0AA");
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed["CALL"], "N0AA");
}

#[test]
fn text_without_tags_yields_empty_record() {
    for raw in ["", "   ", "no tags at all", "<CALL>W1ABC", "<CALL:x>W1ABC", "<:5>W1ABC"] {
        let parsed = parse(raw);
        assert!(parsed.is_empty(), "unexpected tags in {raw:?}: {parsed:?}");
        assert_eq!(project(&parsed), NormalizedRecord::default());
    }
}

#[test]
fn zero_length_tags_parse_to_empty_values() {
    let rec = project(&parse("<SRX_STRING:0><COMMENT:0><CALL:5>W1ABC"));
    assert_eq!(rec.srx_string(), "");
    assert_eq!(rec.comment(), "");
    assert_eq!(rec.call(), "W1ABC");
}

#[test]
fn project_keeps_only_schema_fields() {
    let raw = "<QSO_DATE:8>20240101<FREQ:7>14.205<STATION_CALLSIGN:5>4Z1KD<OPERATOR:5>4Z1KD\
               <CALL:5>W1ABC<STX_STRING:5>KM72A<SRX_STRING:3>599<COMMENT:2>tu<RST_SENT:3>599";
    let rec = project(&parse(raw));

    assert_eq!(rec.qso_date(), "20240101");
    assert_eq!(rec.freq(), "14.205");
    assert_eq!(rec.station_callsign(), "4Z1KD");
    assert_eq!(rec.operator(), "4Z1KD");
    assert_eq!(rec.call(), "W1ABC");
    assert_eq!(rec.stx_string(), "KM72A");
    assert_eq!(rec.srx_string(), "599");
    assert_eq!(rec.comment(), "tu");

    let back = rec.to_parsed();
    assert_eq!(back.len(), Field::ALL.len());
    assert!(!back.contains_key("RST_SENT"));
}

#[test]
fn parse_all_preserves_order_and_cardinality() {
    let raws = ["<CALL:4>A1AA", "garbage", "", "<CALL:4>C1CC"];
    let records = parse_all(raws);

    assert_eq!(records.len(), 4);
    assert_eq!(records[0].call(), "A1AA");
    assert_eq!(records[1], NormalizedRecord::default());
    assert_eq!(records[2], NormalizedRecord::default());
    assert_eq!(records[3].call(), "C1CC");
    assert_eq!(normalize(raws), records);
}

#[test]
fn project_is_idempotent() {
    let rec = project(&parse("<CALL:5>W1ABC<COMMENT:9>KM72A 73!"));
    assert_eq!(project(&rec.to_parsed()), rec);
}
