//! Whole-log splitting and the synchronous ingest pipeline.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::{
    area::{extractor::AreaSpotterExtractor, table::AreaLookupTable},
    parser,
    record::{OutputEntry, ParsedRecord},
};

static EOH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<eoh>").expect("header terminator regex is valid"));
static EOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<eor>").expect("record terminator regex is valid"));

/// Splits a log file's text into raw per-contact records.
///
/// Text up to and including `<EOH>` is the file header and is skipped. The
/// rest is split on `<EOR>`; both markers match case-insensitively. Blank
/// segments are dropped, and a trailing segment with no closing `<EOR>` is
/// kept so truncated files still yield their last contact.
pub fn split_records(log: &str) -> Vec<&str> {
    let body = match EOH_RE.find(log) {
        Some(m) => &log[m.end()..],
        None => log,
    };

    EOR_RE
        .split(body)
        .filter(|segment| !segment.trim().is_empty())
        .collect()
}

/// Tags found in the header section, empty when the log has no `<EOH>`.
pub fn header_fields(log: &str) -> ParsedRecord {
    EOH_RE
        .find(log)
        .map(|m| parser::parse(&log[..m.start()]))
        .unwrap_or_default()
}

/// Splits, normalizes, and extracts a whole log in one pass.
pub fn ingest_log(log: &str, table: &AreaLookupTable, spotter: &str) -> Vec<OutputEntry> {
    let raws = split_records(log);
    let records = parser::normalize(&raws);
    let entries = AreaSpotterExtractor::new(table, spotter).extract(&records);
    debug!(
        spotter,
        records = records.len(),
        entries = entries.len(),
        "ingested log"
    );
    entries
}
