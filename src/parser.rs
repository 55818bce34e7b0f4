//! Tolerant tag parser for ADIF-style contact records.
//!
//! A raw record is a run of `<NAME:LENGTH>VALUE` tags. The declared length is
//! matched but never used to slice: a value ends at the next `<` or at the end
//! of input, which keeps logs with wrong length annotations readable.
//! Parsing never fails; text without any tag yields an empty map.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::record::{NormalizedRecord, ParsedRecord};

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([^:>]+):(\d+)>([^<]*)").expect("tag regex is valid"));

/// Parses every tag of `raw`, left to right. A repeated tag overwrites the
/// earlier value.
pub fn parse(raw: &str) -> ParsedRecord {
    let mut out = ParsedRecord::new();
    for caps in TAG_RE.captures_iter(raw) {
        let (_, [name, _len, value]) = caps.extract();
        out.insert(name.trim().to_uppercase(), value.trim().to_string());
    }
    if out.is_empty() && !raw.trim().is_empty() {
        trace!(len = raw.len(), "record without recognizable tags");
    }
    out
}

/// Projects a parsed record onto the fixed eight-field schema.
pub fn project(parsed: &ParsedRecord) -> NormalizedRecord {
    NormalizedRecord::from_parsed(parsed)
}

/// Parses and projects each raw record, preserving order and count.
pub fn parse_all<I, S>(raws: I) -> Vec<NormalizedRecord>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raws.into_iter()
        .map(|raw| project(&parse(raw.as_ref())))
        .collect()
}

/// Batch entry point used by callers normalizing an uploaded log.
pub fn normalize<I, S>(raws: I) -> Vec<NormalizedRecord>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parse_all(raws)
}
