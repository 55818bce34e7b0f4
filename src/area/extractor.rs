//! Area-token search and spotter resolution over normalized records.

use tracing::debug;

use crate::{
    record::{Field, NormalizedRecord, OutputEntry},
    types::{AREA_TOKEN_LEN, REGION_KEY_LEN},
};

use super::table::AreaLookupTable;

/// Extracts area hits for one batch of records logged by one spotter.
#[derive(Debug, Clone, Copy)]
pub struct AreaSpotterExtractor<'a> {
    table: &'a AreaLookupTable,
    spotter: &'a str,
}

impl<'a> AreaSpotterExtractor<'a> {
    /// Creates an extractor over `table` for the batch logged by `spotter`.
    pub fn new(table: &'a AreaLookupTable, spotter: &'a str) -> Self {
        Self { table, spotter }
    }

    /// Configured spotter callsign.
    pub fn spotter(&self) -> &str {
        self.spotter
    }

    /// Returns the first word of `text` that is a valid area token.
    ///
    /// The text is upper-cased and stripped of everything except `A-Z`,
    /// `0-9` and spaces, then split on whitespace. Words are tried left to
    /// right; only words of exactly five characters are candidates.
    pub fn find_area_token(&self, text: &str) -> Option<String> {
        let cleaned: String = text
            .to_uppercase()
            .chars()
            .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || *c == ' ')
            .collect();

        cleaned
            .split_whitespace()
            .find(|word| {
                if word.len() != AREA_TOKEN_LEN {
                    return false;
                }
                // Region key first, then membership within that region.
                let key = &word[AREA_TOKEN_LEN - REGION_KEY_LEN..];
                self.table
                    .region(key)
                    .is_some_and(|tokens| tokens.contains(*word))
            })
            .map(str::to_string)
    }

    /// One token per candidate field that holds one, scanning `STX_STRING`,
    /// `SRX_STRING`, then `COMMENT`. Duplicates across fields are kept.
    pub fn extract_areas(&self, record: &NormalizedRecord) -> Vec<String> {
        Field::AREA_CANDIDATES
            .iter()
            .map(|field| record.get(*field))
            .filter(|value| !value.is_empty())
            .filter_map(|value| self.find_area_token(value))
            .collect()
    }

    /// The configured spotter when it is the record's station callsign or
    /// operator; empty otherwise. `CALL` is never consulted.
    pub fn resolve_counterpart_spotter(&self, record: &NormalizedRecord) -> String {
        if record.station_callsign() == self.spotter || record.operator() == self.spotter {
            self.spotter.to_string()
        } else {
            String::new()
        }
    }

    /// Emits one entry per area token, in record order then candidate-field
    /// order.
    pub fn extract(&self, records: &[NormalizedRecord]) -> Vec<OutputEntry> {
        let mut out = Vec::new();
        for record in records {
            let areas = self.extract_areas(record);
            if areas.is_empty() {
                continue;
            }
            let spotter = self.resolve_counterpart_spotter(record);
            out.extend(areas.into_iter().map(|area| OutputEntry {
                date: record.qso_date().to_string(),
                freq: record.freq().to_string(),
                spotter: spotter.clone(),
                dx: record.call().to_string(),
                area,
            }));
        }
        debug!(
            spotter = self.spotter,
            records = records.len(),
            entries = out.len(),
            "extracted area entries"
        );
        out
    }
}

/// Extracts area entries from `records` for the batch logged by `spotter`.
pub fn extract(
    records: &[NormalizedRecord],
    table: &AreaLookupTable,
    spotter: &str,
) -> Vec<OutputEntry> {
    AreaSpotterExtractor::new(table, spotter).extract(records)
}
