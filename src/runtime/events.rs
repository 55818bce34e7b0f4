//! Runtime event stream payloads.

/// Events emitted from the ingest runtime loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestEvent {
    /// A log was split and normalized.
    Normalized {
        /// Spotter the log was ingested for.
        spotter: String,
        /// Records found in the log.
        records: usize,
    },
    /// Area entries were extracted from a batch.
    Extracted {
        /// Spotter the batch was ingested for.
        spotter: String,
        /// Entries emitted.
        entries: usize,
    },
}
