//! Grid-square lookup, area extraction, and per-spotter summaries.

/// Area-token search and spotter resolution.
pub mod extractor;
/// Per-spotter area and region roll-ups.
pub mod regions;
/// Region-keyed area lookup table.
pub mod table;
