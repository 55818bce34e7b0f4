//! Grid-square area extraction from amateur-radio contact logs.
//!
//! Raw ADIF-style records are parsed into a fixed eight-field schema, then
//! scanned for area tokens known to an [`area::table::AreaLookupTable`]. Each
//! hit becomes an [`record::OutputEntry`] crediting the configured spotter.
//!
//! # Examples
//!
//! Synchronous usage with [`parser::normalize`] and [`area::extractor::extract`]:
//! ```
//! use arealog::{
//!     area::{extractor::extract, table::AreaLookupTable},
//!     parser::normalize,
//! };
//!
//! let table = AreaLookupTable::from_tokens(["KM72A"]).expect("table");
//! let records = normalize([
//!     "<QSO_DATE:8>20240101<FREQ:6>14.205<STATION_CALLSIGN:5>4Z1KD\
//!      <CALL:5>W1ABC<STX_STRING:5>KM72A",
//! ]);
//! let entries = extract(&records, &table, "4Z1KD");
//! assert_eq!(entries.len(), 1);
//! assert_eq!(entries[0].area, "KM72A");
//! assert_eq!(entries[0].spotter, "4Z1KD");
//! ```
//!
//! Runtime usage over a whole log file:
//! ```no_run
//! use std::sync::Arc;
//!
//! use arealog::{
//!     area::table::AreaLookupTable,
//!     runtime::handle::{spawn_ingest, IngestConfig},
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let table = AreaLookupTable::load("areas.json").expect("load table");
//! let handle = spawn_ingest(Arc::new(table), IngestConfig::default());
//! let log = std::fs::read_to_string("contest.adi").expect("read log");
//! let entries = handle.ingest_log(log, "4Z1KD").await.expect("ingest");
//! println!("{} area entries", entries.len());
//! handle.shutdown().await.expect("shutdown");
//! # }
//! ```
#![deny(missing_docs)]

/// Area lookup, extraction, and summaries.
pub mod area;
/// Log-file splitting and the synchronous pipeline.
pub mod ingest;
/// Tag parser and schema projection.
pub mod parser;
/// Record and output entry types.
pub mod record;
/// Async ingest runtime handle and events.
pub mod runtime;
/// Shared primitive types and constants.
pub mod types;
