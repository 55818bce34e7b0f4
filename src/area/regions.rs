//! Per-spotter area and region roll-ups.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{
    record::OutputEntry,
    types::{AreaToken, Callsign, RegionKey, region_key_of},
};

/// Distinct region keys of `areas`, sorted. Areas shorter than a region key
/// are skipped.
pub fn regions_from_areas<I, S>(areas: I) -> Vec<RegionKey>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    areas
        .into_iter()
        .filter_map(|area| region_key_of(area.as_ref()).map(str::to_string))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct areas and regions worked by one spotter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaSummary {
    /// Spotter the summary belongs to.
    pub callsign: Callsign,
    /// Distinct areas, sorted.
    pub areas: Vec<AreaToken>,
    /// Distinct regions of `areas`, sorted.
    pub regions: Vec<RegionKey>,
    /// `areas.len()`.
    pub total_areas: usize,
    /// `regions.len()`.
    pub total_regions: usize,
}

impl AreaSummary {
    /// Collapses `entries` on `(spotter, area)` and keeps those credited to
    /// `callsign`.
    pub fn for_spotter<'a>(
        callsign: &str,
        entries: impl IntoIterator<Item = &'a OutputEntry>,
    ) -> Self {
        let areas: Vec<AreaToken> = entries
            .into_iter()
            .filter(|entry| entry.spotter == callsign)
            .map(|entry| entry.area.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let regions = regions_from_areas(&areas);

        Self {
            callsign: callsign.to_string(),
            total_areas: areas.len(),
            total_regions: regions.len(),
            areas,
            regions,
        }
    }
}
