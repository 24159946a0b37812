//! Summary counts over the filtered subset.

use crate::models::{EventRecord, RecordId};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

pub const UNCLASSIFIED: &str = "Unclassified";
pub const TOP_PLATFORMS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub selected: usize,
    pub total: usize,
    pub watched: usize,
    pub watched_percent: u32,
    pub pinned: usize,
    pub pinned_percent: u32,
    /// Alphabetical by label.
    pub classifications: Vec<(String, usize)>,
    /// Most frequent first, ties alphabetical.
    pub top_platforms: Vec<(String, usize)>,
}

/// Rounded percentage; a zero divisor yields 0.
pub fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 * 100.0) / whole as f64).round() as u32
}

/// Pinned counts come from `is_pinned` (the store), never the record flag.
pub fn compute_stats(
    filtered: &[&EventRecord],
    total: usize,
    is_pinned: &dyn Fn(RecordId) -> bool,
) -> Summary {
    let selected = filtered.len();
    let watched = filtered.iter().filter(|r| r.is_watched()).count();
    let pinned = filtered.iter().filter(|r| is_pinned(r.id)).count();

    let mut classifications: BTreeMap<String, usize> = BTreeMap::new();
    let mut platforms: HashMap<String, usize> = HashMap::new();

    for record in filtered {
        let class = record
            .classification()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| UNCLASSIFIED.to_string());
        *classifications.entry(class).or_default() += 1;

        for platform in record.platforms() {
            *platforms.entry(platform).or_default() += 1;
        }
    }

    let mut top_platforms: Vec<(String, usize)> = platforms.into_iter().collect();
    top_platforms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    top_platforms.truncate(TOP_PLATFORMS);

    Summary {
        selected,
        total,
        watched,
        watched_percent: percent(watched, selected),
        pinned,
        pinned_percent: percent(pinned, selected),
        classifications: classifications.into_iter().collect(),
        top_platforms,
    }
}
