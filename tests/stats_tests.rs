mod common;

use common::{records_from, sample_records};
use rtimeline::core::stats::{UNCLASSIFIED, compute_stats, percent};
use rtimeline::models::EventRecord;
use serde_json::json;

fn all(records: &[EventRecord]) -> Vec<&EventRecord> {
    records.iter().collect()
}

#[test]
fn test_percent_rounds_and_handles_zero() {
    assert_eq!(percent(0, 0), 0);
    assert_eq!(percent(1, 3), 33);
    assert_eq!(percent(2, 3), 67);
    assert_eq!(percent(4, 4), 100);
}

#[test]
fn test_half_watched() {
    let records = records_from(json!([
        { "Title": "a", "Watched": "Yes" },
        { "Title": "b", "Watched": "no" },
        { "Title": "c", "Watched": " yes " },
        { "Title": "d" }
    ]));
    let summary = compute_stats(&all(&records), 10, &|_| false);
    assert_eq!(summary.selected, 4);
    assert_eq!(summary.total, 10);
    assert_eq!(summary.watched, 2);
    assert_eq!(summary.watched_percent, 50);
    assert_eq!(summary.pinned_percent, 0);
}

#[test]
fn test_empty_selection() {
    let summary = compute_stats(&[], 5, &|_| true);
    assert_eq!(summary.selected, 0);
    assert_eq!(summary.watched_percent, 0);
    assert_eq!(summary.pinned_percent, 0);
    assert!(summary.classifications.is_empty());
    assert!(summary.top_platforms.is_empty());
}

#[test]
fn test_classification_histogram() {
    let records = sample_records();
    let summary = compute_stats(&all(&records), records.len(), &|_| false);
    assert_eq!(
        summary.classifications,
        vec![
            ("Drama".to_string(), 2),
            (UNCLASSIFIED.to_string(), 2),
            ("War".to_string(), 1),
        ]
    );
}

#[test]
fn test_top_platforms_ranked_and_capped() {
    let records = records_from(json!([
        { "Title": "a", "WatchOn": "Netflix, Prime, Zulu" },
        { "Title": "b", "WatchOn": "Prime, Apple" },
        { "Title": "c", "WatchOn": "Netflix,Prime" },
        { "Title": "d", "Platform": "BBC, Mubi, " },
        { "Title": "e" }
    ]));
    let summary = compute_stats(&all(&records), records.len(), &|_| false);
    assert_eq!(
        summary.top_platforms,
        vec![
            ("Prime".to_string(), 3),
            ("Netflix".to_string(), 2),
            ("Apple".to_string(), 1),
            ("BBC".to_string(), 1),
            ("Mubi".to_string(), 1),
        ]
    );
}

#[test]
fn test_pinned_count_uses_the_store() {
    let records = records_from(json!([
        { "Title": "a", "Pinned": true },
        { "Title": "b", "Pinned": false },
        { "Title": "c", "Pinned": false }
    ]));
    // store disagrees with the record flags
    let summary = compute_stats(&all(&records), 3, &|id| id == 2 || id == 3);
    assert_eq!(summary.pinned, 2);
    assert_eq!(summary.pinned_percent, 67);
}
