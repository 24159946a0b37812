mod common;

use common::{records_from, sample_records};
use rtimeline::core::grouping::{YearKey, group_by_year};
use rtimeline::models::RecordId;
use rtimeline::utils::date::UNKNOWN_YEAR;
use serde_json::json;

fn layout(records: &[rtimeline::models::EventRecord]) -> Vec<(String, Vec<RecordId>)> {
    group_by_year(records)
        .iter()
        .map(|b| {
            (
                b.label().to_string(),
                b.records.iter().map(|r| r.id).collect(),
            )
        })
        .collect()
}

#[test]
fn test_sample_dataset_groups() {
    let records = sample_records();
    assert_eq!(
        layout(&records),
        vec![
            ("1939".to_string(), vec![3, 4]),
            ("1940".to_string(), vec![1]),
            ("1942".to_string(), vec![2]),
            (UNKNOWN_YEAR.to_string(), vec![5]),
        ]
    );
}

#[test]
fn test_years_ascend_and_unknown_is_last() {
    let records = records_from(json!([
        { "Title": "a", "EventDate": "2001" },
        { "Title": "b" },
        { "Title": "c", "EventDate": "1999" },
        { "Title": "d", "EventDate": "2001" }
    ]));
    assert_eq!(
        layout(&records),
        vec![
            ("1999".to_string(), vec![3]),
            ("2001".to_string(), vec![1, 4]),
            (UNKNOWN_YEAR.to_string(), vec![2]),
        ]
    );
}

#[test]
fn test_event_year_is_a_fallback() {
    let records = records_from(json!([
        { "Title": "a", "EventYear": 1815 },
        { "Title": "b", "EventDate": "1914", "EventYear": "1999" }
    ]));
    assert_eq!(
        layout(&records),
        vec![
            ("1815".to_string(), vec![1]),
            ("1914".to_string(), vec![2]),
        ]
    );
}

#[test]
fn test_year_key_order() {
    let mut keys = vec![
        YearKey::Unknown,
        YearKey::from_label("Ancient"),
        YearKey::from_label("2001"),
        YearKey::from_label(UNKNOWN_YEAR),
        YearKey::from_label("0476"),
        YearKey::from_label("Antiquity"),
    ];
    keys.sort();
    let labels: Vec<&str> = keys.iter().map(YearKey::label).collect();
    assert_eq!(
        labels,
        vec!["0476", "2001", "Ancient", "Antiquity", UNKNOWN_YEAR, UNKNOWN_YEAR]
    );
}

#[test]
fn test_bucket_sizes_cover_input() {
    let records = sample_records();
    let buckets = group_by_year(&records);
    let total: usize = buckets.iter().map(|b| b.len()).sum();
    assert_eq!(total, records.len());
    assert!(buckets.iter().all(|b| !b.is_empty()));
}

#[test]
fn test_empty_input_has_no_buckets() {
    let records = records_from(json!([]));
    assert!(group_by_year(&records).is_empty());
}
