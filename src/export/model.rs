// src/export/model.rs

use crate::models::{EventRecord, RecordId};
use crate::utils::date::extract_date_range;
use serde::Serialize;

/// Flat row for CSV / JSON export of the filtered view.
#[derive(Serialize, Clone, Debug)]
pub struct RecordExport {
    pub id: RecordId,
    pub year: String,
    pub title: String,
    pub date: String,
    /// Last year of a `DD/MM/YYYY - DD/MM/YYYY` range, empty otherwise.
    pub end_year: String,
    pub watched: bool,
    pub pinned: bool,
    pub level: String,
    pub classification: String,
    pub format: String,
    pub period: String,
    pub platforms: String,
    pub rating: String,
}

impl RecordExport {
    /// `pinned` must come from the pinned store.
    pub fn from_record(record: &EventRecord, pinned: bool) -> Self {
        let date = record.event_date();
        let range = extract_date_range(date.as_deref());
        Self {
            id: record.id,
            year: record.display_year(),
            title: record.title.clone(),
            date: date.unwrap_or_default(),
            end_year: range.end_year.unwrap_or_default(),
            watched: record.is_watched(),
            pinned,
            level: record.level().as_str().to_string(),
            classification: record.classification().unwrap_or_default(),
            format: record.format().unwrap_or_default(),
            period: record.period().unwrap_or_default(),
            platforms: record.platforms().join(", "),
            rating: record.rating_raw().unwrap_or_default(),
        }
    }
}
