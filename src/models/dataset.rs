//! Dataset loading: a JSON array of raw records from a file or URL.

use super::record::{EventRecord, FieldMap, RecordId};
use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde_json::Value;
use std::fs;

/// Fetch and parse the dataset at `data_url`.
///
/// - `http(s)://` → fetched; any non-success status is fatal
/// - `file://` or a plain path → read from disk (`~` expanded)
pub fn load_dataset(data_url: Option<&str>, field_map: &FieldMap) -> AppResult<Vec<EventRecord>> {
    let url = data_url
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::Config("settings.dataUrl is not set".into()))?;

    let body = if url.starts_with("http://") || url.starts_with("https://") {
        fetch_remote(url)?
    } else {
        let path = expand_tilde(url.strip_prefix("file://").unwrap_or(url));
        fs::read_to_string(&path).map_err(|e| {
            AppError::DatasetFetch(format!("cannot read '{}': {e}", path.display()))
        })?
    };

    parse_dataset(&body, field_map)
}

fn fetch_remote(url: &str) -> AppResult<String> {
    let response = reqwest::blocking::Client::new()
        .get(url)
        .header("User-Agent", "rtimeline")
        .send()?;

    let status = response.status();
    if !status.is_success() {
        return Err(AppError::DatasetFetch(format!("GET {url} returned {status}")));
    }

    Ok(response.text()?)
}

/// Parse a JSON array into records. Element `i` becomes record `i + 1`;
/// non-object elements are skipped without shifting the other ids.
pub fn parse_dataset(body: &str, field_map: &FieldMap) -> AppResult<Vec<EventRecord>> {
    let value: Value = serde_json::from_str(body)?;

    let Value::Array(items) = value else {
        return Err(AppError::DatasetFetch(
            "dataset must be a JSON array of records".into(),
        ));
    };

    let mut records = Vec::with_capacity(items.len());
    for (idx, item) in items.into_iter().enumerate() {
        let id = (idx + 1) as RecordId;
        match item {
            Value::Object(map) => records.push(EventRecord::from_raw(id, map, field_map)),
            other => log::warn!("dataset entry {id} is not an object ({other}), skipped"),
        }
    }

    Ok(records)
}
