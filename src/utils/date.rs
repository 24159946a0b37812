//! Year extraction from the free-form date strings found in datasets.
//!
//! Dates arrive as `"1945"`, `"1939-1945"`, `"01/09/1939 - 02/09/1945"`,
//! `"Build up to war 1939"` and worse. Everything here is total: a string
//! that cannot be understood becomes [`UNKNOWN_YEAR`] and a data-quality
//! warning, never an error.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Sentinel bucket for records whose date yields no year.
pub const UNKNOWN_YEAR: &str = "Unknown Year";

static EXACT_YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}$").unwrap());
static YEAR_RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})\s*[-–]\s*(\d{4})$").unwrap());
static TRAILING_YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d{4})$").unwrap());
static ANY_YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{4}").unwrap());
static FULL_DATE_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{1,2}/\d{1,2}/(\d{4})\s*[-–]\s*\d{1,2}/\d{1,2}/(\d{4})$").unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start_year: String,
    pub end_year: Option<String>,
}

/// Normalize a raw date into the display year used for grouping.
///
/// Priority: exact `YYYY`, then `YYYY-YYYY` / `YYYY–YYYY` (first year),
/// then a year at the end of the string, then the first year anywhere.
pub fn extract_year(raw: Option<&str>) -> String {
    let trimmed = match raw.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => {
            log::warn!("empty event date, using '{UNKNOWN_YEAR}'");
            return UNKNOWN_YEAR.to_string();
        }
    };

    if EXACT_YEAR.is_match(trimmed) {
        return trimmed.to_string();
    }

    if let Some(caps) = YEAR_RANGE.captures(trimmed) {
        return caps[1].to_string();
    }

    if let Some(caps) = TRAILING_YEAR.captures(trimmed) {
        return caps[1].to_string();
    }

    if let Some(m) = ANY_YEAR.find(trimmed) {
        return m.as_str().to_string();
    }

    log::warn!("unrecognized date format '{trimmed}', using '{UNKNOWN_YEAR}'");
    UNKNOWN_YEAR.to_string()
}

/// Like [`extract_year`], but also recognizes `DD/MM/YYYY - DD/MM/YYYY`
/// and reports both boundary years.
pub fn extract_date_range(raw: Option<&str>) -> DateRange {
    if let Some(caps) = raw.and_then(|s| FULL_DATE_RANGE.captures(s.trim())) {
        return DateRange {
            start_year: caps[1].to_string(),
            end_year: Some(caps[2].to_string()),
        };
    }

    DateRange {
        start_year: extract_year(raw),
        end_year: None,
    }
}

pub fn is_unknown_year(year: &str) -> bool {
    year == UNKNOWN_YEAR
}
