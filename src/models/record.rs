use super::event_level::EventLevel;
use crate::utils::date::extract_year;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Stable record identity: original dataset index + 1.
pub type RecordId = u32;

// Raw dataset field names.
pub const F_EVENT_DATE: &str = "EventDate";
pub const F_EVENT_YEAR: &str = "EventYear";
pub const F_CLASSIFICATION: &str = "Classification";
pub const F_FORMAT: &str = "Format";
pub const F_PERIOD: &str = "Period";
pub const F_WATCH_ON: &str = "WatchOn";
pub const F_PLATFORM: &str = "Platform";
pub const F_HISTORICAL_ACCURACY: &str = "HistoricalAccuracy";
pub const F_RATING: &str = "Rating";
pub const F_SHORT_DESCRIPTION: &str = "ShortDescription";
pub const F_NOTES: &str = "Notes";
pub const F_WIKIPEDIA: &str = "Wikipedia";
pub const F_EVENT_LEVEL: &str = "EventLevel";

/// Field-name overrides for the few fields whose name varies per dataset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldMap {
    #[serde(default = "default_title_field")]
    pub title: String,
    #[serde(default = "default_watched_field")]
    pub watched: String,
    #[serde(default = "default_pinned_field")]
    pub pinned: String,
}

fn default_title_field() -> String {
    "Title".to_string()
}
fn default_watched_field() -> String {
    "Watched".to_string()
}
fn default_pinned_field() -> String {
    "Pinned".to_string()
}

impl Default for FieldMap {
    fn default() -> Self {
        Self {
            title: default_title_field(),
            watched: default_watched_field(),
            pinned: default_pinned_field(),
        }
    }
}

/// One timeline entry.
///
/// The raw field map is kept as loaded; `title`, `watched` and `pinned` are
/// resolved once through the [`FieldMap`]. `pinned` is only a mirror of the
/// pinned store, `None` when the record is not pin-tracked at all.
#[derive(Debug, Clone, Serialize)]
pub struct EventRecord {
    pub id: RecordId,
    pub title: String,
    pub watched: Option<String>,
    pub pinned: Option<bool>,
    fields: Map<String, Value>,
}

impl EventRecord {
    pub fn from_raw(id: RecordId, fields: Map<String, Value>, field_map: &FieldMap) -> Self {
        let title = fields
            .get(&field_map.title)
            .and_then(value_to_string)
            .unwrap_or_default();
        let watched = fields.get(&field_map.watched).and_then(value_to_string);
        let pinned = fields.get(&field_map.pinned).map(value_is_truthy);

        Self {
            id,
            title,
            watched,
            pinned,
            fields,
        }
    }

    /// String form of a raw field; `None` when absent or null.
    pub fn field(&self, name: &str) -> Option<String> {
        self.fields.get(name).and_then(value_to_string)
    }

    fn first_field(&self, names: &[&str]) -> Option<String> {
        names.iter().find_map(|n| self.field(n))
    }

    /// Raw event date, falling back to `EventYear`.
    pub fn event_date(&self) -> Option<String> {
        self.first_field(&[F_EVENT_DATE, F_EVENT_YEAR])
    }

    /// Year bucket key, always derived from the raw date.
    pub fn display_year(&self) -> String {
        extract_year(self.event_date().as_deref())
    }

    pub fn is_watched(&self) -> bool {
        self.watched
            .as_deref()
            .is_some_and(|w| w.trim().eq_ignore_ascii_case("yes"))
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned.unwrap_or(false)
    }

    pub fn classification(&self) -> Option<String> {
        self.field(F_CLASSIFICATION)
    }

    pub fn format(&self) -> Option<String> {
        self.field(F_FORMAT)
    }

    pub fn period(&self) -> Option<String> {
        self.field(F_PERIOD)
    }

    /// Raw comma-separated platform text.
    pub fn platforms_raw(&self) -> Option<String> {
        self.first_field(&[F_WATCH_ON, F_PLATFORM])
    }

    /// Platform names, trimmed, empty entries dropped.
    pub fn platforms(&self) -> Vec<String> {
        self.platforms_raw()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn rating_raw(&self) -> Option<String> {
        self.first_field(&[F_HISTORICAL_ACCURACY, F_RATING])
    }

    /// Parse an `"N/5"` rating into `(N, 5)`.
    pub fn rating(&self) -> Option<(u8, u8)> {
        let raw = self.rating_raw()?;
        let parsed = raw.split_once('/').and_then(|(n, d)| {
            let n = n.trim().parse::<u8>().ok()?;
            let d = d.trim().parse::<u8>().ok()?;
            (d > 0 && n <= d).then_some((n, d))
        });

        if parsed.is_none() {
            log::warn!("record {}: unrecognized rating '{}'", self.id, raw);
        }
        parsed
    }

    pub fn short_description(&self) -> Option<String> {
        self.field(F_SHORT_DESCRIPTION)
    }

    pub fn notes(&self) -> Option<String> {
        self.field(F_NOTES)
    }

    /// Wikipedia link: URLs are kept, bare topics are turned into a page URL.
    pub fn wikipedia_url(&self) -> Option<String> {
        let raw = self.field(F_WIKIPEDIA)?;
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Some(raw.to_string())
        } else {
            Some(format!(
                "https://en.wikipedia.org/wiki/{}",
                raw.replace(' ', "_")
            ))
        }
    }

    pub fn level(&self) -> EventLevel {
        EventLevel::from_tag(self.field(F_EVENT_LEVEL).as_deref())
    }

    /// Lower-cased, whitespace-joined text of every field value.
    pub fn search_text(&self) -> String {
        self.fields
            .values()
            .filter_map(value_to_string)
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }
}

fn value_to_string(v: &Value) -> Option<String> {
    match v {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(value_to_string)
                .collect::<Vec<_>>()
                .join(", "),
        ),
        Value::Object(_) => Some(v.to_string()),
    }
}

fn value_is_truthy(v: &Value) -> bool {
    match v {
        Value::Bool(b) => *b,
        Value::String(s) => matches!(s.trim().to_lowercase().as_str(), "yes" | "true" | "1"),
        Value::Number(n) => n.as_i64().is_some_and(|n| n != 0),
        _ => false,
    }
}
