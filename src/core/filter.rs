//! Filter predicate engine.
//!
//! A [`FilterState`] is a plain snapshot of every filter control. It is
//! compiled once per pass into a [`CompiledFilter`]; a record passes only if
//! every axis accepts it (free-text keywords, `field:value` tags, selects,
//! the pinned axis, hide-watched). Filtering is stable: the output keeps the
//! dataset order.

use crate::models::{EventRecord, RecordId};
use clap::ValueEnum;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PinnedSelect {
    Yes,
    No,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Free text with optional inline `field:value` tags.
    pub query: String,
    pub format: Option<String>,
    pub classification: Option<String>,
    pub platform: Option<String>,
    pub year: Option<String>,
    pub period: Option<String>,
    pub watched: Option<String>,
    pub pinned: Option<PinnedSelect>,
    pub hide_watched: bool,
    pub hide_pinned: bool,
    /// Hide everything already watched or pinned.
    pub challenge: bool,
}

impl FilterState {
    pub fn is_empty(&self) -> bool {
        *self == FilterState::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FieldTag {
    Title,
    Platform,
    Classification,
    Period,
    Year,
    Watched,
}

impl FieldTag {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "title" => Some(FieldTag::Title),
            "platform" => Some(FieldTag::Platform),
            "classification" => Some(FieldTag::Classification),
            "period" => Some(FieldTag::Period),
            "year" => Some(FieldTag::Year),
            "watched" => Some(FieldTag::Watched),
            _ => None,
        }
    }
}

/// Free text split into field tags and residual keywords, all lower-cased.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedQuery {
    pub tags: BTreeMap<FieldTag, String>,
    pub keywords: Vec<String>,
}

/// Split on whitespace; `field:value` tokens naming a known field become
/// tags (last one wins), everything else is a keyword.
pub fn parse_query(query: &str) -> ParsedQuery {
    let mut parsed = ParsedQuery::default();

    for token in query.split_whitespace() {
        let tag = token.split_once(':').and_then(|(field, value)| {
            let value = value.trim();
            if value.is_empty() {
                return None;
            }
            FieldTag::from_name(field).map(|t| (t, value.to_lowercase()))
        });

        match tag {
            Some((t, value)) => {
                parsed.tags.insert(t, value);
            }
            None => parsed.keywords.push(token.to_lowercase()),
        }
    }

    parsed
}

#[derive(Debug, Clone)]
pub struct CompiledFilter {
    query: ParsedQuery,
    format: Option<String>,
    classification: Option<String>,
    platform: Option<String>,
    year: Option<String>,
    period: Option<String>,
    watched: Option<String>,
    pinned: Option<PinnedSelect>,
    hide_watched: bool,
    hide_pinned: bool,
    challenge: bool,
}

/// Non-empty select values only, trimmed and lower-cased.
fn select(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_lowercase)
}

fn contains_ci(field: Option<String>, needle: &str) -> bool {
    field.is_some_and(|f| f.to_lowercase().contains(needle))
}

fn equals_ci(field: Option<String>, expected: &str) -> bool {
    field.unwrap_or_default().trim().to_lowercase() == expected
}

impl CompiledFilter {
    pub fn compile(state: &FilterState) -> Self {
        Self {
            query: parse_query(&state.query),
            format: select(&state.format),
            classification: select(&state.classification),
            platform: select(&state.platform),
            year: select(&state.year),
            period: select(&state.period),
            watched: select(&state.watched),
            pinned: state.pinned,
            hide_watched: state.hide_watched,
            hide_pinned: state.hide_pinned,
            challenge: state.challenge,
        }
    }

    /// `is_pinned` must answer from the pinned store, not the record flag.
    pub fn matches(&self, record: &EventRecord, is_pinned: &dyn Fn(RecordId) -> bool) -> bool {
        self.keywords_match(record)
            && self.tags_match(record)
            && self.selects_match(record)
            && self.pinned_axis_match(record, is_pinned)
            && !(self.hide_watched && record.is_watched())
    }

    fn keywords_match(&self, record: &EventRecord) -> bool {
        if self.query.keywords.is_empty() {
            return true;
        }
        let haystack = record.search_text();
        self.query.keywords.iter().all(|k| haystack.contains(k))
    }

    fn tags_match(&self, record: &EventRecord) -> bool {
        self.query.tags.iter().all(|(tag, value)| match tag {
            FieldTag::Title => contains_ci(Some(record.title.clone()), value),
            FieldTag::Platform => contains_ci(record.platforms_raw(), value),
            FieldTag::Classification => contains_ci(record.classification(), value),
            FieldTag::Period => contains_ci(record.period(), value),
            FieldTag::Year => equals_ci(Some(record.display_year()), value),
            FieldTag::Watched => equals_ci(record.watched.clone(), value),
        })
    }

    fn selects_match(&self, record: &EventRecord) -> bool {
        if let Some(p) = &self.platform
            && !contains_ci(record.platforms_raw(), p)
        {
            return false;
        }
        if let Some(c) = &self.classification
            && !equals_ci(record.classification(), c)
        {
            return false;
        }
        if let Some(p) = &self.period
            && !equals_ci(record.period(), p)
        {
            return false;
        }
        if let Some(f) = &self.format
            && !equals_ci(record.format(), f)
        {
            return false;
        }
        if let Some(w) = &self.watched
            && !equals_ci(record.watched.clone(), w)
        {
            return false;
        }
        if let Some(y) = &self.year
            && !equals_ci(Some(record.display_year()), y)
        {
            return false;
        }
        true
    }

    /// Records without pin tracking only face the challenge-mode watched
    /// exclusion.
    fn pinned_axis_match(&self, record: &EventRecord, is_pinned: &dyn Fn(RecordId) -> bool) -> bool {
        let watched = record.is_watched();

        if record.pinned.is_none() {
            return !(self.challenge && watched);
        }

        let pinned = is_pinned(record.id);
        match self.pinned {
            Some(PinnedSelect::Yes) if !pinned => return false,
            Some(PinnedSelect::No) if pinned => return false,
            _ => {}
        }
        if self.hide_pinned && pinned {
            return false;
        }
        !(self.challenge && (watched || pinned))
    }
}

/// Stable filter over the dataset.
pub fn filter_records<'a>(
    records: &'a [EventRecord],
    state: &FilterState,
    is_pinned: &dyn Fn(RecordId) -> bool,
) -> Vec<&'a EventRecord> {
    let compiled = CompiledFilter::compile(state);
    records
        .iter()
        .filter(|r| compiled.matches(r, is_pinned))
        .collect()
}
