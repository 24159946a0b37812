use crate::models::EventRecord;
use crate::utils::date::{UNKNOWN_YEAR, extract_year, is_unknown_year};
use std::collections::BTreeMap;

/// Bucket key with a total order: numeric years ascending, then any
/// non-numeric label alphabetically, then the unknown-year sentinel.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum YearKey {
    Numeric(i64, String),
    Other(String),
    Unknown,
}

impl YearKey {
    pub fn from_label(label: &str) -> Self {
        if is_unknown_year(label) {
            return YearKey::Unknown;
        }
        match label.trim().parse::<i64>() {
            Ok(n) => YearKey::Numeric(n, label.to_string()),
            Err(_) => YearKey::Other(label.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            YearKey::Numeric(_, s) | YearKey::Other(s) => s,
            YearKey::Unknown => UNKNOWN_YEAR,
        }
    }
}

#[derive(Debug, Clone)]
pub struct YearBucket<'a> {
    pub key: YearKey,
    pub records: Vec<&'a EventRecord>,
}

impl YearBucket<'_> {
    pub fn label(&self) -> &str {
        self.key.label()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Partition records into display-ordered year buckets. Within a bucket the
/// input order is kept.
pub fn group_by_year<'a, I>(records: I) -> Vec<YearBucket<'a>>
where
    I: IntoIterator<Item = &'a EventRecord>,
{
    let mut buckets: BTreeMap<YearKey, Vec<&'a EventRecord>> = BTreeMap::new();

    for record in records {
        let year = extract_year(record.event_date().as_deref());
        buckets
            .entry(YearKey::from_label(&year))
            .or_default()
            .push(record);
    }

    buckets
        .into_iter()
        .map(|(key, records)| YearBucket { key, records })
        .collect()
}
