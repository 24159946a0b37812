#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rtimeline::config::{Features, Settings};
use rtimeline::core::AppState;
use rtimeline::core::pinned::PinnedStore;
use rtimeline::core::render::{EventCard, MinorMarker, TimelineView, YearHeader};
use rtimeline::core::reporter::{ErrorReport, ErrorReporter};
use rtimeline::core::stats::Summary;
use rtimeline::db::{KeyValueStorage, MemoryStorage};
use rtimeline::errors::{AppError, AppResult};
use rtimeline::models::dataset::parse_dataset;
use rtimeline::models::{EventRecord, FieldMap, RecordId};
use serde_json::{Value, json};
use std::cell::RefCell;
use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

pub fn rtl() -> Command {
    cargo_bin_cmd!("rtimeline")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rtimeline.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Config path that never exists, so the CLI runs on defaults.
pub fn no_config(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_missing_rtimeline.conf", name));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Write `sample_json()` to a temp file and return its path.
pub fn write_dataset(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_dataset.json", name));
    let p = path.to_string_lossy().to_string();
    fs::write(&p, sample_json().to_string()).expect("write dataset");
    p
}

/// Small mixed dataset used across tests.
pub fn sample_json() -> Value {
    json!([
        {
            "Title": "Darkest Hour",
            "EventDate": "1940",
            "Watched": "Yes",
            "Classification": "Drama",
            "Format": "Film",
            "Period": "WWII",
            "WatchOn": "Netflix, Prime",
            "HistoricalAccuracy": "4/5",
            "ShortDescription": "Churchill's first weeks as Prime Minister."
        },
        {
            "Title": "Band of Brothers",
            "EventDate": "1942-1945",
            "Watched": "No",
            "Classification": "War",
            "Format": "Series",
            "Period": "WWII",
            "WatchOn": "HBO Max",
            "HistoricalAccuracy": "5/5"
        },
        {
            "Title": "The King's Speech",
            "EventDate": "Build up to war 1939",
            "Classification": "Drama",
            "Format": "Film",
            "Period": "Interwar",
            "WatchOn": "Netflix"
        },
        {
            "Title": "Invasion of Poland",
            "EventDate": "01/09/1939 - 06/10/1939",
            "EventLevel": "level2",
            "Period": "WWII"
        },
        {
            "Title": "Lost Reel",
            "Format": "Film",
            "WatchOn": "Prime"
        }
    ])
}

pub fn records_from(value: Value) -> Vec<EventRecord> {
    parse_dataset(&value.to_string(), &FieldMap::default()).expect("parse dataset")
}

pub fn sample_records() -> Vec<EventRecord> {
    records_from(sample_json())
}

/// Reporter that keeps every report for inspection.
#[derive(Default)]
pub struct RecordingReporter {
    pub reports: RefCell<Vec<ErrorReport>>,
}

impl RecordingReporter {
    pub fn count(&self) -> usize {
        self.reports.borrow().len()
    }
}

impl ErrorReporter for RecordingReporter {
    fn report(&self, report: ErrorReport) {
        self.reports.borrow_mut().push(report);
    }
}

/// Storage whose every call fails.
pub struct FailingStorage;

impl KeyValueStorage for FailingStorage {
    fn get(&self, _key: &str) -> AppResult<Option<String>> {
        Err(AppError::Storage("quota exceeded".into()))
    }

    fn set(&mut self, _key: &str, _value: &str) -> AppResult<()> {
        Err(AppError::Storage("quota exceeded".into()))
    }
}

/// Storage that reads fine but refuses every write.
#[derive(Default)]
pub struct ReadOnlyStorage {
    pub inner: MemoryStorage,
}

impl KeyValueStorage for ReadOnlyStorage {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.inner.get(key)
    }

    fn set(&mut self, _key: &str, _value: &str) -> AppResult<()> {
        Err(AppError::Storage("disk full".into()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Clear,
    Header(YearHeader),
    Card(EventCard),
    Marker(MinorMarker),
    Placeholder(String),
    Stats(Summary),
}

/// View that records calls and fails for chosen record ids.
#[derive(Default)]
pub struct RecordingView {
    pub calls: Vec<Rendered>,
    pub fail_on: HashSet<RecordId>,
}

impl RecordingView {
    pub fn failing(ids: &[RecordId]) -> Self {
        Self {
            calls: Vec::new(),
            fail_on: ids.iter().copied().collect(),
        }
    }

    pub fn headers(&self) -> Vec<YearHeader> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Rendered::Header(h) => Some(h.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn rendered_ids(&self) -> Vec<RecordId> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Rendered::Card(card) => Some(card.id),
                Rendered::Marker(m) => Some(m.id),
                _ => None,
            })
            .collect()
    }

    pub fn cards(&self) -> Vec<EventCard> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Rendered::Card(card) => Some(card.clone()),
                _ => None,
            })
            .collect()
    }

    fn check(&self, id: RecordId) -> AppResult<()> {
        if self.fail_on.contains(&id) {
            return Err(AppError::Render {
                id,
                reason: "boom".into(),
            });
        }
        Ok(())
    }
}

impl TimelineView for RecordingView {
    fn clear(&mut self) -> AppResult<()> {
        self.calls.push(Rendered::Clear);
        Ok(())
    }

    fn year_header(&mut self, header: &YearHeader) -> AppResult<()> {
        self.calls.push(Rendered::Header(header.clone()));
        Ok(())
    }

    fn event_card(&mut self, card: &EventCard) -> AppResult<()> {
        self.check(card.id)?;
        self.calls.push(Rendered::Card(card.clone()));
        Ok(())
    }

    fn minor_marker(&mut self, marker: &MinorMarker) -> AppResult<()> {
        self.check(marker.id)?;
        self.calls.push(Rendered::Marker(marker.clone()));
        Ok(())
    }

    fn placeholder(&mut self, message: &str) -> AppResult<()> {
        self.calls.push(Rendered::Placeholder(message.to_string()));
        Ok(())
    }

    fn stats(&mut self, summary: &Summary) -> AppResult<()> {
        self.calls.push(Rendered::Stats(summary.clone()));
        Ok(())
    }
}

pub fn memory_pins(reporter: Rc<RecordingReporter>) -> PinnedStore {
    PinnedStore::open(Box::new(MemoryStorage::new()), None, reporter)
}

/// App state over `records` with in-memory pins and default settings.
pub fn app_with(records: Vec<EventRecord>, features: Features) -> (AppState, Rc<RecordingReporter>) {
    let reporter = Rc::new(RecordingReporter::default());
    let pins = memory_pins(reporter.clone());
    let state = AppState::new(records, pins, &features, &Settings::default(), reporter.clone());
    (state, reporter)
}

/// Sample app whose pinned store sits on `storage`.
pub fn sample_app_on(storage: Box<dyn KeyValueStorage>) -> (AppState, Rc<RecordingReporter>) {
    let reporter = Rc::new(RecordingReporter::default());
    let pins = PinnedStore::open(storage, None, reporter.clone());
    let state = AppState::new(
        sample_records(),
        pins,
        &Features::default(),
        &Settings::default(),
        reporter.clone(),
    );
    (state, reporter)
}

pub fn sample_app() -> (AppState, Rc<RecordingReporter>) {
    app_with(sample_records(), Features::default())
}
