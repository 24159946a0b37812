//! Pinned-state store: the authoritative set of pinned record ids.
//!
//! The set lives in persistent storage as a JSON array under
//! `pinnedEvents` (prefixed by the domain id when one is configured).
//! Every toggle is a full read-modify-write committed before it returns.
//! Storage failures are reported and never propagated. After a failed read
//! or write the store is degraded: membership and toggles answer from the
//! in-memory mirror, and no further read failure is reported, until a write
//! succeeds again.

use crate::core::reporter::{ErrorReport, ErrorReporter};
use crate::db::KeyValueStorage;
use crate::errors::{AppError, AppResult};
use crate::models::RecordId;
use serde_json::Value;
use std::cell::Cell;
use std::collections::BTreeSet;
use std::rc::Rc;

pub const PINNED_KEY: &str = "pinnedEvents";

pub struct PinnedStore {
    storage: Box<dyn KeyValueStorage>,
    key: String,
    mirror: BTreeSet<RecordId>,
    degraded: Cell<bool>,
    reporter: Rc<dyn ErrorReporter>,
}

impl PinnedStore {
    /// Open the store for `domain` and load the persisted set once.
    pub fn open(
        storage: Box<dyn KeyValueStorage>,
        domain: Option<&str>,
        reporter: Rc<dyn ErrorReporter>,
    ) -> Self {
        let key = match domain.map(str::trim) {
            Some(d) if !d.is_empty() => format!("{d}:{PINNED_KEY}"),
            _ => PINNED_KEY.to_string(),
        };

        let mut store = Self {
            storage,
            key,
            mirror: BTreeSet::new(),
            degraded: Cell::new(false),
            reporter,
        };

        if let Some(set) = store.current_set("load", None) {
            store.mirror = set;
        }
        store
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Membership against the persisted set, or the mirror while degraded.
    pub fn is_pinned(&self, id: RecordId) -> bool {
        match self.current_set("isPinned", Some(id)) {
            Some(set) => set.contains(&id),
            None => self.mirror.contains(&id),
        }
    }

    /// Flip membership of `id`, persist, and return the new state.
    pub fn toggle(&mut self, id: RecordId) -> bool {
        let mut set = self
            .current_set("togglePinned", Some(id))
            .unwrap_or_else(|| self.mirror.clone());

        let now_pinned = if set.remove(&id) {
            false
        } else {
            set.insert(id);
            true
        };

        match self.write_set(&set) {
            Ok(()) => self.degraded.set(false),
            Err(e) => {
                self.degraded.set(true);
                self.reporter.report(
                    ErrorReport::new("Could not save pinned events", &e)
                        .with_context("operation", "togglePinned")
                        .with_context("key", &self.key)
                        .with_context("id", id)
                        .with_context("payload", synopsis(&set)),
                );
            }
        }

        self.mirror = set;
        now_pinned
    }

    /// Ids pinned as of the last load or toggle.
    pub fn cached(&self) -> &BTreeSet<RecordId> {
        &self.mirror
    }

    /// Whether the last storage access failed and the mirror is answering.
    pub fn is_degraded(&self) -> bool {
        self.degraded.get()
    }

    /// The persisted set, or `None` while degraded. The first failing read
    /// reports and latches the degraded state.
    fn current_set(&self, operation: &str, id: Option<RecordId>) -> Option<BTreeSet<RecordId>> {
        if self.degraded.get() {
            return None;
        }
        match self.read_set() {
            Ok(set) => Some(set),
            Err(e) => {
                self.degraded.set(true);
                self.report(operation, &e, id);
                None
            }
        }
    }

    fn read_set(&self) -> AppResult<BTreeSet<RecordId>> {
        match self.storage.get(&self.key)? {
            None => Ok(BTreeSet::new()),
            Some(raw) if raw.trim().is_empty() => Ok(BTreeSet::new()),
            Some(raw) => parse_ids(&raw),
        }
    }

    fn write_set(&mut self, set: &BTreeSet<RecordId>) -> AppResult<()> {
        let ids: Vec<RecordId> = set.iter().copied().collect();
        let payload = serde_json::to_string(&ids)?;
        self.storage.set(&self.key, &payload)
    }

    fn report(&self, operation: &str, err: &AppError, id: Option<RecordId>) {
        let mut report = ErrorReport::new("Could not read pinned events", err)
            .with_context("operation", operation)
            .with_context("key", &self.key);
        if let Some(id) = id {
            report = report.with_context("id", id);
        }
        self.reporter.report(report);
    }
}

/// Accepts numbers and numeric strings; anything else is a storage error.
fn parse_ids(raw: &str) -> AppResult<BTreeSet<RecordId>> {
    let values: Vec<Value> = serde_json::from_str(raw)?;
    values
        .iter()
        .map(|v| match v {
            Value::Number(n) => n.as_u64().and_then(|n| RecordId::try_from(n).ok()),
            Value::String(s) => s.trim().parse::<RecordId>().ok(),
            _ => None,
        })
        .map(|id| id.ok_or_else(|| AppError::Storage(format!("invalid pinned id in {raw}"))))
        .collect()
}

fn synopsis(set: &BTreeSet<RecordId>) -> String {
    let head: Vec<String> = set.iter().take(5).map(|id| id.to_string()).collect();
    if set.len() > 5 {
        format!("{} ids [{}, …]", set.len(), head.join(", "))
    } else {
        format!("{} ids [{}]", set.len(), head.join(", "))
    }
}
