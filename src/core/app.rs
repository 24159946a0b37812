//! Application state and the command dispatcher.
//!
//! `AppState` is the single owner of the dataset, the pinned store, the
//! current filter snapshot and the current filtered view. Every user
//! interaction arrives as a [`Command`]; everything except a render retry
//! re-runs the full pipeline (filter → group → render → stats).

use crate::config::{Features, Settings};
use crate::core::activity::ActivityLog;
use crate::core::filter::{FilterState, filter_records};
use crate::core::grouping::group_by_year;
use crate::core::pinned::PinnedStore;
use crate::core::render::{RenderContext, RenderReport, TimelineView, render_timeline, retry_render};
use crate::core::reporter::ErrorReporter;
use crate::core::stats::{Summary, compute_stats};
use crate::errors::{AppError, AppResult};
use crate::models::{EventRecord, RecordId};
use std::collections::HashSet;
use std::rc::Rc;

const TRAIL_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetFilter(FilterState),
    TogglePin { record_id: RecordId },
    ToggleYear(String),
    RetryRender(Vec<RecordId>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutcome {
    pub filtered: Vec<RecordId>,
    pub render: RenderReport,
    pub summary: Option<Summary>,
}

pub struct AppState {
    dataset: Vec<EventRecord>,
    pinned: PinnedStore,
    filter: FilterState,
    collapsed: HashSet<String>,
    features: Features,
    placeholder: String,
    view: Vec<RecordId>,
    activity: ActivityLog,
    reporter: Rc<dyn ErrorReporter>,
}

impl AppState {
    /// Take ownership of a freshly loaded dataset and mirror the pinned
    /// store into every pin-tracked record.
    pub fn new(
        mut dataset: Vec<EventRecord>,
        pinned: PinnedStore,
        features: &Features,
        settings: &Settings,
        reporter: Rc<dyn ErrorReporter>,
    ) -> Self {
        for record in &mut dataset {
            if features.pinning || record.pinned.is_some() {
                record.pinned = Some(pinned.cached().contains(&record.id));
            }
        }

        Self {
            dataset,
            pinned,
            filter: FilterState::default(),
            collapsed: HashSet::new(),
            features: features.clone(),
            placeholder: settings.placeholder.clone(),
            view: Vec::new(),
            activity: ActivityLog::new(settings.activity_throttle_ms),
            reporter,
        }
    }

    pub fn dataset(&self) -> &[EventRecord] {
        &self.dataset
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Ids of the records that passed the last filter pass, in order.
    pub fn current_view(&self) -> &[RecordId] {
        &self.view
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    pub fn record(&self, id: RecordId) -> Option<&EventRecord> {
        self.dataset.iter().find(|r| r.id == id)
    }

    /// Replace the filter snapshot without running the pipeline.
    pub fn set_filter(&mut self, filter: FilterState) {
        self.filter = filter;
    }

    /// Collapse a year bucket before the next pass, without re-rendering.
    pub fn collapse_year(&mut self, label: &str) {
        self.collapsed.insert(label.to_string());
    }

    pub fn is_pinned(&self, id: RecordId) -> bool {
        self.pinned.is_pinned(id)
    }

    /// Records passing the current filter, without rendering anything.
    pub fn filtered(&self) -> Vec<&EventRecord> {
        let store = &self.pinned;
        filter_records(&self.dataset, &self.filter, &|id| store.is_pinned(id))
    }

    /// Full pipeline pass: filter, group, render, stats.
    pub fn apply_filters(&mut self, view: &mut dyn TimelineView) -> AppResult<PipelineOutcome> {
        let store = &self.pinned;
        let is_pinned = |id: RecordId| store.is_pinned(id);

        let filtered = filter_records(&self.dataset, &self.filter, &is_pinned);
        let ids: Vec<RecordId> = filtered.iter().map(|r| r.id).collect();

        self.activity.log(
            "applyFilters",
            &format!("{:?}", self.filter),
            Some(&format!("{} of {}", ids.len(), self.dataset.len())),
        );

        let buckets = group_by_year(filtered.iter().copied());
        let ctx = RenderContext {
            reporter: &*self.reporter,
            is_pinned: &is_pinned,
            show_minor: self.features.show_minor_events,
            collapsed: &self.collapsed,
            placeholder: &self.placeholder,
            trail: self.activity.recent(TRAIL_LEN),
        };
        let render = render_timeline(&buckets, view, &ctx)?;

        let summary = if self.features.stats {
            let summary = compute_stats(&filtered, self.dataset.len(), &is_pinned);
            view.stats(&summary)?;
            Some(summary)
        } else {
            None
        };

        self.view = ids.clone();

        Ok(PipelineOutcome {
            filtered: ids,
            render,
            summary,
        })
    }

    /// Flip the pin, keep the record flag in step with the store.
    pub fn toggle_pinned(&mut self, id: RecordId) -> AppResult<bool> {
        let record = self
            .dataset
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(AppError::UnknownRecord(id))?;

        let now_pinned = self.pinned.toggle(id);
        record.pinned = Some(now_pinned);

        self.activity.log(
            "togglePin",
            &id.to_string(),
            Some(if now_pinned { "pinned" } else { "unpinned" }),
        );
        Ok(now_pinned)
    }

    pub fn dispatch(
        &mut self,
        command: Command,
        view: &mut dyn TimelineView,
    ) -> AppResult<PipelineOutcome> {
        match command {
            Command::SetFilter(state) => {
                self.set_filter(state);
                self.apply_filters(view)
            }
            Command::TogglePin { record_id } => {
                self.toggle_pinned(record_id)?;
                self.apply_filters(view)
            }
            Command::ToggleYear(label) => {
                if !self.collapsed.remove(&label) {
                    self.collapsed.insert(label.clone());
                }
                self.activity.log("toggleYear", &label, None);
                self.apply_filters(view)
            }
            Command::RetryRender(ids) => {
                self.activity.log("retryRender", &format!("{ids:?}"), None);
                Ok(self.retry(&ids, view))
            }
        }
    }

    fn retry(&self, ids: &[RecordId], view: &mut dyn TimelineView) -> PipelineOutcome {
        let records: Vec<&EventRecord> = ids.iter().filter_map(|id| self.record(*id)).collect();

        let store = &self.pinned;
        let is_pinned = |id: RecordId| store.is_pinned(id);
        let ctx = RenderContext {
            reporter: &*self.reporter,
            is_pinned: &is_pinned,
            show_minor: self.features.show_minor_events,
            collapsed: &self.collapsed,
            placeholder: &self.placeholder,
            trail: self.activity.recent(TRAIL_LEN),
        };

        PipelineOutcome {
            filtered: self.view.clone(),
            render: retry_render(&records, view, &ctx),
            summary: None,
        }
    }
}
