//! Rendering orchestrator.
//!
//! Walks the year buckets in display order and drives a [`TimelineView`]:
//! one header per year, then a card (primary events) or a compact marker
//! (minor events) per record. A record that fails to render is collected
//! and skipped; after the pass a single notification covers all failures
//! and carries a retry for exactly that subset. Failures outside the
//! per-record step (clearing, headers, placeholder) are fatal.

use crate::core::activity::ActivityEntry;
use crate::core::grouping::YearBucket;
use crate::core::reporter::{ErrorReport, ErrorReporter, RetryAction};
use crate::core::stats::Summary;
use crate::errors::AppResult;
use crate::models::{EventRecord, RecordId};
use serde::Serialize;
use std::collections::HashSet;

pub const DEFAULT_PLACEHOLDER: &str =
    "No events match the current filters. Try clearing the search or a filter.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearHeader {
    pub label: String,
    pub count: usize,
    pub collapsed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventCard {
    pub id: RecordId,
    pub title: String,
    pub year: String,
    pub date: Option<String>,
    pub watched: bool,
    pub pinned: bool,
    pub classification: Option<String>,
    pub format: Option<String>,
    pub period: Option<String>,
    pub platforms: Vec<String>,
    pub rating: Option<(u8, u8)>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub wikipedia: Option<String>,
}

impl EventCard {
    pub fn from_record(record: &EventRecord, pinned: bool) -> Self {
        if record.title.trim().is_empty() {
            log::warn!("record {} has no title", record.id);
        }
        Self {
            id: record.id,
            title: record.title.clone(),
            year: record.display_year(),
            date: record.event_date(),
            watched: record.is_watched(),
            pinned,
            classification: record.classification(),
            format: record.format(),
            period: record.period(),
            platforms: record.platforms(),
            rating: record.rating(),
            description: record.short_description(),
            notes: record.notes(),
            wikipedia: record.wikipedia_url(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MinorMarker {
    pub id: RecordId,
    pub title: String,
    pub year: String,
    pub date: Option<String>,
    pub pinned: bool,
}

impl MinorMarker {
    pub fn from_record(record: &EventRecord, pinned: bool) -> Self {
        Self {
            id: record.id,
            title: record.title.clone(),
            year: record.display_year(),
            date: record.event_date(),
            pinned,
        }
    }
}

/// Presentation sink. Implementations decide what "rendering" means.
pub trait TimelineView {
    /// Drop whatever the previous pass produced.
    fn clear(&mut self) -> AppResult<()>;
    fn year_header(&mut self, header: &YearHeader) -> AppResult<()>;
    fn event_card(&mut self, card: &EventCard) -> AppResult<()>;
    fn minor_marker(&mut self, marker: &MinorMarker) -> AppResult<()>;
    fn placeholder(&mut self, message: &str) -> AppResult<()>;
    fn stats(&mut self, summary: &Summary) -> AppResult<()>;
}

pub struct RenderContext<'a> {
    pub reporter: &'a dyn ErrorReporter,
    /// Pin state straight from the pinned store.
    pub is_pinned: &'a dyn Fn(RecordId) -> bool,
    pub show_minor: bool,
    pub collapsed: &'a HashSet<String>,
    pub placeholder: &'a str,
    pub trail: Vec<ActivityEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderReport {
    pub groups: usize,
    pub rendered: usize,
    pub hidden: usize,
    pub failed: Vec<RecordId>,
}

/// Full render pass over grouped data.
pub fn render_timeline(
    buckets: &[YearBucket<'_>],
    view: &mut dyn TimelineView,
    ctx: &RenderContext<'_>,
) -> AppResult<RenderReport> {
    view.clear()?;

    let mut report = RenderReport::default();

    if buckets.is_empty() {
        view.placeholder(ctx.placeholder)?;
        return Ok(report);
    }

    let mut last_error = None;

    for bucket in buckets {
        let collapsed = ctx.collapsed.contains(bucket.label());
        view.year_header(&YearHeader {
            label: bucket.label().to_string(),
            count: bucket.len(),
            collapsed,
        })?;
        report.groups += 1;

        if collapsed {
            report.hidden += bucket.len();
            continue;
        }

        for record in &bucket.records {
            match render_record(record, view, ctx) {
                Ok(true) => report.rendered += 1,
                Ok(false) => report.hidden += 1,
                Err(e) => {
                    log::warn!("record {} failed to render: {e}", record.id);
                    report.failed.push(record.id);
                    last_error = Some(e);
                }
            }
        }
    }

    if let Some(err) = last_error {
        notify_failures(&report.failed, &err, ctx);
    }

    Ok(report)
}

/// Re-render exactly `records`, as offered by a failure notification.
pub fn retry_render(
    records: &[&EventRecord],
    view: &mut dyn TimelineView,
    ctx: &RenderContext<'_>,
) -> RenderReport {
    let mut report = RenderReport::default();
    let mut last_error = None;

    for record in records {
        match render_record(record, view, ctx) {
            Ok(true) => report.rendered += 1,
            Ok(false) => report.hidden += 1,
            Err(e) => {
                report.failed.push(record.id);
                last_error = Some(e);
            }
        }
    }

    if let Some(err) = last_error {
        notify_failures(&report.failed, &err, ctx);
    }

    report
}

/// `Ok(false)` when the record is a minor event and those are hidden.
fn render_record(
    record: &EventRecord,
    view: &mut dyn TimelineView,
    ctx: &RenderContext<'_>,
) -> AppResult<bool> {
    let pinned = (ctx.is_pinned)(record.id);

    if record.level().is_minor() {
        if !ctx.show_minor {
            return Ok(false);
        }
        view.minor_marker(&MinorMarker::from_record(record, pinned))?;
    } else {
        view.event_card(&EventCard::from_record(record, pinned))?;
    }
    Ok(true)
}

fn notify_failures(failed: &[RecordId], err: &dyn std::fmt::Display, ctx: &RenderContext<'_>) {
    let ids = failed
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    ctx.reporter.report(
        ErrorReport::new(
            format!("Failed to render {} item(s)", failed.len()),
            err,
        )
        .with_context("operation", "renderTimeline")
        .with_context("failed_ids", ids)
        .with_trail(ctx.trail.clone())
        .with_retry(RetryAction::RenderRecords(failed.to_vec())),
    );
}
