//! User-facing error reporting with diagnostic context.

use crate::core::activity::ActivityEntry;
use crate::models::RecordId;
use crate::ui::messages::error;
use std::cell::RefCell;
use std::fmt;

/// Follow-up the user can trigger from a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryAction {
    /// Re-render exactly these records.
    RenderRecords(Vec<RecordId>),
}

#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub message: String,
    pub error: String,
    pub context: Vec<(String, String)>,
    pub trail: Vec<ActivityEntry>,
    pub retry: Option<RetryAction>,
}

impl ErrorReport {
    pub fn new(message: impl Into<String>, error: impl fmt::Display) -> Self {
        Self {
            message: message.into(),
            error: error.to_string(),
            context: Vec::new(),
            trail: Vec::new(),
            retry: None,
        }
    }

    pub fn with_context(mut self, key: &str, value: impl fmt::Display) -> Self {
        self.context.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_trail(mut self, trail: Vec<ActivityEntry>) -> Self {
        self.trail = trail;
        self
    }

    pub fn with_retry(mut self, retry: RetryAction) -> Self {
        self.retry = Some(retry);
        self
    }
}

pub trait ErrorReporter {
    fn report(&self, report: ErrorReport);
}

/// Prints one error line per report and logs the diagnostic context.
/// The last retry action is kept until the caller takes it.
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    last_retry: RefCell<Option<RetryAction>>,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take_retry(&self) -> Option<RetryAction> {
        self.last_retry.borrow_mut().take()
    }
}

impl ErrorReporter for ConsoleReporter {
    fn report(&self, report: ErrorReport) {
        if report.retry.is_some() {
            error(format!("{} (use --retry to try again)", report.message));
        } else {
            error(&report.message);
        }

        log::error!("{}: {}", report.message, report.error);
        for (key, value) in &report.context {
            log::error!("  {key} = {value}");
        }
        for entry in &report.trail {
            log::error!(
                "  trail {} {} {}",
                entry.at.format("%H:%M:%S%.3f"),
                entry.action,
                entry.params
            );
        }

        if let Some(retry) = report.retry {
            *self.last_retry.borrow_mut() = Some(retry);
        }
    }
}
