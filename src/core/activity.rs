//! In-memory activity trail: capped, throttled per action, never fails.

use chrono::{DateTime, Duration, Local};
use serde::Serialize;
use std::collections::{HashMap, VecDeque};

pub const ACTIVITY_CAPACITY: usize = 100;

#[derive(Debug, Clone, Serialize)]
pub struct ActivityEntry {
    pub at: DateTime<Local>,
    pub action: String,
    pub params: String,
    pub result: Option<String>,
}

#[derive(Debug)]
pub struct ActivityLog {
    entries: VecDeque<ActivityEntry>,
    throttle: Duration,
    last_seen: HashMap<String, DateTime<Local>>,
}

impl ActivityLog {
    pub fn new(throttle_ms: u64) -> Self {
        Self {
            entries: VecDeque::with_capacity(ACTIVITY_CAPACITY),
            throttle: Duration::milliseconds(throttle_ms as i64),
            last_seen: HashMap::new(),
        }
    }

    /// Record an action now. Returns `false` when throttled.
    pub fn log(&mut self, action: &str, params: &str, result: Option<&str>) -> bool {
        self.log_at(Local::now(), action, params, result)
    }

    pub fn log_at(
        &mut self,
        at: DateTime<Local>,
        action: &str,
        params: &str,
        result: Option<&str>,
    ) -> bool {
        if let Some(last) = self.last_seen.get(action)
            && at - *last < self.throttle
        {
            return false;
        }
        self.last_seen.insert(action.to_string(), at);

        if self.entries.len() == ACTIVITY_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(ActivityEntry {
            at,
            action: action.to_string(),
            params: params.to_string(),
            result: result.map(str::to_string),
        });
        true
    }

    /// The last `n` entries, oldest first.
    pub fn recent(&self, n: usize) -> Vec<ActivityEntry> {
        let skip = self.entries.len().saturating_sub(n);
        self.entries.iter().skip(skip).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new(250)
    }
}
