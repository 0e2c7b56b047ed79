//! Schedule input types: tasks, recurring occurrences, calendar events and
//! the daily windows that bound flexible work.
//!
//! Everything here is a read-only snapshot handed to the projection on each
//! invocation.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Identifier of a task.
pub type TaskId = String;

const SECONDS_PER_DAY: u32 = 24 * 60 * 60;

/// A task as seen by the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub estimated_minutes: i64,
    #[serde(default)]
    pub spent_minutes: i64,
    #[serde(default)]
    pub parent_id: Option<TaskId>,
    #[serde(default)]
    pub sub_task_ids: Vec<TaskId>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub due_at: Option<DateTime<Utc>>,
    /// Calendar event this task was created from, if any.
    #[serde(default)]
    pub calendar_event_id: Option<String>,
}

impl Task {
    /// Create an open task with an estimate and nothing spent.
    pub fn new(id: impl Into<String>, title: impl Into<String>, estimated_minutes: i64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            estimated_minutes,
            spent_minutes: 0,
            parent_id: None,
            sub_task_ids: Vec::new(),
            completed: false,
            due_at: None,
            calendar_event_id: None,
        }
    }

    pub fn with_spent(mut self, minutes: i64) -> Self {
        self.spent_minutes = minutes;
        self
    }

    pub fn with_due(mut self, due_at: DateTime<Utc>) -> Self {
        self.due_at = Some(due_at);
        self
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Remaining work, never negative.
    pub fn remaining(&self) -> Duration {
        Duration::minutes((self.estimated_minutes - self.spent_minutes).max(0))
    }

    /// Whether the task still needs time on the timeline.
    pub fn is_placeable(&self) -> bool {
        !self.completed && self.remaining() > Duration::zero()
    }
}

/// Next occurrence of a recurring task configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringTaskOccurrence {
    pub repeat_cfg_id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub duration_minutes: i64,
}

impl RecurringTaskOccurrence {
    pub fn end(&self) -> DateTime<Utc> {
        self.start + Duration::minutes(self.duration_minutes.max(0))
    }
}

/// An imported calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub duration_minutes: i64,
    /// Display icon of the provider the event came from.
    #[serde(default)]
    pub icon: Option<String>,
}

impl CalendarEvent {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start: DateTime<Utc>,
        duration_minutes: i64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start,
            duration_minutes,
            icon: None,
        }
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.start + Duration::minutes(self.duration_minutes.max(0))
    }
}

/// A local time of day, `00:00` through `24:00` inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    seconds: u32,
}

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay { seconds: 0 };
    pub const END_OF_DAY: TimeOfDay = TimeOfDay {
        seconds: SECONDS_PER_DAY,
    };

    /// Build from hour and minute; `24:00` is the only value past `23:59`.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        if minute >= 60 || hour > 24 || (hour == 24 && minute != 0) {
            return None;
        }
        Some(Self {
            seconds: hour * 3600 + minute * 60,
        })
    }

    /// Offset from local midnight.
    pub fn seconds_from_midnight(&self) -> u32 {
        self.seconds
    }

    pub fn as_duration(&self) -> Duration {
        Duration::seconds(i64::from(self.seconds))
    }
}

impl FromStr for TimeOfDay {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidTimeOfDay {
            value: s.to_string(),
        };
        let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;
        if minute.len() != 2 {
            return Err(invalid());
        }
        let hour: u32 = hour.parse().map_err(|_| invalid())?;
        let minute: u32 = minute.parse().map_err(|_| invalid())?;
        Self::from_hm(hour, minute).ok_or_else(invalid)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.seconds / 3600, (self.seconds % 3600) / 60)
    }
}

/// A window that recurs every local day. `start > end` wraps past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyWindow {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

/// The only part of each day open to flexible work.
pub type WorkWindow = DailyWindow;

/// A daily interval closed to flexible work.
pub type LunchBreak = DailyWindow;

impl DailyWindow {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self { start, end }
    }

    /// Parse a window from two `HH:MM` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self, ValidationError> {
        Ok(Self::new(start.parse()?, end.parse()?))
    }

    /// The window as intervals of seconds from local midnight, in `[0, 86400]`.
    ///
    /// A wrapping window yields two intervals; a zero-length window none.
    pub fn day_intervals(&self) -> Vec<(u32, u32)> {
        let (start, end) = (self.start.seconds, self.end.seconds);
        if start < end {
            vec![(start, end)]
        } else if start > end {
            [(0, end), (start, SECONDS_PER_DAY)]
                .into_iter()
                .filter(|(s, e)| s < e)
                .collect()
        } else {
            Vec::new()
        }
    }
}

/// One recompute's worth of inputs, as read from a snapshot file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimelineSnapshot {
    /// Instant to project from; the caller's clock is used when absent.
    #[serde(default)]
    pub now: Option<DateTime<Utc>>,
    /// Unscheduled tasks in the user's chosen order.
    #[serde(default)]
    pub unscheduled: Vec<Task>,
    #[serde(default)]
    pub due_tasks: Vec<Task>,
    #[serde(default)]
    pub recurring: Vec<RecurringTaskOccurrence>,
    #[serde(default)]
    pub calendar_events: Vec<CalendarEvent>,
    #[serde(default)]
    pub current_task_id: Option<TaskId>,
}

impl TimelineSnapshot {
    /// Calendar event ids already materialized as tasks.
    pub fn materialized_event_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .unscheduled
            .iter()
            .chain(self.due_tasks.iter())
            .filter_map(|task| task.calendar_event_id.clone())
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }
}
