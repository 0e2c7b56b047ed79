//! Timeline entry types.
//!
//! [`TimelineEntry`] is what leaves the crate. [`ScheduledEntry`] is the
//! merged schedule before the view layer marks the current task.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::schedule::{Task, TaskId};

/// The task behind a task entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSlot {
    pub task_id: TaskId,
    pub title: String,
    #[serde(default)]
    pub parent_id: Option<TaskId>,
    #[serde(default)]
    pub due_at: Option<DateTime<Utc>>,
}

impl From<&Task> for TaskSlot {
    fn from(task: &Task) -> Self {
        Self {
            task_id: task.id.clone(),
            title: task.title.clone(),
            parent_id: task.parent_id.clone(),
            due_at: task.due_at,
        }
    }
}

/// Payload of a timeline entry, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum TimelineEntryKind {
    /// A task placed in one piece. `scheduled` tasks sit at their due instant.
    Task {
        task: TaskSlot,
        is_current: bool,
        scheduled: bool,
        overdue: bool,
    },
    /// One piece of a task whose placement was interrupted; covers only part
    /// of its remaining duration. `part` counts from zero.
    SplitTask {
        task: TaskSlot,
        is_current: bool,
        part: u32,
        parts: u32,
    },
    ScheduledRepeatOccurrence {
        repeat_cfg_id: String,
        title: String,
    },
    CalendarEvent {
        event_id: String,
        title: String,
        icon: Option<String>,
    },
    WorkdayStart,
    WorkdayEnd,
    LunchBreakStart,
    LunchBreakEnd,
    DayBoundary,
}

/// One entry of the projected timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: TimelineEntryKind,
}

impl TimelineEntry {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// The task id for `Task` and `SplitTask` entries.
    pub fn task_id(&self) -> Option<&str> {
        match &self.kind {
            TimelineEntryKind::Task { task, .. } | TimelineEntryKind::SplitTask { task, .. } => {
                Some(task.task_id.as_str())
            }
            _ => None,
        }
    }

    pub fn is_current(&self) -> bool {
        match &self.kind {
            TimelineEntryKind::Task { is_current, .. }
            | TimelineEntryKind::SplitTask { is_current, .. } => *is_current,
            _ => false,
        }
    }

    /// Zero-duration boundary marker.
    pub fn is_marker(&self) -> bool {
        match self.kind {
            TimelineEntryKind::WorkdayStart
            | TimelineEntryKind::WorkdayEnd
            | TimelineEntryKind::LunchBreakStart
            | TimelineEntryKind::LunchBreakEnd
            | TimelineEntryKind::DayBoundary => true,
            TimelineEntryKind::Task { .. }
            | TimelineEntryKind::SplitTask { .. }
            | TimelineEntryKind::ScheduledRepeatOccurrence { .. }
            | TimelineEntryKind::CalendarEvent { .. } => false,
        }
    }

    /// Whether this entry was placed from the unscheduled queue.
    pub fn is_flexible(&self) -> bool {
        match &self.kind {
            TimelineEntryKind::Task { scheduled, .. } => !scheduled,
            TimelineEntryKind::SplitTask { .. } => true,
            _ => false,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            TimelineEntryKind::Task { .. } => "Task",
            TimelineEntryKind::SplitTask { .. } => "SplitTask",
            TimelineEntryKind::ScheduledRepeatOccurrence { .. } => "ScheduledRepeatOccurrence",
            TimelineEntryKind::CalendarEvent { .. } => "CalendarEvent",
            TimelineEntryKind::WorkdayStart => "WorkdayStart",
            TimelineEntryKind::WorkdayEnd => "WorkdayEnd",
            TimelineEntryKind::LunchBreakStart => "LunchBreakStart",
            TimelineEntryKind::LunchBreakEnd => "LunchBreakEnd",
            TimelineEntryKind::DayBoundary => "DayBoundary",
        }
    }
}

/// What a fixed entry was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixedSource {
    CalendarEvent {
        event_id: String,
        title: String,
        icon: Option<String>,
    },
    RepeatOccurrence {
        repeat_cfg_id: String,
        title: String,
    },
    DueTask {
        task: TaskSlot,
        overdue: bool,
    },
}

impl FixedSource {
    /// Tie-break rank at equal start; lower wins.
    pub fn priority(&self) -> u8 {
        match self {
            Self::CalendarEvent { .. } => 0,
            Self::RepeatOccurrence { .. } => 1,
            Self::DueTask { .. } => 2,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::CalendarEvent { event_id, .. } => event_id,
            Self::RepeatOccurrence { repeat_cfg_id, .. } => repeat_cfg_id,
            Self::DueTask { task, .. } => &task.task_id,
        }
    }
}

/// An entry whose start and duration are dictated from outside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedEntry {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub source: FixedSource,
}

/// One placed piece of an unscheduled task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlexiblePlacement {
    pub task: TaskSlot,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub part: u32,
    pub parts: u32,
}

impl FlexiblePlacement {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Zero-duration boundary markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MarkerKind {
    // Declaration order is the order of markers sharing one instant.
    LunchBreakEnd,
    WorkdayEnd,
    DayBoundary,
    WorkdayStart,
    LunchBreakStart,
}

impl MarkerKind {
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    pub fn entry_kind(&self) -> TimelineEntryKind {
        match self {
            Self::LunchBreakEnd => TimelineEntryKind::LunchBreakEnd,
            Self::WorkdayEnd => TimelineEntryKind::WorkdayEnd,
            Self::DayBoundary => TimelineEntryKind::DayBoundary,
            Self::WorkdayStart => TimelineEntryKind::WorkdayStart,
            Self::LunchBreakStart => TimelineEntryKind::LunchBreakStart,
        }
    }
}

/// A merged schedule entry before view conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduledEntry {
    Fixed(FixedEntry),
    Flexible(FlexiblePlacement),
    Marker {
        at: DateTime<Utc>,
        kind: MarkerKind,
    },
}

impl ScheduledEntry {
    pub fn start(&self) -> DateTime<Utc> {
        match self {
            Self::Fixed(entry) => entry.start,
            Self::Flexible(placement) => placement.start,
            Self::Marker { at, .. } => *at,
        }
    }

    pub fn end(&self) -> DateTime<Utc> {
        match self {
            Self::Fixed(entry) => entry.end,
            Self::Flexible(placement) => placement.end,
            Self::Marker { at, .. } => *at,
        }
    }

    /// Ordering among entries that share a start instant: markers first,
    /// then fixed entries, then flexible ones.
    pub(crate) fn tie_rank(&self) -> (u8, u8) {
        match self {
            Self::Marker { kind, .. } => (0, kind.rank()),
            Self::Fixed(_) => (1, 0),
            Self::Flexible(_) => (2, 0),
        }
    }
}
