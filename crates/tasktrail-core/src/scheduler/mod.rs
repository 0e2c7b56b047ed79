//! Timeline scheduler.
//!
//! This module projects outstanding work onto one chronological sequence:
//! - Collects fixed entries (calendar events, recurring occurrences, due tasks)
//! - Lays the unscheduled queue out around them and around blackout windows
//! - Inserts work-window, lunch-break and day boundary markers
//! - Marks the current task
//!
//! The scheduler keeps no state between calls. Callers re-run it on every
//! input change and replace the previous output wholesale.

use chrono::{DateTime, FixedOffset, Offset, Utc};

use crate::clock::{Clock, ClockAnchor};
use crate::schedule::{
    CalendarEvent, LunchBreak, RecurringTaskOccurrence, Task, TaskId, TimelineSnapshot, WorkWindow,
};
use crate::timeline::{
    BlackoutWindowResolver, FixedEntryCollector, ScheduledEntry, TimelineEntry,
    UnplannedQueueProjector, ViewEntryBuilder,
};

/// Daily window configuration for one projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayPlan {
    pub work_window: Option<WorkWindow>,
    pub lunch_break: Option<LunchBreak>,
    /// Offset the daily windows are expressed in.
    pub utc_offset: FixedOffset,
}

impl Default for DayPlan {
    fn default() -> Self {
        Self {
            work_window: None,
            lunch_break: None,
            utc_offset: Utc.fix(),
        }
    }
}

/// Inputs of one projection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimelineInput {
    /// Unscheduled tasks in the user's chosen order.
    pub unscheduled: Vec<Task>,
    pub due_tasks: Vec<Task>,
    pub recurring: Vec<RecurringTaskOccurrence>,
    pub calendar_events: Vec<CalendarEvent>,
    pub current_task_id: Option<TaskId>,
}

impl From<TimelineSnapshot> for TimelineInput {
    fn from(snapshot: TimelineSnapshot) -> Self {
        Self {
            unscheduled: snapshot.unscheduled,
            due_tasks: snapshot.due_tasks,
            recurring: snapshot.recurring,
            calendar_events: snapshot.calendar_events,
            current_task_id: snapshot.current_task_id,
        }
    }
}

/// Projects tasks, occurrences and events onto the timeline.
#[derive(Debug, Clone)]
pub struct TimelineScheduler {
    plan: DayPlan,
    resolver: BlackoutWindowResolver,
}

impl TimelineScheduler {
    /// Create a scheduler with no work window or lunch break.
    pub fn new() -> Self {
        Self::with_plan(DayPlan::default())
    }

    /// Create with custom daily windows
    pub fn with_plan(plan: DayPlan) -> Self {
        Self {
            resolver: BlackoutWindowResolver::new(plan.work_window, plan.lunch_break, plan.utc_offset),
            plan,
        }
    }

    pub fn plan(&self) -> &DayPlan {
        &self.plan
    }

    pub fn resolver(&self) -> &BlackoutWindowResolver {
        &self.resolver
    }

    /// Project the timeline as of `now`.
    ///
    /// # Arguments
    /// * `now` - Instant the unscheduled queue starts from
    /// * `input` - Queue, due tasks, recurring occurrences, calendar events and current task
    ///
    /// # Returns
    /// Entries ordered by start. Empty when there is nothing to place.
    pub fn project(&self, now: DateTime<Utc>, input: &TimelineInput) -> Vec<TimelineEntry> {
        let schedule = self.schedule(now, input);
        ViewEntryBuilder::new(input.current_task_id.as_deref()).build(schedule)
    }

    /// Project the timeline as of the clock's current instant.
    pub fn project_at(&self, clock: &impl Clock, input: &TimelineInput) -> Vec<TimelineEntry> {
        let anchor = ClockAnchor::capture(clock, self.plan.utc_offset);
        self.project(anchor.now, input)
    }

    /// Merge fixed entries, queue placements and boundary markers.
    pub fn schedule(&self, now: DateTime<Utc>, input: &TimelineInput) -> Vec<ScheduledEntry> {
        let fixed = FixedEntryCollector::new(now).collect(
            &input.calendar_events,
            &input.due_tasks,
            &input.recurring,
        );
        let flexible = UnplannedQueueProjector::new(&self.resolver, &fixed).project(now, &input.unscheduled);

        if fixed.is_empty() && flexible.is_empty() {
            return Vec::new();
        }

        let span_end = fixed
            .iter()
            .map(|entry| entry.end)
            .chain(flexible.iter().map(|placement| placement.end))
            .max()
            .unwrap_or(now);
        let markers = self.resolver.boundaries_between(now, span_end);

        tracing::debug!(
            fixed = fixed.len(),
            flexible = flexible.len(),
            markers = markers.len(),
            %span_end,
            "projected timeline"
        );

        let mut merged: Vec<ScheduledEntry> = Vec::with_capacity(fixed.len() + flexible.len() + markers.len());
        merged.extend(markers.into_iter().map(|(at, kind)| ScheduledEntry::Marker { at, kind }));
        merged.extend(fixed.into_iter().map(ScheduledEntry::Fixed));
        merged.extend(flexible.into_iter().map(ScheduledEntry::Flexible));
        // Stable: fixed entries keep their priority order, flexible entries
        // their queue order.
        merged.sort_by_key(|entry| (entry.start(), entry.tie_rank()));
        merged
    }
}

impl Default for TimelineScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// Project a timeline in UTC from loose inputs.
#[allow(clippy::too_many_arguments)]
pub fn project(
    now: DateTime<Utc>,
    unscheduled: &[Task],
    due_tasks: &[Task],
    recurring: &[RecurringTaskOccurrence],
    calendar_events: &[CalendarEvent],
    current_task_id: Option<&str>,
    work_window: Option<WorkWindow>,
    lunch_break: Option<LunchBreak>,
) -> Vec<TimelineEntry> {
    let scheduler = TimelineScheduler::with_plan(DayPlan {
        work_window,
        lunch_break,
        ..DayPlan::default()
    });
    let input = TimelineInput {
        unscheduled: unscheduled.to_vec(),
        due_tasks: due_tasks.to_vec(),
        recurring: recurring.to_vec(),
        calendar_events: calendar_events.to_vec(),
        current_task_id: current_task_id.map(str::to_string),
    };
    scheduler.project(now, &input)
}
