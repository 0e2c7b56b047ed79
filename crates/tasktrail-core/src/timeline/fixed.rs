//! Collection of fixed-time entries.
//!
//! Calendar events, recurring occurrences and due-dated tasks keep the start
//! and duration they were given. They are sorted but never resolved against
//! each other; overlapping commitments stay visible as a conflict.

use chrono::{DateTime, Utc};

use super::entry::{FixedEntry, FixedSource, TaskSlot};
use crate::schedule::{CalendarEvent, RecurringTaskOccurrence, Task};

/// Normalizes fixed inputs into one sorted candidate set.
#[derive(Debug, Clone, Copy)]
pub struct FixedEntryCollector {
    now: DateTime<Utc>,
}

impl FixedEntryCollector {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// Collect every fixed entry still relevant at `now`.
    ///
    /// Sorted by start; ties go calendar event, then recurring occurrence,
    /// then due task, then by id.
    pub fn collect(
        &self,
        calendar_events: &[CalendarEvent],
        due_tasks: &[Task],
        recurring: &[RecurringTaskOccurrence],
    ) -> Vec<FixedEntry> {
        let events = calendar_events
            .iter()
            .filter(|event| event.end() >= self.now)
            .map(|event| FixedEntry {
                start: event.start,
                end: event.end(),
                source: FixedSource::CalendarEvent {
                    event_id: event.id.clone(),
                    title: event.title.clone(),
                    icon: event.icon.clone(),
                },
            });

        let occurrences = recurring
            .iter()
            .filter(|occurrence| occurrence.end() >= self.now)
            .map(|occurrence| FixedEntry {
                start: occurrence.start,
                end: occurrence.end(),
                source: FixedSource::RepeatOccurrence {
                    repeat_cfg_id: occurrence.repeat_cfg_id.clone(),
                    title: occurrence.title.clone(),
                },
            });

        let due = due_tasks.iter().filter_map(|task| self.due_entry(task));

        let mut entries: Vec<FixedEntry> = events.chain(occurrences).chain(due).collect();
        entries.sort_by(|a, b| {
            a.start
                .cmp(&b.start)
                .then_with(|| a.source.priority().cmp(&b.source.priority()))
                .then_with(|| a.source.id().cmp(b.source.id()))
                .then_with(|| a.end.cmp(&b.end))
        });
        entries
    }

    /// A due task sits at its due instant for its remaining duration. An
    /// overdue one is pinned to `now`.
    fn due_entry(&self, task: &Task) -> Option<FixedEntry> {
        if task.completed {
            return None;
        }
        let due_at = task.due_at?;
        let overdue = due_at < self.now;
        let start = if overdue { self.now } else { due_at };

        Some(FixedEntry {
            start,
            end: start + task.remaining(),
            source: FixedSource::DueTask {
                task: TaskSlot::from(task),
                overdue,
            },
        })
    }
}
