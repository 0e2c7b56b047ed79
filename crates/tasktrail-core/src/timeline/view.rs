//! Conversion of the merged schedule into public timeline entries.

use super::entry::{FixedSource, ScheduledEntry, TimelineEntry, TimelineEntryKind};

/// Builds the outgoing entry sequence and marks the current task.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewEntryBuilder<'a> {
    current_task_id: Option<&'a str>,
}

impl<'a> ViewEntryBuilder<'a> {
    pub fn new(current_task_id: Option<&'a str>) -> Self {
        Self { current_task_id }
    }

    /// Convert a start-ordered schedule. Only the earliest entry of the
    /// current task is marked, so a split task is marked on its first piece.
    pub fn build(&self, schedule: Vec<ScheduledEntry>) -> Vec<TimelineEntry> {
        let mut current_marked = false;
        let mut claim_current = |task_id: &str| {
            let is_current = !current_marked && self.current_task_id == Some(task_id);
            current_marked |= is_current;
            is_current
        };

        schedule
            .into_iter()
            .map(|entry| {
                let (start, end) = (entry.start(), entry.end());
                let kind = match entry {
                    ScheduledEntry::Fixed(fixed) => match fixed.source {
                        FixedSource::CalendarEvent {
                            event_id,
                            title,
                            icon,
                        } => TimelineEntryKind::CalendarEvent {
                            event_id,
                            title,
                            icon,
                        },
                        FixedSource::RepeatOccurrence {
                            repeat_cfg_id,
                            title,
                        } => TimelineEntryKind::ScheduledRepeatOccurrence {
                            repeat_cfg_id,
                            title,
                        },
                        FixedSource::DueTask { task, overdue } => TimelineEntryKind::Task {
                            is_current: claim_current(&task.task_id),
                            task,
                            scheduled: true,
                            overdue,
                        },
                    },
                    ScheduledEntry::Flexible(placement) if placement.parts > 1 => {
                        TimelineEntryKind::SplitTask {
                            is_current: claim_current(&placement.task.task_id),
                            task: placement.task,
                            part: placement.part,
                            parts: placement.parts,
                        }
                    }
                    ScheduledEntry::Flexible(placement) => {
                        // Late placement of a dated task is surfaced, not reordered.
                        let overdue = placement.task.due_at.is_some_and(|due| end > due);
                        TimelineEntryKind::Task {
                            is_current: claim_current(&placement.task.task_id),
                            task: placement.task,
                            scheduled: false,
                            overdue,
                        }
                    }
                    ScheduledEntry::Marker { kind, .. } => kind.entry_kind(),
                };
                TimelineEntry { start, end, kind }
            })
            .collect()
    }
}
