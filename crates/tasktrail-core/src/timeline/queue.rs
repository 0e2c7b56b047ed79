//! Placement of the unscheduled task queue.
//!
//! Tasks are laid out back to back from a moving cursor, in queue order.
//! A slot that would run into a blackout window or a fixed entry is cut at
//! that boundary and the rest of the task continues after it.

use chrono::{DateTime, Duration, Utc};

use super::blackout::BlackoutWindowResolver;
use super::entry::{FixedEntry, FlexiblePlacement, TaskSlot};
use crate::schedule::Task;

/// Sorted, merged spans of time taken by fixed entries.
#[derive(Debug, Clone, Default)]
struct BusyIntervals {
    spans: Vec<(DateTime<Utc>, DateTime<Utc>)>,
}

impl BusyIntervals {
    fn from_fixed(fixed: &[FixedEntry]) -> Self {
        let mut raw: Vec<_> = fixed
            .iter()
            .filter(|entry| entry.end > entry.start)
            .map(|entry| (entry.start, entry.end))
            .collect();
        raw.sort();

        let mut spans: Vec<(DateTime<Utc>, DateTime<Utc>)> = Vec::with_capacity(raw.len());
        for (start, end) in raw {
            match spans.last_mut() {
                Some(last) if start <= last.1 => last.1 = last.1.max(end),
                _ => spans.push((start, end)),
            }
        }
        Self { spans }
    }

    /// End of the busy span containing `instant`, if any.
    fn containing(&self, instant: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let idx = self.spans.partition_point(|(start, _)| *start <= instant);
        idx.checked_sub(1)
            .map(|i| self.spans[i])
            .filter(|(_, end)| *end > instant)
            .map(|(_, end)| end)
    }

    /// Start of the first busy span beginning after `instant`.
    fn next_start_after(&self, instant: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let idx = self.spans.partition_point(|(start, _)| *start <= instant);
        self.spans.get(idx).map(|(start, _)| *start)
    }
}

/// Lays out the unscheduled queue around blackout windows and fixed entries.
#[derive(Debug, Clone)]
pub struct UnplannedQueueProjector<'a> {
    resolver: &'a BlackoutWindowResolver,
    busy: BusyIntervals,
}

impl<'a> UnplannedQueueProjector<'a> {
    pub fn new(resolver: &'a BlackoutWindowResolver, fixed: &[FixedEntry]) -> Self {
        Self {
            resolver,
            busy: BusyIntervals::from_fixed(fixed),
        }
    }

    /// Place every task with remaining work, starting the cursor at `now`.
    ///
    /// A task placed in one piece yields one placement with `parts == 1`.
    /// When the day configuration leaves no open time, nothing is placed.
    pub fn project(&self, now: DateTime<Utc>, queue: &[Task]) -> Vec<FlexiblePlacement> {
        let mut placements = Vec::new();
        let mut cursor = now;

        for task in queue.iter().filter(|task| task.is_placeable()) {
            let mut left = task.remaining();
            let mut pieces: Vec<(DateTime<Utc>, DateTime<Utc>)> = Vec::new();

            while left > Duration::zero() {
                let Some(start) = self.next_free(cursor) else {
                    tracing::warn!(
                        task_id = %task.id,
                        "no open time left in the configured day; unscheduled tasks are not placed"
                    );
                    return placements;
                };

                let candidate_end = start + left;
                let limit = [
                    self.resolver.available_until(start),
                    self.busy.next_start_after(start),
                ]
                .into_iter()
                .flatten()
                .min();
                let end = match limit {
                    Some(boundary) if boundary < candidate_end => boundary,
                    _ => candidate_end,
                };

                pieces.push((start, end));
                left = left - (end - start);
                cursor = end;
            }

            let parts = pieces.len() as u32;
            let slot = TaskSlot::from(task);
            placements.extend(pieces.into_iter().enumerate().map(|(part, (start, end))| {
                FlexiblePlacement {
                    task: slot.clone(),
                    start,
                    end,
                    part: part as u32,
                    parts,
                }
            }));
        }

        placements
    }

    /// First instant at or after `cursor` that is neither blacked out nor
    /// inside a fixed entry.
    fn next_free(&self, cursor: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let mut candidate = cursor;
        loop {
            candidate = self.resolver.next_available(candidate)?;
            match self.busy.containing(candidate) {
                Some(busy_end) => candidate = busy_end,
                None => return Some(candidate),
            }
        }
    }
}
