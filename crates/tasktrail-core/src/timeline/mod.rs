//! Timeline projection components.
//!
//! This module provides:
//! - Daily blackout windows (work hours, lunch break)
//! - Collection of fixed-time entries (calendar events, recurring occurrences, due tasks)
//! - Placement of the unscheduled queue around both
//! - Conversion into the public, kind-tagged entry sequence
//!
//! The orchestration lives in [`crate::scheduler`].

mod blackout;
mod entry;
mod fixed;
mod queue;
mod view;

pub use blackout::BlackoutWindowResolver;
pub use entry::{
    FixedEntry, FixedSource, FlexiblePlacement, MarkerKind, ScheduledEntry, TaskSlot,
    TimelineEntry, TimelineEntryKind,
};
pub use fixed::FixedEntryCollector;
pub use queue::UnplannedQueueProjector;
pub use view::ViewEntryBuilder;
