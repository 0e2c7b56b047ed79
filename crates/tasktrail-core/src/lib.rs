//! # Tasktrail Core Library
//!
//! This library projects a user's outstanding work onto a single chronological
//! timeline that a front-end renders as a day-by-day agenda. It follows a
//! CLI-first philosophy: everything is reachable from the standalone
//! `tasktrail-cli` binary over the same core library.
//!
//! ## Architecture
//!
//! - **Scheduler**: A pure projection from "now" plus the task inputs to an
//!   ordered sequence of timeline entries. No state survives between calls.
//! - **Timeline**: Blackout windows, fixed-entry collection, queue placement
//!   and the kind-tagged entries the view consumes
//! - **Calendar**: Isolated per-provider event collection
//! - **Storage**: TOML-based configuration and the offline calendar cache
//!
//! ## Key Components
//!
//! - [`TimelineScheduler`]: Projection entry point
//! - [`project`]: Free-function form of the projection
//! - [`BlackoutWindowResolver`]: Work window and lunch break arithmetic
//! - [`Config`]: Application configuration management

pub mod calendar;
pub mod clock;
pub mod error;
pub mod schedule;
pub mod scheduler;
pub mod storage;
pub mod timeline;

pub use calendar::{collect_provider_events, CalendarProvider, CalendarSource, JsonFileCalendarSource};
pub use clock::{Clock, ClockAnchor, FixedClock, SystemClock};
pub use error::{CalendarError, ConfigError, CoreError, ValidationError};
pub use schedule::{
    CalendarEvent, DailyWindow, LunchBreak, RecurringTaskOccurrence, Task, TaskId, TimeOfDay,
    TimelineSnapshot, WorkWindow,
};
pub use scheduler::{project, DayPlan, TimelineInput, TimelineScheduler};
pub use storage::{Config, TimelineCache};
pub use timeline::{BlackoutWindowResolver, TimelineEntry, TimelineEntryKind};
