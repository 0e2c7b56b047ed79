//! Clock anchoring for the timeline.
//!
//! The projection never reads the wall clock on its own; callers capture
//! "now" once through a [`Clock`] and pass it down. Tests inject a
//! [`FixedClock`].

use chrono::{DateTime, Duration, FixedOffset, NaiveTime, TimeZone, Utc};

/// Source of the current instant.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// "Now" and the start of tomorrow, captured together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockAnchor {
    pub now: DateTime<Utc>,
    /// Next local midnight after `now` in the anchor's offset.
    pub tomorrow: DateTime<Utc>,
}

impl ClockAnchor {
    /// Capture the anchor from a clock in the given local offset.
    pub fn capture(clock: &impl Clock, offset: FixedOffset) -> Self {
        Self::at(clock.now(), offset)
    }

    /// Build the anchor for a known instant.
    pub fn at(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self {
            now,
            tomorrow: local_midnight(now, offset) + Duration::days(1),
        }
    }

    /// Whether `instant` falls on the anchor's local day.
    pub fn is_today(&self, instant: DateTime<Utc>) -> bool {
        instant < self.tomorrow && instant >= self.tomorrow - Duration::days(1)
    }
}

/// Start of the local calendar day containing `instant`.
pub fn local_midnight(instant: DateTime<Utc>, offset: FixedOffset) -> DateTime<Utc> {
    let local_date = instant.with_timezone(&offset).date_naive();
    // Fixed offsets have no gaps or folds, so the local midnight is unique.
    offset
        .from_local_datetime(&local_date.and_time(NaiveTime::MIN))
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(instant)
}
