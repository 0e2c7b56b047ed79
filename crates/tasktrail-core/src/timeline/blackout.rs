//! Daily blackout windows.
//!
//! A work window, when set, is the only part of each local day open to
//! flexible work. A lunch break is closed on top of that. Both recur every
//! day in the resolver's UTC offset.

use chrono::{DateTime, Duration, FixedOffset, Offset, Utc};

use super::entry::MarkerKind;
use crate::clock::local_midnight;
use crate::schedule::{DailyWindow, LunchBreak, WorkWindow};

const SECONDS_PER_DAY: u32 = 24 * 60 * 60;

/// Answers availability questions for flexible placement.
#[derive(Debug, Clone)]
pub struct BlackoutWindowResolver {
    offset: FixedOffset,
    work_window: Option<WorkWindow>,
    lunch_break: Option<LunchBreak>,
    /// Open intervals of one local day in seconds from midnight; sorted,
    /// disjoint and non-empty.
    available: Vec<(u32, u32)>,
}

impl BlackoutWindowResolver {
    pub fn new(
        work_window: Option<WorkWindow>,
        lunch_break: Option<LunchBreak>,
        offset: FixedOffset,
    ) -> Self {
        let base = match work_window {
            Some(window) => window.day_intervals(),
            None => vec![(0, SECONDS_PER_DAY)],
        };
        let closed = lunch_break
            .map(|window| window.day_intervals())
            .unwrap_or_default();

        Self {
            offset,
            work_window,
            lunch_break,
            available: subtract_intervals(base, &closed),
        }
    }

    /// A resolver with no blackout at all, in UTC.
    pub fn unrestricted() -> Self {
        Self::new(None, None, utc())
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Whether any part of a day is open. A lunch break covering the whole
    /// work window, or a zero-length work window, leaves nothing.
    pub fn has_availability(&self) -> bool {
        !self.available.is_empty()
    }

    pub fn is_blackout(&self, instant: DateTime<Utc>) -> bool {
        let (_, into_day) = self.day_position(instant);
        !self
            .available
            .iter()
            .any(|&(start, end)| secs(start) <= into_day && into_day < secs(end))
    }

    /// The first open instant at or after `instant`.
    ///
    /// Returns `instant` unchanged when it is already open, and `None` when
    /// the configuration leaves no open time on any day.
    pub fn next_available(&self, instant: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let first = self.available.first()?;
        let (day_start, into_day) = self.day_position(instant);

        for &(start, end) in &self.available {
            if into_day < secs(end) {
                return Some(if into_day >= secs(start) {
                    instant
                } else {
                    day_start + secs(start)
                });
            }
        }

        Some(day_start + Duration::days(1) + secs(first.0))
    }

    /// End of the open run containing `instant`.
    ///
    /// Runs touching midnight on both sides continue into the next day.
    /// `None` means the run never ends (whole days are open). A blacked-out
    /// `instant` returns itself.
    pub fn available_until(&self, instant: DateTime<Utc>) -> Option<DateTime<Utc>> {
        if self.available == [(0, SECONDS_PER_DAY)] {
            return None;
        }
        let (day_start, into_day) = self.day_position(instant);
        let Some(&(_, end)) = self
            .available
            .iter()
            .find(|&&(start, end)| secs(start) <= into_day && into_day < secs(end))
        else {
            return Some(instant);
        };

        match self.available.first() {
            Some(&(0, next_end)) if end == SECONDS_PER_DAY => {
                Some(day_start + Duration::days(1) + secs(next_end))
            }
            _ => Some(day_start + secs(end)),
        }
    }

    /// Boundary markers falling in `(from, to]`, sorted by instant and rank.
    pub fn boundaries_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Vec<(DateTime<Utc>, MarkerKind)> {
        let mut markers = Vec::new();
        if to <= from {
            return markers;
        }

        let mut day = local_midnight(from, self.offset);
        while day <= to {
            markers.push((day, MarkerKind::DayBoundary));
            if let Some(window) = self.work_window {
                push_window(&mut markers, day, window, MarkerKind::WorkdayStart, MarkerKind::WorkdayEnd);
            }
            if let Some(window) = self.lunch_break {
                push_window(
                    &mut markers,
                    day,
                    window,
                    MarkerKind::LunchBreakStart,
                    MarkerKind::LunchBreakEnd,
                );
            }
            day += Duration::days(1);
        }

        markers.retain(|&(at, _)| from < at && at <= to);
        markers.sort();
        markers.dedup();
        markers
    }

    fn day_position(&self, instant: DateTime<Utc>) -> (DateTime<Utc>, Duration) {
        let day_start = local_midnight(instant, self.offset);
        (day_start, instant - day_start)
    }
}

impl Default for BlackoutWindowResolver {
    fn default() -> Self {
        Self::unrestricted()
    }
}

fn push_window(
    markers: &mut Vec<(DateTime<Utc>, MarkerKind)>,
    day: DateTime<Utc>,
    window: DailyWindow,
    opens: MarkerKind,
    closes: MarkerKind,
) {
    if window.start == window.end {
        return;
    }
    markers.push((day + window.start.as_duration(), opens));
    markers.push((day + window.end.as_duration(), closes));
}

fn secs(seconds: u32) -> Duration {
    Duration::seconds(i64::from(seconds))
}

fn utc() -> FixedOffset {
    Utc.fix()
}

/// Remove every `closed` interval from `base`.
fn subtract_intervals(base: Vec<(u32, u32)>, closed: &[(u32, u32)]) -> Vec<(u32, u32)> {
    let mut open = base;
    for &(closed_start, closed_end) in closed {
        open = open
            .into_iter()
            .flat_map(|(start, end)| {
                if closed_end <= start || closed_start >= end {
                    return vec![(start, end)];
                }
                let mut kept = Vec::with_capacity(2);
                if start < closed_start {
                    kept.push((start, closed_start));
                }
                if closed_end < end {
                    kept.push((closed_end, end));
                }
                kept
            })
            .collect();
    }
    open.retain(|(start, end)| start < end);
    open.sort_unstable();
    open
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(value: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(value)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn window(start: &str, end: &str) -> DailyWindow {
        DailyWindow::parse(start, end).unwrap()
    }

    fn office_hours() -> BlackoutWindowResolver {
        BlackoutWindowResolver::new(
            Some(window("09:00", "17:00")),
            Some(window("12:00", "13:00")),
            utc(),
        )
    }

    #[test]
    fn no_windows_means_always_available() {
        let resolver = BlackoutWindowResolver::unrestricted();
        let t = at("2026-03-02T03:17:00Z");
        assert!(!resolver.is_blackout(t));
        assert_eq!(resolver.next_available(t), Some(t));
        assert_eq!(resolver.available_until(t), None);
    }

    #[test]
    fn work_window_bounds_the_day() {
        let resolver = office_hours();
        assert!(resolver.is_blackout(at("2026-03-02T08:59:00Z")));
        assert!(!resolver.is_blackout(at("2026-03-02T09:00:00Z")));
        assert!(resolver.is_blackout(at("2026-03-02T12:30:00Z")));
        assert!(!resolver.is_blackout(at("2026-03-02T13:00:00Z")));
        assert!(resolver.is_blackout(at("2026-03-02T17:00:00Z")));
    }

    #[test]
    fn next_available_keeps_open_instants() {
        let resolver = office_hours();
        let t = at("2026-03-02T10:15:00Z");
        assert_eq!(resolver.next_available(t), Some(t));
    }

    #[test]
    fn next_available_skips_lunch_and_rolls_over_midnight() {
        let resolver = office_hours();
        assert_eq!(
            resolver.next_available(at("2026-03-02T12:00:00Z")),
            Some(at("2026-03-02T13:00:00Z"))
        );
        assert_eq!(
            resolver.next_available(at("2026-03-02T07:00:00Z")),
            Some(at("2026-03-02T09:00:00Z"))
        );
        assert_eq!(
            resolver.next_available(at("2026-03-02T18:00:00Z")),
            Some(at("2026-03-03T09:00:00Z"))
        );
    }

    #[test]
    fn lunch_only_rolls_to_next_open_instant() {
        let resolver = BlackoutWindowResolver::new(None, Some(window("12:00", "13:00")), utc());
        assert_eq!(
            resolver.next_available(at("2026-03-02T12:10:00Z")),
            Some(at("2026-03-02T13:00:00Z"))
        );
        // Open run from 13:00 crosses midnight and lasts until next lunch.
        assert_eq!(
            resolver.available_until(at("2026-03-02T23:00:00Z")),
            Some(at("2026-03-03T12:00:00Z"))
        );
    }

    #[test]
    fn lunch_covering_work_window_leaves_no_availability() {
        let resolver = BlackoutWindowResolver::new(
            Some(window("12:00", "13:00")),
            Some(window("11:00", "14:00")),
            utc(),
        );
        assert!(!resolver.has_availability());
        assert!(resolver.is_blackout(at("2026-03-02T12:30:00Z")));
        assert_eq!(resolver.next_available(at("2026-03-02T12:30:00Z")), None);
    }

    #[test]
    fn zero_length_work_window_leaves_no_availability() {
        let resolver = BlackoutWindowResolver::new(Some(window("09:00", "09:00")), None, utc());
        assert!(!resolver.has_availability());
        assert_eq!(resolver.next_available(at("2026-03-02T09:00:00Z")), None);
    }

    #[test]
    fn lunch_back_to_back_with_end_of_work() {
        let resolver = BlackoutWindowResolver::new(
            Some(window("09:00", "17:00")),
            Some(window("16:00", "17:00")),
            utc(),
        );
        assert_eq!(
            resolver.available_until(at("2026-03-02T15:00:00Z")),
            Some(at("2026-03-02T16:00:00Z"))
        );
        assert_eq!(
            resolver.next_available(at("2026-03-02T16:00:00Z")),
            Some(at("2026-03-03T09:00:00Z"))
        );
    }

    #[test]
    fn overnight_work_window_wraps() {
        let resolver = BlackoutWindowResolver::new(Some(window("22:00", "02:00")), None, utc());
        assert!(!resolver.is_blackout(at("2026-03-02T23:00:00Z")));
        assert!(!resolver.is_blackout(at("2026-03-03T01:00:00Z")));
        assert!(resolver.is_blackout(at("2026-03-03T03:00:00Z")));
        assert_eq!(
            resolver.available_until(at("2026-03-02T23:00:00Z")),
            Some(at("2026-03-03T02:00:00Z"))
        );
        assert_eq!(
            resolver.next_available(at("2026-03-03T02:00:00Z")),
            Some(at("2026-03-03T22:00:00Z"))
        );
    }

    #[test]
    fn windows_follow_local_offset() {
        // 09:00-17:00 in UTC+2 is 07:00-15:00 UTC.
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let resolver = BlackoutWindowResolver::new(Some(window("09:00", "17:00")), None, offset);
        assert!(resolver.is_blackout(at("2026-03-02T06:59:00Z")));
        assert!(!resolver.is_blackout(at("2026-03-02T07:00:00Z")));
        assert_eq!(
            resolver.next_available(at("2026-03-02T15:00:00Z")),
            Some(at("2026-03-03T07:00:00Z"))
        );
    }

    #[test]
    fn boundaries_cover_half_open_span() {
        let resolver = office_hours();
        let markers = resolver.boundaries_between(at("2026-03-02T10:00:00Z"), at("2026-03-03T09:00:00Z"));
        let kinds: Vec<_> = markers.iter().map(|(_, kind)| *kind).collect();
        assert_eq!(
            kinds,
            vec![
                MarkerKind::LunchBreakStart,
                MarkerKind::LunchBreakEnd,
                MarkerKind::WorkdayEnd,
                MarkerKind::DayBoundary,
                MarkerKind::WorkdayStart,
            ]
        );
        assert_eq!(markers[3].0, at("2026-03-03T00:00:00Z"));
        assert_eq!(markers[4].0, at("2026-03-03T09:00:00Z"));
    }

    #[test]
    fn boundaries_empty_for_empty_span() {
        let resolver = office_hours();
        let t = at("2026-03-02T10:00:00Z");
        assert!(resolver.boundaries_between(t, t).is_empty());
    }
}
