//! End-to-end projection scenarios.
//!
//! Each test drives the public `project` entry point the way a front-end
//! would: one call with the full input set, then inspects the entry kinds
//! and spans that come back.

use chrono::{DateTime, Duration, FixedOffset, Utc};
use tasktrail_core::{
    project, CalendarEvent, DailyWindow, DayPlan, RecurringTaskOccurrence, Task, TimelineEntry,
    TimelineEntryKind, TimelineInput, TimelineScheduler,
};

// ============================================================================
// Test Helpers
// ============================================================================

fn at(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .unwrap()
        .with_timezone(&Utc)
}

fn window(start: &str, end: &str) -> Option<DailyWindow> {
    Some(DailyWindow::parse(start, end).unwrap())
}

fn kinds(entries: &[TimelineEntry]) -> Vec<&'static str> {
    entries.iter().map(TimelineEntry::kind_name).collect()
}

fn span(entry: &TimelineEntry) -> (DateTime<Utc>, DateTime<Utc>) {
    (entry.start, entry.end)
}

fn task_total(entries: &[TimelineEntry], task_id: &str) -> Duration {
    entries
        .iter()
        .filter(|entry| entry.task_id() == Some(task_id))
        .map(TimelineEntry::duration)
        .fold(Duration::zero(), |acc, d| acc + d)
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn long_task_splits_around_lunch() {
    let entries = project(
        at("2026-03-02T10:00:00Z"),
        &[Task::new("report", "Quarterly report", 5 * 60)],
        &[],
        &[],
        &[],
        None,
        window("09:00", "17:00"),
        window("12:00", "13:00"),
    );

    assert_eq!(
        kinds(&entries),
        vec!["SplitTask", "LunchBreakStart", "LunchBreakEnd", "SplitTask"]
    );
    assert_eq!(span(&entries[0]), (at("2026-03-02T10:00:00Z"), at("2026-03-02T12:00:00Z")));
    assert_eq!(entries[1].start, at("2026-03-02T12:00:00Z"));
    assert_eq!(entries[2].start, at("2026-03-02T13:00:00Z"));
    assert_eq!(span(&entries[3]), (at("2026-03-02T13:00:00Z"), at("2026-03-02T16:00:00Z")));
    assert_eq!(task_total(&entries, "report"), Duration::hours(5));

    match (&entries[0].kind, &entries[3].kind) {
        (
            TimelineEntryKind::SplitTask { part: 0, parts: 2, .. },
            TimelineEntryKind::SplitTask { part: 1, parts: 2, .. },
        ) => {}
        other => panic!("unexpected kinds: {other:?}"),
    }
}

#[test]
fn task_resumes_after_calendar_event() {
    let events = [CalendarEvent::new("sync", "Team sync", at("2026-03-02T14:00:00Z"), 60)];
    let entries = project(
        at("2026-03-02T13:00:00Z"),
        &[Task::new("draft", "Draft proposal", 2 * 60)],
        &[],
        &[],
        &events,
        None,
        None,
        None,
    );

    assert_eq!(kinds(&entries), vec!["SplitTask", "CalendarEvent", "SplitTask"]);
    assert_eq!(span(&entries[0]), (at("2026-03-02T13:00:00Z"), at("2026-03-02T14:00:00Z")));
    assert_eq!(span(&entries[1]), (at("2026-03-02T14:00:00Z"), at("2026-03-02T15:00:00Z")));
    assert_eq!(span(&entries[2]), (at("2026-03-02T15:00:00Z"), at("2026-03-02T16:00:00Z")));
}

#[test]
fn three_hour_task_around_calendar_event_keeps_its_full_duration() {
    let events = [CalendarEvent::new("sync", "Team sync", at("2026-03-02T14:00:00Z"), 60)];
    let entries = project(
        at("2026-03-02T13:00:00Z"),
        &[Task::new("draft", "Draft proposal", 3 * 60)],
        &[],
        &[],
        &events,
        None,
        None,
        None,
    );

    assert_eq!(kinds(&entries), vec!["SplitTask", "CalendarEvent", "SplitTask"]);
    assert_eq!(span(&entries[2]), (at("2026-03-02T15:00:00Z"), at("2026-03-02T17:00:00Z")));
    assert_eq!(task_total(&entries, "draft"), Duration::hours(3));
}

#[test]
fn empty_inputs_emit_no_markers() {
    let entries = project(
        at("2026-03-02T10:00:00Z"),
        &[],
        &[],
        &[],
        &[],
        Some("anything"),
        window("09:00", "17:00"),
        window("12:00", "13:00"),
    );
    assert!(entries.is_empty());
}

// ============================================================================
// Boundary cases
// ============================================================================

#[test]
fn lunch_touching_end_of_work_window_moves_work_to_next_day() {
    let entries = project(
        at("2026-03-02T15:00:00Z"),
        &[Task::new("a", "A", 2 * 60)],
        &[],
        &[],
        &[],
        None,
        window("09:00", "17:00"),
        window("16:00", "17:00"),
    );

    assert_eq!(
        kinds(&entries),
        vec![
            "SplitTask",
            "LunchBreakStart",
            "LunchBreakEnd",
            "WorkdayEnd",
            "DayBoundary",
            "WorkdayStart",
            "SplitTask"
        ]
    );
    assert_eq!(span(&entries[0]), (at("2026-03-02T15:00:00Z"), at("2026-03-02T16:00:00Z")));
    assert_eq!(entries[2].start, entries[3].start);
    assert_eq!(span(&entries[6]), (at("2026-03-03T09:00:00Z"), at("2026-03-03T10:00:00Z")));
}

#[test]
fn starting_exactly_at_end_of_work_window_waits_for_next_day() {
    let entries = project(
        at("2026-03-02T17:00:00Z"),
        &[Task::new("a", "A", 30)],
        &[],
        &[],
        &[],
        None,
        window("09:00", "17:00"),
        None,
    );

    assert_eq!(kinds(&entries), vec!["DayBoundary", "WorkdayStart", "Task"]);
    assert_eq!(span(&entries[2]), (at("2026-03-03T09:00:00Z"), at("2026-03-03T09:30:00Z")));
}

#[test]
fn zero_length_work_window_places_nothing() {
    let entries = project(
        at("2026-03-02T10:00:00Z"),
        &[Task::new("a", "A", 30)],
        &[],
        &[],
        &[],
        None,
        window("09:00", "09:00"),
        None,
    );
    assert!(entries.is_empty());
}

#[test]
fn lunch_covering_whole_work_window_places_nothing() {
    let entries = project(
        at("2026-03-02T10:00:00Z"),
        &[Task::new("a", "A", 30)],
        &[],
        &[],
        &[],
        None,
        window("12:00", "13:00"),
        window("11:00", "14:00"),
    );
    assert!(entries.iter().all(|entry| !entry.is_flexible()));
}

// ============================================================================
// Fixed entries and marking
// ============================================================================

#[test]
fn overdue_due_task_is_pinned_to_now() {
    let now = at("2026-03-02T10:00:00Z");
    let late = Task::new("invoice", "Send invoice", 20).with_due(at("2026-03-01T17:00:00Z"));
    let entries = project(now, &[], &[late], &[], &[], None, None, None);

    assert_eq!(entries.len(), 1);
    assert_eq!(span(&entries[0]), (now, now + Duration::minutes(20)));
    assert!(matches!(
        entries[0].kind,
        TimelineEntryKind::Task { scheduled: true, overdue: true, .. }
    ));
}

#[test]
fn fixed_entries_are_never_moved_and_may_overlap() {
    let events = [CalendarEvent::new("e1", "Call", at("2026-03-02T11:00:00Z"), 60)];
    let recurring = [RecurringTaskOccurrence {
        repeat_cfg_id: "standup".to_string(),
        title: "Standup".to_string(),
        start: at("2026-03-02T11:30:00Z"),
        duration_minutes: 15,
    }];
    let entries = project(
        at("2026-03-02T10:00:00Z"),
        &[],
        &[],
        &recurring,
        &events,
        None,
        window("09:00", "17:00"),
        None,
    );

    assert_eq!(kinds(&entries), vec!["CalendarEvent", "ScheduledRepeatOccurrence"]);
    assert_eq!(entries[1].start, at("2026-03-02T11:30:00Z"));
}

#[test]
fn current_task_is_marked_on_first_piece_only() {
    let entries = project(
        at("2026-03-02T10:00:00Z"),
        &[Task::new("other", "Other", 30), Task::new("focus", "Focus", 3 * 60)],
        &[],
        &[],
        &[],
        Some("focus"),
        window("09:00", "17:00"),
        window("12:00", "13:00"),
    );

    let current: Vec<_> = entries.iter().filter(|entry| entry.is_current()).collect();
    assert_eq!(current.len(), 1);
    assert_eq!(current[0].start, at("2026-03-02T10:30:00Z"));
    assert_eq!(current[0].task_id(), Some("focus"));
}

#[test]
fn late_queue_task_is_flagged_but_keeps_its_position() {
    let entries = project(
        at("2026-03-02T10:00:00Z"),
        &[
            Task::new("first", "First", 60),
            Task::new("dated", "Dated", 60).with_due(at("2026-03-02T10:30:00Z")),
        ],
        &[],
        &[],
        &[],
        None,
        None,
        None,
    );

    assert_eq!(entries[1].task_id(), Some("dated"));
    assert!(matches!(entries[1].kind, TimelineEntryKind::Task { overdue: true, .. }));
}

#[test]
fn work_window_follows_local_offset() {
    let scheduler = TimelineScheduler::with_plan(DayPlan {
        work_window: window("09:00", "17:00"),
        lunch_break: None,
        utc_offset: FixedOffset::east_opt(2 * 3600).unwrap(),
    });
    let input = TimelineInput {
        unscheduled: vec![Task::new("a", "A", 60)],
        ..Default::default()
    };
    // 05:00Z is 07:00 local; the window opens at 09:00 local, 07:00Z.
    let entries = scheduler.project(at("2026-03-02T05:00:00Z"), &input);

    assert_eq!(kinds(&entries), vec!["WorkdayStart", "Task"]);
    assert_eq!(span(&entries[1]), (at("2026-03-02T07:00:00Z"), at("2026-03-02T08:00:00Z")));
}

#[test]
fn entries_serialize_with_kind_tag() {
    let entries = project(
        at("2026-03-02T10:00:00Z"),
        &[Task::new("a", "A", 30)],
        &[],
        &[],
        &[],
        Some("a"),
        None,
        None,
    );
    let json = serde_json::to_value(&entries).unwrap();
    assert_eq!(json[0]["kind"], "Task");
    assert_eq!(json[0]["is_current"], true);
    assert_eq!(json[0]["task"]["task_id"], "a");

    let back: Vec<TimelineEntry> = serde_json::from_value(json).unwrap();
    assert_eq!(back, entries);
}
