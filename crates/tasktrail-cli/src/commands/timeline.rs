//! Timeline commands for CLI.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use clap::Subcommand;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tasktrail_core::calendar::{collect_provider_events, JsonFileCalendarSource};
use tasktrail_core::{
    CalendarEvent, Clock, ClockAnchor, Config, SystemClock, TimelineCache, TimelineEntry,
    TimelineEntryKind, TimelineInput, TimelineScheduler, TimelineSnapshot,
};

#[derive(Subcommand)]
pub enum TimelineAction {
    /// Project the timeline from a snapshot file
    Show {
        /// JSON snapshot with unscheduled, due_tasks, recurring, calendar_events, current_task_id
        #[arg(long)]
        input: PathBuf,
        /// Instant to project from (RFC 3339); defaults to the snapshot's `now`, then the clock
        #[arg(long)]
        now: Option<DateTime<Utc>>,
        /// Print entries as JSON
        #[arg(long)]
        json: bool,
        /// Skip configured calendar providers and the cache
        #[arg(long)]
        no_calendar: bool,
    },
}

pub fn run(action: TimelineAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TimelineAction::Show {
            input,
            now,
            json,
            no_calendar,
        } => {
            let config = Config::load()?;
            let plan = config.day_plan()?;
            let snapshot = read_snapshot(&input)?;
            let now = now.or(snapshot.now).unwrap_or_else(|| SystemClock.now());

            let mut provider_events = Vec::new();
            if !no_calendar && !config.calendar.providers.is_empty() {
                provider_events = collect_calendar(&config, &snapshot, now)?;
            }

            let mut input = TimelineInput::from(snapshot);
            input.calendar_events.extend(provider_events);

            let entries = TimelineScheduler::with_plan(plan).project(now, &input);
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                print_agenda(&entries, ClockAnchor::at(now, plan.utc_offset), plan.utc_offset);
            }
        }
    }
    Ok(())
}

fn read_snapshot(path: &Path) -> Result<TimelineSnapshot, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    Ok(serde_json::from_str(&content)?)
}

/// Fetch every enabled provider, fall back to the cache for failures and
/// refresh the cache with what was collected.
fn collect_calendar(
    config: &Config,
    snapshot: &TimelineSnapshot,
    now: DateTime<Utc>,
) -> Result<Vec<CalendarEvent>, Box<dyn std::error::Error>> {
    let materialized: HashSet<String> = snapshot.materialized_event_ids().into_iter().collect();
    let mut collection =
        collect_provider_events(&JsonFileCalendarSource, &config.calendar.providers, &materialized);

    let cache = TimelineCache::in_data_dir()?;
    if !collection.failures.is_empty() {
        match cache.load(now) {
            Ok(cached) => collection.fill_from_cache(&cached),
            Err(error) => tracing::warn!(%error, "calendar cache unreadable"),
        }
    }
    if let Err(error) = cache.save(&collection.providers) {
        tracing::warn!(%error, "failed to update calendar cache");
    }

    Ok(collection.events())
}

fn print_agenda(entries: &[TimelineEntry], anchor: ClockAnchor, offset: FixedOffset) {
    if entries.is_empty() {
        println!("nothing scheduled");
        return;
    }

    let mut current_day: Option<NaiveDate> = None;
    for entry in entries {
        let local_start = entry.start.with_timezone(&offset);
        let day = local_start.date_naive();
        if current_day != Some(day) {
            if current_day.is_some() {
                println!();
            }
            println!("{}", day_heading(entry.start, day, anchor));
            current_day = Some(day);
        }

        let time = if entry.is_marker() {
            format!("{}      ", local_start.format("%H:%M"))
        } else {
            format!(
                "{}-{}",
                local_start.format("%H:%M"),
                entry.end.with_timezone(&offset).format("%H:%M")
            )
        };
        println!("  {time}  {}", describe(entry));
    }
}

fn day_heading(start: DateTime<Utc>, day: NaiveDate, anchor: ClockAnchor) -> String {
    if anchor.is_today(start) {
        format!("Today ({day})")
    } else if start >= anchor.tomorrow && start < anchor.tomorrow + chrono::Duration::days(1) {
        format!("Tomorrow ({day})")
    } else {
        day.format("%A %Y-%m-%d").to_string()
    }
}

fn describe(entry: &TimelineEntry) -> String {
    let current = if entry.is_current() { " [current]" } else { "" };
    match &entry.kind {
        TimelineEntryKind::Task {
            task,
            scheduled,
            overdue,
            ..
        } => {
            let mut label = task.title.clone();
            if *scheduled {
                label.push_str(" (due)");
            }
            if *overdue {
                label.push_str(" (overdue)");
            }
            format!("{label}{current}")
        }
        TimelineEntryKind::SplitTask {
            task, part, parts, ..
        } => format!("{} ({}/{}){current}", task.title, part + 1, parts),
        TimelineEntryKind::ScheduledRepeatOccurrence { title, .. } => format!("{title} (repeat)"),
        TimelineEntryKind::CalendarEvent { title, icon, .. } => match icon {
            Some(icon) => format!("{title} [{icon}]"),
            None => title.clone(),
        },
        TimelineEntryKind::WorkdayStart => "-- workday starts --".to_string(),
        TimelineEntryKind::WorkdayEnd => "-- workday ends --".to_string(),
        TimelineEntryKind::LunchBreakStart => "-- lunch break --".to_string(),
        TimelineEntryKind::LunchBreakEnd => "-- back from lunch --".to_string(),
        TimelineEntryKind::DayBoundary => "-- new day --".to_string(),
    }
}
