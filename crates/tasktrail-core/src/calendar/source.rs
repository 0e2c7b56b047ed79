//! File-backed calendar source.

use std::path::Path;

use super::{CalendarProvider, CalendarSource};
use crate::error::CalendarError;
use crate::schedule::CalendarEvent;

/// Reads a provider's events from the JSON array at its `events_file`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFileCalendarSource;

impl JsonFileCalendarSource {
    fn read(provider: &str, path: &Path) -> Result<Vec<CalendarEvent>, CalendarError> {
        let fetch_failed = |message: String| CalendarError::FetchFailed {
            provider: provider.to_string(),
            message,
        };
        let content = std::fs::read_to_string(path)
            .map_err(|e| fetch_failed(format!("{}: {e}", path.display())))?;
        serde_json::from_str(&content).map_err(|e| fetch_failed(e.to_string()))
    }
}

impl CalendarSource for JsonFileCalendarSource {
    fn fetch_events(&self, provider: &CalendarProvider) -> Result<Vec<CalendarEvent>, CalendarError> {
        let path = provider
            .events_file
            .as_deref()
            .ok_or_else(|| CalendarError::MissingSource {
                provider: provider.id.clone(),
            })?;
        Self::read(&provider.id, path)
    }
}
