//! Calendar provider collection.
//!
//! Each enabled provider is fetched on its own: one failing provider is
//! reported and skipped while the others still contribute events. Events
//! the user already turned into tasks are dropped before they reach the
//! timeline.

mod source;

pub use source::JsonFileCalendarSource;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

use crate::error::CalendarError;
use crate::schedule::CalendarEvent;

/// A configured calendar provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarProvider {
    pub id: String,
    /// Display icon attached to every event of this provider.
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// JSON file holding the provider's events.
    #[serde(default)]
    pub events_file: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

/// Events collected from one provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEvents {
    pub provider_id: String,
    pub icon: Option<String>,
    pub items: Vec<CalendarEvent>,
}

/// A provider that could not be fetched this round.
#[derive(Debug)]
pub struct ProviderFailure {
    pub provider_id: String,
    pub error: CalendarError,
}

/// Outcome of one collection round.
#[derive(Debug, Default)]
pub struct CalendarCollection {
    pub providers: Vec<ProviderEvents>,
    pub failures: Vec<ProviderFailure>,
}

impl CalendarCollection {
    /// All collected events, tagged with their provider's icon.
    pub fn events(&self) -> Vec<CalendarEvent> {
        flatten_provider_events(&self.providers)
    }

    /// Replace failed providers with their cached events, if any.
    pub fn fill_from_cache(&mut self, cached: &[ProviderEvents]) {
        for failure in &self.failures {
            if let Some(entry) = cached.iter().find(|c| c.provider_id == failure.provider_id) {
                tracing::info!(
                    provider = %failure.provider_id,
                    events = entry.items.len(),
                    "using cached events for failed calendar provider"
                );
                self.providers.push(entry.clone());
            }
        }
        self.providers.sort_by(|a, b| a.provider_id.cmp(&b.provider_id));
    }
}

/// Fetches events for a provider.
///
/// Implementations must not retry; a failed fetch is reported as-is and the
/// caller decides what to show instead.
pub trait CalendarSource: Send + Sync {
    fn fetch_events(&self, provider: &CalendarProvider) -> Result<Vec<CalendarEvent>, CalendarError>;
}

/// Fetch every enabled provider independently.
///
/// # Arguments
/// * `source` - Where provider events come from
/// * `providers` - Configured providers; disabled ones are skipped
/// * `materialized_event_ids` - Event ids already present as tasks
pub fn collect_provider_events(
    source: &dyn CalendarSource,
    providers: &[CalendarProvider],
    materialized_event_ids: &HashSet<String>,
) -> CalendarCollection {
    let mut collection = CalendarCollection::default();

    for provider in providers.iter().filter(|p| p.enabled) {
        match source.fetch_events(provider) {
            Ok(events) => {
                let items: Vec<CalendarEvent> = events
                    .into_iter()
                    .filter(|event| !materialized_event_ids.contains(&event.id))
                    .collect();
                tracing::debug!(provider = %provider.id, events = items.len(), "collected calendar events");
                collection.providers.push(ProviderEvents {
                    provider_id: provider.id.clone(),
                    icon: provider.icon.clone(),
                    items,
                });
            }
            Err(error) => {
                tracing::warn!(provider = %provider.id, %error, "calendar provider fetch failed");
                collection.failures.push(ProviderFailure {
                    provider_id: provider.id.clone(),
                    error,
                });
            }
        }
    }

    collection.providers.sort_by(|a, b| a.provider_id.cmp(&b.provider_id));
    collection
}

/// Flatten provider groups into events carrying the provider icon.
pub fn flatten_provider_events(providers: &[ProviderEvents]) -> Vec<CalendarEvent> {
    providers
        .iter()
        .flat_map(|provider| {
            provider.items.iter().map(move |event| CalendarEvent {
                icon: event.icon.clone().or_else(|| provider.icon.clone()),
                ..event.clone()
            })
        })
        .collect()
}
