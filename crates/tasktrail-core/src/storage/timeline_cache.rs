//! Offline calendar cache.
//!
//! Keeps the last provider events that were collected successfully so a
//! provider that cannot be reached still shows its upcoming events. Stored
//! as JSON at `<data dir>/timeline_cache.json`.

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::calendar::ProviderEvents;
use crate::error::Result;

const CACHE_FILE: &str = "timeline_cache.json";

/// File-backed cache of provider events.
#[derive(Debug, Clone)]
pub struct TimelineCache {
    path: PathBuf,
}

impl TimelineCache {
    /// Cache stored at `path`.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Cache stored in the data directory.
    pub fn in_data_dir() -> Result<Self> {
        Ok(Self::at(data_dir()?.join(CACHE_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Cached provider events, without events that ended before `now`.
    ///
    /// A missing cache file reads as empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self, now: DateTime<Utc>) -> Result<Vec<ProviderEvents>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        let mut providers: Vec<ProviderEvents> = serde_json::from_str(&content)?;
        for provider in &mut providers {
            provider.items.retain(|event| event.end() >= now);
        }
        Ok(providers)
    }

    /// Replace the cache contents.
    pub fn save(&self, providers: &[ProviderEvents]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(providers)?;
        std::fs::write(&self.path, content)?;
        tracing::debug!(path = %self.path.display(), providers = providers.len(), "saved calendar cache");
        Ok(())
    }

    /// Remove the cache file. Clearing an absent cache is not an error.
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
