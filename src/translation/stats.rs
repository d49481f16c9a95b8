/*!
 * Process-wide translation counters.
 */

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Snapshot of the session counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationStats {
    /// Translate requests served since start
    pub total_translations: u64,

    /// Glossaries currently held by the store
    pub glossaries_loaded: usize,

    /// Whole seconds since the session started
    pub uptime_seconds: u64,
}

/// Live counters owned by a session
#[derive(Debug)]
pub struct StatsTracker {
    started_at: Instant,
    translations: AtomicU64,
}

impl StatsTracker {
    /// Start counting from now.
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
            translations: AtomicU64::new(0),
        }
    }

    /// Count one served translate request.
    pub fn record_translation(&self) -> u64 {
        self.translations.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Number of translate requests served.
    pub fn total_translations(&self) -> u64 {
        self.translations.load(Ordering::Relaxed)
    }

    /// Seconds since construction.
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    /// Build a snapshot; the glossary count comes from the store.
    pub fn snapshot(&self, glossaries_loaded: usize) -> TranslationStats {
        TranslationStats {
            total_translations: self.total_translations(),
            glossaries_loaded,
            uptime_seconds: self.uptime_seconds(),
        }
    }
}

impl Default for StatsTracker {
    fn default() -> Self {
        Self::new()
    }
}
