// Application state module
// Holds the process-wide response time and cached config values

use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use super::types::Config;

/// The latency value reported by `/metrics`.
///
/// Starts absent and is overwritten by every set request; there is no
/// way back to absent. The stored string is never re-parsed.
#[derive(Debug, Default)]
pub struct ResponseTime {
    value: RwLock<Option<String>>,
}

impl ResponseTime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value, if one has been set
    pub async fn get(&self) -> Option<String> {
        self.value.read().await.clone()
    }

    /// Replace the current value (last write wins)
    pub async fn set(&self, value: impl Into<String>) {
        *self.value.write().await = Some(value.into());
    }
}

/// Application state
pub struct AppState {
    pub response_time: ResponseTime,

    // Cached config values for fast access without locks
    pub cached_access_log: AtomicBool,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            response_time: ResponseTime::new(),
            cached_access_log: AtomicBool::new(config.logging.access_log),
        }
    }

    pub fn access_log_enabled(&self) -> bool {
        self.cached_access_log.load(Ordering::Relaxed)
    }
}
