//! Application state shared across handlers

use crate::autocomplete::CompletionService;
use crate::config::Settings;
use crate::history::SearchHistory;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::{Arc, Mutex, MutexGuard};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Local-first completion
    pub service: CompletionService,
    /// Accepted queries, shown for an empty query
    pub history: Arc<Mutex<SearchHistory>>,
    /// Template renderer
    pub templates: Arc<super::Templates>,
    /// Guards the suggestion endpoints
    pub limiter: Arc<DefaultDirectRateLimiter>,
}

impl AppState {
    /// Create new application state
    pub fn new(settings: Settings, service: CompletionService) -> anyhow::Result<Self> {
        let per_second = NonZeroU32::new(settings.server.requests_per_second)
            .ok_or_else(|| anyhow::anyhow!("server.requests_per_second must be positive"))?;
        let limiter = RateLimiter::direct(Quota::per_second(per_second));
        let history = SearchHistory::new(settings.autocomplete.history_size);

        Ok(Self {
            settings: Arc::new(settings),
            service,
            history: Arc::new(Mutex::new(history)),
            templates: Arc::new(super::Templates::new()?),
            limiter: Arc::new(limiter),
        })
    }

    /// Get instance name
    pub fn instance_name(&self) -> &str {
        &self.settings.general.instance_name
    }

    /// Lock the recency list
    pub fn history(&self) -> MutexGuard<'_, SearchHistory> {
        self.history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
