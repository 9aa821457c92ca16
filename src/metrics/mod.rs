//! Metrics collection module
//!
//! Tracks lookup volume, local hit rate, fallback reliability and fallback
//! latency. Lookup failures are reported here instead of to the caller.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

/// Number of fallback latencies kept for the rolling average
const LATENCY_WINDOW: usize = 100;

/// Completion metrics collector
#[derive(Debug, Default)]
pub struct Metrics {
    lookups: AtomicU64,
    local_hits: AtomicU64,
    fallbacks: AtomicU64,
    fallback_successes: AtomicU64,
    fallback_errors: AtomicU64,
    words_learned: AtomicU64,
    /// Fallback response times (ms), newest last
    fallback_times: RwLock<Vec<u64>>,
    /// Most recent lookup failure message
    last_error: RwLock<Option<String>>,
}

impl Metrics {
    /// Create a new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a lookup request
    pub fn inc_lookup(&self) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a lookup answered from the local index
    pub fn record_local_hit(&self) {
        self.local_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a fallback to the external backend
    pub fn record_fallback(&self) {
        self.fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a successful fallback, its latency and how many new words it taught the index
    pub fn record_fallback_success(&self, time_ms: u64, learned: usize) {
        self.fallback_successes.fetch_add(1, Ordering::Relaxed);
        self.words_learned
            .fetch_add(learned as u64, Ordering::Relaxed);
        self.record_response_time(time_ms);
    }

    /// Record a failed fallback
    pub fn record_lookup_error(&self, backend: &str, error: &str) {
        self.fallback_errors.fetch_add(1, Ordering::Relaxed);
        let mut last = self
            .last_error
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *last = Some(format!("{}: {}", backend, error));
    }

    fn record_response_time(&self, time_ms: u64) {
        let mut times = self
            .fallback_times
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if times.len() >= LATENCY_WINDOW {
            times.remove(0);
        }
        times.push(time_ms);
    }

    /// Average fallback response time over the recent window
    pub fn avg_fallback_time(&self) -> Option<u64> {
        let times = self
            .fallback_times
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if times.is_empty() {
            None
        } else {
            Some(times.iter().sum::<u64>() / times.len() as u64)
        }
    }

    /// Percentage of fallbacks that succeeded
    pub fn fallback_reliability(&self) -> f64 {
        let successes = self.fallback_successes.load(Ordering::Relaxed);
        let errors = self.fallback_errors.load(Ordering::Relaxed);

        let total = successes + errors;
        if total == 0 {
            100.0
        } else {
            (successes as f64 / total as f64) * 100.0
        }
    }

    /// Point-in-time copy of all counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            lookups: self.lookups.load(Ordering::Relaxed),
            local_hits: self.local_hits.load(Ordering::Relaxed),
            fallbacks: self.fallbacks.load(Ordering::Relaxed),
            fallback_errors: self.fallback_errors.load(Ordering::Relaxed),
            words_learned: self.words_learned.load(Ordering::Relaxed),
            avg_fallback_ms: self.avg_fallback_time(),
            fallback_reliability: self.fallback_reliability(),
            last_error: self
                .last_error
                .read()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .clone(),
        }
    }
}

/// Serializable metrics view
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub lookups: u64,
    pub local_hits: u64,
    pub fallbacks: u64,
    pub fallback_errors: u64,
    pub words_learned: u64,
    pub avg_fallback_ms: Option<u64>,
    pub fallback_reliability: f64,
    pub last_error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics() {
        let metrics = Metrics::new();

        metrics.inc_lookup();
        metrics.record_fallback();
        metrics.record_fallback_success(100, 3);
        metrics.inc_lookup();
        metrics.record_local_hit();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.lookups, 2);
        assert_eq!(snapshot.local_hits, 1);
        assert_eq!(snapshot.words_learned, 3);
        assert_eq!(snapshot.avg_fallback_ms, Some(100));
        assert_eq!(snapshot.fallback_reliability, 100.0);
    }

    #[test]
    fn test_lookup_error_recorded() {
        let metrics = Metrics::new();
        metrics.record_fallback_success(10, 0);
        metrics.record_lookup_error("wikipedia", "timed out");

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.fallback_errors, 1);
        assert_eq!(snapshot.fallback_reliability, 50.0);
        assert_eq!(snapshot.last_error.as_deref(), Some("wikipedia: timed out"));
    }

    #[test]
    fn test_latency_window() {
        let metrics = Metrics::new();
        for _ in 0..LATENCY_WINDOW {
            metrics.record_fallback_success(1000, 0);
        }
        for _ in 0..LATENCY_WINDOW {
            metrics.record_fallback_success(10, 0);
        }
        assert_eq!(metrics.avg_fallback_time(), Some(10));
    }
}
