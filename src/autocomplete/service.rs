//! Local-first completion with external fallback

use super::WordLookup;
use crate::index::{self, SharedIndex};
use crate::metrics::Metrics;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Answers queries from the prefix index, falling back to an external
/// backend on a miss and folding its answers back into the index.
#[derive(Clone)]
pub struct CompletionService {
    index: SharedIndex,
    backend: Arc<dyn WordLookup>,
    metrics: Arc<Metrics>,
}

impl CompletionService {
    /// Create a new completion service
    pub fn new(index: SharedIndex, backend: Arc<dyn WordLookup>, metrics: Arc<Metrics>) -> Self {
        Self {
            index,
            backend,
            metrics,
        }
    }

    /// Complete a trimmed, non-empty query.
    ///
    /// A local hit is returned as is and never touches the backend. On a miss
    /// the backend is called exactly once; its words are inserted into the
    /// index and returned verbatim. Backend failures yield an empty list.
    pub async fn lookup(&self, query: &str) -> Vec<String> {
        self.metrics.inc_lookup();

        let local = index::read(&self.index).autocomplete(query);
        if !local.is_empty() {
            debug!("Local hit for '{}': {} words", query, local.len());
            self.metrics.record_local_hit();
            return local;
        }

        debug!("Local miss for '{}', asking {}", query, self.backend.name());
        self.metrics.record_fallback();
        let start = Instant::now();

        match self.backend.lookup(query).await {
            Ok(words) => {
                let learned = {
                    let mut index = index::write(&self.index);
                    words.iter().filter(|word| index.insert(word)).count()
                };
                self.metrics
                    .record_fallback_success(start.elapsed().as_millis() as u64, learned);
                debug!(
                    "{} returned {} words for '{}' ({} new)",
                    self.backend.name(),
                    words.len(),
                    query,
                    learned
                );
                words
            }
            Err(e) => {
                warn!("Lookup for '{}' via {} failed: {}", query, self.backend.name(), e);
                self.metrics
                    .record_lookup_error(self.backend.name(), &e.to_string());
                Vec::new()
            }
        }
    }

    /// Shared handle to the underlying index
    pub fn index(&self) -> &SharedIndex {
        &self.index
    }

    /// Metrics sink for this service
    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    /// Name of the fallback backend
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }
}
