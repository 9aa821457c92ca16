//! Interaction controller
//!
//! Turns a stream of raw input events into debounced query submissions,
//! forwards them to the completion service and routes the answers (or the
//! recency list, for an empty query) to a display.

mod display;

pub use display::{ConsoleDisplay, DisplaySink, SuggestionList};

use crate::autocomplete::CompletionService;
use crate::history::SearchHistory;
use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use futures::FutureExt;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, trace};

/// Raw event from the input source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Current contents of the input box
    Query(String),
    /// The user picked a suggestion
    Accept(String),
}

/// What a settled query turns into
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Blank input: show the recency list
    ShowHistory,
    /// Normalised query to complete
    Lookup(String),
}

impl Submission {
    /// Trim and lower-case raw input
    pub fn from_raw(raw: &str) -> Self {
        let query = raw.trim().to_lowercase();
        if query.is_empty() {
            Submission::ShowHistory
        } else {
            Submission::Lookup(query)
        }
    }
}

type InFlight = FuturesUnordered<BoxFuture<'static, (u64, Vec<String>)>>;

/// Debouncing front end for a [`CompletionService`]
///
/// Each submitted query gets a generation number. Lookups are never
/// cancelled, so a slow fallback still teaches the index, but only the
/// answer for the latest generation reaches the display.
pub struct InteractionController<D> {
    service: CompletionService,
    history: SearchHistory,
    display: D,
    debounce: Duration,
    generation: u64,
}

impl<D: DisplaySink> InteractionController<D> {
    /// Create a new controller
    pub fn new(service: CompletionService, history: SearchHistory, display: D) -> Self {
        Self {
            service,
            history,
            display,
            debounce: Duration::from_millis(300),
            generation: 0,
        }
    }

    /// Set the quiet period before a query is submitted
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Accepted queries so far
    pub fn history(&self) -> &SearchHistory {
        &self.history
    }

    /// Process events until the source closes and pending work drains.
    ///
    /// Returns the display so callers can inspect or reuse it.
    pub async fn run(mut self, mut events: mpsc::Receiver<InputEvent>) -> D {
        let mut pending: Option<String> = None;
        let mut in_flight = InFlight::new();
        let mut open = true;

        let settle = tokio::time::sleep(self.debounce);
        tokio::pin!(settle);

        loop {
            tokio::select! {
                event = events.recv(), if open => match event {
                    Some(InputEvent::Query(raw)) => {
                        trace!("Input changed: {:?}", raw);
                        pending = Some(raw);
                        settle.as_mut().reset(Instant::now() + self.debounce);
                    }
                    Some(InputEvent::Accept(choice)) => {
                        pending = None;
                        self.accept(&choice);
                    }
                    None => open = false,
                },
                () = &mut settle, if pending.is_some() => {
                    if let Some(raw) = pending.take() {
                        self.submit(&raw, &mut in_flight);
                    }
                }
                Some((generation, words)) = in_flight.next(), if !in_flight.is_empty() => {
                    if generation == self.generation {
                        self.present(SuggestionList::live(words));
                    } else {
                        debug!(
                            "Dropping stale result (generation {} < {})",
                            generation, self.generation
                        );
                    }
                }
                else => break,
            }
        }

        self.display
    }

    fn submit(&mut self, raw: &str, in_flight: &mut InFlight) {
        self.generation += 1;
        let generation = self.generation;

        match Submission::from_raw(raw) {
            Submission::ShowHistory => {
                self.present(SuggestionList::history(self.history.queries()));
            }
            Submission::Lookup(query) => {
                debug!("Submitting '{}' (generation {})", query, generation);
                let service = self.service.clone();
                in_flight.push(
                    async move {
                        let words = service.lookup(&query).await;
                        (generation, words)
                    }
                    .boxed(),
                );
            }
        }
    }

    fn accept(&mut self, choice: &str) {
        // Invalidate anything still in flight
        self.generation += 1;
        if self.history.accept(choice) {
            debug!("Accepted '{}'", choice.trim());
        }
        self.display.clear();
    }

    fn present(&mut self, list: SuggestionList) {
        if list.items.is_empty() {
            self.display.clear();
        } else {
            self.display.show(list);
        }
    }
}
