//! Display surfaces for suggestion lists

use serde::Serialize;
use std::io::Write;
use tracing::warn;

/// Ordered suggestions plus whether they come from the recency list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionList {
    pub items: Vec<String>,
    pub is_history: bool,
}

impl SuggestionList {
    /// Suggestions from the index or a fallback lookup
    pub fn live(items: Vec<String>) -> Self {
        Self {
            items,
            is_history: false,
        }
    }

    /// Previously accepted queries
    pub fn history(items: Vec<String>) -> Self {
        Self {
            items,
            is_history: true,
        }
    }

    /// Row marker used by text displays
    pub fn icon(&self) -> &'static str {
        if self.is_history {
            "⏳"
        } else {
            "🔍"
        }
    }
}

/// Something that can render a suggestion list
pub trait DisplaySink {
    /// Replace the current suggestions
    fn show(&mut self, list: SuggestionList);

    /// Remove all suggestions
    fn clear(&mut self);
}

/// Writes suggestion rows to a text stream
pub struct ConsoleDisplay<W> {
    out: W,
}

impl<W: Write> ConsoleDisplay<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DisplaySink for ConsoleDisplay<W> {
    fn show(&mut self, list: SuggestionList) {
        let icon = list.icon();
        let mut rendered = String::new();
        for item in &list.items {
            rendered.push_str(&format!("  {} {}\n", icon, item));
        }
        if let Err(e) = self.out.write_all(rendered.as_bytes()).and_then(|_| self.out.flush()) {
            warn!("Failed to write suggestions: {}", e);
        }
    }

    fn clear(&mut self) {
        if let Err(e) = writeln!(self.out, "  (no suggestions)") {
            warn!("Failed to write suggestions: {}", e);
        }
    }
}
