//! Prefix-Complete: local-first autocomplete
//!
//! Words live in an incremental prefix index. Queries the index cannot
//! answer go to an external lookup backend, and whatever the backend
//! returns is folded back into the index so the next identical query is a
//! local hit.

pub mod autocomplete;
pub mod config;
pub mod controller;
pub mod history;
pub mod index;
pub mod metrics;
pub mod network;
pub mod web;

pub use autocomplete::{CompletionService, LookupError, WordLookup};
pub use config::Settings;
pub use index::{PrefixIndex, SharedIndex};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
