//! Autocomplete: external lookup backends and the completion service
//!
//! The completion service consults the local prefix index first and only
//! calls an external backend on a miss.

mod backends;
mod error;
mod service;

pub use backends::{
    get_backend, list_backends, parse_opensearch, Brave, DuckDuckGo, Wikipedia, WordLookup,
};
pub use error::LookupError;
pub use service::CompletionService;

#[cfg(test)]
pub(crate) use service::tests::{seeded_index, FakeLookup};
