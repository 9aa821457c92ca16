//! HTTP networking module
//!
//! Provides the HTTP client used by external lookup backends.

mod client;

pub use client::{FetchResponse, HttpClient};
