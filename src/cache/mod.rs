//! Process-wide caches.
//!
//! The evidence retriever and the NLI scorer each hold a [`CacheHandle`]. Handles are injected
//! at construction so tests and concurrent pipelines can share or isolate them explicitly.

pub mod store;


pub use store::{CacheHandle, CacheStore};
