//! # Scout Cache
//!
//! A bounded, disk-persisted, key-derived LRU cache for expensive lookups.
//!
//! The cache pairs an insertion-ordered map with least-recently-used
//! eviction, a pluggable key-derivation strategy, and whole-file JSON
//! persistence. It is built for the "one expensive answer per question per
//! day" pattern: the stock-news key strategy embeds the current calendar
//! date, so entries expire naturally when the date rolls over without any
//! TTL bookkeeping.
//!
//! Failures never reach the caller: a missing or corrupt backing file
//! degrades to a cold cache, and a failed persist leaves the in-memory
//! state authoritative. All failures are reported through `tracing` only.
//!
//! Sharing one backing file between processes is unsupported; concurrent
//! processes may overwrite each other's saves.

pub mod cache;
pub mod error;
pub mod key;

pub use cache::PersistentCache;
pub use error::CacheError;
pub use key::{KeyGenerator, StockNewsKeyGenerator};
