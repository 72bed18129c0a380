//! Phone Catalog - in-memory record store with query caching.
//!
//! # Architecture
//!
//! - [`store`] - The authoritative [`RecordStore`] and point-in-time [`Snapshot`]s
//! - [`query`] - Stateless scans over a snapshot (brand, usage type, price, search, pages)
//! - [`cache`] - [`QueryCache`], canonical [`QueryKey`]s and whole-cache flushes
//! - [`catalog`] - The [`Catalog`] façade tying the three together
//! - [`categories`] - A small [`CategoryRegistry`]
//! - [`seed`] - Demo phones and categories
//!
//! Reads go through the cache; on a miss the store is snapshotted, scanned and
//! the result cached. Writes mutate the store and then flush the entire cache,
//! so a read that starts after a write returns never sees pre-write results.
//!
//! Everything is synchronous and thread-safe; share a [`Catalog`] across
//! threads by cloning it.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cache;
pub mod catalog;
pub mod categories;
pub mod error;
pub mod query;
pub mod seed;
pub mod store;

pub use cache::{CacheValue, QueryCache, QueryKey};
pub use catalog::Catalog;
pub use categories::CategoryRegistry;
pub use error::{CatalogError, Result};
pub use store::{RecordStore, Snapshot};
