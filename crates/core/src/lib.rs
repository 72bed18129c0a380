//! Phone Catalog Core - Shared types library.
//!
//! This crate provides common types used across all phone catalog components:
//! - `catalog` - In-memory record store, query engine and query cache
//! - `server` - HTTP API exposing the catalog
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no locking,
//! no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Phone records, request bodies, validated attributes, IDs,
//!   currencies and pages

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

#[doc(hidden)]
pub use uuid;
