//! Repository layer for the local document cache.
//!
//! # Responsibility
//! - Define the cache storage contract used by the loader and the editor.
//! - Keep SQLite details behind that contract.

pub mod cache_repo;
