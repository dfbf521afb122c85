//! In-memory record store for NEO search.
//!
//! Loads close-approach records from CSV and indexes them two ways, by
//! approach date and by object name. The store is built once and is
//! read-only for every search that follows.
//!
//! # Design Rules
//!
//! 1. Object identity is the name; a repeated name never creates a second object.
//! 2. Every orbit is owned by exactly one object and is reachable from the
//!    date bucket of its own approach date.
//! 3. Field irregularities are absorbed with defaults. Only a missing or
//!    unreadable source is an error.

pub mod database;
pub mod error;
pub mod loader;

pub use database::{NeoDatabase, NeoId};
pub use error::{StoreError, StoreResult};
pub use loader::CsvLoader;
