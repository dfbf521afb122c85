//! Record types for NEO search.
//!
//! This crate provides the entity models shared by every other crate in the
//! workspace. The store builds them from loader rows, the query layer filters
//! them, and the writer renders them.
//!
//! # Key Types
//!
//! - [`NearEarthObject`] -- A tracked body, unique by name, owning its orbits
//! - [`OrbitPath`] -- A single close-approach record of one object
//! - [`RawRow`] -- One loader row: header name to raw text
//! - [`fields`] -- The recognized loader column names

pub mod neo;
pub mod orbit;
pub mod row;

pub use neo::NearEarthObject;
pub use orbit::OrbitPath;
pub use row::{fields, parse_flag, RawRow, UNKNOWN_NAME};
