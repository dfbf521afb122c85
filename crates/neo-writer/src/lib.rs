//! Rendering of NEO search results.
//!
//! Two output modes are supported: colored console lines and a CSV file with
//! the columns `name, id, diameter_min_kilometers, orbit_dates, orbits`.

pub mod error;
pub mod writer;

pub use error::{WriterError, WriterResult};
pub use writer::{NeoWriter, OutputFormat};
