//! Query building and search for NEO data.
//!
//! Raw parameters ([`Query`]) are normalized into a [`Selector`], which a
//! [`NeoSearcher`] runs against a loaded [`neo_store::NeoDatabase`].
//!
//! # Key Types
//!
//! - [`Query`] -- Raw parameters: date or date range, count, filter tokens, return kind
//! - [`Selector`] -- The normalized form, ready to execute
//! - [`Filter`] -- One `field:operator:value` predicate over one entity kind
//! - [`NeoSearcher`] -- Date resolution, filtering, expansion, dedup, truncation
//! - [`SearchResults`] -- Objects or orbit paths, at most `number` of them

pub mod error;
pub mod filter;
pub mod query;
pub mod search;

pub use error::{QueryError, QueryResult};
pub use filter::{AttributeValue, EntityKind, Filter, FilterField, Filterable, Operator};
pub use query::{DateSearch, FilterOptions, Query, ReturnKind, Selector, DEFAULT_NUMBER};
pub use search::{NeoSearcher, SearchResults};
