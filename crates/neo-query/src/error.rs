use thiserror::Error;

/// Errors from building a query.
///
/// Unknown filter *fields* are not errors; they are dropped while the filter
/// set is built.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    /// A requested return kind, operator, or date mode outside the supported set.
    #[error("unsupported {feature}: {value:?}")]
    UnsupportedFeature { feature: &'static str, value: String },

    /// A filter token that is not of the form `field:operator:value`.
    #[error("malformed filter {0:?}: expected field:operator:value")]
    MalformedFilter(String),
}

/// Convenience alias for query results.
pub type QueryResult<T> = Result<T, QueryError>;
