/// Errors from loading the record store.
///
/// Only structural problems surface here. Irregular field values inside a
/// readable file are absorbed by defaults and never become errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No data source was given to the store, neither at construction nor
    /// at load time.
    #[error("cannot load data: no data source provided")]
    Configuration,

    /// The data source could not be opened or read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The data source is not readable as CSV (e.g. missing header row).
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
