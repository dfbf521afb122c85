use thiserror::Error;

/// Errors from rendering search results.
#[derive(Debug, Error)]
pub enum WriterError {
    /// An output mode outside the supported set.
    #[error("unsupported output format: {0:?}")]
    UnsupportedFormat(String),

    /// The output target could not be written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Convenience alias for writer results.
pub type WriterResult<T> = Result<T, WriterError>;
