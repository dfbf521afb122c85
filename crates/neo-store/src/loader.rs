//! CSV loader producing [`RawRow`]s.
//!
//! Records with too few or too many fields are accepted (missing columns are
//! simply absent from the row) and records that cannot be decoded are
//! skipped with a warning. A failure to read the source itself ends the load
//! with an error.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use neo_types::RawRow;
use tracing::warn;

use crate::error::{StoreError, StoreResult};

/// Reads a headered CSV source into loader rows.
pub struct CsvLoader<R> {
    headers: csv::StringRecord,
    reader: csv::Reader<R>,
}

impl CsvLoader<File> {
    /// Open a CSV file on disk.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }
}

impl<R: Read> CsvLoader<R> {
    /// Wrap any reader. The first record is taken as the header row.
    pub fn from_reader(source: R) -> StoreResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(source);
        let headers = reader.headers()?.clone();
        Ok(Self { headers, reader })
    }

    /// The header row.
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.headers.iter()
    }

    /// Consume the loader, yielding one row per decodable record.
    ///
    /// Undecodable records are skipped. I/O failures are yielded as errors.
    pub fn rows(self) -> impl Iterator<Item = StoreResult<RawRow>> {
        let headers = self.headers;
        self.reader
            .into_records()
            .enumerate()
            .filter_map(move |(line, record)| match record {
                Ok(record) => Some(Ok(headers
                    .iter()
                    .zip(record.iter())
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect())),
                Err(e) if e.is_io_error() => Some(Err(StoreError::Csv(e))),
                Err(e) => {
                    warn!(record = line + 1, error = %e, "skipping undecodable CSV record");
                    None
                }
            })
    }
}
