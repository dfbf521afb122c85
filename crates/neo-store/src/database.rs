//! The in-memory record store.
//!
//! [`NeoDatabase`] owns every [`NearEarthObject`] in a `Vec` and keeps two
//! indexes over it:
//!
//! - `date_index`: approach date to the objects with an orbit on that date.
//!   One handle is appended per loaded row, so an object can appear more than
//!   once in a bucket. The searcher deduplicates; the store never does.
//! - `name_index`: object name to its single handle.
//!
//! The store is mutated only while loading. Searches take `&NeoDatabase`.

use std::collections::{BTreeMap, HashMap};
use std::io::Read;
use std::ops::Bound;
use std::path::{Path, PathBuf};

use neo_types::{NearEarthObject, OrbitPath, RawRow};
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::loader::CsvLoader;

/// Handle to an object owned by a [`NeoDatabase`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NeoId(usize);

/// Near-earth objects and their orbits, indexed by date and by name.
#[derive(Default)]
pub struct NeoDatabase {
    filename: Option<PathBuf>,
    neos: Vec<NearEarthObject>,
    name_index: HashMap<String, NeoId>,
    date_index: BTreeMap<String, Vec<NeoId>>,
}

impl NeoDatabase {
    /// Create an empty database that will load from `filename` by default.
    pub fn new(filename: Option<PathBuf>) -> Self {
        Self {
            filename,
            ..Default::default()
        }
    }

    /// Build a database directly from loader rows.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = RawRow>,
    {
        let mut db = Self::default();
        for row in rows {
            db.ingest_row(&row);
        }
        db
    }

    /// Load the CSV at `filename`, or at the path given to [`new`](Self::new).
    ///
    /// Returns the number of rows ingested. Fails with
    /// [`StoreError::Configuration`] when neither path is available, and
    /// with the underlying error when the source cannot be read to the end.
    pub fn load_data(&mut self, filename: Option<&Path>) -> StoreResult<usize> {
        let path = match filename.or(self.filename.as_deref()) {
            Some(path) => path.to_path_buf(),
            None => return Err(StoreError::Configuration),
        };
        debug!(path = %path.display(), "loading NEO data");
        let loader = CsvLoader::open(&path)?;
        let rows = self.ingest(loader.rows())?;
        info!(
            path = %path.display(),
            rows,
            neos = self.neos.len(),
            dates = self.date_count(),
            "NEO data loaded"
        );
        Ok(rows)
    }

    /// Load from any CSV reader. Returns the number of rows ingested.
    pub fn load_from_reader<R: Read>(&mut self, source: R) -> StoreResult<usize> {
        let loader = CsvLoader::from_reader(source)?;
        self.ingest(loader.rows())
    }

    fn ingest<I>(&mut self, rows: I) -> StoreResult<usize>
    where
        I: IntoIterator<Item = StoreResult<RawRow>>,
    {
        let mut count = 0;
        for row in rows {
            self.ingest_row(&row?);
            count += 1;
        }
        Ok(count)
    }

    fn ingest_row(&mut self, row: &RawRow) {
        let orbit = OrbitPath::from_row(row);

        let id = match self.name_index.get(&orbit.neo_name) {
            Some(id) => *id,
            None => {
                let neo = NearEarthObject::from_row(row);
                let id = NeoId(self.neos.len());
                self.name_index.insert(neo.name.clone(), id);
                self.neos.push(neo);
                id
            }
        };

        self.date_index
            .entry(orbit.close_approach_date.clone())
            .or_default()
            .push(id);
        self.neos[id.0].update_orbits(orbit);
    }

    // ---------------------------------------------------------------
    // Lookups
    // ---------------------------------------------------------------

    /// Resolve a handle.
    pub fn neo(&self, id: NeoId) -> Option<&NearEarthObject> {
        self.neos.get(id.0)
    }

    /// Handle of the object called `name`.
    pub fn neo_id(&self, name: &str) -> Option<NeoId> {
        self.name_index.get(name).copied()
    }

    /// The object called `name`.
    pub fn get_neo(&self, name: &str) -> Option<&NearEarthObject> {
        self.neo_id(name).and_then(|id| self.neo(id))
    }

    /// Handles recorded under exactly `date`, duplicates included.
    pub fn neos_on(&self, date: &str) -> &[NeoId] {
        self.date_index
            .get(date)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Date buckets whose key lies in the inclusive range `[start, end]`.
    ///
    /// A `None` bound is open on that side. A reversed range is empty.
    pub fn dates_between(
        &self,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Vec<(&str, &[NeoId])> {
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Vec::new();
            }
        }
        let lower = start.map_or(Bound::Unbounded, Bound::Included);
        let upper = end.map_or(Bound::Unbounded, Bound::Included);
        self.date_index
            .range::<str, _>((lower, upper))
            .map(|(date, ids)| (date.as_str(), ids.as_slice()))
            .collect()
    }

    /// Every object with its handle, in load order.
    pub fn neos(&self) -> impl Iterator<Item = (NeoId, &NearEarthObject)> {
        self.neos.iter().enumerate().map(|(i, neo)| (NeoId(i), neo))
    }

    /// Number of indexed approach dates.
    pub fn date_count(&self) -> usize {
        self.date_index.len()
    }

    /// Number of distinct objects.
    pub fn neo_count(&self) -> usize {
        self.neos.len()
    }

    /// Number of orbits across all objects.
    pub fn orbit_count(&self) -> usize {
        self.neos.iter().map(|n| n.orbits.len()).sum()
    }

    /// Returns `true` if nothing has been loaded.
    pub fn is_empty(&self) -> bool {
        self.neos.is_empty()
    }
}

impl std::fmt::Debug for NeoDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NeoDatabase")
            .field("filename", &self.filename)
            .field("neos", &self.neos.len())
            .field("dates", &self.date_index.len())
            .finish()
    }
}
