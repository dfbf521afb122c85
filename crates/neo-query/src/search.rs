//! Search execution against a [`NeoDatabase`].
//!
//! The order of operations matters:
//!
//! 1. resolve the date index into candidate objects
//! 2. apply object filters in selector order
//! 3. expand surviving objects into all of their orbits
//! 4. apply orbit (distance) filters to the expanded orbits, then map the
//!    surviving orbits back to their objects through the name index
//! 5. deduplicate both sets
//! 6. truncate the requested kind to `number`
//!
//! Distance is an attribute of an orbit, not of an object. An object
//! therefore survives a distance filter whenever at least one of its orbits
//! does.

use std::collections::HashSet;
use std::hash::Hash;

use neo_store::{NeoDatabase, NeoId};
use neo_types::{NearEarthObject, OrbitPath};
use tracing::debug;

use crate::filter::{EntityKind, Filter};
use crate::query::{DateSearch, ReturnKind, Selector};

/// Identity of an orbit: its owner and its position in the owner's list.
type OrbitKey = (NeoId, usize);

/// A bounded, deduplicated search result.
///
/// The order of members carries no meaning.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchResults<'a> {
    Neos(Vec<&'a NearEarthObject>),
    Paths(Vec<&'a OrbitPath>),
}

impl SearchResults<'_> {
    /// Number of results.
    pub fn len(&self) -> usize {
        match self {
            Self::Neos(neos) => neos.len(),
            Self::Paths(paths) => paths.len(),
        }
    }

    /// Returns `true` if nothing matched.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The kind of record held.
    pub fn kind(&self) -> ReturnKind {
        match self {
            Self::Neos(_) => ReturnKind::Neo,
            Self::Paths(_) => ReturnKind::Path,
        }
    }
}

/// Runs [`Selector`]s against a loaded database.
#[derive(Debug, Clone, Copy)]
pub struct NeoSearcher<'a> {
    db: &'a NeoDatabase,
}

impl<'a> NeoSearcher<'a> {
    /// Create a searcher over `db`.
    pub fn new(db: &'a NeoDatabase) -> Self {
        Self { db }
    }

    /// Execute `selector` and return at most `selector.number` records of
    /// the requested kind.
    pub fn get_objects(&self, selector: &Selector) -> SearchResults<'a> {
        let mut neos = self.date_matches(&selector.date_search);
        let date_hits = neos.len();

        let (deferred, immediate): (Vec<&Filter>, Vec<&Filter>) = selector
            .filters
            .iter()
            .partition(|f| f.entity() == EntityKind::Orbit);

        for filter in &immediate {
            neos = filter.apply(neos);
        }

        let mut neos = unique_by_key(neos, |(id, _)| *id);
        let mut orbits: Vec<(OrbitKey, &'a OrbitPath)> = neos
            .iter()
            .flat_map(|&(id, neo)| {
                neo.orbits
                    .iter()
                    .enumerate()
                    .map(move |(index, orbit)| ((id, index), orbit))
            })
            .collect();

        if !deferred.is_empty() {
            for filter in &deferred {
                orbits = filter.apply(orbits);
            }
            neos = orbits
                .iter()
                .filter_map(|(_, orbit)| {
                    let id = self.db.neo_id(&orbit.neo_name)?;
                    Some((id, self.db.neo(id)?))
                })
                .collect();
        }

        let neos = unique_by_key(neos, |(id, _)| *id);
        let orbits = unique_by_key(orbits, |(key, _)| *key);

        debug!(
            mode = selector.date_search.name(),
            date_hits,
            neos = neos.len(),
            orbits = orbits.len(),
            number = selector.number,
            "search complete"
        );

        match selector.return_object {
            ReturnKind::Neo => SearchResults::Neos(
                neos.into_iter()
                    .take(selector.number)
                    .map(|(_, neo)| neo)
                    .collect(),
            ),
            ReturnKind::Path => SearchResults::Paths(
                orbits
                    .into_iter()
                    .take(selector.number)
                    .map(|(_, orbit)| orbit)
                    .collect(),
            ),
        }
    }

    /// Objects recorded on the selected dates, duplicates included.
    fn date_matches(&self, date_search: &DateSearch) -> Vec<(NeoId, &'a NearEarthObject)> {
        let ids: Vec<NeoId> = match date_search {
            DateSearch::Equals(date) => self.db.neos_on(date).to_vec(),
            DateSearch::Between { start, end } => self
                .db
                .dates_between(start.as_deref(), end.as_deref())
                .into_iter()
                .flat_map(|(_, ids)| ids.iter().copied())
                .collect(),
        };
        ids.into_iter()
            .filter_map(|id| self.db.neo(id).map(|neo| (id, neo)))
            .collect()
    }
}

/// Keep the first occurrence of each key.
fn unique_by_key<T, K, F>(items: Vec<T>, key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut seen = HashSet::with_capacity(items.len());
    items.into_iter().filter(|item| seen.insert(key(item))).collect()
}
