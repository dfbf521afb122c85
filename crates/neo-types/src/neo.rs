use std::fmt;

use serde::{Deserialize, Serialize};

use crate::orbit::OrbitPath;
use crate::row::{self, fields, RawRow, UNKNOWN_NAME};

/// A tracked near-earth object.
///
/// Identity is the `name`. Every loader row for the same name attaches one
/// more [`OrbitPath`] to the same object via [`update_orbits`](Self::update_orbits).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NearEarthObject {
    /// Unique name of the object.
    pub name: String,
    /// Numeric identifier from the dataset.
    pub id: u64,
    /// Whether the object is flagged as potentially hazardous.
    pub is_potentially_hazardous_asteroid: bool,
    /// Minimum estimated diameter in kilometers.
    pub diameter_min_km: f64,
    /// Close approaches, in load order.
    pub orbits: Vec<OrbitPath>,
}

impl NearEarthObject {
    /// Create an object with no orbits.
    pub fn new(name: impl Into<String>, id: u64, hazardous: bool, diameter_min_km: f64) -> Self {
        Self {
            name: name.into(),
            id,
            is_potentially_hazardous_asteroid: hazardous,
            diameter_min_km,
            orbits: Vec::new(),
        }
    }

    /// Build an object from a loader row, defaulting missing fields.
    ///
    /// The row's orbit is not attached; the store does that separately.
    pub fn from_row(row: &RawRow) -> Self {
        Self::new(
            row::text(row, fields::NAME).unwrap_or_else(|| UNKNOWN_NAME.to_string()),
            row::integer(row, fields::ID),
            row::flag(row, fields::IS_HAZARDOUS),
            row::float(row, fields::DIAMETER_MIN_KM),
        )
    }

    /// Attach another close approach to this object.
    pub fn update_orbits(&mut self, orbit: OrbitPath) {
        self.orbits.push(orbit);
    }

    /// Dates of every attached orbit, in load order.
    pub fn orbit_dates(&self) -> Vec<&str> {
        self.orbits
            .iter()
            .map(|o| o.close_approach_date.as_str())
            .collect()
    }

    /// Returns `true` if any attached orbit falls on `date`.
    pub fn has_orbit_on(&self, date: &str) -> bool {
        self.orbits.iter().any(|o| o.close_approach_date == date)
    }
}

impl fmt::Display for NearEarthObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NearEarthObject {} (id {}) diameter {:.3} km, hazardous: {}, orbits: [{}]",
            self.name,
            self.id,
            self.diameter_min_km,
            self.is_potentially_hazardous_asteroid,
            self.orbit_dates().join(", ")
        )
    }
}
