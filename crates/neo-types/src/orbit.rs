use std::fmt;

use serde::{Deserialize, Serialize};

use crate::row::{self, fields, RawRow, UNKNOWN_NAME};

/// A single close approach of a near-earth object.
///
/// `neo_name` refers back to the owning [`NearEarthObject`](crate::NearEarthObject)
/// by name only; the object owns its orbits, never the other way round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrbitPath {
    /// Name of the owning object.
    pub neo_name: String,
    /// Calendar date of closest approach (`YYYY-MM-DD`, compared as text).
    pub close_approach_date: String,
    /// Miss distance in kilometers.
    pub miss_distance_kilometers: f64,
}

impl OrbitPath {
    /// Create an orbit path with explicit values.
    pub fn new(
        neo_name: impl Into<String>,
        close_approach_date: impl Into<String>,
        miss_distance_kilometers: f64,
    ) -> Self {
        Self {
            neo_name: neo_name.into(),
            close_approach_date: close_approach_date.into(),
            miss_distance_kilometers,
        }
    }

    /// Build an orbit path from a loader row, defaulting missing fields.
    pub fn from_row(row: &RawRow) -> Self {
        Self {
            neo_name: row::text(row, fields::NAME).unwrap_or_else(|| UNKNOWN_NAME.to_string()),
            close_approach_date: row::text(row, fields::CLOSE_APPROACH_DATE).unwrap_or_default(),
            miss_distance_kilometers: row::float(row, fields::MISS_DISTANCE_KM),
        }
    }
}

impl fmt::Display for OrbitPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OrbitPath {} on {} at {:.3} km",
            self.neo_name, self.close_approach_date, self.miss_distance_kilometers
        )
    }
}
