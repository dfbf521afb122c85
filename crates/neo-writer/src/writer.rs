use std::fmt;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use colored::Colorize;
use neo_query::SearchResults;
use neo_store::NeoDatabase;
use neo_types::{NearEarthObject, OrbitPath};
use serde::Serialize;
use tracing::info;

use crate::error::{WriterError, WriterResult};

/// Supported ways of emitting results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Human-readable lines on the console.
    Display,
    /// One CSV row per result, written to a file.
    CsvFile,
}

impl OutputFormat {
    /// Names of every supported format.
    pub fn list() -> Vec<&'static str> {
        vec!["display", "csv_file"]
    }
}

impl FromStr for OutputFormat {
    type Err = WriterError;

    fn from_str(s: &str) -> WriterResult<Self> {
        match s.trim() {
            "display" => Ok(Self::Display),
            "csv_file" => Ok(Self::CsvFile),
            other => Err(WriterError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Display => write!(f, "display"),
            Self::CsvFile => write!(f, "csv_file"),
        }
    }
}

/// One line of the CSV output.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    name: &'a str,
    id: u64,
    diameter_min_kilometers: f64,
    orbit_dates: String,
    orbits: String,
}

impl<'a> CsvRow<'a> {
    fn from_neo(neo: &'a NearEarthObject) -> Self {
        Self {
            name: &neo.name,
            id: neo.id,
            diameter_min_kilometers: neo.diameter_min_km,
            orbit_dates: list(neo.orbits.iter().map(|o| o.close_approach_date.as_str())),
            orbits: list(neo.orbits.iter().map(|o| o.neo_name.as_str())),
        }
    }

    /// An orbit is written under its owner's identity, listing only itself.
    fn from_orbit(orbit: &'a OrbitPath, owner: Option<&NearEarthObject>) -> Self {
        Self {
            name: &orbit.neo_name,
            id: owner.map_or(0, |n| n.id),
            diameter_min_kilometers: owner.map_or(0.0, |n| n.diameter_min_km),
            orbit_dates: list([orbit.close_approach_date.as_str()]),
            orbits: list([orbit.neo_name.as_str()]),
        }
    }
}

fn list<'a>(items: impl IntoIterator<Item = &'a str>) -> String {
    format!("[{}]", items.into_iter().collect::<Vec<_>>().join(", "))
}

/// Renders [`SearchResults`] to the console or to a CSV file.
///
/// Orbit results are rendered with their owning object's identity, which is
/// looked up in the database by name.
pub struct NeoWriter<'a> {
    db: &'a NeoDatabase,
    csv_path: PathBuf,
}

impl<'a> NeoWriter<'a> {
    /// Create a writer. `csv_path` is where [`OutputFormat::CsvFile`] writes.
    pub fn new(db: &'a NeoDatabase, csv_path: impl Into<PathBuf>) -> Self {
        Self {
            db,
            csv_path: csv_path.into(),
        }
    }

    /// Target file for CSV output.
    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }

    /// Write `results` in `format`. Returns the number of records written.
    pub fn write(&self, format: OutputFormat, results: &SearchResults<'_>) -> WriterResult<usize> {
        match format {
            OutputFormat::Display => self.display(results, &mut io::stdout().lock()),
            OutputFormat::CsvFile => self.generate_csv_file(results),
        }
    }

    /// Print one line per result to `out`.
    pub fn display<W: Write>(&self, results: &SearchResults<'_>, out: &mut W) -> WriterResult<usize> {
        if results.is_empty() {
            writeln!(out, "{}", "No matching records.".dimmed())?;
            return Ok(0);
        }
        match results {
            SearchResults::Neos(neos) => {
                for neo in neos {
                    writeln!(out, "{}", render_neo(neo))?;
                }
            }
            SearchResults::Paths(paths) => {
                for orbit in paths {
                    writeln!(out, "{}", render_orbit(orbit))?;
                }
            }
        }
        Ok(results.len())
    }

    /// Write `results` as CSV to the configured path.
    pub fn generate_csv_file(&self, results: &SearchResults<'_>) -> WriterResult<usize> {
        let file = File::create(&self.csv_path)?;
        let count = self.write_csv(results, file)?;
        info!(path = %self.csv_path.display(), count, "results written");
        Ok(count)
    }

    /// Write `results` as CSV, with a header row, to any writer.
    pub fn write_csv<W: Write>(&self, results: &SearchResults<'_>, out: W) -> WriterResult<usize> {
        let mut writer = csv::Writer::from_writer(out);
        // serde only emits the header with the first record; an empty
        // result still gets one.
        if results.is_empty() {
            writer.write_record([
                "name",
                "id",
                "diameter_min_kilometers",
                "orbit_dates",
                "orbits",
            ])?;
        }
        match results {
            SearchResults::Neos(neos) => {
                for neo in neos {
                    writer.serialize(CsvRow::from_neo(neo))?;
                }
            }
            SearchResults::Paths(paths) => {
                for orbit in paths {
                    let owner = self.db.get_neo(&orbit.neo_name);
                    writer.serialize(CsvRow::from_orbit(orbit, owner))?;
                }
            }
        }
        writer.flush()?;
        Ok(results.len())
    }
}

fn render_neo(neo: &NearEarthObject) -> String {
    let hazard = if neo.is_potentially_hazardous_asteroid {
        "hazardous".red().bold()
    } else {
        "not hazardous".green()
    };
    format!(
        "{} (id {}) diameter {:.3} km, {}, orbits: {}",
        neo.name.bold(),
        neo.id,
        neo.diameter_min_km,
        hazard,
        neo.orbit_dates().join(", ").cyan()
    )
}

fn render_orbit(orbit: &OrbitPath) -> String {
    format!(
        "{} {} missed by {:.3} km",
        orbit.close_approach_date.yellow(),
        orbit.neo_name.bold(),
        orbit.miss_distance_kilometers
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use neo_query::{NeoSearcher, Query};
    use neo_types::RawRow;

    fn row(name: &str, id: &str, date: &str, distance: &str) -> RawRow {
        [
            ("name", name),
            ("id", id),
            ("estimated_diameter_min_kilometers", "0.25"),
            ("is_potentially_hazardous_asteroid", "True"),
            ("close_approach_date", date),
            ("miss_distance_kilometers", distance),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    fn db() -> NeoDatabase {
        NeoDatabase::from_rows([
            row("A", "7", "2020-01-01", "50000"),
            row("A", "7", "2020-01-02", "10000"),
        ])
    }

    fn search<'a>(db: &'a NeoDatabase, query: Query) -> SearchResults<'a> {
        NeoSearcher::new(db).get_objects(&query.build_query().unwrap())
    }

    // ---------------------------------------------------------------
    // Format names
    // ---------------------------------------------------------------

    #[test]
    fn format_names() {
        for name in OutputFormat::list() {
            let format: OutputFormat = name.parse().unwrap();
            assert_eq!(format.to_string(), name);
        }
        assert!(matches!(
            "xml".parse::<OutputFormat>(),
            Err(WriterError::UnsupportedFormat(_))
        ));
    }

    // ---------------------------------------------------------------
    // Display
    // ---------------------------------------------------------------

    #[test]
    fn display_objects() {
        let db = db();
        let results = search(&db, Query::on("2020-01-01"));
        let writer = NeoWriter::new(&db, "unused.csv");

        let mut out = Vec::new();
        assert_eq!(writer.display(&results, &mut out).unwrap(), 1);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("A"));
        assert!(text.contains("2020-01-02"));
    }

    #[test]
    fn display_paths() {
        let db = db();
        let results = search(&db, Query::on("2020-01-01").return_object("Path"));
        let writer = NeoWriter::new(&db, "unused.csv");

        let mut out = Vec::new();
        assert_eq!(writer.display(&results, &mut out).unwrap(), 2);
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 2);
    }

    #[test]
    fn display_empty() {
        let db = db();
        let results = search(&db, Query::on("1999-01-01"));
        let mut out = Vec::new();
        assert_eq!(NeoWriter::new(&db, "unused.csv").display(&results, &mut out).unwrap(), 0);
        assert!(String::from_utf8(out).unwrap().contains("No matching records."));
    }

    // ---------------------------------------------------------------
    // CSV
    // ---------------------------------------------------------------

    #[test]
    fn csv_for_objects() {
        let db = db();
        let results = search(&db, Query::on("2020-01-01"));
        let mut out = Vec::new();
        NeoWriter::new(&db, "unused.csv")
            .write_csv(&results, &mut out)
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("name,id,diameter_min_kilometers,orbit_dates,orbits")
        );
        assert_eq!(
            lines.next(),
            Some("A,7,0.25,\"[2020-01-01, 2020-01-02]\",\"[A, A]\"")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn csv_for_paths_uses_owner_identity() {
        let db = db();
        let results = search(
            &db,
            Query::on("2020-01-01")
                .filter("distance:>=:40000")
                .return_object("Path"),
        );
        let mut out = Vec::new();
        NeoWriter::new(&db, "unused.csv")
            .write_csv(&results, &mut out)
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        let rows: Vec<&str> = text.lines().skip(1).collect();
        assert_eq!(rows, vec!["A,7,0.25,[2020-01-01],[A]"]);
    }

    #[test]
    fn csv_empty_still_has_header() {
        let db = db();
        let results = search(&db, Query::on("1999-01-01"));
        let mut out = Vec::new();
        NeoWriter::new(&db, "unused.csv")
            .write_csv(&results, &mut out)
            .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "name,id,diameter_min_kilometers,orbit_dates,orbits\n"
        );
    }

    #[test]
    fn generate_csv_file_writes_to_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.csv");
        let db = db();
        let results = search(&db, Query::on("2020-01-01"));

        let writer = NeoWriter::new(&db, &path);
        assert_eq!(writer.write(OutputFormat::CsvFile, &results).unwrap(), 1);
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("name,id,"));
    }

    #[test]
    fn unwritable_target_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let db = db();
        let results = search(&db, Query::on("2020-01-01"));
        let writer = NeoWriter::new(&db, dir.path().join("missing").join("out.csv"));
        assert!(matches!(
            writer.generate_csv_file(&results),
            Err(WriterError::Io(_))
        ));
    }
}
