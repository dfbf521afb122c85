//! Query parameters and their normalization into a [`Selector`].

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::{QueryError, QueryResult};
use crate::filter::{EntityKind, Filter, FilterField, Operator};

/// Number of results requested when the caller does not say.
pub const DEFAULT_NUMBER: usize = 10;

/// Which entity kind a search returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReturnKind {
    /// Near-earth objects.
    Neo,
    /// Orbit paths (close-approach events).
    Path,
}

impl ReturnKind {
    /// Canonical names, as accepted on the command line.
    pub fn list() -> Vec<&'static str> {
        vec!["NEO", "Path"]
    }
}

impl FromStr for ReturnKind {
    type Err = QueryError;

    fn from_str(s: &str) -> QueryResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "neo" | "object" => Ok(Self::Neo),
            "path" | "orbit" | "event" => Ok(Self::Path),
            _ => Err(QueryError::UnsupportedFeature {
                feature: "return object",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ReturnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Neo => write!(f, "NEO"),
            Self::Path => write!(f, "Path"),
        }
    }
}

/// How the date index is consulted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DateSearch {
    /// Exactly one approach date.
    Equals(String),
    /// An inclusive range. A missing bound is open on that side.
    Between {
        start: Option<String>,
        end: Option<String>,
    },
}

impl DateSearch {
    /// Names of the supported date modes.
    pub fn list() -> Vec<&'static str> {
        vec!["between", "equals"]
    }

    /// The mode name of this search.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Equals(_) => "equals",
            Self::Between { .. } => "between",
        }
    }

    /// Build a date search from a mode name and its values.
    ///
    /// `equals` takes the first value; `between` takes start and end.
    pub fn from_mode(mode: &str, values: &[String]) -> QueryResult<Self> {
        match mode.trim() {
            "equals" => values
                .first()
                .map(|date| Self::Equals(date.clone()))
                .ok_or_else(|| QueryError::UnsupportedFeature {
                    feature: "date search",
                    value: "equals without a date".into(),
                }),
            "between" => Ok(Self::Between {
                start: values.first().cloned(),
                end: values.get(1).cloned(),
            }),
            other => Err(QueryError::UnsupportedFeature {
                feature: "date search",
                value: other.to_string(),
            }),
        }
    }
}

/// Normalized, ready-to-run search parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct Selector {
    pub date_search: DateSearch,
    /// Maximum number of results.
    pub number: usize,
    /// Filters grouped by entity kind, groups in order of first appearance,
    /// each group in token order.
    pub filters: Vec<Filter>,
    pub return_object: ReturnKind,
}

/// Filters grouped by the entity kind they apply to.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterOptions {
    pub neo: Vec<Filter>,
    pub orbit: Vec<Filter>,
    /// Kind of the first accepted token.
    pub first: Option<EntityKind>,
}

impl FilterOptions {
    /// Parse `field:operator:value` tokens.
    ///
    /// Tokens naming an unknown field are skipped. An unknown operator or a
    /// token without three segments is an error. When a token has more than
    /// three segments, the last one is the value.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> QueryResult<Self> {
        let mut options = Self::default();
        for token in tokens {
            let token = token.as_ref();
            let parts: Vec<&str> = token.split(':').collect();
            if parts.len() < 3 {
                return Err(QueryError::MalformedFilter(token.to_string()));
            }
            let Some(field) = FilterField::parse(parts[0]) else {
                debug!(token, "dropping filter on unknown field");
                continue;
            };
            let operator =
                Operator::parse(parts[1]).ok_or_else(|| QueryError::UnsupportedFeature {
                    feature: "filter operator",
                    value: parts[1].to_string(),
                })?;
            let value = parts[parts.len() - 1].trim();

            let filter = Filter::new(field, operator, value);
            options.first.get_or_insert(field.entity());
            match field.entity() {
                EntityKind::Neo => options.neo.push(filter),
                EntityKind::Orbit => options.orbit.push(filter),
            }
        }
        Ok(options)
    }

    /// All filters, one group per kind, the first-seen kind leading.
    pub fn into_filters(self) -> Vec<Filter> {
        let (mut filters, rest) = match self.first {
            Some(EntityKind::Orbit) => (self.orbit, self.neo),
            _ => (self.neo, self.orbit),
        };
        filters.extend(rest);
        filters
    }
}

/// Raw search parameters as supplied by a caller.
///
/// `date` takes precedence over `start_date`/`end_date`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Query {
    pub date: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub number: usize,
    pub filter: Vec<String>,
    pub return_object: String,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            date: None,
            start_date: None,
            end_date: None,
            number: DEFAULT_NUMBER,
            filter: Vec::new(),
            return_object: ReturnKind::Neo.to_string(),
        }
    }
}

impl Query {
    /// A query for a single approach date.
    pub fn on(date: impl Into<String>) -> Self {
        Self {
            date: Some(date.into()),
            ..Default::default()
        }
    }

    /// A query for an inclusive date range.
    pub fn between(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start_date: Some(start.into()),
            end_date: Some(end.into()),
            ..Default::default()
        }
    }

    /// Set the requested result count.
    pub fn number(mut self, number: usize) -> Self {
        self.number = number;
        self
    }

    /// Append a `field:operator:value` filter token.
    pub fn filter(mut self, token: impl Into<String>) -> Self {
        self.filter.push(token.into());
        self
    }

    /// Set the return kind by name (`NEO` or `Path`).
    pub fn return_object(mut self, name: impl Into<String>) -> Self {
        self.return_object = name.into();
        self
    }

    /// Normalize these parameters into a [`Selector`].
    ///
    /// Date bounds are not validated; a reversed range simply matches nothing.
    pub fn build_query(&self) -> QueryResult<Selector> {
        let return_object: ReturnKind = self.return_object.parse()?;

        let date_search = match &self.date {
            Some(date) => DateSearch::Equals(date.clone()),
            None => DateSearch::Between {
                start: self.start_date.clone(),
                end: self.end_date.clone(),
            },
        };

        let filters = FilterOptions::from_tokens(&self.filter)?.into_filters();

        debug!(
            mode = date_search.name(),
            number = self.number,
            filters = filters.len(),
            return_object = %return_object,
            "query built"
        );

        Ok(Selector {
            date_search,
            number: self.number,
            filters,
            return_object,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---------------------------------------------------------------
    // Date mode
    // ---------------------------------------------------------------

    #[test]
    fn single_date_is_equals() {
        let selector = Query::on("2020-01-01").build_query().unwrap();
        assert_eq!(selector.date_search, DateSearch::Equals("2020-01-01".into()));
    }

    #[test]
    fn start_and_end_is_between() {
        let selector = Query::between("2020-01-01", "2020-01-31")
            .build_query()
            .unwrap();
        assert_eq!(
            selector.date_search,
            DateSearch::Between {
                start: Some("2020-01-01".into()),
                end: Some("2020-01-31".into()),
            }
        );
    }

    #[test]
    fn date_takes_precedence_over_range() {
        let mut query = Query::between("2020-01-01", "2020-01-31");
        query.date = Some("2020-02-02".into());
        let selector = query.build_query().unwrap();
        assert_eq!(selector.date_search, DateSearch::Equals("2020-02-02".into()));
    }

    #[test]
    fn reversed_range_is_not_an_error() {
        assert!(Query::between("2020-12-31", "2020-01-01")
            .build_query()
            .is_ok());
    }

    #[test]
    fn date_search_from_mode() {
        let values = vec!["2020-01-01".to_string(), "2020-01-05".to_string()];
        assert_eq!(
            DateSearch::from_mode("equals", &values).unwrap(),
            DateSearch::Equals("2020-01-01".into())
        );
        assert!(matches!(
            DateSearch::from_mode("between", &values).unwrap(),
            DateSearch::Between { .. }
        ));
        assert!(matches!(
            DateSearch::from_mode("around", &values),
            Err(QueryError::UnsupportedFeature { .. })
        ));
        assert!(DateSearch::from_mode("equals", &[]).is_err());
        assert_eq!(DateSearch::list(), vec!["between", "equals"]);
    }

    // ---------------------------------------------------------------
    // Return kind
    // ---------------------------------------------------------------

    #[test]
    fn return_kind_names() {
        assert_eq!("NEO".parse::<ReturnKind>().unwrap(), ReturnKind::Neo);
        assert_eq!("Object".parse::<ReturnKind>().unwrap(), ReturnKind::Neo);
        assert_eq!("Path".parse::<ReturnKind>().unwrap(), ReturnKind::Path);
        assert_eq!("event".parse::<ReturnKind>().unwrap(), ReturnKind::Path);
    }

    #[test]
    fn unsupported_return_kind_fails() {
        let err = Query::on("2020-01-01")
            .return_object("Comet")
            .build_query()
            .unwrap_err();
        assert_eq!(
            err,
            QueryError::UnsupportedFeature {
                feature: "return object",
                value: "Comet".into(),
            }
        );
    }

    // ---------------------------------------------------------------
    // Filters
    // ---------------------------------------------------------------

    #[test]
    fn filters_are_grouped_by_kind() {
        let selector = Query::on("2020-01-01")
            .filter("diameter:>:0.5")
            .filter("distance:>=:40000")
            .filter("is_hazardous:=:True")
            .build_query()
            .unwrap();
        let tokens: Vec<String> = selector.filters.iter().map(|f| f.to_string()).collect();
        assert_eq!(
            tokens,
            vec!["diameter:>:0.5", "is_hazardous:=:True", "distance:>=:40000"]
        );
    }

    #[test]
    fn first_seen_kind_leads() {
        let selector = Query::on("2020-01-01")
            .filter("distance:>=:40000")
            .filter("diameter:>:0.5")
            .filter("distance:>:1")
            .build_query()
            .unwrap();
        let tokens: Vec<String> = selector.filters.iter().map(|f| f.to_string()).collect();
        assert_eq!(
            tokens,
            vec!["distance:>=:40000", "distance:>:1", "diameter:>:0.5"]
        );
    }

    #[test]
    fn unknown_leading_field_does_not_pick_the_order() {
        let options =
            FilterOptions::from_tokens(&["velocity:>:1", "diameter:>:1", "distance:>:1"]).unwrap();
        assert_eq!(options.first, Some(EntityKind::Neo));
    }

    #[test]
    fn unknown_field_is_dropped() {
        let selector = Query::on("2020-01-01")
            .filter("velocity:>:10")
            .filter("diameter:>=:1")
            .build_query()
            .unwrap();
        assert_eq!(selector.filters.len(), 1);
        assert_eq!(selector.filters[0].field, FilterField::Diameter);
    }

    #[test]
    fn unknown_operator_fails() {
        let err = Query::on("2020-01-01")
            .filter("diameter:<:1")
            .build_query()
            .unwrap_err();
        assert!(matches!(
            err,
            QueryError::UnsupportedFeature {
                feature: "filter operator",
                ..
            }
        ));
    }

    #[test]
    fn short_token_is_malformed() {
        let err = Query::on("2020-01-01")
            .filter("diameter>1")
            .build_query()
            .unwrap_err();
        assert_eq!(err, QueryError::MalformedFilter("diameter>1".into()));
    }

    #[test]
    fn value_is_last_segment() {
        let options = FilterOptions::from_tokens(&["distance:>:1:2"]).unwrap();
        assert_eq!(options.orbit[0].value, "2");
    }

    #[test]
    fn number_and_defaults() {
        let selector = Query::on("2020-01-01").build_query().unwrap();
        assert_eq!(selector.number, DEFAULT_NUMBER);
        assert_eq!(selector.return_object, ReturnKind::Neo);

        let selector = Query::on("2020-01-01").number(3).build_query().unwrap();
        assert_eq!(selector.number, 3);
    }
}
