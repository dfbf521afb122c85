//! Attribute filters.
//!
//! A [`Filter`] is one `(field, operator, value)` predicate. The field is a
//! closed [`FilterField`] enum and each entity kind exposes its attributes
//! through [`Filterable`], so resolving a field never involves looking up
//! attributes by string at apply time.
//!
//! The comparison value stays raw text until a filter is applied. It is then
//! coerced to the attribute's type; if that fails, both sides are compared as
//! text instead.

use std::cmp::Ordering;
use std::fmt;

use neo_types::{parse_flag, NearEarthObject, OrbitPath};

/// The entity kind a filter field belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// [`NearEarthObject`] attributes.
    Neo,
    /// [`OrbitPath`] attributes.
    Orbit,
}

/// Fields that can appear in a filter token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FilterField {
    /// `diameter`: minimum estimated diameter of the object (km).
    Diameter,
    /// `distance`: miss distance of an orbit (km).
    Distance,
    /// `is_hazardous`: potentially-hazardous flag of the object.
    IsHazardous,
}

impl FilterField {
    /// All fields, in token-name order.
    pub const ALL: [FilterField; 3] = [Self::Diameter, Self::Distance, Self::IsHazardous];

    /// Resolve a token field name. Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim() {
            "diameter" => Some(Self::Diameter),
            "distance" => Some(Self::Distance),
            "is_hazardous" => Some(Self::IsHazardous),
            _ => None,
        }
    }

    /// The token name of this field.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Diameter => "diameter",
            Self::Distance => "distance",
            Self::IsHazardous => "is_hazardous",
        }
    }

    /// Which entity kind carries this attribute.
    pub fn entity(&self) -> EntityKind {
        match self {
            Self::Diameter | Self::IsHazardous => EntityKind::Neo,
            Self::Distance => EntityKind::Orbit,
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Comparison operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `>=`
    GreaterOrEqual,
    /// `=`
    Equal,
    /// `>`
    Greater,
}

impl Operator {
    /// Resolve an operator symbol. Unknown symbols yield `None`.
    pub fn parse(symbol: &str) -> Option<Self> {
        match symbol.trim() {
            ">=" => Some(Self::GreaterOrEqual),
            "=" => Some(Self::Equal),
            ">" => Some(Self::Greater),
            _ => None,
        }
    }

    /// The token symbol of this operator.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::GreaterOrEqual => ">=",
            Self::Equal => "=",
            Self::Greater => ">",
        }
    }

    /// Whether `attribute <op> value` holds given their ordering.
    ///
    /// An incomparable pair (`None`, e.g. NaN) never satisfies any operator.
    pub fn holds(&self, ordering: Option<Ordering>) -> bool {
        match (self, ordering) {
            (Self::GreaterOrEqual, Some(Ordering::Greater | Ordering::Equal)) => true,
            (Self::Equal, Some(Ordering::Equal)) => true,
            (Self::Greater, Some(Ordering::Greater)) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A typed attribute read from an entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AttributeValue {
    Number(f64),
    Flag(bool),
}

impl AttributeValue {
    /// Compare against a raw token value with `op`.
    ///
    /// The raw value is coerced to this attribute's type first. When it does
    /// not parse, the attribute's text form is compared with the raw text.
    pub fn compare(&self, op: Operator, raw: &str) -> bool {
        let typed = match self {
            Self::Number(n) => raw.trim().parse::<f64>().ok().map(|v| n.partial_cmp(&v)),
            Self::Flag(b) => parse_flag(raw).map(|v| Some(b.cmp(&v))),
        };
        match typed {
            Some(ordering) => op.holds(ordering),
            None => {
                tracing::debug!(attribute = %self, value = raw, "falling back to text comparison");
                op.holds(Some(self.to_string().as_str().cmp(raw)))
            }
        }
    }
}

/// Text form used by the fallback comparison: integral numbers keep one
/// decimal (`50000.0`) and flags are capitalized (`True`), as in the dataset.
impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e16 => {
                write!(f, "{n:.1}")
            }
            Self::Number(n) => write!(f, "{n}"),
            Self::Flag(true) => f.write_str("True"),
            Self::Flag(false) => f.write_str("False"),
        }
    }
}

/// Entities that expose attributes to filters.
pub trait Filterable {
    /// The value of `field`, or `None` if this kind has no such attribute.
    fn attribute(&self, field: FilterField) -> Option<AttributeValue>;
}

impl Filterable for NearEarthObject {
    fn attribute(&self, field: FilterField) -> Option<AttributeValue> {
        match field {
            FilterField::Diameter => Some(AttributeValue::Number(self.diameter_min_km)),
            FilterField::IsHazardous => {
                Some(AttributeValue::Flag(self.is_potentially_hazardous_asteroid))
            }
            FilterField::Distance => None,
        }
    }
}

impl<T: Filterable + ?Sized> Filterable for &T {
    fn attribute(&self, field: FilterField) -> Option<AttributeValue> {
        (**self).attribute(field)
    }
}

/// A record carried alongside its key, as the searcher holds them.
impl<K, T: Filterable + ?Sized> Filterable for (K, &T) {
    fn attribute(&self, field: FilterField) -> Option<AttributeValue> {
        self.1.attribute(field)
    }
}

impl Filterable for OrbitPath {
    fn attribute(&self, field: FilterField) -> Option<AttributeValue> {
        match field {
            FilterField::Distance => Some(AttributeValue::Number(self.miss_distance_kilometers)),
            FilterField::Diameter | FilterField::IsHazardous => None,
        }
    }
}

/// A single `(field, operator, value)` predicate.
#[derive(Clone, Debug, PartialEq)]
pub struct Filter {
    pub field: FilterField,
    pub operator: Operator,
    /// Raw comparison value, coerced when the filter is applied.
    pub value: String,
}

impl Filter {
    /// Create a filter.
    pub fn new(field: FilterField, operator: Operator, value: impl Into<String>) -> Self {
        Self {
            field,
            operator,
            value: value.into(),
        }
    }

    /// The entity kind this filter applies to.
    pub fn entity(&self) -> EntityKind {
        self.field.entity()
    }

    /// Whether `candidate` satisfies this filter.
    ///
    /// A candidate without the attribute never matches.
    pub fn matches<T: Filterable + ?Sized>(&self, candidate: &T) -> bool {
        candidate
            .attribute(self.field)
            .is_some_and(|attr| attr.compare(self.operator, &self.value))
    }

    /// The candidates that satisfy this filter, in input order.
    pub fn apply<C, I>(&self, candidates: I) -> Vec<C>
    where
        C: Filterable,
        I: IntoIterator<Item = C>,
    {
        candidates.into_iter().filter(|c| self.matches(c)).collect()
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.field, self.operator, self.value)
    }
}
