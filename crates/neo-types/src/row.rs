//! Raw loader rows and lenient field coercion.
//!
//! Rows arrive as plain text keyed by column header. Nothing here fails:
//! a missing or malformed value falls back to its default (`0` for numbers,
//! `false` for flags, [`UNKNOWN_NAME`] for identity, empty for dates).

use std::collections::HashMap;

/// One row from the loader: column header to raw text.
pub type RawRow = HashMap<String, String>;

/// Sentinel name given to rows that carry no `name` column.
pub const UNKNOWN_NAME: &str = "unknown";

/// Column names recognized by the loader. Other columns are ignored.
pub mod fields {
    pub const NAME: &str = "name";
    pub const ID: &str = "id";
    pub const IS_HAZARDOUS: &str = "is_potentially_hazardous_asteroid";
    pub const DIAMETER_MIN_KM: &str = "estimated_diameter_min_kilometers";
    pub const CLOSE_APPROACH_DATE: &str = "close_approach_date";
    pub const MISS_DISTANCE_KM: &str = "miss_distance_kilometers";
}

/// Read a text field, trimmed. Empty values count as missing.
pub(crate) fn text(row: &RawRow, key: &str) -> Option<String> {
    row.get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Read a floating-point field, defaulting to `0.0`.
pub(crate) fn float(row: &RawRow, key: &str) -> f64 {
    match row.get(key).map(|v| v.trim()) {
        Some(raw) if !raw.is_empty() => raw.parse().unwrap_or_else(|_| {
            tracing::debug!(field = key, value = raw, "unparseable number; defaulting to 0");
            0.0
        }),
        _ => 0.0,
    }
}

/// Read an integer field, defaulting to `0`.
pub(crate) fn integer(row: &RawRow, key: &str) -> u64 {
    match row.get(key).map(|v| v.trim()) {
        Some(raw) if !raw.is_empty() => raw.parse().unwrap_or_else(|_| {
            tracing::debug!(field = key, value = raw, "unparseable id; defaulting to 0");
            0
        }),
        _ => 0,
    }
}

/// Read a boolean flag, defaulting to `false`.
pub(crate) fn flag(row: &RawRow, key: &str) -> bool {
    row.get(key).and_then(|v| parse_flag(v)).unwrap_or(false)
}

/// Parse a boolean the way the dataset spells it (`True`, `false`, `1`, `0`).
///
/// Returns `None` for anything else.
pub fn parse_flag(raw: &str) -> Option<bool> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("true") || raw == "1" {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") || raw == "0" {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn text_trims_and_treats_empty_as_missing() {
        let r = row(&[("name", "  Eros "), ("blank", "   ")]);
        assert_eq!(text(&r, "name").as_deref(), Some("Eros"));
        assert_eq!(text(&r, "blank"), None);
        assert_eq!(text(&r, "absent"), None);
    }

    #[test]
    fn float_defaults_to_zero() {
        let r = row(&[("ok", "12.5"), ("bad", "twelve")]);
        assert_eq!(float(&r, "ok"), 12.5);
        assert_eq!(float(&r, "bad"), 0.0);
        assert_eq!(float(&r, "absent"), 0.0);
    }

    #[test]
    fn integer_defaults_to_zero() {
        let r = row(&[("ok", "2000433"), ("bad", "-x")]);
        assert_eq!(integer(&r, "ok"), 2_000_433);
        assert_eq!(integer(&r, "bad"), 0);
    }

    #[test]
    fn flag_spellings() {
        assert_eq!(parse_flag("True"), Some(true));
        assert_eq!(parse_flag("FALSE"), Some(false));
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag(" 0 "), Some(false));
        assert_eq!(parse_flag("maybe"), None);

        let r = row(&[("h", "maybe")]);
        assert!(!flag(&r, "h"));
        assert!(!flag(&r, "absent"));
    }
}
