// Parsing and formatting helpers.
//
// This module centralizes the forgiving text-to-number handling so the rest
// of the code can assume clean, typed values.
use num_format::{Locale, ToFormattedString};

/// Parse an order count from a spreadsheet cell.
///
/// Mirrors the loose contract of the source data: after trimming, the
/// leading run of ASCII digits is parsed and everything else is ignored
/// (`"12abc"` → 12, `"3.7"` → 3). Missing, empty or non-numeric cells
/// coerce to 0 — malformed counts are never an error.
pub fn parse_count(s: Option<&str>) -> i64 {
    let s = match s {
        Some(s) => s.trim(),
        None => return 0,
    };
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s[..end].parse::<i64>().unwrap_or(0)
}

/// Format a ratio or margin for display: two fixed decimals plus a `%`
/// suffix (e.g. `53.33%`, `-6.67%`).
pub fn format_percent(v: f64) -> String {
    format!("{:.2}%", v)
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    // Thin wrapper around `num-format` for integer-like values, used for
    // counts in console messages (e.g., `1,240 rows scanned`).
    n.to_formatted_string(&Locale::en)
}
