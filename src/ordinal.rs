//! Ordinal Labels
//!
//! English ordinal suffixes for place labels ("1st Place", "22nd Place").

/// Suffix for a 1-based position
pub fn ordinal_suffix(n: usize) -> &'static str {
    if (11..=13).contains(&(n % 100)) {
        return "th";
    }
    match n % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

pub fn ordinal(n: usize) -> String {
    format!("{}{}", n, ordinal_suffix(n))
}

/// Text shown on a ranked row
pub fn place_label(n: usize) -> String {
    format!("{} Place", ordinal(n))
}
