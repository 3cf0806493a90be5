//! Bayer designation to Unicode label conversion.
//!
//! Accepts both the HYG `bayer` column form (`Kap-1`) and the Yale Bright
//! Star `BayerFlamsteed` form (`21Alp And`, `Kap1Scl`). The Flamsteed number
//! is dropped, the Greek abbreviation becomes its letter and whatever follows
//! (superscript digit, constellation) is kept with separators removed.

use crate::core::lookup::GREEK_LETTERS;

/// Convert a designation to its Unicode label.
///
/// Missing, empty or unrecognized designations yield `None`.
///
/// # Examples
///
/// ```
/// use skychart_etl::parsing::bayer::unicode_bayer_label;
///
/// assert_eq!(unicode_bayer_label(Some("Alp And")).as_deref(), Some("αAnd"));
/// assert_eq!(unicode_bayer_label(Some("Kap1Scl")).as_deref(), Some("κ1Scl"));
/// assert_eq!(unicode_bayer_label(Some("Kap-1")).as_deref(), Some("κ1"));
/// assert_eq!(unicode_bayer_label(None), None);
/// ```
pub fn unicode_bayer_label(designation: Option<&str>) -> Option<String> {
    let designation = designation?.trim();
    let without_flamsteed = designation
        .trim_start_matches(|c: char| c.is_ascii_digit())
        .trim_start();

    let (letter, rest) = split_greek_prefix(without_flamsteed)?;
    let suffix: String = rest
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();

    Some(format!("{}{}", letter, suffix))
}

/// Longest match first: three-letter keys are tried before the two-letter
/// ones (`Mu`, `Nu`, `Pi`, `Xi`).
fn split_greek_prefix(designation: &str) -> Option<(char, &str)> {
    [3, 2].into_iter().find_map(|width| {
        let prefix = designation.get(..width)?;
        GREEK_LETTERS
            .get(prefix)
            .map(|letter| (*letter, &designation[width..]))
    })
}
