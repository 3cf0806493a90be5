//! Spectral classification and color mapping.
//!
//! Only the leading Morgan-Keenan letter matters for chart coloring. Subdwarf
//! types carry an `sd` prefix that is stripped first; white dwarfs (`D...`)
//! and lowercase-prefixed types are left unclassified.

use crate::core::lookup::{OUTLINE_FALLBACK_COLOR, SPECTRAL_COLORS, UNKNOWN_COLOR};

/// Upper bound on `sd` prefixes removed from one spectral type.
const MAX_SUBDWARF_PREFIXES: usize = 4;

/// Extract the spectral class letter.
///
/// # Examples
///
/// ```
/// use skychart_etl::parsing::spectral::spectral_class_letter;
///
/// assert_eq!(spectral_class_letter("sdB5"), Some('B'));
/// assert_eq!(spectral_class_letter("K2III"), Some('K'));
/// assert_eq!(spectral_class_letter("DA2"), None);
/// ```
pub fn spectral_class_letter(spectral_type: &str) -> Option<char> {
    let mut remaining = spectral_type;
    for _ in 0..MAX_SUBDWARF_PREFIXES {
        match remaining.strip_prefix("sd") {
            Some(stripped) => remaining = stripped,
            None => break,
        }
    }

    remaining
        .chars()
        .next()
        .filter(|c| c.is_ascii_uppercase() && *c != 'D')
}

/// Chart color for a spectral class; unknown or missing classes are black.
pub fn display_color(class_letter: Option<char>) -> &'static str {
    class_letter
        .and_then(|letter| SPECTRAL_COLORS.get(&letter).copied())
        .unwrap_or(UNKNOWN_COLOR)
}

/// Outline color: the display color, with black replaced by beige.
pub fn outline_color(display_color: &str) -> &str {
    if display_color == UNKNOWN_COLOR {
        OUTLINE_FALLBACK_COLOR
    } else {
        display_color
    }
}
