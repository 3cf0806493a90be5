//! Fixed lookup tables shared by the pipelines.
//!
//! All tables are built once on first use and never modified afterwards.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Proper name of the row the HYG catalog uses for the Sun.
pub const SUN_PROPER_NAME: &str = "Sol";

/// HYG encodes missing or dubious parallax as this distance, in parsecs.
pub const MISSING_DISTANCE_SENTINEL: f64 = 100_000.0;

/// Faintest apparent magnitude visible to the unaided eye.
pub const NAKED_EYE_MAGNITUDE: f64 = 6.5;

/// Display color for stars without a usable spectral class.
pub const UNKNOWN_COLOR: &str = "#000000";

/// Outline color substituted for [`UNKNOWN_COLOR`] so unclassified stars
/// remain visible on a dark chart.
pub const OUTLINE_FALLBACK_COLOR: &str = "#f3e8d3";

/// Color shared by the carbon and Wolf-Rayet classes (C, R, W, N, S).
pub const CARBON_COLOR: &str = "#979330";

/// Bayer abbreviation to lowercase Greek letter.
pub static GREEK_LETTERS: Lazy<HashMap<&'static str, char>> = Lazy::new(|| {
    HashMap::from([
        ("Alp", 'α'),
        ("Bet", 'β'),
        ("Chi", 'χ'),
        ("Del", 'δ'),
        ("Eps", 'ε'),
        ("Eta", 'η'),
        ("Gam", 'γ'),
        ("Iot", 'ι'),
        ("Kap", 'κ'),
        ("Lam", 'λ'),
        ("Mu", 'μ'),
        ("Nu", 'ν'),
        ("Ome", 'ω'),
        ("Omi", 'ο'),
        ("Phi", 'φ'),
        ("Pi", 'π'),
        ("Psi", 'ψ'),
        ("Rho", 'ρ'),
        ("Sig", 'σ'),
        ("Tau", 'τ'),
        ("The", 'θ'),
        ("Ups", 'υ'),
        ("Xi", 'ξ'),
        ("Zet", 'ζ'),
    ])
});

/// Morgan-Keenan class letter to chart color, hot (O) through cool (M).
pub static SPECTRAL_COLORS: Lazy<HashMap<char, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ('O', "#5A90C3"),
        ('B', "#93C2F1"),
        ('A', "#f3e8d3"),
        ('F', "#d4bf94"),
        ('G', "#FFD423"),
        ('K', "#F99220"),
        ('M', "#FF2620"),
        ('C', CARBON_COLOR),
        ('R', CARBON_COLOR),
        ('W', CARBON_COLOR),
        ('N', CARBON_COLOR),
        ('S', CARBON_COLOR),
    ])
});

/// Deep-sky object type to chart glyph.
pub static OBJECT_SYMBOLS: Lazy<HashMap<&'static str, char>> = Lazy::new(|| {
    HashMap::from([
        ("open cluster", '\u{16B8}'),
        ("globular cluster", '\u{2724}'),
        ("emission nebula", '\u{16E5}'),
        ("star cloud", '\u{2388}'),
        ("spiral galaxy", '\u{214F}'),
        ("planetary nebula", '\u{16BB}'),
        ("emission nebula, open cluster", '\u{25C8}'),
    ])
});

/// Local names of the twelve zodiac (rāśi) asterisms.
pub const ZODIAC_NAMES: [&str; 12] = [
    "Meṣa Rāśi",
    "Vṛṣa Rāśi",
    "Mithuna Rāśi",
    "Karkaṭa Rāśi",
    "Simha Rāśi",
    "Kanyā Rāśi",
    "Tulā Rāśi",
    "Vṛścikā Rāśi",
    "Dhanur Rāśi",
    "Makara Rāśi",
    "Kumbha Rāśi",
    "Mīna Rāśi",
];

pub fn is_zodiac_name(local_name: &str) -> bool {
    ZODIAC_NAMES.contains(&local_name)
}
