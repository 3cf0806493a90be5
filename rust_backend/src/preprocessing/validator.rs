//! Output validation with detailed error and warning reporting.
//!
//! Every pipeline checks its derived entities against the invariants the
//! renderer relies on before anything is written. Errors abort the run;
//! warnings record lenient decisions (dropped join rows, unmapped categories)
//! so they show up in logs and in the run summary instead of disappearing.

use serde::{Deserialize, Serialize};

use crate::core::domain::{Asterism, ConstellationBoundary};
use crate::core::lookup::{SPECTRAL_COLORS, UNKNOWN_COLOR};
use crate::core::{EtlError, EtlResult};

/// Validation result with categorized issues.
///
/// Errors make `is_valid` false, while warnings are informational but don't
/// fail validation.
///
/// # Examples
///
/// ```
/// use skychart_etl::preprocessing::validator::ValidationResult;
///
/// let mut result = ValidationResult::new();
/// assert!(result.is_valid);
///
/// result.add_warning("1 line-list row has no name entry".to_string());
/// assert!(result.is_valid);
///
/// result.add_error("asterism Ari: 4 stars but 3 ra values".to_string());
/// assert!(!result.is_valid);
/// assert!(result.into_result().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Creates a new validation result with valid status and empty error/warning lists.
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds a critical error and marks the result as invalid.
    pub fn add_error(&mut self, error: String) {
        self.is_valid = false;
        self.errors.push(error);
    }

    /// Adds a non-critical warning without invalidating the result.
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Folds another result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.is_valid &= other.is_valid;
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Converts to [`EtlError::Validation`] when any error was recorded.
    pub fn into_result(self) -> EtlResult<Self> {
        if self.is_valid {
            Ok(self)
        } else {
            Err(EtlError::Validation {
                errors: self.errors,
            })
        }
    }

    /// Emits every warning through the `log` facade.
    pub fn log_warnings(&self, pipeline: &str) {
        for warning in &self.warnings {
            log::warn!("{}: {}", pipeline, warning);
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for derived catalog entities.
pub struct OutputValidator;

impl OutputValidator {
    /// Checks that grouping neither lost nor invented points and that each
    /// boundary's coordinate sequences are aligned.
    ///
    /// # Examples
    ///
    /// ```
    /// use skychart_etl::core::domain::ConstellationBoundary;
    /// use skychart_etl::preprocessing::validator::OutputValidator;
    ///
    /// let mut boundary = ConstellationBoundary::new("AND");
    /// boundary.push(22.87, 35.17);
    ///
    /// assert!(OutputValidator::validate_boundaries(1, &[boundary.clone()]).is_valid);
    /// assert!(!OutputValidator::validate_boundaries(2, &[boundary]).is_valid);
    /// ```
    pub fn validate_boundaries(
        input_records: usize,
        boundaries: &[ConstellationBoundary],
    ) -> ValidationResult {
        let mut result = ValidationResult::new();

        let grouped: usize = boundaries.iter().map(ConstellationBoundary::len).sum();
        if grouped != input_records {
            result.add_error(format!(
                "boundary groups hold {} points but {} records were read",
                grouped, input_records
            ));
        }

        for boundary in boundaries {
            if boundary.ra_hours.len() != boundary.dec_degrees.len() {
                result.add_error(format!(
                    "boundary {}: {} ra values but {} dec values",
                    boundary.name,
                    boundary.ra_hours.len(),
                    boundary.dec_degrees.len()
                ));
            }
            if boundary.len() < 3 {
                result.add_warning(format!(
                    "boundary {} has only {} points and cannot enclose an area",
                    boundary.name,
                    boundary.len()
                ));
            }
        }

        result
    }

    /// Checks the per-star color columns.
    ///
    /// `colors[i]` must come from the spectral table, or be the black sentinel
    /// when `letters[i]` has no table entry; `outlines[i]` is never black.
    pub fn validate_star_colors(
        letters: &[Option<char>],
        colors: &[&str],
        outlines: &[&str],
    ) -> ValidationResult {
        let mut result = ValidationResult::new();

        if letters.len() != colors.len() || colors.len() != outlines.len() {
            result.add_error(format!(
                "color columns differ in length: {} letters, {} colors, {} outlines",
                letters.len(),
                colors.len(),
                outlines.len()
            ));
            return result;
        }

        for (row, ((letter, color), outline)) in
            letters.iter().zip(colors).zip(outlines).enumerate()
        {
            let expected = letter.and_then(|l| SPECTRAL_COLORS.get(&l).copied());
            match expected {
                Some(mapped) if *color != mapped => result.add_error(format!(
                    "row {}: class {:?} colored {} instead of {}",
                    row, letter, color, mapped
                )),
                None if *color != UNKNOWN_COLOR => result.add_error(format!(
                    "row {}: unclassified star colored {}",
                    row, color
                )),
                _ => {}
            }
            if *outline == UNKNOWN_COLOR {
                result.add_error(format!("row {}: outline color is the black sentinel", row));
            }
        }

        let mut unmapped: Vec<char> = letters
            .iter()
            .flatten()
            .filter(|l| !SPECTRAL_COLORS.contains_key(*l))
            .copied()
            .collect();
        if !unmapped.is_empty() {
            let count = unmapped.len();
            unmapped.sort_unstable();
            unmapped.dedup();
            result.add_warning(format!(
                "{} stars have spectral letters without a color ({:?}); drawn as unclassified",
                count, unmapped
            ));
        }

        result
    }

    /// Checks positional alignment of every asterism.
    pub fn validate_asterisms(asterisms: &[Asterism]) -> ValidationResult {
        let mut result = ValidationResult::new();

        for asterism in asterisms {
            if !asterism.is_aligned() {
                result.add_error(format!(
                    "asterism {}: {} stars but {} ra and {} dec values",
                    asterism.constellation,
                    asterism.star_ids.len(),
                    asterism.ra.len(),
                    asterism.dec.len()
                ));
            }
            if asterism.star_ids.len() % 2 != 0 {
                result.add_warning(format!(
                    "asterism {} lists an odd number of stars ({}); the last one starts no segment",
                    asterism.constellation,
                    asterism.star_ids.len()
                ));
            }
        }

        result
    }

    /// Checks decimal positions are on the sky.
    pub fn validate_positions(ra_hours: &[f64], dec_degrees: &[f64]) -> ValidationResult {
        let mut result = ValidationResult::new();

        for (row, (ra, dec)) in ra_hours.iter().zip(dec_degrees).enumerate() {
            if !(0.0..24.0).contains(ra) {
                result.add_error(format!("row {}: ra {} outside 0-24h", row + 1, ra));
            }
            if !(-90.0..=90.0).contains(dec) {
                result.add_error(format!("row {}: dec {} outside ±90°", row + 1, dec));
            }
        }

        result
    }
}
