//! HYG star catalog enrichment: Unicode Bayer labels, spectral classes and
//! chart colors, plus the naked-eye subset.

use anyhow::Result;
use polars::prelude::*;
use std::collections::BTreeSet;
use std::path::Path;

use crate::core::lookup::{MISSING_DISTANCE_SENTINEL, SUN_PROPER_NAME};
use crate::core::EtlResult;
use crate::io::columns::{f64_values, require_columns, string_values};
use crate::io;
use crate::parsing::bayer::unicode_bayer_label;
use crate::parsing::spectral::{display_color, outline_color, spectral_class_letter};
use crate::preprocessing::pipeline::{PipelineKind, PipelineReport};
use crate::preprocessing::validator::{OutputValidator, ValidationResult};

/// HYG columns read or rewritten by the enricher
pub const REQUIRED_COLUMNS: [&str; 8] = ["proper", "bayer", "spect", "dist", "mag", "hip", "ra", "dec"];

/// Output of [`StarEnricher::enrich`]
#[derive(Debug)]
pub struct EnrichedCatalog {
    pub full: DataFrame,
    pub naked_eye: DataFrame,
    pub validation: ValidationResult,
    pub removed_sun_rows: usize,
    pub distinct_bayer: usize,
    pub spectral_letters: Vec<char>,
}

/// Adds display columns to the HYG star catalog
pub struct StarEnricher {
    naked_eye_magnitude: f64,
}

impl StarEnricher {
    pub fn new(naked_eye_magnitude: f64) -> Self {
        Self {
            naked_eye_magnitude,
        }
    }

    /// Enrich a raw HYG table.
    ///
    /// Drops the Sun, nulls the missing-distance sentinel and appends
    /// `unicode_greek`, `spect_desig`, `color` and `linecolor`. The naked-eye
    /// subset keeps rows with a known magnitude at or below the threshold.
    pub fn enrich(&self, catalog: &DataFrame, source_name: &str) -> EtlResult<EnrichedCatalog> {
        require_columns(catalog, &REQUIRED_COLUMNS, source_name)?;

        let not_sun: Vec<bool> = string_values(catalog, "proper")?
            .iter()
            .map(|proper| proper.as_deref() != Some(SUN_PROPER_NAME))
            .collect();
        let removed_sun_rows = not_sun.iter().filter(|keep| !**keep).count();
        let mut df = catalog.filter(&BooleanChunked::from_slice("keep".into(), &not_sun))?;

        let bayer = string_values(&df, "bayer")?;
        let unicode_greek: Vec<Option<String>> = bayer
            .iter()
            .map(|designation| unicode_bayer_label(designation.as_deref()))
            .collect();
        let distinct_bayer = bayer.iter().flatten().collect::<BTreeSet<_>>().len();

        let letters: Vec<Option<char>> = string_values(&df, "spect")?
            .iter()
            .map(|spect| spect.as_deref().and_then(spectral_class_letter))
            .collect();
        let spect_desig: Vec<Option<String>> =
            letters.iter().map(|l| l.map(String::from)).collect();
        let colors: Vec<&str> = letters.iter().map(|l| display_color(*l)).collect();
        let linecolors: Vec<&str> = colors.iter().map(|c| outline_color(c)).collect();

        let dist: Vec<Option<f64>> = f64_values(&df, "dist")?
            .into_iter()
            .map(|d| d.filter(|value| *value != MISSING_DISTANCE_SENTINEL))
            .collect();

        df.with_column(Series::new("dist".into(), dist))?;
        df.with_column(Series::new("unicode_greek".into(), unicode_greek))?;
        df.with_column(Series::new("spect_desig".into(), spect_desig))?;
        df.with_column(Series::new("color".into(), colors.clone()))?;
        df.with_column(Series::new("linecolor".into(), linecolors.clone()))?;

        let threshold = self.naked_eye_magnitude;
        let visible: Vec<bool> = f64_values(&df, "mag")?
            .iter()
            .map(|mag| mag.is_some_and(|m| m <= threshold))
            .collect();
        let naked_eye = df.filter(&BooleanChunked::from_slice("visible".into(), &visible))?;

        let validation = OutputValidator::validate_star_colors(&letters, &colors, &linecolors);
        let spectral_letters = letters
            .iter()
            .flatten()
            .copied()
            .collect::<BTreeSet<char>>()
            .into_iter()
            .collect();

        Ok(EnrichedCatalog {
            full: df,
            naked_eye,
            validation,
            removed_sun_rows,
            distinct_bayer,
            spectral_letters,
        })
    }
}

impl Default for StarEnricher {
    fn default() -> Self {
        Self::new(crate::core::lookup::NAKED_EYE_MAGNITUDE)
    }
}

/// Enrich the catalog at `input` and write the full and naked-eye tables
pub fn run(
    input: &Path,
    full_output: &Path,
    naked_eye_output: &Path,
    naked_eye_magnitude: f64,
) -> Result<PipelineReport> {
    let source_name = io::source_name(input);
    let catalog = io::read_csv(input)?;
    log::info!("Loaded {} stars from {}", catalog.height(), source_name);

    let enricher = StarEnricher::new(naked_eye_magnitude);
    let EnrichedCatalog {
        mut full,
        mut naked_eye,
        validation,
        removed_sun_rows,
        distinct_bayer,
        spectral_letters,
    } = enricher.enrich(&catalog, &source_name)?;

    let validation = validation.into_result()?;
    validation.log_warnings(PipelineKind::Stars.name());

    log::info!("{} distinct Bayer designations", distinct_bayer);
    log::info!("Spectral classes present: {:?}", spectral_letters);
    log::info!(
        "{} stars total, {} at magnitude {} or brighter",
        full.height(),
        naked_eye.height(),
        naked_eye_magnitude
    );
    if removed_sun_rows != 1 {
        log::warn!("Expected one Sun row in {}, removed {}", source_name, removed_sun_rows);
    }

    let full_artifact = io::write_csv(&mut full, full_output)?;
    let naked_artifact = io::write_csv(&mut naked_eye, naked_eye_output)?;

    let mut report = PipelineReport::new(PipelineKind::Stars, validation)
        .with_stat("stars", full.height())
        .with_stat("naked_eye", naked_eye.height())
        .with_stat("removed_sun_rows", removed_sun_rows)
        .with_stat("distinct_bayer", distinct_bayer)
        .with_stat("spectral_classes", spectral_letters.len());
    report.outputs.push(full_artifact);
    report.outputs.push(naked_artifact);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EtlError;

    fn sample_catalog() -> DataFrame {
        df!(
            "hip" => [None, Some(677i64), Some(3092), Some(5447), Some(1)],
            "proper" => [Some("Sol"), Some("Alpheratz"), None, None, None],
            "bayer" => [None, Some("Alp"), Some("Del"), Some("Kap-1"), None],
            "spect" => [Some("G2V"), Some("B8IVmnp"), Some("K3III"), Some("DA2"), None],
            "dist" => [0.0, 29.7442, 100000.0, 61.0, 219.78],
            "mag" => [Some(-26.7), Some(2.07), Some(3.27), Some(7.1), None],
            "ra" => [0.0, 0.139791, 0.655466, 1.162, 0.000060],
            "dec" => [0.0, 29.090432, 30.861024, 35.62, 1.089009],
        )
        .unwrap()
    }

    fn str_column(df: &DataFrame, name: &str) -> Vec<Option<String>> {
        string_values(df, name).unwrap()
    }

    #[test]
    fn test_sun_is_removed() {
        let enriched = StarEnricher::default().enrich(&sample_catalog(), "hyg.csv").unwrap();
        assert_eq!(enriched.removed_sun_rows, 1);
        assert_eq!(enriched.full.height(), 4);
        assert!(!str_column(&enriched.full, "proper").contains(&Some("Sol".to_string())));
    }

    #[test]
    fn test_derived_columns() {
        let enriched = StarEnricher::default().enrich(&sample_catalog(), "hyg.csv").unwrap();
        let full = &enriched.full;

        assert_eq!(
            str_column(full, "unicode_greek"),
            vec![Some("α".into()), Some("δ".into()), Some("κ1".into()), None]
        );
        assert_eq!(
            str_column(full, "spect_desig"),
            vec![Some("B".into()), Some("K".into()), None, None]
        );
        assert_eq!(
            str_column(full, "color"),
            vec![
                Some("#93C2F1".into()),
                Some("#F99220".into()),
                Some("#000000".into()),
                Some("#000000".into())
            ]
        );
        assert_eq!(
            str_column(full, "linecolor"),
            vec![
                Some("#93C2F1".into()),
                Some("#F99220".into()),
                Some("#f3e8d3".into()),
                Some("#f3e8d3".into())
            ]
        );
        assert!(enriched.validation.is_valid);
        assert_eq!(enriched.spectral_letters, vec!['B', 'K']);
        assert_eq!(enriched.distinct_bayer, 3);
    }

    #[test]
    fn test_output_column_order() {
        let enriched = StarEnricher::default().enrich(&sample_catalog(), "hyg.csv").unwrap();
        let names: Vec<String> = enriched
            .full
            .get_column_names()
            .iter()
            .map(|c| c.to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "hip", "proper", "bayer", "spect", "dist", "mag", "ra", "dec",
                "unicode_greek", "spect_desig", "color", "linecolor"
            ]
        );
    }

    #[test]
    fn test_distance_sentinel_becomes_null() {
        let enriched = StarEnricher::default().enrich(&sample_catalog(), "hyg.csv").unwrap();
        assert_eq!(
            f64_values(&enriched.full, "dist").unwrap(),
            vec![Some(29.7442), None, Some(61.0), Some(219.78)]
        );
    }

    #[test]
    fn test_naked_eye_subset_excludes_faint_and_unknown_magnitudes() {
        let enriched = StarEnricher::default().enrich(&sample_catalog(), "hyg.csv").unwrap();
        assert_eq!(
            f64_values(&enriched.naked_eye, "hip").unwrap(),
            vec![Some(677.0), Some(3092.0)]
        );
    }

    #[test]
    fn test_custom_threshold() {
        let enriched = StarEnricher::new(8.0).enrich(&sample_catalog(), "hyg.csv").unwrap();
        assert_eq!(enriched.naked_eye.height(), 3);
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let catalog = sample_catalog().drop("spect").unwrap();
        let err = StarEnricher::default().enrich(&catalog, "hyg.csv").unwrap_err();
        match err {
            EtlError::MissingColumn { column, .. } => assert_eq!(column, "spect"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
