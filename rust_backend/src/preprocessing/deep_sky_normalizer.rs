//! Deep-sky list normalization: decimal positions, chart symbols and
//! display names.

use anyhow::Result;
use polars::prelude::*;
use std::collections::BTreeSet;
use std::path::Path;

use crate::core::lookup::OBJECT_SYMBOLS;
use crate::core::{EtlError, EtlResult};
use crate::io::columns::{has_column, require_columns, string_values};
use crate::io;
use crate::parsing::{Declination, RightAscension};
use crate::preprocessing::pipeline::{PipelineKind, PipelineReport};
use crate::preprocessing::validator::{OutputValidator, ValidationResult};

pub const REQUIRED_COLUMNS: [&str; 4] = ["ra", "dec", "type", "name"];

/// Output of [`normalize_deep_sky`]
#[derive(Debug)]
pub struct NormalizedObjects {
    pub table: DataFrame,
    pub validation: ValidationResult,
    pub object_types: Vec<String>,
    pub unmapped_types: Vec<String>,
}

/// Convert sexagesimal positions to decimals and add chart symbols.
///
/// `ra` and `dec` are replaced in place by decimal hours and degrees; the raw
/// strings move to `ra_original` and `dec_original`. `code` holds the symbol
/// for the object type and `name_2` the display name.
pub fn normalize_deep_sky(objects: &DataFrame, source_name: &str) -> EtlResult<NormalizedObjects> {
    require_columns(objects, &REQUIRED_COLUMNS, source_name)?;

    let ra_original = required_strings(objects, "ra", source_name)?;
    let dec_original = required_strings(objects, "dec", source_name)?;

    let ra_hours = ra_original
        .iter()
        .enumerate()
        .map(|(row, raw)| {
            RightAscension::parse(raw)
                .map(|ra| ra.decimal_hours())
                .map_err(|reason| EtlError::malformed_field(source_name, row + 1, "ra", raw, reason))
        })
        .collect::<EtlResult<Vec<f64>>>()?;
    let dec_degrees = dec_original
        .iter()
        .enumerate()
        .map(|(row, raw)| {
            Declination::parse(raw)
                .map(|dec| dec.decimal_degrees())
                .map_err(|reason| EtlError::malformed_field(source_name, row + 1, "dec", raw, reason))
        })
        .collect::<EtlResult<Vec<f64>>>()?;

    let types = string_values(objects, "type")?;
    let codes: Vec<Option<String>> = types
        .iter()
        .map(|t| {
            t.as_deref()
                .and_then(|t| OBJECT_SYMBOLS.get(t))
                .map(|symbol| symbol.to_string())
        })
        .collect();

    let object_types: Vec<String> = types.iter().flatten().cloned().collect::<BTreeSet<_>>().into_iter().collect();
    let unmapped_types: Vec<String> = object_types
        .iter()
        .filter(|t| !OBJECT_SYMBOLS.contains_key(t.as_str()))
        .cloned()
        .collect();

    let mut validation = OutputValidator::validate_positions(&ra_hours, &dec_degrees);
    for object_type in &unmapped_types {
        validation.add_warning(format!("object type {:?} has no chart symbol", object_type));
    }

    let mut table = objects.clone();
    table.with_column(Series::new("ra".into(), ra_hours))?;
    table.with_column(Series::new("dec".into(), dec_degrees))?;
    table.with_column(Series::new("ra_original".into(), ra_original))?;
    table.with_column(Series::new("dec_original".into(), dec_original))?;
    table.with_column(Series::new("code".into(), codes))?;
    table.with_column(Series::new("name_2".into(), display_names(objects)?))?;

    Ok(NormalizedObjects {
        table,
        validation,
        object_types,
        unmapped_types,
    })
}

/// A null position is as malformed as an unparsable one.
fn required_strings(df: &DataFrame, column: &str, source_name: &str) -> EtlResult<Vec<String>> {
    string_values(df, column)?
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            value.ok_or_else(|| {
                EtlError::malformed_field(source_name, row + 1, column, "", "value is missing")
            })
        })
        .collect()
}

/// `proper_name` where present and non-empty, otherwise `name`.
fn display_names(df: &DataFrame) -> EtlResult<Vec<Option<String>>> {
    let names = string_values(df, "name")?;
    if !has_column(df, "proper_name") {
        return Ok(names);
    }

    let proper_names = string_values(df, "proper_name")?;
    Ok(proper_names
        .into_iter()
        .zip(names)
        .map(|(proper, name)| proper.filter(|p| !p.trim().is_empty()).or(name))
        .collect())
}

/// Normalize the deep-sky list at `input` and write it to `output`
pub fn run(input: &Path, output: &Path) -> Result<PipelineReport> {
    let source_name = io::source_name(input);
    let objects = io::read_csv(input)?;
    log::info!("Loaded {} deep-sky objects from {}", objects.height(), source_name);

    let NormalizedObjects {
        mut table,
        validation,
        object_types,
        unmapped_types,
    } = normalize_deep_sky(&objects, &source_name)?;
    let validation = validation.into_result()?;
    validation.log_warnings(PipelineKind::DeepSky.name());
    log::info!("Object types: {:?}", object_types);

    let artifact = io::write_csv(&mut table, output)?;

    let mut report = PipelineReport::new(PipelineKind::DeepSky, validation)
        .with_stat("objects", table.height())
        .with_stat("object_types", object_types.len())
        .with_stat("unmapped_types", unmapped_types.len());
    report.outputs.push(artifact);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::columns::f64_values;

    fn sample_objects() -> DataFrame {
        df!(
            "name" => ["M42", "M13", "NGC 869", "M31"],
            "proper_name" => [Some("Orion Nebula"), Some(""), None, Some("Andromeda Galaxy")],
            "type" => ["emission nebula", "globular cluster", "open cluster", "galaxy"],
            "ra" => ["5h 35.4m", "16h 41.7m", "2h 19.0m", "0h 42.7m"],
            "dec" => ["-5d 27'", "+36d 28'", "57d 9'", "-0d 30'"],
            "mag" => [4.0, 5.8, 5.3, 3.4],
        )
        .unwrap()
    }

    fn strings(df: &DataFrame, name: &str) -> Vec<Option<String>> {
        string_values(df, name).unwrap()
    }

    #[test]
    fn test_positions_become_decimal() {
        let normalized = normalize_deep_sky(&sample_objects(), "messier_ngc.csv").unwrap();
        let ra = f64_values(&normalized.table, "ra").unwrap();
        let dec = f64_values(&normalized.table, "dec").unwrap();

        assert!((ra[0].unwrap() - 5.59).abs() < 1e-12);
        assert!((ra[1].unwrap() - (16.0 + 41.7 / 60.0)).abs() < 1e-12);
        assert!((dec[0].unwrap() - (-5.45)).abs() < 1e-12);
        assert!((dec[2].unwrap() - (57.15)).abs() < 1e-12);
        assert_eq!(dec[3], Some(-0.5));
    }

    #[test]
    fn test_originals_are_kept() {
        let normalized = normalize_deep_sky(&sample_objects(), "messier_ngc.csv").unwrap();
        assert_eq!(strings(&normalized.table, "ra_original")[0].as_deref(), Some("5h 35.4m"));
        assert_eq!(strings(&normalized.table, "dec_original")[3].as_deref(), Some("-0d 30'"));
    }

    #[test]
    fn test_symbols_and_unmapped_types() {
        let normalized = normalize_deep_sky(&sample_objects(), "messier_ngc.csv").unwrap();
        assert_eq!(
            strings(&normalized.table, "code"),
            vec![
                Some("\u{16E5}".to_string()),
                Some("\u{2724}".to_string()),
                Some("\u{16B8}".to_string()),
                None
            ]
        );
        assert_eq!(normalized.unmapped_types, vec!["galaxy".to_string()]);
        assert!(normalized.validation.is_valid);
        assert_eq!(normalized.validation.warnings.len(), 1);
    }

    #[test]
    fn test_display_name_falls_back_to_name() {
        let normalized = normalize_deep_sky(&sample_objects(), "messier_ngc.csv").unwrap();
        assert_eq!(
            strings(&normalized.table, "name_2"),
            vec![
                Some("Orion Nebula".to_string()),
                Some("M13".to_string()),
                Some("NGC 869".to_string()),
                Some("Andromeda Galaxy".to_string())
            ]
        );
    }

    #[test]
    fn test_missing_proper_name_column_uses_name() {
        let objects = sample_objects().drop("proper_name").unwrap();
        let normalized = normalize_deep_sky(&objects, "messier_ngc.csv").unwrap();
        assert_eq!(strings(&normalized.table, "name_2")[0].as_deref(), Some("M42"));
    }

    #[test]
    fn test_column_order() {
        let normalized = normalize_deep_sky(&sample_objects(), "messier_ngc.csv").unwrap();
        let names: Vec<String> = normalized
            .table
            .get_column_names()
            .iter()
            .map(|c| c.to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "name", "proper_name", "type", "ra", "dec", "mag",
                "ra_original", "dec_original", "code", "name_2"
            ]
        );
    }

    #[test]
    fn test_malformed_dec_names_row_column_and_value() {
        let mut objects = sample_objects();
        objects
            .with_column(Series::new("dec".into(), ["-5d 27'", "36 28", "57d 9'", "-0d 30'"]))
            .unwrap();

        let err = normalize_deep_sky(&objects, "messier_ngc.csv").unwrap_err();
        match &err {
            EtlError::MalformedField {
                source_name,
                row,
                column,
                value,
                ..
            } => {
                assert_eq!(source_name, "messier_ngc.csv");
                assert_eq!(*row, 2);
                assert_eq!(column, "dec");
                assert_eq!(value, "36 28");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_missing_required_column() {
        let objects = sample_objects().drop("type").unwrap();
        assert!(matches!(
            normalize_deep_sky(&objects, "messier_ngc.csv"),
            Err(EtlError::MissingColumn { .. })
        ));
    }
}
