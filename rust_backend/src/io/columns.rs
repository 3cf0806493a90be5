//! Typed access to DataFrame columns.
//!
//! Input CSVs are read with inferred types, so a column may arrive as Int64
//! where Float64 is expected or as an all-null String column. These helpers
//! cast before extracting values.

use polars::prelude::*;

use crate::core::{EtlError, EtlResult};

pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_names().iter().any(|c| c.as_str() == name)
}

/// Fail with [`EtlError::MissingColumn`] for the first absent column
pub fn require_columns(df: &DataFrame, columns: &[&str], source_name: &str) -> EtlResult<()> {
    match columns.iter().find(|name| !has_column(df, name)) {
        Some(missing) => Err(EtlError::missing_column(source_name, missing)),
        None => Ok(()),
    }
}

pub fn f64_values(df: &DataFrame, name: &str) -> EtlResult<Vec<Option<f64>>> {
    let column = df.column(name)?.cast(&DataType::Float64)?;
    let values = column.as_materialized_series().f64()?.into_iter().collect();
    Ok(values)
}

pub fn string_values(df: &DataFrame, name: &str) -> EtlResult<Vec<Option<String>>> {
    let column = df.column(name)?.cast(&DataType::String)?;
    let values = column
        .as_materialized_series()
        .str()?
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect();
    Ok(values)
}
