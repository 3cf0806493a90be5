//! Error types for catalog transformations.
//!
//! Strict failures abort a pipeline run before any output is written. Each
//! variant carries enough context (source file, line or row, offending value)
//! to locate the bad input without re-running under a debugger.

use polars::prelude::PolarsError;

/// Result type for catalog transformations
pub type EtlResult<T> = Result<T, EtlError>;

/// Error type for catalog transformations
#[derive(Debug, thiserror::Error)]
pub enum EtlError {
    #[error("{source_name}:{line}: malformed record: {reason}")]
    MalformedRecord {
        source_name: String,
        line: usize,
        reason: String,
    },

    #[error("{source_name}: row {row}: cannot parse {column} value {value:?}: {reason}")]
    MalformedField {
        source_name: String,
        row: usize,
        column: String,
        value: String,
        reason: String,
    },

    #[error("{source_name}: missing required column '{column}'")]
    MissingColumn { source_name: String, column: String },

    #[error("{source_name}: {} asterism star(s) missing from the star catalog: {ids:?}", .ids.len())]
    UnresolvedStars { source_name: String, ids: Vec<u32> },

    #[error("expected {expected} zodiac asterisms, found {found}")]
    ZodiacCount { expected: usize, found: usize },

    #[error("output validation failed: {}", .errors.join("; "))]
    Validation { errors: Vec<String> },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Table error: {0}")]
    Table(#[from] PolarsError),
}

impl EtlError {
    pub fn malformed_record(source_name: &str, line: usize, reason: impl Into<String>) -> Self {
        EtlError::MalformedRecord {
            source_name: source_name.to_string(),
            line,
            reason: reason.into(),
        }
    }

    pub fn malformed_field(
        source_name: &str,
        row: usize,
        column: &str,
        value: &str,
        reason: impl Into<String>,
    ) -> Self {
        EtlError::MalformedField {
            source_name: source_name.to_string(),
            row,
            column: column.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn missing_column(source_name: &str, column: &str) -> Self {
        EtlError::MissingColumn {
            source_name: source_name.to_string(),
            column: column.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_record_message_names_line() {
        let err = EtlError::malformed_record("bound_20.dat", 42, "declination is not a number");
        assert_eq!(
            err.to_string(),
            "bound_20.dat:42: malformed record: declination is not a number"
        );
    }

    #[test]
    fn test_unresolved_stars_message_counts_ids() {
        let err = EtlError::UnresolvedStars {
            source_name: "hygdata_processed.csv".to_string(),
            ids: vec![7, 11],
        };
        assert_eq!(
            err.to_string(),
            "hygdata_processed.csv: 2 asterism star(s) missing from the star catalog: [7, 11]"
        );
    }
}
