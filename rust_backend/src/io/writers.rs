use anyhow::{Context, Result};
use polars::prelude::*;
use serde::Serialize;
use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};

use crate::io::checksum::calculate_checksum;

/// A table written by a pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputArtifact {
    pub path: PathBuf,
    pub rows: usize,
    pub sha256: String,
}

/// Encode a DataFrame as UTF-8 CSV with a header row
pub fn encode_csv(df: &mut DataFrame) -> PolarsResult<Vec<u8>> {
    let mut buffer = Vec::new();
    CsvWriter::new(&mut buffer)
        .include_header(true)
        .finish(df)?;
    Ok(buffer)
}

/// Write a DataFrame to `path`.
///
/// The table is encoded in memory, written to a sibling `.tmp` file and
/// renamed into place, so a failed run never leaves a truncated table behind.
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<OutputArtifact> {
    let bytes = encode_csv(df)
        .with_context(|| format!("Failed to encode table for {}", path.display()))?;
    write_atomically(path, &bytes)?;

    Ok(OutputArtifact {
        path: path.to_path_buf(),
        rows: df.height(),
        sha256: calculate_checksum(&bytes),
    })
}

fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }

    let file_name = path
        .file_name()
        .with_context(|| format!("Output path has no file name: {}", path.display()))?;
    let mut tmp_name = file_name.to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    fs::write(&tmp_path, bytes)
        .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path)
        .with_context(|| format!("Failed to move {} into place", path.display()))?;
    Ok(())
}

/// Format a sequence as a bracketed list literal: `[0.5, 1.25]`, `[677, 3092]`.
pub fn format_list<T: Debug>(values: &[T]) -> String {
    let items: Vec<String> = values.iter().map(|v| format!("{:?}", v)).collect();
    format!("[{}]", items.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_format_list() {
        assert_eq!(format_list::<f64>(&[]), "[]");
        assert_eq!(format_list(&[0.5, 1.0, 22.8714256]), "[0.5, 1.0, 22.8714256]");
        assert_eq!(format_list(&[677u32, 3092]), "[677, 3092]");
    }

    #[test]
    fn test_write_csv_creates_directories_and_reports_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("processed").join("table.csv");
        let mut df = df!("name" => ["AND", "ORI"], "count" => [3i64, 4]).unwrap();

        let artifact = write_csv(&mut df, &path).unwrap();

        assert_eq!(artifact.rows, 2);
        let written = fs::read(&path).unwrap();
        assert_eq!(String::from_utf8(written.clone()).unwrap(), "name,count\nAND,3\nORI,4\n");
        assert_eq!(artifact.sha256, calculate_checksum(&written));
        assert!(!dir.path().join("processed").join("table.csv.tmp").exists());
    }

    #[test]
    fn test_list_cells_are_quoted() {
        let mut df = df!("ra" => [format_list(&[0.5, 1.5])]).unwrap();
        let bytes = encode_csv(&mut df).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "ra\n\"[0.5, 1.5]\"\n");
    }
}
