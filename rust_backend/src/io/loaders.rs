use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use polars::prelude::*;
use std::io::{Cursor, Read};
use std::path::Path;

/// Represents how an input file is stored on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEncoding {
    Plain,
    Gzip,
}

impl InputEncoding {
    pub fn detect(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("gz") => InputEncoding::Gzip,
            _ => InputEncoding::Plain,
        }
    }
}

/// Read an input file fully into memory, gunzipping `.gz` files
pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    let raw = std::fs::read(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;

    match InputEncoding::detect(path) {
        InputEncoding::Plain => Ok(raw),
        InputEncoding::Gzip => {
            let mut decoded = Vec::with_capacity(raw.len() * 4);
            GzDecoder::new(raw.as_slice())
                .read_to_end(&mut decoded)
                .with_context(|| format!("Failed to decompress {}", path.display()))?;
            Ok(decoded)
        }
    }
}

/// Read a UTF-8 text input
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = read_bytes(path)?;
    String::from_utf8(bytes).with_context(|| format!("{} is not valid UTF-8", path.display()))
}

/// Read a CSV input with a header row into a DataFrame
pub fn read_csv(path: &Path) -> Result<DataFrame> {
    let bytes = read_bytes(path)?;
    parse_csv_bytes(bytes).with_context(|| format!("Failed to parse CSV: {}", path.display()))
}

/// Parse in-memory CSV bytes. The whole file is scanned for type inference so
/// that a late non-numeric value cannot break a column inferred from the head.
pub fn parse_csv_bytes(bytes: Vec<u8>) -> PolarsResult<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
}

/// File name used in error messages and logs
pub fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_encoding() {
        assert_eq!(
            InputEncoding::detect(Path::new("data/bound_20.dat.gz")),
            InputEncoding::Gzip
        );
        assert_eq!(
            InputEncoding::detect(Path::new("data/messier_ngc.csv")),
            InputEncoding::Plain
        );
        assert_eq!(InputEncoding::detect(Path::new("README")), InputEncoding::Plain);
    }

    #[test]
    fn test_source_name_is_file_name() {
        assert_eq!(source_name(Path::new("data/india/constellationship.fab")), "constellationship.fab");
    }

    #[test]
    fn test_parse_csv_bytes_keeps_late_strings() {
        let mut csv = String::from("id,value\n");
        for i in 0..200 {
            csv.push_str(&format!("{},{}\n", i, i));
        }
        csv.push_str("200,n/a\n");

        let df = parse_csv_bytes(csv.into_bytes()).unwrap();
        assert_eq!(df.height(), 201);
        assert_eq!(df.column("value").unwrap().dtype(), &DataType::String);
    }
}
