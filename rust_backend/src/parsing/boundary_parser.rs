//! Fixed-width parser for the Davenhall & Leggett constellation boundary
//! catalog (`bound_20.dat`, J2000).
//!
//! Byte layout of a 29-byte record (1-based, inclusive):
//!
//! | Bytes | Format | Field |
//! |-------|--------|-------|
//! | 1-11  | F10.7  | right ascension, decimal hours |
//! | 12-22 | F11.7  | declination, decimal degrees |
//! | 24-27 | A4     | constellation abbreviation |
//! | 29    | A1     | point type, `O` or `I` |
//!
//! Bytes 11, 23 and 28 separate the fields and must be blank.

use crate::core::domain::{BoundaryPoint, PointType};
use crate::core::{EtlError, EtlResult};

pub const RECORD_SIZE: usize = 29;

const RA_COLUMNS: (usize, usize) = (0, 11);
const DEC_COLUMNS: (usize, usize) = (11, 22);
const CODE_COLUMNS: (usize, usize) = (23, 27);
const TYPE_COLUMN: usize = 28;
const SEPARATOR_COLUMNS: [usize; 3] = [10, 22, 27];

/// Parse a whole boundary file. Blank lines are skipped; any other line that
/// does not match the layout fails the parse with its 1-based line number.
pub fn parse_boundary_records(content: &str, source_name: &str) -> EtlResult<Vec<BoundaryPoint>> {
    let mut points = Vec::new();

    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let point = parse_boundary_line(line)
            .map_err(|reason| EtlError::malformed_record(source_name, index + 1, reason))?;
        points.push(point);
    }

    Ok(points)
}

/// Parse a single fixed-width record.
pub fn parse_boundary_line(line: &str) -> Result<BoundaryPoint, String> {
    let line = line.trim_end_matches('\r');
    let bytes = line.as_bytes();
    if bytes.len() < RECORD_SIZE {
        return Err(format!(
            "record is {} bytes, expected at least {}",
            bytes.len(),
            RECORD_SIZE
        ));
    }

    if let Some(&column) = SEPARATOR_COLUMNS.iter().find(|&&c| bytes[c] != b' ') {
        return Err(format!(
            "byte {} is {:?}, expected a blank field separator",
            column + 1,
            bytes[column] as char
        ));
    }

    let ra_hours = parse_float(col(bytes, RA_COLUMNS)?, "right ascension")?;
    let dec_degrees = parse_float(col(bytes, DEC_COLUMNS)?, "declination")?;

    let constellation = col(bytes, CODE_COLUMNS)?.trim();
    if constellation.len() < 3
        || constellation.len() > 4
        || !constellation.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return Err(format!("invalid constellation code {:?}", constellation));
    }

    let flag = bytes[TYPE_COLUMN] as char;
    let point_type = PointType::from_flag(flag)
        .ok_or_else(|| format!("invalid point type {:?}, expected 'O' or 'I'", flag))?;

    Ok(BoundaryPoint {
        ra_hours,
        dec_degrees,
        constellation: constellation.to_string(),
        point_type,
    })
}

fn col(bytes: &[u8], (start, end): (usize, usize)) -> Result<&str, String> {
    std::str::from_utf8(&bytes[start..end])
        .map_err(|_| format!("bytes {}-{} are not valid text", start + 1, end))
}

fn parse_float(field: &str, label: &str) -> Result<f64, String> {
    let trimmed = field.trim();
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("{} {:?} is not a number", label, trimmed))
}
