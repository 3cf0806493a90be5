//! Parsers for Stellarium sky-culture files.
//!
//! - `constellationship.fab`: `<code> <pair_count> <hip_1> <hip_2> ...`,
//!   whitespace separated, one asterism per line.
//! - `constellation_names.eng.fab`: tab separated
//!   `<code>\t<local name>\t"<english name>"`, possibly with trailing tabs.

use crate::core::domain::{ConstellationName, LineListEntry};
use crate::core::{EtlError, EtlResult};

/// Parse a line-list file. Blank lines and `#` comments are skipped.
pub fn parse_line_list(content: &str, source_name: &str) -> EtlResult<Vec<LineListEntry>> {
    let mut entries = Vec::new();

    for (index, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let entry = parse_line_list_line(trimmed)
            .map_err(|reason| EtlError::malformed_record(source_name, index + 1, reason))?;
        entries.push(entry);
    }

    Ok(entries)
}

pub fn parse_line_list_line(line: &str) -> Result<LineListEntry, String> {
    let mut tokens = line.split_whitespace();

    let constellation = tokens
        .next()
        .ok_or_else(|| "empty line".to_string())?
        .to_string();
    let pair_token = tokens
        .next()
        .ok_or_else(|| format!("missing pair count for {}", constellation))?;
    let declared_pairs = pair_token
        .parse::<u32>()
        .map_err(|_| format!("pair count {:?} is not an integer", pair_token))?;

    let star_ids = tokens
        .map(|token| {
            token
                .parse::<u32>()
                .map_err(|_| format!("star id {:?} is not an integer", token))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(LineListEntry {
        constellation,
        declared_pairs,
        star_ids,
    })
}

/// Parse a constellation-names file.
pub fn parse_constellation_names(
    content: &str,
    source_name: &str,
) -> EtlResult<Vec<ConstellationName>> {
    let mut names = Vec::new();

    for (index, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let name = parse_names_line(line)
            .map_err(|reason| EtlError::malformed_record(source_name, index + 1, reason))?;
        names.push(name);
    }

    Ok(names)
}

pub fn parse_names_line(line: &str) -> Result<ConstellationName, String> {
    let mut fields = line.trim_end_matches(['\r', '\n']).split('\t');

    let constellation = fields
        .next()
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .ok_or_else(|| "missing constellation code".to_string())?;
    let local_name = fields
        .next()
        .map(str::trim)
        .ok_or_else(|| format!("missing local name for {}", constellation))?;
    let raw_english = fields
        .next()
        .ok_or_else(|| format!("missing english name for {}", constellation))?;
    let english_name = first_quoted(raw_english)
        .ok_or_else(|| format!("english name {:?} has no quoted text", raw_english))?;

    Ok(ConstellationName {
        constellation: constellation.to_string(),
        local_name: local_name.to_string(),
        english_name: english_name.to_string(),
    })
}

/// First double-quoted substring, without the quotes.
///
/// ```
/// use skychart_etl::parsing::line_list_parser::first_quoted;
///
/// assert_eq!(first_quoted(r#""Ram" _("Ram")"#), Some("Ram"));
/// assert_eq!(first_quoted("Ram"), None);
/// ```
pub fn first_quoted(raw: &str) -> Option<&str> {
    let (_, after_open) = raw.split_once('"')?;
    let (quoted, _) = after_open.split_once('"')?;
    Some(quoted)
}
