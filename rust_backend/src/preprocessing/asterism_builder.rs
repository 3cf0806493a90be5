//! Asterism building: joins the line list with the constellation names and
//! resolves every referenced Hipparcos ID to a catalog position.

use anyhow::Result;
use polars::prelude::*;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use crate::core::domain::{Asterism, ConstellationName, LineListEntry, StarPosition};
use crate::core::lookup::is_zodiac_name;
use crate::core::{EtlError, EtlResult};
use crate::io::columns::{f64_values, require_columns};
use crate::io::{self, format_list};
use crate::parsing::line_list_parser::{parse_constellation_names, parse_line_list};
use crate::preprocessing::pipeline::{PipelineKind, PipelineReport};
use crate::preprocessing::validator::{OutputValidator, ValidationResult};

pub const EXPECTED_ZODIAC_COUNT: usize = 12;

/// A joined line-list row before star resolution
#[derive(Debug, Clone, PartialEq)]
pub struct NamedLineList<'a> {
    pub entry: &'a LineListEntry,
    pub name: &'a ConstellationName,
}

/// Inner join result with the rows that found no partner
#[derive(Debug, Default)]
pub struct JoinOutcome<'a> {
    pub joined: Vec<NamedLineList<'a>>,
    pub unmatched_line_list: Vec<String>,
    pub unmatched_names: Vec<String>,
    pub duplicate_names: Vec<String>,
}

/// Built asterisms plus the join discrepancies that were tolerated
#[derive(Debug, Clone, Serialize)]
pub struct AsterismReport {
    pub asterisms: Vec<Asterism>,
    pub unmatched_line_list: Vec<String>,
    pub unmatched_names: Vec<String>,
    pub duplicate_names: Vec<String>,
}

impl AsterismReport {
    pub fn zodiac_count(&self) -> usize {
        self.asterisms.iter().filter(|a| a.is_zodiac).count()
    }

    fn warnings(&self) -> ValidationResult {
        let mut result = ValidationResult::new();
        for code in &self.unmatched_line_list {
            result.add_warning(format!("line-list code {} has no name entry; dropped", code));
        }
        for code in &self.unmatched_names {
            result.add_warning(format!("name entry {} has no line-list row; dropped", code));
        }
        for code in &self.duplicate_names {
            result.add_warning(format!("duplicate name entry for {}; first one kept", code));
        }
        result
    }
}

/// Inner join on the constellation code, in line-list order.
///
/// When the names contain a code twice the first entry wins.
pub fn join_names<'a>(
    line_list: &'a [LineListEntry],
    names: &'a [ConstellationName],
) -> JoinOutcome<'a> {
    let mut outcome = JoinOutcome::default();
    let mut by_code: HashMap<&str, &ConstellationName> = HashMap::new();

    for name in names {
        if by_code.contains_key(name.constellation.as_str()) {
            outcome.duplicate_names.push(name.constellation.clone());
        } else {
            by_code.insert(name.constellation.as_str(), name);
        }
    }

    let mut used: BTreeSet<&str> = BTreeSet::new();
    for entry in line_list {
        match by_code.get(entry.constellation.as_str()) {
            Some(&name) => {
                used.insert(name.constellation.as_str());
                outcome.joined.push(NamedLineList { entry, name });
            }
            None => outcome.unmatched_line_list.push(entry.constellation.clone()),
        }
    }

    let mut seen: BTreeSet<&str> = BTreeSet::new();
    for name in names {
        let code = name.constellation.as_str();
        if !used.contains(code) && seen.insert(code) {
            outcome.unmatched_names.push(name.constellation.clone());
        }
    }

    outcome
}

/// Index catalog positions by Hipparcos ID.
///
/// Rows without a `hip` value are not addressable and are skipped, as are
/// rows without a position; an asterism that references one of those stars
/// fails later as unresolved. If an ID occurs twice the first row wins.
pub fn star_positions(catalog: &DataFrame, source_name: &str) -> EtlResult<HashMap<u32, StarPosition>> {
    require_columns(catalog, &["hip", "ra", "dec"], source_name)?;

    let hips = f64_values(catalog, "hip")?;
    let ras = f64_values(catalog, "ra")?;
    let decs = f64_values(catalog, "dec")?;

    let mut positions = HashMap::with_capacity(hips.len());
    let mut unpositioned = 0usize;
    for (row, ((hip, ra), dec)) in hips.iter().zip(&ras).zip(&decs).enumerate() {
        let Some(hip) = hip else { continue };
        if hip.fract() != 0.0 || *hip < 0.0 || *hip > u32::MAX as f64 {
            return Err(EtlError::malformed_field(
                source_name,
                row + 1,
                "hip",
                &hip.to_string(),
                "not a Hipparcos number",
            ));
        }
        let (Some(ra), Some(dec)) = (ra, dec) else {
            unpositioned += 1;
            continue;
        };
        positions
            .entry(*hip as u32)
            .or_insert(StarPosition { ra: *ra, dec: *dec });
    }

    if unpositioned > 0 {
        log::debug!("{}: skipped {} stars without ra/dec", source_name, unpositioned);
    }
    Ok(positions)
}

/// Builds asterisms from parsed line lists and names
pub struct AsterismBuilder<'a> {
    positions: &'a HashMap<u32, StarPosition>,
    catalog_name: &'a str,
}

impl<'a> AsterismBuilder<'a> {
    /// `catalog_name` is the star catalog the positions were read from.
    pub fn new(positions: &'a HashMap<u32, StarPosition>, catalog_name: &'a str) -> Self {
        Self {
            positions,
            catalog_name,
        }
    }

    /// Join, resolve and flag zodiac asterisms.
    ///
    /// Fails with every unresolved star ID, sorted, or when the zodiac count
    /// is not [`EXPECTED_ZODIAC_COUNT`].
    pub fn build(
        &self,
        line_list: &[LineListEntry],
        names: &[ConstellationName],
    ) -> EtlResult<AsterismReport> {
        let outcome = join_names(line_list, names);

        let unresolved: BTreeSet<u32> = outcome
            .joined
            .iter()
            .flat_map(|row| row.entry.star_ids.iter().copied())
            .filter(|id| !self.positions.contains_key(id))
            .collect();
        if !unresolved.is_empty() {
            return Err(EtlError::UnresolvedStars {
                source_name: self.catalog_name.to_string(),
                ids: unresolved.into_iter().collect(),
            });
        }

        let asterisms: Vec<Asterism> = outcome
            .joined
            .iter()
            .map(|row| self.resolve(row))
            .collect();

        let report = AsterismReport {
            asterisms,
            unmatched_line_list: outcome.unmatched_line_list,
            unmatched_names: outcome.unmatched_names,
            duplicate_names: outcome.duplicate_names,
        };

        let found = report.zodiac_count();
        if found != EXPECTED_ZODIAC_COUNT {
            return Err(EtlError::ZodiacCount {
                expected: EXPECTED_ZODIAC_COUNT,
                found,
            });
        }

        Ok(report)
    }

    fn resolve(&self, row: &NamedLineList<'_>) -> Asterism {
        let entry = row.entry;
        if entry.declared_pairs as usize * 2 != entry.star_ids.len() {
            log::debug!(
                "{} declares {} pairs but lists {} stars",
                entry.constellation,
                entry.declared_pairs,
                entry.star_ids.len()
            );
        }

        // Every ID was checked against the index before resolution
        let (ra, dec) = entry
            .star_ids
            .iter()
            .filter_map(|id| self.positions.get(id))
            .map(|p| (p.ra, p.dec))
            .unzip();

        Asterism {
            constellation: entry.constellation.clone(),
            declared_pairs: entry.declared_pairs,
            star_ids: entry.star_ids.clone(),
            local_name: row.name.local_name.clone(),
            english_name: row.name.english_name.clone(),
            ra,
            dec,
            is_zodiac: is_zodiac_name(&row.name.local_name),
        }
    }
}

/// Convert asterisms to the output table
pub fn asterisms_to_dataframe(asterisms: &[Asterism]) -> EtlResult<DataFrame> {
    let df = df!(
        "constellation" => asterisms.iter().map(|a| a.constellation.as_str()).collect::<Vec<_>>(),
        "num_pairs" => asterisms.iter().map(|a| a.declared_pairs as i64).collect::<Vec<_>>(),
        "stars" => asterisms.iter().map(|a| format_list(&a.star_ids)).collect::<Vec<_>>(),
        "san" => asterisms.iter().map(|a| a.local_name.as_str()).collect::<Vec<_>>(),
        "eng" => asterisms.iter().map(|a| a.english_name.as_str()).collect::<Vec<_>>(),
        "ra" => asterisms.iter().map(|a| format_list(&a.ra)).collect::<Vec<_>>(),
        "dec" => asterisms.iter().map(|a| format_list(&a.dec)).collect::<Vec<_>>(),
        "zodiac" => asterisms.iter().map(|a| a.is_zodiac).collect::<Vec<_>>(),
    )?;
    Ok(df)
}

/// Build the asterism table from the sky-culture files and the enriched
/// star catalog written by the stars pipeline.
pub fn run(
    line_list_path: &Path,
    names_path: &Path,
    star_catalog_path: &Path,
    output: &Path,
) -> Result<PipelineReport> {
    let line_list_source = io::source_name(line_list_path);
    let line_list = parse_line_list(&io::read_text(line_list_path)?, &line_list_source)?;

    let names_source = io::source_name(names_path);
    let names = parse_constellation_names(&io::read_text(names_path)?, &names_source)?;
    log::info!(
        "Parsed {} line-list rows and {} constellation names",
        line_list.len(),
        names.len()
    );

    let catalog_source = io::source_name(star_catalog_path);
    let catalog = io::read_csv(star_catalog_path)?;
    let positions = star_positions(&catalog, &catalog_source)?;
    log::debug!("Indexed {} catalog stars by hip", positions.len());

    let built = AsterismBuilder::new(&positions, &catalog_source).build(&line_list, &names)?;
    let mut validation = built.warnings();
    validation.merge(OutputValidator::validate_asterisms(&built.asterisms));
    let validation = validation.into_result()?;
    validation.log_warnings(PipelineKind::Asterisms.name());

    let segments: usize = built.asterisms.iter().map(Asterism::segment_count).sum();
    log::info!(
        "Built {} asterisms ({} zodiac, {} segments)",
        built.asterisms.len(),
        built.zodiac_count(),
        segments
    );

    let mut df = asterisms_to_dataframe(&built.asterisms)?;
    let artifact = io::write_csv(&mut df, output)?;

    let mut report = PipelineReport::new(PipelineKind::Asterisms, validation)
        .with_stat("asterisms", built.asterisms.len())
        .with_stat("zodiac", built.zodiac_count())
        .with_stat("segments", segments)
        .with_stat("unmatched_line_list", built.unmatched_line_list.len())
        .with_stat("unmatched_names", built.unmatched_names.len())
        .with_stat("duplicate_names", built.duplicate_names.len());
    report.outputs.push(artifact);
    Ok(report)
}
