//! Groups constellation boundary vertices into one polygon per constellation.
//!
//! Vertex order inside a group is the polygon traversal order and is kept
//! exactly as read; groups are emitted in order of first appearance.

use anyhow::Result;
use polars::prelude::*;
use std::collections::HashMap;
use std::path::Path;

use crate::core::domain::{BoundaryPoint, ConstellationBoundary, PointType};
use crate::core::EtlResult;
use crate::io::{self, format_list};
use crate::parsing::boundary_parser::parse_boundary_records;
use crate::preprocessing::pipeline::{PipelineKind, PipelineReport};
use crate::preprocessing::validator::OutputValidator;

/// Group points by constellation code with an insertion-ordered multimap.
pub fn group_boundaries(points: &[BoundaryPoint]) -> Vec<ConstellationBoundary> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<ConstellationBoundary> = Vec::new();

    for point in points {
        let slot = *slots.entry(point.constellation.as_str()).or_insert_with(|| {
            groups.push(ConstellationBoundary::new(point.constellation.as_str()));
            groups.len() - 1
        });
        groups[slot].push(point.ra_hours, point.dec_degrees);
    }

    groups
}

/// Convert boundaries to the `name,ra,dec` output table
pub fn boundaries_to_dataframe(boundaries: &[ConstellationBoundary]) -> EtlResult<DataFrame> {
    let names: Vec<&str> = boundaries.iter().map(|b| b.name.as_str()).collect();
    let ras: Vec<String> = boundaries.iter().map(|b| format_list(&b.ra_hours)).collect();
    let decs: Vec<String> = boundaries
        .iter()
        .map(|b| format_list(&b.dec_degrees))
        .collect();

    let df = df!(
        "name" => names,
        "ra" => ras,
        "dec" => decs,
    )?;

    Ok(df)
}

/// Parse `input`, group it and write the boundary table to `output`
pub fn run(input: &Path, output: &Path) -> Result<PipelineReport> {
    let source_name = io::source_name(input);
    let content = io::read_text(input)?;

    let points = parse_boundary_records(&content, &source_name)?;
    let interpolated = points
        .iter()
        .filter(|p| p.point_type == PointType::Interpolated)
        .count();
    log::info!(
        "Parsed {} boundary points from {} ({} interpolated)",
        points.len(),
        source_name,
        interpolated
    );

    let boundaries = group_boundaries(&points);
    let validation = OutputValidator::validate_boundaries(points.len(), &boundaries).into_result()?;
    validation.log_warnings(PipelineKind::Boundaries.name());
    log::info!("Grouped into {} constellation boundaries", boundaries.len());

    let mut df = boundaries_to_dataframe(&boundaries)?;
    log::debug!("{}", df.head(Some(5)));
    let artifact = io::write_csv(&mut df, output)?;

    let mut report = PipelineReport::new(PipelineKind::Boundaries, validation)
        .with_stat("records", points.len())
        .with_stat("original_points", points.len() - interpolated)
        .with_stat("interpolated_points", interpolated)
        .with_stat("constellations", boundaries.len());
    report.outputs.push(artifact);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(code: &str, ra: f64, dec: f64) -> BoundaryPoint {
        BoundaryPoint {
            ra_hours: ra,
            dec_degrees: dec,
            constellation: code.to_string(),
            point_type: PointType::Original,
        }
    }

    #[test]
    fn test_grouping_preserves_point_order_within_groups() {
        let points = vec![
            point("ORI", 5.0, 10.0),
            point("AND", 23.0, 35.0),
            point("ORI", 4.0, 12.0),
            point("AND", 22.0, 53.0),
            point("ORI", 6.0, -11.0),
        ];

        let groups = group_boundaries(&points);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "ORI");
        // Not sorted: file order encodes the traversal
        assert_eq!(groups[0].ra_hours, vec![5.0, 4.0, 6.0]);
        assert_eq!(groups[0].dec_degrees, vec![10.0, 12.0, -11.0]);
        assert_eq!(groups[1].name, "AND");
        assert_eq!(groups[1].ra_hours, vec![23.0, 22.0]);
    }

    #[test]
    fn test_point_counts_are_conserved() {
        let points: Vec<BoundaryPoint> = (0..30)
            .map(|i| point(["AND", "ORI", "SER1"][i % 3], i as f64 / 2.0, 0.0))
            .collect();
        let groups = group_boundaries(&points);
        assert_eq!(groups.iter().map(|g| g.len()).sum::<usize>(), points.len());
    }

    #[test]
    fn test_empty_input() {
        assert!(group_boundaries(&[]).is_empty());
        let df = boundaries_to_dataframe(&[]).unwrap();
        assert_eq!(df.height(), 0);
    }

    #[test]
    fn test_dataframe_has_list_cells() {
        let groups = group_boundaries(&[point("AND", 0.5, 1.0), point("AND", 1.25, 2.0)]);
        let df = boundaries_to_dataframe(&groups).unwrap();

        assert_eq!(df.height(), 1);
        let ra = df.column("ra").unwrap().str().unwrap();
        assert_eq!(ra.get(0), Some("[0.5, 1.25]"));
        let dec = df.column("dec").unwrap().str().unwrap();
        assert_eq!(dec.get(0), Some("[1.0, 2.0]"));
    }
}
