//! Domain models for sky-chart catalog entities.
//!
//! These are the records the pipelines derive from the raw catalogs: boundary
//! points and the per-constellation polygons built from them, asterism line
//! patterns with their resolved coordinates, and the cross-file records the
//! asterism join works on. Star and deep-sky rows stay in tabular form because
//! most of their columns pass through untouched.

use serde::Serialize;
use std::fmt;

/// Whether a boundary vertex comes from the 1930 Delporte definition or was
/// interpolated along a parallel of declination.
///
/// # Examples
///
/// ```
/// use skychart_etl::core::domain::PointType;
///
/// assert_eq!(PointType::from_flag('O'), Some(PointType::Original));
/// assert_eq!(PointType::from_flag('I'), Some(PointType::Interpolated));
/// assert_eq!(PointType::from_flag('X'), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PointType {
    Original,
    Interpolated,
}

impl PointType {
    /// Decodes the single-byte type flag used in `bound_20.dat`.
    pub fn from_flag(flag: char) -> Option<Self> {
        match flag {
            'O' => Some(PointType::Original),
            'I' => Some(PointType::Interpolated),
            _ => None,
        }
    }

    pub fn flag(&self) -> char {
        match self {
            PointType::Original => 'O',
            PointType::Interpolated => 'I',
        }
    }
}

impl fmt::Display for PointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.flag())
    }
}

/// A single vertex of a constellation boundary polygon.
///
/// Coordinates are J2000: right ascension in decimal hours and declination
/// in decimal degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryPoint {
    pub ra_hours: f64,
    pub dec_degrees: f64,
    pub constellation: String,
    pub point_type: PointType,
}

/// The ordered outline of one constellation.
///
/// `ra_hours[i]` and `dec_degrees[i]` describe the same vertex; the order is
/// the polygon traversal order from the source file.
///
/// # Examples
///
/// ```
/// use skychart_etl::core::domain::ConstellationBoundary;
///
/// let mut boundary = ConstellationBoundary::new("AND");
/// boundary.push(22.87, 35.17);
/// boundary.push(22.87, 52.67);
///
/// assert_eq!(boundary.len(), 2);
/// assert_eq!(boundary.dec_degrees, vec![35.17, 52.67]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstellationBoundary {
    pub name: String,
    pub ra_hours: Vec<f64>,
    pub dec_degrees: Vec<f64>,
}

impl ConstellationBoundary {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ra_hours: Vec::new(),
            dec_degrees: Vec::new(),
        }
    }

    /// Appends a vertex, keeping both coordinate sequences aligned.
    pub fn push(&mut self, ra_hours: f64, dec_degrees: f64) {
        self.ra_hours.push(ra_hours);
        self.dec_degrees.push(dec_degrees);
    }

    pub fn len(&self) -> usize {
        self.ra_hours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ra_hours.is_empty()
    }
}

/// One line of a Stellarium `constellationship.fab` file.
///
/// Consecutive pairs of `star_ids` are the endpoints of a line segment.
/// `declared_pairs` is carried as-is and never reconciled with the ID count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineListEntry {
    pub constellation: String,
    pub declared_pairs: u32,
    pub star_ids: Vec<u32>,
}

/// Translated names for one constellation code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstellationName {
    pub constellation: String,
    pub local_name: String,
    pub english_name: String,
}

/// Right ascension and declination of a star, both in the catalog's units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarPosition {
    pub ra: f64,
    pub dec: f64,
}

/// A named asterism with its star coordinates resolved.
///
/// `ra` and `dec` are positionally parallel to `star_ids`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Asterism {
    pub constellation: String,
    pub declared_pairs: u32,
    pub star_ids: Vec<u32>,
    pub local_name: String,
    pub english_name: String,
    pub ra: Vec<f64>,
    pub dec: Vec<f64>,
    pub is_zodiac: bool,
}

impl Asterism {
    /// Whether the coordinate sequences line up with the star sequence.
    pub fn is_aligned(&self) -> bool {
        self.ra.len() == self.star_ids.len() && self.dec.len() == self.star_ids.len()
    }

    /// Number of line segments drawn for this asterism.
    pub fn segment_count(&self) -> usize {
        self.star_ids.len() / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_type_roundtrips_flag() {
        for point_type in [PointType::Original, PointType::Interpolated] {
            assert_eq!(PointType::from_flag(point_type.flag()), Some(point_type));
        }
    }

    #[test]
    fn test_asterism_alignment() {
        let mut asterism = Asterism {
            constellation: "Ari".to_string(),
            declared_pairs: 1,
            star_ids: vec![9884, 8903],
            local_name: "Meṣa Rāśi".to_string(),
            english_name: "Ram".to_string(),
            ra: vec![2.119, 1.911],
            dec: vec![23.46, 20.81],
            is_zodiac: true,
        };
        assert!(asterism.is_aligned());
        assert_eq!(asterism.segment_count(), 1);

        asterism.dec.pop();
        assert!(!asterism.is_aligned());
    }
}
