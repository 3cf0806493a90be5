//! Parsers for the raw catalog formats.
//!
//! # Parsers
//!
//! - [`boundary_parser`]: fixed-width constellation boundary records
//! - [`bayer`]: Bayer/Flamsteed designations to Unicode labels
//! - [`spectral`]: spectral class letters and chart colors
//! - [`line_list_parser`]: Stellarium line lists and constellation names
//! - [`sexagesimal`]: `"5h 35.4m"` / `"-5d 27'"` position strings
//!
//! # Example
//!
//! ```
//! use skychart_etl::parsing::boundary_parser::parse_boundary_records;
//!
//! let points = parse_boundary_records("22.8714256 +35.1669998 AND  I\n", "bound_20.dat")
//!     .expect("valid record");
//! assert_eq!(points[0].constellation, "AND");
//! ```

pub mod bayer;
pub mod boundary_parser;
pub mod line_list_parser;
pub mod sexagesimal;
pub mod spectral;

#[cfg(test)]
mod boundary_parser_tests;

pub use sexagesimal::{Declination, RightAscension};
