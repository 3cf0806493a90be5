//! File input and output for the pipelines.
//!
//! Inputs are read fully into memory (gunzipping `.gz` paths); tables are
//! written as UTF-8 CSV through a temporary file so a failed run leaves no
//! partial output.
//!
//! # Example
//!
//! ```no_run
//! use skychart_etl::io::loaders::read_csv;
//! use std::path::Path;
//!
//! let df = read_csv(Path::new("data/messier_ngc.csv")).expect("Failed to load");
//! println!("Loaded {} objects", df.height());
//! ```

pub mod checksum;
pub mod columns;
pub mod loaders;
pub mod writers;


pub use loaders::{read_bytes, read_csv, read_text, source_name};
pub use writers::{format_list, write_csv, OutputArtifact};
