//! Batch ETL for sky-chart catalogs.
//!
//! Turns raw astronomical catalogs (IAU constellation boundaries, the HYG
//! star database, Stellarium sky-culture line lists and a curated deep-sky
//! list) into the normalized tables a chart renderer reads.

pub mod config;
pub mod core;
pub mod io;
pub mod parsing;
pub mod preprocessing;

pub use config::EtlConfig;
pub use crate::core::{EtlError, EtlResult};
pub use preprocessing::{PipelineKind, PipelineReport, PreprocessPipeline};
