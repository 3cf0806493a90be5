//! The four catalog pipelines and the shared run/validation plumbing.
//!
//! Each pipeline module exposes a pure transformation over parsed records or
//! DataFrames plus a `run` function that reads its inputs, validates the
//! result and writes its output tables.

pub mod asterism_builder;
pub mod boundary_grouper;
pub mod deep_sky_normalizer;
pub mod pipeline;
pub mod star_enricher;
pub mod validator;

pub use asterism_builder::{AsterismBuilder, AsterismReport};
pub use deep_sky_normalizer::normalize_deep_sky;
pub use pipeline::{PipelineKind, PipelineReport, PreprocessPipeline};
pub use star_enricher::{EnrichedCatalog, StarEnricher};
pub use validator::{OutputValidator, ValidationResult};
