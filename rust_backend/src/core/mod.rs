//! Core domain models for sky-chart catalogs.
//!
//! This module defines the entities derived by the pipelines, the fixed lookup
//! tables they share, and the error type reported on strict failures.

pub mod domain;
pub mod error;
pub mod lookup;

pub use error::{EtlError, EtlResult};
