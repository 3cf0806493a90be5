use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::config::EtlConfig;
use crate::io::OutputArtifact;
use crate::preprocessing::validator::ValidationResult;
use crate::preprocessing::{
    asterism_builder, boundary_grouper, deep_sky_normalizer, star_enricher,
};

/// The independent batch pipelines, in dependency order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PipelineKind {
    Boundaries,
    Stars,
    Asterisms,
    DeepSky,
}

impl PipelineKind {
    /// Asterisms read the processed star catalog, so stars run first.
    pub const ALL: [PipelineKind; 4] = [
        PipelineKind::Boundaries,
        PipelineKind::Stars,
        PipelineKind::Asterisms,
        PipelineKind::DeepSky,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PipelineKind::Boundaries => "boundaries",
            PipelineKind::Stars => "stars",
            PipelineKind::Asterisms => "asterisms",
            PipelineKind::DeepSky => "deep-sky",
        }
    }
}

impl fmt::Display for PipelineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of a single pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub pipeline: PipelineKind,
    pub outputs: Vec<OutputArtifact>,
    pub stats: BTreeMap<String, usize>,
    pub validation: ValidationResult,
}

impl PipelineReport {
    pub fn new(pipeline: PipelineKind, validation: ValidationResult) -> Self {
        Self {
            pipeline,
            outputs: Vec::new(),
            stats: BTreeMap::new(),
            validation,
        }
    }

    pub fn with_stat(mut self, key: &str, value: usize) -> Self {
        self.stats.insert(key.to_string(), value);
        self
    }

    pub fn stat(&self, key: &str) -> Option<usize> {
        self.stats.get(key).copied()
    }
}

/// Runs pipelines against the paths of one configuration
pub struct PreprocessPipeline {
    config: EtlConfig,
}

impl PreprocessPipeline {
    /// Create a pipeline runner with default configuration
    pub fn new() -> Self {
        Self {
            config: EtlConfig::default(),
        }
    }

    /// Create a pipeline runner with custom configuration
    pub fn with_config(config: EtlConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EtlConfig {
        &self.config
    }

    /// Run one pipeline end to end
    pub fn run(&self, kind: PipelineKind) -> Result<PipelineReport> {
        self.config.validate()?;
        log::info!("Running {} pipeline", kind);

        let config = &self.config;
        let report = match kind {
            PipelineKind::Boundaries => {
                boundary_grouper::run(&config.boundaries_input(), &config.boundaries_output())
            }
            PipelineKind::Stars => star_enricher::run(
                &config.star_catalog_input(),
                &config.star_catalog_output(),
                &config.naked_eye_output(),
                config.thresholds.naked_eye_magnitude,
            ),
            PipelineKind::Asterisms => asterism_builder::run(
                &config.line_list_input(),
                &config.constellation_names_input(),
                &config.star_catalog_output(),
                &config.asterisms_output(),
            ),
            PipelineKind::DeepSky => {
                deep_sky_normalizer::run(&config.deep_sky_input(), &config.deep_sky_output())
            }
        }
        .with_context(|| format!("{} pipeline failed", kind))?;

        for artifact in &report.outputs {
            log::info!(
                "Wrote {} rows to {} (sha256 {})",
                artifact.rows,
                artifact.path.display(),
                artifact.sha256
            );
        }
        Ok(report)
    }

    /// Run every pipeline in dependency order, stopping at the first failure
    pub fn run_all(&self) -> Result<Vec<PipelineReport>> {
        PipelineKind::ALL
            .iter()
            .map(|kind| self.run(*kind))
            .collect()
    }
}

impl Default for PreprocessPipeline {
    fn default() -> Self {
        Self::new()
    }
}
