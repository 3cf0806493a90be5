//! Pipeline configuration file support.
//!
//! This module reads input/output locations and thresholds from a TOML file.
//! Every section and field is optional; anything left out falls back to the
//! conventional `data/` layout.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::lookup::NAKED_EYE_MAGNITUDE;
use crate::core::{EtlError, EtlResult};

pub const DEFAULT_CONFIG_FILE: &str = "skychart.toml";

/// Pipeline configuration from file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EtlConfig {
    #[serde(default)]
    pub paths: PathSettings,
    #[serde(default)]
    pub inputs: InputSettings,
    #[serde(default)]
    pub outputs: OutputSettings,
    #[serde(default)]
    pub thresholds: ThresholdSettings,
}

/// Base directories; inputs resolve against `data_dir`, outputs against
/// `processed_dir`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSettings {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_processed_dir")]
    pub processed_dir: PathBuf,
}

/// Raw catalog file names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSettings {
    #[serde(default = "default_boundaries_input")]
    pub boundaries: PathBuf,
    #[serde(default = "default_star_catalog_input")]
    pub star_catalog: PathBuf,
    #[serde(default = "default_line_list_input")]
    pub line_list: PathBuf,
    #[serde(default = "default_constellation_names_input")]
    pub constellation_names: PathBuf,
    #[serde(default = "default_deep_sky_input")]
    pub deep_sky: PathBuf,
}

/// Output table file names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default = "default_boundaries_output")]
    pub boundaries: PathBuf,
    #[serde(default = "default_star_catalog_output")]
    pub star_catalog: PathBuf,
    #[serde(default = "default_naked_eye_output")]
    pub naked_eye: PathBuf,
    #[serde(default = "default_asterisms_output")]
    pub asterisms: PathBuf,
    #[serde(default = "default_deep_sky_output")]
    pub deep_sky: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSettings {
    #[serde(default = "default_naked_eye_magnitude")]
    pub naked_eye_magnitude: f64,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_processed_dir() -> PathBuf {
    PathBuf::from("data/processed")
}

fn default_boundaries_input() -> PathBuf {
    PathBuf::from("bound_20.dat.gz")
}

fn default_star_catalog_input() -> PathBuf {
    PathBuf::from("hygdata_v37.csv.gz")
}

fn default_line_list_input() -> PathBuf {
    PathBuf::from("india/constellationship.fab")
}

fn default_constellation_names_input() -> PathBuf {
    PathBuf::from("india/constellation_names.eng.fab")
}

fn default_deep_sky_input() -> PathBuf {
    PathBuf::from("messier_ngc.csv")
}

fn default_boundaries_output() -> PathBuf {
    PathBuf::from("constellations.csv")
}

fn default_star_catalog_output() -> PathBuf {
    PathBuf::from("hygdata_processed.csv")
}

fn default_naked_eye_output() -> PathBuf {
    PathBuf::from("hygdata_mag65.csv")
}

fn default_asterisms_output() -> PathBuf {
    PathBuf::from("asterisms.csv")
}

fn default_deep_sky_output() -> PathBuf {
    PathBuf::from("messier_ngc_processed.csv")
}

fn default_naked_eye_magnitude() -> f64 {
    NAKED_EYE_MAGNITUDE
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            processed_dir: default_processed_dir(),
        }
    }
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            boundaries: default_boundaries_input(),
            star_catalog: default_star_catalog_input(),
            line_list: default_line_list_input(),
            constellation_names: default_constellation_names_input(),
            deep_sky: default_deep_sky_input(),
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            boundaries: default_boundaries_output(),
            star_catalog: default_star_catalog_output(),
            naked_eye: default_naked_eye_output(),
            asterisms: default_asterisms_output(),
            deep_sky: default_deep_sky_output(),
        }
    }
}

impl Default for ThresholdSettings {
    fn default() -> Self {
        Self {
            naked_eye_magnitude: default_naked_eye_magnitude(),
        }
    }
}

impl EtlConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(EtlConfig)` if successful
    /// * `Err(EtlError::Configuration)` if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> EtlResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            EtlError::Configuration(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> EtlResult<Self> {
        toml::from_str(content)
            .map_err(|e| EtlError::Configuration(format!("Failed to parse config file: {}", e)))
    }

    /// Load configuration, falling back to defaults.
    ///
    /// An explicit path must exist. Without one, `skychart.toml` is searched
    /// for in:
    /// 1. Current directory
    /// 2. `rust_backend/` directory
    ///
    /// and the built-in defaults are used when neither exists.
    pub fn load(explicit: Option<&Path>) -> EtlResult<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let search_paths = [
            PathBuf::from(DEFAULT_CONFIG_FILE),
            PathBuf::from("rust_backend").join(DEFAULT_CONFIG_FILE),
        ];

        match search_paths.iter().find(|path| path.exists()) {
            Some(path) => {
                log::debug!("Using configuration from {}", path.display());
                Self::from_file(path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Configuration rooted at `data_dir`, with outputs in `data_dir/processed`.
    pub fn rooted_at(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            paths: PathSettings {
                processed_dir: data_dir.join("processed"),
                data_dir,
            },
            ..Self::default()
        }
    }

    fn input(&self, name: &Path) -> PathBuf {
        self.paths.data_dir.join(name)
    }

    fn output(&self, name: &Path) -> PathBuf {
        self.paths.processed_dir.join(name)
    }

    pub fn boundaries_input(&self) -> PathBuf {
        self.input(&self.inputs.boundaries)
    }

    pub fn star_catalog_input(&self) -> PathBuf {
        self.input(&self.inputs.star_catalog)
    }

    pub fn line_list_input(&self) -> PathBuf {
        self.input(&self.inputs.line_list)
    }

    pub fn constellation_names_input(&self) -> PathBuf {
        self.input(&self.inputs.constellation_names)
    }

    pub fn deep_sky_input(&self) -> PathBuf {
        self.input(&self.inputs.deep_sky)
    }

    pub fn boundaries_output(&self) -> PathBuf {
        self.output(&self.outputs.boundaries)
    }

    pub fn star_catalog_output(&self) -> PathBuf {
        self.output(&self.outputs.star_catalog)
    }

    pub fn naked_eye_output(&self) -> PathBuf {
        self.output(&self.outputs.naked_eye)
    }

    pub fn asterisms_output(&self) -> PathBuf {
        self.output(&self.outputs.asterisms)
    }

    pub fn deep_sky_output(&self) -> PathBuf {
        self.output(&self.outputs.deep_sky)
    }

    /// Reject settings no pipeline could run with.
    pub fn validate(&self) -> EtlResult<()> {
        let magnitude = self.thresholds.naked_eye_magnitude;
        if !magnitude.is_finite() {
            return Err(EtlError::Configuration(format!(
                "naked_eye_magnitude must be finite, got {}",
                magnitude
            )));
        }
        Ok(())
    }
}
