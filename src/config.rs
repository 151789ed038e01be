//! Configuration types for triple-barrier

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Parameter outside its valid range
    #[error("invalid value for {name}: {value}")]
    InvalidParameter { name: &'static str, value: String },
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub cusum: CusumConfig,
    #[serde(default)]
    pub labeling: LabelingConfig,
    #[serde(default)]
    pub weighting: WeightingConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// On-disk layout of inputs and outputs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Base directory all other paths are relative to
    #[serde(default = "default_root")]
    pub root: PathBuf,
    /// Raw minute bars, one `<symbol>.csv` per symbol
    #[serde(default = "default_raw_dir")]
    pub raw_dir: PathBuf,
    /// CUSUM-filtered event rows
    #[serde(default = "default_filtered_dir")]
    pub filtered_dir: PathBuf,
    /// Labeled output tables
    #[serde(default = "default_labeled_dir")]
    pub labeled_dir: PathBuf,
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}
fn default_raw_dir() -> PathBuf {
    PathBuf::from("Stock/MinDataSet")
}
fn default_filtered_dir() -> PathBuf {
    PathBuf::from("Stock/CUSUM/min_filtered")
}
fn default_labeled_dir() -> PathBuf {
    PathBuf::from("Stock/CUSUM/LabeledData")
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            raw_dir: default_raw_dir(),
            filtered_dir: default_filtered_dir(),
            labeled_dir: default_labeled_dir(),
        }
    }
}

/// CUSUM filter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CusumConfig {
    /// Log-return drift that triggers an event
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_threshold() -> f64 {
    0.01 // ≈ 1% move
}

impl Default for CusumConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
        }
    }
}

/// Barrier and volatility configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelingConfig {
    /// Profit-take width in units of target volatility
    #[serde(default = "default_multiple")]
    pub profit_multiple: f64,

    /// Stop-loss width in units of target volatility
    #[serde(default = "default_multiple")]
    pub loss_multiple: f64,

    /// Events whose target volatility is not above this are dropped
    #[serde(default = "default_min_return")]
    pub min_return: f64,

    /// EWM span of the volatility estimate
    #[serde(default = "default_volatility_span")]
    pub volatility_span: usize,

    /// Maximum holding period; unset holds until the end of the series
    #[serde(default)]
    pub vertical_barrier_minutes: Option<i64>,
}

fn default_multiple() -> f64 {
    1.0
}
fn default_min_return() -> f64 {
    0.005
}
fn default_volatility_span() -> usize {
    50
}

impl Default for LabelingConfig {
    fn default() -> Self {
        Self {
            profit_multiple: default_multiple(),
            loss_multiple: default_multiple(),
            min_return: default_min_return(),
            volatility_span: default_volatility_span(),
            vertical_barrier_minutes: None,
        }
    }
}

/// Longest vertical barrier accepted, about a century of minutes
pub const MAX_HORIZON_MINUTES: i64 = 100 * 366 * 24 * 60;

/// Sample weighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightingConfig {
    /// Decay factor applied to the oldest event; 1.0 disables decay
    #[serde(default = "default_oldest_weight")]
    pub oldest_weight: f64,
}

fn default_oldest_weight() -> f64 {
    1.0
}

impl Default for WeightingConfig {
    fn default() -> Self {
        Self {
            oldest_weight: default_oldest_weight(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format
    #[default]
    Pretty,
    /// JSON format for log aggregation
    Json,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration if `path` exists
    ///
    /// A missing file gives `Ok(None)`; unreadable, malformed or invalid
    /// files are errors.
    pub fn load_if_exists(path: impl AsRef<std::path::Path>) -> anyhow::Result<Option<Self>> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let config: Config = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", path.display()))?;
                config
                    .validate()
                    .with_context(|| format!("validating {}", path.display()))?;
                Ok(Some(config))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
        }
    }

    /// Check every numeric parameter is in range
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |name: &'static str, value: String| ConfigError::InvalidParameter { name, value };

        let threshold = self.cusum.threshold;
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(invalid("cusum.threshold", threshold.to_string()));
        }

        let labeling = &self.labeling;
        if !labeling.profit_multiple.is_finite() || labeling.profit_multiple < 0.0 {
            return Err(invalid(
                "labeling.profit_multiple",
                labeling.profit_multiple.to_string(),
            ));
        }
        if !labeling.loss_multiple.is_finite() || labeling.loss_multiple < 0.0 {
            return Err(invalid(
                "labeling.loss_multiple",
                labeling.loss_multiple.to_string(),
            ));
        }
        if !labeling.min_return.is_finite() {
            return Err(invalid("labeling.min_return", labeling.min_return.to_string()));
        }
        if labeling.volatility_span == 0 {
            return Err(invalid("labeling.volatility_span", "0".to_string()));
        }
        if let Some(minutes) = labeling.vertical_barrier_minutes {
            if minutes <= 0 || minutes > MAX_HORIZON_MINUTES {
                return Err(invalid(
                    "labeling.vertical_barrier_minutes",
                    minutes.to_string(),
                ));
            }
        }

        let oldest = self.weighting.oldest_weight;
        if !oldest.is_finite() || oldest <= -1.0 || oldest > 1.0 {
            return Err(invalid("weighting.oldest_weight", oldest.to_string()));
        }

        Ok(())
    }
}
