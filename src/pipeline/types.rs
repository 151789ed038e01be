//! Pipeline errors and per-symbol reports

use crate::config::ConfigError;
use crate::data::DataError;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop a single symbol's run
#[derive(Debug, Error)]
pub enum LabelError {
    /// Required input file is absent
    #[error("no input for {symbol}: {} does not exist", path.display())]
    MissingInput { symbol: String, path: PathBuf },
    /// Series too short to produce any return
    #[error("insufficient data: {bars} bars, need at least 2")]
    InsufficientData { bars: usize },
    /// Invalid run parameters
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Reading or writing failed
    #[error(transparent)]
    Data(#[from] DataError),
}

/// Pipeline step to run for a symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    /// CUSUM filter only, writes the filtered events file
    Filter,
    /// Label events from an existing filtered events file
    Label,
    /// Filter then label
    Run,
}

/// Outcome of one symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolStatus {
    /// Output written with at least one row
    Written,
    /// Output written but no row qualified
    Empty,
    /// Run aborted; the symbol was skipped
    Failed,
}

impl SymbolStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolStatus::Written => "written",
            SymbolStatus::Empty => "empty",
            SymbolStatus::Failed => "failed",
        }
    }
}

/// Report of one symbol's run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolReport {
    pub symbol: String,
    pub status: SymbolStatus,
    /// Bars in the loaded price series
    pub bars: usize,
    /// CUSUM events detected or read from the filtered file
    pub events: usize,
    /// Candidates dropped before labeling, by reason
    pub dropped: BTreeMap<String, usize>,
    /// Labeled rows written
    pub labels: usize,
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
    /// Simultaneous barrier touches resolved as stop-loss
    pub ties: usize,
    pub output: Option<PathBuf>,
    pub error: Option<String>,
}

impl SymbolReport {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            status: SymbolStatus::Empty,
            bars: 0,
            events: 0,
            dropped: BTreeMap::new(),
            labels: 0,
            positive: 0,
            neutral: 0,
            negative: 0,
            ties: 0,
            output: None,
            error: None,
        }
    }

    /// Report for a symbol whose run failed
    pub fn failed(symbol: impl Into<String>, error: impl ToString) -> Self {
        Self {
            status: SymbolStatus::Failed,
            error: Some(error.to_string()),
            ..Self::new(symbol)
        }
    }

    pub fn dropped_total(&self) -> usize {
        self.dropped.values().sum()
    }
}
