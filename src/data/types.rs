//! Data layer types

use crate::series::SeriesError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Timestamp layout written to every output file
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Errors reading or writing tabular files
#[derive(Debug, Error)]
pub enum DataError {
    /// CSV reader or writer failure
    #[error("csv error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    /// Filesystem failure
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Required column not present in the header
    #[error("{path}: missing column {column}")]
    MissingColumn { path: PathBuf, column: &'static str },
    /// Row content could not be interpreted
    #[error("{path} row {row}: {reason}")]
    Parse {
        path: PathBuf,
        row: usize,
        reason: String,
    },
    /// Loaded rows do not form a valid series
    #[error(transparent)]
    Series(#[from] SeriesError),
}

/// Row of a filtered events file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilteredRow {
    pub datetime: String,
    pub close: f64,
    pub direction: String,
}

/// Row of a labeled output table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelRow {
    /// Event start
    pub datetime: String,
    pub exit_time: String,
    pub ret: f64,
    pub bin: i8,
    pub sample_weight: f64,
}
