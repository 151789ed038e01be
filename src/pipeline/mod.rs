//! Labeling pipeline module
//!
//! Per-symbol filter → label → weight runs over CSV inputs, and a batch
//! driver that runs symbols in parallel

mod batch;
mod report;
mod runner;
mod types;

pub use batch::run_batch;
pub use report::RunSummary;
pub use runner::{filter_series, label_series, LabelParams, Labeling, Pipeline};
pub use types::{LabelError, Step, SymbolReport, SymbolStatus};
