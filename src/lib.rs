//! triple-barrier: event-based labels for minute-bar price series
//!
//! This library provides the core components for:
//! - Immutable price series and return helpers
//! - CUSUM event filtering
//! - EWM volatility estimation
//! - Triple-barrier event definition, resolution and labels
//! - Concurrency-aware sample weights with optional time decay
//! - CSV input and output with a per-symbol directory layout
//! - A single-symbol pipeline and a parallel multi-symbol batch driver
//! - Logging and counters

pub mod cli;
pub mod config;
pub mod data;
pub mod filter;
pub mod labeling;
pub mod model;
pub mod pipeline;
pub mod series;
pub mod telemetry;
pub mod weights;
