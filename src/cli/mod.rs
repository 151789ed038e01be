//! CLI interface for triple-barrier
//!
//! Provides subcommands for:
//! - `filter`: CUSUM-filter raw bars into event files
//! - `label`: Label and weight events from existing event files
//! - `run`: Filter and label in one pass
//! - `config`: Show the effective configuration

mod common;
mod filter;
mod label;

pub use common::{OutputFormat, SymbolArgs};
pub use filter::FilterArgs;
pub use label::LabelArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "triple-barrier")]
#[command(about = "CUSUM event sampling, triple-barrier labels and sample weights for minute bars")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Detect CUSUM events and write filtered event files
    Filter(FilterArgs),
    /// Label events from filtered event files
    Label(LabelArgs),
    /// Filter and label
    Run(LabelArgs),
    /// Show configuration
    Config,
}
