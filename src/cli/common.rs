//! Arguments and helpers shared by the pipeline commands

use crate::config::Config;
use crate::data::DataLayout;
use crate::pipeline::{run_batch, Pipeline, RunSummary, Step};
use anyhow::Context;
use clap::{Args, ValueEnum};
use std::sync::Arc;

/// Report output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Symbol selection and report format
#[derive(Args, Debug)]
pub struct SymbolArgs {
    /// Symbols to process, e.g. 2330
    pub symbols: Vec<String>,

    /// Process every symbol with a raw bar file
    #[arg(long, conflicts_with = "symbols")]
    pub all: bool,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl SymbolArgs {
    /// Symbols named on the command line, or discovered with `--all`
    pub fn resolve(&self, layout: &DataLayout) -> anyhow::Result<Vec<String>> {
        let symbols = if self.all {
            layout
                .discover_symbols()
                .with_context(|| format!("listing {}", layout.raw_dir().display()))?
        } else {
            self.symbols.clone()
        };

        if symbols.is_empty() {
            anyhow::bail!("no symbols given; name at least one or pass --all");
        }
        Ok(symbols)
    }
}

/// Validate `config`, run `step` over the selected symbols and print the report
pub async fn run_step(config: &Config, selection: &SymbolArgs, step: Step) -> anyhow::Result<RunSummary> {
    config.validate().context("invalid parameters")?;

    let pipeline = Arc::new(Pipeline::from_config(config));
    let symbols = selection.resolve(pipeline.layout())?;
    tracing::info!(symbols = symbols.len(), ?step, "Starting");

    let summary = RunSummary::new(run_batch(pipeline, &symbols, step).await);
    match selection.format {
        OutputFormat::Table => println!("{}", summary.format_table()),
        OutputFormat::Json => println!("{}", summary.to_json()?),
    }

    if summary.failed() > 0 {
        tracing::warn!(failed = summary.failed(), "Some symbols were skipped");
    }
    Ok(summary)
}
