//! Multi-symbol batch driver

use super::runner::Pipeline;
use super::types::{Step, SymbolReport};
use crate::telemetry::{self, CounterMetric};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Run `step` for every symbol, each on its own blocking task
///
/// A failing symbol is logged and reported as failed; the others continue.
/// Reports come back in the order of `symbols`.
pub async fn run_batch(pipeline: Arc<Pipeline>, symbols: &[String], step: Step) -> Vec<SymbolReport> {
    let mut tasks = JoinSet::new();
    for (index, symbol) in symbols.iter().enumerate() {
        let pipeline = Arc::clone(&pipeline);
        let symbol = symbol.clone();
        tasks.spawn_blocking(move || {
            let result = pipeline.execute(&symbol, step);
            (index, symbol, result)
        });
    }

    let mut reports: Vec<Option<SymbolReport>> = vec![None; symbols.len()];
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, _, Ok(report))) => reports[index] = Some(report),
            Ok((index, symbol, Err(e))) => {
                warn!(symbol = %symbol, error = %e, "Skipping symbol");
                telemetry::increment(CounterMetric::SymbolsSkipped, 1);
                reports[index] = Some(SymbolReport::failed(symbol, &e));
            }
            Err(e) => warn!(error = %e, "Symbol task aborted"),
        }
    }

    // Aborted tasks never returned their index
    let reports: Vec<SymbolReport> = reports
        .into_iter()
        .zip(symbols)
        .map(|(report, symbol)| {
            report.unwrap_or_else(|| {
                telemetry::increment(CounterMetric::SymbolsSkipped, 1);
                SymbolReport::failed(symbol.as_str(), "task aborted")
            })
        })
        .collect();

    let failed = reports.iter().filter(|r| r.error.is_some()).count();
    info!(symbols = reports.len(), failed, ?step, "Batch complete");
    reports
}
