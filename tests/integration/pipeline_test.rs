//! End-to-end pipeline tests over CSV files

use crate::common::{random_walk, write_raw_bars};
use approx::assert_abs_diff_eq;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;
use triple_barrier::config::Config;
use triple_barrier::data::{read_event_times, read_label_table, DataLayout, LabelRow};
use triple_barrier::pipeline::{run_batch, Pipeline, RunSummary, Step, SymbolStatus};

fn config_for(dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.data.root = dir.path().to_path_buf();
    config.cusum.threshold = 0.01;
    config.labeling.min_return = 0.001;
    config.labeling.volatility_span = 20;
    config
}

fn seed_symbols(config: &Config, symbols: &[(&str, u64)]) {
    let layout = DataLayout::new(&config.data);
    for (symbol, seed) in symbols {
        write_raw_bars(layout.raw_dir(), symbol, &random_walk(500, *seed, 0.012));
    }
}

fn labels(config: &Config, symbol: &str) -> Vec<LabelRow> {
    read_label_table(DataLayout::new(&config.data).labeled_path(symbol)).unwrap()
}

#[tokio::test]
async fn test_run_batch_writes_label_tables() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir);
    seed_symbols(&config, &[("2330", 1), ("2454", 2)]);

    let pipeline = Arc::new(Pipeline::from_config(&config));
    let symbols = vec!["2330".to_string(), "2454".to_string()];
    let reports = run_batch(pipeline, &symbols, Step::Run).await;

    for report in &reports {
        assert_eq!(report.status, SymbolStatus::Written, "{:?}", report);
        let rows = labels(&config, &report.symbol);
        assert_eq!(rows.len(), report.labels);
        assert!(rows.windows(2).all(|w| w[0].datetime < w[1].datetime));

        let total: f64 = rows.iter().map(|r| r.sample_weight).sum();
        assert_abs_diff_eq!(total, 1.0, epsilon = 1e-9);
        for row in &rows {
            assert!(row.exit_time >= row.datetime);
            assert!(row.sample_weight >= 0.0);
            let sign = if row.ret > 0.0 { 1 } else if row.ret < 0.0 { -1 } else { 0 };
            assert_eq!(row.bin, sign);
        }
    }

    let header = fs::read_to_string(DataLayout::new(&config.data).labeled_path("2330")).unwrap();
    assert!(header.starts_with("datetime,exit_time,ret,bin,sample_weight\n"));
}

#[tokio::test]
async fn test_filter_then_label_matches_single_run() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir);
    seed_symbols(&config, &[("1101", 5)]);
    let pipeline = Arc::new(Pipeline::from_config(&config));
    let symbols = vec!["1101".to_string()];

    let filtered = run_batch(Arc::clone(&pipeline), &symbols, Step::Filter).await;
    let layout = DataLayout::new(&config.data);
    let event_times = read_event_times(layout.filtered_path("1101")).unwrap();
    assert_eq!(event_times.len(), filtered[0].events);

    run_batch(Arc::clone(&pipeline), &symbols, Step::Label).await;
    let two_step = labels(&config, "1101");
    run_batch(pipeline, &symbols, Step::Run).await;
    let one_step = labels(&config, "1101");

    assert_eq!(two_step, one_step);
}

#[tokio::test]
async fn test_decay_changes_weights_only() {
    let dir = TempDir::new().unwrap();
    let mut config = config_for(&dir);
    seed_symbols(&config, &[("2603", 9)]);
    let symbols = vec!["2603".to_string()];

    run_batch(Arc::new(Pipeline::from_config(&config)), &symbols, Step::Run).await;
    let plain = labels(&config, "2603");

    config.weighting.oldest_weight = 0.0;
    run_batch(Arc::new(Pipeline::from_config(&config)), &symbols, Step::Run).await;
    let decayed = labels(&config, "2603");

    assert_eq!(plain.len(), decayed.len());
    for (p, d) in plain.iter().zip(&decayed) {
        assert_eq!((p.datetime.as_str(), p.bin), (d.datetime.as_str(), d.bin));
        assert!(d.sample_weight <= p.sample_weight + 1e-12);
    }
    let total: f64 = decayed.iter().map(|r| r.sample_weight).sum();
    assert!(total < 1.0);
}

#[tokio::test]
async fn test_vertical_barrier_caps_holding_period() {
    let dir = TempDir::new().unwrap();
    let mut config = config_for(&dir);
    config.labeling.vertical_barrier_minutes = Some(5);
    config.labeling.profit_multiple = 3.0;
    config.labeling.loss_multiple = 3.0;
    seed_symbols(&config, &[("0050", 13)]);

    let reports = run_batch(
        Arc::new(Pipeline::from_config(&config)),
        &["0050".to_string()],
        Step::Run,
    )
    .await;
    assert_eq!(reports[0].status, SymbolStatus::Written);

    let fmt = "%Y-%m-%d %H:%M:%S";
    for row in labels(&config, "0050") {
        let start = chrono::NaiveDateTime::parse_from_str(&row.datetime, fmt).unwrap();
        let exit = chrono::NaiveDateTime::parse_from_str(&row.exit_time, fmt).unwrap();
        assert!(exit - start <= chrono::Duration::minutes(5));
    }
}

#[tokio::test]
async fn test_missing_symbol_is_skipped() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir);
    seed_symbols(&config, &[("2330", 1)]);

    let symbols = vec!["2330".to_string(), "8888".to_string()];
    let summary = RunSummary::new(
        run_batch(Arc::new(Pipeline::from_config(&config)), &symbols, Step::Run).await,
    );

    assert_eq!(summary.failed(), 1);
    assert_eq!(summary.symbols[0].status, SymbolStatus::Written);
    assert_eq!(summary.symbols[1].status, SymbolStatus::Failed);
    assert!(!DataLayout::new(&config.data).labeled_path("8888").exists());
    assert!(summary.format_table().contains("8888"));
}
