//! Shared fixtures

use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::fs;
use std::path::Path;
use triple_barrier::series::PriceSeries;

pub fn ts(minute: i64) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
        + Duration::minutes(minute)
}

pub fn series(prices: &[f64]) -> PriceSeries {
    PriceSeries::from_pairs(prices.iter().enumerate().map(|(i, p)| (ts(i as i64), *p))).unwrap()
}

/// Deterministic random walk
pub fn random_walk(n: usize, seed: u64, step: f64) -> Vec<f64> {
    let mut state = seed;
    let mut price = 100.0;
    (0..n)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let u = (state >> 33) as f64 / (1u64 << 31) as f64;
            price *= 1.0 + (u - 0.5) * step;
            price
        })
        .collect()
}

/// Write raw bars in the `date,minute,...,close` layout
pub fn write_raw_bars(raw_dir: &Path, symbol: &str, prices: &[f64]) {
    fs::create_dir_all(raw_dir).unwrap();
    let mut content = String::from("date,minute,open,high,low,close,volume\n");
    for (i, p) in prices.iter().enumerate() {
        let t = ts(i as i64);
        content.push_str(&format!(
            "{},{},{p},{p},{p},{p},1000\n",
            t.format("%Y-%m-%d"),
            t.format("%H:%M:%S"),
            p = p
        ));
    }
    fs::write(raw_dir.join(format!("{}.csv", symbol)), content).unwrap();
}
