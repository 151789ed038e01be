//! Return calculations over a price series

use super::PriceSeries;

/// Division with explicit rules for a zero denominator
///
/// `0 / 0` is neutral (0.0); `x / 0` is an infinity carrying the sign of `x`.
pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        if numerator == 0.0 || numerator.is_nan() {
            0.0
        } else {
            f64::INFINITY.copysign(numerator)
        }
    } else {
        numerator / denominator
    }
}

/// Log returns `ln(p_t) - ln(p_{t-1})`, aligned to the series
///
/// The first entry is `None`: it has no predecessor.
pub fn log_returns(series: &PriceSeries) -> Vec<Option<f64>> {
    aligned_returns(series.prices(), |prev, curr| curr.ln() - prev.ln())
}

/// Percent-change returns `p_t / p_{t-1} - 1`, aligned to the series
pub fn pct_returns(series: &PriceSeries) -> Vec<Option<f64>> {
    aligned_returns(series.prices(), |prev, curr| safe_div(curr, prev) - 1.0)
}

fn aligned_returns(prices: &[f64], f: impl Fn(f64, f64) -> f64) -> Vec<Option<f64>> {
    if prices.is_empty() {
        return Vec::new();
    }
    std::iter::once(None)
        .chain(prices.windows(2).map(|w| Some(f(w[0], w[1]))))
        .collect()
}
