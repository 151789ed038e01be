//! Volatility estimation module
//!
//! Exponentially weighted standard deviation of percent-change returns

use crate::config::ConfigError;
use crate::series::{pct_returns, PriceSeries};
use chrono::NaiveDateTime;

/// Streaming exponentially weighted standard deviation
///
/// Uses normalised ("adjusted") weights `(1 - alpha)^k` over the whole
/// history and the bias-corrected variance, so the first observation has
/// no defined deviation.
#[derive(Debug, Clone)]
pub struct EwmStd {
    alpha: f64,
    /// Sum of weights
    sum_w: f64,
    /// Sum of squared weights
    sum_w2: f64,
    mean: f64,
    /// Biased weighted variance
    var: f64,
    count: usize,
}

impl EwmStd {
    /// Create an accumulator with decay `alpha = 2 / (span + 1)`
    pub fn new(span: usize) -> Self {
        Self {
            alpha: 2.0 / (span as f64 + 1.0),
            sum_w: 0.0,
            sum_w2: 0.0,
            mean: 0.0,
            var: 0.0,
            count: 0,
        }
    }

    /// Add an observation and return the current estimate
    pub fn update(&mut self, x: f64) -> Option<f64> {
        if self.count == 0 {
            self.mean = x;
            self.var = 0.0;
            self.sum_w = 1.0;
            self.sum_w2 = 1.0;
        } else {
            let decay = 1.0 - self.alpha;
            self.sum_w *= decay;
            self.sum_w2 *= decay * decay;

            let old_w = self.sum_w;
            let old_mean = self.mean;
            self.mean = (old_w * old_mean + x) / (old_w + 1.0);
            self.var = (old_w * (self.var + (old_mean - self.mean).powi(2))
                + (x - self.mean).powi(2))
                / (old_w + 1.0);

            self.sum_w += 1.0;
            self.sum_w2 += 1.0;
        }
        self.count += 1;
        self.estimate()
    }

    /// Current bias-corrected standard deviation
    pub fn estimate(&self) -> Option<f64> {
        let numerator = self.sum_w * self.sum_w;
        let denominator = numerator - self.sum_w2;
        if self.count < 2 || denominator <= 0.0 {
            return None;
        }
        let var = (numerator / denominator * self.var).max(0.0);
        Some(var.sqrt())
    }
}

/// Volatility aligned to a price series timeline
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VolatilitySeries {
    times: Vec<NaiveDateTime>,
    values: Vec<Option<f64>>,
}

impl VolatilitySeries {
    pub fn new(times: Vec<NaiveDateTime>, values: Vec<Option<f64>>) -> Self {
        debug_assert_eq!(times.len(), values.len());
        Self { times, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Volatility at an exact timestamp; `None` when the timestamp is
    /// unknown or the estimate is undefined there
    pub fn at(&self, time: NaiveDateTime) -> Option<f64> {
        let index = self.times.binary_search(&time).ok()?;
        self.values[index]
    }
}

/// Trailing volatility estimator used to size barriers
#[derive(Debug, Clone, Copy)]
pub struct VolatilityEstimator {
    span: usize,
}

impl VolatilityEstimator {
    /// Create an estimator with the given EWM span
    pub fn new(span: usize) -> Result<Self, ConfigError> {
        if span == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "labeling.volatility_span",
                value: span.to_string(),
            });
        }
        Ok(Self { span })
    }

    pub fn span(&self) -> usize {
        self.span
    }

    /// Volatility per timestamp of `series`
    ///
    /// The first timestamp has no return and the second has a single one,
    /// so both are undefined.
    pub fn estimate(&self, series: &PriceSeries) -> VolatilitySeries {
        let mut ewm = EwmStd::new(self.span);
        let values = pct_returns(series)
            .into_iter()
            .map(|r| r.and_then(|r| ewm.update(r)))
            .collect();

        VolatilitySeries::new(series.times().to_vec(), values)
    }
}
