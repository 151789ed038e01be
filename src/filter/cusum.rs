//! Symmetric CUSUM filter on log returns
//!
//! Two accumulators track upward and downward drift since their last reset.
//! An accumulator that crosses the threshold emits an event and resets to
//! zero; the other one keeps its value.

use crate::config::ConfigError;
use crate::series::{log_returns, PriceSeries};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Which accumulator produced an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CusumDirection {
    /// Positive drift crossed `+threshold`
    Up,
    /// Negative drift crossed `-threshold`
    Down,
}

impl CusumDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            CusumDirection::Up => "up",
            CusumDirection::Down => "down",
        }
    }
}

/// A sampled event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CusumEvent {
    pub time: NaiveDateTime,
    pub direction: CusumDirection,
}

/// Accumulator state between two observations
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CusumState {
    /// Upward drift, never negative
    pub s_pos: f64,
    /// Downward drift, never positive
    pub s_neg: f64,
}

impl CusumState {
    /// Advance the state by one log return
    ///
    /// Returns the next state and the direction that fired, if any. Only the
    /// accumulator that fired is reset.
    pub fn step(self, log_return: f64, threshold: f64) -> (Self, Option<CusumDirection>) {
        let mut next = Self {
            s_pos: (self.s_pos + log_return).max(0.0),
            s_neg: (self.s_neg + log_return).min(0.0),
        };

        let mut fired = None;
        if next.s_neg < -threshold {
            next.s_neg = 0.0;
            fired = Some(CusumDirection::Down);
        }
        if next.s_pos > threshold {
            next.s_pos = 0.0;
            fired = Some(CusumDirection::Up);
        }

        (next, fired)
    }
}

/// CUSUM event filter
#[derive(Debug, Clone, Copy)]
pub struct CusumFilter {
    threshold: f64,
}

impl CusumFilter {
    /// Create a filter; `threshold` is in log-return units (0.01 ≈ 1% move)
    pub fn new(threshold: f64) -> Result<Self, ConfigError> {
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "cusum.threshold",
                value: threshold.to_string(),
            });
        }
        Ok(Self { threshold })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Events with the direction that triggered them, in time order
    ///
    /// Fewer than two prices yield no events.
    pub fn detect(&self, series: &PriceSeries) -> Vec<CusumEvent> {
        let threshold = self.threshold;

        let (_, events) = log_returns(series)
            .into_iter()
            .zip(series.times())
            .filter_map(|(r, t)| r.map(|r| (*t, r)))
            .fold(
                (CusumState::default(), Vec::new()),
                |(state, mut events), (time, r)| {
                    let (next, fired) = state.step(r, threshold);
                    if let Some(direction) = fired {
                        events.push(CusumEvent { time, direction });
                    }
                    (next, events)
                },
            );

        events
    }

    /// Ordered, de-duplicated event timestamps
    pub fn filter(&self, series: &PriceSeries) -> Vec<NaiveDateTime> {
        let mut times: Vec<NaiveDateTime> = self.detect(series).into_iter().map(|e| e.time).collect();
        times.dedup();
        times
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn ts(minute: i64) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
            + Duration::minutes(minute)
    }

    fn series(prices: &[f64]) -> PriceSeries {
        PriceSeries::from_pairs(prices.iter().enumerate().map(|(i, p)| (ts(i as i64), *p))).unwrap()
    }

    #[test]
    fn test_filter_rejects_bad_threshold() {
        assert!(CusumFilter::new(0.0).is_err());
        assert!(CusumFilter::new(-0.01).is_err());
        assert!(CusumFilter::new(f64::NAN).is_err());
        assert!(CusumFilter::new(0.01).is_ok());
    }

    #[test]
    fn test_hand_traced_scenario() {
        // log returns ≈ [0.00995, -0.02000, 0.02985, -0.07257, 0.14767]
        let s = series(&[100.0, 101.0, 99.0, 102.0, 95.0, 110.0]);
        let filter = CusumFilter::new(0.02).unwrap();

        let events = filter.detect(&s);
        let got: Vec<(NaiveDateTime, CusumDirection)> =
            events.iter().map(|e| (e.time, e.direction)).collect();
        assert_eq!(
            got,
            vec![
                (ts(2), CusumDirection::Down),
                (ts(3), CusumDirection::Up),
                (ts(4), CusumDirection::Down),
                (ts(5), CusumDirection::Up),
            ]
        );
        assert_eq!(filter.filter(&s), vec![ts(2), ts(3), ts(4), ts(5)]);
    }

    #[test]
    fn test_step_resets_only_triggering_accumulator() {
        let state = CusumState {
            s_pos: 0.015,
            s_neg: -0.008,
        };
        let (next, fired) = state.step(0.01, 0.02);
        assert_eq!(fired, Some(CusumDirection::Up));
        assert_eq!(next.s_pos, 0.0);
        assert_eq!(next.s_neg, 0.0); // min(0, -0.008 + 0.01)

        let state = CusumState {
            s_pos: 0.015,
            s_neg: -0.018,
        };
        let (next, fired) = state.step(-0.005, 0.02);
        assert_eq!(fired, Some(CusumDirection::Down));
        assert!((next.s_pos - 0.010).abs() < 1e-12);
        assert_eq!(next.s_neg, 0.0);
    }

    #[test]
    fn test_accumulates_small_moves() {
        // Five +0.5% steps: the drift crosses 2% on the fifth return
        let prices: Vec<f64> = (0..7).map(|i| 100.0 * 1.005f64.powi(i)).collect();
        let filter = CusumFilter::new(0.02).unwrap();
        assert_eq!(filter.filter(&series(&prices)), vec![ts(5)]);
    }

    #[test]
    fn test_short_series_yields_no_events() {
        let filter = CusumFilter::new(0.01).unwrap();
        assert!(filter.filter(&PriceSeries::default()).is_empty());
        assert!(filter.filter(&series(&[100.0])).is_empty());
    }

    #[test]
    fn test_flat_series_yields_no_events() {
        let filter = CusumFilter::new(0.001).unwrap();
        assert!(filter.filter(&series(&[50.0; 20])).is_empty());
    }

    #[test]
    fn test_deterministic() {
        let s = series(&[100.0, 103.0, 99.0, 104.0, 98.0, 101.0, 96.0, 105.0]);
        let filter = CusumFilter::new(0.015).unwrap();
        assert_eq!(filter.filter(&s), filter.filter(&s));
    }
}
