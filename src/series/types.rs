//! Price series types

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single close price observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Bar timestamp
    pub time: NaiveDateTime,
    /// Close price
    pub price: f64,
}

impl PricePoint {
    pub fn new(time: NaiveDateTime, price: f64) -> Self {
        Self { time, price }
    }
}

/// Errors raised while building a price series
#[derive(Debug, Error, PartialEq)]
pub enum SeriesError {
    /// Timestamps are not strictly increasing
    #[error("timestamp at position {index} is not after its predecessor: {time}")]
    Unordered { index: usize, time: NaiveDateTime },
    /// Price is zero, negative or not finite
    #[error("invalid price {price} at {time}")]
    InvalidPrice { time: NaiveDateTime, price: f64 },
}

/// Ordered close-price series, immutable once built
///
/// Timestamps are strictly increasing and every price is finite and
/// positive, so log returns are always defined.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    times: Vec<NaiveDateTime>,
    prices: Vec<f64>,
}

impl PriceSeries {
    /// Build a series from points that are already in strict time order
    pub fn new(points: Vec<PricePoint>) -> Result<Self, SeriesError> {
        let mut times = Vec::with_capacity(points.len());
        let mut prices = Vec::with_capacity(points.len());

        for (index, point) in points.into_iter().enumerate() {
            if !point.price.is_finite() || point.price <= 0.0 {
                return Err(SeriesError::InvalidPrice {
                    time: point.time,
                    price: point.price,
                });
            }
            if let Some(last) = times.last() {
                if point.time <= *last {
                    return Err(SeriesError::Unordered {
                        index,
                        time: point.time,
                    });
                }
            }
            times.push(point.time);
            prices.push(point.price);
        }

        Ok(Self { times, prices })
    }

    /// Build a series from points in any order
    ///
    /// Points are sorted by time; when a timestamp repeats the last
    /// occurrence wins.
    pub fn from_unsorted(mut points: Vec<PricePoint>) -> Result<Self, SeriesError> {
        // Stable sort keeps input order among equal timestamps
        points.sort_by_key(|p| p.time);

        let mut deduped: Vec<PricePoint> = Vec::with_capacity(points.len());
        for point in points {
            match deduped.last_mut() {
                Some(last) if last.time == point.time => *last = point,
                _ => deduped.push(point),
            }
        }

        Self::new(deduped)
    }

    /// Build a series from parallel `(time, price)` pairs
    pub fn from_pairs<I>(pairs: I) -> Result<Self, SeriesError>
    where
        I: IntoIterator<Item = (NaiveDateTime, f64)>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(time, price)| PricePoint::new(time, price))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// All timestamps, ascending
    pub fn times(&self) -> &[NaiveDateTime] {
        &self.times
    }

    /// All prices, aligned with [`PriceSeries::times`]
    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    pub fn last_time(&self) -> Option<NaiveDateTime> {
        self.times.last().copied()
    }

    /// Index of an exact timestamp
    pub fn position(&self, time: NaiveDateTime) -> Option<usize> {
        self.times.binary_search(&time).ok()
    }

    /// Index of the last timestamp at or before `time`
    pub fn asof(&self, time: NaiveDateTime) -> Option<usize> {
        self.times.partition_point(|t| *t <= time).checked_sub(1)
    }

    /// Index of the first timestamp at or after `time`
    pub fn first_at_or_after(&self, time: NaiveDateTime) -> Option<usize> {
        let index = self.times.partition_point(|t| *t < time);
        (index < self.times.len()).then_some(index)
    }

    /// Price at an exact timestamp
    pub fn price_at(&self, time: NaiveDateTime) -> Option<f64> {
        self.position(time).map(|i| self.prices[i])
    }

    /// Most recent price at or before `time`
    pub fn price_asof(&self, time: NaiveDateTime) -> Option<f64> {
        self.asof(time).map(|i| self.prices[i])
    }
}
