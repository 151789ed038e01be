//! Sample weighting module
//!
//! Overlapping events carry redundant information. Weights discount each
//! event's return by how many other events were active on the same bars.

mod concurrency;
mod decay;
mod sample;
mod uniqueness;

pub use concurrency::{concurrency, span_on, Span};
pub use decay::decay_factors;
pub use sample::{compute_weights, EventWeight, WeightOptions};
pub use uniqueness::{attributed_return, average_uniqueness};
