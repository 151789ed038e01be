//! Event filtering module
//!
//! Sparse event sampling from a dense price series

mod cusum;

pub use cusum::{CusumDirection, CusumEvent, CusumFilter, CusumState};
