//! Tabular data access
//!
//! Reads minute bars and filtered event files, writes filtered events and
//! label tables as CSV

mod bars;
mod layout;
mod types;
mod writer;

pub use bars::{parse_timestamp, read_event_times, read_price_series};
pub use layout::DataLayout;
pub use types::{DataError, FilteredRow, LabelRow, TIMESTAMP_FORMAT};
pub use writer::{format_timestamp, read_label_table, write_filtered, write_labels};
