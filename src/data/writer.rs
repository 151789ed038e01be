//! CSV writers for filtered events and label tables

use super::types::{DataError, FilteredRow, LabelRow, TIMESTAMP_FORMAT};
use crate::filter::CusumEvent;
use crate::labeling::LabeledOutcome;
use crate::series::PriceSeries;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::fs;
use std::path::Path;

const FILTERED_HEADER: [&str; 3] = ["datetime", "close", "direction"];
const LABEL_HEADER: [&str; 5] = ["datetime", "exit_time", "ret", "bin", "sample_weight"];

pub fn format_timestamp(time: NaiveDateTime) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}

/// Create the parent directory of `path` if needed
fn ensure_parent(path: &Path) -> Result<(), DataError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            fs::create_dir_all(dir).map_err(|source| DataError::Io {
                path: dir.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

/// Write a header and rows; the header is written even with no rows
fn write_rows<R: Serialize>(path: &Path, header: &[&str], rows: &[R]) -> Result<(), DataError> {
    ensure_parent(path)?;
    let csv_err = |source| DataError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(csv_err)?;
    writer.write_record(header).map_err(csv_err)?;
    for row in rows {
        writer.serialize(row).map_err(csv_err)?;
    }
    writer.flush().map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), count = rows.len(), "Wrote table");
    Ok(())
}

/// Write CUSUM events with the close price of their bar
pub fn write_filtered(
    path: impl AsRef<Path>,
    series: &PriceSeries,
    events: &[CusumEvent],
) -> Result<usize, DataError> {
    let rows: Vec<FilteredRow> = events
        .iter()
        .filter_map(|event| {
            series.price_at(event.time).map(|close| FilteredRow {
                datetime: format_timestamp(event.time),
                close,
                direction: event.direction.as_str().to_string(),
            })
        })
        .collect();

    write_rows(path.as_ref(), &FILTERED_HEADER, &rows)?;
    Ok(rows.len())
}

/// Write labeled outcomes sorted by start time
pub fn write_labels(path: impl AsRef<Path>, outcomes: &[LabeledOutcome]) -> Result<usize, DataError> {
    let mut sorted: Vec<&LabeledOutcome> = outcomes.iter().collect();
    sorted.sort_by_key(|o| o.start);

    let rows: Vec<LabelRow> = sorted
        .into_iter()
        .map(|o| LabelRow {
            datetime: format_timestamp(o.start),
            exit_time: format_timestamp(o.exit_time),
            ret: o.ret,
            bin: o.label,
            sample_weight: o.sample_weight,
        })
        .collect();

    write_rows(path.as_ref(), &LABEL_HEADER, &rows)?;
    Ok(rows.len())
}

/// Read a label table back into rows
pub fn read_label_table(path: impl AsRef<Path>) -> Result<Vec<LabelRow>, DataError> {
    let path = path.as_ref();
    let csv_err = |source| DataError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::Reader::from_path(path).map_err(csv_err)?;
    reader
        .deserialize()
        .collect::<Result<Vec<LabelRow>, _>>()
        .map_err(csv_err)
}
