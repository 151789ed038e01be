//! CSV readers for minute bars and filtered event files

use super::types::DataError;
use crate::series::{PricePoint, PriceSeries};
use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

/// Parse a bar timestamp in any of the accepted layouts
///
/// A bare date is read as midnight.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Where a row keeps its timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimeColumns {
    /// Single `datetime` column
    Combined(usize),
    /// `date` and `minute` columns joined with a space
    Split { date: usize, minute: usize },
}

impl TimeColumns {
    fn locate(headers: &StringRecord) -> Option<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name));

        if let Some(index) = find("datetime") {
            return Some(TimeColumns::Combined(index));
        }
        match (find("date"), find("minute")) {
            (Some(date), Some(minute)) => Some(TimeColumns::Split { date, minute }),
            _ => None,
        }
    }

    fn read(&self, record: &StringRecord) -> Option<NaiveDateTime> {
        match *self {
            TimeColumns::Combined(i) => parse_timestamp(record.get(i)?),
            TimeColumns::Split { date, minute } => {
                let joined = format!("{} {}", record.get(date)?.trim(), record.get(minute)?.trim());
                parse_timestamp(&joined)
            }
        }
    }
}

fn open(path: &Path) -> Result<(csv::Reader<std::fs::File>, StringRecord, TimeColumns), DataError> {
    let csv_err = |source| DataError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_err)?;
    let headers = reader.headers().map_err(csv_err)?.clone();
    let columns = TimeColumns::locate(&headers).ok_or_else(|| DataError::MissingColumn {
        path: path.to_path_buf(),
        column: "datetime",
    })?;

    Ok((reader, headers, columns))
}

fn parse_price(s: &str) -> Option<f64> {
    let decimal = Decimal::from_str(s.trim())
        .or_else(|_| Decimal::from_scientific(s.trim()))
        .ok()?;
    f64::try_from(decimal).ok()
}

/// Load the close-price series of a bar file
///
/// Rows are sorted by time and a repeated timestamp keeps its last row.
pub fn read_price_series(path: impl AsRef<Path>) -> Result<PriceSeries, DataError> {
    let path = path.as_ref();
    let (mut reader, headers, columns) = open(path)?;
    let close = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case("close"))
        .ok_or_else(|| DataError::MissingColumn {
            path: path.to_path_buf(),
            column: "close",
        })?;

    let mut points = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let row = i + 1;
        let record = result.map_err(|source| DataError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let parse_err = |reason: String| DataError::Parse {
            path: path.to_path_buf(),
            row,
            reason,
        };

        let time = columns
            .read(&record)
            .ok_or_else(|| parse_err("unreadable timestamp".to_string()))?;
        let raw = record.get(close).unwrap_or_default();
        let price = parse_price(raw).ok_or_else(|| parse_err(format!("unreadable close {:?}", raw)))?;
        if price <= 0.0 {
            return Err(parse_err(format!("non-positive close {}", price)));
        }

        points.push(PricePoint::new(time, price));
    }

    let series = PriceSeries::from_unsorted(points)?;
    tracing::debug!(path = %path.display(), bars = series.len(), "Loaded price series");
    Ok(series)
}

/// Load the event timestamps of a filtered events file, sorted and unique
pub fn read_event_times(path: impl AsRef<Path>) -> Result<Vec<NaiveDateTime>, DataError> {
    let path = path.as_ref();
    let (mut reader, _, columns) = open(path)?;

    let mut times = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result.map_err(|source| DataError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let time = columns.read(&record).ok_or_else(|| DataError::Parse {
            path: path.to_path_buf(),
            row: i + 1,
            reason: "unreadable timestamp".to_string(),
        })?;
        times.push(time);
    }

    times.sort();
    times.dedup();
    Ok(times)
}
