//! # Price Data
//!
//! Date-indexed price tables with named numeric columns, and the
//! close/daily-return series used for correlation.

use chrono::NaiveDate;
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

use super::loader::parse_date;

/// Errors raised while building or reading price data
#[derive(Error, Debug)]
pub enum PriceError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing column `{0}`")]
    MissingColumn(String),

    #[error("column `{name}` has {actual} values, table has {expected} rows")]
    LengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
}

/// A table of prices indexed by date
///
/// Columns keep their insertion order. Writing a column that already exists
/// replaces it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceTable {
    dates: Vec<NaiveDate>,
    columns: Vec<(String, Vec<f64>)>,
}

impl PriceTable {
    /// Create an empty table over the given dates
    pub fn new(dates: Vec<NaiveDate>) -> Self {
        Self {
            dates,
            columns: Vec::new(),
        }
    }

    /// Add a column, consuming and returning the table
    pub fn with_column(
        mut self,
        name: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<Self, PriceError> {
        self.insert_column(name, values)?;
        Ok(self)
    }

    /// Add or replace a column
    pub fn insert_column(
        &mut self,
        name: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<(), PriceError> {
        let name = name.into();
        if values.len() != self.dates.len() {
            return Err(PriceError::LengthMismatch {
                name,
                expected: self.dates.len(),
                actual: values.len(),
            });
        }

        match self.columns.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = values,
            None => self.columns.push((name, values)),
        }
        Ok(())
    }

    /// Get a column by name
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }

    /// Column names in insertion order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Row dates
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Build a close/daily-return series from one column
    pub fn to_series(
        &self,
        name: impl Into<String>,
        close_column: &str,
    ) -> Result<PriceSeries, PriceError> {
        let closes = self
            .column(close_column)
            .ok_or_else(|| PriceError::MissingColumn(close_column.to_string()))?;
        Ok(PriceSeries::from_closes(name, &self.dates, closes))
    }
}

/// Percent change of each close versus the previous one
///
/// The first value is NaN, as is any value whose previous close is zero or
/// NaN.
pub fn calculate_daily_returns(closes: &[f64]) -> Vec<f64> {
    let mut returns = Vec::with_capacity(closes.len());
    if closes.is_empty() {
        return returns;
    }

    returns.push(f64::NAN);
    returns.extend(closes.windows(2).map(|w| {
        if w[0] == 0.0 || w[0].is_nan() {
            f64::NAN
        } else {
            (w[1] / w[0] - 1.0) * 100.0
        }
    }));
    returns
}

/// A single trading day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Trading date
    pub date: NaiveDate,
    /// Closing price
    pub close: f64,
    /// Percent change vs. the prior bar (NaN for the first bar)
    pub daily_return: f64,
}

/// A named series of closing prices with daily returns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    /// Series name (usually the ticker)
    pub name: String,
    /// Bars in file order
    pub bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Build a series from dates and closes, computing daily returns
    pub fn from_closes(name: impl Into<String>, dates: &[NaiveDate], closes: &[f64]) -> Self {
        let returns = calculate_daily_returns(closes);
        let bars = dates
            .iter()
            .zip(closes)
            .zip(returns)
            .map(|((&date, &close), daily_return)| PriceBar {
                date,
                close,
                daily_return,
            })
            .collect();

        Self {
            name: name.into(),
            bars,
        }
    }

    /// Number of bars
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Whether the series is empty
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

/// Load a price table from a CSV file
pub fn load_price_table<P: AsRef<Path>>(path: P) -> Result<PriceTable, PriceError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| PriceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_price_table(file)
}

/// Read a price table from any CSV source
///
/// The date column is `date` or `Date`. Every other column is parsed as
/// numbers; cells that do not parse become NaN. Rows with an unparseable
/// date are skipped.
pub fn read_price_table<R: Read>(source: R) -> Result<PriceTable, PriceError> {
    let mut reader = ReaderBuilder::new().from_reader(source);
    let headers = reader.headers()?.clone();

    let date_idx = headers
        .iter()
        .position(|h| h == "date" || h == "Date")
        .ok_or_else(|| PriceError::MissingColumn("date".to_string()))?;

    let value_columns: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(i, h)| *i != date_idx && !h.is_empty() && !h.starts_with("Unnamed"))
        .map(|(i, h)| (i, h.to_string()))
        .collect();

    let mut dates = Vec::new();
    let mut values: Vec<Vec<f64>> = vec![Vec::new(); value_columns.len()];
    let mut skipped = 0usize;

    for result in reader.records() {
        let record = result?;
        let Some(date) = record.get(date_idx).and_then(parse_date) else {
            skipped += 1;
            continue;
        };

        dates.push(date);
        for (slot, (idx, _)) in values.iter_mut().zip(&value_columns) {
            let value = record
                .get(*idx)
                .and_then(|cell| cell.trim().parse::<f64>().ok())
                .unwrap_or(f64::NAN);
            slot.push(value);
        }
    }

    if skipped > 0 {
        warn!("Skipped {} price rows with unparseable dates", skipped);
    }

    let mut table = PriceTable::new(dates);
    for ((_, name), column) in value_columns.into_iter().zip(values) {
        table.insert_column(name, column)?;
    }
    Ok(table)
}
