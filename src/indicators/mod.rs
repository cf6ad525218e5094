//! # Technical Indicators
//!
//! Raw indicator functions over `&[f64]`:
//! - Trend indicators (SMA, EMA, MACD, Bollinger Bands)
//! - Momentum indicators (RSI)
//!
//! plus `calculate_*` wrappers that read a price column from a
//! [`PriceTable`] and return the table with the indicator columns appended.

pub mod momentum;
pub mod trend;
pub mod utils;

pub use momentum::rsi;
pub use trend::{bollinger_bands, ema, macd, sma, BollingerResult, MACDResult};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::data::{PriceError, PriceTable};

/// Default price column
pub const DEFAULT_PRICE_COLUMN: &str = "Close";
/// Default SMA/EMA/RSI period
pub const DEFAULT_PERIOD: usize = 14;
/// Default MACD periods (fast, slow, signal)
pub const DEFAULT_MACD: (usize, usize, usize) = (12, 26, 9);
/// Default Bollinger period
pub const DEFAULT_BOLLINGER_PERIOD: usize = 20;
/// Default Bollinger band width in standard deviations
pub const DEFAULT_NBDEV: f64 = 2.0;

/// Indicator errors
#[derive(Debug, Error)]
pub enum IndicatorError {
    #[error("price column `{0}` not found")]
    MissingColumn(String),

    #[error("invalid period for {indicator}: {period}")]
    InvalidPeriod {
        indicator: &'static str,
        period: usize,
    },

    #[error(transparent)]
    Table(#[from] PriceError),
}

fn price_column<'a>(table: &'a PriceTable, column: &str) -> Result<&'a [f64], IndicatorError> {
    table
        .column(column)
        .ok_or_else(|| IndicatorError::MissingColumn(column.to_string()))
}

fn check_period(indicator: &'static str, period: usize) -> Result<(), IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::InvalidPeriod { indicator, period });
    }
    Ok(())
}

/// Append an `SMA` column
pub fn calculate_sma(table: &PriceTable, column: &str, period: usize) -> Result<PriceTable, IndicatorError> {
    check_period("SMA", period)?;
    let values = sma(price_column(table, column)?, period);
    debug!("SMA({}) over {} rows", period, table.len());
    Ok(table.clone().with_column("SMA", values)?)
}

/// Append an `EMA` column
pub fn calculate_ema(table: &PriceTable, column: &str, period: usize) -> Result<PriceTable, IndicatorError> {
    check_period("EMA", period)?;
    let values = ema(price_column(table, column)?, period);
    debug!("EMA({}) over {} rows", period, table.len());
    Ok(table.clone().with_column("EMA", values)?)
}

/// Append an `RSI` column
pub fn calculate_rsi(table: &PriceTable, column: &str, period: usize) -> Result<PriceTable, IndicatorError> {
    check_period("RSI", period)?;
    let values = rsi(price_column(table, column)?, period);
    debug!("RSI({}) over {} rows", period, table.len());
    Ok(table.clone().with_column("RSI", values)?)
}

/// Append `MACD` and `MACD_Signal` columns
pub fn calculate_macd(
    table: &PriceTable,
    column: &str,
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> Result<PriceTable, IndicatorError> {
    check_period("MACD fast", fast_period)?;
    check_period("MACD slow", slow_period)?;
    check_period("MACD signal", signal_period)?;

    let result = macd(price_column(table, column)?, fast_period, slow_period, signal_period);
    debug!(
        "MACD({}, {}, {}) over {} rows",
        fast_period,
        slow_period,
        signal_period,
        table.len()
    );

    Ok(table
        .clone()
        .with_column("MACD", result.macd_line)?
        .with_column("MACD_Signal", result.signal_line)?)
}

/// Append `Upper_Band`, `Middle_Band` and `Lower_Band` columns
pub fn calculate_bollinger_bands(
    table: &PriceTable,
    column: &str,
    period: usize,
    nbdev_up: f64,
    nbdev_dn: f64,
) -> Result<PriceTable, IndicatorError> {
    check_period("Bollinger", period)?;
    let result = bollinger_bands(price_column(table, column)?, period, nbdev_up, nbdev_dn);
    debug!("Bollinger({}, {}, {}) over {} rows", period, nbdev_up, nbdev_dn, table.len());

    Ok(table
        .clone()
        .with_column("Upper_Band", result.upper)?
        .with_column("Middle_Band", result.middle)?
        .with_column("Lower_Band", result.lower)?)
}

/// Indicator look-back settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorParams {
    /// SMA window
    pub sma_period: usize,
    /// EMA window
    pub ema_period: usize,
    /// RSI smoothing period
    pub rsi_period: usize,
    /// Fast MACD EMA period
    pub macd_fast: usize,
    /// Slow MACD EMA period
    pub macd_slow: usize,
    /// MACD signal EMA period
    pub macd_signal: usize,
    /// Bollinger moving-average window
    pub bollinger_period: usize,
    /// Standard deviations above the middle band
    pub bollinger_nbdev_up: f64,
    /// Standard deviations below the middle band
    pub bollinger_nbdev_dn: f64,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        let (macd_fast, macd_slow, macd_signal) = DEFAULT_MACD;
        Self {
            sma_period: DEFAULT_PERIOD,
            ema_period: DEFAULT_PERIOD,
            rsi_period: DEFAULT_PERIOD,
            macd_fast,
            macd_slow,
            macd_signal,
            bollinger_period: DEFAULT_BOLLINGER_PERIOD,
            bollinger_nbdev_up: DEFAULT_NBDEV,
            bollinger_nbdev_dn: DEFAULT_NBDEV,
        }
    }
}

/// Append every indicator column
pub fn calculate_all(
    table: &PriceTable,
    column: &str,
    params: &IndicatorParams,
) -> Result<PriceTable, IndicatorError> {
    let table = calculate_sma(table, column, params.sma_period)?;
    let table = calculate_ema(&table, column, params.ema_period)?;
    let table = calculate_rsi(&table, column, params.rsi_period)?;
    let table = calculate_macd(
        &table,
        column,
        params.macd_fast,
        params.macd_slow,
        params.macd_signal,
    )?;
    calculate_bollinger_bands(
        &table,
        column,
        params.bollinger_period,
        params.bollinger_nbdev_up,
        params.bollinger_nbdev_dn,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn sample_table(n: usize) -> PriceTable {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let dates = (0..n).map(|i| start + Duration::days(i as i64)).collect();
        let closes = (0..n).map(|i| 100.0 + (i as f64 * 0.5).sin() * 4.0).collect();
        PriceTable::new(dates).with_column("Close", closes).unwrap()
    }

    #[test]
    fn test_calculate_sma_appends_column() {
        let table = sample_table(30);
        let result = calculate_sma(&table, "Close", 14).unwrap();

        assert_eq!(result.column_names(), vec!["Close", "SMA"]);
        let sma = result.column("SMA").unwrap();
        assert_eq!(sma.len(), 30);
        assert!(sma[..13].iter().all(|v| v.is_nan()));
        assert!(!sma[13].is_nan());
        // input untouched
        assert_eq!(table.column_names(), vec!["Close"]);
    }

    #[test]
    fn test_missing_column() {
        let table = sample_table(30);
        let err = calculate_rsi(&table, "Adj Close", 14).unwrap_err();
        assert!(matches!(err, IndicatorError::MissingColumn(ref c) if c == "Adj Close"));
    }

    #[test]
    fn test_invalid_period() {
        let table = sample_table(10);
        assert!(matches!(
            calculate_ema(&table, "Close", 0),
            Err(IndicatorError::InvalidPeriod { period: 0, .. })
        ));
    }

    #[test]
    fn test_calculate_all_columns() {
        let table = sample_table(60);
        let result = calculate_all(&table, DEFAULT_PRICE_COLUMN, &IndicatorParams::default()).unwrap();

        assert_eq!(
            result.column_names(),
            vec![
                "Close",
                "SMA",
                "EMA",
                "RSI",
                "MACD",
                "MACD_Signal",
                "Upper_Band",
                "Middle_Band",
                "Lower_Band"
            ]
        );

        let macd = result.column("MACD").unwrap();
        assert_eq!(macd.iter().take_while(|v| v.is_nan()).count(), 25 + 8);

        let upper = result.column("Upper_Band").unwrap();
        let middle = result.column("Middle_Band").unwrap();
        let lower = result.column("Lower_Band").unwrap();
        for i in 19..60 {
            assert!(upper[i] >= middle[i] && middle[i] >= lower[i]);
        }
    }

    #[test]
    fn test_short_series_all_nan() {
        let table = sample_table(5);
        let result = calculate_rsi(&table, "Close", 14).unwrap();
        assert!(result.column("RSI").unwrap().iter().all(|v| v.is_nan()));
    }
}
