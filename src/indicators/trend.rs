//! Trend indicators
//!
//! - SMA (Simple Moving Average)
//! - EMA (Exponential Moving Average)
//! - MACD (Moving Average Convergence Divergence)
//! - Bollinger Bands
//!
//! Warm-up positions are NaN and match TA-Lib's lookback.

use super::utils;

/// Simple moving average
///
/// SMA = (P1 + P2 + ... + Pn) / n
///
/// # Example
/// ```
/// use news_sentiment::indicators::sma;
/// let prices = vec![10.0, 11.0, 12.0, 13.0, 14.0, 15.0];
/// let sma_3 = sma(&prices, 3);
/// assert_eq!(sma_3[2], 11.0); // (10 + 11 + 12) / 3
/// ```
pub fn sma(data: &[f64], period: usize) -> Vec<f64> {
    utils::rolling(data, period, utils::mean)
}

/// Exponential moving average
///
/// EMA = Price * k + EMA_prev * (1 - k), where k = 2 / (period + 1)
///
/// Leading NaNs are skipped; the seed is the SMA of the first `period`
/// defined values.
pub fn ema(data: &[f64], period: usize) -> Vec<f64> {
    match utils::first_valid(data) {
        Some(start) if period > 0 => ema_from(data, period, start + period - 1),
        _ => vec![f64::NAN; data.len()],
    }
}

/// EMA whose first output sits at `seed_end`, seeded with the mean of the
/// `period` values ending there
fn ema_from(data: &[f64], period: usize, seed_end: usize) -> Vec<f64> {
    if period == 0 || seed_end + 1 < period || seed_end >= data.len() {
        return vec![f64::NAN; data.len()];
    }

    let k = 2.0 / (period as f64 + 1.0);
    let mut result = vec![f64::NAN; seed_end];

    let seed = utils::mean(&data[(seed_end + 1 - period)..=seed_end]);
    result.push(seed);

    let mut prev = seed;
    for &price in &data[(seed_end + 1)..] {
        prev = price * k + prev * (1.0 - k);
        result.push(prev);
    }

    result
}

/// MACD output
#[derive(Debug, Clone)]
pub struct MACDResult {
    /// Fast EMA minus slow EMA
    pub macd_line: Vec<f64>,
    /// EMA of the MACD line
    pub signal_line: Vec<f64>,
    /// MACD line minus signal line
    pub histogram: Vec<f64>,
}

/// Moving average convergence/divergence
///
/// Both EMAs start on the bar where the slow one is first defined, and all
/// three outputs stay NaN until the signal line is defined, i.e. for the
/// first `slow - 1 + signal - 1` bars.
pub fn macd(data: &[f64], fast_period: usize, slow_period: usize, signal_period: usize) -> MACDResult {
    let (fast_period, slow_period) = if slow_period < fast_period {
        (slow_period, fast_period)
    } else {
        (fast_period, slow_period)
    };

    let undefined = || vec![f64::NAN; data.len()];
    let Some(start) = utils::first_valid(data).filter(|_| fast_period > 0) else {
        return MACDResult {
            macd_line: undefined(),
            signal_line: undefined(),
            histogram: undefined(),
        };
    };

    let seed_end = start + slow_period - 1;
    let ema_fast = ema_from(data, fast_period, seed_end);
    let ema_slow = ema_from(data, slow_period, seed_end);

    let mut macd_line: Vec<f64> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(fast, slow)| fast - slow)
        .collect();

    let signal_line = ema(&macd_line, signal_period);

    for (m, s) in macd_line.iter_mut().zip(&signal_line) {
        if s.is_nan() {
            *m = f64::NAN;
        }
    }

    let histogram = macd_line
        .iter()
        .zip(&signal_line)
        .map(|(m, s)| m - s)
        .collect();

    MACDResult {
        macd_line,
        signal_line,
        histogram,
    }
}

/// Bollinger Bands output
#[derive(Debug, Clone)]
pub struct BollingerResult {
    /// Middle + nbdev_up * sigma
    pub upper: Vec<f64>,
    /// SMA
    pub middle: Vec<f64>,
    /// Middle - nbdev_dn * sigma
    pub lower: Vec<f64>,
}

/// Bollinger Bands
///
/// Sigma is the population standard deviation over the same window as the
/// middle SMA.
pub fn bollinger_bands(data: &[f64], period: usize, nbdev_up: f64, nbdev_dn: f64) -> BollingerResult {
    let middle = sma(data, period);
    let std = utils::rolling(data, period, utils::std_dev_pop);

    let upper = middle.iter().zip(&std).map(|(m, s)| m + nbdev_up * s).collect();
    let lower = middle.iter().zip(&std).map(|(m, s)| m - nbdev_dn * s).collect();

    BollingerResult { upper, middle, lower }
}
