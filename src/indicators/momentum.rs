//! Momentum indicators
//!
//! - RSI (Relative Strength Index)

use super::utils;

/// Relative strength index with Wilder smoothing
///
/// RSI = 100 * AvgGain / (AvgGain + AvgLoss)
///
/// The first `period` outputs (after any leading NaNs) are undefined. A
/// window without losses reads 100, a flat window reads 0.
///
/// # Returns
/// Values in [0, 100]
pub fn rsi(data: &[f64], period: usize) -> Vec<f64> {
    let mut result = vec![f64::NAN; data.len()];
    let Some(start) = utils::first_valid(data) else {
        return result;
    };
    if period == 0 || data.len() - start < period + 1 {
        return result;
    }

    let changes: Vec<f64> = data[start..].windows(2).map(|w| w[1] - w[0]).collect();
    let gain = |c: f64| if c > 0.0 { c } else { 0.0 };
    let loss = |c: f64| if c < 0.0 { -c } else { 0.0 };

    let mut avg_gain = changes[..period].iter().map(|&c| gain(c)).sum::<f64>() / period as f64;
    let mut avg_loss = changes[..period].iter().map(|&c| loss(c)).sum::<f64>() / period as f64;
    result[start + period] = rsi_value(avg_gain, avg_loss);

    let p = period as f64;
    for (offset, &change) in changes.iter().enumerate().skip(period) {
        avg_gain = (avg_gain * (p - 1.0) + gain(change)) / p;
        avg_loss = (avg_loss * (p - 1.0) + loss(change)) / p;
        result[start + offset + 1] = rsi_value(avg_gain, avg_loss);
    }

    result
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    let total = avg_gain + avg_loss;
    if total == 0.0 {
        0.0
    } else {
        100.0 * avg_gain / total
    }
}
