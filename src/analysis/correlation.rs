//! # Sentiment/Return Correlation
//!
//! Pearson correlation between mean daily headline sentiment and the daily
//! return of the first price series.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{info, warn};

use super::aligner::{align_dates, AlignedRow, AlignmentReport};
use super::AnalysisError;
use crate::data::{PriceSeries, ScoredHeadline};

/// Correlation outcome
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationResult {
    /// Pearson coefficient in [-1, 1], NaN when undefined
    pub coefficient: f64,
    /// Dates with both a sentiment mean and a defined return
    pub points: usize,
    /// Join summary
    pub report: AlignmentReport,
}

impl CorrelationResult {
    /// Whether the coefficient is defined
    pub fn is_defined(&self) -> bool {
        !self.coefficient.is_nan()
    }
}

/// Pearson correlation coefficient
///
/// Pairs where either side is NaN are skipped. Returns NaN for fewer than two
/// pairs, mismatched lengths, or zero variance on either side.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() {
        return f64::NAN;
    }

    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter(|(a, b)| !a.is_nan() && !b.is_nan())
        .map(|(&a, &b)| (a, b))
        .collect();

    if pairs.len() < 2 {
        return f64::NAN;
    }

    // constant sides leave rounding residue in the variance; test them exactly
    if is_constant(pairs.iter().map(|p| p.0)) || is_constant(pairs.iter().map(|p| p.1)) {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;

    for (xi, yi) in &pairs {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }

    (cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0)
}

fn is_constant(mut values: impl Iterator<Item = f64>) -> bool {
    match values.next() {
        Some(first) => values.all(|v| v == first),
        None => true,
    }
}

/// Mean headline score per calendar date
pub fn daily_mean_sentiment<'a, I>(headlines: I) -> BTreeMap<NaiveDate, f64>
where
    I: IntoIterator<Item = &'a ScoredHeadline>,
{
    let mut sums: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for headline in headlines {
        let entry = sums.entry(headline.date()).or_insert((0.0, 0));
        entry.0 += headline.score;
        entry.1 += 1;
    }

    sums.into_iter()
        .map(|(date, (sum, count))| (date, sum / count as f64))
        .collect()
}

/// Daily return of the first price series per aligned date
fn daily_returns(rows: &[AlignedRow]) -> BTreeMap<NaiveDate, f64> {
    let mut returns = BTreeMap::new();
    for row in rows {
        if let Some(bar) = row.bars.first() {
            returns.entry(row.date()).or_insert(bar.daily_return);
        }
    }
    returns
}

/// Correlate mean daily sentiment with daily returns
///
/// Headlines are aligned with every series first; returns come from the
/// first series.
pub fn calculate_correlation(
    news: &[ScoredHeadline],
    series: &[PriceSeries],
) -> Result<CorrelationResult, AnalysisError> {
    let aligned = align_dates(series, news)?;

    let sentiment = daily_mean_sentiment(aligned.rows.iter().map(|row| &row.news));
    let returns = daily_returns(&aligned.rows);

    let (x, y): (Vec<f64>, Vec<f64>) = sentiment
        .iter()
        .filter_map(|(date, &s)| returns.get(date).map(|&r| (s, r)))
        .filter(|(s, r)| !s.is_nan() && !r.is_nan())
        .unzip();

    let coefficient = pearson(&x, &y);
    if coefficient.is_nan() {
        warn!(
            "Correlation undefined over {} dates (too few points or zero variance)",
            x.len()
        );
    } else {
        info!("Correlation {:.4} over {} dates", coefficient, x.len());
    }

    Ok(CorrelationResult {
        coefficient,
        points: x.len(),
        report: aligned.report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::HeadlineRecord;
    use approx::assert_relative_eq;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 6, day).unwrap()
    }

    fn scored(day: u32, score: f64) -> ScoredHeadline {
        ScoredHeadline {
            record: HeadlineRecord::new(date(day), "headline"),
            score,
            label: None,
        }
    }

    #[test]
    fn test_pearson_perfect() {
        let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let y = vec![2.0, 4.0, 6.0, 8.0, 10.0];
        assert_relative_eq!(pearson(&x, &y), 1.0, epsilon = 1e-12);

        let inverse: Vec<f64> = y.iter().map(|v| -v).collect();
        assert_relative_eq!(pearson(&x, &inverse), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pearson_undefined() {
        assert!(pearson(&[1.0], &[2.0]).is_nan());
        assert!(pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]).is_nan());
        assert!(pearson(&[1.0, 2.0], &[1.0]).is_nan());
        assert!(pearson(&[], &[]).is_nan());
    }

    #[test]
    fn test_pearson_inexact_constant_is_nan() {
        assert!(pearson(&[0.7, 0.7, 0.7], &[1.0, 2.0, 4.0]).is_nan());
        assert!(pearson(&[0.1; 3], &[1.0, 2.0, 4.0]).is_nan());
        assert!(pearson(&[1.0, 2.0, 4.0], &[0.1; 3]).is_nan());
    }

    #[test]
    fn test_pearson_skips_nan_pairs() {
        let x = vec![f64::NAN, 1.0, 2.0, 3.0];
        let y = vec![5.0, 10.0, 20.0, 30.0];
        assert_relative_eq!(pearson(&x, &y), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_daily_mean_sentiment() {
        let news = vec![scored(2, 0.2), scored(1, 0.5), scored(2, 0.4)];
        let means = daily_mean_sentiment(&news);

        assert_eq!(means.len(), 2);
        assert_relative_eq!(means[&date(1)], 0.5);
        assert_relative_eq!(means[&date(2)], 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_correlation_co_moving() {
        // returns: NaN, 10, -10, 20, 5
        let closes = [100.0, 110.0, 99.0, 118.8, 124.74];
        let dates: Vec<NaiveDate> = (1..=5).map(date).collect();
        let prices = PriceSeries::from_closes("AAPL", &dates, &closes);

        let news = vec![
            scored(1, 0.9),
            scored(2, 0.1),
            scored(3, -0.1),
            scored(4, 0.2),
            scored(5, 0.05),
        ];

        let result = calculate_correlation(&news, &[prices]).unwrap();
        assert_eq!(result.points, 4);
        assert_relative_eq!(result.coefficient, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_correlation_zero_variance_is_nan() {
        // returns: NaN, 10, 10
        let dates: Vec<NaiveDate> = (1..=3).map(date).collect();
        let prices = PriceSeries::from_closes("X", &dates, &[100.0, 110.0, 121.0]);
        let news = vec![scored(1, 0.1), scored(2, 0.2), scored(3, 0.3)];

        let result = calculate_correlation(&news, &[prices]).unwrap();
        assert_eq!(result.points, 2);
        assert!(!result.is_defined());
    }

    #[test]
    fn test_correlation_constant_sentiment_is_nan() {
        // returns: NaN, 10, -10, 20
        let dates: Vec<NaiveDate> = (1..=4).map(date).collect();
        let prices = PriceSeries::from_closes("X", &dates, &[100.0, 110.0, 99.0, 118.8]);
        let news: Vec<ScoredHeadline> = (1..=4).map(|day| scored(day, 0.7)).collect();

        let result = calculate_correlation(&news, &[prices]).unwrap();
        assert_eq!(result.points, 3);
        assert!(!result.is_defined());
    }

    #[test]
    fn test_correlation_no_overlap() {
        let prices = PriceSeries::from_closes("X", &[date(10)], &[100.0]);
        let news = vec![scored(1, 0.1)];
        let result = calculate_correlation(&news, &[prices]).unwrap();
        assert_eq!(result.points, 0);
        assert!(result.coefficient.is_nan());
    }

    #[test]
    fn test_correlation_requires_series() {
        let news = vec![scored(1, 0.1)];
        assert!(matches!(
            calculate_correlation(&news, &[]),
            Err(AnalysisError::NoPriceSeries)
        ));
    }
}
