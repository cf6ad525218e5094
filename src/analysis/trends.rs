//! # Trends
//!
//! Per-date sentiment label counts and mean topic weights.

use chrono::NaiveDate;
use ndarray::Array2;
use serde::Serialize;
use std::collections::BTreeMap;

use super::AnalysisError;
use crate::data::{HeadlineRecord, ScoredHeadline};
use crate::sentiment::SentimentLabel;

/// Label counts for one date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SentimentTrend {
    pub date: NaiveDate,
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl SentimentTrend {
    fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            positive: 0,
            neutral: 0,
            negative: 0,
        }
    }

    /// Headlines on this date
    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }
}

/// Mean topic weights for one date
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicTrend {
    pub date: NaiveDate,
    /// One weight per topic
    pub weights: Vec<f64>,
}

/// Count sentiment labels per date, ordered by date
///
/// Unlabelled headlines are classified from their score.
pub fn sentiment_trends(scored: &[ScoredHeadline]) -> Vec<SentimentTrend> {
    let mut by_date: BTreeMap<NaiveDate, SentimentTrend> = BTreeMap::new();

    for headline in scored {
        let date = headline.date();
        let trend = by_date
            .entry(date)
            .or_insert_with(|| SentimentTrend::empty(date));
        let label = headline
            .label
            .unwrap_or_else(|| SentimentLabel::from_score(headline.score));
        match label {
            SentimentLabel::Positive => trend.positive += 1,
            SentimentLabel::Neutral => trend.neutral += 1,
            SentimentLabel::Negative => trend.negative += 1,
        }
    }

    by_date.into_values().collect()
}

/// Mean topic distribution per date, ordered by date
///
/// `doc_topics` has one row per headline, in the same order.
pub fn topic_trends(
    headlines: &[HeadlineRecord],
    doc_topics: &Array2<f64>,
) -> Result<Vec<TopicTrend>, AnalysisError> {
    if headlines.len() != doc_topics.nrows() {
        return Err(AnalysisError::LengthMismatch {
            headlines: headlines.len(),
            rows: doc_topics.nrows(),
        });
    }

    let n_topics = doc_topics.ncols();
    let mut sums: BTreeMap<NaiveDate, (Vec<f64>, usize)> = BTreeMap::new();

    for (headline, row) in headlines.iter().zip(doc_topics.rows()) {
        let entry = sums
            .entry(headline.date)
            .or_insert_with(|| (vec![0.0; n_topics], 0));
        for (acc, weight) in entry.0.iter_mut().zip(row.iter()) {
            *acc += weight;
        }
        entry.1 += 1;
    }

    Ok(sums
        .into_iter()
        .map(|(date, (totals, count))| TopicTrend {
            date,
            weights: totals.into_iter().map(|t| t / count as f64).collect(),
        })
        .collect())
}
