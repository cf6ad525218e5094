//! # Analysis Module
//!
//! Date alignment of headlines with prices, sentiment/return correlation and
//! per-date trends.

mod aligner;
mod correlation;
mod trends;

pub use aligner::{align_dates, AlignedDataset, AlignedRow, AlignmentReport, SeriesDrop};
pub use correlation::{calculate_correlation, daily_mean_sentiment, pearson, CorrelationResult};
pub use trends::{sentiment_trends, topic_trends, SentimentTrend, TopicTrend};

use thiserror::Error;

/// Analysis errors
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("at least one price series is required")]
    NoPriceSeries,

    #[error("{headlines} headlines but {rows} topic rows")]
    LengthMismatch { headlines: usize, rows: usize },
}
