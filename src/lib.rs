//! # News Sentiment Correlation
//!
//! Library for relating financial news headline sentiment to stock price
//! movement.
//!
//! ## Modules
//!
//! - `data` - Headline and price CSV loading, daily returns
//! - `preprocessing` - Headline cleaning and tokenization
//! - `sentiment` - VADER compound and lexicon polarity scorers
//! - `indicators` - SMA, EMA, RSI, MACD and Bollinger Bands over price tables
//! - `analysis` - Date alignment, sentiment/return correlation, trends
//! - `topics` - TF-IDF and Latent Dirichlet Allocation over headlines
//! - `utils` - Configuration and logging
//!
//! ## Example Usage
//!
//! ```no_run
//! use news_sentiment::{
//!     calculate_correlation, init_lexicons, load_news, load_price_table, score_headlines,
//!     ScoringMethod,
//! };
//!
//! fn main() -> anyhow::Result<()> {
//!     let news = load_news("data/raw_analyst_ratings.csv");
//!     let lexicons = init_lexicons();
//!     let scored = score_headlines(&news, ScoringMethod::Polarity, &lexicons);
//!
//!     let prices = load_price_table("data/AAPL.csv")?.to_series("AAPL", "Close")?;
//!     let result = calculate_correlation(&scored, &[prices])?;
//!
//!     println!("Correlation: {:.4} over {} days", result.coefficient, result.points);
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod data;
pub mod indicators;
pub mod preprocessing;
pub mod sentiment;
pub mod topics;
pub mod utils;

// Re-exports for convenience
pub use analysis::{
    align_dates, calculate_correlation, daily_mean_sentiment, pearson, sentiment_trends,
    topic_trends, AlignedDataset, AlignmentReport, AnalysisError, CorrelationResult,
};
pub use data::{
    calculate_daily_returns, load_news, load_price_table, HeadlineRecord, LoaderError,
    PriceError, PriceSeries, PriceTable, ScoredHeadline,
};
pub use indicators::{
    calculate_bollinger_bands, calculate_ema, calculate_macd, calculate_rsi, calculate_sma,
    IndicatorError, IndicatorParams,
};
pub use preprocessing::{clean_headline, Tokenizer};
pub use sentiment::{
    init_lexicons, score_headlines, Lexicons, ScoringMethod, SentimentLabel,
};
pub use topics::{TopicError, TopicModel, TopicParams, TopicSummary};
pub use utils::{setup_logging, AppConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
