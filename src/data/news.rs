//! # Headline Records
//!
//! Cleaned and scored news headlines.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::preprocessing::clean_headline;
use crate::sentiment::SentimentLabel;

/// A news headline as produced by the loader
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadlineRecord {
    /// Publication date (calendar date, time of day discarded)
    pub date: NaiveDate,
    /// Headline exactly as it appeared in the source
    pub headline: String,
    /// Lowercased headline with punctuation removed
    pub cleaned_headline: String,
    /// Article URL, when the source has one
    pub url: Option<String>,
    /// Publisher name
    pub publisher: Option<String>,
    /// Ticker the headline was filed under
    pub stock: Option<String>,
}

impl HeadlineRecord {
    /// Create a record, deriving the cleaned headline from the raw one
    pub fn new(date: NaiveDate, headline: impl Into<String>) -> Self {
        let headline = headline.into();
        let cleaned_headline = clean_headline(&headline);
        Self {
            date,
            headline,
            cleaned_headline,
            url: None,
            publisher: None,
            stock: None,
        }
    }

    /// Set URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set publisher
    pub fn with_publisher(mut self, publisher: impl Into<String>) -> Self {
        self.publisher = Some(publisher.into());
        self
    }

    /// Set stock ticker
    pub fn with_stock(mut self, stock: impl Into<String>) -> Self {
        self.stock = Some(stock.into());
        self
    }
}

/// A headline together with its sentiment score
///
/// The compound scorer fills `label`; the polarity scorer leaves it empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredHeadline {
    /// The underlying headline
    pub record: HeadlineRecord,
    /// Polarity score, typically in [-1, 1]
    pub score: f64,
    /// Three-way classification of the score
    pub label: Option<SentimentLabel>,
}

impl ScoredHeadline {
    /// Calendar date of the headline
    pub fn date(&self) -> NaiveDate {
        self.record.date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_is_cleaned() {
        let date = NaiveDate::from_ymd_opt(2020, 6, 5).unwrap();
        let record = HeadlineRecord::new(date, "Stocks That Hit 52-Week Highs On Friday!");
        assert_eq!(record.cleaned_headline, "stocks that hit 52week highs on friday");
        assert_eq!(record.headline, "Stocks That Hit 52-Week Highs On Friday!");
    }

    #[test]
    fn test_builder_fields() {
        let date = NaiveDate::from_ymd_opt(2020, 6, 5).unwrap();
        let record = HeadlineRecord::new(date, "x")
            .with_publisher("Benzinga Insights")
            .with_stock("A");
        assert_eq!(record.publisher.as_deref(), Some("Benzinga Insights"));
        assert_eq!(record.stock.as_deref(), Some("A"));
        assert!(record.url.is_none());
    }
}
