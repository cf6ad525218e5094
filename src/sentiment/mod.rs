//! # Sentiment Analysis Module
//!
//! Two alternative headline scorers:
//!
//! - [`compound`] - VADER compound score over the cleaned headline, with a
//!   three-way label
//! - [`polarity`] - adjective-lexicon polarity over the raw headline, used
//!   for correlation
//!
//! The scorers are independent; callers pick one with [`ScoringMethod`].
//! Both lexicons come from the explicit initialization step in
//! [`resources`].

pub mod compound;
pub mod polarity;
pub mod resources;

pub use compound::{CompoundLexicon, CompoundScores};
pub use polarity::{PolarityLexicon, PolarityScores};
pub use resources::{init_compound_lexicon, init_lexicons, init_polarity_lexicon, Initialized, Lexicons};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::data::{HeadlineRecord, ScoredHeadline};

/// Scores above this are Positive
pub const POSITIVE_THRESHOLD: f64 = 0.05;

/// Scores below this are Negative
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

/// Three-way sentiment classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// Classify a score with the fixed ±0.05 thresholds
    ///
    /// NaN is Neutral.
    pub fn from_score(score: f64) -> Self {
        if score > POSITIVE_THRESHOLD {
            SentimentLabel::Positive
        } else if score < NEGATIVE_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Negative => "Negative",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which scorer to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMethod {
    /// VADER compound score over the cleaned headline, labelled
    Compound,
    /// Lexicon polarity over the raw headline, unlabelled
    #[default]
    Polarity,
}

impl FromStr for ScoringMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "compound" | "vader" => Ok(ScoringMethod::Compound),
            "polarity" => Ok(ScoringMethod::Polarity),
            other => Err(format!("unknown scoring method `{}` (expected compound or polarity)", other)),
        }
    }
}

impl fmt::Display for ScoringMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringMethod::Compound => f.write_str("compound"),
            ScoringMethod::Polarity => f.write_str("polarity"),
        }
    }
}

/// Score a batch of headlines with the chosen method
pub fn score_headlines(
    records: &[HeadlineRecord],
    method: ScoringMethod,
    lexicons: &Lexicons,
) -> Vec<ScoredHeadline> {
    records
        .iter()
        .map(|record| match method {
            ScoringMethod::Compound => {
                let score = lexicons.compound.compound(&record.cleaned_headline);
                ScoredHeadline {
                    record: record.clone(),
                    score,
                    label: Some(SentimentLabel::from_score(score)),
                }
            }
            ScoringMethod::Polarity => ScoredHeadline {
                record: record.clone(),
                score: lexicons.polarity.polarity(&record.headline),
                label: None,
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_label_thresholds() {
        assert_eq!(SentimentLabel::from_score(0.06), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_score(0.05), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_score(0.0), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_score(-0.05), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_score(-0.0501), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::from_score(f64::NAN), SentimentLabel::Neutral);
    }

    #[test]
    fn test_label_partition_is_exhaustive() {
        for i in -100..=100 {
            let score = i as f64 / 100.0;
            let label = SentimentLabel::from_score(score);
            let expected = if score > 0.05 {
                SentimentLabel::Positive
            } else if score < -0.05 {
                SentimentLabel::Negative
            } else {
                SentimentLabel::Neutral
            };
            assert_eq!(label, expected, "score {}", score);
        }
    }

    #[test]
    fn test_scoring_method_parse() {
        assert_eq!("compound".parse::<ScoringMethod>(), Ok(ScoringMethod::Compound));
        assert_eq!("VADER".parse::<ScoringMethod>(), Ok(ScoringMethod::Compound));
        assert_eq!("polarity".parse::<ScoringMethod>(), Ok(ScoringMethod::Polarity));
        assert!("textblob".parse::<ScoringMethod>().is_err());
    }

    #[test]
    fn test_score_headlines_methods() {
        let lexicons = init_lexicons();
        let date = NaiveDate::from_ymd_opt(2020, 6, 5).unwrap();
        let records = vec![
            HeadlineRecord::new(date, "Great quarter, excellent results"),
            HeadlineRecord::new(date, "Terrible guidance, awful outlook"),
        ];

        let compound = score_headlines(&records, ScoringMethod::Compound, &lexicons);
        assert_eq!(compound[0].label, Some(SentimentLabel::Positive));
        assert_eq!(compound[1].label, Some(SentimentLabel::Negative));

        let polarity = score_headlines(&records, ScoringMethod::Polarity, &lexicons);
        assert!(polarity[0].score > 0.0);
        assert!(polarity[1].score < 0.0);
        assert!(polarity.iter().all(|s| s.label.is_none()));
    }
}
