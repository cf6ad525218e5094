//! # Compound Scorer
//!
//! VADER (Valence Aware Dictionary and sEntiment Reasoner) scoring over the
//! pretrained VADER lexicon.

use serde::{Deserialize, Serialize};
use std::fmt;
use vader_sentiment::SentimentIntensityAnalyzer;

use super::SentimentLabel;

/// Full VADER breakdown for one text
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompoundScores {
    /// Proportion of negative sentiment
    pub neg: f64,
    /// Proportion of neutral sentiment
    pub neu: f64,
    /// Proportion of positive sentiment
    pub pos: f64,
    /// Normalized aggregate score in [-1, 1]
    pub compound: f64,
}

impl CompoundScores {
    /// Three-way label of the compound score
    pub fn label(&self) -> SentimentLabel {
        SentimentLabel::from_score(self.compound)
    }
}

/// The VADER lexicon and its rule set
///
/// Obtain it through [`super::resources::init_compound_lexicon`].
pub struct CompoundLexicon {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl CompoundLexicon {
    pub(super) fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }

    /// Score a text
    pub fn polarity_scores(&self, text: &str) -> CompoundScores {
        if text.trim().is_empty() {
            return CompoundScores {
                neg: 0.0,
                neu: 0.0,
                pos: 0.0,
                compound: 0.0,
            };
        }

        let scores = self.analyzer.polarity_scores(text);
        let get = |key: &str| scores.get(key).copied().unwrap_or(0.0);

        CompoundScores {
            neg: get("neg"),
            neu: get("neu"),
            pos: get("pos"),
            compound: get("compound").clamp(-1.0, 1.0),
        }
    }

    /// Compound score only
    pub fn compound(&self, text: &str) -> f64 {
        self.polarity_scores(text).compound
    }
}

impl fmt::Debug for CompoundLexicon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompoundLexicon").finish_non_exhaustive()
    }
}
