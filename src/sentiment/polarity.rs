//! # Polarity Scorer
//!
//! Pattern-style polarity over an adjective lexicon:
//!
//! 1. Each known word contributes its polarity and subjectivity
//! 2. An intensifier ("very", "extremely") scales the next known word
//! 3. A negation ("not", "never", "n't") multiplies the next known word's
//!    polarity by -0.5; any other unknown word longer than one letter
//!    cancels it
//! 4. The text score is the mean over contributing words, 0.0 when none

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Polarity multiplier for a negated word
const NEGATION_FACTOR: f64 = -0.5;

/// Lexicon entry
#[derive(Debug, Clone, Copy, PartialEq)]
struct WordSentiment {
    polarity: f64,
    subjectivity: f64,
}

/// Polarity and subjectivity of a text
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarityScores {
    /// Polarity in [-1, 1]
    pub polarity: f64,
    /// Subjectivity in [0, 1]
    pub subjectivity: f64,
    /// Number of words that contributed
    pub assessed: usize,
}

/// Adjective polarity lexicon
///
/// Obtain it through [`super::resources::init_polarity_lexicon`].
#[derive(Debug)]
pub struct PolarityLexicon {
    /// Word to polarity/subjectivity mapping
    words: HashMap<&'static str, WordSentiment>,
    /// Intensifier multipliers
    intensifiers: HashMap<&'static str, f64>,
    /// Negation words
    negations: Vec<&'static str>,
}

impl PolarityLexicon {
    pub(super) fn new() -> Self {
        let words = ADJECTIVES
            .iter()
            .map(|&(word, polarity, subjectivity)| {
                (
                    word,
                    WordSentiment {
                        polarity,
                        subjectivity,
                    },
                )
            })
            .collect();

        Self {
            words,
            intensifiers: INTENSIFIERS.iter().copied().collect(),
            negations: vec!["not", "no", "never", "nothing", "nor", "without", "cannot"],
        }
    }

    fn is_negation(&self, word: &str) -> bool {
        self.negations.iter().any(|n| *n == word) || word.ends_with("n't")
    }

    /// Number of sentiment-bearing words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the lexicon is empty
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Polarity and subjectivity of a text
    pub fn sentiment(&self, text: &str) -> PolarityScores {
        let mut polarity_sum = 0.0;
        let mut subjectivity_sum = 0.0;
        let mut assessed = 0usize;

        let mut negated = false;
        let mut intensity: Option<f64> = None;

        let mut boundary = false;

        for token in text.split_whitespace() {
            // pending modifiers do not cross a sentence boundary
            if boundary {
                negated = false;
                intensity = None;
            }
            boundary = token.ends_with(['.', '!', '?', ';']);

            let word = token
                .trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
                .to_lowercase();
            if word.is_empty() {
                continue;
            }

            if self.is_negation(&word) {
                negated = true;
                continue;
            }

            if let Some(&mult) = self.intensifiers.get(word.as_str()) {
                intensity = Some(intensity.unwrap_or(1.0) * mult);
                continue;
            }

            let Some(entry) = self.words.get(word.as_str()) else {
                // negation carries across single-letter words only ("not a good")
                if word.chars().count() > 1 {
                    negated = false;
                }
                intensity = None;
                continue;
            };

            let mut polarity = entry.polarity;
            let mut subjectivity = entry.subjectivity;

            if let Some(mult) = intensity.take() {
                polarity = (polarity * mult).clamp(-1.0, 1.0);
                subjectivity = (subjectivity * mult).clamp(0.0, 1.0);
            }
            if negated {
                polarity *= NEGATION_FACTOR;
                negated = false;
            }

            polarity_sum += polarity;
            subjectivity_sum += subjectivity;
            assessed += 1;
        }

        if assessed == 0 {
            return PolarityScores {
                polarity: 0.0,
                subjectivity: 0.0,
                assessed: 0,
            };
        }

        PolarityScores {
            polarity: (polarity_sum / assessed as f64).clamp(-1.0, 1.0),
            subjectivity: (subjectivity_sum / assessed as f64).clamp(0.0, 1.0),
            assessed,
        }
    }

    /// Polarity only
    pub fn polarity(&self, text: &str) -> f64 {
        self.sentiment(text).polarity
    }
}

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("extremely", 1.5),
    ("incredibly", 1.5),
    ("highly", 1.3),
    ("hugely", 1.4),
    ("most", 1.2),
    ("more", 1.1),
    ("so", 1.2),
    ("too", 1.1),
    ("quite", 1.1),
    ("slightly", 0.5),
    ("somewhat", 0.7),
    ("fairly", 0.8),
    ("marginally", 0.5),
];

/// (word, polarity, subjectivity)
const ADJECTIVES: &[(&str, f64, f64)] = &[
    ("good", 0.7, 0.6),
    ("great", 0.8, 0.75),
    ("excellent", 1.0, 1.0),
    ("best", 1.0, 0.3),
    ("better", 0.5, 0.5),
    ("amazing", 0.6, 0.9),
    ("awesome", 1.0, 1.0),
    ("wonderful", 1.0, 1.0),
    ("fantastic", 0.4, 0.9),
    ("impressive", 1.0, 1.0),
    ("nice", 0.6, 1.0),
    ("happy", 0.8, 1.0),
    ("positive", 0.227, 0.545),
    ("strong", 0.433, 0.733),
    ("stronger", 0.3, 0.6),
    ("solid", 0.1, 0.2),
    ("robust", 0.4, 0.5),
    ("healthy", 0.5, 0.5),
    ("stable", 0.2, 0.4),
    ("safe", 0.5, 0.5),
    ("successful", 0.75, 0.95),
    ("profitable", 0.5, 0.6),
    ("favorable", 0.4, 0.6),
    ("optimistic", 0.5, 0.7),
    ("bullish", 0.5, 0.6),
    ("upbeat", 0.5, 0.6),
    ("undervalued", 0.3, 0.6),
    ("attractive", 0.4, 0.75),
    ("high", 0.16, 0.54),
    ("higher", 0.25, 0.5),
    ("highest", 0.2, 0.6),
    ("huge", 0.4, 0.9),
    ("large", 0.214, 0.429),
    ("big", 0.0, 0.1),
    ("new", 0.136, 0.454),
    ("top", 0.5, 0.5),
    ("record", 0.2, 0.3),
    ("significant", 0.375, 0.875),
    ("important", 0.4, 1.0),
    ("free", 0.4, 0.8),
    ("right", 0.286, 0.536),
    ("fine", 0.417, 0.5),
    ("bad", -0.7, 0.667),
    ("worse", -0.4, 0.6),
    ("worst", -1.0, 1.0),
    ("poor", -0.4, 0.6),
    ("weak", -0.375, 0.625),
    ("weaker", -0.3, 0.5),
    ("negative", -0.3, 0.4),
    ("terrible", -1.0, 1.0),
    ("awful", -1.0, 1.0),
    ("horrible", -1.0, 1.0),
    ("disappointing", -0.6, 0.7),
    ("sad", -0.5, 1.0),
    ("wrong", -0.5, 0.9),
    ("low", 0.0, 0.3),
    ("lower", 0.0, 0.0),
    ("lowest", -0.1, 0.3),
    ("small", -0.25, 0.4),
    ("volatile", -0.2, 0.6),
    ("risky", -0.4, 0.7),
    ("uncertain", -0.2, 0.6),
    ("bearish", -0.5, 0.6),
    ("pessimistic", -0.5, 0.7),
    ("gloomy", -0.5, 0.8),
    ("sluggish", -0.3, 0.6),
    ("overvalued", -0.3, 0.6),
    ("expensive", -0.5, 0.7),
    ("cheap", 0.4, 0.7),
    ("unprofitable", -0.5, 0.6),
    ("unfavorable", -0.4, 0.6),
    ("unsuccessful", -0.5, 0.7),
    ("dangerous", -0.6, 0.9),
    ("difficult", -0.5, 1.0),
    ("hard", -0.292, 0.542),
    ("serious", -0.333, 0.667),
    ("steep", -0.1, 0.3),
    ("sharp", -0.125, 0.5),
    ("dull", -0.3, 0.6),
    ("worried", -0.5, 0.8),
];
