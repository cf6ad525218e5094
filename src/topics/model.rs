//! Headline topic modeling: tokenize, TF-IDF, LDA, summarize

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

use super::lda::{LatentDirichletAllocation, LdaConfig};
use super::vectorizer::TfIdfVectorizer;
use super::TopicError;
use crate::data::HeadlineRecord;
use crate::preprocessing::Tokenizer;

/// Topic modeling settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopicParams {
    /// Number of topics
    pub n_topics: usize,
    /// Random seed
    pub seed: u64,
    /// EM passes
    pub max_iter: usize,
    /// Terms listed per topic
    pub top_words: usize,
}

impl Default for TopicParams {
    fn default() -> Self {
        Self {
            n_topics: 5,
            seed: 42,
            max_iter: 10,
            top_words: 10,
        }
    }
}

/// Highest-weighted terms of one topic
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicSummary {
    /// Topic index
    pub index: usize,
    /// Terms in descending weight
    pub terms: Vec<String>,
}

impl fmt::Display for TopicSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Topic {}: {}", self.index, self.terms.join(", "))
    }
}

/// A fitted topic model over a set of headlines
#[derive(Debug)]
pub struct TopicModel {
    /// One summary per topic
    pub topics: Vec<TopicSummary>,
    /// Topic distribution per headline (rows sum to 1)
    pub doc_topics: Array2<f64>,
    /// TF-IDF matrix the model was fitted on
    pub tfidf: Array2<f64>,
    vectorizer: TfIdfVectorizer,
    lda: LatentDirichletAllocation,
}

impl TopicModel {
    /// Fit on the cleaned text of the given headlines
    pub fn fit(headlines: &[HeadlineRecord], params: &TopicParams) -> Result<Self, TopicError> {
        let texts: Vec<&str> = headlines
            .iter()
            .map(|h| h.cleaned_headline.as_str())
            .collect();
        Self::fit_texts(&texts, params)
    }

    /// Fit on already-cleaned texts
    pub fn fit_texts<S: AsRef<str>>(texts: &[S], params: &TopicParams) -> Result<Self, TopicError> {
        if params.n_topics == 0 {
            return Err(TopicError::InvalidTopicCount);
        }
        if texts.is_empty() {
            return Err(TopicError::EmptyCorpus);
        }

        let tokenizer = Tokenizer::new();
        let tokenized = tokenizer.tokenize_documents(texts);

        let mut vectorizer = TfIdfVectorizer::new();
        let tfidf = vectorizer.fit_transform(&tokenized)?;
        if vectorizer.vocabulary_size() == 0 {
            return Err(TopicError::EmptyVocabulary);
        }

        let config = LdaConfig::new(params.n_topics)
            .max_iter(params.max_iter)
            .random_seed(params.seed);
        let mut lda = LatentDirichletAllocation::new(config)?;
        let doc_topics = lda.fit_transform(&tfidf)?;

        let topics = lda
            .top_term_indices(params.top_words)?
            .into_iter()
            .enumerate()
            .map(|(index, indices)| TopicSummary {
                index,
                terms: indices
                    .into_iter()
                    .filter_map(|i| vectorizer.get_term(i).map(str::to_string))
                    .collect(),
            })
            .collect();

        info!(
            "Fitted {} topics over {} headlines ({} terms)",
            params.n_topics,
            texts.len(),
            vectorizer.vocabulary_size()
        );

        Ok(Self {
            topics,
            doc_topics,
            tfidf,
            vectorizer,
            lda,
        })
    }

    /// Topic distribution for new cleaned texts
    pub fn transform<S: AsRef<str>>(&self, texts: &[S]) -> Result<Array2<f64>, TopicError> {
        let tokenized = Tokenizer::new().tokenize_documents(texts);
        let tfidf = self.vectorizer.transform(&tokenized)?;
        self.lda.transform(&tfidf)
    }

    /// Most likely topic per headline
    pub fn dominant_topics(&self) -> Vec<usize> {
        self.doc_topics
            .rows()
            .into_iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .max_by(|a, b| a.1.total_cmp(b.1))
                    .map(|(k, _)| k)
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Fitted vocabulary in column order
    pub fn vocabulary(&self) -> &[String] {
        self.vectorizer.terms()
    }
}
