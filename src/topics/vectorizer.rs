//! TF-IDF vectorization of tokenized headlines
//!
//! Raw term counts weighted by smooth IDF, `ln((1 + n) / (1 + df)) + 1`,
//! with every row scaled to unit L2 norm. The vocabulary is sorted
//! alphabetically.

use hashbrown::HashMap;
use ndarray::Array2;
use std::collections::HashSet;

use super::TopicError;

/// TF-IDF Vectorizer
#[derive(Debug, Clone, Default)]
pub struct TfIdfVectorizer {
    /// Vocabulary: term -> index mapping
    vocabulary: HashMap<String, usize>,
    /// Inverse vocabulary: index -> term
    terms: Vec<String>,
    /// IDF weight per term
    idf_values: Vec<f64>,
    /// Minimum document frequency for term inclusion
    min_df: usize,
    /// Whether the vectorizer has been fitted
    is_fitted: bool,
}

impl TfIdfVectorizer {
    pub fn new() -> Self {
        Self {
            min_df: 1,
            ..Default::default()
        }
    }

    /// Set minimum document frequency
    pub fn min_df(mut self, min_df: usize) -> Self {
        self.min_df = min_df.max(1);
        self
    }

    /// Learn the vocabulary and IDF weights
    pub fn fit(&mut self, tokenized_docs: &[Vec<String>]) {
        let n_documents = tokenized_docs.len();

        let mut term_doc_freq: HashMap<&str, usize> = HashMap::new();
        for doc in tokenized_docs {
            let unique_terms: HashSet<&str> = doc.iter().map(String::as_str).collect();
            for term in unique_terms {
                *term_doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        let mut filtered_terms: Vec<(&str, usize)> = term_doc_freq
            .into_iter()
            .filter(|(_, df)| *df >= self.min_df)
            .collect();
        filtered_terms.sort_by(|a, b| a.0.cmp(b.0));

        self.vocabulary.clear();
        self.terms.clear();
        self.idf_values.clear();

        let n = n_documents as f64;
        for (idx, (term, df)) in filtered_terms.into_iter().enumerate() {
            self.vocabulary.insert(term.to_string(), idx);
            self.terms.push(term.to_string());
            self.idf_values.push(((1.0 + n) / (1.0 + df as f64)).ln() + 1.0);
        }

        self.is_fitted = true;
    }

    /// Transform tokenized documents into a (documents x terms) matrix
    ///
    /// Tokens outside the fitted vocabulary are ignored; a document with no
    /// known token stays an all-zero row.
    pub fn transform(&self, tokenized_docs: &[Vec<String>]) -> Result<Array2<f64>, TopicError> {
        if !self.is_fitted {
            return Err(TopicError::NotFitted);
        }

        let mut matrix = Array2::zeros((tokenized_docs.len(), self.terms.len()));

        for (doc_idx, doc) in tokenized_docs.iter().enumerate() {
            for term in doc {
                if let Some(&term_idx) = self.vocabulary.get(term.as_str()) {
                    matrix[[doc_idx, term_idx]] += 1.0;
                }
            }

            let mut row = matrix.row_mut(doc_idx);
            for (value, idf) in row.iter_mut().zip(&self.idf_values) {
                *value *= idf;
            }

            let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                row.mapv_inplace(|v| v / norm);
            }
        }

        Ok(matrix)
    }

    /// Fit and transform in one step
    pub fn fit_transform(&mut self, tokenized_docs: &[Vec<String>]) -> Result<Array2<f64>, TopicError> {
        self.fit(tokenized_docs);
        self.transform(tokenized_docs)
    }

    /// Get term by index
    pub fn get_term(&self, index: usize) -> Option<&str> {
        self.terms.get(index).map(String::as_str)
    }

    /// Terms in column order
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// IDF weight of a term
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|&idx| self.idf_values[idx])
    }

    /// Get vocabulary size
    pub fn vocabulary_size(&self) -> usize {
        self.terms.len()
    }
}
