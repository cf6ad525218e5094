//! # Topic Modeling
//!
//! TF-IDF over tokenized headlines and Latent Dirichlet Allocation fitted by
//! batch variational Bayes.

pub mod lda;
pub mod model;
pub mod vectorizer;

pub use lda::{LatentDirichletAllocation, LdaConfig};
pub use model::{TopicModel, TopicParams, TopicSummary};
pub use vectorizer::TfIdfVectorizer;

use thiserror::Error;

/// Topic modeling errors
#[derive(Error, Debug)]
pub enum TopicError {
    #[error("number of topics must be positive")]
    InvalidTopicCount,

    #[error("no documents to model")]
    EmptyCorpus,

    #[error("vocabulary is empty after tokenization")]
    EmptyVocabulary,

    #[error("model not fitted yet")]
    NotFitted,

    #[error("expected {expected} terms, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}
