//! Text preprocessing module
//!
//! Headline cleaning for sentiment scoring and tokenization for topic
//! modeling.

mod cleaner;
mod tokenizer;

pub use cleaner::clean_headline;
pub use tokenizer::Tokenizer;
