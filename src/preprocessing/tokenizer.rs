//! Tokenization for topic modeling
//!
//! Splits cleaned headlines into lowercase words, dropping single-character
//! tokens and English stop words.

use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

/// Tokenizer configuration and functionality
#[derive(Debug, Clone)]
pub struct Tokenizer {
    /// Stop words to filter out
    stop_words: HashSet<String>,
    /// Minimum token length in characters
    min_length: usize,
}

impl Tokenizer {
    /// Create a tokenizer with the default English stop words
    pub fn new() -> Self {
        Self {
            stop_words: default_stop_words(),
            min_length: 2,
        }
    }

    /// Create a tokenizer that keeps stop words
    pub fn without_stop_words() -> Self {
        Self {
            stop_words: HashSet::new(),
            min_length: 2,
        }
    }

    /// Add custom stop words
    pub fn add_stop_words(&mut self, words: &[&str]) {
        for word in words {
            self.stop_words.insert(word.to_lowercase());
        }
    }

    /// Set minimum token length
    pub fn min_length(mut self, len: usize) -> Self {
        self.min_length = len;
        self
    }

    /// Whether a word is filtered as a stop word
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Tokenize text into words
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.unicode_words()
            .map(str::to_lowercase)
            .filter(|word| word.chars().count() >= self.min_length && !self.is_stop_word(word))
            .collect()
    }

    /// Tokenize multiple documents
    pub fn tokenize_documents<S: AsRef<str>>(&self, documents: &[S]) -> Vec<Vec<String>> {
        documents.iter().map(|doc| self.tokenize(doc.as_ref())).collect()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Default English stop words
fn default_stop_words() -> HashSet<String> {
    let words = [
        // Articles
        "a", "an", "the",
        // Pronouns
        "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
        "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
        "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
        "who", "whom", "whose", "this", "that", "these", "those", "anyone", "everyone",
        "someone", "something", "nothing", "everything",
        // Verbs
        "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "having",
        "do", "does", "did", "doing", "would", "should", "could", "ought", "might", "must",
        "shall", "will", "can", "may", "get", "go", "put", "see", "seem", "seems", "become",
        // Prepositions
        "at", "by", "for", "from", "in", "into", "of", "on", "to", "with", "about", "against",
        "between", "during", "before", "after", "above", "below", "up", "down", "out", "off",
        "over", "under", "again", "further", "then", "once", "through", "across", "along",
        "among", "around", "behind", "beside", "beyond", "toward", "towards", "upon", "via",
        "within", "without",
        // Conjunctions
        "and", "but", "or", "nor", "so", "yet", "both", "either", "neither", "not", "only",
        "than", "when", "where", "while", "if", "because", "as", "until", "although",
        "though", "whether", "however", "therefore", "thus",
        // Other common words
        "here", "there", "all", "each", "few", "more", "most", "other", "some", "such", "no",
        "any", "own", "same", "too", "very", "just", "also", "now", "how", "why", "well",
        "many", "much", "every", "even", "still", "already", "ever", "never", "always",
        "often", "perhaps", "rather", "else", "etc", "per", "last", "first", "next", "one",
        "two", "three",
    ];

    words.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenizer_basic() {
        let tokenizer = Tokenizer::new();
        let tokens = tokenizer.tokenize("stocks that hit 52week highs on friday");

        assert!(!tokens.contains(&"that".to_string()));
        assert!(!tokens.contains(&"on".to_string()));
        assert_eq!(tokens, vec!["stocks", "hit", "52week", "highs", "friday"]);
    }

    #[test]
    fn test_single_characters_dropped() {
        let tokenizer = Tokenizer::without_stop_words();
        let tokens = tokenizer.tokenize("agilent a shares up 3 x");
        assert_eq!(tokens, vec!["agilent", "shares", "up"]);
    }

    #[test]
    fn test_custom_stop_words() {
        let mut tokenizer = Tokenizer::new();
        tokenizer.add_stop_words(&["Shares"]);
        let tokens = tokenizer.tokenize("agilent shares rise");
        assert_eq!(tokens, vec!["agilent", "rise"]);
    }

    #[test]
    fn test_tokenize_documents() {
        let tokenizer = Tokenizer::new();
        let docs = vec!["apple earnings beat", "tesla deliveries miss"];
        let tokenized = tokenizer.tokenize_documents(&docs);
        assert_eq!(tokenized.len(), 2);
        assert_eq!(tokenized[1], vec!["tesla", "deliveries", "miss"]);
    }
}
