//! Text normalization service
//!
//! Tokenize → lowercase → drop short tokens and English stopwords → stem.
//! Built once and shared (`Arc<TextNormalizer>`) by the text extractors.

use ahash::AHashSet;
use rust_stemmers::{Algorithm, Stemmer};
use unicode_segmentation::UnicodeSegmentation;

/// Tokens of this length or shorter are dropped
const MIN_TOKEN_LEN: usize = 2;

/// English stopword list (NLTK corpus)
const ENGLISH_STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

/// Stopword filter + Porter2 stemmer
pub struct TextNormalizer {
    stopwords: AHashSet<&'static str>,
    stemmer: Stemmer,
}

impl TextNormalizer {
    /// English normalizer
    pub fn english() -> Self {
        Self {
            stopwords: ENGLISH_STOPWORDS.iter().copied().collect(),
            stemmer: Stemmer::create(Algorithm::English),
        }
    }

    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }

    /// Normalized stems of `text`, in order of appearance (duplicates kept)
    pub fn normalize(&self, text: &str) -> Vec<String> {
        text.unicode_words()
            .map(str::to_lowercase)
            .filter(|token| token.chars().count() > MIN_TOKEN_LEN && !self.is_stopword(token))
            .map(|token| self.stemmer.stem(&token).into_owned())
            .collect()
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::english()
    }
}

impl std::fmt::Debug for TextNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextNormalizer")
            .field("stopwords", &self.stopwords.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drops_stopwords_and_short_tokens() {
        let normalizer = TextNormalizer::english();
        let tokens = normalizer.normalize("The duality of an M-theory on a torus");
        assert!(!tokens.iter().any(|t| t == "the" || t == "of" || t == "on"));
        assert!(!tokens.iter().any(|t| t.len() <= 2));
        assert_eq!(tokens.len(), 3); // duality, theory, torus
    }

    #[test]
    fn test_stems_inflections_together() {
        let normalizer = TextNormalizer::english();
        assert_eq!(normalizer.normalize("strings"), normalizer.normalize("string"));
        assert_eq!(
            normalizer.normalize("Compactifications"),
            normalizer.normalize("compactification")
        );
    }

    #[test]
    fn test_empty_text() {
        let normalizer = TextNormalizer::english();
        assert!(normalizer.normalize("").is_empty());
        assert!(normalizer.normalize("a an of").is_empty());
    }
}
