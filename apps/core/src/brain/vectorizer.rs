//! Bag-of-words count vectorizer.
//!
//! `fit` learns a vocabulary from normalized training texts; `transform` turns
//! a normalized text into token counts over that vocabulary. Tokens unknown to
//! the vocabulary are ignored.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Default minimum token length, in characters. Single-character tokens are
/// not used as features.
pub const DEFAULT_MIN_TOKEN_LEN: usize = 2;

/// Token → column index mapping, fixed once fitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Vocabulary {
    tokens: Vec<String>,
    index: HashMap<String, usize>,
}

impl From<Vec<String>> for Vocabulary {
    fn from(tokens: Vec<String>) -> Self {
        Self::from_tokens(tokens)
    }
}

impl From<Vocabulary> for Vec<String> {
    fn from(vocabulary: Vocabulary) -> Self {
        vocabulary.tokens
    }
}

impl Vocabulary {
    fn from_tokens(tokens: Vec<String>) -> Self {
        let index = tokens
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i))
            .collect();
        Self { tokens, index }
    }

    /// Number of distinct tokens (feature vector length).
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Column index of `token`, if known.
    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.index.get(token).copied()
    }

    /// Token stored at column `index`.
    pub fn token(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    /// Tokens in column order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

/// Token counts over a [`Vocabulary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureVector(Vec<u32>);

impl FeatureVector {
    /// All-zero vector of the given length.
    pub fn zeros(len: usize) -> Self {
        Self(vec![0; len])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `true` when no vocabulary token was seen.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&c| c == 0)
    }

    pub fn counts(&self) -> &[u32] {
        &self.0
    }

    /// Iterates over `(index, count)` for non-zero entries.
    pub fn nonzero(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.0
            .iter()
            .copied()
            .enumerate()
            .filter(|&(_, c)| c > 0)
    }
}

impl From<Vec<u32>> for FeatureVector {
    fn from(counts: Vec<u32>) -> Self {
        Self(counts)
    }
}

/// Count vectorizer over whitespace-separated, already normalized text.
#[derive(Debug, Clone, Copy)]
pub struct CountVectorizer {
    min_token_len: usize,
}

impl Default for CountVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl CountVectorizer {
    pub fn new() -> Self {
        Self::with_min_token_len(DEFAULT_MIN_TOKEN_LEN)
    }

    pub fn with_min_token_len(min_token_len: usize) -> Self {
        Self {
            min_token_len: min_token_len.max(1),
        }
    }

    fn features<'a>(&self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        let min = self.min_token_len;
        text.split_whitespace()
            .filter(move |t| t.chars().count() >= min)
    }

    /// Builds a vocabulary from a normalized corpus, indexing tokens in order
    /// of first appearance.
    pub fn fit<S: AsRef<str>>(&self, corpus: &[S]) -> Vocabulary {
        let mut tokens: Vec<String> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();

        for text in corpus {
            for token in self.features(text.as_ref()) {
                if seen.insert(token) {
                    tokens.push(token.to_string());
                }
            }
        }

        Vocabulary::from_tokens(tokens)
    }

    /// Counts vocabulary tokens in a normalized text.
    pub fn transform(&self, text: &str, vocabulary: &Vocabulary) -> FeatureVector {
        let mut vector = FeatureVector::zeros(vocabulary.len());
        for token in self.features(text) {
            if let Some(i) = vocabulary.index_of(token) {
                vector.0[i] += 1;
            }
        }
        vector
    }

    /// Fits on `corpus` and transforms every text in it.
    pub fn fit_transform<S: AsRef<str>>(&self, corpus: &[S]) -> (Vocabulary, Vec<FeatureVector>) {
        let vocabulary = self.fit(corpus);
        let vectors = corpus
            .iter()
            .map(|text| self.transform(text.as_ref(), &vocabulary))
            .collect();
        (vocabulary, vectors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_assigns_first_appearance_order() {
        let vectorizer = CountVectorizer::new();
        let vocab = vectorizer.fit(&["good morning", "good evening", "see you later"]);

        assert_eq!(vocab.len(), 6);
        assert_eq!(vocab.index_of("good"), Some(0));
        assert_eq!(vocab.index_of("morning"), Some(1));
        assert_eq!(vocab.index_of("evening"), Some(2));
        assert_eq!(vocab.token(5), Some("later"));
    }

    #[test]
    fn test_single_character_tokens_are_not_features() {
        let vectorizer = CountVectorizer::new();
        let vocab = vectorizer.fit(&["i need assistance"]);
        assert_eq!(vocab.tokens(), &["need".to_string(), "assistance".to_string()]);

        let loose = CountVectorizer::with_min_token_len(1).fit(&["i need assistance"]);
        assert_eq!(loose.len(), 3);
    }

    #[test]
    fn test_transform_counts_and_drops_unknown_tokens() {
        let vectorizer = CountVectorizer::new();
        let vocab = vectorizer.fit(&["thank you", "see you later"]);

        let v = vectorizer.transform("you you thank zebra", &vocab);
        assert_eq!(v.counts(), &[1, 2, 0, 0]);
        assert_eq!(v.nonzero().collect::<Vec<_>>(), vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn test_transform_empty_text_is_all_zero() {
        let vectorizer = CountVectorizer::new();
        let vocab = vectorizer.fit(&["hello", "bye"]);

        let v = vectorizer.transform("", &vocab);
        assert_eq!(v.len(), vocab.len());
        assert!(v.is_zero());
    }

    #[test]
    fn test_transform_with_empty_vocabulary() {
        let vectorizer = CountVectorizer::new();
        let v = vectorizer.transform("hello world", &Vocabulary::default());
        assert!(v.is_empty());
        assert!(v.is_zero());
    }

    #[test]
    fn test_fit_transform() {
        let (vocab, vectors) = CountVectorizer::new().fit_transform(&["hi", "hi there"]);
        assert_eq!(vocab.len(), 2);
        assert_eq!(vectors[0].counts(), &[1, 0]);
        assert_eq!(vectors[1].counts(), &[1, 1]);
    }
}
