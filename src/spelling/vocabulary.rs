//! The set of known correct words.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::spelling::corpus::TrainingPair;

/// Known correct words in first-seen order, without duplicates.
///
/// Iteration order matters: constrained correction breaks score ties in
/// favour of the word that appears first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Vocabulary {
    words: Vec<String>,
    index: HashSet<String>,
}

impl Vocabulary {
    /// Create an empty vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a vocabulary from the correct side of training pairs.
    pub fn from_pairs(pairs: &[TrainingPair]) -> Self {
        pairs.iter().map(|pair| pair.correct.clone()).collect()
    }

    /// Add a word. Returns `false` if it was already present.
    pub fn insert<S: Into<String>>(&mut self, word: S) -> bool {
        let word = word.into();
        if self.index.contains(&word) {
            return false;
        }
        self.index.insert(word.clone());
        self.words.push(word);
        true
    }

    /// Check if a word is in the vocabulary.
    pub fn contains(&self, word: &str) -> bool {
        self.index.contains(word)
    }

    /// Iterate over words in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Iterate over words with exactly `len` characters, in insertion order.
    pub fn with_length(&self, len: usize) -> impl Iterator<Item = &str> {
        self.iter().filter(move |word| word.chars().count() == len)
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the vocabulary has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl PartialEq for Vocabulary {
    fn eq(&self, other: &Self) -> bool {
        self.words == other.words
    }
}

impl<S: Into<String>> FromIterator<S> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut vocabulary = Vocabulary::new();
        for word in iter {
            vocabulary.insert(word);
        }
        vocabulary
    }
}

impl From<Vec<String>> for Vocabulary {
    fn from(words: Vec<String>) -> Self {
        words.into_iter().collect()
    }
}

impl From<Vocabulary> for Vec<String> {
    fn from(vocabulary: Vocabulary) -> Self {
        vocabulary.words
    }
}
