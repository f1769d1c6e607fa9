//! Dictionary-constrained correction.
//!
//! Instead of searching every letter sequence, the corrector only considers
//! vocabulary words with the same length as the observed word and picks the
//! one the noisy channel scores highest.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::spelling::emission::EmissionModel;
use crate::spelling::scorer::{CandidateScorer, ChannelScorer};
use crate::spelling::transition::TransitionModel;
use crate::spelling::vocabulary::Vocabulary;

/// A candidate correction with its joint log-probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// The suggested word.
    pub word: String,
    /// Score of the word against the observed input.
    #[serde(with = "crate::spelling::log_prob")]
    pub log_prob: f64,
}

impl Suggestion {
    /// Create a new suggestion.
    pub fn new(word: String, log_prob: f64) -> Self {
        Suggestion { word, log_prob }
    }
}

/// The highest-scoring vocabulary word of matching length.
///
/// Only a strictly higher score replaces the current best, so ties go to
/// the word that comes first in the vocabulary. `None` when no word has
/// the observed length.
pub fn best_candidate<S>(observed: &str, vocabulary: &Vocabulary, scorer: &S) -> Option<Suggestion>
where
    S: CandidateScorer + ?Sized,
{
    let len = observed.chars().count();
    let mut best: Option<(&str, f64)> = None;

    for candidate in vocabulary.with_length(len) {
        let log_prob = scorer.score(candidate, observed);
        match best {
            Some((_, best_score)) if log_prob <= best_score => {}
            _ => best = Some((candidate, log_prob)),
        }
    }

    best.map(|(word, log_prob)| Suggestion::new(word.to_string(), log_prob))
}

/// Correct one word against the vocabulary with a custom scorer.
///
/// Returns the observed word unchanged when no vocabulary word has its length.
pub fn correct_word_with<S>(observed: &str, vocabulary: &Vocabulary, scorer: &S) -> String
where
    S: CandidateScorer + ?Sized,
{
    best_candidate(observed, vocabulary, scorer)
        .map(|suggestion| suggestion.word)
        .unwrap_or_else(|| observed.to_string())
}

/// Correct one word against the vocabulary.
pub fn correct_word(
    observed: &str,
    emission: &EmissionModel,
    transition: &TransitionModel,
    vocabulary: &Vocabulary,
) -> String {
    correct_word_with(observed, vocabulary, &ChannelScorer::new(emission, transition))
}

/// Rank vocabulary words of matching length by score, best first.
///
/// Equal scores keep vocabulary order, so the head of the list is the same
/// word [`correct_word_with`] would pick.
pub fn rank_candidates_with<S>(
    observed: &str,
    vocabulary: &Vocabulary,
    scorer: &S,
    limit: usize,
) -> Vec<Suggestion>
where
    S: CandidateScorer + ?Sized,
{
    let len = observed.chars().count();
    let mut suggestions: Vec<Suggestion> = vocabulary
        .with_length(len)
        .map(|candidate| {
            Suggestion::new(candidate.to_string(), scorer.score(candidate, observed))
        })
        .collect();

    // Stable sort; scores are never NaN.
    suggestions.sort_by(|a, b| {
        b.log_prob
            .partial_cmp(&a.log_prob)
            .unwrap_or(Ordering::Equal)
    });
    suggestions.truncate(limit);
    suggestions
}

/// Rank vocabulary words of matching length by score, best first.
pub fn rank_candidates(
    observed: &str,
    emission: &EmissionModel,
    transition: &TransitionModel,
    vocabulary: &Vocabulary,
    limit: usize,
) -> Vec<Suggestion> {
    rank_candidates_with(
        observed,
        vocabulary,
        &ChannelScorer::new(emission, transition),
        limit,
    )
}
