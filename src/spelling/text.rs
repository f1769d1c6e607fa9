//! Free-text correction built on per-word constrained correction.

use rayon::prelude::*;

use crate::spelling::corrector::correct_word_with;
use crate::spelling::emission::EmissionModel;
use crate::spelling::scorer::{CandidateScorer, ChannelScorer};
use crate::spelling::transition::TransitionModel;
use crate::spelling::vocabulary::Vocabulary;

/// Correct every whitespace-separated token of `text` with a custom scorer.
///
/// The text is lower-cased first. Tokens are corrected independently and
/// rejoined with single spaces. Punctuation is not stripped, so a token like
/// `teh,` is matched against four-letter words.
pub fn correct_text_with<S>(text: &str, vocabulary: &Vocabulary, scorer: &S) -> String
where
    S: CandidateScorer + ?Sized,
{
    text.to_lowercase()
        .split_whitespace()
        .map(|token| correct_word_with(token, vocabulary, scorer))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Correct every whitespace-separated token of `text`.
pub fn correct_text(
    text: &str,
    emission: &EmissionModel,
    transition: &TransitionModel,
    vocabulary: &Vocabulary,
) -> String {
    correct_text_with(text, vocabulary, &ChannelScorer::new(emission, transition))
}

/// Correct many independent lines, optionally in parallel.
///
/// The output has one entry per input line, in input order.
pub fn correct_lines<S, L>(
    lines: &[L],
    vocabulary: &Vocabulary,
    scorer: &S,
    parallel: bool,
) -> Vec<String>
where
    S: CandidateScorer + Sync + ?Sized,
    L: AsRef<str> + Sync,
{
    if parallel {
        lines
            .par_iter()
            .map(|line| correct_text_with(line.as_ref(), vocabulary, scorer))
            .collect()
    } else {
        lines
            .iter()
            .map(|line| correct_text_with(line.as_ref(), vocabulary, scorer))
            .collect()
    }
}
