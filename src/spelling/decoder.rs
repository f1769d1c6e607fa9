//! Unconstrained Viterbi decoding of an observed word.
//!
//! The decoder searches every letter sequence of the observed length and
//! returns the one with the highest joint log-probability under the
//! emission and transition models. It never consults a vocabulary, so the
//! result need not be a real word.

use serde::{Deserialize, Serialize};

use crate::spelling::alphabet::{ALPHABET_SIZE, Symbol};
use crate::spelling::emission::EmissionModel;
use crate::spelling::transition::TransitionModel;

/// Log-probability used for an unseen emission at the first position.
///
/// Every later position, and the candidate scorer, treat an unseen emission
/// as negative infinity instead.
pub const FIRST_POSITION_EMISSION_FALLBACK: f64 = 0.0;

/// The most probable hidden sequence and its path score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decoded {
    /// Decoded letters, same length as the observed word.
    pub word: String,
    /// Total path log-probability, including the `End` transition.
    pub log_prob: f64,
}

/// Viterbi decoder over borrowed, immutable model tables.
#[derive(Debug, Clone, Copy)]
pub struct ViterbiDecoder<'a> {
    emission: &'a EmissionModel,
    transition: &'a TransitionModel,
}

impl<'a> ViterbiDecoder<'a> {
    /// Create a decoder over the given tables.
    pub fn new(emission: &'a EmissionModel, transition: &'a TransitionModel) -> Self {
        ViterbiDecoder {
            emission,
            transition,
        }
    }

    /// Decode `observed` into its most probable letter sequence.
    pub fn decode(&self, observed: &str) -> Decoded {
        let observed: Vec<char> = observed.chars().collect();
        let Some(&first) = observed.first() else {
            return Decoded {
                word: String::new(),
                log_prob: self.transition.log_prob(Symbol::Start, Symbol::End),
            };
        };

        // Letter-to-letter transitions are reused at every position.
        let mut transitions = [[f64::NEG_INFINITY; ALPHABET_SIZE]; ALPHABET_SIZE];
        for (prev, row) in transitions.iter_mut().enumerate() {
            for (next, cell) in row.iter_mut().enumerate() {
                *cell = self
                    .transition
                    .log_prob(Symbol::letter_at(prev), Symbol::letter_at(next));
            }
        }

        let mut scores = vec![[f64::NEG_INFINITY; ALPHABET_SIZE]; observed.len()];
        let mut backpointers = vec![[0usize; ALPHABET_SIZE]; observed.len()];

        for (c, score) in scores[0].iter_mut().enumerate() {
            let letter = Symbol::letter_at(c);
            *score = self.transition.log_prob(Symbol::Start, letter)
                + self
                    .emission
                    .log_prob_or(letter, first, FIRST_POSITION_EMISSION_FALLBACK);
        }

        for t in 1..observed.len() {
            for c in 0..ALPHABET_SIZE {
                // Strict comparison keeps the lowest letter on ties.
                let mut best_score = f64::NEG_INFINITY;
                let mut best_prev = 0usize;
                for p in 0..ALPHABET_SIZE {
                    let candidate = scores[t - 1][p] + transitions[p][c];
                    if candidate > best_score {
                        best_score = candidate;
                        best_prev = p;
                    }
                }
                scores[t][c] =
                    best_score + self.emission.log_prob(Symbol::letter_at(c), observed[t]);
                backpointers[t][c] = best_prev;
            }
        }

        let last = observed.len() - 1;
        let mut best_score = f64::NEG_INFINITY;
        let mut best_last = 0usize;
        for c in 0..ALPHABET_SIZE {
            let candidate =
                scores[last][c] + self.transition.log_prob(Symbol::letter_at(c), Symbol::End);
            if candidate > best_score {
                best_score = candidate;
                best_last = c;
            }
        }

        let mut path = vec![0usize; observed.len()];
        path[last] = best_last;
        for t in (1..observed.len()).rev() {
            path[t - 1] = backpointers[t][path[t]];
        }

        let word = path
            .into_iter()
            .filter_map(|c| Symbol::letter_at(c).as_char())
            .collect();

        Decoded {
            word,
            log_prob: best_score,
        }
    }
}

/// Decode `observed` into its most probable letter sequence.
pub fn decode(observed: &str, emission: &EmissionModel, transition: &TransitionModel) -> String {
    ViterbiDecoder::new(emission, transition).decode(observed).word
}
