//! Exact scoring of one fixed (correct, observed) alignment.

use serde::{Deserialize, Serialize};

use crate::spelling::alphabet::Symbol;
use crate::spelling::emission::EmissionModel;
use crate::spelling::transition::TransitionModel;

/// Scores how well a candidate correct word explains an observed word.
///
/// Implementations must be pure: the same pair always yields the same score.
pub trait CandidateScorer {
    /// Joint log-probability of `candidate` being typed as `observed`.
    fn score(&self, candidate: &str, observed: &str) -> f64;
}

impl<T: CandidateScorer + ?Sized> CandidateScorer for &T {
    fn score(&self, candidate: &str, observed: &str) -> f64 {
        (**self).score(candidate, observed)
    }
}

/// The individual terms of a candidate score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// `Start -> c[0]`, `c[i-1] -> c[i]` and `c[L-1] -> End`; L + 1 terms.
    #[serde(with = "crate::spelling::log_prob::seq")]
    pub transitions: Vec<f64>,
    /// `c[i] -> o[i]` for each position; L terms.
    #[serde(with = "crate::spelling::log_prob::seq")]
    pub emissions: Vec<f64>,
}

impl ScoreBreakdown {
    /// Sum of all terms.
    pub fn total(&self) -> f64 {
        self.transitions.iter().chain(&self.emissions).sum()
    }
}

/// Scorer backed directly by the emission and transition tables.
#[derive(Debug, Clone, Copy)]
pub struct ChannelScorer<'a> {
    emission: &'a EmissionModel,
    transition: &'a TransitionModel,
}

impl<'a> ChannelScorer<'a> {
    /// Create a scorer over the given tables.
    pub fn new(emission: &'a EmissionModel, transition: &'a TransitionModel) -> Self {
        ChannelScorer {
            emission,
            transition,
        }
    }

    /// Every term of the score, or `None` when the lengths differ.
    ///
    /// Missing table entries contribute negative infinity. A candidate
    /// character outside the alphabet makes each term that touches it
    /// negative infinity.
    pub fn breakdown(&self, candidate: &str, observed: &str) -> Option<ScoreBreakdown> {
        let hidden: Vec<Option<Symbol>> = candidate.chars().map(Symbol::letter).collect();
        let observed: Vec<char> = observed.chars().collect();
        if hidden.len() != observed.len() {
            return None;
        }

        let mut transitions = Vec::with_capacity(hidden.len() + 1);
        let mut emissions = Vec::with_capacity(hidden.len());
        let mut prev = Some(Symbol::Start);

        for (&state, &seen) in hidden.iter().zip(&observed) {
            transitions.push(self.transition_term(prev, state));
            emissions.push(match state {
                Some(state) => self.emission.log_prob(state, seen),
                None => f64::NEG_INFINITY,
            });
            prev = state;
        }
        transitions.push(self.transition_term(prev, Some(Symbol::End)));

        Some(ScoreBreakdown {
            transitions,
            emissions,
        })
    }

    fn transition_term(&self, prev: Option<Symbol>, next: Option<Symbol>) -> f64 {
        match (prev, next) {
            (Some(prev), Some(next)) => self.transition.log_prob(prev, next),
            _ => f64::NEG_INFINITY,
        }
    }
}

impl CandidateScorer for ChannelScorer<'_> {
    fn score(&self, candidate: &str, observed: &str) -> f64 {
        self.breakdown(candidate, observed)
            .map(|breakdown| breakdown.total())
            .unwrap_or(f64::NEG_INFINITY)
    }
}

/// Joint log-probability of `candidate` being typed as `observed`.
///
/// Words of different length score negative infinity.
pub fn score(
    candidate: &str,
    observed: &str,
    emission: &EmissionModel,
    transition: &TransitionModel,
) -> f64 {
    ChannelScorer::new(emission, transition).score(candidate, observed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spelling::corpus::TrainingPair;

    fn sym(ch: char) -> Symbol {
        Symbol::letter(ch).unwrap()
    }

    fn models() -> (EmissionModel, TransitionModel) {
        let pairs = vec![
            TrainingPair::new("the", ["teh", "hte"]),
            TrainingPair::new("cat", ["cta"]),
        ];
        (EmissionModel::build(&pairs), TransitionModel::build(&pairs))
    }

    #[test]
    fn test_score_equals_sum_of_terms() {
        let (emission, transition) = models();

        let expected = transition.log_prob(Symbol::Start, sym('t'))
            + emission.log_prob(sym('t'), 't')
            + transition.log_prob(sym('t'), sym('h'))
            + emission.log_prob(sym('h'), 'e')
            + transition.log_prob(sym('h'), sym('e'))
            + emission.log_prob(sym('e'), 'h')
            + transition.log_prob(sym('e'), Symbol::End);

        let actual = score("the", "teh", &emission, &transition);
        assert!(expected.is_finite());
        assert!((actual - expected).abs() < 1e-12);
    }

    #[test]
    fn test_manual_three_letter_example() {
        let (emission, transition) = models();

        // Start row {t, c}, total 2; t row {h, End}, total 2; h row {e}; e row {End}.
        let start_t = (2.0f64 / 29.0).ln();
        let t_h = (2.0f64 / 29.0).ln();
        let h_e = (2.0f64 / 28.0).ln();
        let e_end = (2.0f64 / 28.0).ln();
        // t row {t: 1, h: 1, a: 1}; h row {e: 1, t: 1}; e row {h: 1, e: 1}.
        let t_t = (1.0f64 / 3.0).ln();
        let h_to_e = (1.0f64 / 2.0).ln();
        let e_to_h = (1.0f64 / 2.0).ln();

        let expected = start_t + t_h + h_e + e_end + t_t + h_to_e + e_to_h;
        let actual = score("the", "teh", &emission, &transition);
        assert!((actual - expected).abs() < 1e-12);
    }

    #[test]
    fn test_breakdown_term_counts() {
        let (emission, transition) = models();
        let scorer = ChannelScorer::new(&emission, &transition);

        let breakdown = scorer.breakdown("the", "teh").unwrap();
        assert_eq!(breakdown.transitions.len(), 4);
        assert_eq!(breakdown.emissions.len(), 3);
        assert_eq!(breakdown.total(), scorer.score("the", "teh"));
    }

    #[test]
    fn test_length_mismatch() {
        let (emission, transition) = models();
        assert_eq!(score("the", "th", &emission, &transition), f64::NEG_INFINITY);
        assert_eq!(score("cat", "catt", &emission, &transition), f64::NEG_INFINITY);
        assert!(
            ChannelScorer::new(&emission, &transition)
                .breakdown("a", "ab")
                .is_none()
        );
    }

    #[test]
    fn test_missing_entries_have_no_fallback() {
        let (emission, transition) = models();

        // c never emitted 't', even at the first position.
        assert_eq!(score("cat", "teh", &emission, &transition), f64::NEG_INFINITY);
        // Non-alphabetic candidate characters cannot be hidden states.
        assert_eq!(score("t-e", "teh", &emission, &transition), f64::NEG_INFINITY);
    }

    #[test]
    fn test_empty_words() {
        let (emission, transition) = models();
        let scorer = ChannelScorer::new(&emission, &transition);

        let breakdown = scorer.breakdown("", "").unwrap();
        assert_eq!(breakdown.transitions.len(), 1);
        assert!(breakdown.emissions.is_empty());
        assert_eq!(
            scorer.score("", ""),
            transition.log_prob(Symbol::Start, Symbol::End)
        );
    }
}
