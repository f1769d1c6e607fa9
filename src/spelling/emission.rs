//! Emission model: P(observed character | correct character).

use serde::{Deserialize, Serialize};

use crate::spelling::alphabet::Symbol;
use crate::spelling::corpus::TrainingPair;
use crate::spelling::table::{LogProbTable, Row, SymbolCounts};

/// Typo noise model estimated from position-aligned training pairs.
///
/// Every letter has a row. A letter that never appeared in an equal-length
/// pair keeps an empty row, so any lookup against it is a miss.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmissionModel {
    table: LogProbTable,
}

impl EmissionModel {
    /// Estimate emission probabilities from training pairs.
    ///
    /// Only misspellings with the same character count as the correct word
    /// contribute. Positions where either character is outside the alphabet
    /// are skipped.
    pub fn build(pairs: &[TrainingPair]) -> Self {
        let mut counts = SymbolCounts::new();
        for letter in Symbol::letters() {
            counts.ensure_row(letter);
        }

        for pair in pairs {
            let correct_len = pair.correct.chars().count();
            for observed in &pair.misspellings {
                if observed.chars().count() != correct_len {
                    continue;
                }
                for (c, o) in pair.correct.chars().zip(observed.chars()) {
                    if let (Some(c), Some(o)) = (Symbol::letter(c), Symbol::letter(o)) {
                        counts.increment(c, o);
                    }
                }
            }
        }

        let table = counts.into_log_probs(|count, total| (count as f64 / total as f64).ln());
        EmissionModel { table }
    }

    /// Raw lookup of log P(`observed` | `correct`).
    ///
    /// `None` when the pair was never seen, including any `observed`
    /// character outside the alphabet.
    pub fn get(&self, correct: Symbol, observed: char) -> Option<f64> {
        self.table.get(correct, Symbol::letter(observed)?)
    }

    /// log P(`observed` | `correct`), negative infinity when unseen.
    pub fn log_prob(&self, correct: Symbol, observed: char) -> f64 {
        self.log_prob_or(correct, observed, f64::NEG_INFINITY)
    }

    /// log P(`observed` | `correct`), `fallback` when unseen.
    pub fn log_prob_or(&self, correct: Symbol, observed: char, fallback: f64) -> f64 {
        self.get(correct, observed).unwrap_or(fallback)
    }

    /// The emission row of a correct letter.
    pub fn row(&self, correct: Symbol) -> Option<&Row<f64>> {
        self.table.row(correct)
    }

    /// The underlying table.
    pub fn table(&self) -> &LogProbTable {
        &self.table
    }
}
