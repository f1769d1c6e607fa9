//! Transition model: smoothed P(next character | previous character).

use serde::{Deserialize, Serialize};

use crate::spelling::alphabet::{ALPHABET_SIZE, Symbol};
use crate::spelling::corpus::TrainingPair;
use crate::spelling::table::{LogProbTable, Row, SymbolCounts};

/// Size of the successor space used by add-one smoothing: every letter plus `End`.
///
/// Smoothing over the alphabet alone would divide by `total + 26` and leave
/// `End` out. Counting it makes each smoothed row sum to exactly 1.
pub const SMOOTHING_SUCCESSORS: usize = ALPHABET_SIZE + 1;

/// Spelling regularity model estimated from correct words.
///
/// Entries are add-one smoothed, `(count + 1) / (total + SMOOTHING_SUCCESSORS)`,
/// but only for successors that were actually observed. A successor never
/// seen after a given symbol is absent from its row, and a symbol never seen
/// as a predecessor has no row. Both resolve to negative infinity on lookup.
///
/// The denominator counts `End` as a successor, so it is one larger than the
/// alphabet size (27, not 26). See [`SMOOTHING_SUCCESSORS`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitionModel {
    table: LogProbTable,
}

impl TransitionModel {
    /// Estimate transition probabilities from the correct side of training pairs.
    ///
    /// Each word contributes `Start -> first`, `letter -> next` and
    /// `last -> End`. A non-alphabetic character breaks the chain: the
    /// letter after it gets no incoming transition, and a word ending in one
    /// records no `End` transition.
    pub fn build(pairs: &[TrainingPair]) -> Self {
        let mut counts = SymbolCounts::new();

        for pair in pairs {
            let mut prev = Some(Symbol::Start);
            for ch in pair.correct.chars() {
                match Symbol::letter(ch) {
                    Some(letter) => {
                        if let Some(prev) = prev {
                            counts.increment(prev, letter);
                        }
                        prev = Some(letter);
                    }
                    None => prev = None,
                }
            }
            if let Some(prev) = prev {
                counts.increment(prev, Symbol::End);
            }
        }

        let table = counts.into_log_probs(|count, total| {
            ((count + 1) as f64 / (total + SMOOTHING_SUCCESSORS as u64) as f64).ln()
        });
        TransitionModel { table }
    }

    /// Raw lookup of log P(`next` | `prev`).
    pub fn get(&self, prev: Symbol, next: Symbol) -> Option<f64> {
        self.table.get(prev, next)
    }

    /// log P(`next` | `prev`), negative infinity when the row or entry is missing.
    pub fn log_prob(&self, prev: Symbol, next: Symbol) -> f64 {
        self.table.log_prob(prev, next)
    }

    /// The row of successors observed after `prev`.
    pub fn row(&self, prev: Symbol) -> Option<&Row<f64>> {
        self.table.row(prev)
    }

    /// The underlying table.
    pub fn table(&self) -> &LogProbTable {
        &self.table
    }
}
