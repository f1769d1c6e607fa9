//! Sparse count and log-probability tables keyed by symbol pairs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::spelling::alphabet::Symbol;

/// One row of a table: successor (or observed) symbol to value.
pub type Row<V> = BTreeMap<Symbol, V>;

/// Co-occurrence counts accumulated during training.
#[derive(Debug, Clone, Default)]
pub struct SymbolCounts {
    rows: BTreeMap<Symbol, Row<u64>>,
}

impl SymbolCounts {
    /// Create an empty count table.
    pub fn new() -> Self {
        SymbolCounts {
            rows: BTreeMap::new(),
        }
    }

    /// Make sure a (possibly empty) row exists for `from`.
    pub fn ensure_row(&mut self, from: Symbol) {
        self.rows.entry(from).or_default();
    }

    /// Add one observation of `from -> to`.
    pub fn increment(&mut self, from: Symbol, to: Symbol) {
        *self.rows.entry(from).or_default().entry(to).or_insert(0) += 1;
    }

    /// Count recorded for `from -> to`.
    pub fn count(&self, from: Symbol, to: Symbol) -> u64 {
        self.rows
            .get(&from)
            .and_then(|row| row.get(&to))
            .copied()
            .unwrap_or(0)
    }

    /// Sum of all counts in the row for `from`.
    pub fn row_total(&self, from: Symbol) -> u64 {
        self.rows.get(&from).map(|row| row.values().sum()).unwrap_or(0)
    }

    /// Convert every row into log-probabilities.
    ///
    /// `log_prob` receives an entry's count and its row total. Rows with a
    /// zero total stay present but empty.
    pub fn into_log_probs<F>(self, log_prob: F) -> LogProbTable
    where
        F: Fn(u64, u64) -> f64,
    {
        let rows = self
            .rows
            .into_iter()
            .map(|(from, row)| {
                let total: u64 = row.values().sum();
                let row = row
                    .into_iter()
                    .map(|(to, count)| (to, log_prob(count, total)))
                    .collect();
                (from, row)
            })
            .collect();

        LogProbTable { rows }
    }
}

/// A sparse table of natural-log probabilities.
///
/// Missing rows and missing entries are both legal. [`LogProbTable::log_prob`]
/// resolves them to negative infinity, [`LogProbTable::get`] exposes the
/// absence directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogProbTable {
    rows: BTreeMap<Symbol, Row<f64>>,
}

impl LogProbTable {
    /// Create an empty table.
    pub fn new() -> Self {
        LogProbTable {
            rows: BTreeMap::new(),
        }
    }

    /// Raw lookup of `from -> to`.
    pub fn get(&self, from: Symbol, to: Symbol) -> Option<f64> {
        self.rows.get(&from)?.get(&to).copied()
    }

    /// Lookup of `from -> to`, with negative infinity for anything missing.
    pub fn log_prob(&self, from: Symbol, to: Symbol) -> f64 {
        self.log_prob_or(from, to, f64::NEG_INFINITY)
    }

    /// Lookup of `from -> to`, with `fallback` for anything missing.
    pub fn log_prob_or(&self, from: Symbol, to: Symbol, fallback: f64) -> f64 {
        self.get(from, to).unwrap_or(fallback)
    }

    /// The row for `from`, if one was created during training.
    pub fn row(&self, from: Symbol) -> Option<&Row<f64>> {
        self.rows.get(&from)
    }

    /// Whether a row exists for `from`.
    pub fn has_row(&self, from: Symbol) -> bool {
        self.rows.contains_key(&from)
    }

    /// Iterate over rows in symbol order.
    pub fn rows(&self) -> impl Iterator<Item = (Symbol, &Row<f64>)> {
        self.rows.iter().map(|(from, row)| (*from, row))
    }

    /// Number of rows, including empty ones.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of rows holding at least one entry.
    pub fn populated_row_count(&self) -> usize {
        self.rows.values().filter(|row| !row.is_empty()).count()
    }

    /// Total number of entries across all rows.
    pub fn entry_count(&self) -> usize {
        self.rows.values().map(|row| row.len()).sum()
    }

    /// Whether the table has no rows at all.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
