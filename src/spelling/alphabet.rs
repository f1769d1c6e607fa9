//! The symbol set shared by the emission and transition models.
//!
//! Hidden states are the 26 lowercase ASCII letters plus two boundary
//! sentinels. The sentinels only ever appear as transition endpoints: nothing
//! is emitted from `Start` or `End`, and no observed character maps to them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of letters in the alphabet.
pub const ALPHABET_SIZE: usize = 26;

/// A hidden-state symbol.
///
/// The derived ordering puts `Start` first, the letters in ascending order,
/// and `End` last. Decoding relies on the letter order to break ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Symbol {
    /// Boundary state preceding the first letter of a word.
    Start,
    /// A letter, stored as its index (`0` is `a`, `25` is `z`).
    Letter(u8),
    /// Boundary state following the last letter of a word.
    End,
}

impl Symbol {
    /// Map a character to its letter symbol.
    ///
    /// Only `a`..=`z` are letters; everything else (digits, punctuation,
    /// uppercase, non-ASCII) returns `None`.
    pub fn letter(ch: char) -> Option<Symbol> {
        if ch.is_ascii_lowercase() {
            Some(Symbol::Letter(ch as u8 - b'a'))
        } else {
            None
        }
    }

    /// The letter symbol at `index` in alphabet order.
    ///
    /// # Panics
    ///
    /// Panics if `index >= ALPHABET_SIZE`.
    pub fn letter_at(index: usize) -> Symbol {
        assert!(index < ALPHABET_SIZE, "letter index {index} out of range");
        Symbol::Letter(index as u8)
    }

    /// Iterate over all letter symbols in ascending alphabet order.
    pub fn letters() -> impl Iterator<Item = Symbol> + Clone {
        (0..ALPHABET_SIZE as u8).map(Symbol::Letter)
    }

    /// The alphabet index of a letter symbol.
    pub fn index(self) -> Option<usize> {
        match self {
            Symbol::Letter(i) => Some(i as usize),
            _ => None,
        }
    }

    /// The character of a letter symbol.
    pub fn as_char(self) -> Option<char> {
        match self {
            Symbol::Letter(i) => Some((b'a' + i) as char),
            _ => None,
        }
    }

    /// Whether this symbol is one of the boundary sentinels.
    pub fn is_sentinel(self) -> bool {
        !matches!(self, Symbol::Letter(_))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Start => write!(f, "<S>"),
            Symbol::End => write!(f, "<E>"),
            Symbol::Letter(i) => write!(f, "{}", (b'a' + i) as char),
        }
    }
}
