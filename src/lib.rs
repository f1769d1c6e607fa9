//! # channelspell
//!
//! A noisy-channel, character-level spelling correction library.
//!
//! ## Features
//!
//! - Emission (typo) and transition (spelling) models learned from
//!   `correct: wrong1 wrong2` training pairs
//! - Exact Viterbi decoding of any observed word
//! - Dictionary-constrained correction and candidate ranking
//! - Free-text correction, batch correction in parallel
//! - Binary model persistence
//!
//! ## Example
//!
//! ```
//! use channelspell::spelling::{NoisyChannelModel, TrainingPair};
//!
//! let model = NoisyChannelModel::train(&[
//!     TrainingPair::new("the", ["teh", "hte"]),
//!     TrainingPair::new("cat", ["cta"]),
//! ]);
//! assert_eq!(model.correct_text("Teh cta"), "the cat");
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod spelling;

pub mod prelude {
    pub use crate::config::SpellerConfig;
    pub use crate::error::{ChannelSpellError, Result};
    pub use crate::spelling::{
        CandidateScorer, ChannelScorer, EmissionModel, NoisyChannelModel, Suggestion,
        TrainingPair, TransitionModel, Vocabulary,
    };
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
