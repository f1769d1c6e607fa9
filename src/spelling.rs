//! Noisy-channel spelling correction.
//!
//! A model is learned from pairs of correct words and their observed
//! misspellings. It can then either decode any observed word into the most
//! likely letter sequence, or pick the vocabulary word that best explains
//! it. All probabilities live in natural-log space and negative infinity
//! marks an impossible alignment.

pub mod alphabet;
pub mod cache;
pub mod corpus;
pub mod corrector;
pub mod decoder;
pub mod emission;
pub mod log_prob;
pub mod model;
pub mod scorer;
pub mod table;
pub mod text;
pub mod transition;
pub mod vocabulary;

// Re-export commonly used types
pub use alphabet::{ALPHABET_SIZE, Symbol};
pub use cache::{CacheStats, CachedScorer, DEFAULT_CACHE_SIZE_LIMIT, ScoreCache};
pub use corpus::{TrainingPair, load_corpus, parse_corpus, parse_line};
pub use corrector::{Suggestion, best_candidate, correct_word, correct_word_with, rank_candidates};
pub use decoder::{Decoded, ViterbiDecoder, decode};
pub use emission::EmissionModel;
pub use model::{ModelStats, NoisyChannelModel};
pub use scorer::{CandidateScorer, ChannelScorer, ScoreBreakdown, score};
pub use table::LogProbTable;
pub use text::{correct_lines, correct_text, correct_text_with};
pub use transition::TransitionModel;
pub use vocabulary::Vocabulary;
