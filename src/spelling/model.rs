//! A trained noisy-channel model and its persistence.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{ChannelSpellError, Result};
use crate::spelling::alphabet::{ALPHABET_SIZE, Symbol};
use crate::spelling::corpus::TrainingPair;
use crate::spelling::corrector::{self, Suggestion};
use crate::spelling::decoder::{Decoded, ViterbiDecoder};
use crate::spelling::emission::EmissionModel;
use crate::spelling::scorer::{CandidateScorer, ChannelScorer};
use crate::spelling::text;
use crate::spelling::transition::TransitionModel;
use crate::spelling::vocabulary::Vocabulary;

/// Emission table, transition table and vocabulary trained together.
///
/// The model is immutable once trained. Every operation borrows it, so one
/// instance can serve concurrent requests without locking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoisyChannelModel {
    emission: EmissionModel,
    transition: TransitionModel,
    vocabulary: Vocabulary,
}

/// Size information about a trained model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelStats {
    /// Number of distinct correct words.
    pub vocabulary_words: usize,
    /// Letters with at least one emission entry.
    pub emission_rows_populated: usize,
    /// Total emission entries.
    pub emission_entries: usize,
    /// Predecessor symbols with a transition row.
    pub transition_rows: usize,
    /// Total transition entries.
    pub transition_entries: usize,
}

impl NoisyChannelModel {
    /// Train a model from training pairs.
    pub fn train(pairs: &[TrainingPair]) -> Self {
        let model = NoisyChannelModel {
            emission: EmissionModel::build(pairs),
            transition: TransitionModel::build(pairs),
            vocabulary: Vocabulary::from_pairs(pairs),
        };

        let stats = model.stats();
        info!(
            "Trained model from {} pairs: {} words, {} emission entries, {} transition entries",
            pairs.len(),
            stats.vocabulary_words,
            stats.emission_entries,
            stats.transition_entries
        );
        model
    }

    /// Assemble a model from separately built parts.
    pub fn from_parts(
        emission: EmissionModel,
        transition: TransitionModel,
        vocabulary: Vocabulary,
    ) -> Self {
        NoisyChannelModel {
            emission,
            transition,
            vocabulary,
        }
    }

    /// The emission model.
    pub fn emission(&self) -> &EmissionModel {
        &self.emission
    }

    /// The transition model.
    pub fn transition(&self) -> &TransitionModel {
        &self.transition
    }

    /// The vocabulary.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// A scorer borrowing this model's tables.
    pub fn scorer(&self) -> ChannelScorer<'_> {
        ChannelScorer::new(&self.emission, &self.transition)
    }

    /// A Viterbi decoder borrowing this model's tables.
    pub fn decoder(&self) -> ViterbiDecoder<'_> {
        ViterbiDecoder::new(&self.emission, &self.transition)
    }

    /// Decode a word without vocabulary constraints.
    pub fn decode(&self, observed: &str) -> String {
        self.decoder().decode(observed).word
    }

    /// Decode a word and return its path score as well.
    pub fn decode_with_score(&self, observed: &str) -> Decoded {
        self.decoder().decode(observed)
    }

    /// Score a candidate correct word against an observed word.
    pub fn score(&self, candidate: &str, observed: &str) -> f64 {
        self.scorer().score(candidate, observed)
    }

    /// Correct a word to the best vocabulary entry of the same length.
    pub fn correct_word(&self, observed: &str) -> String {
        corrector::correct_word_with(observed, &self.vocabulary, &self.scorer())
    }

    /// Correct free text token by token.
    pub fn correct_text(&self, text: &str) -> String {
        text::correct_text_with(text, &self.vocabulary, &self.scorer())
    }

    /// Rank vocabulary words of matching length, best first.
    pub fn rank(&self, observed: &str, limit: usize) -> Vec<Suggestion> {
        corrector::rank_candidates_with(observed, &self.vocabulary, &self.scorer(), limit)
    }

    /// Size information about the model.
    pub fn stats(&self) -> ModelStats {
        ModelStats {
            vocabulary_words: self.vocabulary.len(),
            emission_rows_populated: self.emission.table().populated_row_count(),
            emission_entries: self.emission.table().entry_count(),
            transition_rows: self.transition.table().row_count(),
            transition_entries: self.transition.table().entry_count(),
        }
    }

    /// Save the model to a binary file.
    ///
    /// The model is written to a temporary sibling file first and then
    /// renamed over `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut temp_path = path.as_os_str().to_owned();
        temp_path.push(".tmp");

        let file = File::create(&temp_path)?;
        let mut writer = BufWriter::new(file);
        bincode::serialize_into(&mut writer, self)?;
        writer.flush()?;
        drop(writer);

        fs::rename(&temp_path, path)?;
        debug!("Saved model to {}", path.display());
        Ok(())
    }

    /// Load a model saved with [`NoisyChannelModel::save`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let model: NoisyChannelModel = bincode::deserialize_from(BufReader::new(file))?;
        model.validate()?;

        info!(
            "Loaded model from {} ({} words)",
            path.display(),
            model.vocabulary.len()
        );
        Ok(model)
    }

    /// Check structural invariants of a deserialized model.
    fn validate(&self) -> Result<()> {
        let table = self.emission.table();
        if table.row_count() != ALPHABET_SIZE || !Symbol::letters().all(|l| table.has_row(l)) {
            return Err(ChannelSpellError::model(format!(
                "emission table must have one row per letter, found {}",
                table.row_count()
            )));
        }
        if table.rows().any(|(_, row)| row.keys().any(|s| s.is_sentinel())) {
            return Err(ChannelSpellError::model(
                "emission table contains a sentinel as an observed symbol",
            ));
        }
        if self.transition.row(Symbol::End).is_some() {
            return Err(ChannelSpellError::model(
                "transition table has a row for the end sentinel",
            ));
        }
        Ok(())
    }
}
