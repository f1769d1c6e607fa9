//! Configuration for training and correction.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ChannelSpellError, Result};
use crate::spelling::cache::DEFAULT_CACHE_SIZE_LIMIT;

/// Default number of ranked suggestions.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 5;

/// Runtime configuration, loadable from a JSON file.
///
/// Missing fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellerConfig {
    /// Training corpus used when no saved model is given.
    pub corpus_path: Option<PathBuf>,

    /// Maximum number of ranked suggestions to return.
    pub max_suggestions: usize,

    /// Whether to memoize candidate scores.
    pub cache_scores: bool,

    /// Maximum number of memoized scores.
    pub cache_size_limit: usize,

    /// Whether batch input lines are corrected in parallel.
    pub parallel: bool,

    /// Whether corpus text is lower-cased on load.
    pub lowercase_corpus: bool,
}

impl Default for SpellerConfig {
    fn default() -> Self {
        SpellerConfig {
            corpus_path: None,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            cache_scores: false,
            cache_size_limit: DEFAULT_CACHE_SIZE_LIMIT,
            parallel: true,
            lowercase_corpus: true,
        }
    }
}

impl SpellerConfig {
    /// Load a configuration from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config: SpellerConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the values make sense.
    pub fn validate(&self) -> Result<()> {
        if self.max_suggestions == 0 {
            return Err(ChannelSpellError::config(
                "max_suggestions must be at least 1",
            ));
        }
        if self.cache_size_limit == 0 {
            return Err(ChannelSpellError::config(
                "cache_size_limit must be at least 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = SpellerConfig::default();
        assert_eq!(config.max_suggestions, DEFAULT_MAX_SUGGESTIONS);
        assert!(!config.cache_scores);
        assert!(config.parallel);
        assert!(config.lowercase_corpus);
        assert!(config.corpus_path.is_none());
        assert_eq!(config.cache_size_limit, DEFAULT_CACHE_SIZE_LIMIT);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, r#"{"max_suggestions": 3, "cache_scores": true}"#).unwrap();

        let config = SpellerConfig::load_from_file(&path).unwrap();
        assert_eq!(config.max_suggestions, 3);
        assert!(config.cache_scores);
        assert!(config.parallel);
    }

    #[test]
    fn test_invalid_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, r#"{"max_suggestions": 0}"#).unwrap();

        match SpellerConfig::load_from_file(&path) {
            Err(ChannelSpellError::Config(_)) => {}
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_cache_size_limit() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, r#"{"cache_size_limit": 64}"#).unwrap();
        assert_eq!(SpellerConfig::load_from_file(&path).unwrap().cache_size_limit, 64);

        fs::write(&path, r#"{"cache_size_limit": 0}"#).unwrap();
        assert!(matches!(
            SpellerConfig::load_from_file(&path),
            Err(ChannelSpellError::Config(_))
        ));
    }

    #[test]
    fn test_malformed_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            SpellerConfig::load_from_file(&path),
            Err(ChannelSpellError::Json(_))
        ));
    }
}
