//! Training corpus loading.
//!
//! The corpus is a plain text file with one entry per line:
//!
//! ```text
//! correctword: wrong1 wrong2 wrong3
//! ```
//!
//! Lines without a colon are skipped. The part after the first colon is
//! whitespace-split into zero or more misspellings.

use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A correct spelling and the misspellings observed for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingPair {
    /// The intended spelling.
    pub correct: String,
    /// Observed misspellings of `correct`, possibly empty.
    pub misspellings: Vec<String>,
}

impl TrainingPair {
    /// Create a new training pair.
    pub fn new<S, I, T>(correct: S, misspellings: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        TrainingPair {
            correct: correct.into(),
            misspellings: misspellings.into_iter().map(Into::into).collect(),
        }
    }
}

/// Parse a single corpus line.
///
/// Returns `None` for lines without a colon.
pub fn parse_line(line: &str, lowercase: bool) -> Option<TrainingPair> {
    let (correct, wrong) = line.trim().split_once(':')?;
    let normalize = |s: &str| {
        if lowercase {
            s.to_lowercase()
        } else {
            s.to_string()
        }
    };

    Some(TrainingPair {
        correct: normalize(correct.trim()),
        misspellings: wrong.split_whitespace().map(normalize).collect(),
    })
}

/// Parse an in-memory corpus.
pub fn parse_corpus(text: &str, lowercase: bool) -> Vec<TrainingPair> {
    let mut skipped = 0usize;
    let pairs: Vec<TrainingPair> = text
        .lines()
        .filter_map(|line| {
            let pair = parse_line(line, lowercase);
            if pair.is_none() {
                skipped += 1;
            }
            pair
        })
        .collect();

    if skipped > 0 {
        debug!("Skipped {skipped} corpus lines without a colon");
    }
    pairs
}

/// Load a corpus file.
pub fn load_corpus<P: AsRef<Path>>(path: P, lowercase: bool) -> Result<Vec<TrainingPair>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let pairs = parse_corpus(&text, lowercase);
    info!(
        "Loaded {} training pairs from {}",
        pairs.len(),
        path.display()
    );
    Ok(pairs)
}
