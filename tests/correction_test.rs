//! End-to-end tests: corpus file to trained model to corrections.

use std::fs;

use channelspell::prelude::*;
use channelspell::spelling::{
    CachedScorer, ScoreCache, correct_lines, correct_text_with, load_corpus,
};
use tempfile::TempDir;

const CORPUS: &str = "\
the: teh hte thw
cat: cta act
this line has no colon and is skipped
sat: sta
Then: Tehn thne
mat:
";

fn write_corpus(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("aspell.txt");
    fs::write(&path, CORPUS).unwrap();
    path
}

#[test]
fn test_corpus_to_corrections() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let pairs = load_corpus(write_corpus(&temp_dir), true)?;

    assert_eq!(pairs.len(), 5);
    assert_eq!(pairs[3], TrainingPair::new("then", ["tehn", "thne"]));
    assert!(pairs[4].misspellings.is_empty());

    let model = NoisyChannelModel::train(&pairs);
    let words: Vec<&str> = model.vocabulary().iter().collect();
    assert_eq!(words, vec!["the", "cat", "sat", "then", "mat"]);

    assert_eq!(model.correct_text("Teh CTA sta"), "the cat sat");
    assert_eq!(model.correct_text("tehn"), "then");
    // No five-letter words: passes through unchanged.
    assert_eq!(model.correct_text("hello"), "hello");
    Ok(())
}

#[test]
fn test_decode_keeps_length() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let model = NoisyChannelModel::train(&load_corpus(write_corpus(&temp_dir), true)?);

    for word in ["teh", "thw", "x", "qwertyuiop", "cta"] {
        let decoded = model.decode(word);
        assert_eq!(decoded.chars().count(), word.chars().count());
        assert!(decoded.chars().all(|c| c.is_ascii_lowercase()));
        assert_eq!(model.decode(word), decoded);
    }
    Ok(())
}

#[test]
fn test_saved_model_gives_same_answers() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let model = NoisyChannelModel::train(&load_corpus(write_corpus(&temp_dir), true)?);

    let model_path = temp_dir.path().join("model.bin");
    model.save(&model_path)?;
    let loaded = NoisyChannelModel::load(&model_path)?;

    for text in ["teh cta", "thne sta", "hte act mat"] {
        assert_eq!(loaded.correct_text(text), model.correct_text(text));
    }
    assert_eq!(loaded.decode("thw"), model.decode("thw"));
    assert_eq!(loaded.score("the", "teh"), model.score("the", "teh"));
    Ok(())
}

#[test]
fn test_cached_parallel_batch_matches_plain() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let model = NoisyChannelModel::train(&load_corpus(write_corpus(&temp_dir), true)?);

    let lines: Vec<String> = (0..64)
        .map(|i| match i % 4 {
            0 => "teh cta".to_string(),
            1 => "hte sta mat".to_string(),
            2 => "tehn thne".to_string(),
            _ => "act, teh".to_string(),
        })
        .collect();

    let cache = ScoreCache::new();
    let cached = CachedScorer::new(model.scorer(), &cache);
    let batch = correct_lines(&lines, model.vocabulary(), &cached, true);

    let expected: Vec<String> = lines.iter().map(|l| model.correct_text(l)).collect();
    assert_eq!(batch, expected);

    // Concurrent misses on the same pair may both compute it.
    let stats = cache.stats();
    assert!(stats.misses >= stats.entries as u64);

    let again = correct_lines(&lines[..4], model.vocabulary(), &cached, false);
    assert_eq!(again, expected[..4]);
    assert!(cache.stats().hits > stats.hits);
    Ok(())
}

#[test]
fn test_cache_stays_bounded_on_many_distinct_tokens() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let model = NoisyChannelModel::train(&load_corpus(write_corpus(&temp_dir), true)?);

    let letters: Vec<char> = ('a'..='z').collect();
    let text: String = (0..2000)
        .map(|i: usize| {
            [i % 26, (i / 26) % 26, (i / 676) % 26]
                .iter()
                .map(|&j| letters[j])
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join(" ");

    let cache = ScoreCache::with_capacity_limit(500);
    let cached = CachedScorer::new(model.scorer(), &cache);
    let corrected = correct_text_with(&text, model.vocabulary(), &cached);

    assert_eq!(corrected, model.correct_text(&text));
    let stats = cache.stats();
    assert_eq!(stats.entries, 500);
    assert!(stats.misses > 500);
    Ok(())
}

#[test]
fn test_missing_corpus_is_io_error() {
    match load_corpus("/nonexistent/aspell.txt", true) {
        Err(ChannelSpellError::Io(_)) => {}
        other => panic!("expected I/O error, got {other:?}"),
    }
}
