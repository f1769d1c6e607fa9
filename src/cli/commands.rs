//! Command implementations for the channelspell CLI.

use std::fmt;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::Instant;

use log::{debug, info};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::SpellerConfig;
use crate::error::{ChannelSpellError, Result};
use crate::spelling::*;

/// Execute a CLI command.
pub fn execute_command(args: ChannelSpellArgs) -> Result<()> {
    let config = load_config(&args)?;

    match &args.command {
        Command::Correct(correct_args) => correct(correct_args, &config, &args),
        Command::Decode(decode_args) => decode_word(decode_args, &config, &args),
        Command::Rank(rank_args) => rank_word(rank_args, &config, &args),
        Command::Score(score_args) => score_word(score_args, &config, &args),
        Command::Stats => show_stats(&config, &args),
        Command::Train(train_args) => train_model(train_args, &config, &args),
        Command::Repl(repl_args) => run_repl(repl_args, &config, &args),
    }
}

/// Load the configuration file if one was given.
fn load_config(args: &ChannelSpellArgs) -> Result<SpellerConfig> {
    match &args.config {
        Some(path) => {
            debug!("Loading config from {}", path.display());
            SpellerConfig::load_from_file(path)
        }
        None => Ok(SpellerConfig::default()),
    }
}

/// Where the model for a command comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ModelSource<'a> {
    /// A model saved with `train`.
    Saved(&'a Path),
    /// A corpus to train from.
    Corpus(&'a Path),
}

impl fmt::Display for ModelSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelSource::Saved(path) => write!(f, "model {}", path.display()),
            ModelSource::Corpus(path) => write!(f, "corpus {}", path.display()),
        }
    }
}

/// Pick the model source: `--model`, then `--corpus`, then the configured corpus.
fn resolve_model_source<'a>(
    args: &'a ChannelSpellArgs,
    config: &'a SpellerConfig,
) -> Result<ModelSource<'a>> {
    if let Some(path) = &args.model {
        return Ok(ModelSource::Saved(path));
    }
    args.corpus
        .as_deref()
        .or(config.corpus_path.as_deref())
        .map(ModelSource::Corpus)
        .ok_or_else(|| {
            ChannelSpellError::invalid_argument(
                "no model source: pass --model or --corpus, or set corpus_path in the config",
            )
        })
}

/// Load a saved model, or train one from the corpus.
///
/// A corpus without a single usable entry is an error.
pub fn load_model(args: &ChannelSpellArgs, config: &SpellerConfig) -> Result<NoisyChannelModel> {
    match resolve_model_source(args, config)? {
        ModelSource::Saved(path) => NoisyChannelModel::load(path),
        ModelSource::Corpus(path) => {
            let pairs = load_corpus(path, config.lowercase_corpus)?;
            if pairs.is_empty() {
                return Err(ChannelSpellError::corpus(format!(
                    "{} contains no usable entries",
                    path.display()
                )));
            }
            Ok(NoisyChannelModel::train(&pairs))
        }
    }
}

/// Correct text given on the command line or line by line from a file.
fn correct(args: &CorrectArgs, config: &SpellerConfig, cli_args: &ChannelSpellArgs) -> Result<()> {
    let model = load_model(cli_args, config)?;

    let lines: Vec<String> = match (&args.input, &args.text) {
        (Some(path), _) => fs::read_to_string(path)?
            .lines()
            .map(str::to_string)
            .collect(),
        (None, Some(text)) => vec![text.clone()],
        (None, None) => {
            return Err(ChannelSpellError::invalid_argument(
                "nothing to correct: pass TEXT or --input",
            ));
        }
    };

    let parallel = config.parallel && !args.sequential;
    let use_cache = args.cache || config.cache_scores;
    debug!(
        "Correcting {} lines (parallel: {parallel}, cache: {use_cache})",
        lines.len()
    );

    let start_time = Instant::now();
    let cache = ScoreCache::with_capacity_limit(config.cache_size_limit);
    let plain = model.scorer();
    let cached = CachedScorer::new(plain, &cache);
    let scorer: &(dyn CandidateScorer + Sync) = if use_cache { &cached } else { &plain };

    let corrected = correct_lines(&lines, model.vocabulary(), scorer, parallel);
    let duration = start_time.elapsed();

    let corrections = lines
        .into_iter()
        .zip(corrected)
        .map(|(original, corrected)| CorrectionOutput {
            original,
            corrected,
        })
        .collect();

    output_result(
        "Correction complete",
        &CorrectionResults {
            corrections,
            duration_ms: duration.as_millis() as u64,
            cache: use_cache.then(|| cache.stats()),
        },
        cli_args,
    )
}

/// Decode a word with the unconstrained Viterbi decoder.
fn decode_word(args: &DecodeArgs, config: &SpellerConfig, cli_args: &ChannelSpellArgs) -> Result<()> {
    let model = load_model(cli_args, config)?;
    let observed = args.word.to_lowercase();
    let decoded = model.decode_with_score(&observed);

    output_result(
        "Decoding complete",
        &DecodeOutput {
            observed,
            decoded: decoded.word,
            log_prob: decoded.log_prob,
        },
        cli_args,
    )
}

/// Rank vocabulary candidates for a word.
fn rank_word(args: &RankArgs, config: &SpellerConfig, cli_args: &ChannelSpellArgs) -> Result<()> {
    let limit = args.limit.unwrap_or(config.max_suggestions);
    if limit == 0 {
        return Err(ChannelSpellError::invalid_argument(
            "limit must be at least 1",
        ));
    }

    let model = load_model(cli_args, config)?;
    let observed = args.word.to_lowercase();
    let suggestions = model.rank(&observed, limit);

    output_result(
        "Ranking complete",
        &RankOutput {
            observed,
            suggestions,
        },
        cli_args,
    )
}

/// Score a single candidate against an observed word.
fn score_word(args: &ScoreArgs, config: &SpellerConfig, cli_args: &ChannelSpellArgs) -> Result<()> {
    let model = load_model(cli_args, config)?;
    let candidate = args.candidate.to_lowercase();
    let observed = args.observed.to_lowercase();

    let log_prob = model.score(&candidate, &observed);
    let terms = if args.terms {
        model.scorer().breakdown(&candidate, &observed)
    } else {
        None
    };

    output_result(
        "Scoring complete",
        &ScoreOutput {
            candidate,
            observed,
            log_prob,
            terms,
        },
        cli_args,
    )
}

/// Show statistics about the model.
fn show_stats(config: &SpellerConfig, cli_args: &ChannelSpellArgs) -> Result<()> {
    let source = resolve_model_source(cli_args, config)?.to_string();
    let model = load_model(cli_args, config)?;

    output_result(
        "Model statistics",
        &StatsOutput {
            source,
            stats: model.stats(),
        },
        cli_args,
    )
}

/// Train a model and save it.
fn train_model(args: &TrainArgs, config: &SpellerConfig, cli_args: &ChannelSpellArgs) -> Result<()> {
    let start_time = Instant::now();
    let model = load_model(cli_args, config)?;
    model.save(&args.output)?;
    let duration = start_time.elapsed();
    info!("Wrote model to {}", args.output.display());

    output_result(
        "Training complete",
        &TrainOutput {
            path: args.output.to_string_lossy().to_string(),
            stats: model.stats(),
            duration_ms: duration.as_millis() as u64,
        },
        cli_args,
    )
}

/// Run the interactive loop over stdin and stdout.
fn run_repl(args: &ReplArgs, config: &SpellerConfig, cli_args: &ChannelSpellArgs) -> Result<()> {
    let model = load_model(cli_args, config)?;

    let cache = ScoreCache::with_capacity_limit(config.cache_size_limit);
    let plain = model.scorer();
    let cached = CachedScorer::new(plain, &cache);
    let use_cache = args.cache || config.cache_scores;
    let scorer: &dyn CandidateScorer = if use_cache { &cached } else { &plain };

    let options = ReplOptions {
        prompt: !args.no_prompt && cli_args.output_format == OutputFormat::Human,
        format: cli_args.output_format,
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let handled = repl_loop(stdin.lock(), stdout.lock(), model.vocabulary(), scorer, options)?;

    if use_cache {
        let stats = cache.stats();
        debug!(
            "Score cache: {} entries, {} hits, {} misses",
            stats.entries, stats.hits, stats.misses
        );
    }
    info!("Corrected {handled} lines");
    Ok(())
}

/// Options for [`repl_loop`].
#[derive(Debug, Clone, Copy)]
pub struct ReplOptions {
    /// Print a prompt before reading each line.
    pub prompt: bool,
    /// How each correction is written.
    pub format: OutputFormat,
}

/// Correct lines from `reader` one at a time, writing each result to `writer`.
///
/// Each line is an independent request. The loop ends at end of input or on
/// a line reading `:q`. Returns the number of lines corrected.
pub fn repl_loop<R, W, S>(
    reader: R,
    mut writer: W,
    vocabulary: &Vocabulary,
    scorer: &S,
    options: ReplOptions,
) -> Result<usize>
where
    R: BufRead,
    W: Write,
    S: CandidateScorer + ?Sized,
{
    let mut handled = 0;
    let mut lines = reader.lines();

    loop {
        if options.prompt {
            write!(writer, "Enter text: ")?;
            writer.flush()?;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        if line.trim() == ":q" {
            break;
        }

        let corrected = correct_text_with(&line, vocabulary, scorer);
        match options.format {
            OutputFormat::Human => writeln!(writer, "Corrected text: {corrected}")?,
            OutputFormat::Json => {
                let output = CorrectionOutput {
                    original: line,
                    corrected,
                };
                writeln!(writer, "{}", render_json(&output, false)?)?;
            }
        }
        writer.flush()?;
        handled += 1;
    }

    Ok(handled)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use clap::Parser;

    use super::*;

    fn model() -> NoisyChannelModel {
        NoisyChannelModel::train(&[
            TrainingPair::new("the", ["teh", "hte"]),
            TrainingPair::new("cat", ["cta"]),
        ])
    }

    #[test]
    fn test_repl_loop_human() {
        let model = model();
        let input = Cursor::new("Teh cta\nhte\n:q\nteh\n");
        let mut output = Vec::new();

        let handled = repl_loop(
            input,
            &mut output,
            model.vocabulary(),
            &model.scorer(),
            ReplOptions {
                prompt: false,
                format: OutputFormat::Human,
            },
        )
        .unwrap();

        assert_eq!(handled, 2);
        let text = String::from_utf8(output).unwrap();
        assert_eq!(text, "Corrected text: the cat\nCorrected text: the\n");
    }

    #[test]
    fn test_repl_loop_json_until_eof() {
        let model = model();
        let input = Cursor::new("teh");
        let mut output = Vec::new();

        let handled = repl_loop(
            input,
            &mut output,
            model.vocabulary(),
            &model.scorer(),
            ReplOptions {
                prompt: false,
                format: OutputFormat::Json,
            },
        )
        .unwrap();

        assert_eq!(handled, 1);
        let text = String::from_utf8(output).unwrap();
        assert_eq!(text, "{\"original\":\"teh\",\"corrected\":\"the\"}\n");
    }

    #[test]
    fn test_repl_loop_prompts() {
        let model = model();
        let input = Cursor::new("");
        let mut output = Vec::new();

        let handled = repl_loop(
            input,
            &mut output,
            model.vocabulary(),
            &model.scorer(),
            ReplOptions {
                prompt: true,
                format: OutputFormat::Human,
            },
        )
        .unwrap();

        assert_eq!(handled, 0);
        assert_eq!(String::from_utf8(output).unwrap(), "Enter text: ");
    }

    #[test]
    fn test_model_source_precedence() {
        let config = SpellerConfig {
            corpus_path: Some("configured.txt".into()),
            ..SpellerConfig::default()
        };

        let args = ChannelSpellArgs::try_parse_from(["channelspell", "stats"]).unwrap();
        let source = resolve_model_source(&args, &config).unwrap();
        assert_eq!(source, ModelSource::Corpus(Path::new("configured.txt")));
        assert_eq!(source.to_string(), "corpus configured.txt");

        let args =
            ChannelSpellArgs::try_parse_from(["channelspell", "--corpus", "given.txt", "stats"])
                .unwrap();
        assert_eq!(
            resolve_model_source(&args, &config).unwrap(),
            ModelSource::Corpus(Path::new("given.txt"))
        );

        let args =
            ChannelSpellArgs::try_parse_from(["channelspell", "--model", "m.bin", "stats"]).unwrap();
        let source = resolve_model_source(&args, &config).unwrap();
        assert_eq!(source, ModelSource::Saved(Path::new("m.bin")));
        assert_eq!(source.to_string(), "model m.bin");
    }

    #[test]
    fn test_empty_corpus_is_rejected() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.txt");
        std::fs::write(&path, "no colon here\n\n").unwrap();

        let args = ChannelSpellArgs::try_parse_from([
            "channelspell",
            "--corpus",
            path.to_str().unwrap(),
            "stats",
        ])
        .unwrap();
        match load_model(&args, &SpellerConfig::default()) {
            Err(ChannelSpellError::Corpus(_)) => {}
            other => panic!("expected corpus error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_model_source() {
        let args = ChannelSpellArgs::try_parse_from(["channelspell", "stats"]).unwrap();
        match load_model(&args, &SpellerConfig::default()) {
            Err(ChannelSpellError::InvalidArgument(_)) => {}
            other => panic!("expected invalid argument, got {other:?}"),
        }
    }
}
