//! Command line argument parsing for the channelspell CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// channelspell - noisy-channel spelling correction
#[derive(Parser, Debug, Clone)]
#[command(name = "channelspell")]
#[command(about = "Character-level noisy-channel spelling correction")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct ChannelSpellArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Training corpus, one "correct: wrong1 wrong2" entry per line
    #[arg(long, value_name = "CORPUS_FILE", conflicts_with = "model")]
    pub corpus: Option<PathBuf>,

    /// Previously trained model file
    #[arg(short, long, value_name = "MODEL_FILE")]
    pub model: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl ChannelSpellArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Correct text against the vocabulary
    Correct(CorrectArgs),

    /// Decode a word without vocabulary constraints
    Decode(DecodeArgs),

    /// Rank vocabulary candidates for a word
    Rank(RankArgs),

    /// Score one candidate against an observed word
    Score(ScoreArgs),

    /// Show model statistics
    Stats,

    /// Train a model from a corpus and save it
    Train(TrainArgs),

    /// Read lines from stdin and print corrections
    Repl(ReplArgs),
}

/// Arguments for text correction
#[derive(Parser, Debug, Clone)]
pub struct CorrectArgs {
    /// Text to correct
    #[arg(value_name = "TEXT", required_unless_present = "input")]
    pub text: Option<String>,

    /// File with one text per line
    #[arg(short, long, value_name = "INPUT_FILE", conflicts_with = "text")]
    pub input: Option<PathBuf>,

    /// Correct lines one after another instead of in parallel
    #[arg(long)]
    pub sequential: bool,

    /// Memoize candidate scores
    #[arg(long)]
    pub cache: bool,
}

/// Arguments for unconstrained decoding
#[derive(Parser, Debug, Clone)]
pub struct DecodeArgs {
    /// Observed word
    #[arg(value_name = "WORD")]
    pub word: String,
}

/// Arguments for candidate ranking
#[derive(Parser, Debug, Clone)]
pub struct RankArgs {
    /// Observed word
    #[arg(value_name = "WORD")]
    pub word: String,

    /// Maximum number of candidates to show
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for scoring a single candidate
#[derive(Parser, Debug, Clone)]
pub struct ScoreArgs {
    /// Hypothesized correct word
    #[arg(value_name = "CANDIDATE")]
    pub candidate: String,

    /// Observed word
    #[arg(value_name = "OBSERVED")]
    pub observed: String,

    /// Show every transition and emission term
    #[arg(long)]
    pub terms: bool,
}

/// Arguments for training
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Where to write the trained model
    #[arg(short, long, value_name = "MODEL_FILE")]
    pub output: PathBuf,
}

/// Arguments for the interactive loop
#[derive(Parser, Debug, Clone)]
pub struct ReplArgs {
    /// Memoize candidate scores across lines
    #[arg(long)]
    pub cache: bool,

    /// Do not print a prompt before each line
    #[arg(long)]
    pub no_prompt: bool,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
