//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{ChannelSpellArgs, OutputFormat};
use crate::error::Result;
use crate::spelling::{CacheStats, ModelStats, ScoreBreakdown, Suggestion};

/// Rendering of a result for humans.
pub trait HumanOutput {
    /// Multi-line, human-readable text.
    fn to_human(&self) -> String;
}

/// One corrected line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionOutput {
    pub original: String,
    pub corrected: String,
}

/// Result structure for text correction.
#[derive(Debug, Serialize, Deserialize)]
pub struct CorrectionResults {
    pub corrections: Vec<CorrectionOutput>,
    pub duration_ms: u64,
    pub cache: Option<CacheStats>,
}

/// Result structure for unconstrained decoding.
#[derive(Debug, Serialize, Deserialize)]
pub struct DecodeOutput {
    pub observed: String,
    pub decoded: String,
    #[serde(with = "crate::spelling::log_prob")]
    pub log_prob: f64,
}

/// Result structure for candidate ranking.
#[derive(Debug, Serialize, Deserialize)]
pub struct RankOutput {
    pub observed: String,
    pub suggestions: Vec<Suggestion>,
}

/// Result structure for scoring a single candidate.
#[derive(Debug, Serialize, Deserialize)]
pub struct ScoreOutput {
    pub candidate: String,
    pub observed: String,
    #[serde(with = "crate::spelling::log_prob")]
    pub log_prob: f64,
    pub terms: Option<ScoreBreakdown>,
}

/// Result structure for model statistics.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsOutput {
    pub source: String,
    pub stats: ModelStats,
}

/// Result structure for training.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrainOutput {
    pub path: String,
    pub stats: ModelStats,
    pub duration_ms: u64,
}

/// Format a log-probability, spelling out negative infinity.
pub fn format_log_prob(log_prob: f64) -> String {
    if log_prob.is_finite() {
        format!("{log_prob:.4}")
    } else if log_prob < 0.0 {
        "-inf".to_string()
    } else {
        log_prob.to_string()
    }
}

fn format_stats(stats: &ModelStats) -> String {
    format!(
        "  Vocabulary words:       {}\n  Emission rows (seen):   {}\n  Emission entries:       {}\n  Transition rows:        {}\n  Transition entries:     {}",
        stats.vocabulary_words,
        stats.emission_rows_populated,
        stats.emission_entries,
        stats.transition_rows,
        stats.transition_entries
    )
}

impl HumanOutput for CorrectionOutput {
    fn to_human(&self) -> String {
        self.corrected.clone()
    }
}

impl HumanOutput for CorrectionResults {
    fn to_human(&self) -> String {
        let mut lines: Vec<String> = self.corrections.iter().map(|c| c.to_human()).collect();
        if let Some(cache) = &self.cache {
            lines.push(format!(
                "# cache: {} entries, {} hits, {} misses",
                cache.entries, cache.hits, cache.misses
            ));
        }
        lines.join("\n")
    }
}

impl HumanOutput for DecodeOutput {
    fn to_human(&self) -> String {
        format!(
            "{} -> {} (log prob: {})",
            self.observed,
            self.decoded,
            format_log_prob(self.log_prob)
        )
    }
}

impl HumanOutput for RankOutput {
    fn to_human(&self) -> String {
        if self.suggestions.is_empty() {
            return format!("No candidates of matching length for '{}'", self.observed);
        }
        let mut out = format!("Candidates for '{}':", self.observed);
        for (i, suggestion) in self.suggestions.iter().enumerate() {
            out.push_str(&format!(
                "\n  {}. {} ({})",
                i + 1,
                suggestion.word,
                format_log_prob(suggestion.log_prob)
            ));
        }
        out
    }
}

impl HumanOutput for ScoreOutput {
    fn to_human(&self) -> String {
        let mut out = format!(
            "score({} | {}) = {}",
            self.candidate,
            self.observed,
            format_log_prob(self.log_prob)
        );
        if let Some(terms) = &self.terms {
            let render = |values: &[f64]| {
                values
                    .iter()
                    .map(|v| format_log_prob(*v))
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            out.push_str(&format!("\n  transitions: [{}]", render(&terms.transitions)));
            out.push_str(&format!("\n  emissions:   [{}]", render(&terms.emissions)));
        }
        out
    }
}

impl HumanOutput for StatsOutput {
    fn to_human(&self) -> String {
        format!("Model: {}\n{}", self.source, format_stats(&self.stats))
    }
}

impl HumanOutput for TrainOutput {
    fn to_human(&self) -> String {
        format!(
            "Model saved to {} in {} ms\n{}",
            self.path,
            self.duration_ms,
            format_stats(&self.stats)
        )
    }
}

/// Output a result in the specified format.
pub fn output_result<T>(message: &str, result: &T, args: &ChannelSpellArgs) -> Result<()>
where
    T: Serialize + HumanOutput,
{
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: HumanOutput>(message: &str, result: &T, args: &ChannelSpellArgs) -> Result<()> {
    if args.verbosity() > 1 {
        println!("{message}");
        println!();
    }
    println!("{}", result.to_human());
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &ChannelSpellArgs) -> Result<()> {
    println!("{}", render_json(result, args.pretty)?);
    Ok(())
}

/// Serialize a result to JSON text.
pub fn render_json<T: Serialize>(result: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_log_prob() {
        assert_eq!(format_log_prob(-1.23456), "-1.2346");
        assert_eq!(format_log_prob(f64::NEG_INFINITY), "-inf");
        assert_eq!(format_log_prob(0.0), "0.0000");
    }

    #[test]
    fn test_rank_output_human() {
        let output = RankOutput {
            observed: "teh".to_string(),
            suggestions: vec![
                Suggestion::new("the".to_string(), -3.5),
                Suggestion::new("cat".to_string(), f64::NEG_INFINITY),
            ],
        };
        let text = output.to_human();
        assert!(text.contains("1. the (-3.5000)"));
        assert!(text.contains("2. cat (-inf)"));

        let empty = RankOutput {
            observed: "zz".to_string(),
            suggestions: vec![],
        };
        assert!(empty.to_human().starts_with("No candidates"));
    }

    #[test]
    fn test_render_json_with_negative_infinity() {
        let output = DecodeOutput {
            observed: "zz".to_string(),
            decoded: "aa".to_string(),
            log_prob: f64::NEG_INFINITY,
        };
        let json = render_json(&output, false).unwrap();
        assert_eq!(json, r#"{"observed":"zz","decoded":"aa","log_prob":"-inf"}"#);

        let back: DecodeOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(back.log_prob, f64::NEG_INFINITY);
    }

    #[test]
    fn test_score_json_round_trip() {
        let output = ScoreOutput {
            candidate: "cat".to_string(),
            observed: "cxt".to_string(),
            log_prob: f64::NEG_INFINITY,
            terms: Some(ScoreBreakdown {
                transitions: vec![-1.0, -2.0, -0.5, -1.5],
                emissions: vec![0.0, f64::NEG_INFINITY, -0.25],
            }),
        };
        let json = render_json(&output, false).unwrap();
        assert!(json.contains(r#""emissions":[0.0,"-inf",-0.25]"#));

        let back: ScoreOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(back.log_prob, f64::NEG_INFINITY);
        assert_eq!(back.terms, output.terms);

        let ranked = RankOutput {
            observed: "teh".to_string(),
            suggestions: vec![Suggestion::new("zzz".to_string(), f64::NEG_INFINITY)],
        };
        let back: RankOutput =
            serde_json::from_str(&render_json(&ranked, false).unwrap()).unwrap();
        assert_eq!(back.suggestions, ranked.suggestions);
    }
}
