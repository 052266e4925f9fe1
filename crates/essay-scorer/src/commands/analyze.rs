//! Analyze command: score an essay and show insights.

use anyhow::bail;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument, warn};

use essay_scorer_core::{EssayAnalyzer, EssayFormat, EssayReport};

use super::{read_input, read_input_file};

/// Message shown instead of a report when the essay has no content.
pub const BLANK_ESSAY_WARNING: &str = "Please enter a valid essay.";

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug, Default)]
pub struct AnalyzeArgs {
    /// Essay file to score. Reads standard input when omitted or `-`.
    pub file: Option<Utf8PathBuf>,

    /// Input format. Defaults to markdown for `.md` files, plain otherwise.
    #[arg(long, value_enum)]
    pub format: Option<EssayFormat>,

    /// Number of keywords to display.
    #[arg(long, value_name = "N")]
    pub keywords: Option<usize>,

    /// Minimum acceptable score (0-100).
    #[arg(long, value_parser = parse_min_score)]
    pub min_score: Option<f64>,
}

fn parse_min_score(raw: &str) -> Result<f64, String> {
    let value: f64 = raw.parse().map_err(|e| format!("{e}"))?;
    if essay_scorer_core::scoring::is_valid_score(value) {
        Ok(value)
    } else {
        Err(format!("must be between 0 and 100, got {raw}"))
    }
}

/// Settings for `analyze` that come from configuration.
#[derive(Debug, Clone, Copy)]
pub struct AnalyzeDefaults {
    /// Keywords to display when `--keywords` is absent.
    pub keyword_limit: usize,
    /// Score gate when `--min-score` is absent.
    pub min_score: Option<f64>,
    /// Input size limit in bytes.
    pub max_input_bytes: Option<usize>,
}

/// Score an essay from a file or standard input.
#[instrument(name = "cmd_analyze", skip_all, fields(file = ?args.file))]
pub fn cmd_analyze(
    args: AnalyzeArgs,
    global_json: bool,
    analyzer: &EssayAnalyzer,
    defaults: AnalyzeDefaults,
) -> anyhow::Result<()> {
    debug!(file = ?args.file, format = ?args.format, "executing analyze command");

    let source = args.file.as_ref().filter(|path| path.as_str() != "-");
    let (content, label) = match source {
        Some(path) => (read_input_file(path, defaults.max_input_bytes)?, path.to_string()),
        None => (
            read_input(std::io::stdin().lock(), defaults.max_input_bytes)?,
            "<stdin>".to_string(),
        ),
    };

    if content.trim().is_empty() {
        warn!(source = %label, "blank essay, skipping analysis");
        eprintln!("{} {BLANK_ESSAY_WARNING}", "warning:".yellow().bold());
        if global_json {
            let warning = serde_json::json!({ "warning": BLANK_ESSAY_WARNING });
            println!("{}", serde_json::to_string_pretty(&warning)?);
        }
        return Ok(());
    }

    let format = args
        .format
        .unwrap_or_else(|| EssayFormat::from_extension(source.and_then(|p| p.extension())));
    let report = analyzer.analyze_as(&content, format);
    debug!(score = report.score, %format, "essay analyzed");

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let limit = args.keywords.unwrap_or(defaults.keyword_limit);
        print_report(&label, &report, limit);
    }

    if let Some(min) = args.min_score.or(defaults.min_score)
        && report.score < min
    {
        bail!(
            "{label} scores {:.2} (min: {min:.2}). Vary vocabulary or develop sentences further.",
            report.score,
        );
    }

    Ok(())
}

fn print_report(label: &str, report: &EssayReport, keyword_limit: usize) {
    let score = format!("{:.2}", report.score);
    let score = if report.score >= 80.0 {
        score.green().to_string()
    } else if report.score >= 60.0 {
        score.yellow().to_string()
    } else {
        score.red().to_string()
    };

    println!("{}", label.bold());
    println!("\n  {} {score} / 100", "Score:".cyan());
    println!(
        "  {} vocabulary {:.2} + sentences {:.2} + length {:.2}",
        "Breakdown:".dimmed(),
        report.breakdown.vocabulary,
        report.breakdown.sentence_complexity,
        report.breakdown.length,
    );
    println!("  {} {}", "Unique Words:".cyan(), report.unique_word_count);
    println!("  {} {}", "Total Words:".cyan(), report.total_word_count);
    println!(
        "  {} {:.2} words",
        "Average Sentence Length:".cyan(),
        report.average_sentence_length,
    );
    println!(
        "  {} {}",
        "Keywords:".cyan(),
        report.top_keywords(keyword_limit).join(", "),
    );
    println!("\n  {}\n    {}", "Longest Sentence:".cyan(), report.longest_sentence);
    println!("\n  {}\n    {}", "Shortest Sentence:".cyan(), report.shortest_sentence);
}
