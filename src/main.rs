use std::io::Read;

use anyhow::Context;
use clap::Parser;
use owo_colors::OwoColorize;
use serde::Serialize;

use copywatch::{analyze, AnalysisResult, Verdict};

#[derive(Parser)]
#[command(
    name = "copywatch",
    about = "Detect AI-generated patterns in Chinese marketing copy",
    version
)]
struct Cli {
    /// File paths to analyze (reads stdin if none provided)
    files: Vec<String>,

    /// Emit machine-readable JSON instead of the report
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    score: i32,
    verdict: Verdict,
    explanations: &'a [String],
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.files.is_empty() {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("reading stdin")?;
        render(&analyze(&input), cli.json)?;
    } else {
        for path in &cli.files {
            let text =
                std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
            render(&analyze(&text), cli.json)?;
        }
    }
    Ok(())
}

fn render(result: &AnalysisResult, json: bool) -> anyhow::Result<()> {
    let verdict = Verdict::for_score(result.score);

    if json {
        let report = Report {
            score: result.score,
            verdict,
            explanations: &result.explanations,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let label = verdict.label();
    match verdict {
        Verdict::RawAiTemplate | Verdict::ConfirmedAi => {
            println!("{} (score {})", label.red().bold(), result.score)
        }
        Verdict::HeavyAiEdit => println!("{} (score {})", label.yellow().bold(), result.score),
        Verdict::AiAssisted => println!("{} (score {})", label.blue().bold(), result.score),
        Verdict::NaturalWriting | Verdict::PureHuman => {
            println!("{} (score {})", label.green().bold(), result.score)
        }
    }
    for line in &result.explanations {
        println!("  {line}");
    }
    Ok(())
}
