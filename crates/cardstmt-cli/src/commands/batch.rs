//! Batch processing command for multiple statement files.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use cardstmt_core::models::statement::DocumentOutcome;
use cardstmt_core::statement::StatementExtractor;

use super::process::{
    csv_row, file_name, format_outcome, load_config, read_statement_text, CSV_HEADER, OutputFormat,
};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Produce records even for unrecognized issuers
    #[arg(long)]
    no_gate: bool,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "pdf" | "txt")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let extractor =
        StatementExtractor::new(config.extraction.clone())?.with_issuer_gate(!args.no_gate);

    // Text acquisition failures become Failed outcomes; they never
    // abort the batch.
    let documents: Vec<(String, Result<String, String>)> = files
        .iter()
        .map(|path| {
            let text = read_statement_text(path, &config).map_err(|e| e.to_string());
            overall_pb.inc(1);
            (file_name(path), text)
        })
        .collect();

    let outcomes = extractor.extract_batch(documents);
    overall_pb.finish_with_message("Complete");

    // Write per-file outputs
    if let Some(ref output_dir) = args.output_dir {
        for (path, outcome) in files.iter().zip(&outcomes) {
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("statement");

            let extension = match args.format {
                OutputFormat::Json => "json",
                OutputFormat::Csv => "csv",
                OutputFormat::Text => "txt",
            };

            let output_path = output_dir.join(format!("{}.{}", stem, extension));

            // Non-record outcomes are only expressible as JSON; the
            // tabular formats record them in the summary instead.
            let content = match (args.format, outcome.record()) {
                (OutputFormat::Json, _) => serde_json::to_string_pretty(outcome)?,
                (_, Some(_)) => format_outcome(outcome, args.format)?,
                (_, None) => continue,
            };

            fs::write(&output_path, content)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &outcomes)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let extracted = outcomes.iter().filter(|o| o.record().is_some()).count();
    let unsupported = outcomes
        .iter()
        .filter(|o| matches!(o, DocumentOutcome::Unsupported { .. }))
        .count();
    let failed = outcomes
        .iter()
        .filter(|o| matches!(o, DocumentOutcome::Failed { .. }))
        .count();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        outcomes.len(),
        start.elapsed()
    );
    println!(
        "   {} extracted, {} unsupported, {} failed",
        style(extracted).green(),
        style(unsupported).yellow(),
        style(failed).red()
    );

    if failed > 0 {
        println!();
        println!("{}", style("Failed files:").red());
        for outcome in &outcomes {
            if let DocumentOutcome::Failed { source_file, error } = outcome {
                println!("  - {}: {}", source_file, error);
            }
        }
    }

    Ok(())
}

fn write_summary(path: &PathBuf, outcomes: &[DocumentOutcome]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    let mut header = vec!["status"];
    header.extend(CSV_HEADER);
    header.push("error");
    wtr.write_record(&header)?;

    for outcome in outcomes {
        match outcome {
            DocumentOutcome::Extracted { record } => {
                let mut row = vec!["extracted".to_string()];
                row.extend(csv_row(record));
                row.push(String::new());
                wtr.write_record(&row)?;
            }
            DocumentOutcome::Unsupported { source_file, issuer } => {
                let mut row = vec!["unsupported".to_string(), source_file.clone(), issuer.to_string()];
                row.resize(CSV_HEADER.len() + 1, String::new());
                row.push(String::new());
                wtr.write_record(&row)?;
            }
            DocumentOutcome::Failed { source_file, error } => {
                let mut row = vec!["failed".to_string(), source_file.clone()];
                row.resize(CSV_HEADER.len() + 1, String::new());
                row.push(error.clone());
                wtr.write_record(&row)?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
