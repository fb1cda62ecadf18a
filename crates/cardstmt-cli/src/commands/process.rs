//! Process command - extract fields from a single statement file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use cardstmt_core::models::config::CardstmtConfig;
use cardstmt_core::models::statement::{DocumentOutcome, StatementRecord, PLACEHOLDER};
use cardstmt_core::pdf::{PdfExtractor, PdfProcessor};
use cardstmt_core::statement::StatementExtractor;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF, or a .txt file with pre-extracted text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Produce a record even for unrecognized issuers
    #[arg(long)]
    no_gate: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    pb.set_message("Reading statement...");
    pb.set_position(20);

    let text = read_statement_text(&args.input, &config)?;
    let source_file = file_name(&args.input);

    pb.set_message("Extracting fields...");
    pb.set_position(60);

    let extractor =
        StatementExtractor::new(config.extraction.clone())?.with_issuer_gate(!args.no_gate);
    let outcome = extractor.extract(&source_file, &text);

    pb.set_position(100);
    pb.finish_with_message("Done");

    let output = format_outcome(&outcome, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

pub fn load_config(config_path: Option<&str>) -> anyhow::Result<CardstmtConfig> {
    Ok(if let Some(path) = config_path {
        CardstmtConfig::from_file(Path::new(path))?
    } else {
        CardstmtConfig::default()
    })
}

pub fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("statement")
        .to_string()
}

/// Read statement text from a PDF, or directly from a .txt file holding
/// pre-extracted text.
pub fn read_statement_text(path: &Path, config: &CardstmtConfig) -> anyhow::Result<String> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "pdf" => {
            let data = fs::read(path)?;
            let mut extractor = PdfExtractor::with_config(config.pdf.clone());
            extractor.load(&data)?;
            debug!("PDF has {} pages", extractor.page_count());
            Ok(extractor.extract_text()?)
        }
        "txt" => Ok(fs::read_to_string(path)?),
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    }
}

pub fn format_outcome(outcome: &DocumentOutcome, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(outcome)?),
        OutputFormat::Csv => match outcome {
            DocumentOutcome::Extracted { record } => format_record_csv(record),
            DocumentOutcome::Unsupported { issuer, .. } => {
                anyhow::bail!("Unsupported issuer: {}", issuer)
            }
            DocumentOutcome::Failed { error, .. } => anyhow::bail!("Processing failed: {}", error),
        },
        OutputFormat::Text => match outcome {
            DocumentOutcome::Extracted { record } => Ok(format_record_text(record)),
            DocumentOutcome::Unsupported { issuer, .. } => {
                anyhow::bail!("Unsupported issuer: {}", issuer)
            }
            DocumentOutcome::Failed { error, .. } => anyhow::bail!("Processing failed: {}", error),
        },
    }
}

pub const CSV_HEADER: [&str; 9] = [
    "file",
    "issuer",
    "customer_name",
    "card_last4",
    "card_type",
    "billing_cycle_start",
    "billing_cycle_end",
    "payment_due_date",
    "total_amount_due",
];

pub fn csv_row(record: &StatementRecord) -> [String; 9] {
    let or_placeholder = |v: Option<String>| v.unwrap_or_else(|| PLACEHOLDER.to_string());
    [
        record.source_file.clone(),
        record.issuer.to_string(),
        or_placeholder(record.customer_name.clone()),
        or_placeholder(record.card_last4.clone()),
        or_placeholder(record.card_type.map(|t| t.to_string())),
        or_placeholder(record.billing_cycle.map(|c| c.start.to_string())),
        or_placeholder(record.billing_cycle.map(|c| c.end.to_string())),
        or_placeholder(record.payment_due_date.map(|d| d.to_string())),
        or_placeholder(record.total_amount_due.as_ref().map(|a| a.formatted.clone())),
    ]
}

fn format_record_csv(record: &StatementRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(CSV_HEADER)?;
    wtr.write_record(csv_row(record))?;
    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_record_text(record: &StatementRecord) -> String {
    let row = csv_row(record);
    let mut output = String::new();

    output.push_str(&format!("Statement: {}\n", record.source_file));
    output.push_str(&format!("Issuer: {}\n", record.issuer));
    output.push('\n');

    output.push_str(&format!("Customer:  {}\n", row[2]));
    output.push_str(&format!("Card:      **** {} ({})\n", row[3], row[4]));
    output.push_str(&format!("Cycle:     {} to {}\n", row[5], row[6]));
    output.push_str(&format!("Due date:  {}\n", row[7]));
    output.push_str(&format!("Total due: {}\n", row[8]));

    if !record.transaction_preview.is_empty() {
        output.push('\n');
        output.push_str(&format!(
            "Transactions ({} lines):\n",
            record.transaction_preview.len()
        ));
        for line in &record.transaction_preview {
            output.push_str(&format!("  {}\n", line));
        }
    }

    output
}
