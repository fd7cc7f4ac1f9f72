//! Batch parsing command for multiple documents.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tokio::sync::Semaphore;
use tracing::{debug, error, warn};

use poparse_core::{DocumentFormat, ParseResult, ParserFactory, ParserKind};

use super::parse::{format_result, parse_document, OutputFormat, Profile};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input glob pattern
    #[arg(required = true)]
    input: String,

    /// Client id whose parser profile applies
    #[arg(long, conflicts_with = "profile")]
    client: Option<u32>,

    /// Parser profile to use when no client is given
    #[arg(short, long, value_enum, default_value = "proforma")]
    profile: Profile,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of parsing a single file.
struct ProcessResult {
    path: PathBuf,
    result: Option<ParseResult>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| DocumentFormat::from_path(p).is_some())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to parse",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let factory = Arc::new(ParserFactory::new(config));
    let kind: ParserKind = args.profile.into();
    let workers = Arc::new(Semaphore::new(args.jobs.max(1)));

    let mut handles = Vec::with_capacity(files.len());
    for path in files {
        let permit = Arc::clone(&workers).acquire_owned().await?;
        let factory = Arc::clone(&factory);
        let client = args.client;

        let task_path = path.clone();
        let handle = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let file_start = Instant::now();
            let outcome = parse_document(&factory, &task_path, client, kind);
            (outcome, file_start.elapsed().as_millis() as u64)
        });
        handles.push((path, handle));
    }

    let mut results = Vec::with_capacity(handles.len());
    for (path, handle) in handles {
        let (outcome, processing_time_ms) = match handle.await {
            Ok(done) => done,
            // A panicking parser fails its own file only
            Err(e) => (Err(anyhow::anyhow!("parser task failed: {}", e)), 0),
        };
        overall_pb.inc(1);

        let processed = match outcome {
            Ok(result) => {
                for warning in &result.warnings {
                    warn!("{}: {}", path.display(), warning);
                }
                ProcessResult { path, result: Some(result), error: None, processing_time_ms }
            }
            Err(e) if args.continue_on_error => {
                warn!("Failed to parse {}: {}", path.display(), e);
                ProcessResult { path, result: None, error: Some(e.to_string()), processing_time_ms }
            }
            Err(e) => {
                error!("Failed to parse {}: {}", path.display(), e);
                overall_pb.abandon();
                anyhow::bail!("Parsing failed for {}: {}", path.display(), e);
            }
        };
        results.push(processed);
    }

    overall_pb.finish_with_message("Complete");

    let successful: Vec<_> = results.iter().filter(|r| r.result.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    if let Some(output_dir) = &args.output_dir {
        for processed in &successful {
            if let Some(result) = &processed.result {
                let output_name = processed
                    .path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("document");
                let output_path =
                    output_dir.join(format!("{}.{}", output_name, args.format.extension()));

                fs::write(&output_path, format_result(result, args.format)?)?;
                debug!("Wrote output to {}", output_path.display());
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    println!();
    println!(
        "{} Parsed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for processed in &failed {
            println!(
                "  - {}: {}",
                processed.path.display(),
                processed.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

/// One row of `summary.csv`.
#[derive(Serialize)]
struct SummaryRecord<'a> {
    filename: &'a str,
    status: &'static str,
    client: &'a str,
    parser: &'static str,
    po_number: &'a str,
    pi_number: &'a str,
    pi_date: &'a str,
    vendor_name: &'a str,
    line_items: usize,
    total_amount: String,
    warnings: usize,
    processing_time_ms: u64,
    error: &'a str,
}

impl<'a> From<&'a ProcessResult> for SummaryRecord<'a> {
    fn from(processed: &'a ProcessResult) -> Self {
        let filename = processed
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        match &processed.result {
            Some(result) => {
                let header = &result.po_details.header;
                Self {
                    filename,
                    status: "success",
                    client: result.client_name.as_deref().unwrap_or(""),
                    parser: result.parser_type.map(|k| k.as_str()).unwrap_or(""),
                    po_number: &header.po_number,
                    pi_number: &header.pi_number,
                    pi_date: header.pi_date.as_deref().unwrap_or(""),
                    vendor_name: &header.vendor_name,
                    line_items: result.line_item_count,
                    total_amount: format!("{:.2}", result.po_details.summary.total_amount),
                    warnings: result.warnings.len(),
                    processing_time_ms: processed.processing_time_ms,
                    error: "",
                }
            }
            None => Self {
                filename,
                status: "error",
                client: "",
                parser: "",
                po_number: "",
                pi_number: "",
                pi_date: "",
                vendor_name: "",
                line_items: 0,
                total_amount: String::new(),
                warnings: 0,
                processing_time_ms: processed.processing_time_ms,
                error: processed.error.as_deref().unwrap_or("unknown error"),
            },
        }
    }
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for processed in results {
        wtr.serialize(SummaryRecord::from(processed))?;
    }
    wtr.flush()?;
    Ok(())
}
