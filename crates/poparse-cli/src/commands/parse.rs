//! Parse command - extract PO details and line items from a single document.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, info};

use poparse_core::{ParseResult, ParserFactory, ParserKind};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Input file (xlsx, xls, ods, csv or pdf)
    #[arg(required = true)]
    input: PathBuf,

    /// Client id whose parser profile applies
    #[arg(long, conflicts_with = "profile")]
    client: Option<u32>,

    /// Parser profile to use when no client is given
    #[arg(short, long, value_enum, default_value = "proforma")]
    profile: Profile,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum Profile {
    /// Template-free BOQ proforma invoice
    Proforma,
    /// Store purchase order
    Po,
}

impl From<Profile> for ParserKind {
    fn from(profile: Profile) -> Self {
        match profile {
            Profile::Proforma => ParserKind::ProformaInvoice,
            Profile::Po => ParserKind::PurchaseOrder,
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV of line items
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension for written outputs.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Parsing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Parsing {}...", args.input.display()));

    let factory = ParserFactory::new(config);
    let result = parse_document(&factory, &args.input, args.client, args.profile.into());

    pb.finish_and_clear();
    let result = result?;

    if !result.warnings.is_empty() {
        eprintln!("{}", style("Warnings:").yellow());
        for warning in &result.warnings {
            eprintln!("  - {}", warning);
        }
    }

    let output = format_result(&result, args.format)?;

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

/// Parse one file for a client, or with an explicit profile.
pub fn parse_document(
    factory: &ParserFactory,
    path: &Path,
    client: Option<u32>,
    kind: ParserKind,
) -> anyhow::Result<ParseResult> {
    let result = match client {
        Some(client_id) => factory.parse_file(path, client_id)?,
        None => factory.parse_with(path, kind)?,
    };
    Ok(result)
}

pub fn format_result(result: &ParseResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Csv => format_csv(result),
        OutputFormat::Text => Ok(format_text(result)),
    }
}

/// One CSV record per line item, keyed by the document identifiers.
#[derive(Serialize)]
struct LineItemRecord<'a> {
    po_number: &'a str,
    pi_number: &'a str,
    sr: Option<i64>,
    boq_name: &'a str,
    hsn_code: &'a str,
    quantity: f64,
    unit: &'a str,
    rate: f64,
    taxable_amount: f64,
    gst_amount: f64,
    gross_amount: f64,
}

fn format_csv(result: &ParseResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    let header = &result.po_details.header;

    for item in &result.line_items {
        wtr.serialize(LineItemRecord {
            po_number: &header.po_number,
            pi_number: &header.pi_number,
            sr: item.sr,
            boq_name: &item.boq_name,
            hsn_code: &item.hsn_code,
            quantity: item.quantity,
            unit: &item.unit,
            rate: item.rate,
            taxable_amount: item.taxable_amount,
            gst_amount: item.tax_amount,
            gross_amount: item.gross_amount,
        })?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(result: &ParseResult) -> String {
    let header = &result.po_details.header;
    let summary = &result.po_details.summary;
    let mut output = String::new();

    if let (Some(id), Some(name)) = (result.client_id, &result.client_name) {
        output.push_str(&format!("Client: {} ({})\n", name, id));
    }
    if !header.po_number.is_empty() {
        output.push_str(&format!("PO: {}\n", header.po_number));
    }
    if let Some(date) = &header.po_date {
        output.push_str(&format!("PO date: {}\n", date));
    }
    if !header.pi_number.is_empty() {
        output.push_str(&format!("PI: {}\n", header.pi_number));
    }
    if let Some(date) = &header.pi_date {
        output.push_str(&format!("PI date: {}\n", date));
    }
    output.push('\n');

    output.push_str("Vendor:\n");
    output.push_str(&format!("  {}\n", header.vendor_name));
    if !header.vendor_gstin.is_empty() {
        output.push_str(&format!("  GSTIN: {}\n", header.vendor_gstin));
    }
    if !header.vendor_address.is_empty() {
        output.push_str(&format!("  {}\n", header.vendor_address));
    }
    output.push('\n');

    output.push_str("Bill to:\n");
    output.push_str(&format!("  {}\n", header.client_name));
    if !header.bill_to_gstin.is_empty() {
        output.push_str(&format!("  GSTIN: {}\n", header.bill_to_gstin));
    }
    if !header.bill_to_address.is_empty() {
        output.push_str(&format!("  {}\n", header.bill_to_address));
    }
    if !header.store_id.is_empty() || !header.site_name.is_empty() {
        output.push_str(&format!("  Store: {} {}\n", header.store_id, header.site_name));
    }
    output.push('\n');

    output.push_str(&format!("Line items ({}):\n", result.line_item_count));
    for item in &result.line_items {
        output.push_str(&format!(
            "  {:>4}  {:<40} {:>10} {:<6} x {:>10.2} = {:>12.2}\n",
            item.sr.map(|s| s.to_string()).unwrap_or_default(),
            item.boq_name,
            item.quantity,
            item.unit,
            item.rate,
            item.gross_amount
        ));
    }
    output.push('\n');

    output.push_str("Summary:\n");
    output.push_str(&format!("  Subtotal: {:.2}\n", summary.subtotal));
    output.push_str(&format!("  CGST:     {:.2}\n", summary.cgst));
    output.push_str(&format!("  SGST:     {:.2}\n", summary.sgst));
    output.push_str(&format!("  IGST:     {:.2}\n", summary.igst));
    output.push_str(&format!("  Total:    {:.2}\n", summary.total_amount));

    output
}
