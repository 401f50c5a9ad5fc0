//! Inspect command - run extraction on a single invoice and dump the record.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use console::style;

use luz_core::pdf::PageTextSource;
use luz_core::{dispatch, sanitize, Bill, PdfPages};

/// Arguments for the inspect command.
#[derive(Args)]
pub struct InspectArgs {
    /// Input invoice PDF
    #[arg(required = true)]
    input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Dump the raw capture instead of the sanitized record
    #[arg(long)]
    raw: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

pub fn run(args: InspectArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("input file not found: {}", args.input.display());
    }

    let data = fs::read(&args.input)?;
    let pdf = PdfPages::load(&data)
        .with_context(|| format!("cannot load '{}'", args.input.display()))?;
    let pages = pdf.page_texts()?;

    let first = pages
        .first()
        .context("document has no page text")?;
    let provider = dispatch(&config.extraction, first)
        .context("no provider marker matched on page 1")?;

    eprintln!("{} Detected provider: {}", style("ℹ").blue(), provider);

    let raw_bill = provider
        .extract(&pages, &config.extraction.owner_marker)
        .context("extraction produced no record")?;

    if args.raw {
        println!("{}", serde_json::to_string_pretty(&raw_bill)?);
        return Ok(());
    }

    if !raw_bill.is_ours {
        anyhow::bail!("document does not carry the owner marker");
    }

    let bill = sanitize(&raw_bill)
        .context("record failed sanitization (re-run with -v for details)")?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&bill)?),
        OutputFormat::Text => print!("{}", format_bill(&bill)),
    }

    Ok(())
}

fn format_bill(bill: &Bill) -> String {
    let mut output = String::new();

    output.push_str(&format!("Bill:   {}\n", bill.bill_id));
    output.push_str(&format!("CUPS:   {}\n", bill.cups));
    output.push_str(&format!("Issued: {}\n", bill.billing_date.format("%d/%m/%Y")));
    output.push_str(&format!(
        "Period: {} - {}\n",
        bill.period_start.format("%d/%m/%Y"),
        bill.period_end.format("%d/%m/%Y")
    ));
    output.push('\n');

    output.push_str(&format!("Power capacity:  {} EUR\n", bill.power_capacity));
    output.push_str(&format!("Energy consumed: {} EUR\n", bill.energy_consumed));
    output.push_str(&format!("Total:           {} EUR\n", bill.total_first));
    if bill.is_rectification {
        output.push_str(&format!(
            "Rectification: second captured total is {} EUR\n",
            bill.total_second
        ));
    }
    output.push('\n');

    output.push_str(&format!(
        "Consumption: P1 {}  P2 {}  P3 {}\n",
        bill.tariff_p1, bill.tariff_p2, bill.tariff_p3
    ));
    if let (Some(p4), Some(p5), Some(p6)) = (bill.tariff_p4, bill.tariff_p5, bill.tariff_p6) {
        output.push_str(&format!("             P4 {}  P5 {}  P6 {}\n", p4, p5, p6));
    }

    output
}
