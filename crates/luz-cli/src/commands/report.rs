//! Report command - batch-process a directory of invoices into a workbook.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, info_span, warn};

use luz_core::pdf::PageTextSource;
use luz_core::report::TabularSink;
use luz_core::{build_report, process_pages, Bill, BillLedger, LuzConfig, PdfPages};

use crate::sink::XlsxSink;

/// Arguments for the report command.
#[derive(Args)]
pub struct ReportArgs {
    /// Directory to scan for invoice PDFs
    #[arg(short, long)]
    input_dir: Option<PathBuf>,

    /// Report workbook path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Limit the number of files processed (-1 = no limit)
    #[arg(short, long)]
    limit: Option<i64>,
}

pub fn run(args: ReportArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    let input_dir = args.input_dir.unwrap_or_else(|| config.input.dir.clone());
    let output = args.output.unwrap_or_else(|| config.report.output.clone());
    let limit = args.limit.unwrap_or(config.input.limit);

    if !input_dir.is_dir() {
        anyhow::bail!("input directory '{}' does not exist", input_dir.display());
    }

    info!("reading files from '{}'", input_dir.display());
    let mut files = Vec::new();
    collect_pdfs(&input_dir, &mut files)?;
    if files.is_empty() {
        anyhow::bail!("no invoice files found in '{}'", input_dir.display());
    }
    debug!("found {} files in '{}'", files.len(), input_dir.display());

    if limit > 0 && files.len() > limit as usize {
        files.truncate(limit as usize);
        warn!("limiting to {} files", files.len());
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let mut ledger = BillLedger::new();
    let mut skipped = 0usize;

    for path in &files {
        let span = info_span!("invoice", file = %path.display());
        let _guard = span.enter();

        match process_file(path, &config) {
            Some(bill) => ledger.insert(bill),
            None => skipped += 1,
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    let report = build_report(&config.report, &ledger);
    let mut sink = XlsxSink::new(&output);
    sink.write(&report)?;

    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        files.len(),
        start.elapsed()
    );
    println!(
        "   {} bills across {} supply points, {} skipped",
        style(ledger.bill_count()).green(),
        ledger.supply_point_count(),
        if skipped > 0 {
            style(skipped).yellow()
        } else {
            style(skipped).dim()
        }
    );
    println!(
        "{} Report written to {}",
        style("✓").green(),
        output.display()
    );

    Ok(())
}

/// One file through the whole pipeline. Every failure is logged and turned
/// into a skip; only the report sink can fail the run.
fn process_file(path: &Path, config: &LuzConfig) -> Option<Bill> {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(e) => {
            warn!("cannot read file: {}", e);
            return None;
        }
    };

    let pdf = match PdfPages::load(&data) {
        Ok(pdf) => pdf,
        Err(e) => {
            warn!("cannot load PDF: {}", e);
            return None;
        }
    };

    let pages = match pdf.page_texts() {
        Ok(pages) => pages,
        Err(e) => {
            warn!("cannot extract page text: {}", e);
            return None;
        }
    };

    process_pages(&config.extraction, &pages)
}

/// Recursively collect files with a case-insensitive `.pdf` extension, in
/// directory-walk order.
fn collect_pdfs(dir: &Path, files: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_pdfs(&path, files)?;
        } else if path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
        {
            files.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_pdfs_is_recursive_and_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("2024").join("marzo");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("a.pdf"), b"x").unwrap();
        fs::write(nested.join("b.PDF"), b"x").unwrap();
        fs::write(nested.join("notes.txt"), b"x").unwrap();

        let mut files = Vec::new();
        collect_pdfs(dir.path(), &mut files).unwrap();
        assert_eq!(files.len(), 2);
    }
}
