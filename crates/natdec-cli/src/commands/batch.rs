//! Batch processing command for multiple journal files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use futures_util::stream::{self, StreamExt};
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use natdec_core::models::config::NatdecConfig;
use natdec_core::{decrees_stats, BatchReport, ParsedDocument};

use super::process::{format_document, OutputFormat};
use super::{is_supported, parse_file};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory for per-file results
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

    /// Stop at the first file that fails
    #[arg(long)]
    fail_fast: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    document: anyhow::Result<ParsedDocument>,
    processing_time_ms: u64,
}

impl ProcessResult {
    fn name(&self) -> String {
        file_name(&self.path)
    }
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| is_supported(p))
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
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    // Parsing is CPU-bound: run it on blocking threads, keep input order
    let mut pending = stream::iter(files)
        .map(|path| {
            let config = config.clone();
            async move {
                let file_start = Instant::now();
                let worker_path = path.clone();
                let document = tokio::task::spawn_blocking(move || process_single_file(&worker_path, &config))
                    .await
                    .unwrap_or_else(|e| Err(anyhow::anyhow!("worker failed: {}", e)));
                ProcessResult {
                    path,
                    document,
                    processing_time_ms: file_start.elapsed().as_millis() as u64,
                }
            }
        })
        .buffered(args.jobs.max(1));

    let mut results = Vec::new();
    while let Some(result) = pending.next().await {
        overall_pb.inc(1);
        if let Err(e) = &result.document {
            if args.fail_fast {
                error!("Failed to process {}: {}", result.path.display(), e);
                anyhow::bail!("Processing failed: {}", e);
            }
            warn!("Failed to process {}: {}", result.path.display(), e);
        }
        results.push(result);
    }

    overall_pb.finish_and_clear();

    if let Some(output_dir) = &args.output_dir {
        for result in &results {
            if let Ok(document) = &result.document {
                let output_name = result
                    .path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("journal");
                let output_path = output_dir.join(format!("{}.{}", output_name, args.format.extension()));

                fs::write(&output_path, format_document(document, args.format, &config.stats)?)?;
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

        write_summary(&summary_path, &results, &config)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let processed = results.len();
    let report = BatchReport::build(
        results.into_iter().map(|r| (r.name(), r.document)),
        &config.stats,
    );

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        processed,
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(report.documents.len()).green(),
        style(report.failed.len()).red()
    );

    if !report.failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for failed in &report.failed {
            println!("  - {}: {}", failed.name, failed.error);
        }
    }

    if report.is_total_failure() {
        anyhow::bail!("All {} files failed to parse, no report produced", report.failed.len());
    }

    let totals = &report.stats.totals;
    println!();
    println!(
        "{} {} decrees, {} naturalizations",
        style("ℹ").blue(),
        report.stats.decrees.len(),
        totals.naturalizations_count
    );
    for group in totals.departments.iter().take(5) {
        println!("   {:<4} {:<28} {}", group.group.code, group.group.name, group.count);
    }

    Ok(())
}

fn process_single_file(path: &Path, config: &NatdecConfig) -> anyhow::Result<ParsedDocument> {
    parse_file(path, config).map(|(_, document)| document)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_string()
}

fn write_summary(path: &Path, results: &[ProcessResult], config: &NatdecConfig) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "decrees",
        "entries",
        "naturalizations",
        "warnings",
        "segmentation",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result.name();
        let time_ms = result.processing_time_ms.to_string();

        match &result.document {
            Ok(document) => {
                let stats = decrees_stats(&document.decrees, &config.stats);
                wtr.write_record([
                    filename.as_str(),
                    "success",
                    document.decrees.len().to_string().as_str(),
                    document.entry_count().to_string().as_str(),
                    stats.totals.naturalizations_count.to_string().as_str(),
                    document.warnings.len().to_string().as_str(),
                    serde_json::to_value(document.segmentation)?.as_str().unwrap_or(""),
                    time_ms.as_str(),
                    "",
                ])?;
            }
            Err(e) => {
                let error = e.to_string();
                wtr.write_record([
                    filename.as_str(),
                    "error",
                    "",
                    "",
                    "",
                    "",
                    "",
                    time_ms.as_str(),
                    error.as_str(),
                ])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
