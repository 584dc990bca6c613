//! Process command - extract decrees from a single journal file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::debug;

use natdec_core::audit::{audit_entries, EntryAudit};
use natdec_core::models::config::StatsConfig;
use natdec_core::stats::department_label;
use natdec_core::{decrees_stats, DecreesStats, ParsedDecree, ParsedDocument, SegmentationMode, Warning};

use super::{load_config, parse_file};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF or flattened .txt)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Compare the "Dt." references of the text with the parsed entries
    #[arg(long)]
    audit: bool,

    /// Print warnings collected while parsing
    #[arg(long)]
    show_warnings: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output, one row per entry
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Text => "txt",
        }
    }
}

/// JSON document written by `process` and `batch`.
#[derive(Serialize)]
struct DocumentOutput<'a> {
    segmentation: SegmentationMode,
    decrees: &'a [ParsedDecree],
    stats: DecreesStats,
    warnings: &'a [Warning],
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    pb.set_message(format!("Parsing {}...", args.input.display()));

    let (text, document) = parse_file(&args.input, &config)?;

    pb.finish_and_clear();

    let output = format_document(&document, args.format, &config.stats)?;

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

    if document.segmentation == SegmentationMode::Fallback {
        eprintln!(
            "{} Decree boundaries not found, the document was read as a single decree",
            style("⚠").yellow()
        );
    }

    if args.show_warnings && !document.warnings.is_empty() {
        eprintln!("{}", style("Warnings:").yellow());
        for warning in &document.warnings {
            eprintln!("  - {}", warning);
        }
    }

    if args.audit {
        print_audit(&audit_entries(&text, &document.decrees));
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Render a parsed document in the requested format.
pub fn format_document(
    document: &ParsedDocument,
    format: OutputFormat,
    stats_config: &StatsConfig,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            let output = DocumentOutput {
                segmentation: document.segmentation,
                decrees: &document.decrees,
                stats: decrees_stats(&document.decrees, stats_config),
                warnings: &document.warnings,
            };
            Ok(serde_json::to_string_pretty(&output)?)
        }
        OutputFormat::Csv => format_csv(&document.decrees),
        OutputFormat::Text => Ok(format_text(
            &document.decrees,
            &decrees_stats(&document.decrees, stats_config),
        )),
    }
}

fn format_csv(decrees: &[ParsedDecree]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "decree",
        "decree_date",
        "entry",
        "last_name",
        "first_names",
        "sex",
        "birth_date",
        "birth_commune",
        "birth_country",
        "type",
        "ministry_number",
        "department",
        "department_name",
    ])?;

    for decree in decrees {
        let date = decree.date.map(|d| d.to_string()).unwrap_or_default();
        for entry in &decree.entries {
            let parsed = &entry.parsed;
            let place = parsed.birth_data.place.as_ref();
            let sex = parsed.sex.to_string();
            let first_names = parsed.name.first_names.join(" ");
            let ministry_number = parsed.ministry_number.to_string();
            wtr.write_record([
                decree.reference_number.as_str(),
                date.as_str(),
                parsed.decree_reference.entry_id.as_str(),
                parsed.name.last_name.as_str(),
                first_names.as_str(),
                sex.as_str(),
                parsed.birth_data.date.as_str(),
                place.and_then(|p| p.commune.as_deref()).unwrap_or(""),
                place.and_then(|p| p.country.as_deref()).unwrap_or(""),
                parsed.entry_type.as_str(),
                ministry_number.as_str(),
                parsed.department.as_str(),
                department_label(&parsed.department),
            ])?;
        }
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(decrees: &[ParsedDecree], stats: &DecreesStats) -> String {
    let mut output = String::new();

    for (decree, decree_stats) in decrees.iter().zip(&stats.decrees) {
        let date = decree
            .date
            .map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|| "unknown date".to_string());
        output.push_str(&format!("Decree {} ({})\n", decree.reference_number, date));
        output.push_str(&format!("  Entries:          {}\n", decree.entries.len()));
        output.push_str(&format!(
            "  Naturalizations:  {}\n",
            decree_stats.naturalizations_count
        ));
        output.push('\n');
    }

    output.push_str(&format!(
        "Total naturalizations: {}\n",
        stats.totals.naturalizations_count
    ));

    if !stats.totals.ministry_series.is_empty() {
        output.push_str("\nMinistry series:\n");
        for group in &stats.totals.ministry_series {
            output.push_str(&format!("  {:<12} {}\n", group.group.to_string(), group.count));
        }
    }

    if !stats.totals.departments.is_empty() {
        output.push_str("\nDepartments:\n");
        for group in &stats.totals.departments {
            output.push_str(&format!(
                "  {:<4} {:<28} {}\n",
                group.group.code, group.group.name, group.count
            ));
        }
    }

    output
}

fn print_audit(audit: &EntryAudit) {
    eprintln!();
    eprintln!(
        "{} Audit: {} references in the text, {} entries parsed",
        style("ℹ").blue(),
        audit.expected,
        audit.parsed
    );
    if audit.is_clean() {
        eprintln!("  {}", style("every reference was parsed").green());
        return;
    }
    for missing in &audit.missing {
        eprintln!("  missing     {} ({})", missing.reference, missing.count);
    }
    for unexpected in &audit.unexpected {
        eprintln!("  unexpected  {} ({})", unexpected.reference, unexpected.count);
    }
    for mismatch in &audit.count_mismatches {
        eprintln!(
            "  mismatch    {}: {} in text, {} parsed",
            mismatch.reference, mismatch.expected, mismatch.parsed
        );
    }
}
