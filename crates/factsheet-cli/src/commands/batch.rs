//! Batch command - extract every text file in a directory and write a snapshot.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use chrono::{Local, NaiveDate};
use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use factsheet_core::{
    CascadeExtractor, Document, DocumentSource, FinancialRecord, TextDirSource, TextFileSource,
};

use super::parse::format_records_csv;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Directory of text files, or a glob pattern
    #[arg(required = true)]
    input: String,

    /// Snapshot output file
    #[arg(short, long, default_value = "latest.json")]
    output: PathBuf,

    /// Also write a summary CSV to this path
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,
}

/// Snapshot written by a batch run.
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub run_date: NaiveDate,
    pub funds: &'a [FinancialRecord],
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;
    let extractor = Arc::new(CascadeExtractor::new(&config.extraction)?);

    let documents = collect_documents(&args.input)?;

    if documents.is_empty() {
        anyhow::bail!("No text files found for: {}", args.input);
    }

    println!(
        "{} Found {} documents to process",
        style("ℹ").blue(),
        documents.len()
    );

    let pb = ProgressBar::new(documents.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} documents")?
            .progress_chars("=>-"),
    );

    let records = extract_all(documents, extractor, args.jobs.max(1), &pb).await?;
    pb.finish_and_clear();

    for record in &records {
        println!("{}", result_line(record));
    }

    let snapshot = Snapshot {
        run_date: Local::now().date_naive(),
        funds: &records,
    };
    write_snapshot(&args.output, &snapshot)?;
    println!(
        "{} Snapshot written to {}",
        style("✓").green(),
        args.output.display()
    );

    if let Some(summary_path) = &args.summary {
        fs::write(summary_path, format_records_csv(&records)?)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let resolved = records.iter().filter(|r| r.nav().is_some()).count();
    println!();
    println!(
        "{} Processed {} documents in {:?}",
        style("✓").green(),
        records.len(),
        start.elapsed()
    );
    println!("  NAV found: {}", style(resolved).green());
    if resolved < records.len() {
        println!("  NAV missing: {}", style(records.len() - resolved).yellow());
    }

    Ok(())
}

/// A directory yields its `*.txt` files; anything else is treated as a glob pattern.
fn collect_documents(input: &str) -> anyhow::Result<Vec<Document>> {
    let path = Path::new(input);
    if path.is_dir() {
        return Ok(TextDirSource::new(path).documents()?);
    }

    let files: Vec<PathBuf> = glob(input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();
    debug!("Pattern {} matched {} files", input, files.len());

    Ok(TextFileSource::new(files).documents()?)
}

/// Run the shared extractor on blocking tasks, at most `jobs` at a time.
///
/// Records come back in document order regardless of completion order.
async fn extract_all(
    documents: Vec<Document>,
    extractor: Arc<CascadeExtractor>,
    jobs: usize,
    pb: &ProgressBar,
) -> anyhow::Result<Vec<FinancialRecord>> {
    let permits = Arc::new(Semaphore::new(jobs));
    let mut tasks = JoinSet::new();

    for (index, document) in documents.into_iter().enumerate() {
        let extractor = extractor.clone();
        let permit = permits.clone().acquire_owned().await?;
        tasks.spawn_blocking(move || {
            let _permit = permit;
            if document.text.is_none() {
                warn!("{}: no text, emitting empty record", document.identifier);
            }
            let record = extractor.extract(&document.identifier, document.text.as_deref());
            (index, record)
        });
    }

    let mut indexed = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        indexed.push(joined?);
        pb.inc(1);
    }

    indexed.sort_by_key(|(index, _)| *index);
    Ok(indexed.into_iter().map(|(_, record)| record).collect())
}

fn write_snapshot(path: &Path, snapshot: &Snapshot<'_>) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(snapshot)?)?;
    debug!("Wrote snapshot to {}", path.display());
    Ok(())
}

fn result_line(record: &FinancialRecord) -> String {
    if record.nav().is_none() && record.nav_date().is_none() {
        return format!("{} {}: no NAV found", style("⚠").yellow(), record.identifier());
    }

    format!(
        "{} {}: nav={} date={} currency={}",
        style("✓").green(),
        record.identifier(),
        record.nav().map(|n| n.to_string()).unwrap_or_else(|| "-".into()),
        record.nav_date().map(|d| d.to_string()).unwrap_or_else(|| "-".into()),
        record.currency().unwrap_or("-")
    )
}
