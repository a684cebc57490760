//! Parse command - extract the record from a single text file.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use factsheet_core::{CascadeExtractor, ExtractionResult, FactsheetParser, FinancialRecord};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Input text file, or `-` for stdin
    #[arg(required = true)]
    input: PathBuf,

    /// Identifier for the record (default: file stem)
    #[arg(long)]
    id: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Show which strategy resolved each field
    #[arg(long)]
    explain: bool,
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

pub async fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;
    let extractor = CascadeExtractor::new(&config.extraction)?;

    let from_stdin = args.input.as_os_str() == "-";
    let text = if from_stdin {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        String::from_utf8_lossy(&buf).into_owned()
    } else {
        if !args.input.exists() {
            anyhow::bail!("Input file not found: {}", args.input.display());
        }
        String::from_utf8_lossy(&fs::read(&args.input)?).into_owned()
    };

    let identifier = match (&args.id, from_stdin) {
        (Some(id), _) => id.clone(),
        (None, true) => "stdin".to_string(),
        (None, false) => args
            .input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("document")
            .to_string(),
    };

    info!("Parsing {} as {}", args.input.display(), identifier);
    let result = extractor.parse(&identifier, Some(&text));

    let output = format_record(&result.record, args.format)?;

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

    if args.explain {
        eprintln!("{}", explain(&result));
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

pub fn format_record(record: &FinancialRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => format_records_csv(std::slice::from_ref(record)),
        OutputFormat::Text => Ok(format_record_text(record)),
    }
}

/// Header plus one row per record; missing values are empty cells.
pub fn format_records_csv(records: &[FinancialRecord]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["identifier", "nav", "nav_date", "currency", "nav_raw", "nav_date_raw"])?;

    for record in records {
        wtr.write_record([
            record.identifier(),
            &record.nav().map(|n| n.to_string()).unwrap_or_default(),
            &record.nav_date().map(|d| d.to_string()).unwrap_or_default(),
            record.currency().unwrap_or(""),
            record.nav_raw().unwrap_or(""),
            record.nav_date_raw().unwrap_or(""),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_record_text(record: &FinancialRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!("Fund: {}\n", record.identifier()));
    output.push_str(&format!("  NAV:      {}\n", or_dash(record.nav().map(|n| n.to_string()))));
    output.push_str(&format!("  NAV date: {}\n", or_dash(record.nav_date().map(|d| d.to_string()))));
    output.push_str(&format!("  Currency: {}\n", or_dash(record.currency().map(str::to_string))));

    output.push_str("\nRaw fields:\n");
    for (label, value) in record.raw_fields() {
        output.push_str(&format!("  {:<22} {}\n", label.default_label(), value.as_deref().unwrap_or("-")));
    }

    output
}

fn explain(result: &ExtractionResult) -> String {
    let mut output = String::new();

    if result.matches.is_empty() {
        output.push_str(&format!("{} No field was found\n", style("ℹ").blue()));
    }
    for m in &result.matches {
        output.push_str(&format!(
            "{} {} = {:?} ({})\n",
            style("ℹ").blue(),
            m.field,
            m.raw,
            m.source
        ));
    }
    for warning in &result.warnings {
        output.push_str(&format!("{} {}\n", style("⚠").yellow(), warning));
    }

    output
}

fn or_dash(value: Option<String>) -> String {
    value.unwrap_or_else(|| "-".to_string())
}
