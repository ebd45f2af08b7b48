//! xlsxcolumns CLI
//!
//! Extracts columns C, D, E, F and H, I, J, K from the first sheet of an Excel
//! file and writes the text report next to the input (or to stdout).

use clap::{Parser, ValueEnum};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing::info;
use xlsxcolumns::{DateFormat, ExtractError, ExtractorBuilder, ReportFormat};

#[derive(Parser)]
#[command(name = "xlsxcolumns")]
#[command(about = "Extract columns C-F and H-K from an Excel file into a text report")]
#[command(version)]
struct Cli {
    /// Input workbook (.xlsx or .xls)
    input: PathBuf,

    /// Output path (default: extracted_columns_<name>.txt next to the input)
    #[arg(short, long, conflicts_with = "stdout")]
    output: Option<PathBuf>,

    /// Write the report to stdout instead of a file
    #[arg(long)]
    stdout: bool,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// chrono format string for date cells (default: ISO 8601)
    #[arg(long)]
    date_format: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

impl From<Format> for ReportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => ReportFormat::Text,
            Format::Json => ReportFormat::Json,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "xlsxcolumns=debug"
    } else {
        "xlsxcolumns=warn"
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    if let Err(e) = run(&cli) {
        handle_error(e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), ExtractError> {
    let date_format = match &cli.date_format {
        Some(format) => DateFormat::Custom(format.clone()),
        None => DateFormat::Iso8601,
    };

    let extractor = ExtractorBuilder::new()
        .with_report_format(cli.format.into())
        .with_date_format(date_format)
        .build()?;

    let report = extractor.convert_file(&cli.input)?;

    if cli.stdout {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(report.content.as_bytes())?;
        handle.flush()?;
        return Ok(());
    }

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&cli.input, &report.file_name));
    std::fs::write(&output, &report.content)?;

    info!(output = %output.display(), "report written");
    println!(
        "Extraction completed: {} -> {}",
        cli.input.display(),
        output.display()
    );
    Ok(())
}

fn default_output_path(input: &Path, file_name: &str) -> PathBuf {
    match input.parent() {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}

fn handle_error(error: ExtractError) {
    match error {
        ExtractError::UnsupportedFormat { file_name } => {
            eprintln!("Please upload a valid Excel file (.xlsx or .xls)");
            eprintln!("  Rejected: {}", file_name);
        }
        ExtractError::Parse(parse_err) => {
            eprintln!("Error processing file: {}", parse_err);
            eprintln!("The file may not be a valid Excel file or may be corrupted.");
        }
        ExtractError::Io(io_err) => {
            eprintln!("I/O Error: {}", io_err);
            eprintln!("Please check that the file exists and you have permission to access it.");
        }
        ExtractError::Config(msg) => {
            eprintln!("Configuration Error: {}", msg);
        }
        ExtractError::SecurityViolation(msg) => {
            eprintln!("Security Violation: {}", msg);
        }
        ExtractError::Json(json_err) => {
            eprintln!("JSON Error: {}", json_err);
        }
    }
}
