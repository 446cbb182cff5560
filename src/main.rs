//! reg-diff CLI
//!
//! Prints the keys and values of registry hive A that are missing from hive B.

use clap::{Parser, ValueEnum};
use reg_diff::report::{render, ReportFormat, ReportOptions};
use reg_diff::{compare_files, Result};
use std::io::{self, Write};
use std::path::{self, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "reg-diff", version)]
#[command(about = "Prints registryA.difference(registryB)", long_about = None)]
struct Cli {
    /// Print the size of A and of the difference before the listing
    #[arg(long)]
    debug: bool,

    /// Report format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Primary registry file to diff with
    file_a: PathBuf,

    /// Second registry file to diff with
    file_b: PathBuf,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    #[cfg(feature = "json")]
    Json,
}

impl From<Format> for ReportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => ReportFormat::Text,
            #[cfg(feature = "json")]
            Format::Json => ReportFormat::Json,
        }
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("reg_diff=warn")),
        )
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let file_a = path::absolute(&cli.file_a)?;
    let file_b = path::absolute(&cli.file_b)?;
    let options = ReportOptions {
        debug: cli.debug,
        format: cli.format.into(),
    };

    let result = compare_files(&file_a, &file_b)?;

    let mut out = io::stdout().lock();
    render(&result, &file_a, &options, &mut out)?;
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
