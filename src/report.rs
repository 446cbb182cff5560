//! Rendering a [`DiffResult`] for the user.

use crate::diff::DiffResult;
use std::io::{self, Write};
use std::path::Path;

/// Output format of a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// Plain text listing, one path per line.
    #[default]
    Text,
    /// A single JSON object.
    #[cfg(feature = "json")]
    Json,
}

/// How a report is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportOptions {
    /// Also print |A| and |A \ B| before the listing.
    pub debug: bool,
    /// Output format.
    pub format: ReportFormat,
}

/// Writes the report for `result`, labelled with the path of the hive the
/// unique entries came from.
///
/// Paths are listed in sorted order. An empty difference still produces a
/// labelled, explicitly empty listing.
///
/// # Errors
///
/// Only fails if writing to `out` fails.
pub fn render<W: Write>(
    result: &DiffResult,
    source: &Path,
    options: &ReportOptions,
    out: &mut W,
) -> io::Result<()> {
    match options.format {
        ReportFormat::Text => render_text(result, source, options, out),
        #[cfg(feature = "json")]
        ReportFormat::Json => render_json(result, source, options, out),
    }
}

fn render_text<W: Write>(
    result: &DiffResult,
    source: &Path,
    options: &ReportOptions,
    out: &mut W,
) -> io::Result<()> {
    if options.debug {
        writeln!(out, "count-A: {}", result.source_len())?;
        writeln!(out)?;
        writeln!(out, "count-A !B: {}", result.len())?;
        writeln!(out)?;
    }

    writeln!(out, "UNIQUE-A: {}", source.display())?;
    if result.is_empty() {
        writeln!(out, "  (empty)")?;
    }
    for path in result.sorted() {
        writeln!(out, "  {}", path)?;
    }
    writeln!(out)
}

#[cfg(feature = "json")]
#[derive(serde::Serialize)]
struct JsonReport<'a> {
    source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    count_a: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    count_unique: Option<usize>,
    unique: Vec<&'a str>,
}

#[cfg(feature = "json")]
fn render_json<W: Write>(
    result: &DiffResult,
    source: &Path,
    options: &ReportOptions,
    out: &mut W,
) -> io::Result<()> {
    let report = JsonReport {
        source: source.display().to_string(),
        count_a: options.debug.then(|| result.source_len()),
        count_unique: options.debug.then(|| result.len()),
        unique: result.sorted().into_iter().map(|p| p.as_str()).collect(),
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)
}
