//! File exporters for dumped curator reviews.
//!
//! Column names and value spellings match the files earlier dumps produced,
//! so downstream spreadsheets and scripts keep working: snake_case keys,
//! `True`/`False` booleans in CSV, and a UTF-8 BOM so Excel picks the right
//! encoding for Korean review text.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::ValueEnum;
use curdump_core::{CuratorExport, ReviewRecord};

const CSV_HEADER: [&str; 7] = [
    "appid",
    "url",
    "curator_url",
    "review",
    "review_has_url",
    "review_url_count",
    "type",
];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ExportFormat {
    /// Full document with curator metadata
    Json,
    /// One row per game
    Csv,
    /// Store URLs, one per line
    Txt,
    /// App ids, one per line
    Appids,
}

impl ExportFormat {
    /// File extension used for default output names.
    pub(crate) fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Txt | Self::Appids => "txt",
        }
    }
}

/// `curator_<id>_reviews.<ext>` in the working directory.
pub(crate) fn default_output_path(curator_id: u64, format: ExportFormat) -> PathBuf {
    PathBuf::from(format!(
        "curator_{curator_id}_reviews.{}",
        format.extension()
    ))
}

/// Writes `export` to `path` in `format`, creating parent directories.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created or written.
pub(crate) fn write_export(
    format: ExportFormat,
    path: &Path,
    export: &CuratorExport,
) -> anyhow::Result<()> {
    ensure_parent_dir(path)?;
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    match format {
        ExportFormat::Json => write_json(&mut writer, export)?,
        ExportFormat::Csv => write_csv(&mut writer, &export.games)?,
        ExportFormat::Txt => write_lines(&mut writer, &export.games, |r| r.product_url.as_str())?,
        ExportFormat::Appids => write_lines(&mut writer, &export.games, |r| r.product_id.as_str())?,
    }

    writer
        .flush()
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), ?format, games = export.total_games, "export written");
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    Ok(())
}

fn write_json<W: Write>(writer: &mut W, export: &CuratorExport) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, export).context("failed to serialize JSON export")?;
    writeln!(writer)?;
    Ok(())
}

fn write_csv<W: Write>(writer: &mut W, records: &[ReviewRecord]) -> anyhow::Result<()> {
    writer.write_all(UTF8_BOM)?;
    let mut csv_writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);

    csv_writer.write_record(CSV_HEADER)?;
    for record in records {
        let url_count = record.review_url_count.to_string();
        csv_writer.write_record([
            record.product_id.as_str(),
            record.product_url.as_str(),
            record.curator_url.as_str(),
            record.review_text.as_str(),
            csv_bool(record.review_has_url),
            url_count.as_str(),
            record.sentiment.as_str(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

fn csv_bool(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

fn write_lines<W, F>(writer: &mut W, records: &[ReviewRecord], field: F) -> anyhow::Result<()>
where
    W: Write,
    F: Fn(&ReviewRecord) -> &str,
{
    for record in records {
        writeln!(writer, "{}", field(record))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "export_test.rs"]
mod tests;
