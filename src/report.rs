//! Sorting, selection and rendering of scanned records.
//!
//! Records are sorted ascending by [`record::compare`] and then reversed, so
//! the largest counts come first and equal counts are ordered by name,
//! descending. Selection then drops records below `min_count`, applies the
//! name prefix filter, and truncates to `limit`.

use crate::config::ReportConfig;
use crate::record::{self, Count, Record};
use serde::Deserialize;
use std::io::Write;

/// How the selected records are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One `name: count` line per record
    #[default]
    Text,
    /// A JSON array of `{"name", "count"}` objects
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Sort largest first: ascending by count then name, reversed.
///
/// The sort is stable, so records equal on both keys end up in reverse
/// input order. Output is identical across runs either way.
pub fn sort_descending(records: &mut [Record]) {
    records.sort_by(record::compare);
    records.reverse();
}

/// Pick the records to print from an already sorted slice.
pub fn select<'a>(records: &'a [Record], config: &ReportConfig) -> Vec<&'a Record> {
    let min_count = Count::from(config.min_count);
    let selected = records
        .iter()
        // Zero counts are never printed, whatever the config says
        .filter(|r| !r.count.is_zero() && r.count >= min_count)
        .filter(|r| match &config.filter {
            Some(prefix) => r.name.starts_with(prefix.as_str()),
            None => true,
        });

    match config.limit {
        Some(limit) => selected.take(limit).collect(),
        None => selected.collect(),
    }
}

/// Write `records` to `out` in the given format.
pub fn render<W: Write>(
    out: &mut W,
    records: &[&Record],
    format: OutputFormat,
) -> std::io::Result<()> {
    match format {
        OutputFormat::Text => {
            for r in records {
                writeln!(out, "{r}")?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, records)?;
            writeln!(out)?;
        }
    }
    out.flush()
}
