//! CSV export and import of reading datasets.
//!
//! The format is a header row `timestamp,concentration,particle_size,Alert`
//! followed by one row per reading, oldest first.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::NaiveDateTime;

use crate::data::{Alert, Dataset, Reading};

/// File name offered by the download control.
pub const DEFAULT_FILE_NAME: &str = "microplastics.csv";

/// Column names, in order.
pub const CSV_HEADER: [&str; 4] = ["timestamp", "concentration", "particle_size", "Alert"];

/// Timestamp layout used when writing rows.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Accepts any fractional-second precision when reading rows back.
const TIMESTAMP_PARSE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Format a timestamp the way it appears in the CSV and the table.
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Serialize a dataset to CSV text.
pub fn build_csv(dataset: &Dataset) -> String {
    let mut rows: Vec<Vec<String>> = Vec::with_capacity(dataset.len() + 1);
    rows.push(CSV_HEADER.iter().map(|h| h.to_string()).collect());

    for (reading, alert) in dataset.iter() {
        rows.push(vec![
            format_timestamp(&reading.timestamp),
            reading.concentration.to_string(),
            reading.particle_size.to_string(),
            alert.label().to_string(),
        ]);
    }

    let mut csv = String::new();
    for row in rows {
        let line = row
            .iter()
            .map(|field| escape_csv(field))
            .collect::<Vec<_>>()
            .join(",");
        csv.push_str(&line);
        csv.push('\n');
    }
    csv
}

/// Write CSV text to `path`, replacing any existing file.
pub fn write_csv(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("writing {}", path.display()))
}

/// Read and parse a CSV file produced by [`build_csv`].
pub fn read_csv(path: &Path) -> Result<Vec<Reading>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_csv(&content).with_context(|| format!("parsing {}", path.display()))
}

/// Parse CSV text produced by [`build_csv`] back into readings.
///
/// Rows must be oldest first with strictly increasing timestamps. The
/// `Alert` column must hold a known label but is otherwise ignored;
/// alerts are always recomputed from concentrations.
pub fn parse_csv(content: &str) -> Result<Vec<Reading>> {
    let mut lines = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let Some((_, header)) = lines.next() else {
        bail!("empty CSV: missing header row");
    };
    let header_fields = split_csv_line(header.trim_start_matches('\u{feff}'));
    if header_fields != CSV_HEADER {
        bail!(
            "unexpected header {:?}, expected {}",
            header_fields,
            CSV_HEADER.join(",")
        );
    }

    let mut readings = Vec::new();
    for (index, line) in lines {
        let line_no = index + 1;
        let fields = split_csv_line(line);
        if fields.len() != CSV_HEADER.len() {
            bail!(
                "line {line_no}: expected {} fields, found {}",
                CSV_HEADER.len(),
                fields.len()
            );
        }

        let timestamp = NaiveDateTime::parse_from_str(fields[0].trim(), TIMESTAMP_PARSE_FORMAT)
            .with_context(|| format!("line {line_no}: invalid timestamp {:?}", fields[0]))?;
        let concentration: u32 = fields[1]
            .trim()
            .parse()
            .with_context(|| format!("line {line_no}: invalid concentration {:?}", fields[1]))?;
        let particle_size: f64 = fields[2]
            .trim()
            .parse()
            .with_context(|| format!("line {line_no}: invalid particle_size {:?}", fields[2]))?;
        if Alert::from_label(&fields[3]).is_none() {
            bail!("line {line_no}: unknown alert {:?}", fields[3]);
        }
        if let Some(previous) = readings.last().map(|r: &Reading| r.timestamp) {
            if timestamp <= previous {
                bail!(
                    "line {line_no}: timestamp {} is not after the previous row ({})",
                    format_timestamp(&timestamp),
                    format_timestamp(&previous)
                );
            }
        }

        readings.push(Reading {
            timestamp,
            concentration,
            particle_size,
        });
    }

    Ok(readings)
}

fn escape_csv(value: &str) -> String {
    let needs_quotes = value.contains(',') || value.contains('"') || value.contains('\n');
    if needs_quotes {
        let escaped = value.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        value.to_string()
    }
}

/// Split one CSV line, honouring double-quoted fields.
fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' if current.is_empty() => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            '\r' if !in_quotes => {}
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}
