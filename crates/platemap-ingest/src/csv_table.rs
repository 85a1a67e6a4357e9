//! Delimited-file reading.
//!
//! Plate reader exports are messy: byte-order marks, banner lines above
//! the header, ragged rows. This module absorbs all of that at the
//! boundary and hands the core a typed [`RawTable`].

use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use tracing::info;

use platemap_model::{CellValue, RawTable};

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

fn is_numeric(cell: &str) -> bool {
    !cell.is_empty() && cell.parse::<f64>().is_ok()
}

/// A row looks like data once numbers show up.
fn is_data_row(cells: &[String]) -> bool {
    if cells.is_empty() {
        return false;
    }
    let numeric = cells.iter().filter(|cell| is_numeric(cell)).count();
    numeric * 5 >= cells.len()
}

/// Banner lines above the header are short or carry numbers; the header
/// itself is a run of at least two non-numeric names.
fn qualifies_as_header(cells: &[String]) -> bool {
    let filled = cells.iter().filter(|cell| !cell.is_empty()).count();
    filled >= 2 && !cells.iter().any(|cell| is_numeric(cell))
}

/// Picks the header row: the last qualifying row before data starts,
/// probing at most the first five rows.
fn detect_header_row(rows: &[Vec<String>]) -> usize {
    let probe = rows.len().min(5);
    let limit = rows[..probe]
        .iter()
        .position(|row| is_data_row(row))
        .unwrap_or(1)
        .max(1);
    let mut header = 0;
    for (index, row) in rows[..limit].iter().enumerate() {
        if qualifies_as_header(row) {
            header = index;
        }
    }
    header
}

fn delimiter_for(path: &Path) -> u8 {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") || ext.eq_ignore_ascii_case("tab") => b'\t',
        _ => b',',
    }
}

/// Reads a delimited file into a [`RawTable`], inferring the delimiter
/// from the file extension (`.tsv`/`.tab` are tab-separated, everything
/// else comma-separated).
///
/// # Errors
///
/// Returns an error when the file cannot be opened or a record cannot be
/// decoded.
pub fn read_table(path: &Path) -> Result<RawTable> {
    read_table_with_delimiter(path, delimiter_for(path))
}

/// Reads a delimited file with an explicit delimiter.
///
/// # Errors
///
/// Returns an error when the file cannot be opened or a record cannot be
/// decoded.
pub fn read_table_with_delimiter(path: &Path, delimiter: u8) -> Result<RawTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_path(path)
        .with_context(|| format!("read table: {}", path.display()))?;

    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("read record: {}", path.display()))?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        raw_rows.push(row);
    }
    if raw_rows.is_empty() {
        return Ok(RawTable::default());
    }

    let header_index = detect_header_row(&raw_rows);
    let headers: Vec<String> = raw_rows[header_index]
        .iter()
        .map(|cell| normalize_header(cell))
        .collect();
    let mut table = RawTable::new(headers);
    for record in raw_rows.iter().skip(header_index + 1) {
        table.push_row(record.iter().map(|cell| CellValue::parse(cell)).collect());
    }

    info!(
        path = %path.display(),
        columns = table.columns().len(),
        rows = table.row_count(),
        skipped = header_index,
        "read table"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_detection_prefers_the_last_candidate_before_data() {
        let rows = vec![
            vec!["Instrument".to_string(), "SpectraMax".to_string()],
            vec!["well".to_string(), "od".to_string()],
            vec!["A1".to_string(), "0.15".to_string()],
        ];
        assert_eq!(detect_header_row(&rows), 1);
    }

    #[test]
    fn plain_tables_use_the_first_row() {
        let rows = vec![
            vec!["well".to_string(), "od".to_string()],
            vec!["A1".to_string(), "0.15".to_string()],
        ];
        assert_eq!(detect_header_row(&rows), 0);
    }

    #[test]
    fn single_cell_banners_are_skipped() {
        let rows = vec![
            vec!["Plate 1 results".to_string(), String::new()],
            vec!["well".to_string(), "value".to_string()],
            vec!["A1".to_string(), "0.4".to_string()],
        ];
        assert_eq!(detect_header_row(&rows), 1);
    }

    #[test]
    fn delimiters_follow_the_extension() {
        assert_eq!(delimiter_for(Path::new("data.tsv")), b'\t');
        assert_eq!(delimiter_for(Path::new("data.TAB")), b'\t');
        assert_eq!(delimiter_for(Path::new("data.csv")), b',');
        assert_eq!(delimiter_for(Path::new("data")), b',');
    }
}
