//! Position-format detection.
//!
//! Classification looks at a single sample value and applies the rules in
//! order, first match wins:
//!
//! 1. letters followed by digits, nothing else → [`PositionFormat::LetterNumber`]
//! 2. digits, underscore, digits → [`PositionFormat::RowColumn`]
//! 3. numeric, or a string of digits only → [`PositionFormat::Sequential`]
//!
//! Column-level detection samples only the first non-missing cell. It does
//! not verify the column is homogeneous, so a column mixing notations is
//! classified by whichever value happens to come first.

use platemap_model::{CellValue, PlateError, PositionFormat, RawTable, Result};

/// Classifies a single sample value, or `None` when no rule matches.
#[must_use]
pub fn detect(value: &CellValue) -> Option<PositionFormat> {
    match value {
        CellValue::Number(_) => Some(PositionFormat::Sequential),
        CellValue::Missing => None,
        CellValue::Text(text) => detect_text(text),
    }
}

fn detect_text(text: &str) -> Option<PositionFormat> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    if is_letter_number(trimmed) {
        return Some(PositionFormat::LetterNumber);
    }
    if is_row_column(trimmed) {
        return Some(PositionFormat::RowColumn);
    }
    if trimmed.bytes().all(|byte| byte.is_ascii_digit()) {
        return Some(PositionFormat::Sequential);
    }
    None
}

fn is_letter_number(text: &str) -> bool {
    let Some(split) = text.find(|ch: char| ch.is_ascii_digit()) else {
        return false;
    };
    let (letters, digits) = text.split_at(split);
    !letters.is_empty()
        && letters.bytes().all(|byte| byte.is_ascii_alphabetic())
        && digits.bytes().all(|byte| byte.is_ascii_digit())
}

fn is_row_column(text: &str) -> bool {
    let Some((row, col)) = text.split_once('_') else {
        return false;
    };
    !row.is_empty()
        && !col.is_empty()
        && row.bytes().all(|byte| byte.is_ascii_digit())
        && col.bytes().all(|byte| byte.is_ascii_digit())
}

/// Detects the notation of a table column from its first non-missing cell.
///
/// # Errors
///
/// Returns [`PlateError::UnrecognizedPositionFormat`] when the column has
/// no non-missing cells or the sampled value matches no rule. The error
/// names the column and the sample so the caller can supply an explicit
/// format hint.
pub fn detect_column(table: &RawTable, column: usize) -> Result<PositionFormat> {
    let name = table
        .columns()
        .get(column)
        .cloned()
        .unwrap_or_else(|| format!("#{column}"));
    let Some(sample) = table.first_non_missing(column) else {
        return Err(PlateError::UnrecognizedPositionFormat {
            column: name,
            sample: "<empty column>".to_string(),
        });
    };
    match detect(sample) {
        Some(format) => {
            tracing::debug!(column = %name, %format, "detected position format");
            Ok(format)
        }
        None => Err(PlateError::UnrecognizedPositionFormat {
            column: name,
            sample: sample.render(),
        }),
    }
}
