//! The column inference engine.
//!
//! [`normalize`] turns a loosely structured [`RawTable`] into the
//! canonical `(position, value[, plate])` dataset. Position resolution
//! walks a fixed chain (declared row/column pair, declared position
//! column, conventional combined-header names, conventional header-name
//! pairs) and the first success wins. Failures carry the candidates that
//! were tried so the caller can supply an explicit hint.
//!
//! There is no partial-success mode: a single ill-formed row fails the
//! whole call rather than being dropped silently.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use platemap_convert::{convert, detect_column};
use platemap_model::{
    CellValue, PlateDataset, PlateError, PlateGeometry, PlateSize, PositionFormat, RawTable,
    Result, WellRecord,
};

use crate::patterns::{
    POSITION_HEADER_CANDIDATES, ROW_COLUMN_HEADER_PAIRS, VALUE_HEADER_CANDIDATES, find_header,
    find_header_pair, normalize_header,
};

/// Whether a separate row field holds letters (`"A"`) or numbers (`1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowFieldKind {
    Letter,
    Numeric,
}

/// A declared pair of row/column position fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowColumnPair {
    /// Name of the row field.
    pub row: String,
    /// Name of the column field.
    pub column: String,
    /// How the row field is encoded; inspected from the first sample when
    /// not declared.
    pub row_kind: Option<RowFieldKind>,
}

/// Hints for [`normalize`]. All fields are optional; unset fields fall
/// back to auto-detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizeOptions {
    /// Explicit combined position column.
    pub position_column: Option<String>,
    /// Explicit row/column field pair; takes precedence over
    /// `position_column`.
    pub row_column_pair: Option<RowColumnPair>,
    /// Explicit measurement column.
    pub value_column: Option<String>,
    /// Column grouping rows into independent plates.
    pub plate_column: Option<String>,
    /// Notation of the output positions.
    pub target_format: PositionFormat,
    /// Plate size; required whenever a conversion or numeric-row
    /// resolution needs geometry.
    pub plate_size: Option<PlateSize>,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            position_column: None,
            row_column_pair: None,
            value_column: None,
            plate_column: None,
            target_format: PositionFormat::LetterNumber,
            plate_size: None,
        }
    }
}

enum PositionSource {
    Combined { index: usize },
    Pair { row: usize, column: usize, kind: RowFieldKind },
}

/// Normalizes a raw table into a [`PlateDataset`].
///
/// A table with no data rows normalizes to an empty dataset. Duplicate
/// positions within one plate group fail with
/// [`PlateError::DuplicatePosition`]; sparse plates (missing values) are
/// fine, missing positions are not.
///
/// # Errors
///
/// See the crate-level documentation for the resolution chain; every
/// failure names the stage and the inputs examined.
pub fn normalize(table: &RawTable, options: &NormalizeOptions) -> Result<PlateDataset> {
    if table.is_empty() {
        return Ok(PlateDataset::new(options.target_format));
    }

    let source = resolve_position_source(table, options)?;
    let mut consumed = BTreeSet::new();
    match &source {
        PositionSource::Combined { index } => {
            consumed.insert(*index);
        }
        PositionSource::Pair { row, column, .. } => {
            consumed.insert(*row);
            consumed.insert(*column);
        }
    }

    let plate_index = match &options.plate_column {
        Some(name) => {
            let index = lookup(table, name)?;
            consumed.insert(index);
            Some(index)
        }
        None => None,
    };

    let value_index = resolve_value_column(table, options, &consumed)?;

    let (positions, source_format) = collect_positions(table, &source, options)?;

    let positions = if source_format == options.target_format {
        positions
    } else {
        let geometry = require_plate_size(
            options,
            &format!(
                "convert positions from {source_format} to {target}",
                target = options.target_format
            ),
        )?;
        debug!(%source_format, target_format = %options.target_format, "converting positions");
        positions
            .iter()
            .map(|position| convert(position, source_format, options.target_format, geometry))
            .collect::<Result<Vec<_>>>()?
    };

    let mut seen: BTreeSet<(Option<String>, String)> = BTreeSet::new();
    let mut dataset = PlateDataset::new(options.target_format);
    for (row, position) in positions.into_iter().enumerate() {
        let plate = plate_index.and_then(|index| {
            let cell = table.cell(row, index);
            (!cell.is_missing()).then(|| cell.render())
        });
        if !seen.insert((plate.clone(), position.render())) {
            return Err(PlateError::DuplicatePosition {
                position: position.render(),
                plate,
            });
        }
        let value = table.cell(row, value_index).clone();
        dataset.push(WellRecord {
            position,
            value,
            plate,
        });
    }

    debug!(records = dataset.len(), "normalized table");
    Ok(dataset)
}

fn lookup(table: &RawTable, name: &str) -> Result<usize> {
    table
        .column_index(name)
        .ok_or_else(|| PlateError::MissingColumn {
            name: name.to_string(),
            available: table.columns().to_vec(),
        })
}

fn resolve_position_source(table: &RawTable, options: &NormalizeOptions) -> Result<PositionSource> {
    if let Some(pair) = &options.row_column_pair {
        let row = lookup(table, &pair.row)?;
        let column = lookup(table, &pair.column)?;
        let kind = match pair.row_kind {
            Some(kind) => kind,
            None => infer_row_kind(table, row)?,
        };
        debug!(row = %pair.row, column = %pair.column, ?kind, "position from declared row/column pair");
        return Ok(PositionSource::Pair { row, column, kind });
    }

    if let Some(name) = &options.position_column {
        let index = lookup(table, name)?;
        debug!(column = %name, "position from declared column");
        return Ok(PositionSource::Combined { index });
    }

    if let Some((index, matched)) = find_header(table, POSITION_HEADER_CANDIDATES) {
        debug!(column = %table.columns()[index], candidate = matched, "position column auto-detected");
        return Ok(PositionSource::Combined { index });
    }

    if let Some((row, column)) = find_header_pair(table) {
        let kind = infer_row_kind(table, row)?;
        debug!(
            row = %table.columns()[row],
            column = %table.columns()[column],
            ?kind,
            "row/column pair auto-detected"
        );
        return Ok(PositionSource::Pair { row, column, kind });
    }

    let mut tried: Vec<String> = POSITION_HEADER_CANDIDATES
        .iter()
        .map(|candidate| (*candidate).to_string())
        .collect();
    tried.extend(
        ROW_COLUMN_HEADER_PAIRS
            .iter()
            .map(|(row, column)| format!("{row}+{column}")),
    );
    Err(PlateError::PositionColumnNotFound { tried })
}

fn resolve_value_column(
    table: &RawTable,
    options: &NormalizeOptions,
    consumed: &BTreeSet<usize>,
) -> Result<usize> {
    if let Some(name) = &options.value_column {
        return lookup(table, name);
    }

    let normalized: Vec<String> = table
        .columns()
        .iter()
        .map(|column| normalize_header(column))
        .collect();
    for candidate in VALUE_HEADER_CANDIDATES {
        if let Some(index) = normalized.iter().position(|header| header == candidate)
            && !consumed.contains(&index)
        {
            debug!(column = %table.columns()[index], candidate, "value column auto-detected");
            return Ok(index);
        }
    }

    for index in 0..table.columns().len() {
        if !consumed.contains(&index) && table.column_is_numeric(index) {
            debug!(column = %table.columns()[index], "value column from first numeric column");
            return Ok(index);
        }
    }

    let mut tried: Vec<String> = VALUE_HEADER_CANDIDATES
        .iter()
        .map(|candidate| (*candidate).to_string())
        .collect();
    tried.push("any unconsumed numeric column".to_string());
    Err(PlateError::ValueColumnNotFound { tried })
}

fn infer_row_kind(table: &RawTable, index: usize) -> Result<RowFieldKind> {
    let name = table
        .columns()
        .get(index)
        .cloned()
        .unwrap_or_else(|| format!("#{index}"));
    let Some(sample) = table.first_non_missing(index) else {
        return Err(PlateError::UnrecognizedPositionFormat {
            column: name,
            sample: "<empty column>".to_string(),
        });
    };
    if let CellValue::Number(_) = sample {
        return Ok(RowFieldKind::Numeric);
    }
    let trimmed = sample.as_text().map(str::trim).unwrap_or_default();
    if !trimmed.is_empty() && trimmed.bytes().all(|byte| byte.is_ascii_digit()) {
        Ok(RowFieldKind::Numeric)
    } else if !trimmed.is_empty() && trimmed.bytes().all(|byte| byte.is_ascii_alphabetic()) {
        Ok(RowFieldKind::Letter)
    } else {
        Err(PlateError::UnrecognizedPositionFormat {
            column: name,
            sample: sample.render(),
        })
    }
}

fn collect_positions(
    table: &RawTable,
    source: &PositionSource,
    options: &NormalizeOptions,
) -> Result<(Vec<CellValue>, PositionFormat)> {
    match source {
        PositionSource::Combined { index } => {
            let format = detect_column(table, *index)?;
            let mut positions = Vec::with_capacity(table.row_count());
            for row in 0..table.row_count() {
                let cell = table.cell(row, *index);
                if cell.is_missing() {
                    return Err(PlateError::MissingPosition { row });
                }
                positions.push(cell.clone());
            }
            Ok((positions, format))
        }
        PositionSource::Pair { row, column, kind } => {
            let mut positions = Vec::with_capacity(table.row_count());
            for index in 0..table.row_count() {
                let label = row_label(table, index, *row, *kind, options)?;
                let col = column_number(table, index, *column)?;
                positions.push(CellValue::Text(format!("{label}{col}")));
            }
            Ok((positions, PositionFormat::LetterNumber))
        }
    }
}

fn row_label(
    table: &RawTable,
    row: usize,
    index: usize,
    kind: RowFieldKind,
    options: &NormalizeOptions,
) -> Result<String> {
    let cell = table.cell(row, index);
    if cell.is_missing() {
        return Err(PlateError::MissingPosition { row });
    }
    match kind {
        RowFieldKind::Letter => {
            let text = cell.as_text().ok_or_else(|| invalid_row_field(cell))?;
            let trimmed = text.trim();
            if trimmed.is_empty() || !trimmed.bytes().all(|byte| byte.is_ascii_alphabetic()) {
                return Err(invalid_row_field(cell));
            }
            Ok(trimmed.to_ascii_uppercase())
        }
        RowFieldKind::Numeric => {
            let number = cell_as_index(cell).ok_or_else(|| invalid_row_field(cell))?;
            let geometry = require_plate_size(
                options,
                "resolve numeric row indices through the row-label sequence",
            )?;
            Ok(geometry.row_labels().label(number)?.to_string())
        }
    }
}

fn column_number(table: &RawTable, row: usize, index: usize) -> Result<u32> {
    let cell = table.cell(row, index);
    if cell.is_missing() {
        return Err(PlateError::MissingPosition { row });
    }
    cell_as_index(cell).ok_or_else(|| PlateError::InvalidPositionFormat {
        value: cell.render(),
        expected: "a column number".to_string(),
    })
}

fn invalid_row_field(cell: &CellValue) -> PlateError {
    PlateError::InvalidPositionFormat {
        value: cell.render(),
        expected: "a row letter or row number".to_string(),
    }
}

fn cell_as_index(cell: &CellValue) -> Option<u32> {
    match cell {
        CellValue::Number(number)
            if number.fract() == 0.0 && *number >= 0.0 && *number <= f64::from(u32::MAX) =>
        {
            Some(*number as u32)
        }
        CellValue::Text(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() || !trimmed.bytes().all(|byte| byte.is_ascii_digit()) {
                return None;
            }
            trimmed.parse().ok()
        }
        _ => None,
    }
}

fn require_plate_size(options: &NormalizeOptions, operation: &str) -> Result<PlateGeometry> {
    options
        .plate_size
        .map(|size| size.geometry())
        .ok_or_else(|| PlateError::PlateSizeRequired {
            operation: operation.to_string(),
        })
}
