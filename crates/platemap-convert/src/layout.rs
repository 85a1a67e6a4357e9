//! Plate-map generation.
//!
//! Produces the complete ordered enumeration of well positions for a
//! plate, optionally rotated to begin at a chosen well. Sequence order is
//! part of the contract: template consumers (e.g. pipetting order) rely
//! on it.

use platemap_model::{
    CellValue, PlateDataset, PlateError, PlateSize, PositionFormat, Result, WellRecord,
};

use crate::convert::{WellCoord, parse_position, render_position};

/// Generates a value-less plate map for `size`.
///
/// Wells are enumerated in row-major reading order starting from `start`
/// (a letter-number position). When `include_all` is set the enumeration
/// wraps past the last well back to `A1` so every well appears exactly
/// once; otherwise it stops at the end of the plate.
///
/// # Errors
///
/// Returns [`PlateError::InvalidStartPosition`] when `start` does not
/// name a well on the plate.
pub fn generate(
    size: PlateSize,
    start: &str,
    target_format: PositionFormat,
    include_all: bool,
) -> Result<PlateDataset> {
    let geometry = size.geometry();
    let start_coord = parse_position(
        &CellValue::Text(start.to_string()),
        PositionFormat::LetterNumber,
        geometry,
    )
    .map_err(|err| PlateError::InvalidStartPosition {
        value: start.to_string(),
        reason: err.to_string(),
    })?;

    let offset = (start_coord.sequential_index(geometry) - 1) as usize;
    let canonical = enumerate_row_major(geometry.rows, geometry.cols);

    let ordered: Vec<WellCoord> = if include_all {
        canonical[offset..]
            .iter()
            .chain(canonical[..offset].iter())
            .copied()
            .collect()
    } else {
        canonical[offset..].to_vec()
    };

    tracing::debug!(
        wells = geometry.wells,
        start,
        count = ordered.len(),
        "generated plate map"
    );

    let mut dataset = PlateDataset::new(target_format);
    for coord in ordered {
        let position = render_position(coord, target_format, geometry)?;
        dataset.push(WellRecord::new(position, CellValue::Missing));
    }
    Ok(dataset)
}

fn enumerate_row_major(rows: u32, cols: u32) -> Vec<WellCoord> {
    let mut coords = Vec::with_capacity((rows * cols) as usize);
    for row in 1..=rows {
        for col in 1..=cols {
            coords.push(WellCoord { row, col });
        }
    }
    coords
}
