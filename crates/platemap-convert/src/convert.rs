//! The position codec.
//!
//! Every conversion routes through a canonical 1-based `(row, col)` pair:
//! parse the source notation, bounds-check against the geometry, render
//! the target notation. Identity conversions return the input unchanged.

use platemap_model::{CellValue, PlateError, PlateGeometry, PositionFormat, Result};

/// A well address in canonical grid form, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WellCoord {
    pub row: u32,
    pub col: u32,
}

impl WellCoord {
    /// Row-major well index: increases first along columns, then rows.
    #[must_use]
    pub fn sequential_index(&self, geometry: PlateGeometry) -> u32 {
        (self.row - 1) * geometry.cols + self.col
    }
}

/// Converts a single position value between notations.
///
/// # Errors
///
/// - [`PlateError::InvalidPositionFormat`] when the value does not parse
///   in the source notation
/// - [`PlateError::PositionOutOfBounds`] when the parsed address is not on
///   the plate
/// - [`PlateError::UnknownRowLabel`] when a row letter is not part of the
///   plate's label sequence
pub fn convert(
    value: &CellValue,
    from: PositionFormat,
    to: PositionFormat,
    geometry: PlateGeometry,
) -> Result<CellValue> {
    if from == to {
        return Ok(value.clone());
    }
    let coord = parse_position(value, from, geometry)?;
    render_position(coord, to, geometry)
}

/// Parses a serialized position into canonical grid form.
///
/// # Errors
///
/// Same failure modes as [`convert`].
pub fn parse_position(
    value: &CellValue,
    format: PositionFormat,
    geometry: PlateGeometry,
) -> Result<WellCoord> {
    match format {
        PositionFormat::LetterNumber => parse_letter_number(value, geometry),
        PositionFormat::Sequential => parse_sequential(value, geometry),
        PositionFormat::RowColumn => parse_row_column(value, geometry),
    }
}

/// Renders a canonical grid address in the requested notation.
///
/// # Errors
///
/// Returns [`PlateError::PositionOutOfBounds`] when the coordinate is not
/// on the plate.
pub fn render_position(
    coord: WellCoord,
    format: PositionFormat,
    geometry: PlateGeometry,
) -> Result<CellValue> {
    check_bounds(coord, geometry)?;
    match format {
        PositionFormat::LetterNumber => {
            let label = geometry.row_labels().label(coord.row)?;
            Ok(CellValue::Text(format!("{label}{col}", col = coord.col)))
        }
        PositionFormat::Sequential => Ok(CellValue::Number(f64::from(
            coord.sequential_index(geometry),
        ))),
        PositionFormat::RowColumn => Ok(CellValue::Text(format!(
            "{row}_{col}",
            row = coord.row,
            col = coord.col
        ))),
    }
}

fn check_bounds(coord: WellCoord, geometry: PlateGeometry) -> Result<()> {
    if coord.row == 0 || coord.row > geometry.rows || coord.col == 0 || coord.col > geometry.cols {
        return Err(geometry.out_of_bounds(format!("{}_{}", coord.row, coord.col)));
    }
    Ok(())
}

fn invalid(value: &CellValue, expected: &str) -> PlateError {
    PlateError::InvalidPositionFormat {
        value: value.render(),
        expected: expected.to_string(),
    }
}

fn parse_letter_number(value: &CellValue, geometry: PlateGeometry) -> Result<WellCoord> {
    const EXPECTED: &str = "letter-number notation (a row letter followed by a column number)";
    let Some(text) = value.as_text() else {
        return Err(invalid(value, EXPECTED));
    };
    let trimmed = text.trim();
    let Some(split) = trimmed.find(|ch: char| ch.is_ascii_digit()) else {
        return Err(invalid(value, EXPECTED));
    };
    let (letters, digits) = trimmed.split_at(split);
    if letters.is_empty()
        || !letters.bytes().all(|byte| byte.is_ascii_alphabetic())
        || !digits.bytes().all(|byte| byte.is_ascii_digit())
    {
        return Err(invalid(value, EXPECTED));
    }
    let row = geometry.row_labels().row_number(letters)?;
    let col: u32 = digits.parse().map_err(|_| invalid(value, EXPECTED))?;
    if col == 0 || col > geometry.cols {
        return Err(geometry.out_of_bounds(trimmed));
    }
    Ok(WellCoord { row, col })
}

fn parse_sequential(value: &CellValue, geometry: PlateGeometry) -> Result<WellCoord> {
    const EXPECTED: &str = "sequential notation (a well index)";
    let index = match value {
        CellValue::Number(number) => {
            if number.fract() != 0.0 || *number < 0.0 || *number > f64::from(u32::MAX) {
                return Err(invalid(value, EXPECTED));
            }
            *number as u32
        }
        CellValue::Text(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() || !trimmed.bytes().all(|byte| byte.is_ascii_digit()) {
                return Err(invalid(value, EXPECTED));
            }
            trimmed.parse().map_err(|_| invalid(value, EXPECTED))?
        }
        CellValue::Missing => return Err(invalid(value, EXPECTED)),
    };
    if index == 0 || index > geometry.wells {
        return Err(geometry.out_of_bounds(index));
    }
    Ok(WellCoord {
        row: (index - 1) / geometry.cols + 1,
        col: (index - 1) % geometry.cols + 1,
    })
}

fn parse_row_column(value: &CellValue, geometry: PlateGeometry) -> Result<WellCoord> {
    const EXPECTED: &str = "row-column notation (\"{row}_{column}\")";
    let Some(text) = value.as_text() else {
        return Err(invalid(value, EXPECTED));
    };
    let trimmed = text.trim();
    let Some((row_text, col_text)) = trimmed.split_once('_') else {
        return Err(invalid(value, EXPECTED));
    };
    let row: u32 = row_text.parse().map_err(|_| invalid(value, EXPECTED))?;
    let col: u32 = col_text.parse().map_err(|_| invalid(value, EXPECTED))?;
    let coord = WellCoord { row, col };
    check_bounds(coord, geometry)?;
    Ok(coord)
}

#[cfg(test)]
mod tests {
    use super::*;
    use platemap_model::PlateSize;

    fn geometry96() -> PlateGeometry {
        PlateSize::Wells96.geometry()
    }

    fn text(value: &str) -> CellValue {
        CellValue::Text(value.to_string())
    }

    #[test]
    fn first_well_maps_across_notations() {
        let geometry = geometry96();
        assert_eq!(
            convert(
                &text("A1"),
                PositionFormat::LetterNumber,
                PositionFormat::Sequential,
                geometry
            )
            .unwrap(),
            CellValue::Number(1.0)
        );
        assert_eq!(
            convert(
                &text("A1"),
                PositionFormat::LetterNumber,
                PositionFormat::RowColumn,
                geometry
            )
            .unwrap(),
            text("1_1")
        );
    }

    #[test]
    fn last_well_maps_across_notations() {
        let geometry = geometry96();
        assert_eq!(
            convert(
                &CellValue::Number(96.0),
                PositionFormat::Sequential,
                PositionFormat::LetterNumber,
                geometry
            )
            .unwrap(),
            text("H12")
        );
        assert_eq!(
            convert(
                &text("8_12"),
                PositionFormat::RowColumn,
                PositionFormat::Sequential,
                geometry
            )
            .unwrap(),
            CellValue::Number(96.0)
        );
        assert_eq!(
            convert(
                &text("H12"),
                PositionFormat::LetterNumber,
                PositionFormat::RowColumn,
                geometry
            )
            .unwrap(),
            text("8_12")
        );
    }

    #[test]
    fn identity_conversion_returns_the_value_unchanged() {
        let geometry = geometry96();
        for format in [
            PositionFormat::LetterNumber,
            PositionFormat::Sequential,
            PositionFormat::RowColumn,
        ] {
            let value = text("anything");
            assert_eq!(convert(&value, format, format, geometry).unwrap(), value);
        }
    }

    #[test]
    fn sequential_accepts_digit_strings() {
        let coord =
            parse_position(&text("42"), PositionFormat::Sequential, geometry96()).unwrap();
        assert_eq!(coord, WellCoord { row: 4, col: 6 });
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let err = convert(
            &CellValue::Number(97.0),
            PositionFormat::Sequential,
            PositionFormat::LetterNumber,
            geometry96(),
        )
        .unwrap_err();
        assert!(matches!(err, PlateError::PositionOutOfBounds { wells: 96, .. }));
    }

    #[test]
    fn out_of_range_column_is_rejected() {
        let err = parse_position(&text("A13"), PositionFormat::LetterNumber, geometry96())
            .unwrap_err();
        assert!(matches!(err, PlateError::PositionOutOfBounds { .. }));
        let err =
            parse_position(&text("A0"), PositionFormat::LetterNumber, geometry96()).unwrap_err();
        assert!(matches!(err, PlateError::PositionOutOfBounds { .. }));
    }

    #[test]
    fn unknown_row_letter_is_rejected() {
        let err =
            parse_position(&text("I1"), PositionFormat::LetterNumber, geometry96()).unwrap_err();
        assert!(matches!(err, PlateError::UnknownRowLabel { .. }));
    }

    #[test]
    fn fractional_index_is_not_a_position() {
        let err = parse_position(
            &CellValue::Number(1.5),
            PositionFormat::Sequential,
            geometry96(),
        )
        .unwrap_err();
        assert!(matches!(err, PlateError::InvalidPositionFormat { .. }));
    }

    #[test]
    fn extended_rows_convert_on_1536_well_plates() {
        let geometry = PlateSize::Wells1536.geometry();
        assert_eq!(
            convert(
                &text("AB24"),
                PositionFormat::LetterNumber,
                PositionFormat::RowColumn,
                geometry
            )
            .unwrap(),
            text("28_24")
        );
        assert_eq!(
            convert(
                &CellValue::Number(1536.0),
                PositionFormat::Sequential,
                PositionFormat::LetterNumber,
                geometry
            )
            .unwrap(),
            text("AF48")
        );
    }

    #[test]
    fn row_column_bounds_are_checked() {
        let err =
            parse_position(&text("9_1"), PositionFormat::RowColumn, geometry96()).unwrap_err();
        assert!(matches!(err, PlateError::PositionOutOfBounds { .. }));
    }
}
