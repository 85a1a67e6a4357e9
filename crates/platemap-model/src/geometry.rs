//! Plate geometries and the row-label sequence.
//!
//! Microplates come in seven standard sizes; each implies a fixed grid
//! shape. Row labels extend past `Z` (`AA`..`AF`) because a 1536-well
//! plate has 32 rows.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PlateError, Result};

/// The full row-label sequence, truncated per geometry.
const ROW_LABEL_SEQUENCE: [&str; 32] = [
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R", "S",
    "T", "U", "V", "W", "X", "Y", "Z", "AA", "AB", "AC", "AD", "AE", "AF",
];

/// A supported plate size.
///
/// The well count is a hard boundary: every entry point rejects counts
/// outside this enum before any arithmetic runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PlateSize {
    Wells6,
    Wells12,
    Wells24,
    Wells48,
    Wells96,
    Wells384,
    Wells1536,
}

impl PlateSize {
    /// All supported sizes, smallest first.
    pub const ALL: [PlateSize; 7] = [
        PlateSize::Wells6,
        PlateSize::Wells12,
        PlateSize::Wells24,
        PlateSize::Wells48,
        PlateSize::Wells96,
        PlateSize::Wells384,
        PlateSize::Wells1536,
    ];

    /// Resolves a raw well count to a supported size.
    ///
    /// # Errors
    ///
    /// Returns [`PlateError::InvalidPlateSize`] for any count outside the
    /// supported set.
    pub fn from_wells(wells: u32) -> Result<Self> {
        match wells {
            6 => Ok(PlateSize::Wells6),
            12 => Ok(PlateSize::Wells12),
            24 => Ok(PlateSize::Wells24),
            48 => Ok(PlateSize::Wells48),
            96 => Ok(PlateSize::Wells96),
            384 => Ok(PlateSize::Wells384),
            1536 => Ok(PlateSize::Wells1536),
            other => Err(PlateError::InvalidPlateSize(other)),
        }
    }

    /// Returns the well count.
    #[must_use]
    pub fn wells(&self) -> u32 {
        self.geometry().wells
    }

    /// Returns the grid shape for this size.
    #[must_use]
    pub fn geometry(&self) -> PlateGeometry {
        let (wells, rows, cols) = match self {
            PlateSize::Wells6 => (6, 2, 3),
            PlateSize::Wells12 => (12, 3, 4),
            PlateSize::Wells24 => (24, 4, 6),
            PlateSize::Wells48 => (48, 6, 8),
            PlateSize::Wells96 => (96, 8, 12),
            PlateSize::Wells384 => (384, 16, 24),
            PlateSize::Wells1536 => (1536, 32, 48),
        };
        PlateGeometry { wells, rows, cols }
    }
}

impl fmt::Display for PlateSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wells())
    }
}

impl FromStr for PlateSize {
    type Err = PlateError;

    fn from_str(s: &str) -> Result<Self> {
        let wells: u32 = s
            .trim()
            .parse()
            .map_err(|_| PlateError::InvalidPositionFormat {
                value: s.to_string(),
                expected: "a well count".to_string(),
            })?;
        PlateSize::from_wells(wells)
    }
}

/// The grid shape implied by a plate's well count.
///
/// Invariant: `rows * cols == wells` for every supported size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlateGeometry {
    pub wells: u32,
    pub rows: u32,
    pub cols: u32,
}

impl PlateGeometry {
    /// Returns the row-label lookup for this geometry.
    #[must_use]
    pub fn row_labels(&self) -> RowLabels {
        RowLabels::for_geometry(*self)
    }

    /// Builds a [`PlateError::PositionOutOfBounds`] for a position on this plate.
    #[must_use]
    pub fn out_of_bounds(&self, position: impl fmt::Display) -> PlateError {
        PlateError::PositionOutOfBounds {
            position: position.to_string(),
            wells: self.wells,
            rows: self.rows,
            cols: self.cols,
        }
    }
}

/// Row-label lookup derived from a geometry.
///
/// This is the explicit, immutable replacement for a shared alphabet
/// table: callers obtain it from a [`PlateGeometry`] and pass it where
/// needed instead of consulting a global.
#[derive(Debug, Clone, Copy)]
pub struct RowLabels {
    geometry: PlateGeometry,
    labels: &'static [&'static str],
}

impl RowLabels {
    /// Derives the label sequence for a geometry, truncated to its row count.
    #[must_use]
    pub fn for_geometry(geometry: PlateGeometry) -> Self {
        let labels = &ROW_LABEL_SEQUENCE[..geometry.rows as usize];
        Self { geometry, labels }
    }

    /// Returns the label for a 1-based row number.
    ///
    /// # Errors
    ///
    /// Returns [`PlateError::PositionOutOfBounds`] when the row is not on
    /// the plate.
    pub fn label(&self, row: u32) -> Result<&'static str> {
        if row == 0 || row > self.geometry.rows {
            return Err(self.geometry.out_of_bounds(format!("row {row}")));
        }
        Ok(self.labels[(row - 1) as usize])
    }

    /// Resolves a row label to its 1-based row number, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`PlateError::UnknownRowLabel`] when the label is not part
    /// of this plate's sequence.
    pub fn row_number(&self, label: &str) -> Result<u32> {
        let trimmed = label.trim();
        self.labels
            .iter()
            .position(|candidate| candidate.eq_ignore_ascii_case(trimmed))
            .map(|index| (index + 1) as u32)
            .ok_or_else(|| PlateError::UnknownRowLabel {
                label: trimmed.to_string(),
                first: self.labels[0].to_string(),
                last: self.labels[self.labels.len() - 1].to_string(),
            })
    }

    /// Number of rows covered by this label sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// True when the sequence is empty (never the case for supported sizes).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_size_satisfies_grid_invariant() {
        for size in PlateSize::ALL {
            let geometry = size.geometry();
            assert_eq!(geometry.rows * geometry.cols, geometry.wells);
            assert_eq!(geometry.wells, size.wells());
        }
    }

    #[test]
    fn expected_shapes() {
        assert_eq!(PlateSize::Wells6.geometry().rows, 2);
        assert_eq!(PlateSize::Wells6.geometry().cols, 3);
        assert_eq!(PlateSize::Wells96.geometry().rows, 8);
        assert_eq!(PlateSize::Wells96.geometry().cols, 12);
        assert_eq!(PlateSize::Wells1536.geometry().rows, 32);
        assert_eq!(PlateSize::Wells1536.geometry().cols, 48);
    }

    #[test]
    fn from_wells_rejects_unsupported_counts() {
        assert_eq!(
            PlateSize::from_wells(100),
            Err(PlateError::InvalidPlateSize(100))
        );
        assert_eq!(PlateSize::from_wells(0), Err(PlateError::InvalidPlateSize(0)));
    }

    #[test]
    fn labels_extend_past_z_for_1536() {
        let labels = PlateSize::Wells1536.geometry().row_labels();
        assert_eq!(labels.len(), 32);
        assert_eq!(labels.label(1).unwrap(), "A");
        assert_eq!(labels.label(26).unwrap(), "Z");
        assert_eq!(labels.label(27).unwrap(), "AA");
        assert_eq!(labels.label(32).unwrap(), "AF");
    }

    #[test]
    fn row_number_is_case_insensitive() {
        let labels = PlateSize::Wells96.geometry().row_labels();
        assert_eq!(labels.row_number("a").unwrap(), 1);
        assert_eq!(labels.row_number("H").unwrap(), 8);
    }

    #[test]
    fn row_number_rejects_labels_off_the_plate() {
        let labels = PlateSize::Wells96.geometry().row_labels();
        let err = labels.row_number("I").unwrap_err();
        assert!(matches!(err, PlateError::UnknownRowLabel { .. }));
    }

    #[test]
    fn label_rejects_rows_off_the_plate() {
        let labels = PlateSize::Wells6.geometry().row_labels();
        assert!(labels.label(0).is_err());
        assert!(labels.label(3).is_err());
    }

    #[test]
    fn plate_size_parses_from_text() {
        assert_eq!("96".parse::<PlateSize>().unwrap(), PlateSize::Wells96);
        assert!("97".parse::<PlateSize>().is_err());
    }
}
