//! Normalized plate datasets.

use serde::{Deserialize, Serialize};

use crate::format::PositionFormat;
use crate::value::CellValue;

/// One normalized record: a position, its measurement, and an optional
/// plate identifier for multi-plate tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellRecord {
    /// Serialized well address in the dataset's notation.
    pub position: CellValue,
    /// The measured value; missing for sparse wells and templates.
    pub value: CellValue,
    /// Plate group, when the source table spans several plates.
    pub plate: Option<String>,
}

impl WellRecord {
    /// Creates a single-plate record.
    #[must_use]
    pub fn new(position: CellValue, value: CellValue) -> Self {
        Self {
            position,
            value,
            plate: None,
        }
    }
}

/// The canonical output of normalization: ordered `(position, value[, plate])`
/// records plus the notation the positions are serialized in.
///
/// Record order is significant; template consumers rely on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateDataset {
    pub format: PositionFormat,
    pub records: Vec<WellRecord>,
}

impl PlateDataset {
    /// Creates an empty dataset in the given notation.
    #[must_use]
    pub fn new(format: PositionFormat) -> Self {
        Self {
            format,
            records: Vec::new(),
        }
    }

    /// Appends a record.
    pub fn push(&mut self, record: WellRecord) {
        self.records.push(record);
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the dataset has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True when any record carries a plate identifier.
    #[must_use]
    pub fn has_plates(&self) -> bool {
        self.records.iter().any(|record| record.plate.is_some())
    }

    /// Distinct plate identifiers in first-seen order.
    #[must_use]
    pub fn plate_ids(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for record in &self.records {
            if let Some(plate) = record.plate.as_deref()
                && !seen.contains(&plate)
            {
                seen.push(plate);
            }
        }
        seen
    }
}
