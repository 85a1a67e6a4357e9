//! Shared error taxonomy for plate data processing.

use thiserror::Error;

/// Errors from plate geometry, position conversion, and column inference.
///
/// Every variant carries enough context for the caller to understand which
/// resolution stage failed and what inputs were examined, so an explicit
/// hint can be supplied on retry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlateError {
    /// The requested well count is not a supported plate size.
    #[error("unsupported plate size: {0} wells (supported: 6, 12, 24, 48, 96, 384, 1536)")]
    InvalidPlateSize(u32),

    /// A value does not parse in the notation it was declared or detected as.
    #[error("cannot interpret {value:?} as {expected}")]
    InvalidPositionFormat { value: String, expected: String },

    /// No notation could be recognized from the sampled position value.
    #[error("unrecognized position format in column {column:?} (sampled {sample:?})")]
    UnrecognizedPositionFormat { column: String, sample: String },

    /// An explicitly named column is absent from the table.
    #[error("column {name:?} not found (available: {})", available.join(", "))]
    MissingColumn {
        name: String,
        available: Vec<String>,
    },

    /// The position resolution chain was exhausted.
    #[error("no position column found; tried {}", tried.join(", "))]
    PositionColumnNotFound { tried: Vec<String> },

    /// The value resolution chain was exhausted.
    #[error("no value column found; tried {}", tried.join(", "))]
    ValueColumnNotFound { tried: Vec<String> },

    /// A row in the table has no usable position cell.
    #[error("row {row} has no position value")]
    MissingPosition { row: usize },

    /// A parsed position lies outside the plate.
    #[error("position {position} is outside a {wells}-well plate ({rows} rows x {cols} columns)")]
    PositionOutOfBounds {
        position: String,
        wells: u32,
        rows: u32,
        cols: u32,
    },

    /// A row letter is not part of the plate's label sequence.
    #[error("unknown row label {label:?} (expected {first}..{last})")]
    UnknownRowLabel {
        label: String,
        first: String,
        last: String,
    },

    /// The starting well handed to the plate-map generator is invalid.
    #[error("invalid start position {value:?}: {reason}")]
    InvalidStartPosition { value: String, reason: String },

    /// The same position appears twice within one plate group.
    #[error("duplicate position {position:?} (plate {})", plate.as_deref().unwrap_or("-"))]
    DuplicatePosition {
        position: String,
        plate: Option<String>,
    },

    /// An operation needs plate geometry but no plate size was declared.
    #[error("a plate size is required to {operation}")]
    PlateSizeRequired { operation: String },
}

pub type Result<T> = std::result::Result<T, PlateError>;
