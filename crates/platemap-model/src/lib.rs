//! Core data model for plate-based assay data.
//!
//! This crate defines the vocabulary shared by the rest of the workspace:
//!
//! - **geometry**: supported plate sizes, grid shapes, and the row-label
//!   sequence
//! - **format**: the three well-position notations
//! - **value**: tagged table cells (text / number / missing)
//! - **table**: the untyped named-column input structure
//! - **dataset**: the normalized `(position, value[, plate])` output
//! - **error**: the shared error taxonomy

#![deny(unsafe_code)]

pub mod dataset;
pub mod error;
pub mod format;
pub mod geometry;
pub mod table;
pub mod value;

pub use dataset::{PlateDataset, WellRecord};
pub use error::{PlateError, Result};
pub use format::PositionFormat;
pub use geometry::{PlateGeometry, PlateSize, RowLabels};
pub use table::RawTable;
pub use value::CellValue;
