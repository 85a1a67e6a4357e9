//! File-boundary codecs for plate data.
//!
//! - **csv_table**: delimited-file reading into the core's [`RawTable`]
//! - **export**: normalized-dataset writing, including position re-splitting
//!
//! [`RawTable`]: platemap_model::RawTable

#![deny(unsafe_code)]

pub mod csv_table;
pub mod export;

pub use csv_table::{read_table, read_table_with_delimiter};
pub use export::{ExportOptions, write_dataset, write_dataset_to};
