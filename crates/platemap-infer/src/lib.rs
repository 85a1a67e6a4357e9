//! Column inference for loosely structured plate tables.
//!
//! - **patterns**: ordered candidate tables of conventional header names
//! - **engine**: the resolution chain turning a raw table plus optional
//!   hints into a normalized dataset

#![deny(unsafe_code)]

pub mod engine;
pub mod patterns;

pub use engine::{NormalizeOptions, RowColumnPair, RowFieldKind, normalize};
