//! Position-format detection, conversion, and plate-map generation.
//!
//! - **detect**: classify a sample value as one of the three notations
//! - **convert**: the lossless position codec between notations
//! - **layout**: full-plate enumeration for template generation

#![deny(unsafe_code)]

pub mod convert;
pub mod detect;
pub mod layout;

pub use convert::{WellCoord, convert, parse_position, render_position};
pub use detect::{detect, detect_column};
pub use layout::generate;
