//! Well-position notations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PlateError, Result};

/// One of the three serializations of a well address.
///
/// For a fixed geometry the three notations are in bijection; conversion
/// between them is lossless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PositionFormat {
    /// Row letter plus column number, e.g. `A1` or `AB24`.
    LetterNumber,
    /// Row-major well index, e.g. `42`.
    Sequential,
    /// Row and column numbers joined by an underscore, e.g. `4_6`.
    RowColumn,
}

impl PositionFormat {
    /// Returns the canonical name used in CLI flags and messages.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            PositionFormat::LetterNumber => "letter-number",
            PositionFormat::Sequential => "sequential",
            PositionFormat::RowColumn => "row-column",
        }
    }
}

impl fmt::Display for PositionFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PositionFormat {
    type Err = PlateError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "letter-number" | "letternumber" | "well" => Ok(PositionFormat::LetterNumber),
            "sequential" | "index" | "number" => Ok(PositionFormat::Sequential),
            "row-column" | "rowcolumn" => Ok(PositionFormat::RowColumn),
            _ => Err(PlateError::InvalidPositionFormat {
                value: s.to_string(),
                expected: "letter-number, sequential, or row-column".to_string(),
            }),
        }
    }
}
