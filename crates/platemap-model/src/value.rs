//! Tagged cell values.
//!
//! Source tables mix strings and numbers per column without a declared
//! schema, so every cell is carried as a tagged value and converted
//! explicitly at the boundary. The detector and codec operate on the
//! tagged type, never on a raw representation.

use serde::{Deserialize, Serialize};

/// A single table cell: text, number, or missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Text(String),
    Number(f64),
    Missing,
}

impl CellValue {
    /// Parses a raw string cell into a tagged value.
    ///
    /// Empty cells and the conventional `NA` marker become [`CellValue::Missing`];
    /// anything that parses as a number becomes [`CellValue::Number`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("na") {
            return CellValue::Missing;
        }
        if let Ok(number) = trimmed.parse::<f64>() {
            return CellValue::Number(number);
        }
        CellValue::Text(trimmed.to_string())
    }

    /// True for [`CellValue::Missing`].
    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    /// Returns the text content, if this is a text cell.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the numeric content, if this is a number cell.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(number) => Some(*number),
            _ => None,
        }
    }

    /// Serializes the cell back to its file representation.
    ///
    /// Missing cells render as the empty string; whole numbers render
    /// without a fractional part.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            CellValue::Text(text) => text.clone(),
            CellValue::Number(number) => format!("{number}"),
            CellValue::Missing => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_tags_cells() {
        assert_eq!(CellValue::parse("A1"), CellValue::Text("A1".to_string()));
        assert_eq!(CellValue::parse("3.5"), CellValue::Number(3.5));
        assert_eq!(CellValue::parse("42"), CellValue::Number(42.0));
        assert_eq!(CellValue::parse(""), CellValue::Missing);
        assert_eq!(CellValue::parse("  "), CellValue::Missing);
        assert_eq!(CellValue::parse("NA"), CellValue::Missing);
    }

    #[test]
    fn render_is_file_friendly() {
        assert_eq!(CellValue::Number(42.0).render(), "42");
        assert_eq!(CellValue::Number(0.25).render(), "0.25");
        assert_eq!(CellValue::Text("B7".to_string()).render(), "B7");
        assert_eq!(CellValue::Missing.render(), "");
    }

    #[test]
    fn serde_round_trip() {
        let value = CellValue::Number(1.5);
        let json = serde_json::to_string(&value).expect("serialize cell");
        let back: CellValue = serde_json::from_str(&json).expect("deserialize cell");
        assert_eq!(back, value);
    }
}
