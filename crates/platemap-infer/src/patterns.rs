//! Header-name candidate tables.
//!
//! Auto-detection scans these ordered lists against normalized table
//! headers; the first present name wins. New lab-equipment conventions
//! are added here, never in the resolution logic.

use platemap_model::RawTable;

/// Conventional names for a combined position column, in priority order.
pub const POSITION_HEADER_CANDIDATES: &[&str] = &[
    "position",
    "well",
    "well_id",
    "well_position",
    "pos",
    "location",
    "well_location",
];

/// Conventional (row, column) header-name pairs, in priority order.
pub const ROW_COLUMN_HEADER_PAIRS: &[(&str, &str)] = &[
    ("row", "col"),
    ("row", "column"),
    ("plate_row", "plate_column"),
    ("plate_row", "plate_col"),
    ("well_row", "well_col"),
    ("well_row", "well_column"),
];

/// Conventional names for the measurement column, in priority order.
pub const VALUE_HEADER_CANDIDATES: &[&str] = &[
    "value",
    "values",
    "measurement",
    "signal",
    "intensity",
    "od",
    "readout",
    "response",
    "result",
];

/// Normalizes a header for candidate comparison: lowercase, separators
/// collapsed to single underscores.
#[must_use]
pub fn normalize_header(raw: &str) -> String {
    let mut normalized = String::with_capacity(raw.len());
    let mut last_was_separator = true;
    for ch in raw.trim().chars() {
        if ch == '_' || ch == '-' || ch == '.' || ch == '/' || ch.is_whitespace() {
            if !last_was_separator {
                normalized.push('_');
                last_was_separator = true;
            }
        } else {
            normalized.push(ch.to_ascii_lowercase());
            last_was_separator = false;
        }
    }
    if normalized.ends_with('_') {
        normalized.pop();
    }
    normalized
}

/// Finds the first candidate present in the table, comparing normalized
/// headers. Returns the column index and the candidate that matched.
#[must_use]
pub fn find_header<'a>(table: &RawTable, candidates: &[&'a str]) -> Option<(usize, &'a str)> {
    let normalized: Vec<String> = table
        .columns()
        .iter()
        .map(|column| normalize_header(column))
        .collect();
    for candidate in candidates {
        if let Some(index) = normalized.iter().position(|header| header == candidate) {
            return Some((index, *candidate));
        }
    }
    None
}

/// Finds the first (row, column) pair with both members present.
#[must_use]
pub fn find_header_pair(table: &RawTable) -> Option<(usize, usize)> {
    let normalized: Vec<String> = table
        .columns()
        .iter()
        .map(|column| normalize_header(column))
        .collect();
    for (row_name, col_name) in ROW_COLUMN_HEADER_PAIRS {
        let row = normalized.iter().position(|header| header == row_name);
        let col = normalized.iter().position(|header| header == col_name);
        if let (Some(row), Some(col)) = (row, col) {
            return Some((row, col));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use platemap_model::CellValue;

    #[test]
    fn normalization_collapses_separators() {
        assert_eq!(normalize_header("Well ID"), "well_id");
        assert_eq!(normalize_header("  plate-row "), "plate_row");
        assert_eq!(normalize_header("WELL__POSITION"), "well_position");
        assert_eq!(normalize_header("od"), "od");
    }

    #[test]
    fn earlier_candidates_win() {
        let mut table = RawTable::new(vec!["Well".to_string(), "Position".to_string()]);
        table.push_row(vec![CellValue::Missing, CellValue::Missing]);
        // "position" precedes "well" in the candidate list.
        let (index, matched) = find_header(&table, POSITION_HEADER_CANDIDATES).unwrap();
        assert_eq!(matched, "position");
        assert_eq!(index, 1);
    }

    #[test]
    fn pair_lookup_requires_both_members() {
        let mut table = RawTable::new(vec!["row".to_string(), "sample".to_string()]);
        table.push_row(vec![CellValue::Missing, CellValue::Missing]);
        assert_eq!(find_header_pair(&table), None);

        let mut table = RawTable::new(vec!["Plate Row".to_string(), "Plate Column".to_string()]);
        table.push_row(vec![CellValue::Missing, CellValue::Missing]);
        assert_eq!(find_header_pair(&table), Some((0, 1)));
    }
}
