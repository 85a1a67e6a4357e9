//! Human-readable tables for command output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};

use platemap_model::PlateSize;

use crate::pipeline::NormalizeOutcome;

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

/// Prints a per-plate record summary after a normalize run.
pub fn print_normalize_summary(outcome: &NormalizeOutcome) {
    if let Some(path) = &outcome.output {
        println!("Output: {}", path.display());
    }
    println!("Positions: {}", outcome.dataset.format);

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Plate"),
        header_cell("Records"),
        header_cell("Missing values"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);

    let plates: Vec<Option<String>> = if outcome.dataset.has_plates() {
        outcome
            .dataset
            .plate_ids()
            .iter()
            .map(|plate| Some((*plate).to_string()))
            .collect()
    } else {
        vec![None]
    };
    for plate in plates {
        let records = outcome
            .dataset
            .records
            .iter()
            .filter(|record| record.plate == plate);
        let count = records.clone().count();
        let missing = records.filter(|record| record.value.is_missing()).count();
        table.add_row(vec![
            Cell::new(plate.as_deref().unwrap_or("-")),
            Cell::new(count),
            Cell::new(missing),
        ]);
    }
    println!("{table}");
}

/// Prints the supported plate geometries.
pub fn print_sizes() {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Wells"),
        header_cell("Rows"),
        header_cell("Columns"),
        header_cell("First well"),
        header_cell("Last well"),
    ]);
    apply_table_style(&mut table);
    for index in 0..3 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    for size in PlateSize::ALL {
        let geometry = size.geometry();
        let labels = geometry.row_labels();
        let last_row = labels.label(geometry.rows).unwrap_or("?");
        table.add_row(vec![
            Cell::new(geometry.wells),
            Cell::new(geometry.rows),
            Cell::new(geometry.cols),
            Cell::new("A1"),
            Cell::new(format!("{last_row}{}", geometry.cols)),
        ]);
    }
    println!("{table}");
}
