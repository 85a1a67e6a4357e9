//! Subcommand execution: translate CLI arguments into pipeline requests.

use anyhow::{Result, bail};

use platemap_cli::pipeline::{
    NormalizeRequest, TemplateRequest, run_normalize, run_template,
};
use platemap_cli::summary::{print_normalize_summary, print_sizes};
use platemap_infer::{NormalizeOptions, RowColumnPair, RowFieldKind};
use platemap_model::PlateSize;

use crate::cli::{NormalizeArgs, TemplateArgs};

pub fn run_normalize_command(args: &NormalizeArgs) -> Result<()> {
    let row_column_pair = match args.row_column.as_deref() {
        Some([row, column]) => Some(RowColumnPair {
            row: row.clone(),
            column: column.clone(),
            row_kind: if args.letter_rows {
                Some(RowFieldKind::Letter)
            } else if args.numeric_rows {
                Some(RowFieldKind::Numeric)
            } else {
                None
            },
        }),
        Some(_) | None => None,
    };

    let plate_size = args
        .plate_size
        .map(PlateSize::from_wells)
        .transpose()?;

    let delimiter = match args.delimiter {
        Some(ch) => match u8::try_from(ch) {
            Ok(byte) => Some(byte),
            Err(_) => bail!("--delimiter must be a single ASCII character"),
        },
        None => None,
    };

    let request = NormalizeRequest {
        input: args.input.clone(),
        output: args.output.clone(),
        delimiter,
        options: NormalizeOptions {
            position_column: args.position_column.clone(),
            row_column_pair,
            value_column: args.value_column.clone(),
            plate_column: args.plate_column.clone(),
            target_format: args.to.into(),
            plate_size,
        },
        split_position: args.split_position,
    };

    let outcome = run_normalize(&request)?;
    // Writing the dataset to stdout keeps stdout machine-readable; the
    // summary table only appears for file output.
    if outcome.output.is_some() {
        print_normalize_summary(&outcome);
    }
    Ok(())
}

pub fn run_template_command(args: &TemplateArgs) -> Result<()> {
    let request = TemplateRequest {
        wells: args.wells,
        start: args.start.clone(),
        target_format: args.to.into(),
        include_all: !args.partial,
        output: args.output.clone(),
    };
    run_template(&request)?;
    Ok(())
}

pub fn run_sizes_command() -> Result<()> {
    print_sizes();
    Ok(())
}
