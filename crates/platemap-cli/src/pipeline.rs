//! Command pipelines: read, normalize/generate, write.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use platemap_convert::generate;
use platemap_infer::{NormalizeOptions, normalize};
use platemap_ingest::{
    ExportOptions, read_table, read_table_with_delimiter, write_dataset, write_dataset_to,
};
use platemap_model::{PlateDataset, PlateSize, PositionFormat};

/// A normalize run: input file, inference hints, output destination.
#[derive(Debug, Clone)]
pub struct NormalizeRequest {
    /// Delimited input file.
    pub input: PathBuf,
    /// Output file; stdout when unset.
    pub output: Option<PathBuf>,
    /// Field delimiter override; inferred from the extension when unset.
    pub delimiter: Option<u8>,
    /// Hints for the inference engine.
    pub options: NormalizeOptions,
    /// Re-split positions into row/column fields on export.
    pub split_position: bool,
}

/// The result of a normalize run, for summary printing.
#[derive(Debug, Clone)]
pub struct NormalizeOutcome {
    pub dataset: PlateDataset,
    pub output: Option<PathBuf>,
}

/// Reads the input table, normalizes it, and writes the dataset.
///
/// # Errors
///
/// Fails when the input cannot be read, inference fails, or the output
/// cannot be written; inference errors carry the resolution context.
pub fn run_normalize(request: &NormalizeRequest) -> Result<NormalizeOutcome> {
    let table = match request.delimiter {
        Some(delimiter) => read_table_with_delimiter(&request.input, delimiter),
        None => read_table(&request.input),
    }?;
    info!(
        input = %request.input.display(),
        rows = table.row_count(),
        "normalizing table"
    );

    let dataset = normalize(&table, &request.options)
        .with_context(|| format!("normalize {}", request.input.display()))?;

    let export = ExportOptions {
        split_position: request.split_position,
        plate_size: request.options.plate_size,
    };
    write_output(&dataset, request.output.as_deref(), &export)?;

    Ok(NormalizeOutcome {
        dataset,
        output: request.output.clone(),
    })
}

/// A template run: plate size, start well, output notation.
#[derive(Debug, Clone)]
pub struct TemplateRequest {
    /// Well count of the target plate.
    pub wells: u32,
    /// Letter-number position to start from.
    pub start: String,
    /// Notation of the emitted positions.
    pub target_format: PositionFormat,
    /// Wrap past the last well so every well appears once.
    pub include_all: bool,
    /// Output file; stdout when unset.
    pub output: Option<PathBuf>,
}

/// Generates a plate-map template and writes it.
///
/// # Errors
///
/// Fails on an unsupported well count, a bad start position, or an
/// unwritable output.
pub fn run_template(request: &TemplateRequest) -> Result<PlateDataset> {
    let size = PlateSize::from_wells(request.wells)?;
    let dataset = generate(size, &request.start, request.target_format, request.include_all)?;
    info!(
        wells = request.wells,
        positions = dataset.len(),
        "generated template"
    );
    write_output(&dataset, request.output.as_deref(), &ExportOptions::default())?;
    Ok(dataset)
}

fn write_output(
    dataset: &PlateDataset,
    output: Option<&std::path::Path>,
    export: &ExportOptions,
) -> Result<()> {
    match output {
        Some(path) => write_dataset(dataset, path, export),
        None => write_dataset_to(dataset, io::stdout().lock(), export),
    }
}
