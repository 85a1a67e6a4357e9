//! Dataset export.
//!
//! Writes a normalized [`PlateDataset`] back to CSV with exactly the
//! columns `position`, `value`[, `plate`]. With
//! [`ExportOptions::split_position`] the position is re-split into
//! separate `row`/`column` fields by running the codec in reverse.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use platemap_convert::parse_position;
use platemap_model::{PlateDataset, PlateError, PlateSize};

/// Controls for [`write_dataset`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportOptions {
    /// Emit `row`/`column` fields instead of a combined `position`.
    pub split_position: bool,
    /// Geometry for the split; required when `split_position` is set.
    pub plate_size: Option<PlateSize>,
}

/// Writes a dataset to a CSV file.
///
/// # Errors
///
/// Returns an error when the file cannot be created, a position cannot
/// be re-split, or a record cannot be written.
pub fn write_dataset(dataset: &PlateDataset, path: &Path, options: &ExportOptions) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("create output: {}", path.display()))?;
    write_dataset_to(dataset, file, options)
        .with_context(|| format!("write output: {}", path.display()))
}

/// Writes a dataset to any writer.
///
/// # Errors
///
/// Same failure modes as [`write_dataset`], minus file creation.
pub fn write_dataset_to<W: Write>(
    dataset: &PlateDataset,
    writer: W,
    options: &ExportOptions,
) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    let with_plate = dataset.has_plates();

    if options.split_position {
        let geometry = options
            .plate_size
            .map(|size| size.geometry())
            .ok_or_else(|| PlateError::PlateSizeRequired {
                operation: "split positions into row and column fields".to_string(),
            })?;
        let labels = geometry.row_labels();

        let mut header = vec!["row", "column", "value"];
        if with_plate {
            header.push("plate");
        }
        writer.write_record(&header)?;

        for record in &dataset.records {
            let coord = parse_position(&record.position, dataset.format, geometry)?;
            let mut fields = vec![
                labels.label(coord.row)?.to_string(),
                coord.col.to_string(),
                record.value.render(),
            ];
            if with_plate {
                fields.push(record.plate.clone().unwrap_or_default());
            }
            writer.write_record(&fields)?;
        }
    } else {
        let mut header = vec!["position", "value"];
        if with_plate {
            header.push("plate");
        }
        writer.write_record(&header)?;

        for record in &dataset.records {
            let mut fields = vec![record.position.render(), record.value.render()];
            if with_plate {
                fields.push(record.plate.clone().unwrap_or_default());
            }
            writer.write_record(&fields)?;
        }
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use platemap_model::{CellValue, PositionFormat, WellRecord};

    fn sample_dataset() -> PlateDataset {
        let mut dataset = PlateDataset::new(PositionFormat::LetterNumber);
        dataset.push(WellRecord::new(
            CellValue::Text("A1".to_string()),
            CellValue::Number(0.5),
        ));
        dataset.push(WellRecord::new(
            CellValue::Text("H12".to_string()),
            CellValue::Missing,
        ));
        dataset
    }

    fn render(dataset: &PlateDataset, options: &ExportOptions) -> String {
        let mut buffer = Vec::new();
        write_dataset_to(dataset, &mut buffer, options).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn combined_export_has_position_and_value_columns() {
        let output = render(&sample_dataset(), &ExportOptions::default());
        assert_eq!(output, "position,value\nA1,0.5\nH12,\n");
    }

    #[test]
    fn split_export_reverses_the_codec() {
        let options = ExportOptions {
            split_position: true,
            plate_size: Some(PlateSize::Wells96),
        };
        let output = render(&sample_dataset(), &options);
        assert_eq!(output, "row,column,value\nA,1,0.5\nH,12,\n");
    }

    #[test]
    fn split_export_requires_a_plate_size() {
        let options = ExportOptions {
            split_position: true,
            plate_size: None,
        };
        let mut buffer = Vec::new();
        let err = write_dataset_to(&sample_dataset(), &mut buffer, &options).unwrap_err();
        assert!(err.to_string().contains("plate size"));
    }

    #[test]
    fn plate_column_appears_when_any_record_is_grouped() {
        let mut dataset = PlateDataset::new(PositionFormat::LetterNumber);
        dataset.push(WellRecord {
            position: CellValue::Text("A1".to_string()),
            value: CellValue::Number(1.0),
            plate: Some("p1".to_string()),
        });
        let output = render(&dataset, &ExportOptions::default());
        assert_eq!(output, "position,value,plate\nA1,1,p1\n");
    }

    #[test]
    fn sequential_datasets_split_through_geometry() {
        let mut dataset = PlateDataset::new(PositionFormat::Sequential);
        dataset.push(WellRecord::new(
            CellValue::Number(96.0),
            CellValue::Number(2.0),
        ));
        let options = ExportOptions {
            split_position: true,
            plate_size: Some(PlateSize::Wells96),
        };
        let output = render(&dataset, &options);
        assert_eq!(output, "row,column,value\nH,12,2\n");
    }
}
