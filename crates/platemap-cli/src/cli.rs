//! CLI argument definitions for the platemap tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use platemap_model::PositionFormat;

#[derive(Parser)]
#[command(
    name = "platemap",
    version,
    about = "Plate data toolkit - reshape and template microplate datasets",
    long_about = "Reshape microplate assay data between well-position notations.\n\n\
                  Normalizes loosely structured tabular exports into a canonical\n\
                  (position, value[, plate]) table and generates plate-map templates\n\
                  for 6- to 1536-well plates."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Normalize a tabular export into a (position, value[, plate]) table.
    Normalize(NormalizeArgs),

    /// Generate a plate-map template.
    Template(TemplateArgs),

    /// List the supported plate geometries.
    Sizes,
}

#[derive(Parser)]
pub struct NormalizeArgs {
    /// Delimited input file (CSV; .tsv/.tab read as tab-separated).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output file (default: stdout).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Column holding combined well positions.
    #[arg(long = "position-column", value_name = "NAME")]
    pub position_column: Option<String>,

    /// Separate row and column field names (takes precedence over
    /// --position-column).
    #[arg(long = "row-column", value_names = ["ROW", "COL"], num_args = 2)]
    pub row_column: Option<Vec<String>>,

    /// Declare the --row-column row field letter-based.
    #[arg(long = "letter-rows", requires = "row_column", conflicts_with = "numeric_rows")]
    pub letter_rows: bool,

    /// Declare the --row-column row field numeric.
    #[arg(long = "numeric-rows", requires = "row_column")]
    pub numeric_rows: bool,

    /// Column holding the value to carry through.
    #[arg(long = "value-column", value_name = "NAME")]
    pub value_column: Option<String>,

    /// Column grouping rows into independent plates.
    #[arg(long = "plate-column", value_name = "NAME")]
    pub plate_column: Option<String>,

    /// Notation of the output positions.
    #[arg(long = "to", value_enum, default_value = "letter-number")]
    pub to: FormatArg,

    /// Plate size in wells; required when positions must be converted or
    /// numeric rows resolved.
    #[arg(long = "plate-size", value_name = "WELLS")]
    pub plate_size: Option<u32>,

    /// Emit separate row/column fields instead of a combined position.
    #[arg(long = "split-position")]
    pub split_position: bool,

    /// Field delimiter override (single ASCII character).
    #[arg(long = "delimiter", value_name = "CHAR")]
    pub delimiter: Option<char>,
}

#[derive(Parser)]
pub struct TemplateArgs {
    /// Well count of the target plate.
    #[arg(long = "wells", value_name = "N")]
    pub wells: u32,

    /// Position to start enumerating from, in letter-number notation.
    #[arg(long = "start", value_name = "WELL", default_value = "A1")]
    pub start: String,

    /// Notation of the emitted positions.
    #[arg(long = "to", value_enum, default_value = "letter-number")]
    pub to: FormatArg,

    /// Stop at the end of the plate instead of wrapping back to A1.
    #[arg(long = "partial")]
    pub partial: bool,

    /// Output file (default: stdout).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// CLI position notation choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    LetterNumber,
    Sequential,
    RowColumn,
}

impl From<FormatArg> for PositionFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::LetterNumber => PositionFormat::LetterNumber,
            FormatArg::Sequential => PositionFormat::Sequential,
            FormatArg::RowColumn => PositionFormat::RowColumn,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
