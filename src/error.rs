//! Error taxonomy at the pipeline boundary.

use std::path::PathBuf;

use thiserror::Error;

/// The table does not have a shape the normalizer understands.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    #[error("table has no columns, cannot identify the label column")]
    MissingLabelColumn,

    #[error("no time columns remain after dropping known columns")]
    NoTimeColumns,

    #[error("column '{header}' is not a valid time column")]
    InvalidTimeHeader { header: String },

    #[error("column '{header}' denotes second {value}, outside the supported range")]
    SecondOutOfRange { header: String, value: i64 },

    #[error("emotion '{emotion}' at column '{header}': '{value}' is not a number")]
    NonNumericCell {
        emotion: String,
        header: String,
        value: String,
    },

    #[error("emotion '{0}' appears on more than one row")]
    DuplicateEmotion(String),
}

/// The source file could not be read into a table.
#[derive(Error, Debug)]
pub enum IoError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("{0} contains no worksheet")]
    NoWorksheet(PathBuf),

    #[error("{0} has no header row")]
    MissingHeader(PathBuf),

    #[error("nothing to export, no data has been processed")]
    NothingToExport,

    #[error(transparent)]
    Workbook(#[from] calamine::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Arrow(#[from] arrow::error::ArrowError),

    #[error(transparent)]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Any failure of a "process" action.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Io(#[from] IoError),
}
