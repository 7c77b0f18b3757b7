use rowbook_types::ValueKind;
use rust_xlsxwriter::XlsxError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while writing records to a workbook
#[derive(Error, Debug)]
pub enum WriteError {
    #[error("Invalid sheet name '{name}'. Sheet names must be <= 31 chars and cannot contain [ ] : * ? / \\")]
    InvalidSheetName { name: String },

    #[error("Duplicate sheet name '{name}'. Sheet names must be unique (case-insensitive)")]
    DuplicateSheetName { name: String },

    #[error("Unsupported value of type {kind} in field '{field}' of sheet '{sheet}'")]
    UnsupportedValueType {
        field: String,
        sheet: String,
        kind: ValueKind,
    },

    #[error("Sheet '{sheet}' exceeds the row limit of {limit} rows")]
    TooManyRows { sheet: String, limit: u32 },

    #[error("Sheet '{sheet}' has {columns} columns, exceeding the limit of {limit}")]
    TooManyColumns {
        sheet: String,
        columns: usize,
        limit: u16,
    },

    #[error("A workbook needs at least one sheet")]
    EmptyWorkbook,

    #[error("IO error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Workbook codec error: {0}")]
    Codec(#[from] XlsxError),
}

impl WriteError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        WriteError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, WriteError>;
