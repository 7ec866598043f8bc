use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Coarse classification of [`Error`], used by callers that only need to
/// branch on the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The source could not be read or is not a well-formed table.
    DataLoad,
    /// Required columns are missing or hold values of the wrong shape.
    Schema,
    /// The exporter was asked to export a subset without fraud rows.
    EmptySelection,
    /// The spreadsheet could not be produced.
    Export,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot open dataset {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed dataset: {0}")]
    Malformed(#[from] csv::Error),

    #[error("required column '{column}' not found in header")]
    MissingColumn { column: String },

    #[error("line {line}: invalid value {value:?} in column '{column}' (expected 0 or 1)")]
    InvalidFraudFlag {
        line: u64,
        column: String,
        value: String,
    },

    #[error("no fraudulent transactions to export for identifier {identifier}")]
    EmptySelection { identifier: String },

    #[error("report has {rows} rows and {columns} columns, beyond spreadsheet limits")]
    ReportTooLarge { rows: usize, columns: usize },

    #[error("failed to build spreadsheet: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Open { .. } | Error::Malformed(_) => ErrorKind::DataLoad,
            Error::MissingColumn { .. } | Error::InvalidFraudFlag { .. } => ErrorKind::Schema,
            Error::EmptySelection { .. } => ErrorKind::EmptySelection,
            Error::ReportTooLarge { .. } | Error::Spreadsheet(_) => ErrorKind::Export,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
