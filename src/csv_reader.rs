use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info};

use crate::error::{Error, Result};

pub const DEFAULT_IDENTIFIER_COLUMN: &str = "cc_num";
pub const DEFAULT_FRAUD_COLUMN: &str = "is_fraud";

/// Column names and dialect used when reading a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    pub identifier_column: String,
    pub fraud_column: String,
    pub delimiter: u8,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            identifier_column: DEFAULT_IDENTIFIER_COLUMN.to_string(),
            fraud_column: DEFAULT_FRAUD_COLUMN.to_string(),
            delimiter: b',',
        }
    }
}

/// One row of the dataset. Every cell is kept verbatim; the account
/// identifier and fraud flag are extracted once at load time. The identifier
/// is the cell with surrounding whitespace removed, the same normalization
/// applied to a selected identifier, so `" 12"` and `"12"` are one account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    identifier: String,
    is_fraud: bool,
    fields: Vec<String>,
}

impl Transaction {
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn is_fraud(&self) -> bool {
        self.is_fraud
    }

    /// All cells in input column order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn get(&self, column: usize) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }
}

/// The loaded dataset. Rows keep their file order and nothing hands out
/// mutable access once loading is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionTable {
    headers: Vec<String>,
    identifier_column: usize,
    rows: Vec<Transaction>,
}

impl TransactionTable {
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn identifier_column(&self) -> usize {
        self.identifier_column
    }

    pub fn rows(&self) -> &[Transaction] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.rows.iter()
    }
}

impl<'a> IntoIterator for &'a TransactionTable {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

pub fn load<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<TransactionTable> {
    let path = path.as_ref();
    debug!(path = %path.display(), "opening dataset");
    let file = File::open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_reader(file, options)
}

// Reads a delimited table and validates the columns the pipeline depends on
// Inputs: any byte reader and the column/dialect options
// Outputs: the immutable table, or a load/schema error
// Key steps:
// 1. Read the header row and locate the identifier and fraud columns
// 2. Read every record; ragged rows and bad encodings fail the whole load
// 3. Parse the fraud flag strictly as 0 or 1
pub fn load_from_reader<R: Read>(reader: R, options: &LoadOptions) -> Result<TransactionTable> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .trim(Trim::Headers)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let identifier_column = column_index(&headers, &options.identifier_column)?;
    let fraud_column = column_index(&headers, &options.fraud_column)?;

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let line = record.position().map_or(0, |pos| pos.line());
        rows.push(to_transaction(&record, identifier_column, fraud_column, &options.fraud_column, line)?);
    }

    info!(rows = rows.len(), columns = headers.len(), "dataset loaded");

    Ok(TransactionTable {
        headers,
        identifier_column,
        rows,
    })
}

fn column_index(headers: &[String], column: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| Error::MissingColumn {
            column: column.to_string(),
        })
}

fn to_transaction(
    record: &StringRecord,
    identifier_column: usize,
    fraud_column: usize,
    fraud_name: &str,
    line: u64,
) -> Result<Transaction> {
    // The reader rejects ragged rows, so both indices are in bounds.
    let identifier = record.get(identifier_column).unwrap_or_default().trim().to_string();
    let raw_flag = record.get(fraud_column).unwrap_or_default();
    let is_fraud = parse_fraud_flag(raw_flag).ok_or_else(|| Error::InvalidFraudFlag {
        line,
        column: fraud_name.to_string(),
        value: raw_flag.to_string(),
    })?;

    Ok(Transaction {
        identifier,
        is_fraud,
        fields: record.iter().map(str::to_string).collect(),
    })
}

fn parse_fraud_flag(raw: &str) -> Option<bool> {
    match raw.trim() {
        "0" => Some(false),
        "1" => Some(true),
        _ => None,
    }
}
