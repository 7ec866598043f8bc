//! Spreadsheet export of the fraud-flagged rows of a subset.

use std::io::Cursor;

use rust_xlsxwriter::{Format, Workbook, Worksheet};
use tracing::debug;

use crate::error::{Error, Result};
use crate::filter::Subset;

pub const SHEET_NAME: &str = "FraudData";
pub const MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
const FILE_PREFIX: &str = "fraud_transactions_";
const FILE_EXTENSION: &str = "xlsx";

/// An in-memory `.xlsx` document. Nothing is written to disk; saving or
/// offering it for download is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FraudReport {
    file_name: String,
    row_count: usize,
    bytes: Vec<u8>,
}

impl FraudReport {
    /// Suggested file name, `fraud_transactions_<identifier>.xlsx`.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn sheet_name(&self) -> &'static str {
        SHEET_NAME
    }

    pub fn mime_type(&self) -> &'static str {
        MIME_TYPE
    }

    /// Number of data rows, header excluded.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Seekable reader positioned at the start of the document.
    pub fn into_cursor(self) -> Cursor<Vec<u8>> {
        Cursor::new(self.bytes)
    }
}

/// File name for an identifier's report. Bytes outside `[A-Za-z0-9_-]` are
/// percent-encoded, so the name is a single path component and distinct
/// identifiers never share a file name.
pub fn report_file_name(identifier: &str) -> String {
    let mut safe = String::with_capacity(identifier.len());
    for byte in identifier.trim().bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' {
            safe.push(char::from(byte));
        } else {
            safe.push_str(&format!("%{byte:02X}"));
        }
    }
    format!("{FILE_PREFIX}{safe}.{FILE_EXTENSION}")
}

// Builds the FraudData workbook for one identifier
// Inputs: the identifier's subset and the identifier itself
// Outputs: the report, or EmptySelection when no row is flagged
// Key steps:
// 1. Keep only fraud rows, order unchanged
// 2. Write the header row in bold, then one row per transaction; the
//    identifier column is always text so long card numbers keep every digit
// 3. Serialize the workbook into a byte buffer
pub fn export(subset: &Subset<'_>, identifier: &str) -> Result<FraudReport> {
    let fraud = subset.fraud_rows();
    if fraud.is_empty() {
        return Err(Error::EmptySelection {
            identifier: identifier.trim().to_string(),
        });
    }

    let too_large = || Error::ReportTooLarge {
        rows: fraud.len(),
        columns: fraud.headers().len(),
    };

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let header_format = Format::new().set_bold();
    for (col, name) in fraud.headers().iter().enumerate() {
        let col = u16::try_from(col).map_err(|_| too_large())?;
        worksheet.write_string_with_format(0, col, name.as_str(), &header_format)?;
    }

    for (i, tx) in fraud.iter().enumerate() {
        let row = u32::try_from(i + 1).map_err(|_| too_large())?;
        for (col, value) in tx.fields().iter().enumerate() {
            let as_text = col == fraud.identifier_column();
            let col = u16::try_from(col).map_err(|_| too_large())?;
            write_cell(worksheet, row, col, value, as_text)?;
        }
    }

    let bytes = workbook.save_to_buffer()?;
    let file_name = report_file_name(identifier);
    debug!(file_name = %file_name, rows = fraud.len(), size = bytes.len(), "fraud report built");

    Ok(FraudReport {
        file_name,
        row_count: fraud.len(),
        bytes,
    })
}

fn write_cell(worksheet: &mut Worksheet, row: u32, col: u16, value: &str, as_text: bool) -> Result<()> {
    if value.is_empty() {
        return Ok(());
    }
    match exact_number(value) {
        Some(number) if !as_text => worksheet.write_number(row, col, number)?,
        _ => worksheet.write_string(row, col, value)?,
    };
    Ok(())
}

/// The value as a number, but only when that loses nothing: `"4.97"` and
/// `"120"` qualify, `"1.50"`, `"007"` and `"1e3"` stay text.
fn exact_number(value: &str) -> Option<f64> {
    let number: f64 = value.parse().ok()?;
    (number.is_finite() && number.to_string() == value).then_some(number)
}
