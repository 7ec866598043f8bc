use crate::csv_reader::{Transaction, TransactionTable};

/// Ordered view of the rows belonging to one account identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subset<'a> {
    headers: &'a [String],
    identifier_column: usize,
    rows: Vec<&'a Transaction>,
}

impl<'a> Subset<'a> {
    pub fn new(table: &'a TransactionTable, rows: Vec<&'a Transaction>) -> Self {
        Self {
            headers: table.headers(),
            identifier_column: table.identifier_column(),
            rows,
        }
    }

    pub fn headers(&self) -> &'a [String] {
        self.headers
    }

    pub fn identifier_column(&self) -> usize {
        self.identifier_column
    }

    pub fn rows(&self) -> &[&'a Transaction] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Transaction> + '_ {
        self.rows.iter().copied()
    }

    /// The fraud-flagged rows, in the same relative order.
    pub fn fraud_rows(&self) -> Subset<'a> {
        Subset {
            headers: self.headers,
            identifier_column: self.identifier_column,
            rows: self.rows.iter().copied().filter(|tx| tx.is_fraud()).collect(),
        }
    }
}

/// Outcome of looking an identifier up. `Empty` is the ordinary
/// "no data found" case, not a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<'a> {
    Empty,
    Found(Subset<'a>),
}

impl<'a> Lookup<'a> {
    pub fn subset(&self) -> Option<&Subset<'a>> {
        match self {
            Lookup::Empty => None,
            Lookup::Found(subset) => Some(subset),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Lookup::Empty)
    }
}

/// All rows whose identifier equals `identifier` exactly, in table order.
/// The selection is trimmed the same way identifiers are at load.
pub fn filter<'a>(table: &'a TransactionTable, identifier: &str) -> Lookup<'a> {
    let identifier = identifier.trim();
    let rows: Vec<&Transaction> = table
        .iter()
        .filter(|tx| tx.identifier() == identifier)
        .collect();

    if rows.is_empty() {
        Lookup::Empty
    } else {
        Lookup::Found(Subset::new(table, rows))
    }
}
