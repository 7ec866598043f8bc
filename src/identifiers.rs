use std::cmp::Ordering;
use std::collections::HashSet;

use crate::csv_reader::TransactionTable;

/// Order in which distinct identifiers are listed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdentifierOrder {
    /// Order of first appearance in the table.
    #[default]
    FirstSeen,
    /// Numeric order for unsigned integer identifiers, lexicographic otherwise.
    Sorted,
}

/// Every distinct account identifier in the table, each exactly once.
pub fn distinct_identifiers(table: &TransactionTable, order: IdentifierOrder) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut identifiers: Vec<&str> = table
        .iter()
        .map(|tx| tx.identifier())
        .filter(|id| seen.insert(*id))
        .collect();

    if order == IdentifierOrder::Sorted {
        identifiers.sort_by(|a, b| compare_identifiers(a, b));
    }
    identifiers
}

fn compare_identifiers(a: &str, b: &str) -> Ordering {
    match (a.parse::<u128>(), b.parse::<u128>()) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        _ => a.cmp(b),
    }
}
