use std::path::Path;

use tracing::{debug, info};

use crate::csv_reader::{self, LoadOptions, TransactionTable};
use crate::error::Result;
use crate::filter::{self, Lookup};
use crate::identifiers::{self, IdentifierOrder};
use crate::report::{self, FraudReport};
use crate::summary::{self, Summary};

/// Result of querying one identifier: its rows and their fraud split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query<'a> {
    pub lookup: Lookup<'a>,
    pub summary: Summary,
}

/// Read-only handle over a loaded dataset. Built once, then every query
/// borrows from it; nothing is cached between queries.
#[derive(Debug, Clone)]
pub struct FraudLookup {
    table: TransactionTable,
}

impl FraudLookup {
    pub fn new(table: TransactionTable) -> Self {
        Self { table }
    }

    pub fn open<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<Self> {
        csv_reader::load(path, options).map(Self::new)
    }

    pub fn table(&self) -> &TransactionTable {
        &self.table
    }

    pub fn list_identifiers(&self) -> Vec<&str> {
        identifiers::distinct_identifiers(&self.table, IdentifierOrder::FirstSeen)
    }

    pub fn list_identifiers_in(&self, order: IdentifierOrder) -> Vec<&str> {
        identifiers::distinct_identifiers(&self.table, order)
    }

    pub fn query_summary(&self, identifier: &str) -> Query<'_> {
        let lookup = filter::filter(&self.table, identifier);
        let summary = summary::summarize_lookup(&lookup);
        debug!(
            identifier = identifier.trim(),
            total = summary.total,
            fraud = summary.fraud_count,
            "identifier queried"
        );
        Query { lookup, summary }
    }

    /// The identifier's fraud report, or `None` when there is nothing to
    /// export (no rows at all, or no fraud rows).
    pub fn export_fraud_report(&self, identifier: &str) -> Result<Option<FraudReport>> {
        let lookup = filter::filter(&self.table, identifier);
        let Some(subset) = lookup.subset() else {
            return Ok(None);
        };
        if subset.fraud_rows().is_empty() {
            return Ok(None);
        }

        let report = report::export(subset, identifier)?;
        info!(
            file_name = report.file_name(),
            rows = report.row_count(),
            "fraud report exported"
        );
        Ok(Some(report))
    }
}
