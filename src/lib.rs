//! Credit card fraud lookup.
//!
//! Loads a transaction dataset once, then answers per-account queries: the
//! account's transactions, the fraud/non-fraud split, and a spreadsheet export
//! of the fraudulent rows.

pub mod csv_reader;
pub mod error;
pub mod filter;
pub mod identifiers;
pub mod lookup;
pub mod report;
pub mod summary;


pub use csv_reader::{load, load_from_reader, LoadOptions, Transaction, TransactionTable};
pub use error::{Error, ErrorKind, Result};
pub use filter::{filter, Lookup, Subset};
pub use identifiers::{distinct_identifiers, IdentifierOrder};
pub use lookup::{FraudLookup, Query};
pub use report::{export, FraudReport};
pub use summary::{summarize, summarize_lookup, Summary};
