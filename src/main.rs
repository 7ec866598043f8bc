// Command-line viewer for the fraud lookup. Loads the dataset once, then lists
// accounts, shows one account's transactions and fraud split, or exports its
// fraudulent transactions to a spreadsheet.
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use fraud_checker::{FraudLookup, IdentifierOrder, LoadOptions, Lookup, Query, Subset};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "fraud-checker")]
#[command(about = "Look up a credit card's transactions and export the fraudulent ones")]
struct Cli {
    /// Transaction dataset (CSV).
    #[arg(long, env = "FRAUD_CHECKER_DATA", default_value = "processed_data.csv")]
    data: PathBuf,

    /// Column holding the account identifier.
    #[arg(long, default_value = fraud_checker::csv_reader::DEFAULT_IDENTIFIER_COLUMN)]
    id_column: String,

    /// Column holding the 0/1 fraud flag.
    #[arg(long, default_value = fraud_checker::csv_reader::DEFAULT_FRAUD_COLUMN)]
    fraud_column: String,

    /// Field delimiter, a single ASCII character.
    #[arg(long, default_value_t = ',')]
    delimiter: char,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every credit card number in the dataset.
    List {
        /// Sort instead of listing in order of first appearance.
        #[arg(long)]
        sorted: bool,
    },
    /// Show all transactions and the fraud summary for one card.
    Show {
        cc_num: String,
        /// Print only the summary, as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Write the card's fraudulent transactions to an .xlsx file.
    Export {
        cc_num: String,
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
}

impl Cli {
    fn load_options(&self) -> Result<LoadOptions> {
        if !self.delimiter.is_ascii() {
            bail!("delimiter must be a single ASCII character, got {:?}", self.delimiter);
        }
        Ok(LoadOptions {
            identifier_column: self.id_column.clone(),
            fraud_column: self.fraud_column.clone(),
            delimiter: self.delimiter as u8,
        })
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fraud_checker=info")),
        )
        .init();

    let cli = Cli::parse();
    let options = cli.load_options()?;
    let lookup = FraudLookup::open(&cli.data, &options)
        .with_context(|| format!("failed to load {}", cli.data.display()))?;

    match &cli.command {
        Command::List { sorted } => {
            let order = if *sorted {
                IdentifierOrder::Sorted
            } else {
                IdentifierOrder::FirstSeen
            };
            for id in lookup.list_identifiers_in(order) {
                println!("{id}");
            }
        }
        Command::Show { cc_num, json } => {
            let query = lookup.query_summary(cc_num);
            if *json {
                println!("{}", serde_json::to_string_pretty(&query.summary)?);
            } else {
                print_query(&query);
            }
        }
        Command::Export { cc_num, out_dir } => export(&lookup, cc_num, out_dir)?,
    }

    Ok(())
}

// Text rendering of one card's lookup, in the same order as the web viewer:
// all transactions, the summary, the fraud split, then the fraud rows.
fn print_query(query: &Query<'_>) {
    let subset = match &query.lookup {
        Lookup::Empty => {
            println!("No data found for the selected credit card number.");
            return;
        }
        Lookup::Found(subset) => subset,
    };

    println!("All Transactions for this Credit Card");
    print_rows(subset);

    let summary = &query.summary;
    println!("\nTransaction Summary");
    println!("Total Transactions: {}", summary.total);
    println!("Fraudulent Transactions: {}", summary.fraud_count);
    println!("Non-Fraudulent Transactions: {}", summary.non_fraud_count);
    println!(
        "Fraudulent: {:.1}%  Non-Fraudulent: {:.1}%",
        summary.fraud_share(),
        summary.non_fraud_share()
    );

    if summary.has_fraud() {
        println!("\nFraudulent Transactions");
        print_rows(&subset.fraud_rows());
    } else {
        println!("\nNo fraud detected: all transactions are safe.");
    }
}

fn print_rows(subset: &Subset<'_>) {
    println!("{}", subset.headers().join(" | "));
    for tx in subset.iter() {
        println!("{}", tx.fields().join(" | "));
    }
}

fn export(lookup: &FraudLookup, cc_num: &str, out_dir: &Path) -> Result<()> {
    let Some(report) = lookup.export_fraud_report(cc_num)? else {
        println!("Nothing to export: no fraudulent transactions for {}.", cc_num.trim());
        return Ok(());
    };

    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;
    let path = out_dir.join(report.file_name());
    fs::write(&path, report.bytes()).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), rows = report.row_count(), "report written");
    println!("Wrote {} fraudulent transactions to {}", report.row_count(), path.display());
    Ok(())
}
