//! Command line arguments and the configuration resolved from them.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use time::{Date, OffsetDateTime, UtcOffset};

use crate::{export::DEFAULT_REPORT_NAME, timezone::get_local_offset};

/// Track expenses from photographed receipts.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// File path to the application SQLite database.
    #[arg(long, env = "RECEIPT_LEDGER_DB", default_value = "expenses.db", global = true)]
    pub db_path: PathBuf,

    /// Directory that receipt images are copied into.
    #[arg(
        long,
        env = "RECEIPT_LEDGER_RECEIPTS_DIR",
        default_value = "receipts",
        global = true
    )]
    pub receipts_dir: PathBuf,

    /// The text recognition program to run on receipt images.
    #[arg(
        long,
        env = "RECEIPT_LEDGER_TESSERACT",
        default_value = "tesseract",
        global = true
    )]
    pub tesseract: PathBuf,

    /// Canonical timezone name, e.g. "Pacific/Auckland", used for today's date.
    ///
    /// Defaults to the system's local offset.
    #[arg(long, env = "RECEIPT_LEDGER_TIMEZONE", global = true)]
    pub timezone: Option<String>,

    /// File to append debug logs to.
    #[arg(long, env = "RECEIPT_LEDGER_LOG", default_value = "debug.log", global = true)]
    pub log_file: PathBuf,

    /// What to do.
    #[command(subcommand)]
    pub command: Command,
}

/// The actions a user can take.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Read the total from a receipt image and record it as an expense.
    Upload {
        /// The receipt image (.png, .jpg or .jpeg).
        image: Option<PathBuf>,
    },
    /// Record an expense without a receipt.
    Add {
        /// The date of the expense as YYYY-MM-DD, defaults to today.
        #[arg(long)]
        date: Option<String>,
        /// One of Food, Transport, Rent, Entertainment, Utilities, Healthcare or Others.
        #[arg(long)]
        category: String,
        /// The amount spent, e.g. 12.50.
        #[arg(long, allow_hyphen_values = true)]
        amount: String,
    },
    /// List all expenses, newest first.
    List {
        /// Print the expenses as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Show the total spent in each category.
    Summary,
    /// Show the total spent in each month.
    Trend,
    /// Write all expenses to a CSV file, oldest first.
    Export {
        /// Where to write the report.
        #[arg(long, short, default_value = DEFAULT_REPORT_NAME)]
        output: PathBuf,
    },
    /// List stored receipts with their expenses.
    Receipts,
}

/// The settings the application runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// File path to the application SQLite database.
    pub db_path: PathBuf,
    /// Directory that receipt images are copied into.
    pub receipts_dir: PathBuf,
    /// The text recognition program.
    pub tesseract: PathBuf,
    /// The offset used to work out today's date.
    pub utc_offset: UtcOffset,
    /// File to append debug logs to.
    pub log_file: PathBuf,
}

impl Config {
    /// Resolve the configuration from parsed arguments.
    ///
    /// An unknown timezone falls back to UTC with a warning.
    pub fn from_args(args: &Args) -> Self {
        let utc_offset = match &args.timezone {
            Some(timezone) => get_local_offset(timezone).unwrap_or_else(|| {
                tracing::warn!("Unknown timezone {timezone:?}, using UTC");
                UtcOffset::UTC
            }),
            None => UtcOffset::current_local_offset().unwrap_or_else(|error| {
                tracing::debug!("Could not determine the local offset ({error}), using UTC");
                UtcOffset::UTC
            }),
        };

        Self {
            db_path: args.db_path.clone(),
            receipts_dir: args.receipts_dir.clone(),
            tesseract: args.tesseract.clone(),
            utc_offset,
            log_file: args.log_file.clone(),
        }
    }

    /// Today's date in the configured timezone.
    pub fn today(&self) -> Date {
        OffsetDateTime::now_utc().to_offset(self.utc_offset).date()
    }
}
