//! Exports the ledger as a CSV expense report.

use std::{fs::File, io::Write, path::Path};

use serde::Serialize;

use crate::{Error, ledger::Expense};

/// The default file name offered for the expense report.
pub const DEFAULT_REPORT_NAME: &str = "expense_report.csv";

#[derive(Debug, Serialize)]
struct ReportRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Category")]
    category: &'static str,
    #[serde(rename = "Amount")]
    amount: String,
}

impl From<&Expense> for ReportRow {
    fn from(expense: &Expense) -> Self {
        Self {
            date: expense.date.to_string(),
            category: expense.category.as_str(),
            amount: expense.amount.to_string(),
        }
    }
}

/// Write `expenses` as CSV rows with a `Date,Category,Amount` header.
///
/// Rows are written in the order given; callers should pass expenses oldest first.
pub fn write_expense_report<W: Write>(expenses: &[Expense], writer: W) -> Result<(), Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for expense in expenses {
        csv_writer.serialize(ReportRow::from(expense))?;
    }

    csv_writer
        .flush()
        .map_err(|error| Error::Export(error.to_string()))
}

/// Write `expenses` to a new CSV file at `path`, replacing any existing file.
pub fn export_expense_report(expenses: &[Expense], path: &Path) -> Result<(), Error> {
    let file = File::create(path)
        .map_err(|error| Error::Export(format!("could not create {path:?}: {error}")))?;

    write_expense_report(expenses, file)?;
    tracing::info!("Exported {} expenses to {path:?}", expenses.len());

    Ok(())
}
