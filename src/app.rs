//! Carries out one command against the ledger and reports how it went.

use std::{io::Write, path::Path};

use crate::{
    Error,
    alert::Alert,
    config::{Command, Config},
    details::Prompt,
    export::export_expense_report,
    intake::ReceiptIntake,
    ledger::{LedgerStore, NewExpense},
    parser::AmountParser,
    receipt_storage::ReceiptStorage,
    recognizer::TesseractRecognizer,
    report::{write_category_sums, write_expense_table, write_monthly_sums, write_receipt_table},
};

const NO_EXPENSES: &str = "No expenses recorded yet!";

/// Run `command`, writing any listing or report to `out`.
///
/// Returns the notification for the user, if there is one. Errors are logged
/// and turned into an error alert.
pub fn run<P: Prompt>(
    command: Command,
    config: &Config,
    store: &mut LedgerStore,
    prompt: P,
    out: &mut impl Write,
) -> Option<Alert> {
    tracing::debug!("Running {command:?}");

    match try_run(command, config, store, prompt, out) {
        Ok(alert) => alert,
        Err(error) => {
            tracing::error!("Command failed: {error}");
            Some(Alert::error("An error occurred", &error.to_string()))
        }
    }
}

fn try_run<P: Prompt>(
    command: Command,
    config: &Config,
    store: &mut LedgerStore,
    prompt: P,
    out: &mut impl Write,
) -> Result<Option<Alert>, Error> {
    match command {
        Command::Upload { image } => upload(image.as_deref(), config, store, prompt),
        Command::Add {
            date,
            category,
            amount,
        } => {
            let date = date.unwrap_or_else(|| config.today().to_string());
            add_expense(&date, &category, &amount, store).map(Some)
        }
        Command::List { json } => list_expenses(json, store, out),
        Command::Summary => {
            if store.count_expenses()? == 0 {
                return Ok(Some(Alert::warning(NO_EXPENSES, "")));
            }

            write_category_sums(&store.category_sums()?, out)?;
            Ok(None)
        }
        Command::Trend => {
            if store.count_expenses()? == 0 {
                return Ok(Some(Alert::warning(NO_EXPENSES, "")));
            }

            write_monthly_sums(&store.monthly_sums()?, out)?;
            Ok(None)
        }
        Command::Export { output } => export(&output, store).map(Some),
        Command::Receipts => {
            let receipts = store.list_receipts()?;
            if receipts.is_empty() {
                return Ok(Some(Alert::warning("No receipts stored yet!", "")));
            }

            write_receipt_table(&receipts, &store.list_expenses()?, out)?;
            Ok(None)
        }
    }
}

fn upload<P: Prompt>(
    image: Option<&Path>,
    config: &Config,
    store: &mut LedgerStore,
    prompt: P,
) -> Result<Option<Alert>, Error> {
    let storage = ReceiptStorage::new(&config.receipts_dir)?;
    let recognizer = TesseractRecognizer::new(&config.tesseract);
    let mut intake = ReceiptIntake::new(storage, recognizer, AmountParser::default(), prompt);

    let outcome = intake.run(store, image, config.today());
    tracing::info!("Receipt intake finished: {outcome:?}");

    Ok(outcome.alert())
}

fn add_expense(
    date: &str,
    category: &str,
    amount: &str,
    store: &LedgerStore,
) -> Result<Alert, Error> {
    let new_expense = match NewExpense::parse(date, category, amount) {
        Ok(new_expense) => new_expense,
        Err(error) if error.is_validation() => {
            return Ok(Alert::error("Invalid expense", &error.to_string()));
        }
        Err(error) => return Err(error),
    };

    let expense = store.create_expense(&new_expense)?;
    tracing::info!("Added expense {}", expense.id);

    Ok(Alert::success(
        "Expense added successfully!",
        &format!("{} {} {}", expense.date, expense.category, expense.amount),
    ))
}

fn list_expenses(
    json: bool,
    store: &LedgerStore,
    out: &mut impl Write,
) -> Result<Option<Alert>, Error> {
    let expenses = store.list_expenses()?;

    if json {
        serde_json::to_writer_pretty(&mut *out, &expenses)
            .map_err(|error| Error::Output(error.to_string()))?;
        writeln!(out)?;
        return Ok(None);
    }

    if expenses.is_empty() {
        return Ok(Some(Alert::warning(NO_EXPENSES, "")));
    }

    write_expense_table(&expenses, out)?;
    Ok(None)
}

fn export(output: &Path, store: &LedgerStore) -> Result<Alert, Error> {
    let expenses = store.list_expenses_oldest_first()?;

    if expenses.is_empty() {
        return Ok(Alert::warning("No expenses to export!", ""));
    }

    export_expense_report(&expenses, output)?;

    Ok(Alert::success(
        "Expenses exported successfully!",
        &format!("{} expenses written to {}", expenses.len(), output.display()),
    ))
}
