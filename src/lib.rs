//! Receipt Ledger records expenses from photographed receipts.
//!
//! A receipt image is copied into a managed directory, its text is recognized
//! and the total is read from it. The user confirms the category and date, and
//! the expense and its receipt are written to SQLite together. The ledger can
//! then be listed, summarised by category or month, and exported as CSV.

#![warn(missing_docs)]

mod aggregation;
mod alert;
mod amount;
mod app;
mod category;
mod config;
mod database_id;
mod db;
mod details;
mod error;
mod export;
mod intake;
mod ledger;
mod parser;
mod receipt_storage;
mod recognizer;
mod report;
mod terminal;
mod timezone;

pub use aggregation::{MonthlyTotal, YearMonth, category_sums, monthly_sums};
pub use alert::{Alert, AlertType};
pub use amount::{Amount, MAX_CENTS};
pub use app::run;
pub use category::Category;
pub use config::{Args, Command, Config};
pub use database_id::{DatabaseId, ExpenseId, ReceiptId};
pub use db::initialize as initialize_db;
pub use details::{
    AmountRequest, Collected, DetailCoordinator, DetailRequest, DetailResponse, ExpenseDetails,
    Prompt,
};
pub use error::Error;
pub use export::{DEFAULT_REPORT_NAME, export_expense_report, write_expense_report};
pub use intake::{AmountSource, IntakeOutcome, MANUAL_AMOUNT_REASON, ReceiptIntake};
pub use ledger::{
    DATE_FORMAT, Expense, LedgerStore, NewExpense, Receipt, count_expenses, count_receipts,
    get_all_receipts, get_expense, get_expenses_newest_first, get_expenses_oldest_first,
    get_receipt_for_expense, insert_expense, insert_receipt, parse_date,
};
pub use parser::{AmountParser, Confusions, DEFAULT_CURRENCY_SYMBOLS, TOTAL_KEYWORD};
pub use receipt_storage::{IMAGE_EXTENSIONS, ReceiptStorage};
pub use recognizer::{TesseractRecognizer, TextRecognizer};
pub use report::{
    write_category_sums, write_expense_table, write_monthly_sums, write_receipt_table,
};
pub use terminal::{CANCEL_INPUT, TerminalPrompt};
pub use timezone::get_local_offset;
