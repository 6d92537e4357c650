//! The ledger of expenses and the receipts that substantiate them.
//!
//! This module contains:
//! - The `Expense` and `Receipt` models
//! - Database functions for creating and querying both tables
//! - `LedgerStore`, which owns the connection and writes an expense together
//!   with its receipt in one transaction

mod expense;
mod receipt;
mod store;

pub use expense::{
    DATE_FORMAT, Expense, NewExpense, count_expenses, create_expense_table, get_expense,
    get_expenses_newest_first, get_expenses_oldest_first, insert_expense, parse_date,
};
pub use receipt::{
    Receipt, count_receipts, create_receipt_table, get_all_receipts, get_receipt_for_expense,
    insert_receipt,
};
pub use store::LedgerStore;
