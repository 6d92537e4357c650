//! Defines the expense model and its database queries.

use rusqlite::{Connection, Row};
use serde::Serialize;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{Error, amount::Amount, category::Category, database_id::ExpenseId};

/// The date format used for user input and reports, e.g. "2025-01-15".
pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Parse a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns [Error::InvalidDate] if `text` is not a valid calendar date.
pub fn parse_date(text: &str) -> Result<Date, Error> {
    let text = text.trim();
    Date::parse(text, DATE_FORMAT).map_err(|_| Error::InvalidDate(text.to_owned()))
}

/// A single spending event.
///
/// Expenses are append-only: once written they are never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Expense {
    /// The ID assigned by the database.
    pub id: ExpenseId,
    /// When the money was spent.
    pub date: Date,
    /// What the money was spent on.
    pub category: Category,
    /// How much was spent.
    pub amount: Amount,
}

/// The validated fields of an expense that has not been written yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewExpense {
    /// When the money was spent.
    pub date: Date,
    /// What the money was spent on.
    pub category: Category,
    /// How much was spent.
    pub amount: Amount,
}

impl NewExpense {
    /// Validate raw user input for an expense.
    ///
    /// All three fields are required.
    ///
    /// # Errors
    ///
    /// Returns the first validation error found, checking the date, then the
    /// category, then the amount.
    pub fn parse(date: &str, category: &str, amount: &str) -> Result<Self, Error> {
        Ok(Self {
            date: parse_date(date)?,
            category: category.parse()?,
            amount: amount.parse()?,
        })
    }
}

/// Create an expense and return it with its generated ID.
pub fn insert_expense(expense: &NewExpense, connection: &Connection) -> Result<Expense, Error> {
    let expense = connection
        .prepare(
            "INSERT INTO expenses (date, category, amount)
             VALUES (?1, ?2, ?3)
             RETURNING id, date, category, amount",
        )?
        .query_row(
            (expense.date, expense.category, expense.amount),
            map_expense_row,
        )?;

    Ok(expense)
}

/// Retrieve a single expense by ID.
pub fn get_expense(expense_id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    connection
        .prepare("SELECT id, date, category, amount FROM expenses WHERE id = :id;")?
        .query_row(&[(":id", &expense_id)], map_expense_row)
        .map_err(|error| error.into())
}

/// Retrieve all expenses, most recent first.
///
/// Expenses on the same date are ordered most recently inserted first.
pub fn get_expenses_newest_first(connection: &Connection) -> Result<Vec<Expense>, Error> {
    query_expenses(
        "SELECT id, date, category, amount FROM expenses ORDER BY date DESC, id DESC;",
        connection,
    )
}

/// Retrieve all expenses, oldest first.
pub fn get_expenses_oldest_first(connection: &Connection) -> Result<Vec<Expense>, Error> {
    query_expenses(
        "SELECT id, date, category, amount FROM expenses ORDER BY date ASC, id ASC;",
        connection,
    )
}

/// Get the number of expenses in the database.
pub fn count_expenses(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM expenses;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

fn query_expenses(query: &str, connection: &Connection) -> Result<Vec<Expense>, Error> {
    connection
        .prepare(query)?
        .query_map([], map_expense_row)?
        .map(|maybe_expense| maybe_expense.map_err(|error| error.into()))
        .collect()
}

/// Initialize the expense table and indexes.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS expenses (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL,
            category TEXT NOT NULL CHECK (category IN (
                'Food', 'Transport', 'Rent', 'Entertainment', 'Utilities', 'Healthcare', 'Others'
            )),
            amount INTEGER NOT NULL CHECK (amount > 0 AND amount <= 9999999999)
        );

        CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses(date);",
    )?;

    Ok(())
}

/// Map a database row to an [Expense].
fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    Ok(Expense {
        id: row.get(0)?,
        date: row.get(1)?,
        category: row.get(2)?,
        amount: row.get(3)?,
    })
}
