//! Defines the receipt model and its database queries.

use std::path::{Path, PathBuf};

use rusqlite::{Connection, Row};
use serde::Serialize;

use crate::{
    Error,
    database_id::{ExpenseId, ReceiptId},
};

/// Evidence for an expense: a receipt image in the managed receipts directory.
///
/// Each receipt belongs to exactly one expense and is written in the same
/// database transaction as that expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    /// The ID assigned by the database.
    pub id: ReceiptId,
    /// The expense this receipt substantiates.
    pub expense_id: ExpenseId,
    /// Where the receipt image is stored.
    pub image_path: PathBuf,
}

/// Create a receipt for an existing expense and return it with its generated ID.
///
/// # Errors
/// This function will return a:
/// - [Error::MissingExpense] if `expense_id` does not refer to an expense,
/// - or [Error::DuplicateReceipt] if the expense already has a receipt,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn insert_receipt(
    expense_id: ExpenseId,
    image_path: &Path,
    connection: &Connection,
) -> Result<Receipt, Error> {
    let receipt = connection
        .prepare(
            "INSERT INTO receipts (expense_id, image_path)
             VALUES (?1, ?2)
             RETURNING id, expense_id, image_path",
        )?
        .query_row(
            (expense_id, image_path.to_string_lossy().into_owned()),
            map_receipt_row,
        )
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
                },
                _,
            ) => Error::MissingExpense(expense_id),
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE,
                },
                _,
            ) => Error::DuplicateReceipt(expense_id),
            error => error.into(),
        })?;

    Ok(receipt)
}

/// Retrieve the receipt for an expense.
pub fn get_receipt_for_expense(
    expense_id: ExpenseId,
    connection: &Connection,
) -> Result<Receipt, Error> {
    connection
        .prepare("SELECT id, expense_id, image_path FROM receipts WHERE expense_id = :id;")?
        .query_row(&[(":id", &expense_id)], map_receipt_row)
        .map_err(|error| error.into())
}

/// Retrieve all receipts in the order they were created.
pub fn get_all_receipts(connection: &Connection) -> Result<Vec<Receipt>, Error> {
    connection
        .prepare("SELECT id, expense_id, image_path FROM receipts ORDER BY id ASC;")?
        .query_map([], map_receipt_row)?
        .map(|maybe_receipt| maybe_receipt.map_err(|error| error.into()))
        .collect()
}

/// Get the number of receipts in the database.
pub fn count_receipts(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM receipts;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Initialize the receipt table.
///
/// The expense table must be created first.
pub fn create_receipt_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS receipts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            expense_id INTEGER NOT NULL UNIQUE,
            image_path TEXT NOT NULL CHECK (image_path <> ''),
            FOREIGN KEY(expense_id) REFERENCES expenses(id)
        )",
        (),
    )?;

    Ok(())
}

fn map_receipt_row(row: &Row) -> Result<Receipt, rusqlite::Error> {
    let id = row.get(0)?;
    let expense_id = row.get(1)?;
    let raw_path: String = row.get(2)?;

    Ok(Receipt {
        id,
        expense_id,
        image_path: PathBuf::from(raw_path),
    })
}

#[cfg(test)]
mod receipt_query_tests {
    use std::path::{Path, PathBuf};

    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        amount::Amount,
        category::Category,
        db::initialize,
        ledger::{
            NewExpense, count_receipts, get_all_receipts, get_receipt_for_expense,
            insert_expense, insert_receipt,
        },
    };

    fn get_test_db_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        connection.pragma_update(None, "foreign_keys", true).unwrap();
        initialize(&connection).expect("Could not initialize database");
        connection
    }

    fn create_test_expense(connection: &Connection) -> crate::ledger::Expense {
        insert_expense(
            &NewExpense {
                date: date!(2025 - 04 - 01),
                category: Category::Transport,
                amount: Amount::from_cents(250).unwrap(),
            },
            connection,
        )
        .expect("Could not create test expense")
    }

    #[test]
    fn insert_receipt_succeeds() {
        let connection = get_test_db_connection();
        let expense = create_test_expense(&connection);

        let receipt = insert_receipt(expense.id, Path::new("receipts/bus.png"), &connection)
            .expect("Could not create receipt");

        assert!(receipt.id > 0);
        assert_eq!(receipt.expense_id, expense.id);
        assert_eq!(receipt.image_path, PathBuf::from("receipts/bus.png"));
        assert_eq!(get_receipt_for_expense(expense.id, &connection), Ok(receipt));
    }

    #[test]
    fn insert_receipt_with_missing_expense_fails() {
        let connection = get_test_db_connection();

        let result = insert_receipt(42, Path::new("receipts/bus.png"), &connection);

        assert_eq!(result, Err(Error::MissingExpense(42)));
        assert_eq!(count_receipts(&connection), Ok(0));
    }

    #[test]
    fn second_receipt_for_an_expense_is_rejected() {
        let connection = get_test_db_connection();
        let expense = create_test_expense(&connection);
        insert_receipt(expense.id, Path::new("receipts/a.png"), &connection).unwrap();

        let result = insert_receipt(expense.id, Path::new("receipts/b.png"), &connection);

        assert_eq!(result, Err(Error::DuplicateReceipt(expense.id)));
        assert_eq!(get_all_receipts(&connection).unwrap().len(), 1);
    }

    #[test]
    fn get_receipt_for_expense_without_receipt_returns_not_found() {
        let connection = get_test_db_connection();
        let expense = create_test_expense(&connection);

        assert_eq!(
            get_receipt_for_expense(expense.id, &connection),
            Err(Error::NotFound)
        );
    }
}
