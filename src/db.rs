//! Creates the application's database schema.

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::ledger::{create_expense_table, create_receipt_table};

/// Create the expense and receipt tables if they do not exist yet.
///
/// The tables are created in one exclusive transaction so a half-initialized
/// database is never observed.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    let transaction = Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_expense_table(&transaction)?;
    create_receipt_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
