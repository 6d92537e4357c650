//! The ledger store: one SQLite connection that owns all expense and receipt data.

use std::{collections::BTreeMap, path::Path};

use rusqlite::Connection;

use crate::{
    Error,
    aggregation::{MonthlyTotal, category_sums, monthly_sums},
    amount::Amount,
    category::Category,
    database_id::ExpenseId,
    db::initialize,
    ledger::{
        Expense, NewExpense, Receipt, count_expenses, count_receipts, get_all_receipts,
        get_expense, get_expenses_newest_first, get_expenses_oldest_first, insert_expense,
        insert_receipt,
    },
};

/// Persists expenses and receipts and answers queries about them.
///
/// The store is opened once at startup and owned by the caller. All writes go
/// through `&self`/`&mut self` on a single connection, so there is never more
/// than one writer.
#[derive(Debug)]
pub struct LedgerStore {
    connection: Connection,
}

impl LedgerStore {
    /// Open (or create) the ledger database at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        tracing::debug!("Opening ledger database at {path:?}");
        Self::from_connection(Connection::open(path)?)
    }

    /// Open a ledger that only lives in memory.
    pub fn open_in_memory() -> Result<Self, Error> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(connection: Connection) -> Result<Self, Error> {
        connection.pragma_update(None, "foreign_keys", true)?;
        initialize(&connection)?;

        Ok(Self { connection })
    }

    /// Close the database connection.
    pub fn close(self) -> Result<(), Error> {
        self.connection
            .close()
            .map_err(|(_, error)| Error::from(error))
    }

    /// Write an expense without a receipt.
    pub fn create_expense(&self, expense: &NewExpense) -> Result<Expense, Error> {
        let expense = insert_expense(expense, &self.connection)?;
        tracing::info!("Created expense {}", expense.id);

        Ok(expense)
    }

    /// Write a receipt for an existing expense.
    ///
    /// # Errors
    ///
    /// Returns [Error::MissingExpense] if there is no expense with `expense_id`.
    pub fn create_receipt(
        &self,
        expense_id: ExpenseId,
        image_path: &Path,
    ) -> Result<Receipt, Error> {
        insert_receipt(expense_id, image_path, &self.connection)
    }

    /// Write an expense and its receipt as one unit.
    ///
    /// Either both rows are written or, if any step fails, neither is.
    pub fn create_expense_with_receipt(
        &mut self,
        expense: &NewExpense,
        image_path: &Path,
    ) -> Result<(Expense, Receipt), Error> {
        let transaction = self.connection.transaction()?;

        let expense = insert_expense(expense, &transaction)?;
        let receipt = insert_receipt(expense.id, image_path, &transaction)?;

        transaction.commit()?;
        tracing::info!(
            "Created expense {} with receipt {} ({:?})",
            expense.id,
            receipt.id,
            receipt.image_path
        );

        Ok((expense, receipt))
    }

    /// Retrieve a single expense by ID.
    pub fn get_expense(&self, expense_id: ExpenseId) -> Result<Expense, Error> {
        get_expense(expense_id, &self.connection)
    }

    /// All expenses, most recent date first.
    pub fn list_expenses(&self) -> Result<Vec<Expense>, Error> {
        get_expenses_newest_first(&self.connection)
    }

    /// All expenses, oldest date first.
    pub fn list_expenses_oldest_first(&self) -> Result<Vec<Expense>, Error> {
        get_expenses_oldest_first(&self.connection)
    }

    /// All receipts in the order they were created.
    pub fn list_receipts(&self) -> Result<Vec<Receipt>, Error> {
        get_all_receipts(&self.connection)
    }

    /// The number of expenses in the ledger.
    pub fn count_expenses(&self) -> Result<u32, Error> {
        count_expenses(&self.connection)
    }

    /// The number of receipts in the ledger.
    pub fn count_receipts(&self) -> Result<u32, Error> {
        count_receipts(&self.connection)
    }

    /// The total spent per category, for categories with at least one expense.
    pub fn category_sums(&self) -> Result<BTreeMap<Category, Amount>, Error> {
        Ok(category_sums(&self.list_expenses()?))
    }

    /// The total spent per calendar month, oldest month first.
    pub fn monthly_sums(&self) -> Result<Vec<MonthlyTotal>, Error> {
        Ok(monthly_sums(&self.list_expenses()?))
    }
}
