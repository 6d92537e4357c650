//! Defines the app level error type and conversions from the database layer.

use crate::database_id::ExpenseId;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The user did not select a receipt image.
    #[error("no receipt image was selected")]
    NoImageSelected,

    /// The selected file is not a PNG or JPEG image.
    ///
    /// Callers should pass in the offending file name.
    #[error("\"{0}\" is not a supported image, expected a .png, .jpg or .jpeg file")]
    UnsupportedImageType(String),

    /// The receipt image could not be copied into the receipts directory.
    #[error("could not copy the receipt image: {0}")]
    ImageCopy(String),

    /// The text recognizer failed to produce any text.
    ///
    /// The intake flow treats this the same as an amount that could not be
    /// found in the text.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// An empty string was used as a category.
    #[error("a category must be selected")]
    EmptyCategory,

    /// The category is not one of the known categories.
    #[error("\"{0}\" is not a valid category")]
    InvalidCategory(String),

    /// The amount could not be parsed as a number with at most two decimal places.
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    /// A zero or negative amount was used to create an expense.
    #[error("the amount must be greater than zero")]
    NonPositiveAmount,

    /// The date could not be parsed as a `YYYY-MM-DD` calendar date.
    #[error("\"{0}\" is not a valid date, expected YYYY-MM-DD")]
    InvalidDate(String),

    /// A receipt referred to an expense that is not in the database.
    #[error("there is no expense with the ID {0}")]
    MissingExpense(ExpenseId),

    /// The expense already has a receipt.
    ///
    /// A receipt is created together with its expense and is never reattached.
    #[error("the expense with the ID {0} already has a receipt")]
    DuplicateReceipt(ExpenseId),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Reading from or writing to the terminal failed.
    #[error("could not read the response: {0}")]
    Prompt(String),

    /// Output for the user could not be written.
    #[error("could not write output: {0}")]
    Output(String),

    /// The expense report could not be written.
    #[error("could not export expenses: {0}")]
    Export(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl Error {
    /// Whether the error was caused by invalid user input.
    ///
    /// Validation errors are recoverable by asking the user again.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::EmptyCategory
                | Error::InvalidCategory(_)
                | Error::InvalidAmount(_)
                | Error::NonPositiveAmount
                | Error::InvalidDate(_)
        )
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::Output(value.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        Error::Export(value.to_string())
    }
}
