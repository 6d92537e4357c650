//! Collects the category and date for an expense from the user.
//!
//! The coordinator owns validation and re-prompting; the [Prompt] it is
//! given only shows the request and returns what the user typed. Nothing is
//! written to the ledger here, so cancelling has no side effects.

use time::Date;

use crate::{Error, amount::Amount, category::Category, ledger::parse_date};

/// What the detail prompt shows the user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetailRequest<'a> {
    /// The amount the expense will be recorded with.
    pub amount: Amount,
    /// The pre-selected category.
    pub category: Category,
    /// The pre-filled date.
    pub date: Date,
    /// Why the previous response was rejected, if it was.
    pub problem: Option<&'a Error>,
}

/// What the user did with a [DetailRequest].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailResponse {
    /// The user submitted the form with these raw values.
    Submitted {
        /// The category as entered.
        category: String,
        /// The date as entered.
        date: String,
    },
    /// The user closed the form without submitting.
    Cancelled,
}

/// What the manual amount prompt shows the user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmountRequest<'a> {
    /// Why the amount is needed, e.g. because it could not be read from the receipt.
    pub reason: &'a str,
    /// Why the previous response was rejected, if it was.
    pub problem: Option<&'a Error>,
}

/// A blocking, interactive way to ask the user for input.
///
/// Each call suspends the caller until the user responds. Implementations
/// must not touch the ledger.
pub trait Prompt {
    /// Show the candidate amount and ask for a category and date.
    fn request_details(&mut self, request: &DetailRequest<'_>) -> Result<DetailResponse, Error>;

    /// Ask for an amount.
    ///
    /// Returns `None` if the user gave no amount.
    fn request_amount(&mut self, request: &AmountRequest<'_>) -> Result<Option<String>, Error>;
}

impl<P: Prompt + ?Sized> Prompt for &mut P {
    fn request_details(&mut self, request: &DetailRequest<'_>) -> Result<DetailResponse, Error> {
        (**self).request_details(request)
    }

    fn request_amount(&mut self, request: &AmountRequest<'_>) -> Result<Option<String>, Error> {
        (**self).request_amount(request)
    }
}

/// The validated category and date for an expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpenseDetails {
    /// What the money was spent on.
    pub category: Category,
    /// When the money was spent.
    pub date: Date,
}

/// The result of asking the user for details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collected<T> {
    /// The user submitted valid details.
    Details(T),
    /// The user cancelled.
    Cancelled,
}

/// Drives a [Prompt] until it yields valid input or the user gives up.
#[derive(Debug)]
pub struct DetailCoordinator<P> {
    prompt: P,
}

impl<P: Prompt> DetailCoordinator<P> {
    /// Create a coordinator that asks the user through `prompt`.
    pub fn new(prompt: P) -> Self {
        Self { prompt }
    }

    /// Get back the prompt.
    pub fn into_inner(self) -> P {
        self.prompt
    }

    /// Ask for the category and date of an expense of `amount`.
    ///
    /// The category defaults to [Category::Others] and the date to `today`.
    /// Invalid input is reported back to the user and asked for again, it
    /// does not end the flow.
    ///
    /// # Errors
    ///
    /// Only returns an error if the prompt itself fails.
    pub fn collect_details(
        &mut self,
        amount: Amount,
        today: Date,
    ) -> Result<Collected<ExpenseDetails>, Error> {
        let mut category = Category::default();
        let mut date = today;
        let mut problem = None;

        loop {
            let request = DetailRequest {
                amount,
                category,
                date,
                problem: problem.as_ref(),
            };

            let (raw_category, raw_date) = match self.prompt.request_details(&request)? {
                DetailResponse::Submitted { category, date } => (category, date),
                DetailResponse::Cancelled => {
                    tracing::info!("Expense details cancelled by user");
                    return Ok(Collected::Cancelled);
                }
            };

            let parsed_category = raw_category.parse::<Category>();
            let parsed_date = parse_date(&raw_date);

            if let Ok(valid) = &parsed_category {
                category = *valid;
            }
            if let Ok(valid) = &parsed_date {
                date = *valid;
            }

            match (parsed_category, parsed_date) {
                (Ok(category), Ok(date)) => {
                    return Ok(Collected::Details(ExpenseDetails { category, date }));
                }
                (Err(error), _) | (_, Err(error)) => {
                    tracing::debug!("Rejected expense details: {error}");
                    problem = Some(error);
                }
            }
        }
    }

    /// Ask the user to type in an amount, e.g. because it could not be read from a receipt.
    ///
    /// Non-numeric and non-positive amounts are asked for again.
    ///
    /// # Returns
    /// `None` if the user gave no amount.
    pub fn collect_amount(&mut self, reason: &str) -> Result<Option<Amount>, Error> {
        let mut problem = None;

        loop {
            let request = AmountRequest {
                reason,
                problem: problem.as_ref(),
            };

            let raw_amount = match self.prompt.request_amount(&request)? {
                Some(raw_amount) if !raw_amount.trim().is_empty() => raw_amount,
                _ => return Ok(None),
            };

            match raw_amount.parse::<Amount>() {
                Ok(amount) => return Ok(Some(amount)),
                Err(error) => {
                    tracing::debug!("Rejected manual amount: {error}");
                    problem = Some(error);
                }
            }
        }
    }
}
