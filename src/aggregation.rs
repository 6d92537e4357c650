//! Expense aggregation for reports.
//!
//! Totals are recomputed from the full list of expenses on every call, there
//! is no cached or incrementally maintained state.

use std::{
    collections::{BTreeMap, HashMap},
    fmt::Display,
};

use serde::Serialize;
use time::Date;

use crate::{amount::Amount, category::Category, ledger::Expense};

/// A calendar month, e.g. 2025-01.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct YearMonth {
    /// The calendar year.
    pub year: i32,
    /// The month of the year, 1 to 12.
    pub month: u8,
}

impl YearMonth {
    /// Create a year-month pair.
    pub fn new(year: i32, month: u8) -> Self {
        Self { year, month }
    }
}

impl From<Date> for YearMonth {
    fn from(date: Date) -> Self {
        Self::new(date.year(), date.month().into())
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// The total spent in one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyTotal {
    /// The month the expenses fall in.
    pub month: YearMonth,
    /// The sum of the expense amounts in `month`.
    pub total: Amount,
}

/// Sums expense amounts by category.
///
/// # Returns
/// One entry per category that has at least one expense. Categories without
/// expenses are absent rather than zero.
pub fn category_sums(expenses: &[Expense]) -> BTreeMap<Category, Amount> {
    let mut totals = BTreeMap::new();

    for expense in expenses {
        totals
            .entry(expense.category)
            .and_modify(|total| *total += expense.amount)
            .or_insert(expense.amount);
    }

    totals
}

/// Sums expense amounts by calendar month.
///
/// # Returns
/// Monthly totals in ascending month order, regardless of the order of `expenses`.
pub fn monthly_sums(expenses: &[Expense]) -> Vec<MonthlyTotal> {
    let mut totals: HashMap<YearMonth, Amount> = HashMap::new();

    for expense in expenses {
        totals
            .entry(expense.date.into())
            .and_modify(|total| *total += expense.amount)
            .or_insert(expense.amount);
    }

    let mut sorted: Vec<MonthlyTotal> = totals
        .into_iter()
        .map(|(month, total)| MonthlyTotal { month, total })
        .collect();
    sorted.sort_by_key(|monthly_total| monthly_total.month);

    sorted
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{
        aggregation::{MonthlyTotal, YearMonth, category_sums, monthly_sums},
        amount::Amount,
        category::Category,
        ledger::Expense,
    };

    fn create_test_expense(cents: i64, date: time::Date, category: Category) -> Expense {
        Expense {
            id: 0,
            date,
            category,
            amount: Amount::from_cents(cents).unwrap(),
        }
    }

    #[test]
    fn category_sums_only_lists_categories_with_expenses() {
        let expenses = vec![
            create_test_expense(1000, date!(2024 - 01 - 15), Category::Food),
            create_test_expense(550, date!(2024 - 01 - 20), Category::Transport),
            create_test_expense(245, date!(2024 - 02 - 10), Category::Food),
        ];

        let result = category_sums(&expenses);

        assert_eq!(result.len(), 2);
        assert_eq!(result[&Category::Food].cents(), 1245);
        assert_eq!(result[&Category::Transport].cents(), 550);
        assert!(!result.contains_key(&Category::Rent));
    }

    #[test]
    fn category_sums_handles_empty_input() {
        assert!(category_sums(&[]).is_empty());
    }

    #[test]
    fn monthly_sums_groups_by_calendar_month() {
        let expenses = vec![
            create_test_expense(100, date!(2024 - 03 - 31), Category::Food),
            create_test_expense(200, date!(2024 - 03 - 01), Category::Rent),
            create_test_expense(400, date!(2023 - 03 - 15), Category::Rent),
        ];

        let result = monthly_sums(&expenses);

        assert_eq!(
            result,
            vec![
                MonthlyTotal {
                    month: YearMonth::new(2023, 3),
                    total: Amount::from_cents(400).unwrap(),
                },
                MonthlyTotal {
                    month: YearMonth::new(2024, 3),
                    total: Amount::from_cents(300).unwrap(),
                },
            ]
        );
    }

    #[test]
    fn monthly_sums_is_ascending_for_any_input_order() {
        let expenses = vec![
            create_test_expense(1, date!(2024 - 11 - 02), Category::Food),
            create_test_expense(1, date!(2024 - 02 - 02), Category::Food),
            create_test_expense(1, date!(2025 - 01 - 02), Category::Food),
            create_test_expense(1, date!(2024 - 10 - 02), Category::Food),
        ];

        let months: Vec<String> = monthly_sums(&expenses)
            .into_iter()
            .map(|monthly_total| monthly_total.month.to_string())
            .collect();

        assert_eq!(months, vec!["2024-02", "2024-10", "2024-11", "2025-01"]);
    }

    #[test]
    fn monthly_sums_handles_empty_input() {
        assert!(monthly_sums(&[]).is_empty());
    }
}
