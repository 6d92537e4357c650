//! Plain text tables for the terminal.

use std::{collections::BTreeMap, io::Write};

use crate::{
    Error,
    aggregation::MonthlyTotal,
    amount::Amount,
    category::Category,
    ledger::{Expense, Receipt},
};

/// Write expenses as a table with ID, date, category and amount columns.
pub fn write_expense_table(expenses: &[Expense], out: &mut impl Write) -> Result<(), Error> {
    writeln!(out, "{:>6}  {:<10}  {:<13}  {:>12}", "ID", "Date", "Category", "Amount")?;

    for expense in expenses {
        writeln!(
            out,
            "{:>6}  {:<10}  {:<13}  {:>12}",
            expense.id,
            expense.date.to_string(),
            expense.category.as_str(),
            expense.amount.to_string()
        )?;
    }

    Ok(())
}

/// Write the total and share of spending for each category.
pub fn write_category_sums(
    sums: &BTreeMap<Category, Amount>,
    out: &mut impl Write,
) -> Result<(), Error> {
    let grand_total: i128 = sums.values().map(|total| i128::from(total.cents())).sum();

    writeln!(out, "{:<13}  {:>12}  {:>6}", "Category", "Total", "Share")?;

    for (category, total) in sums {
        let share = if grand_total > 0 {
            total.cents() as f64 / grand_total as f64 * 100.0
        } else {
            0.0
        };

        writeln!(
            out,
            "{:<13}  {:>12}  {:>5.1}%",
            category.as_str(),
            total.to_string(),
            share
        )?;
    }

    Ok(())
}

/// Write the total for each month, oldest first.
pub fn write_monthly_sums(sums: &[MonthlyTotal], out: &mut impl Write) -> Result<(), Error> {
    writeln!(out, "{:<7}  {:>12}", "Month", "Total")?;

    for monthly_total in sums {
        writeln!(
            out,
            "{:<7}  {:>12}",
            monthly_total.month.to_string(),
            monthly_total.total.to_string()
        )?;
    }

    Ok(())
}

/// Write receipts next to the date, category and amount of their expense.
pub fn write_receipt_table(
    receipts: &[Receipt],
    expenses: &[Expense],
    out: &mut impl Write,
) -> Result<(), Error> {
    writeln!(
        out,
        "{:>6}  {:>7}  {:<10}  {:<13}  {:>12}  Image",
        "ID", "Expense", "Date", "Category", "Amount"
    )?;

    for receipt in receipts {
        let Some(expense) = expenses.iter().find(|expense| expense.id == receipt.expense_id)
        else {
            tracing::warn!("Receipt {} has no expense", receipt.id);
            continue;
        };

        writeln!(
            out,
            "{:>6}  {:>7}  {:<10}  {:<13}  {:>12}  {}",
            receipt.id,
            receipt.expense_id,
            expense.date.to_string(),
            expense.category.as_str(),
            expense.amount.to_string(),
            receipt.image_path.display()
        )?;
    }

    Ok(())
}
