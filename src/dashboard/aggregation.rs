//! Aggregation passes that turn the week's transactions into dashboard figures.
//!
//! Each function is one explicit filter/map/fold over the transactions
//! fetched for the window. Transactions whose category type is neither
//! income nor expense are never counted.

use rust_decimal::Decimal;
use serde::Serialize;
use time::{Date, Month};

use crate::{
    Error,
    category::{CategoryId, CategoryType},
    dashboard::{transaction::DashboardTransaction, window::DateWindow},
};

/// The total spent in one category during the window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryExpense {
    pub category_id: CategoryId,
    /// The category's icon and title, e.g. "🛒 Groceries".
    pub label: String,
    pub amount: Decimal,
}

/// Income and expense totals for a single day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTotals {
    pub date: Date,
    /// The day formatted as "dd-Mon", e.g. "05-Jun".
    pub label: String,
    pub income: Decimal,
    pub expense: Decimal,
}

/// Sums the amounts of transactions whose category has exactly `category_type`.
///
/// # Errors
/// Returns [Error::AmountOverflow] if the sum does not fit in a [Decimal].
pub(super) fn sum_by_type<'a>(
    transactions: impl IntoIterator<Item = &'a DashboardTransaction>,
    category_type: &CategoryType,
) -> Result<Decimal, Error> {
    transactions
        .into_iter()
        .filter(|transaction| &transaction.category.category_type == category_type)
        .try_fold(Decimal::ZERO, |total, transaction| {
            total
                .checked_add(transaction.amount)
                .ok_or(Error::AmountOverflow)
        })
}

/// Groups expense transactions by category and sums each group.
///
/// The result is sorted by amount, largest first. Categories with equal
/// totals keep the order in which they first appear in `transactions`.
///
/// # Errors
/// Returns [Error::AmountOverflow] if a category's total does not fit in a [Decimal].
pub(super) fn group_expenses_by_category(
    transactions: &[DashboardTransaction],
) -> Result<Vec<CategoryExpense>, Error> {
    let mut groups: Vec<CategoryExpense> = Vec::new();

    for transaction in transactions
        .iter()
        .filter(|transaction| transaction.category.category_type == CategoryType::Expense)
    {
        match groups
            .iter_mut()
            .find(|group| group.category_id == transaction.category.id)
        {
            Some(group) => {
                group.amount = group
                    .amount
                    .checked_add(transaction.amount)
                    .ok_or(Error::AmountOverflow)?;
            }
            None => groups.push(CategoryExpense {
                category_id: transaction.category.id,
                label: transaction.category.label(),
                amount: transaction.amount,
            }),
        }
    }

    // `sort_by` is stable, so ties keep first-appearance order.
    groups.sort_by(|a, b| b.amount.cmp(&a.amount));
    Ok(groups)
}

/// Calculates income and expense totals for every day in `window`.
///
/// Always returns one entry per day in ascending order, with zero totals for
/// days without transactions.
///
/// # Errors
/// Returns [Error::AmountOverflow] if a day's total does not fit in a [Decimal].
pub(super) fn calculate_daily_totals(
    window: &DateWindow,
    transactions: &[DashboardTransaction],
) -> Result<Vec<DailyTotals>, Error> {
    window
        .days()
        .map(|day| -> Result<DailyTotals, Error> {
            let on_day = || {
                transactions
                    .iter()
                    .filter(move |transaction| transaction.date == day)
            };

            Ok(DailyTotals {
                date: day,
                label: format_day_label(day),
                income: sum_by_type(on_day(), &CategoryType::Income)?,
                expense: sum_by_type(on_day(), &CategoryType::Expense)?,
            })
        })
        .collect()
}

/// Formats a date as the two digit day and three-letter month, e.g. "05-Jun".
pub(super) fn format_day_label(date: Date) -> String {
    let month = match date.month() {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    };

    format!("{:02}-{month}", date.day())
}
