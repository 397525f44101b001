//! Assembles everything the dashboard displays for a given day.

use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;
use time::Date;

use crate::{
    Error,
    category::CategoryType,
    dashboard::{
        aggregation::{
            CategoryExpense, DailyTotals, calculate_daily_totals, group_expenses_by_category,
            sum_by_type,
        },
        transaction::{DashboardTransaction, get_recent_transactions, get_transactions_in_window},
        window::DateWindow,
    },
};

/// How many transactions are shown in the recent transactions list.
pub(super) const RECENT_TRANSACTION_COUNT: u32 = 5;

/// The figures shown on the dashboard for the trailing week.
///
/// Amounts are raw decimals, formatting is left to the views.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardViewModel {
    pub window: DateWindow,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    /// Income minus expense, may be negative.
    pub balance: Decimal,
    pub expense_by_category: Vec<CategoryExpense>,
    pub daily_series: Vec<DailyTotals>,
    /// The latest transactions across all time, not just the window.
    pub recent_transactions: Vec<DashboardTransaction>,
    /// The number of transactions dated inside the window.
    pub window_transaction_count: usize,
}

impl DashboardViewModel {
    /// Whether nothing was recorded during the window.
    pub fn is_window_empty(&self) -> bool {
        self.window_transaction_count == 0
    }
}

/// Computes the dashboard for the week ending on `today`.
///
/// Both queries run on the same connection, so callers holding the database
/// lock get a consistent snapshot.
///
/// # Errors
/// Returns [Error::SqlError] if either query fails, or [Error::AmountOverflow]
/// if a total does not fit in a [Decimal].
pub fn compute_dashboard(
    today: Date,
    connection: &Connection,
) -> Result<DashboardViewModel, Error> {
    let window = DateWindow::trailing_week(today);

    let window_transactions = get_transactions_in_window(&window, connection).inspect_err(
        |error| tracing::error!("Could not get transactions for {window}: {error}"),
    )?;
    let recent_transactions = get_recent_transactions(RECENT_TRANSACTION_COUNT, connection)
        .inspect_err(|error| tracing::error!("Could not get recent transactions: {error}"))?;

    build_view_model(window, &window_transactions, recent_transactions).inspect_err(|error| {
        tracing::error!("Could not total the transactions for {window}: {error}")
    })
}

fn build_view_model(
    window: DateWindow,
    window_transactions: &[DashboardTransaction],
    recent_transactions: Vec<DashboardTransaction>,
) -> Result<DashboardViewModel, Error> {
    let total_income = sum_by_type(window_transactions, &CategoryType::Income)?;
    let total_expense = sum_by_type(window_transactions, &CategoryType::Expense)?;
    let balance = total_income
        .checked_sub(total_expense)
        .ok_or(Error::AmountOverflow)?;

    Ok(DashboardViewModel {
        window,
        total_income,
        total_expense,
        balance,
        expense_by_category: group_expenses_by_category(window_transactions)?,
        daily_series: calculate_daily_totals(&window, window_transactions)?,
        recent_transactions,
        window_transaction_count: window_transactions.len(),
    })
}
