//! Database queries for retrieving dashboard transaction data.
//!
//! Every dashboard computation depends on the category's type, title or icon,
//! so transactions are always loaded with their category joined on.

use rusqlite::{Connection, Row};
use rust_decimal::Decimal;
use serde::Serialize;
use time::Date;

use crate::{
    Error,
    category::{Category, map_category_row},
    dashboard::window::DateWindow,
    database_id::TransactionId,
    transaction::get_amount,
};

/// A transaction with its category attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardTransaction {
    pub id: TransactionId,
    pub amount: Decimal,
    pub date: Date,
    pub note: String,
    pub category: Category,
}

const SELECT_WITH_CATEGORY: &str = "SELECT
        t.id,
        t.amount,
        t.date,
        t.note,
        c.id,
        c.title,
        c.icon,
        c.type
    FROM \"transaction\" t
    INNER JOIN category c ON c.id = t.category_id";

/// Gets the transactions dated inside `window`, inclusive of both ends.
///
/// Results are ordered by date then ID so that grouping downstream is
/// deterministic.
///
/// # Errors
/// Returns [Error::SqlError] if the query cannot be prepared or executed.
pub(super) fn get_transactions_in_window(
    window: &DateWindow,
    connection: &Connection,
) -> Result<Vec<DashboardTransaction>, Error> {
    connection
        .prepare(&format!(
            "{SELECT_WITH_CATEGORY}
            WHERE t.date BETWEEN ?1 AND ?2
            ORDER BY t.date ASC, t.id ASC"
        ))?
        .query_map((window.start, window.end), map_row)?
        .collect::<Result<Vec<DashboardTransaction>, rusqlite::Error>>()
        .map_err(|error| error.into())
}

/// Gets the `limit` most recent transactions across all time, newest first.
///
/// Transactions on the same date are ordered by descending ID, i.e. the most
/// recently recorded first.
///
/// # Errors
/// Returns [Error::SqlError] if the query cannot be prepared or executed.
pub(super) fn get_recent_transactions(
    limit: u32,
    connection: &Connection,
) -> Result<Vec<DashboardTransaction>, Error> {
    connection
        .prepare(&format!(
            "{SELECT_WITH_CATEGORY}
            ORDER BY t.date DESC, t.id DESC
            LIMIT ?1"
        ))?
        .query_map((limit,), map_row)?
        .collect::<Result<Vec<DashboardTransaction>, rusqlite::Error>>()
        .map_err(|error| error.into())
}

fn map_row(row: &Row) -> Result<DashboardTransaction, rusqlite::Error> {
    Ok(DashboardTransaction {
        id: row.get(0)?,
        amount: get_amount(row, 1)?,
        date: row.get(2)?,
        note: row.get(3)?,
        category: map_category_row(row, 4)?,
    })
}
