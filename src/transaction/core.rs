//! Defines the core data model and database queries for transactions.

use std::str::FromStr;

use rusqlite::{Connection, Row, types::Type};
use rust_decimal::Decimal;
use serde::Serialize;
use time::Date;

use crate::{
    Error,
    category::CategoryId,
    database_id::{DatabaseId, TransactionId},
};

// ============================================================================
// MODELS
// ============================================================================

/// A single dated monetary movement belonging to one category.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: DatabaseId,
    /// The amount of money spent or earned in this transaction.
    ///
    /// Amounts are non-negative by convention, the category decides whether
    /// the money was earned or spent.
    pub amount: Decimal,
    /// When the transaction happened.
    pub date: Date,
    /// The ID of the category the transaction belongs to.
    pub category_id: CategoryId,
    /// An optional free text note.
    pub note: String,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(amount: Decimal, date: Date, category_id: CategoryId) -> TransactionBuilder {
        TransactionBuilder {
            amount,
            date,
            category_id,
            note: String::new(),
        }
    }
}

/// A builder for creating [Transaction] instances.
///
/// # Examples
///
/// ```ignore
/// use rust_decimal::Decimal;
/// use time::macros::date;
///
/// let builder = Transaction::build(Decimal::new(4599, 2), date!(2025 - 01 - 15), groceries.id)
///     .note("Weekly shop");
/// let transaction = create_transaction(builder, &connection)?;
/// ```
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// The monetary amount of the transaction.
    pub amount: Decimal,
    /// The date when the transaction occurred.
    pub date: Date,
    /// The category of the transaction, e.g. "Groceries", "Salary".
    pub category_id: CategoryId,
    /// A free text note, empty by default.
    pub note: String,
}

impl TransactionBuilder {
    /// Set the note for the transaction.
    pub fn note(mut self, note: &str) -> Self {
        self.note = note.to_owned();
        self
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new transaction in the database from a builder.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidCategory] if the category ID does not refer to a real category,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    builder: TransactionBuilder,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (amount, date, category_id, note)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id, amount, date, category_id, note",
        )?
        .query_row(
            (
                builder.amount.to_string(),
                builder.date,
                builder.category_id,
                builder.note,
            ),
            |row| map_transaction_row(row, 0),
        )
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
                },
                _,
            ) => Error::InvalidCategory(builder.category_id),
            error => error.into(),
        })?;

    Ok(transaction)
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "SELECT id, amount, date, category_id, note FROM \"transaction\" WHERE id = :id",
        )?
        .query_row(&[(":id", &id)], |row| map_transaction_row(row, 0))?;

    Ok(transaction)
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// Amounts are stored as decimal strings so that sums stay exact.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount TEXT NOT NULL,
                date TEXT NOT NULL,
                category_id INTEGER NOT NULL,
                note TEXT NOT NULL DEFAULT '',
                FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE ON DELETE CASCADE
                )",
        (),
    )?;

    // Both dashboard queries filter or sort on the date.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_date ON \"transaction\"(date);",
        (),
    )?;

    Ok(())
}

/// Map the columns `id, amount, date, category_id, note` starting at
/// `offset` to a [Transaction].
pub fn map_transaction_row(row: &Row, offset: usize) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(offset)?;
    let amount = get_amount(row, offset + 1)?;
    let date = row.get(offset + 2)?;
    let category_id = row.get(offset + 3)?;
    let note = row.get(offset + 4)?;

    Ok(Transaction {
        id,
        amount,
        date,
        category_id,
        note,
    })
}

/// Read the decimal amount stored as text in column `index`.
pub fn get_amount(row: &Row, index: usize) -> Result<Decimal, rusqlite::Error> {
    let raw_amount: String = row.get(index)?;

    Decimal::from_str(&raw_amount).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(error))
    })
}

// ============================================================================
// TESTS
// ============================================================================
