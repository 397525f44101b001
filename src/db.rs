//! Creates the application's database schema.

use rusqlite::{Connection, Transaction as SqlTransaction};

use crate::{Error, category::create_category_table, transaction::create_transaction_table};

/// Create the tables for the domain models if they do not already exist.
///
/// Foreign key enforcement is switched on for `connection` so that a
/// transaction cannot reference a missing category.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    // This pragma is a no-op inside a transaction, so it must come first.
    connection.pragma_update(None, "foreign_keys", "ON")?;

    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_category_table(&transaction)?;
    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
