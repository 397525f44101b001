use rusqlite::Connection;
use rust_decimal::Decimal;
use time::Date;

use crate::{
    category::{Category, CategoryTitle, CategoryType, create_category},
    db::initialize,
    transaction::{Transaction, create_transaction},
};

/// An in-memory database with the application schema.
pub(crate) fn get_test_connection() -> Connection {
    let connection = Connection::open_in_memory().expect("Could not open in-memory database");
    initialize(&connection).expect("Could not initialize database");
    connection
}

#[track_caller]
pub(crate) fn insert_category(
    title: &str,
    icon: &str,
    category_type: CategoryType,
    connection: &Connection,
) -> Category {
    create_category(
        CategoryTitle::new_unchecked(title),
        icon,
        category_type,
        connection,
    )
    .expect("Could not create test category")
}

#[track_caller]
pub(crate) fn insert_transaction(
    amount: i64,
    date: Date,
    category: &Category,
    connection: &Connection,
) -> Transaction {
    create_transaction(
        Transaction::build(Decimal::from(amount), date, category.id),
        connection,
    )
    .expect("Could not create test transaction")
}
