//! Transactions: dated amounts of money earned or spent in a category.
//!
//! This module contains the `Transaction` model, the `TransactionBuilder`
//! used to create transactions, and the database functions for storing and
//! retrieving them. Transactions are only written by tooling (e.g. the
//! `create_test_db` binary); the web app reads them.

mod core;

pub use core::{
    Transaction, TransactionBuilder, count_transactions, create_transaction,
    create_transaction_table, get_amount, get_transaction,
};
