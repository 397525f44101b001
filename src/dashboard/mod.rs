//! Dashboard module
//!
//! Provides an overview page summarising the last seven days: income and
//! expense totals, expenses by category, a daily income/expense chart and
//! the most recent transactions.

mod aggregation;
mod cards;
mod charts;
mod handlers;
mod tables;
mod transaction;
mod view_model;
mod window;

pub use handlers::{get_dashboard_data, get_dashboard_page};
