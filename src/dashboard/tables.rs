//! Table views for dashboard data display.
//!
//! Provides the recent transactions table.

use maud::{Markup, html};

use crate::{
    category::CategoryType,
    dashboard::{transaction::DashboardTransaction, window::DateWindow},
    html::{TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency},
};

const TABLE_CELL_GREEN_STYLE: &str = "text-green-600 dark:text-green-400";
const TABLE_CELL_RED_STYLE: &str = "text-red-600 dark:text-red-400";
const OUTSIDE_WINDOW_ROW_STYLE: &str = "opacity-60";
const LABEL_CELL_STYLE: &str = "font-medium text-gray-900 dark:text-white";
const NOTE_STYLE: &str = "text-xs font-normal text-gray-500 dark:text-gray-400";
const AMOUNT_CELL_STYLE: &str = "text-right whitespace-nowrap";

/// Formats the amount with a sign for its category type.
///
/// Income is shown with a "+" and expenses with a "-". Transactions with an
/// unrecognised category type are shown unsigned.
fn signed_amount(transaction: &DashboardTransaction) -> (String, &'static str) {
    let amount = format_currency(transaction.amount);

    match transaction.category.category_type {
        CategoryType::Income => (format!("+{amount}"), TABLE_CELL_GREEN_STYLE),
        CategoryType::Expense => (format!("-{amount}"), TABLE_CELL_RED_STYLE),
        CategoryType::Unrecognised(_) => (amount, ""),
    }
}

/// Renders the most recent transactions, newest first.
///
/// Rows dated before `window` are dimmed since they do not count towards
/// the week's totals.
pub(super) fn recent_transactions_table(
    transactions: &[DashboardTransaction],
    window: &DateWindow,
) -> Markup {
    let label_cell_style = format!("{TABLE_CELL_STYLE} {LABEL_CELL_STYLE}");
    let amount_cell_style = format!("{TABLE_CELL_STYLE} {AMOUNT_CELL_STYLE}");

    html! {
        section id="recent-transactions" class="w-full mx-auto mb-8" {
            h3 class="text-xl font-semibold mb-4" { "Recent Transactions" }

            @if transactions.is_empty() {
                p class="text-gray-600 dark:text-gray-400" { "No transactions recorded yet." }
            } @else {
                div class="overflow-x-auto rounded-lg shadow" {
                    table class="w-full text-sm text-left text-gray-500 dark:text-gray-400" {
                        thead class=(TABLE_HEADER_STYLE) {
                            tr {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                                th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Amount" }
                            }
                        }
                        tbody {
                            @for transaction in transactions {
                                @let (amount, amount_style) = signed_amount(transaction);
                                @let row_style = if window.contains(transaction.date) {
                                    TABLE_ROW_STYLE.to_owned()
                                } else {
                                    format!("{TABLE_ROW_STYLE} {OUTSIDE_WINDOW_ROW_STYLE}")
                                };

                                tr class=(row_style) data-transaction-id=(transaction.id) {
                                    th scope="row" class=(label_cell_style) {
                                        (transaction.category.label())
                                        @if !transaction.note.is_empty() {
                                            p class=(NOTE_STYLE) { (transaction.note) }
                                        }
                                    }
                                    td class=(TABLE_CELL_STYLE) {
                                        time datetime=(transaction.date) { (transaction.date) }
                                    }
                                    td class={(amount_cell_style) " " (amount_style)} {
                                        (amount)
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
