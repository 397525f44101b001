//! Summary cards for the week's income, expense and balance.

use maud::{Markup, html};
use rust_decimal::Decimal;

use crate::html::{CARD_STYLE, currency_rounded_with_tooltip};

const GREEN_TEXT_STYLE: &str = "text-green-600 dark:text-green-400";
const RED_TEXT_STYLE: &str = "text-red-600 dark:text-red-400";

/// Renders the three summary cards in a row.
pub(super) fn summary_cards_view(
    total_income: Decimal,
    total_expense: Decimal,
    balance: Decimal,
) -> Markup {
    let balance_style = if balance.is_sign_negative() && !balance.is_zero() {
        RED_TEXT_STYLE
    } else {
        GREEN_TEXT_STYLE
    };

    html! {
        section id="summary" class="w-full mx-auto mb-8" {
            div class="grid grid-cols-1 md:grid-cols-3 gap-4" {
                (summary_card("total-income", "Total Income", total_income, GREEN_TEXT_STYLE))
                (summary_card("total-expense", "Total Expense", total_expense, RED_TEXT_STYLE))
                (summary_card("balance", "Balance", balance, balance_style))
            }
        }
    }
}

fn summary_card(id: &str, title: &str, amount: Decimal, amount_style: &str) -> Markup {
    html! {
        div id=(id) class=(CARD_STYLE) {
            h3 class="text-sm font-medium text-gray-600 dark:text-gray-400 mb-2" {
                (title)
            }
            p class={"text-3xl font-bold " (amount_style)} {
                (currency_rounded_with_tooltip(amount))
            }
            p class="text-xs text-gray-500 dark:text-gray-400 mt-1" { "Last 7 days" }
        }
    }
}
