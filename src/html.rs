//! Shared page layout, style constants and currency formatting.

use maud::{DOCTYPE, Markup, PreEscaped, html};
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

/// The currency symbol prefixed to formatted amounts (South African rand).
pub const CURRENCY_SYMBOL: &str = "R";

// Table styles
pub const TABLE_HEADER_STYLE: &str = "text-xs text-gray-700 uppercase \
    bg-gray-50 dark:bg-gray-700 dark:text-gray-400";

pub const TABLE_ROW_STYLE: &str = "bg-white border-b dark:bg-gray-800 dark:border-gray-700";

pub const TABLE_CELL_STYLE: &str = "px-6 py-4";

// Card container
pub const CARD_STYLE: &str = "bg-white dark:bg-gray-800 border border-gray-200 \
    dark:border-gray-700 rounded-lg p-4 shadow-md";

// Page container
pub const PAGE_CONTAINER_STYLE: &str = "flex flex-col items-center px-2 lg:px-6 lg:py-8 \
    mx-auto max-w-screen-xl text-gray-900 dark:text-white";

/// Tailwind's browser build, which generates the styles for the utility classes used in the views.
const TAILWIND_SCRIPT_URL: &str = "https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4";

pub enum HeadElement {
    /// The file path or URL to a JavaScript script.
    ScriptLink(String),
    /// JavaScript source code.
    ScriptSource(PreEscaped<String>),
}

pub fn base(title: &str, head_elements: &[HeadElement], content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Weekly Dashboard" }
                link rel="icon" type="image/png" href="/static/favicon-32x32.png" sizes="32x32";
                script src=(TAILWIND_SCRIPT_URL) {}

                @for element in head_elements
                {
                    @match element
                    {
                        HeadElement::ScriptSource(text) => script { (text) }
                        HeadElement::ScriptLink(path) => script src=(path) {}
                    }
                }
            }

            body class="container max-w-full min-h-screen bg-gray-50 dark:bg-gray-900"
            {
                (content)
            }
        }
    }
}

pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    // Template adapted from https://flowbite.com/blocks/marketing/404/
    let content = html!(
        section class="bg-white dark:bg-gray-900"
        {
            div class="py-8 px-4 mx-auto max-w-screen-xl lg:py-16 lg:px-6"
            {
                div class="mx-auto max-w-screen-sm text-center"
                {
                    h1
                        class="mb-4 text-7xl tracking-tight font-extrabold
                            lg:text-9xl text-blue-600 dark:text-blue-500"
                    {
                        (header)
                    }

                    p
                        class="mb-4 text-3xl md:text-4xl tracking-tight
                            font-bold text-gray-900 dark:text-white"
                    {
                        (description)
                    }

                    p
                        class="mb-4 text-1xl md:text-2xl tracking-tight
                            text-gray-900 dark:text-white"
                    {
                        (fix)
                    }

                    a
                        href="/"
                        class="inline-flex text-white bg-blue-600
                            hover:bg-blue-800 focus:ring-4 focus:outline-hidden
                            focus:ring-blue-300 font-medium rounded text-sm px-5
                            py-2.5 text-center dark:focus:ring-blue-900 my-4"
                    {
                        "Back to Dashboard"
                    }
                }
            }
        }
    );

    base(title, &[], &content)
}

/// Format `amount` as currency with two decimal places, e.g. "R1,234.50".
///
/// Halves are rounded away from zero, the same as [format_currency_rounded].
pub fn format_currency(amount: Decimal) -> String {
    let amount = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    let whole = group_thousands(amount.abs().trunc());
    let cents = (amount.abs().fract() * Decimal::ONE_HUNDRED)
        .to_u32()
        .unwrap_or_default();

    format!("{sign}{CURRENCY_SYMBOL}{whole}.{cents:02}")
}

/// Format `amount` as currency rounded to whole units, e.g. "R1,235".
pub fn format_currency_rounded(amount: Decimal) -> String {
    let amount = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };

    format!("{sign}{CURRENCY_SYMBOL}{}", group_thousands(amount.abs()))
}

/// Writes the digits of a non-negative whole number with a comma between
/// every group of three, e.g. "1,234,567".
///
/// The digits come straight from the decimal, so large amounts keep every
/// digit instead of going through a float.
fn group_thousands(whole: Decimal) -> String {
    let digits = whole.normalize().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    grouped
}

/// Creates a span with `amount` rounded to the nearest whole number and a
/// tooltip (title) that shows `amount` rounded to two decimal places.
pub fn currency_rounded_with_tooltip(amount: Decimal) -> Markup {
    html!(
        span title=(format_currency(amount)) { (format_currency_rounded(amount)) }
    )
}
