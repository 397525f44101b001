//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - The route handler for the dashboard page and its JSON counterpart
//! - HTML view functions for rendering the dashboard UI
//! - The state type used by the handlers

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde_json::json;

use crate::{
    AppState, Error,
    dashboard::{
        cards::summary_cards_view,
        charts::{
            DashboardChart, charts_script, charts_view, expense_by_category_chart,
            income_vs_expense_chart,
        },
        tables::recent_transactions_table,
        view_model::{DashboardViewModel, compute_dashboard},
    },
    endpoints,
    html::{HeadElement, PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    timezone::today_in,
};

const ECHARTS_SCRIPT_URL: &str = "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

/// The state needed for displaying the dashboard page.
///
/// Contains the database connection and timezone information required
/// by dashboard handlers.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Africa/Johannesburg".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Display a page with an overview of the last seven days.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Result<Response, Error> {
    let dashboard = load_dashboard(&state)?;
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW);

    Ok(dashboard_view(nav_bar, &dashboard).into_response())
}

/// The dashboard figures as JSON.
///
/// Failures are logged and answered with a generic 500 JSON body.
pub async fn get_dashboard_data(State(state): State<DashboardState>) -> Response {
    match load_dashboard(&state) {
        Ok(dashboard) => Json(dashboard).into_response(),
        Err(error) => {
            tracing::error!("Could not get dashboard data: {error}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Could not load the dashboard, check the server logs" })),
            )
                .into_response()
        }
    }
}

/// Computes the dashboard for today in the configured timezone.
///
/// # Errors
/// Returns an error if the timezone is invalid, the database lock is poisoned
/// or a query fails.
fn load_dashboard(state: &DashboardState) -> Result<DashboardViewModel, Error> {
    let today = today_in(&state.local_timezone)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    compute_dashboard(today, &connection)
}

/// Creates the dashboard charts from the week's figures.
///
/// The chart options are serialized to JSON for ECharts consumption.
fn build_dashboard_charts(dashboard: &DashboardViewModel) -> [DashboardChart; 2] {
    [
        DashboardChart {
            id: "expense-by-category-chart",
            options: expense_by_category_chart(&dashboard.expense_by_category).to_string(),
        },
        DashboardChart {
            id: "income-vs-expense-chart",
            options: income_vs_expense_chart(&dashboard.daily_series).to_string(),
        },
    ]
}

/// Shown in place of the charts when nothing was recorded during the week.
fn empty_window_hint() -> Markup {
    html!(
        div
            id="empty-window-hint"
            class="w-full mb-8 p-4 text-center rounded-lg bg-gray-100 dark:bg-gray-800"
        {
            h2 class="text-xl font-bold" { "Nothing here yet..." }
            p class="text-gray-600 dark:text-gray-400" {
                "No transactions were recorded in the last 7 days. Charts will show up
                here once there is activity this week."
            }
        }
    )
}

/// Renders the dashboard page with the summary cards, charts and recent transactions.
fn dashboard_view(nav_bar: NavBar, dashboard: &DashboardViewModel) -> Markup {
    let nav_bar = nav_bar.into_html();
    let charts = build_dashboard_charts(dashboard);

    let content = html!(
        (nav_bar)

        div id="dashboard-content" class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full flex justify-between items-baseline mb-4"
            {
                h2 class="text-2xl font-bold" { "This Week" }
                span class="text-sm text-gray-600 dark:text-gray-400"
                {
                    (dashboard.window.start) " to " (dashboard.window.end)
                }
            }

            (summary_cards_view(dashboard.total_income, dashboard.total_expense, dashboard.balance))

            @if dashboard.is_window_empty() {
                (empty_window_hint())
            } @else {
                (charts_view(&charts))
            }

            (recent_transactions_table(&dashboard.recent_transactions, &dashboard.window))
        }
    );

    let scripts = if dashboard.is_window_empty() {
        Vec::new()
    } else {
        vec![
            HeadElement::ScriptLink(ECHARTS_SCRIPT_URL.to_owned()),
            charts_script(&charts),
        ]
    };

    base("Dashboard", &scripts, &content)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode};
    use rusqlite::Connection;
    use rust_decimal::Decimal;
    use scraper::{Html, Selector};
    use serde_json::Value;
    use time::{Duration, OffsetDateTime};

    use crate::{
        Error, Transaction,
        category::CategoryType,
        create_transaction,
        test_utils::{
            assert_content_type, assert_status_ok, assert_valid_html, get_test_connection,
            insert_category, insert_transaction, parse_html_document,
        },
    };

    use super::{DashboardState, get_dashboard_data, get_dashboard_page};

    fn dashboard_state(connection: Connection) -> DashboardState {
        DashboardState {
            db_connection: Arc::new(Mutex::new(connection)),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    #[track_caller]
    fn assert_element_exists(html: &Html, selector: &str) {
        let parsed = Selector::parse(selector).unwrap();
        assert!(
            html.select(&parsed).next().is_some(),
            "Element '{selector}' not found in {}",
            html.html()
        );
    }

    #[track_caller]
    fn assert_element_missing(html: &Html, selector: &str) {
        let parsed = Selector::parse(selector).unwrap();
        assert!(
            html.select(&parsed).next().is_none(),
            "Element '{selector}' should not be in {}",
            html.html()
        );
    }

    #[tokio::test]
    async fn dashboard_page_loads_successfully() {
        let conn = get_test_connection();
        let today = OffsetDateTime::now_utc().date();
        let salary = insert_category("Salary", "💼", CategoryType::Income, &conn);
        let groceries = insert_category("Groceries", "🛒", CategoryType::Expense, &conn);
        insert_transaction(1000, today, &salary, &conn);
        insert_transaction(200, today - Duration::days(2), &groceries, &conn);

        let response = get_dashboard_page(State(dashboard_state(conn)))
            .await
            .unwrap();

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        assert_element_exists(&html, "#total-income");
        assert_element_exists(&html, "#total-expense");
        assert_element_exists(&html, "#balance");
        assert_element_exists(&html, "#expense-by-category-chart");
        assert_element_exists(&html, "#income-vs-expense-chart");
        assert_element_exists(&html, "#recent-transactions table");
        assert_element_missing(&html, "#empty-window-hint");
    }

    #[tokio::test]
    async fn dashboard_page_shows_week_totals() {
        let conn = get_test_connection();
        let today = OffsetDateTime::now_utc().date();
        let salary = insert_category("Salary", "💼", CategoryType::Income, &conn);
        let groceries = insert_category("Groceries", "🛒", CategoryType::Expense, &conn);
        insert_transaction(1000, today - Duration::days(5), &salary, &conn);
        insert_transaction(250, today, &groceries, &conn);
        // Outside the window.
        insert_transaction(9999, today - Duration::days(7), &salary, &conn);

        let response = get_dashboard_page(State(dashboard_state(conn)))
            .await
            .unwrap();

        let html = parse_html_document(response).await;
        let selector = Selector::parse("#balance span").unwrap();
        let balance: String = html.select(&selector).next().unwrap().text().collect();
        assert_eq!(balance, "R750");
    }

    #[tokio::test]
    async fn shows_hint_when_week_is_empty() {
        let conn = get_test_connection();
        let today = OffsetDateTime::now_utc().date();
        let groceries = insert_category("Groceries", "🛒", CategoryType::Expense, &conn);
        insert_transaction(40, today - Duration::days(30), &groceries, &conn);

        let response = get_dashboard_page(State(dashboard_state(conn)))
            .await
            .unwrap();

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        assert_element_exists(&html, "#empty-window-hint");
        assert_element_exists(&html, "#total-income");
        assert_element_missing(&html, "#charts");
        // Older transactions are still listed.
        assert_element_exists(&html, "#recent-transactions table");
    }

    #[tokio::test]
    async fn query_failure_is_an_sql_error() {
        // Without the schema every query fails.
        let conn = Connection::open_in_memory().unwrap();

        let response = get_dashboard_page(State(dashboard_state(conn))).await;

        assert!(matches!(response, Err(Error::SqlError(_))));
    }

    #[tokio::test]
    async fn invalid_timezone_is_an_error() {
        let state = DashboardState {
            local_timezone: "Mars/Olympus_Mons".to_owned(),
            ..dashboard_state(get_test_connection())
        };

        let response = get_dashboard_page(State(state)).await;

        assert_eq!(
            response.err(),
            Some(Error::InvalidTimezoneError("Mars/Olympus_Mons".to_owned()))
        );
    }

    #[tokio::test]
    async fn overflowing_totals_are_an_error_and_keep_the_database_usable() {
        let conn = get_test_connection();
        let today = OffsetDateTime::now_utc().date();
        let salary = insert_category("Salary", "💼", CategoryType::Income, &conn);
        let largest_amount: Decimal = "79228162514264337593543950335".parse().unwrap();
        for _ in 0..2 {
            create_transaction(Transaction::build(largest_amount, today, salary.id), &conn)
                .unwrap();
        }
        let state = dashboard_state(conn);

        let first = get_dashboard_page(State(state.clone())).await;
        let second = get_dashboard_page(State(state.clone())).await;

        assert_eq!(first.err(), Some(Error::AmountOverflow));
        assert_eq!(
            second.err(),
            Some(Error::AmountOverflow),
            "later requests should see the same error, not a lock error"
        );
        assert!(!state.db_connection.is_poisoned());

        let response = get_dashboard_data(State(state)).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn api_returns_dashboard_as_json() {
        let conn = get_test_connection();
        let today = OffsetDateTime::now_utc().date();
        let salary = insert_category("Salary", "💼", CategoryType::Income, &conn);
        insert_transaction(1000, today, &salary, &conn);

        let response = get_dashboard_data(State(dashboard_state(conn))).await;

        assert_status_ok(&response);
        assert_content_type(&response, "application/json");
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        let total_income: Decimal = json["total_income"].as_str().unwrap().parse().unwrap();
        assert_eq!(total_income, Decimal::from(1000));
        assert_eq!(json["daily_series"].as_array().unwrap().len(), 7);
        assert_eq!(json["window"]["end"], today.to_string());
        assert_eq!(json["recent_transactions"][0]["category"]["type"], "Income");
    }

    #[tokio::test]
    async fn api_returns_500_json_on_failure() {
        let conn = Connection::open_in_memory().unwrap();

        let response = get_dashboard_data(State(dashboard_state(conn))).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_content_type(&response, "application/json");
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert!(json["error"].is_string());
    }
}
