//! A web dashboard summarising the last seven days of personal finances.
//!
//! The library serves HTML pages directly: totals for income and expenses,
//! a breakdown of spending by category, a daily income/expense chart and the
//! most recent transactions.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::response::{IntoResponse, Response};
use axum_server::Handle;
use tokio::signal;

mod app_state;
mod category;
mod dashboard;
mod database_id;
mod db;
mod endpoints;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod routing;
#[cfg(test)]
mod test_utils;
mod timezone;
mod transaction;

pub use app_state::AppState;
pub use category::{
    Category, CategoryId, CategoryTitle, CategoryType, create_category, get_all_categories,
    get_category,
};
pub use db::initialize as initialize_db;
pub use logging::logging_middleware;
pub use routing::build_router;
pub use timezone::today_in;
pub use transaction::{
    Transaction, TransactionBuilder, count_transactions, create_transaction, get_transaction,
};

use crate::{internal_server_error::InternalServerError, not_found::get_404_not_found_response};

/// How long in-flight requests get to finish once a shutdown signal arrives.
const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_secs(1);

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let signal_name = tokio::select! {
        _ = ctrl_c => "ctrl+c",
        _ = terminate => "terminate",
    };

    tracing::info!("Received {signal_name} signal, shutting down.");
    handle.graceful_shutdown(Some(SHUTDOWN_GRACE_PERIOD));
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty string was used to create a category title.
    #[error("category title cannot be empty")]
    EmptyCategoryTitle,

    /// The category ID used to create a transaction did not match a valid category.
    #[error("the category ID {0} does not refer to a valid category")]
    InvalidCategory(CategoryId),

    /// The requested resource was not found.
    ///
    /// Internally, this error occurs when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    ///
    /// This is how a failed fetch from the data store surfaces, e.g. a
    /// missing table or a corrupt database file.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// A sum or difference of amounts does not fit in a decimal.
    #[error("the amounts are too large to add up")]
    AmountOverflow,

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::DatabaseLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

#[cfg(test)]
mod error_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::Error;

    #[test]
    fn no_rows_maps_to_not_found() {
        let error: Error = rusqlite::Error::QueryReturnedNoRows.into();

        assert_eq!(error, Error::NotFound);
    }

    #[test]
    fn other_sql_errors_are_wrapped() {
        let error: Error = rusqlite::Error::InvalidQuery.into();

        assert_eq!(error, Error::SqlError(rusqlite::Error::InvalidQuery));
    }

    #[test]
    fn not_found_renders_404() {
        let response = Error::NotFound.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn sql_error_renders_500() {
        let response = Error::SqlError(rusqlite::Error::InvalidQuery).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn invalid_timezone_renders_500() {
        let response = Error::InvalidTimezoneError("Mars/Olympus_Mons".to_owned()).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
