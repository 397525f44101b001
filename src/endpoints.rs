//! The API endpoints URIs.

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The dashboard page summarising the last seven days.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The dashboard data as JSON.
pub const DASHBOARD_API: &str = "/api/dashboard";
