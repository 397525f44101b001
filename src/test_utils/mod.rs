#![allow(missing_docs)]

pub(crate) mod db;
pub(crate) mod html;
pub(crate) mod http;

pub(crate) use db::{get_test_connection, insert_category, insert_transaction};
pub(crate) use html::{assert_valid_html, parse_html_document};
pub(crate) use http::{assert_content_type, assert_status_ok};
