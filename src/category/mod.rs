//! Categories group transactions and mark them as either income or expense.

mod db;
mod domain;

pub use db::{
    create_category, create_category_table, get_all_categories, get_category, map_category_row,
};
pub use domain::{Category, CategoryId, CategoryTitle, CategoryType};
