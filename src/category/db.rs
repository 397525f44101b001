//! Database operations for categories.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    category::{Category, CategoryId, CategoryTitle, CategoryType},
};

/// Create a category and return it with its generated ID.
pub fn create_category(
    title: CategoryTitle,
    icon: &str,
    category_type: CategoryType,
    connection: &Connection,
) -> Result<Category, Error> {
    connection.execute(
        "INSERT INTO category (title, icon, type) VALUES (?1, ?2, ?3);",
        (title.as_ref(), icon, category_type.as_str()),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Category {
        id,
        title,
        icon: icon.to_owned(),
        category_type,
    })
}

/// Retrieve a single category by ID.
pub fn get_category(category_id: CategoryId, connection: &Connection) -> Result<Category, Error> {
    connection
        .prepare("SELECT id, title, icon, type FROM category WHERE id = :id;")?
        .query_row(&[(":id", &category_id)], |row| map_category_row(row, 0))
        .map_err(|error| error.into())
}

/// Retrieve all categories ordered alphabetically by title.
pub fn get_all_categories(connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare("SELECT id, title, icon, type FROM category ORDER BY title ASC;")?
        .query_map([], |row| map_category_row(row, 0))?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Initialize the category table.
///
/// The `type` column is deliberately unconstrained, see [CategoryType::Unrecognised].
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL,
            icon TEXT NOT NULL DEFAULT '',
            type TEXT NOT NULL
        );",
        (),
    )?;

    Ok(())
}

/// Map the columns `id, title, icon, type` starting at `offset` to a [Category].
///
/// The offset lets queries that join the category onto another table read
/// both records from the same row.
pub fn map_category_row(row: &Row, offset: usize) -> Result<Category, rusqlite::Error> {
    let id = row.get(offset)?;
    let raw_title: String = row.get(offset + 1)?;
    let icon = row.get(offset + 2)?;
    let raw_type: String = row.get(offset + 3)?;

    Ok(Category {
        id,
        title: CategoryTitle::new_unchecked(&raw_title),
        icon,
        category_type: CategoryType::from_raw(&raw_type),
    })
}

#[cfg(test)]
mod category_query_tests {
    use std::collections::HashSet;

    use rusqlite::Connection;

    use crate::{
        Error,
        category::{CategoryTitle, CategoryType, create_category, get_all_categories, get_category},
    };

    use super::create_category_table;

    fn get_test_db_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        create_category_table(&connection).expect("Could not create category table");
        connection
    }

    #[test]
    fn create_category_succeeds() {
        let connection = get_test_db_connection();
        let title = CategoryTitle::new("Groceries").unwrap();

        let category = create_category(title.clone(), "🛒", CategoryType::Expense, &connection)
            .expect("Could not create category");

        assert!(category.id > 0);
        assert_eq!(category.title, title);
        assert_eq!(category.icon, "🛒");
        assert_eq!(category.category_type, CategoryType::Expense);
    }

    #[test]
    fn get_category_succeeds() {
        let connection = get_test_db_connection();
        let inserted = create_category(
            CategoryTitle::new_unchecked("Salary"),
            "💼",
            CategoryType::Income,
            &connection,
        )
        .expect("Could not create test category");

        let selected = get_category(inserted.id, &connection);

        assert_eq!(Ok(inserted), selected);
    }

    #[test]
    fn get_category_with_invalid_id_returns_not_found() {
        let connection = get_test_db_connection();
        let inserted = create_category(
            CategoryTitle::new_unchecked("Salary"),
            "💼",
            CategoryType::Income,
            &connection,
        )
        .expect("Could not create test category");

        let selected = get_category(inserted.id + 123, &connection);

        assert_eq!(selected, Err(Error::NotFound));
    }

    #[test]
    fn get_all_categories_returns_every_category() {
        let connection = get_test_db_connection();
        let inserted = HashSet::from([
            create_category(
                CategoryTitle::new_unchecked("Rent"),
                "🏠",
                CategoryType::Expense,
                &connection,
            )
            .expect("Could not create test category"),
            create_category(
                CategoryTitle::new_unchecked("Salary"),
                "💼",
                CategoryType::Income,
                &connection,
            )
            .expect("Could not create test category"),
        ]);

        let selected = get_all_categories(&connection).expect("Could not get all categories");

        assert_eq!(inserted, HashSet::from_iter(selected));
    }

    #[test]
    fn unknown_type_survives_round_trip_through_database() {
        let connection = get_test_db_connection();
        connection
            .execute(
                "INSERT INTO category (title, icon, type) VALUES ('Transfers', '🔁', 'Transfer')",
                (),
            )
            .unwrap();
        let id = connection.last_insert_rowid();

        let category = get_category(id, &connection).unwrap();

        assert_eq!(
            category.category_type,
            CategoryType::Unrecognised("Transfer".to_owned())
        );
    }
}
