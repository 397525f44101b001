//! Core category domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Serialize, Serializer};

use crate::{Error, database_id::DatabaseId};

/// Database identifier for a category.
pub type CategoryId = DatabaseId;

/// A validated, non-empty category title.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Hash)]
pub struct CategoryTitle(String);

impl CategoryTitle {
    /// Create a category title.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyCategoryTitle] if `title` is
    /// empty or only whitespace.
    pub fn new(title: &str) -> Result<Self, Error> {
        let title = title.trim();

        if title.is_empty() {
            Err(Error::EmptyCategoryTitle)
        } else {
            Ok(Self(title.to_string()))
        }
    }

    /// Create a category title without validation.
    ///
    /// The caller should ensure that the string is not empty.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because
    /// if the non-empty invariant is violated it will cause incorrect behaviour
    /// but not affect memory safety.
    pub fn new_unchecked(title: &str) -> Self {
        Self(title.to_string())
    }
}

impl AsRef<str> for CategoryTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for CategoryTitle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryTitle::new(s)
    }
}

impl Display for CategoryTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether money in a category is earned or spent.
///
/// The database stores the type as free text. Only the exact strings
/// `"Income"` and `"Expense"` are recognised; anything else is kept verbatim
/// in [CategoryType::Unrecognised] and is left out of income and expense
/// totals.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CategoryType {
    /// Money earned, e.g. salary.
    Income,
    /// Money spent, e.g. groceries.
    Expense,
    /// A type string that is neither "Income" nor "Expense".
    Unrecognised(String),
}

impl CategoryType {
    /// The stored type string for income categories.
    pub const INCOME: &'static str = "Income";
    /// The stored type string for expense categories.
    pub const EXPENSE: &'static str = "Expense";

    /// Parse the stored type string. Matching is exact and case-sensitive.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            Self::INCOME => Self::Income,
            Self::EXPENSE => Self::Expense,
            other => Self::Unrecognised(other.to_owned()),
        }
    }

    /// The string stored in the database for this type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Income => Self::INCOME,
            Self::Expense => Self::EXPENSE,
            Self::Unrecognised(raw) => raw,
        }
    }
}

impl Display for CategoryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for CategoryType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A labelled grouping for transactions, e.g. "🛒 Groceries" or "💼 Salary".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Hash)]
pub struct Category {
    /// The ID of the category.
    pub id: CategoryId,
    /// The display name of the category.
    pub title: CategoryTitle,
    /// An icon, usually a single emoji, shown before the title.
    pub icon: String,
    /// Whether the category is for income or expenses.
    #[serde(rename = "type")]
    pub category_type: CategoryType,
}

impl Category {
    /// The icon followed by the title, separated by a single space.
    pub fn label(&self) -> String {
        format!("{} {}", self.icon, self.title)
    }
}
