//! The fixed set of expense categories.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::Error;

/// What an expense was for.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[allow(missing_docs)]
pub enum Category {
    Food,
    Transport,
    Rent,
    Entertainment,
    Utilities,
    Healthcare,
    #[default]
    Others,
}

impl Category {
    /// Every category, in the order they are offered to the user.
    pub const ALL: [Category; 7] = [
        Category::Food,
        Category::Transport,
        Category::Rent,
        Category::Entertainment,
        Category::Utilities,
        Category::Healthcare,
        Category::Others,
    ];

    /// The name stored in the database and shown to the user.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Rent => "Rent",
            Category::Entertainment => "Entertainment",
            Category::Utilities => "Utilities",
            Category::Healthcare => "Healthcare",
            Category::Others => "Others",
        }
    }
}

impl FromStr for Category {
    type Err = Error;

    /// Parse a category name, ignoring case and surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [Error::EmptyCategory] for a blank string and
    /// [Error::InvalidCategory] for a name outside the fixed set.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();

        if name.is_empty() {
            return Err(Error::EmptyCategory);
        }

        Category::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::InvalidCategory(name.to_owned()))
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ToSql for Category {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Category {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let name = value.as_str()?;
        name.parse()
            .map_err(|error: Error| FromSqlError::Other(Box::new(error)))
    }
}
