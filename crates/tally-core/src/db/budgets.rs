//! Budget operations

use rusqlite::{params, OptionalExtension};

use super::{parse_category, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{Budget, Category, NewBudget};

impl Database {
    /// Create a budget for a category that has none yet
    ///
    /// Returns `Error::Conflict` if the category already has a budget.
    pub fn create_budget(&self, budget: &NewBudget) -> Result<Budget> {
        let id = {
            let conn = self.conn()?;
            // A second budget for the category trips the UNIQUE index
            conn.execute(
                "INSERT INTO budgets (category, amount) VALUES (?, ?)",
                params![budget.category.as_str(), budget.amount],
            )
            .map_err(|e| match e {
                rusqlite::Error::SqliteFailure(ref err, _)
                    if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
                {
                    Error::Conflict(format!("Budget for {} already exists", budget.category))
                }
                other => Error::Database(other),
            })?;
            conn.last_insert_rowid()
        };

        self.get_budget(id)?
            .ok_or_else(|| Error::NotFound(format!("Budget {} missing after insert", id)))
    }

    /// Get a budget by ID
    pub fn get_budget(&self, id: i64) -> Result<Option<Budget>> {
        let conn = self.conn()?;
        let budget = conn
            .query_row(
                "SELECT id, category, amount, created_at, updated_at FROM budgets WHERE id = ?",
                params![id],
                Self::row_to_budget,
            )
            .optional()?;
        Ok(budget)
    }

    /// Get the budget for a category, if one exists
    pub fn get_budget_by_category(&self, category: Category) -> Result<Option<Budget>> {
        let conn = self.conn()?;
        let budget = conn
            .query_row(
                "SELECT id, category, amount, created_at, updated_at FROM budgets WHERE category = ?",
                params![category.as_str()],
                Self::row_to_budget,
            )
            .optional()?;
        Ok(budget)
    }

    /// List all budgets ordered by category name
    pub fn list_budgets(&self) -> Result<Vec<Budget>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, category, amount, created_at, updated_at FROM budgets ORDER BY category",
        )?;

        let budgets = stmt
            .query_map([], Self::row_to_budget)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(budgets)
    }

    /// Change a budget's monthly amount
    ///
    /// The category of a budget never changes. Returns false when no budget has this ID.
    pub fn update_budget(&self, id: i64, amount: f64) -> Result<bool> {
        let conn = self.conn()?;
        let updated = conn.execute(
            "UPDATE budgets SET amount = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?",
            params![amount, id],
        )?;
        Ok(updated > 0)
    }

    /// Delete a budget. Returns false when no budget has this ID.
    pub fn delete_budget(&self, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM budgets WHERE id = ?", params![id])?;
        Ok(deleted > 0)
    }

    fn row_to_budget(row: &rusqlite::Row) -> rusqlite::Result<Budget> {
        let category_str: String = row.get(1)?;
        let created_at_str: String = row.get(3)?;
        let updated_at_str: Option<String> = row.get(4)?;
        Ok(Budget {
            id: row.get(0)?,
            category: parse_category(1, &category_str)?,
            amount: row.get(2)?,
            created_at: parse_datetime(&created_at_str),
            updated_at: updated_at_str.as_deref().map(parse_datetime),
        })
    }
}
