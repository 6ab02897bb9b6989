//! Transaction operations

use rusqlite::{params, OptionalExtension};

use super::{parse_category, parse_datetime, Database};
use crate::error::Result;
use crate::models::{Category, NewTransaction, Transaction};

const TRANSACTION_COLUMNS: &str =
    "id, amount, date, description, category, created_at, updated_at";

/// Filters for listing transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Case-insensitive substring matched against description or category
    pub search: Option<String>,
    /// Only this category
    pub category: Option<Category>,
    /// Maximum rows (None = everything)
    pub limit: Option<i64>,
}

/// Escape LIKE metacharacters so user text matches literally under `ESCAPE '\'`
fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

impl Database {
    /// Insert a transaction and return the stored record
    ///
    /// Callers are expected to have run `NewTransaction::validate` first.
    pub fn create_transaction(&self, tx: &NewTransaction) -> Result<Transaction> {
        let id = {
            let conn = self.conn()?;
            conn.execute(
                "INSERT INTO transactions (date, description, amount, category) VALUES (?, ?, ?, ?)",
                params![
                    tx.date.to_string(),
                    tx.description,
                    tx.amount,
                    tx.category.as_str()
                ],
            )?;
            conn.last_insert_rowid()
        };

        self.get_transaction(id)?.ok_or_else(|| {
            crate::Error::NotFound(format!("Transaction {} missing after insert", id))
        })
    }

    /// Get a single transaction by ID
    pub fn get_transaction(&self, id: i64) -> Result<Option<Transaction>> {
        let conn = self.conn()?;
        let tx = conn
            .query_row(
                &format!(
                    "SELECT {} FROM transactions WHERE id = ?",
                    TRANSACTION_COLUMNS
                ),
                params![id],
                Self::row_to_transaction,
            )
            .optional()?;
        Ok(tx)
    }

    /// List every transaction, newest first
    pub fn list_transactions(&self) -> Result<Vec<Transaction>> {
        self.search_transactions(&TransactionFilter::default())
    }

    /// List transactions matching a filter, newest first
    pub fn search_transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;

        let mut conditions = Vec::new();
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(q) = filter.search.as_deref() {
            if !q.trim().is_empty() {
                // SQLite LIKE ignores ASCII case by default
                conditions.push(
                    "(description LIKE ? ESCAPE '\\' OR category LIKE ? ESCAPE '\\')".to_string(),
                );
                let pattern = format!("%{}%", escape_like(q.trim()));
                params.push(Box::new(pattern.clone()));
                params.push(Box::new(pattern));
            }
        }

        if let Some(category) = filter.category {
            conditions.push("category = ?".to_string());
            params.push(Box::new(category.as_str()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        // SQLite treats a negative LIMIT as "no limit"
        params.push(Box::new(filter.limit.unwrap_or(-1)));

        let sql = format!(
            r#"
            SELECT {}
            FROM transactions
            {}
            ORDER BY date DESC, id DESC
            LIMIT ?
            "#,
            TRANSACTION_COLUMNS, where_clause
        );

        let mut stmt = conn.prepare(&sql)?;
        let params_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let transactions = stmt
            .query_map(params_refs.as_slice(), Self::row_to_transaction)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// Overwrite every user-editable field of a transaction
    ///
    /// Returns false when no transaction has this ID.
    pub fn update_transaction(&self, id: i64, tx: &NewTransaction) -> Result<bool> {
        let conn = self.conn()?;
        let updated = conn.execute(
            r#"
            UPDATE transactions
            SET date = ?, description = ?, amount = ?, category = ?, updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            "#,
            params![
                tx.date.to_string(),
                tx.description,
                tx.amount,
                tx.category.as_str(),
                id
            ],
        )?;
        Ok(updated > 0)
    }

    /// Delete a transaction. Returns false when no transaction has this ID.
    pub fn delete_transaction(&self, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM transactions WHERE id = ?", params![id])?;
        Ok(deleted > 0)
    }

    /// Count total transactions
    pub fn count_transactions(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?;
        Ok(count)
    }

    pub(crate) fn row_to_transaction(row: &rusqlite::Row) -> rusqlite::Result<Transaction> {
        let date_str: String = row.get(2)?;
        let category_str: String = row.get(4)?;
        let created_at_str: String = row.get(5)?;
        let updated_at_str: Option<String> = row.get(6)?;
        Ok(Transaction {
            id: row.get(0)?,
            amount: row.get(1)?,
            date: chrono::NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    2,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?,
            description: row.get(3)?,
            category: parse_category(4, &category_str)?,
            created_at: parse_datetime(&created_at_str),
            updated_at: updated_at_str.as_deref().map(parse_datetime),
        })
    }
}
