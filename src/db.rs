use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Wire format for dates, matching the prompts ("DD-MM-YYYY").
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Default categories seeded into a fresh database.
pub const DEFAULT_CATEGORIES: [&str; 7] = [
    "Rent",
    "Food",
    "Clothing",
    "Utilities",
    "Entertainment",
    "Grocery Shopping",
    "Tuition Fee",
];

/// A recorded expense. Append-only: rows are never edited or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    /// Soft reference to categories.name. Not enforced as a foreign key, so
    /// orphaned category strings are accepted behavior.
    pub category: String,
    pub amount: f64,
    pub description: String,
    pub date: NaiveDate,
}

/// A recorded income entry. Append-only, no category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Income {
    pub id: i64,
    pub amount: f64,
    pub description: String,
    pub date: NaiveDate,
}

/// One row of the spending-by-category aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// Owns the SQLite connection for the process lifetime.
///
/// Single-threaded access only; every write autocommits. There is no
/// rollback surface, and storage-level failures simply propagate.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open database at {}", path.display()))?;
        Ok(Store { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Store {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Create the three tables if absent and seed the default categories.
    /// Safe to call on every startup.
    pub fn initialize(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS categories (name TEXT PRIMARY KEY)",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS transactions (
                id INTEGER PRIMARY KEY,
                category TEXT,
                amount REAL,
                description TEXT,
                date TEXT
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS incomes (
                id INTEGER PRIMARY KEY,
                amount REAL,
                description TEXT,
                date TEXT
            )",
            [],
        )?;

        for name in DEFAULT_CATEGORIES {
            self.conn
                .execute("INSERT OR IGNORE INTO categories (name) VALUES (?1)", [name])?;
        }

        debug!("database initialized");
        Ok(())
    }

    /// Category names in insertion (rowid) order.
    pub fn list_categories(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT name FROM categories")?;
        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(names)
    }

    /// Insert a category. A duplicate name is a silent no-op; uniqueness is
    /// enforced by the PRIMARY KEY, not pre-checked.
    pub fn add_category(&self, name: &str) -> Result<()> {
        let inserted = self
            .conn
            .execute("INSERT OR IGNORE INTO categories (name) VALUES (?1)", [name])?;
        debug!(name, inserted, "add_category");
        Ok(())
    }

    /// Insert an expense row. The category string is stored as given, with no
    /// check against the categories table.
    pub fn add_transaction(
        &self,
        category: &str,
        amount: f64,
        description: &str,
        date: NaiveDate,
    ) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO transactions (category, amount, description, date)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                category,
                amount,
                description,
                date.format(DATE_FORMAT).to_string()
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(id, category, amount, "add_transaction");
        Ok(id)
    }

    pub fn add_income(&self, amount: f64, description: &str, date: NaiveDate) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO incomes (amount, description, date) VALUES (?1, ?2, ?3)",
            params![amount, description, date.format(DATE_FORMAT).to_string()],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(id, amount, "add_income");
        Ok(id)
    }

    /// All transactions in insertion order (ascending id).
    pub fn list_transactions(&self) -> Result<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, category, amount, description, date
             FROM transactions
             ORDER BY id",
        )?;

        let transactions = stmt
            .query_map([], |row| {
                let date_str: String = row.get(4)?;
                Ok(Transaction {
                    id: row.get(0)?,
                    category: row.get(1)?,
                    amount: row.get(2)?,
                    description: row.get(3)?,
                    date: parse_stored_date(4, &date_str)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    pub fn list_incomes(&self) -> Result<Vec<Income>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, amount, description, date
             FROM incomes
             ORDER BY id",
        )?;

        let incomes = stmt
            .query_map([], |row| {
                let date_str: String = row.get(3)?;
                Ok(Income {
                    id: row.get(0)?,
                    amount: row.get(1)?,
                    description: row.get(2)?,
                    date: parse_stored_date(3, &date_str)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(incomes)
    }

    /// Total spent per category. Categories with no transactions are absent
    /// from the result, not zero rows.
    pub fn sum_by_category(&self) -> Result<Vec<CategoryTotal>> {
        let mut stmt = self
            .conn
            .prepare("SELECT category, SUM(amount) FROM transactions GROUP BY category")?;

        let totals = stmt
            .query_map([], |row| {
                Ok(CategoryTotal {
                    category: row.get(0)?,
                    total: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(totals)
    }

    pub fn sum_all_transactions(&self) -> Result<f64> {
        let total: f64 = self.conn.query_row(
            "SELECT COALESCE(SUM(amount), 0) FROM transactions",
            [],
            |row| row.get(0),
        )?;
        Ok(total)
    }

    pub fn sum_all_incomes(&self) -> Result<f64> {
        let total: f64 = self.conn.query_row(
            "SELECT COALESCE(SUM(amount), 0) FROM incomes",
            [],
            |row| row.get(0),
        )?;
        Ok(total)
    }
}

fn parse_stored_date(column: usize, raw: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(e))
    })
}
