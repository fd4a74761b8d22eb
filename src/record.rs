//! Generic record mapper shared by every forum entity
//!
//! Each entity declares its table and an ordered list of `(column, value)`
//! pairs once; inserts and updates are built from that single declaration,
//! so the column list and the bound values can never disagree.

use rusqlite::Row;
use rusqlite::types::ToSql;
use tracing::debug;
use crate::{Database, Error, Result};

mod private {
    /// Only this crate can assign identifiers.
    pub struct Token;
}

pub(crate) use private::Token;

/// A row type stored in one forum table.
///
/// Identifiers are `None` until the row is inserted and never change after.
pub trait Record: Sized {
    /// Table holding rows of this type
    const TABLE: &'static str;

    /// Row identifier, `None` while unpersisted
    fn id(&self) -> Option<i64>;

    #[doc(hidden)]
    fn assign_id(&mut self, id: i64, token: Token);

    /// Hydrate from a result row, addressing columns by name
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    /// Non-identifier columns in insert order, paired with their values
    fn columns(&self) -> Vec<(&'static str, &dyn ToSql)>;

    fn is_persisted(&self) -> bool {
        self.id().is_some()
    }

    /// Look up one row by identifier
    fn find_by_id(db: &Database, id: i64) -> Result<Option<Self>> {
        let sql = format!("SELECT * FROM {} WHERE id = ?1", Self::TABLE);
        db.query_record(&sql, [id])
    }

    /// Every row in the table, in storage order
    fn all(db: &Database) -> Result<Vec<Self>> {
        let sql = format!("SELECT * FROM {}", Self::TABLE);
        db.query_records(&sql, [])
    }

    /// Number of rows in the table
    fn count(db: &Database) -> Result<usize> {
        let sql = format!("SELECT COUNT(*) FROM {}", Self::TABLE);
        let count: i64 = db.query_scalar(&sql, [])?;
        Ok(count as usize)
    }

    /// Insert this record and take the generated identifier.
    ///
    /// Insert-only: a persisted record is rejected before any statement runs.
    fn save(&mut self, db: &Database) -> Result<i64> {
        ensure_unpersisted(&*self)?;

        let id = {
            let columns = self.columns();
            let names: Vec<&str> = columns.iter().map(|(name, _)| *name).collect();
            let values: Vec<&dyn ToSql> = columns.iter().map(|(_, value)| *value).collect();
            db.insert(&insert_sql(Self::TABLE, &names), values.as_slice())?
        };

        self.assign_id(id, Token);
        debug!(table = Self::TABLE, id, "saved");
        Ok(id)
    }

    /// Overwrite every mapped column of the stored row
    fn update(&self, db: &Database) -> Result<()> {
        let id = self.id().ok_or(Error::NotPersisted { table: Self::TABLE })?;

        let columns = self.columns();
        let names: Vec<&str> = columns.iter().map(|(name, _)| *name).collect();
        let mut values: Vec<&dyn ToSql> = columns.iter().map(|(_, value)| *value).collect();
        values.push(&id);

        db.execute(&update_sql(Self::TABLE, &names), values.as_slice())?;
        Ok(())
    }
}

/// Reject inserts of a record that already has an identifier
pub(crate) fn ensure_unpersisted<R: Record>(record: &R) -> Result<()> {
    match record.id() {
        Some(id) => Err(Error::AlreadyPersisted { table: R::TABLE, id }),
        None => Ok(()),
    }
}

/// `INSERT INTO t (a, b) VALUES (?1, ?2)`
pub(crate) fn insert_sql(table: &str, columns: &[&str]) -> String {
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{}", i)).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table,
        columns.join(", "),
        placeholders.join(", ")
    )
}

/// `UPDATE t SET a = ?1, b = ?2 WHERE id = ?3`
pub(crate) fn update_sql(table: &str, columns: &[&str]) -> String {
    let assignments: Vec<String> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| format!("{} = ?{}", column, i + 1))
        .collect();
    format!(
        "UPDATE {} SET {} WHERE id = ?{}",
        table,
        assignments.join(", "),
        columns.len() + 1
    )
}
