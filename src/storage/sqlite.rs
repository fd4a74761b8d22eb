//! SQLite connection handle

use std::path::Path;
use rusqlite::{Connection, OptionalExtension, Params};
use rusqlite::types::FromSql;
use tracing::{debug, info};
use crate::Result;
use crate::config::{self, ForumConfig};
use crate::record::Record;
use super::schema;

/// The process-wide connection to the forum database.
///
/// Construct one at startup and pass `&Database` to every mapper call.
/// The wrapped [`Connection`] is `Send` but not `Sync`, so sharing a handle
/// across threads requires the caller to add its own synchronization.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open a database file (created empty if missing; the schema is assumed
    /// to exist already)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        info!("Database opened at {}", path.display());
        Ok(Self { conn })
    }

    /// Open the file named by `config`, or the default `questions.db`
    pub fn from_config(config: Option<&ForumConfig>) -> Result<Self> {
        Self::open(&config::database_path(config))
    }

    /// Open an in-memory database with the schema installed (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let db = Self { conn: Connection::open_in_memory()? };
        db.create_schema()?;
        Ok(db)
    }

    /// Install the forum tables if they are missing
    pub fn create_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        info!("Forum schema installed");
        Ok(())
    }

    /// Borrow the raw connection for statements outside the mapper
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    // ========== Statement helpers used by the mapper ==========

    /// Run a select and hydrate every row into `T`
    pub(crate) fn query_records<T: Record, P: Params>(&self, sql: &str, params: P) -> Result<Vec<T>> {
        debug!(table = T::TABLE, sql, "query");
        let mut stmt = self.conn.prepare(sql)?;
        let records = stmt
            .query_map(params, T::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    /// Run a select expected to match at most one row
    pub(crate) fn query_record<T: Record, P: Params>(&self, sql: &str, params: P) -> Result<Option<T>> {
        debug!(table = T::TABLE, sql, "query one");
        self.conn
            .query_row(sql, params, T::from_row)
            .optional()
            .map_err(Into::into)
    }

    /// Run a select producing a single value in the first column
    pub(crate) fn query_scalar<T: FromSql, P: Params>(&self, sql: &str, params: P) -> Result<T> {
        debug!(sql, "query scalar");
        Ok(self.conn.query_row(sql, params, |row| row.get(0))?)
    }

    /// Run an insert and return the rowid SQLite generated for it
    pub(crate) fn insert<P: Params>(&self, sql: &str, params: P) -> Result<i64> {
        self.conn.execute(sql, params)?;
        let id = self.conn.last_insert_rowid();
        debug!(sql, id, "inserted");
        Ok(id)
    }

    /// Run an update/delete and return the affected row count
    pub(crate) fn execute<P: Params>(&self, sql: &str, params: P) -> Result<usize> {
        let changed = self.conn.execute(sql, params)?;
        debug!(sql, changed, "executed");
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn table_names(db: &Database) -> Vec<String> {
        let mut stmt = db
            .connection()
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .unwrap();
        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .collect::<rusqlite::Result<Vec<String>>>()
            .unwrap()
    }

    #[test]
    fn test_in_memory_has_schema() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(
            table_names(&db),
            vec!["question_follows", "question_likes", "questions", "replies", "users"]
        );
    }

    #[test]
    fn test_create_schema_is_idempotent() {
        let db = Database::open_in_memory().unwrap();
        db.create_schema().unwrap();
        assert_eq!(table_names(&db).len(), 5);
    }

    #[test]
    fn test_open_file_does_not_create_schema() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(&dir.path().join("questions.db")).unwrap();
        assert!(table_names(&db).is_empty());
    }

    #[test]
    fn test_open_unreachable_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("questions.db");
        assert!(matches!(Database::open(&path), Err(Error::Storage(_))));
    }

    #[test]
    fn test_from_config_uses_configured_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("forum.db");
        let config = ForumConfig { database: Some(path.to_string_lossy().into_owned()) };

        let db = Database::from_config(Some(&config)).unwrap();
        db.create_schema().unwrap();
        drop(db);

        let reopened = Database::open(&path).unwrap();
        assert_eq!(table_names(&reopened).len(), 5);
    }

    #[test]
    fn test_storage_errors_propagate() {
        let db = Database::open_in_memory().unwrap();
        let err = db.execute("UPDATE no_such_table SET x = 1", []).unwrap_err();
        assert!(matches!(err, Error::Storage(_)));
        assert!(!err.is_precondition());
    }
}
