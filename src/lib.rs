//! # Questions - record mapper for a Q&A forum
//!
//! A thin persistence layer over a single SQLite file holding a
//! question/answer forum.
//!
//! Questions provides:
//! - An explicit [`Database`] handle, opened once and passed everywhere
//! - The [`Record`] trait: lookup-by-id, fetch-all, insert-only save and update
//! - Five entities (`Question`, `User`, `Reply`, `QuestionFollow`, `QuestionLike`)
//!   with their relationship and aggregate queries

pub mod config;
pub mod logging;
pub mod model;
pub mod record;
pub mod storage;

// Re-exports for convenient access
pub use model::{Question, QuestionFollow, QuestionLike, Reply, User};
pub use record::Record;
pub use storage::Database;

/// Result type alias for mapper operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for mapper operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{table} row {id} is already in the database")]
    AlreadyPersisted { table: &'static str, id: i64 },

    #[error("{table} row is not in the database")]
    NotPersisted { table: &'static str },

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
}

impl Error {
    /// True for save/update called in the wrong persistence state
    pub fn is_precondition(&self) -> bool {
        matches!(self, Error::AlreadyPersisted { .. } | Error::NotPersisted { .. })
    }
}
