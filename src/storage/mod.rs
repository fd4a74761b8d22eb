//! Storage Layer - the single SQLite connection
//!
//! Tables (assumed to exist in production files):
//! - questions(id, title, body, author_id)
//! - users(id, fname, lname)
//! - replies(id, body, question_id, parent_id, user_id)
//! - question_follows(id, question_id, user_id)
//! - question_likes(id, question_id, user_id)

pub mod schema;
pub mod sqlite;

pub use sqlite::Database;
