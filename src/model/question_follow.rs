//! User follows question

use rusqlite::{params, Row};
use rusqlite::types::ToSql;
use serde::{Deserialize, Serialize};
use crate::record::{ensure_unpersisted, Record, Token};
use crate::{Database, Result};
use super::{Question, User};

/// A user following a question. The pair is not enforced unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionFollow {
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
    pub question_id: i64,
    pub user_id: i64,
}

impl QuestionFollow {
    pub fn new(question_id: i64, user_id: i64) -> Self {
        Self { id: None, question_id, user_id }
    }

    /// Insert this follow. Same insert-only contract as [`Record::save`].
    pub fn create(&mut self, db: &Database) -> Result<i64> {
        ensure_unpersisted(&*self)?;
        let id = db.insert(
            "INSERT INTO question_follows (user_id, question_id) VALUES (?1, ?2)",
            params![self.user_id, self.question_id],
        )?;
        self.id = Some(id);
        Ok(id)
    }

    pub fn followers_for_question_id(db: &Database, question_id: i64) -> Result<Vec<User>> {
        db.query_records(
            "SELECT users.*
             FROM question_follows
             JOIN users ON question_follows.user_id = users.id
             WHERE question_follows.question_id = ?1
             ORDER BY question_follows.id",
            [question_id],
        )
    }

    pub fn followed_questions_for_user_id(db: &Database, user_id: i64) -> Result<Vec<Question>> {
        db.query_records(
            "SELECT questions.*
             FROM question_follows
             JOIN questions ON question_follows.question_id = questions.id
             WHERE question_follows.user_id = ?1
             ORDER BY question_follows.id",
            [user_id],
        )
    }

    pub fn num_followers_for_question_id(db: &Database, question_id: i64) -> Result<i64> {
        db.query_scalar(
            "SELECT COUNT(*) FROM question_follows WHERE question_id = ?1",
            [question_id],
        )
    }

    /// Questions ranked by follow count, ties by ascending question id.
    /// Questions nobody follows are never returned.
    pub fn most_followed_questions(db: &Database, n: usize) -> Result<Vec<Question>> {
        db.query_records(
            "SELECT questions.*
             FROM question_follows
             JOIN questions ON question_follows.question_id = questions.id
             GROUP BY questions.id
             ORDER BY COUNT(*) DESC, questions.id ASC
             LIMIT ?1",
            [n as i64],
        )
    }
}

impl Record for QuestionFollow {
    const TABLE: &'static str = "question_follows";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn assign_id(&mut self, id: i64, _: Token) {
        self.id = Some(id);
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(QuestionFollow {
            id: Some(row.get("id")?),
            question_id: row.get("question_id")?,
            user_id: row.get("user_id")?,
        })
    }

    fn columns(&self) -> Vec<(&'static str, &dyn ToSql)> {
        vec![("question_id", &self.question_id), ("user_id", &self.user_id)]
    }
}
