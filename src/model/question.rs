//! Questions posted to the forum

use rusqlite::Row;
use rusqlite::types::ToSql;
use serde::{Deserialize, Serialize};
use crate::record::{Record, Token};
use crate::{Database, Result};
use super::{QuestionFollow, QuestionLike, Reply, User};

/// A question authored by a [`User`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
    pub title: String,
    pub body: String,
    pub author_id: i64,
}

impl Question {
    /// Create an unpersisted question
    pub fn new(title: impl Into<String>, body: impl Into<String>, author_id: i64) -> Self {
        Self {
            id: None,
            title: title.into(),
            body: body.into(),
            author_id,
        }
    }

    pub fn find_by_author_id(db: &Database, author_id: i64) -> Result<Vec<Question>> {
        db.query_records("SELECT * FROM questions WHERE author_id = ?1", [author_id])
    }

    /// The `n` questions with the most follows, highest first
    pub fn most_followed(db: &Database, n: usize) -> Result<Vec<Question>> {
        QuestionFollow::most_followed_questions(db, n)
    }

    /// The `n` questions with the most likes, highest first
    pub fn most_liked(db: &Database, n: usize) -> Result<Vec<Question>> {
        QuestionLike::most_liked_questions(db, n)
    }

    pub fn author(&self, db: &Database) -> Result<Option<User>> {
        User::find_by_id(db, self.author_id)
    }

    /// Every reply to this question, nested or not
    pub fn replies(&self, db: &Database) -> Result<Vec<Reply>> {
        match self.id {
            Some(id) => Reply::find_by_question_id(db, id),
            None => Ok(Vec::new()),
        }
    }

    /// Replies that answer the question directly (no parent reply)
    pub fn top_level_replies(&self, db: &Database) -> Result<Vec<Reply>> {
        db.query_records(
            "SELECT * FROM replies WHERE question_id = ?1 AND parent_id IS NULL",
            [self.id],
        )
    }

    pub fn followers(&self, db: &Database) -> Result<Vec<User>> {
        match self.id {
            Some(id) => QuestionFollow::followers_for_question_id(db, id),
            None => Ok(Vec::new()),
        }
    }

    pub fn likers(&self, db: &Database) -> Result<Vec<User>> {
        match self.id {
            Some(id) => QuestionLike::likers_for_question_id(db, id),
            None => Ok(Vec::new()),
        }
    }

    pub fn num_likes(&self, db: &Database) -> Result<i64> {
        match self.id {
            Some(id) => QuestionLike::num_likes_for_question_id(db, id),
            None => Ok(0),
        }
    }

    pub fn num_followers(&self, db: &Database) -> Result<i64> {
        match self.id {
            Some(id) => QuestionFollow::num_followers_for_question_id(db, id),
            None => Ok(0),
        }
    }
}

impl Record for Question {
    const TABLE: &'static str = "questions";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn assign_id(&mut self, id: i64, _: Token) {
        self.id = Some(id);
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Question {
            id: Some(row.get("id")?),
            title: row.get("title")?,
            body: row.get("body")?,
            author_id: row.get("author_id")?,
        })
    }

    fn columns(&self) -> Vec<(&'static str, &dyn ToSql)> {
        vec![
            ("title", &self.title),
            ("body", &self.body),
            ("author_id", &self.author_id),
        ]
    }
}
