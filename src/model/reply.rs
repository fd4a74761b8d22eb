//! Replies to questions
//!
//! Replies form a forest per question: `parent_id` is `None` for replies that
//! answer the question directly. Nothing in the schema prevents cycles, so
//! walks up the parent chain track what they have visited.

use std::collections::HashSet;
use rusqlite::{params, Row};
use rusqlite::types::ToSql;
use serde::{Deserialize, Serialize};
use tracing::warn;
use crate::record::{ensure_unpersisted, Record, Token};
use crate::{Database, Result};
use super::{Question, User};

/// A reply to a [`Question`], optionally nested under another reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
    pub body: String,
    pub question_id: i64,
    pub parent_id: Option<i64>,
    pub user_id: i64,
}

impl Reply {
    /// Create an unpersisted reply
    pub fn new(body: impl Into<String>, question_id: i64, parent_id: Option<i64>, user_id: i64) -> Self {
        Self {
            id: None,
            body: body.into(),
            question_id,
            parent_id,
            user_id,
        }
    }

    pub fn find_by_user_id(db: &Database, user_id: i64) -> Result<Vec<Reply>> {
        db.query_records("SELECT * FROM replies WHERE user_id = ?1", [user_id])
    }

    pub fn find_by_question_id(db: &Database, question_id: i64) -> Result<Vec<Reply>> {
        db.query_records("SELECT * FROM replies WHERE question_id = ?1", [question_id])
    }

    /// Insert this reply. Same insert-only contract as [`Record::save`].
    pub fn create(&mut self, db: &Database) -> Result<i64> {
        ensure_unpersisted(&*self)?;
        let id = db.insert(
            "INSERT INTO replies (body, question_id, parent_id, user_id) VALUES (?1, ?2, ?3, ?4)",
            params![self.body, self.question_id, self.parent_id, self.user_id],
        )?;
        self.id = Some(id);
        Ok(id)
    }

    pub fn author(&self, db: &Database) -> Result<Option<User>> {
        User::find_by_id(db, self.user_id)
    }

    pub fn question(&self, db: &Database) -> Result<Option<Question>> {
        Question::find_by_id(db, self.question_id)
    }

    /// The reply this one is nested under; `None` for top-level replies or a
    /// dangling parent reference
    pub fn parent_reply(&self, db: &Database) -> Result<Option<Reply>> {
        match self.parent_id {
            Some(parent_id) => Reply::find_by_id(db, parent_id),
            None => Ok(None),
        }
    }

    /// Direct children only
    pub fn child_replies(&self, db: &Database) -> Result<Vec<Reply>> {
        db.query_records("SELECT * FROM replies WHERE parent_id = ?1", [self.id])
    }

    /// Parent chain, nearest first, ending at a top-level reply.
    ///
    /// Stops early at a dangling parent or when a reply repeats.
    pub fn ancestors(&self, db: &Database) -> Result<Vec<Reply>> {
        let mut visited: HashSet<i64> = self.id.into_iter().collect();
        let mut chain = Vec::new();
        let mut next = self.parent_id;

        while let Some(parent_id) = next {
            if !visited.insert(parent_id) {
                warn!(reply_id = ?self.id, parent_id, "Reply parent chain contains a cycle");
                break;
            }
            let Some(parent) = Reply::find_by_id(db, parent_id)? else {
                break;
            };
            next = parent.parent_id;
            chain.push(parent);
        }

        Ok(chain)
    }
}

impl Record for Reply {
    const TABLE: &'static str = "replies";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn assign_id(&mut self, id: i64, _: Token) {
        self.id = Some(id);
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Reply {
            id: Some(row.get("id")?),
            body: row.get("body")?,
            question_id: row.get("question_id")?,
            parent_id: row.get("parent_id")?,
            user_id: row.get("user_id")?,
        })
    }

    fn columns(&self) -> Vec<(&'static str, &dyn ToSql)> {
        vec![
            ("body", &self.body),
            ("question_id", &self.question_id),
            ("parent_id", &self.parent_id),
            ("user_id", &self.user_id),
        ]
    }
}
