//! User likes question

use rusqlite::{params, Row};
use rusqlite::types::ToSql;
use serde::{Deserialize, Serialize};
use crate::record::{ensure_unpersisted, Record, Token};
use crate::{Database, Result};
use super::{Question, User};

/// A user liking a question. The pair is not enforced unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionLike {
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
    pub question_id: i64,
    pub user_id: i64,
}

impl QuestionLike {
    pub fn new(question_id: i64, user_id: i64) -> Self {
        Self { id: None, question_id, user_id }
    }

    /// Insert this like. Same insert-only contract as [`Record::save`].
    pub fn create(&mut self, db: &Database) -> Result<i64> {
        ensure_unpersisted(&*self)?;
        let id = db.insert(
            "INSERT INTO question_likes (user_id, question_id) VALUES (?1, ?2)",
            params![self.user_id, self.question_id],
        )?;
        self.id = Some(id);
        Ok(id)
    }

    pub fn likers_for_question_id(db: &Database, question_id: i64) -> Result<Vec<User>> {
        db.query_records(
            "SELECT users.*
             FROM question_likes
             JOIN users ON question_likes.user_id = users.id
             WHERE question_likes.question_id = ?1
             ORDER BY question_likes.id",
            [question_id],
        )
    }

    /// Like rows for the question, `0` when there are none
    pub fn num_likes_for_question_id(db: &Database, question_id: i64) -> Result<i64> {
        db.query_scalar(
            "SELECT COUNT(*) FROM question_likes WHERE question_id = ?1",
            [question_id],
        )
    }

    pub fn liked_questions_for_user_id(db: &Database, user_id: i64) -> Result<Vec<Question>> {
        db.query_records(
            "SELECT questions.*
             FROM question_likes
             JOIN questions ON question_likes.question_id = questions.id
             WHERE question_likes.user_id = ?1
             ORDER BY question_likes.id",
            [user_id],
        )
    }

    /// Questions ranked by like count, ties by ascending question id.
    /// Questions nobody likes are never returned.
    pub fn most_liked_questions(db: &Database, n: usize) -> Result<Vec<Question>> {
        db.query_records(
            "SELECT questions.*
             FROM question_likes
             JOIN questions ON question_likes.question_id = questions.id
             GROUP BY questions.id
             ORDER BY COUNT(*) DESC, questions.id ASC
             LIMIT ?1",
            [n as i64],
        )
    }
}

impl Record for QuestionLike {
    const TABLE: &'static str = "question_likes";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn assign_id(&mut self, id: i64, _: Token) {
        self.id = Some(id);
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(QuestionLike {
            id: Some(row.get("id")?),
            question_id: row.get("question_id")?,
            user_id: row.get("user_id")?,
        })
    }

    fn columns(&self) -> Vec<(&'static str, &dyn ToSql)> {
        vec![("question_id", &self.question_id), ("user_id", &self.user_id)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::model::fixtures;

    #[test]
    fn test_create_binds_user_and_question() {
        let db = Database::open_in_memory().unwrap();
        let ada = fixtures::user(&db, "Ada", "Lovelace");
        let alan = fixtures::user(&db, "Alan", "Turing");
        let question = fixtures::question(&db, &ada, "Engines");

        let mut like = QuestionLike::new(question.id().unwrap(), alan.id().unwrap());
        let id = like.create(&db).unwrap();

        let stored = QuestionLike::find_by_id(&db, id).unwrap().unwrap();
        assert_eq!(stored.question_id, question.id().unwrap());
        assert_eq!(stored.user_id, alan.id().unwrap());
        assert_eq!(QuestionLike::likers_for_question_id(&db, question.id().unwrap()).unwrap(), vec![alan]);
    }

    #[test]
    fn test_update_requires_id() {
        let db = Database::open_in_memory().unwrap();
        let like = QuestionLike::new(1, 1);
        assert!(matches!(like.update(&db), Err(Error::NotPersisted { table: "question_likes" })));
        assert_eq!(QuestionLike::count(&db).unwrap(), 0);
    }

    #[test]
    fn test_duplicate_likes_are_counted() {
        let db = Database::open_in_memory().unwrap();
        let ada = fixtures::user(&db, "Ada", "Lovelace");
        let question = fixtures::question(&db, &ada, "Engines");
        fixtures::like(&db, &question, &ada);
        fixtures::like(&db, &question, &ada);

        assert_eq!(QuestionLike::num_likes_for_question_id(&db, question.id().unwrap()).unwrap(), 2);
        assert_eq!(ada.liked_questions(&db).unwrap().len(), 2);
    }

    #[test]
    fn test_most_liked_limit() {
        let db = Database::open_in_memory().unwrap();
        let ada = fixtures::user(&db, "Ada", "Lovelace");
        let q1 = fixtures::question(&db, &ada, "one");
        let q2 = fixtures::question(&db, &ada, "two");
        fixtures::like(&db, &q1, &ada);
        fixtures::like(&db, &q2, &ada);
        fixtures::like(&db, &q2, &ada);

        assert_eq!(QuestionLike::most_liked_questions(&db, 1).unwrap(), vec![q2]);
        assert!(QuestionLike::most_liked_questions(&db, 0).unwrap().is_empty());
    }
}
