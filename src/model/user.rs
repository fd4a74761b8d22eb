//! Forum members

use rusqlite::{params, Row};
use rusqlite::types::ToSql;
use serde::{Deserialize, Serialize};
use crate::record::{ensure_unpersisted, Record, Token};
use crate::{Database, Result};
use super::{Question, QuestionFollow, QuestionLike, Reply};

/// A forum member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
    pub fname: String,
    pub lname: String,
}

impl User {
    /// Create an unpersisted user
    pub fn new(fname: impl Into<String>, lname: impl Into<String>) -> Self {
        Self {
            id: None,
            fname: fname.into(),
            lname: lname.into(),
        }
    }

    /// Users with exactly this first and last name
    pub fn find_by_name(db: &Database, fname: &str, lname: &str) -> Result<Vec<User>> {
        db.query_records(
            "SELECT * FROM users WHERE fname = ?1 AND lname = ?2",
            [fname, lname],
        )
    }

    /// Insert this user. Same insert-only contract as [`Record::save`].
    pub fn create(&mut self, db: &Database) -> Result<i64> {
        ensure_unpersisted(&*self)?;
        let id = db.insert(
            "INSERT INTO users (fname, lname) VALUES (?1, ?2)",
            params![self.fname, self.lname],
        )?;
        self.id = Some(id);
        Ok(id)
    }

    pub fn authored_questions(&self, db: &Database) -> Result<Vec<Question>> {
        match self.id {
            Some(id) => Question::find_by_author_id(db, id),
            None => Ok(Vec::new()),
        }
    }

    pub fn authored_replies(&self, db: &Database) -> Result<Vec<Reply>> {
        match self.id {
            Some(id) => Reply::find_by_user_id(db, id),
            None => Ok(Vec::new()),
        }
    }

    pub fn followed_questions(&self, db: &Database) -> Result<Vec<Question>> {
        match self.id {
            Some(id) => QuestionFollow::followed_questions_for_user_id(db, id),
            None => Ok(Vec::new()),
        }
    }

    pub fn liked_questions(&self, db: &Database) -> Result<Vec<Question>> {
        match self.id {
            Some(id) => QuestionLike::liked_questions_for_user_id(db, id),
            None => Ok(Vec::new()),
        }
    }

    /// Likes received across the user's questions, divided by the number of
    /// questions they authored. `0.0` when they authored none.
    pub fn average_karma(&self, db: &Database) -> Result<f64> {
        let Some(id) = self.id else {
            return Ok(0.0);
        };

        let (likes, questions): (i64, i64) = db.connection().query_row(
            "SELECT COUNT(question_likes.id), COUNT(DISTINCT questions.id)
             FROM questions
             LEFT JOIN question_likes ON question_likes.question_id = questions.id
             WHERE questions.author_id = ?1",
            [id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        if questions == 0 {
            return Ok(0.0);
        }
        Ok(likes as f64 / questions as f64)
    }
}

impl Record for User {
    const TABLE: &'static str = "users";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn assign_id(&mut self, id: i64, _: Token) {
        self.id = Some(id);
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(User {
            id: Some(row.get("id")?),
            fname: row.get("fname")?,
            lname: row.get("lname")?,
        })
    }

    fn columns(&self) -> Vec<(&'static str, &dyn ToSql)> {
        vec![("fname", &self.fname), ("lname", &self.lname)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::model::fixtures;

    #[test]
    fn test_create_assigns_id() {
        let db = Database::open_in_memory().unwrap();
        let mut user = User::new("Ada", "Lovelace");
        let k = user.create(&db).unwrap();

        assert_eq!(user.id(), Some(k));
        assert_eq!(User::find_by_id(&db, k).unwrap(), Some(user.clone()));
        assert_eq!(User::all(&db).unwrap(), vec![user]);
    }

    #[test]
    fn test_create_twice_fails() {
        let db = Database::open_in_memory().unwrap();
        let mut user = User::new("Ada", "Lovelace");
        user.create(&db).unwrap();

        assert!(matches!(user.create(&db), Err(Error::AlreadyPersisted { .. })));
        assert_eq!(User::count(&db).unwrap(), 1);
    }

    #[test]
    fn test_find_by_name() {
        let db = Database::open_in_memory().unwrap();
        let ada = fixtures::user(&db, "Ada", "Lovelace");
        fixtures::user(&db, "Ada", "Byron");
        fixtures::user(&db, "Alan", "Turing");

        assert_eq!(User::find_by_name(&db, "Ada", "Lovelace").unwrap(), vec![ada]);
        assert!(User::find_by_name(&db, "ada", "lovelace").unwrap().is_empty());
    }

    #[test]
    fn test_authored_content() {
        let db = Database::open_in_memory().unwrap();
        let ada = fixtures::user(&db, "Ada", "Lovelace");
        let alan = fixtures::user(&db, "Alan", "Turing");
        let q1 = fixtures::question(&db, &ada, "Engines");
        fixtures::question(&db, &alan, "Machines");
        let reply = fixtures::reply(&db, &q1, None, &alan, "Analytical?");

        assert_eq!(ada.authored_questions(&db).unwrap(), vec![q1]);
        assert!(ada.authored_replies(&db).unwrap().is_empty());
        assert_eq!(alan.authored_replies(&db).unwrap(), vec![reply]);
    }

    #[test]
    fn test_followed_and_liked_questions() {
        let db = Database::open_in_memory().unwrap();
        let ada = fixtures::user(&db, "Ada", "Lovelace");
        let alan = fixtures::user(&db, "Alan", "Turing");
        let q1 = fixtures::question(&db, &ada, "Engines");
        let q2 = fixtures::question(&db, &ada, "Looms");

        fixtures::follow(&db, &q1, &alan);
        fixtures::like(&db, &q2, &alan);

        assert_eq!(alan.followed_questions(&db).unwrap(), vec![q1]);
        assert_eq!(alan.liked_questions(&db).unwrap(), vec![q2]);
        assert!(ada.followed_questions(&db).unwrap().is_empty());
    }

    #[test]
    fn test_average_karma() {
        let db = Database::open_in_memory().unwrap();
        let ada = fixtures::user(&db, "Ada", "Lovelace");
        let fans: Vec<User> = (0..3).map(|i| fixtures::user(&db, "Fan", &i.to_string())).collect();
        let q1 = fixtures::question(&db, &ada, "Engines");
        fixtures::question(&db, &ada, "Looms");

        for fan in &fans {
            fixtures::like(&db, &q1, fan);
        }

        assert!((ada.average_karma(&db).unwrap() - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_average_karma_without_questions_is_zero() {
        let db = Database::open_in_memory().unwrap();
        let lurker = fixtures::user(&db, "Quiet", "Reader");
        assert_eq!(lurker.average_karma(&db).unwrap(), 0.0);
        assert_eq!(User::new("Not", "Saved").average_karma(&db).unwrap(), 0.0);
    }

    #[test]
    fn test_serialize_skips_unset_id() {
        let user = User::new("Ada", "Lovelace");
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json, serde_json::json!({ "fname": "Ada", "lname": "Lovelace" }));

        let back: User = serde_json::from_value(serde_json::json!({
            "id": 7, "fname": "Ada", "lname": "Lovelace"
        }))
        .unwrap();
        assert!(!back.is_persisted());
    }
}
