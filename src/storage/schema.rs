//! Database schema definitions
//!
//! Production files are provisioned externally; these statements back
//! in-memory databases and [`Database::create_schema`](super::Database::create_schema).

/// SQL to create the users table
pub const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY,
    fname TEXT NOT NULL,
    lname TEXT NOT NULL
)
"#;

/// SQL to create the questions table
pub const CREATE_QUESTIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS questions (
    id INTEGER PRIMARY KEY,
    title TEXT NOT NULL,
    body TEXT NOT NULL,
    author_id INTEGER NOT NULL REFERENCES users(id)
)
"#;

/// SQL to create the question_follows table
pub const CREATE_QUESTION_FOLLOWS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS question_follows (
    id INTEGER PRIMARY KEY,
    question_id INTEGER NOT NULL REFERENCES questions(id),
    user_id INTEGER NOT NULL REFERENCES users(id)
)
"#;

/// SQL to create the replies table
/// `parent_id` is NULL for top-level replies
pub const CREATE_REPLIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS replies (
    id INTEGER PRIMARY KEY,
    body TEXT NOT NULL,
    question_id INTEGER NOT NULL REFERENCES questions(id),
    parent_id INTEGER REFERENCES replies(id),
    user_id INTEGER NOT NULL REFERENCES users(id)
)
"#;

/// SQL to create the question_likes table
pub const CREATE_QUESTION_LIKES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS question_likes (
    id INTEGER PRIMARY KEY,
    question_id INTEGER NOT NULL REFERENCES questions(id),
    user_id INTEGER NOT NULL REFERENCES users(id)
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_questions_author ON questions(author_id)",
    "CREATE INDEX IF NOT EXISTS idx_users_name ON users(fname, lname)",
    "CREATE INDEX IF NOT EXISTS idx_replies_question ON replies(question_id)",
    "CREATE INDEX IF NOT EXISTS idx_replies_parent ON replies(parent_id)",
    "CREATE INDEX IF NOT EXISTS idx_replies_user ON replies(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_follows_question ON question_follows(question_id)",
    "CREATE INDEX IF NOT EXISTS idx_follows_user ON question_follows(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_likes_question ON question_likes(question_id)",
    "CREATE INDEX IF NOT EXISTS idx_likes_user ON question_likes(user_id)",
];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![
        CREATE_USERS_TABLE,
        CREATE_QUESTIONS_TABLE,
        CREATE_QUESTION_FOLLOWS_TABLE,
        CREATE_REPLIES_TABLE,
        CREATE_QUESTION_LIKES_TABLE,
    ];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
