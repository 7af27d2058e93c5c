//! Table definitions, applied idempotently when the store is opened.

/// Categories table. `type` is quoted because it is a keyword in many dialects.
pub const CREATE_CATEGORIES: &str = r#"CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    "type" TEXT NOT NULL CHECK (length("type") > 0)
)"#;

/// Questions table. AUTOINCREMENT keeps deleted ids from being reissued.
pub const CREATE_QUESTIONS: &str = r#"CREATE TABLE IF NOT EXISTS questions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    question TEXT NOT NULL CHECK (length(question) > 0),
    answer TEXT NOT NULL CHECK (length(answer) > 0),
    category INTEGER NOT NULL,
    difficulty INTEGER NOT NULL
)"#;

pub const CREATE_CATEGORY_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_questions_category ON questions (category)";

/// All bootstrap statements in execution order
pub const STATEMENTS: &[&str] = &[CREATE_CATEGORIES, CREATE_QUESTIONS, CREATE_CATEGORY_INDEX];
