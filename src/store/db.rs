//! SQLite connection and schema management
//!
//! Uniqueness of completion records is enforced here, by the schema, so that
//! every server process sharing the file sees the same guarantee.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::debug;

/// Current schema version written to `schema_version`
const SCHEMA_VERSION: i32 = 1;

/// How long a writer waits for another process' lock before failing
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Shared handle to the EcoQuest database
#[derive(Clone)]
pub struct StoreDb {
    pub(crate) conn: Arc<Mutex<Connection>>,
}

impl StoreDb {
    /// Open or create the database at a specific path
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create database dir: {}", parent.display())
                })?;
            }
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.busy_timeout(BUSY_TIMEOUT)?;

        // WAL lets several server processes read while one writes
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;

        debug!("[ecoquest:store] Opened database at {}", path.display());
        Self::from_connection(conn)
    }

    /// Open a private in-memory database (tests, dry runs)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.init_schema()?;
        Ok(db)
    }

    /// Lock the connection.
    ///
    /// A poisoned lock is recovered: every write runs in a transaction, so a
    /// panicking holder leaves nothing half-applied.
    pub fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Stored schema version
    pub fn schema_version(&self) -> Result<i32> {
        let conn = self.conn();
        let version = conn.query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |r| r.get(0),
        )?;
        Ok(version)
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.conn();
        conn.execute_batch(SCHEMA_SQL)
            .context("Failed to initialize database schema")?;
        conn.execute(
            "INSERT OR IGNORE INTO schema_version VALUES (?1)",
            [SCHEMA_VERSION],
        )?;
        Ok(())
    }
}

/// SQL schema for the EcoQuest database
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    email TEXT NOT NULL UNIQUE,
    total_xp INTEGER NOT NULL DEFAULT 0 CHECK (total_xp >= 0),
    created_at INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS quizzes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    topic_name TEXT NOT NULL,
    description TEXT
);

CREATE TABLE IF NOT EXISTS questions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    quiz_id INTEGER NOT NULL REFERENCES quizzes(id),
    question_text TEXT NOT NULL,
    option_a TEXT NOT NULL,
    option_b TEXT NOT NULL,
    option_c TEXT NOT NULL,
    option_d TEXT NOT NULL,
    correct_answer TEXT NOT NULL CHECK (correct_answer IN ('a', 'b', 'c', 'd')),
    position INTEGER NOT NULL DEFAULT 0
);
CREATE INDEX IF NOT EXISTS idx_questions_quiz ON questions(quiz_id, position);

CREATE TABLE IF NOT EXISTS lessons (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    topic TEXT NOT NULL,
    content TEXT NOT NULL,
    xp_reward INTEGER NOT NULL DEFAULT 10 CHECK (xp_reward > 0),
    quiz_id INTEGER REFERENCES quizzes(id),
    created_at INTEGER NOT NULL
);

-- One completion per (user, lesson)
CREATE TABLE IF NOT EXISTS user_lessons (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id),
    lesson_id INTEGER NOT NULL REFERENCES lessons(id),
    xp_earned INTEGER NOT NULL,
    completed_at INTEGER NOT NULL,
    UNIQUE (user_id, lesson_id)
);

-- One first-attempt score per (user, quiz)
CREATE TABLE IF NOT EXISTS user_scores (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id),
    quiz_id INTEGER NOT NULL REFERENCES quizzes(id),
    score INTEGER NOT NULL,
    xp_earned INTEGER NOT NULL,
    completed_at INTEGER NOT NULL,
    UNIQUE (user_id, quiz_id)
);

-- Badges: not populated by any rule yet
CREATE TABLE IF NOT EXISTS achievements (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT,
    icon TEXT
);

CREATE TABLE IF NOT EXISTS user_achievements (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id),
    achievement_id INTEGER NOT NULL REFERENCES achievements(id),
    earned_at INTEGER NOT NULL
);

-- Login sessions issued by the CLI
CREATE TABLE IF NOT EXISTS sessions (
    token TEXT PRIMARY KEY,
    user_id INTEGER NOT NULL REFERENCES users(id),
    created_at INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS schema_version (version INTEGER PRIMARY KEY);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_and_init() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test_ecoquest.db");
        let db = StoreDb::open(&db_path).unwrap();

        let conn = db.conn();
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table'")
            .unwrap();
        let tables: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        for table in [
            "users",
            "lessons",
            "quizzes",
            "questions",
            "user_lessons",
            "user_scores",
            "achievements",
            "user_achievements",
            "sessions",
        ] {
            assert!(tables.contains(&table.to_string()), "missing table {table}");
        }
    }

    #[test]
    fn test_reopen_keeps_schema_version() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test_ecoquest.db");
        StoreDb::open(&db_path).unwrap();

        let db = StoreDb::open(&db_path).unwrap();
        assert_eq!(db.schema_version().unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn test_duplicate_completion_rejected_by_schema() {
        let db = StoreDb::open_in_memory().unwrap();
        let conn = db.conn();
        conn.execute_batch(
            "INSERT INTO users (username, email, created_at) VALUES ('u', 'u@x', 0);
             INSERT INTO lessons (title, topic, content, created_at) VALUES ('t', 'water', 'c', 0);
             INSERT INTO user_lessons (user_id, lesson_id, xp_earned, completed_at) VALUES (1, 1, 10, 0);",
        )
        .unwrap();

        let second = conn.execute(
            "INSERT INTO user_lessons (user_id, lesson_id, xp_earned, completed_at) VALUES (1, 1, 10, 0)",
            [],
        );
        assert!(second.is_err());
    }
}
