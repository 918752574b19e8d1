//! Users, login sessions and per-user progress reads

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{OptionalExtension, Row};
use tracing::info;
use uuid::Uuid;

use super::StoreDb;
use crate::domain::{LessonCompletion, LessonId, QuizScore, User, UserId};

fn user_from_row(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get("id")?,
        username: row.get("username")?,
        email: row.get("email")?,
        total_xp: row.get("total_xp")?,
        created_at: row.get("created_at")?,
    })
}

impl StoreDb {
    /// Register a user with zero XP
    pub fn insert_user(&self, username: &str, email: &str) -> Result<User> {
        let now = Utc::now().timestamp_millis();
        let conn = self.conn();
        conn.execute(
            "INSERT INTO users (username, email, total_xp, created_at) VALUES (?1, ?2, 0, ?3)",
            (username, email, now),
        )
        .with_context(|| format!("Failed to add user '{username}'"))?;

        let id = conn.last_insert_rowid();
        info!("[ecoquest:store] User {} has been added (#{})", username, id);
        Ok(User {
            id,
            username: username.to_string(),
            email: email.to_string(),
            total_xp: 0,
            created_at: now,
        })
    }

    pub fn user(&self, id: UserId) -> Result<Option<User>> {
        let conn = self.conn();
        let user = conn
            .query_row("SELECT * FROM users WHERE id = ?1", [id], user_from_row)
            .optional()?;
        Ok(user)
    }

    pub fn user_by_name(&self, username: &str) -> Result<Option<User>> {
        let conn = self.conn();
        let user = conn
            .query_row("SELECT * FROM users WHERE username = ?1", [username], user_from_row)
            .optional()?;
        Ok(user)
    }

    /// Issue a new session token for a user
    pub fn create_session(&self, user_id: UserId) -> Result<String> {
        let token = Uuid::new_v4().to_string();
        let conn = self.conn();
        conn.execute(
            "INSERT INTO sessions (token, user_id, created_at) VALUES (?1, ?2, ?3)",
            (&token, user_id, Utc::now().timestamp_millis()),
        )
        .with_context(|| format!("Failed to create session for user #{user_id}"))?;
        Ok(token)
    }

    /// Resolve a session token to its user
    pub fn session_user(&self, token: &str) -> Result<Option<UserId>> {
        let conn = self.conn();
        let user_id = conn
            .query_row("SELECT user_id FROM sessions WHERE token = ?1", [token], |r| r.get(0))
            .optional()?;
        Ok(user_id)
    }

    pub fn has_completed_lesson(&self, user_id: UserId, lesson_id: LessonId) -> Result<bool> {
        let conn = self.conn();
        let exists = conn
            .prepare("SELECT 1 FROM user_lessons WHERE user_id = ?1 AND lesson_id = ?2")?
            .exists((user_id, lesson_id))?;
        Ok(exists)
    }

    /// Completed lessons of a user, most recent first
    pub fn lesson_completions(&self, user_id: UserId) -> Result<Vec<LessonCompletion>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT user_id, lesson_id, xp_earned, completed_at FROM user_lessons
             WHERE user_id = ?1 ORDER BY completed_at DESC, id DESC",
        )?;
        let completions = stmt
            .query_map([user_id], |row| {
                Ok(LessonCompletion {
                    user_id: row.get("user_id")?,
                    lesson_id: row.get("lesson_id")?,
                    xp_earned: row.get("xp_earned")?,
                    completed_at: row.get("completed_at")?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(completions)
    }

    /// First-attempt quiz scores of a user, most recent first
    pub fn quiz_scores(&self, user_id: UserId) -> Result<Vec<QuizScore>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT user_id, quiz_id, score, xp_earned, completed_at FROM user_scores
             WHERE user_id = ?1 ORDER BY completed_at DESC, id DESC",
        )?;
        let scores = stmt
            .query_map([user_id], |row| {
                Ok(QuizScore {
                    user_id: row.get("user_id")?,
                    quiz_id: row.get("quiz_id")?,
                    score: row.get("score")?,
                    xp_earned: row.get("xp_earned")?,
                    completed_at: row.get("completed_at")?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(scores)
    }
}
