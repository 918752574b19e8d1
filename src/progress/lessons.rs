//! Completion tracker for lessons

use chrono::Utc;
use rusqlite::TransactionBehavior;
use serde::Serialize;
use tracing::{debug, info};

use super::{Ledger, ProgressEngine, ProgressError};
use crate::domain::{LessonId, UserId};
use crate::store::query_lesson;

/// Response to a lesson completion request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LessonOutcome {
    /// `false` when the lesson had already been completed
    pub success: bool,
    pub message: String,
    /// The user's XP total after this request
    pub xp: u32,
}

impl ProgressEngine {
    /// Mark a lesson as completed by a user.
    ///
    /// The first completion inserts a `user_lessons` row and credits
    /// `xp_reward`. Any later call is a no-op reporting `success = false`
    /// and the unchanged total.
    pub fn complete_lesson(
        &self,
        user_id: UserId,
        lesson_id: LessonId,
    ) -> Result<LessonOutcome, ProgressError> {
        let mut conn = self.db.conn();
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let lesson = query_lesson(&tx, lesson_id)?.ok_or(ProgressError::LessonNotFound(lesson_id))?;
        let current_xp =
            Ledger::total_xp(&tx, user_id)?.ok_or(ProgressError::UserNotFound(user_id))?;

        let inserted = tx.execute(
            r#"INSERT INTO user_lessons (user_id, lesson_id, xp_earned, completed_at)
               VALUES (?1, ?2, ?3, ?4)
               ON CONFLICT(user_id, lesson_id) DO NOTHING"#,
            (user_id, lesson_id, lesson.xp_reward, Utc::now().timestamp_millis()),
        )?;

        if inserted == 0 {
            debug!(
                "[ecoquest:progress] User #{} already completed lesson #{}",
                user_id, lesson_id
            );
            return Ok(LessonOutcome {
                success: false,
                message: "Lesson already completed".to_string(),
                xp: current_xp,
            });
        }

        let new_total = Ledger::credit(&tx, user_id, lesson.xp_reward)?;
        tx.commit()?;

        info!(
            "[ecoquest:progress] User #{} completed lesson #{} (+{} XP, total {})",
            user_id, lesson_id, lesson.xp_reward, new_total
        );
        Ok(LessonOutcome {
            success: true,
            message: format!("You earned {} XP!", lesson.xp_reward),
            xp: new_total,
        })
    }
}
