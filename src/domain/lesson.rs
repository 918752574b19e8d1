use serde::{Deserialize, Serialize};

use super::{QuizId, UserId};

/// Unique identifier for a lesson
pub type LessonId = i64;

/// A readable lesson with a fixed XP reward
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: LessonId,
    pub title: String,
    /// Category key (e.g. "recycling", "climate")
    pub topic: String,
    pub content: String,
    pub xp_reward: u32,
    /// Follow-up quiz, if the lesson has one
    pub quiz_id: Option<QuizId>,
    pub created_at: i64,
}

/// Marks that a user finished a lesson. At most one per (user, lesson).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonCompletion {
    pub user_id: UserId,
    pub lesson_id: LessonId,
    pub xp_earned: u32,
    pub completed_at: i64,
}
