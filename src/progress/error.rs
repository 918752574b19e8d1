use thiserror::Error;

use crate::domain::{LessonId, QuizId, UserId};

/// Failures of the completion and grading operations.
///
/// None of these leave partial state behind: the enclosing transaction is
/// rolled back before the error reaches the caller.
#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("Lesson not found: {0}")]
    LessonNotFound(LessonId),

    #[error("Quiz not found: {0}")]
    QuizNotFound(QuizId),

    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("No questions available for this quiz")]
    NoQuestionsAvailable(QuizId),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}
