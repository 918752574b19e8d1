//! Core domain types for EcoQuest

mod lesson;
mod quiz;
mod user;

pub use lesson::{Lesson, LessonCompletion, LessonId};
pub use quiz::{AnswerOption, Question, QuestionId, Quiz, QuizId, QuizScore};
pub use user::{User, UserId};
