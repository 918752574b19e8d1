//! Completion and reward rules
//!
//! Two flows share one shape: look up the entity, try to insert the
//! per-(user, entity) completion row, and credit XP only when that insert
//! actually created a row. Both run inside an IMMEDIATE transaction, and the
//! store's UNIQUE constraints make the insert the single arbiter of "first",
//! even across server processes.
//!
//! ```text
//! complete_lesson ──┐                 ┌── user_lessons  (UNIQUE user, lesson)
//!                   ├── transaction ──┤
//! submit_quiz ──────┘                 ├── user_scores   (UNIQUE user, quiz)
//!                                     └── users.total_xp (Ledger::credit)
//! ```

mod error;
mod grader;
mod ledger;
mod lessons;
mod quizzes;

pub use error::ProgressError;
pub use grader::{grade, percentage, Answers, Grade, XP_PER_CORRECT_ANSWER};
pub use ledger::Ledger;
pub use lessons::LessonOutcome;
pub use quizzes::GradeResult;

use crate::store::StoreDb;

/// Entry point for the completion tracker and quiz grader
#[derive(Clone)]
pub struct ProgressEngine {
    db: StoreDb,
}

impl ProgressEngine {
    pub fn new(db: StoreDb) -> Self {
        Self { db }
    }
}
