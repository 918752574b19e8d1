//! SQLite data store for EcoQuest
//!
//! Holds users, lessons, quizzes, questions and the completion records
//! (`user_lessons`, `user_scores`) in a single database file
//! (`~/.ecoquest/ecoquest.db` by default).
//!
//! # Usage
//!
//! ```ignore
//! let db = StoreDb::open(&config.database_path())?;
//! let lesson = db.lesson(1)?;
//! let user = db.insert_user("ana", "ana@example.org")?;
//! ```
//!
//! Reward rules live in [`crate::progress`]; this module only stores rows.

mod catalog;
mod db;
mod users;

pub use catalog::{NewLesson, NewQuestion};
pub use db::StoreDb;

pub(crate) use catalog::{query_lesson, query_questions, query_quiz};
