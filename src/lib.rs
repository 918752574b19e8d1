//! EcoQuest - environmental lessons and quizzes with XP rewards
//!
//! Learners read lessons and take quizzes; each distinct lesson or quiz
//! rewards experience points exactly once.
//!
//! ## Layers
//!
//! - [`store`]: SQLite schema and row access
//! - [`progress`]: completion tracking, quiz grading and the XP ledger
//! - [`server`]: JSON HTTP API with session authentication
//! - [`config`]: TOML configuration (`~/.ecoquest/config.toml`)

pub mod config;
pub mod domain;
pub mod progress;
pub mod seed;
pub mod server;
pub mod store;

pub use domain::*;
