//! Shared test utilities for EcoQuest integration tests

#![allow(dead_code)]

use std::path::PathBuf;

use tempfile::TempDir;

use ecoquest::seed::seed_sample_data;
use ecoquest::store::{NewLesson, NewQuestion, StoreDb};
use ecoquest::{AnswerOption, LessonId, QuestionId, QuizId, User};

/// A seeded database file in a temporary directory
pub struct TestStore {
    pub dir: TempDir,
    pub path: PathBuf,
    pub db: StoreDb,
}

impl TestStore {
    /// Open another, independent connection to the same file
    pub fn reopen(&self) -> StoreDb {
        StoreDb::open(&self.path).expect("Failed to reopen test database")
    }
}

/// Creates a temporary database holding the sample catalog
pub fn create_test_store() -> TestStore {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("ecoquest.db");
    let db = StoreDb::open(&path).expect("Failed to open test database");
    seed_sample_data(&db).expect("Failed to seed test database");
    TestStore { dir, path, db }
}

/// Adds a user with a unique name
pub fn add_user(db: &StoreDb, name: &str) -> User {
    db.insert_user(name, &format!("{name}@example.org"))
        .expect("Failed to add user")
}

/// Adds a lesson worth `xp_reward` without a quiz
pub fn add_lesson(db: &StoreDb, xp_reward: u32) -> LessonId {
    db.insert_lesson(&NewLesson {
        title: format!("Lesson worth {xp_reward}"),
        topic: "water".to_string(),
        content: "Turn off the tap while brushing".to_string(),
        xp_reward,
        quiz_id: None,
    })
    .expect("Failed to add lesson")
}

/// Adds a quiz whose questions have the given correct answers
pub fn add_quiz(db: &StoreDb, correct: &[AnswerOption]) -> (QuizId, Vec<QuestionId>) {
    let quiz_id = db.insert_quiz("Test quiz", None).expect("Failed to add quiz");
    let ids = correct
        .iter()
        .enumerate()
        .map(|(i, answer)| {
            db.insert_question(
                quiz_id,
                &NewQuestion {
                    question_text: format!("Question {}", i + 1),
                    options: ["w".into(), "x".into(), "y".into(), "z".into()],
                    correct_answer: *answer,
                },
            )
            .expect("Failed to add question")
        })
        .collect();
    (quiz_id, ids)
}

/// Count rows of `table` for a (user, column = id) pair
pub fn count_rows(db: &StoreDb, table: &str, user_id: i64, column: &str, id: i64) -> i64 {
    db.conn()
        .query_row(
            &format!("SELECT COUNT(*) FROM {table} WHERE user_id = ?1 AND {column} = ?2"),
            (user_id, id),
            |r| r.get(0),
        )
        .expect("Failed to count rows")
}
