//! Lessons, quizzes and questions
//!
//! Catalog rows are administered outside the reward rules (seeding, CLI);
//! the progress engine only reads them.

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{Connection, OptionalExtension, Row};
use tracing::debug;

use super::StoreDb;
use crate::domain::{AnswerOption, Lesson, LessonId, Question, QuestionId, Quiz, QuizId};

impl ToSql for AnswerOption {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for AnswerOption {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let label = value.as_str()?;
        AnswerOption::from_label(label)
            .ok_or_else(|| FromSqlError::Other(format!("invalid answer label: {label:?}").into()))
    }
}

/// Lesson to be inserted
#[derive(Debug, Clone)]
pub struct NewLesson {
    pub title: String,
    pub topic: String,
    pub content: String,
    pub xp_reward: u32,
    pub quiz_id: Option<QuizId>,
}

/// Question to be inserted
#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub question_text: String,
    pub options: [String; 4],
    pub correct_answer: AnswerOption,
}

const LESSON_COLUMNS: &str = "id, title, topic, content, xp_reward, quiz_id, created_at";

const QUESTION_COLUMNS: &str =
    "id, quiz_id, question_text, option_a, option_b, option_c, option_d, correct_answer";

fn lesson_from_row(row: &Row) -> rusqlite::Result<Lesson> {
    Ok(Lesson {
        id: row.get("id")?,
        title: row.get("title")?,
        topic: row.get("topic")?,
        content: row.get("content")?,
        xp_reward: row.get("xp_reward")?,
        quiz_id: row.get("quiz_id")?,
        created_at: row.get("created_at")?,
    })
}

fn question_from_row(row: &Row) -> rusqlite::Result<Question> {
    Ok(Question {
        id: row.get("id")?,
        quiz_id: row.get("quiz_id")?,
        question_text: row.get("question_text")?,
        option_a: row.get("option_a")?,
        option_b: row.get("option_b")?,
        option_c: row.get("option_c")?,
        option_d: row.get("option_d")?,
        correct_answer: row.get("correct_answer")?,
    })
}

pub(crate) fn query_lesson(conn: &Connection, id: LessonId) -> rusqlite::Result<Option<Lesson>> {
    conn.query_row(
        &format!("SELECT {LESSON_COLUMNS} FROM lessons WHERE id = ?1"),
        [id],
        lesson_from_row,
    )
    .optional()
}

pub(crate) fn query_quiz(conn: &Connection, id: QuizId) -> rusqlite::Result<Option<Quiz>> {
    conn.query_row(
        "SELECT id, topic_name, description FROM quizzes WHERE id = ?1",
        [id],
        |row| {
            Ok(Quiz {
                id: row.get("id")?,
                topic_name: row.get("topic_name")?,
                description: row.get("description")?,
            })
        },
    )
    .optional()
}

/// Questions of a quiz in presentation order
pub(crate) fn query_questions(
    conn: &Connection,
    quiz_id: QuizId,
) -> rusqlite::Result<Vec<Question>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {QUESTION_COLUMNS} FROM questions WHERE quiz_id = ?1 ORDER BY position, id"
    ))?;
    let questions = stmt
        .query_map([quiz_id], question_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(questions)
}

impl StoreDb {
    /// Look up a lesson by id
    pub fn lesson(&self, id: LessonId) -> Result<Option<Lesson>> {
        Ok(query_lesson(&self.conn(), id)?)
    }

    /// All lessons, oldest first
    pub fn lessons(&self) -> Result<Vec<Lesson>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!("SELECT {LESSON_COLUMNS} FROM lessons ORDER BY id"))?;
        let lessons = stmt
            .query_map([], lesson_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(lessons)
    }

    /// Look up a quiz by id
    pub fn quiz(&self, id: QuizId) -> Result<Option<Quiz>> {
        Ok(query_quiz(&self.conn(), id)?)
    }

    /// Questions belonging to a quiz, in order
    pub fn questions_for_quiz(&self, quiz_id: QuizId) -> Result<Vec<Question>> {
        Ok(query_questions(&self.conn(), quiz_id)?)
    }

    pub fn insert_quiz(&self, topic_name: &str, description: Option<&str>) -> Result<QuizId> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO quizzes (topic_name, description) VALUES (?1, ?2)",
            (topic_name, description),
        )
        .with_context(|| format!("Failed to insert quiz '{topic_name}'"))?;

        let id = conn.last_insert_rowid();
        debug!("[ecoquest:store] Inserted quiz #{} ({})", id, topic_name);
        Ok(id)
    }

    /// Append a question to the end of a quiz
    pub fn insert_question(&self, quiz_id: QuizId, question: &NewQuestion) -> Result<QuestionId> {
        let conn = self.conn();
        let [a, b, c, d] = &question.options;
        conn.execute(
            r#"INSERT INTO questions
               (quiz_id, question_text, option_a, option_b, option_c, option_d,
                correct_answer, position)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7,
                       (SELECT COALESCE(MAX(position), -1) + 1
                        FROM questions WHERE quiz_id = ?1))"#,
            rusqlite::params![
                quiz_id, question.question_text, a, b, c, d, question.correct_answer,
            ],
        )
        .with_context(|| format!("Failed to insert question into quiz #{quiz_id}"))?;
        Ok(conn.last_insert_rowid())
    }

    pub fn insert_lesson(&self, lesson: &NewLesson) -> Result<LessonId> {
        let conn = self.conn();
        conn.execute(
            r#"INSERT INTO lessons (title, topic, content, xp_reward, quiz_id, created_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6)"#,
            rusqlite::params![
                lesson.title,
                lesson.topic,
                lesson.content,
                lesson.xp_reward,
                lesson.quiz_id,
                Utc::now().timestamp_millis(),
            ],
        )
        .with_context(|| format!("Failed to insert lesson '{}'", lesson.title))?;

        let id = conn.last_insert_rowid();
        debug!("[ecoquest:store] Inserted lesson #{} ({})", id, lesson.title);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(text: &str, correct: AnswerOption) -> NewQuestion {
        NewQuestion {
            question_text: text.to_string(),
            options: ["one".into(), "two".into(), "three".into(), "four".into()],
            correct_answer: correct,
        }
    }

    #[test]
    fn test_questions_keep_insertion_order() {
        let db = StoreDb::open_in_memory().unwrap();
        let quiz_id = db.insert_quiz("Water", None).unwrap();
        db.insert_question(quiz_id, &question("first", AnswerOption::D)).unwrap();
        db.insert_question(quiz_id, &question("second", AnswerOption::A)).unwrap();

        let questions = db.questions_for_quiz(quiz_id).unwrap();
        let texts: Vec<_> = questions.iter().map(|q| q.question_text.as_str()).collect();
        assert_eq!(texts, ["first", "second"]);
        assert_eq!(questions[0].correct_answer, AnswerOption::D);
        assert_eq!(questions[1].option_text(AnswerOption::C), "three");
    }

    #[test]
    fn test_lesson_roundtrip_with_quiz_link() {
        let db = StoreDb::open_in_memory().unwrap();
        let quiz_id = db.insert_quiz("Climate", Some("Greenhouse basics")).unwrap();
        let lesson_id = db
            .insert_lesson(&NewLesson {
                title: "Understanding Climate Change".into(),
                topic: "climate".into(),
                content: "Causes and effects".into(),
                xp_reward: 10,
                quiz_id: Some(quiz_id),
            })
            .unwrap();

        let lesson = db.lesson(lesson_id).unwrap().unwrap();
        assert_eq!(lesson.topic, "climate");
        assert_eq!(lesson.quiz_id, Some(quiz_id));
        let quiz = db.quiz(quiz_id).unwrap().unwrap();
        assert_eq!(quiz.description.as_deref(), Some("Greenhouse basics"));
        assert!(db.lesson(lesson_id + 1).unwrap().is_none());
    }

    #[test]
    fn test_zero_xp_reward_rejected() {
        let db = StoreDb::open_in_memory().unwrap();
        let result = db.insert_lesson(&NewLesson {
            title: "Nothing".into(),
            topic: "water".into(),
            content: "".into(),
            xp_reward: 0,
            quiz_id: None,
        });
        assert!(result.is_err());
    }
}
