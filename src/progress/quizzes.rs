//! Quiz grader: first attempts are rewarded, retakes only get feedback

use chrono::Utc;
use rusqlite::TransactionBehavior;
use serde::Serialize;
use tracing::{debug, info};

use super::{grade, Answers, Ledger, ProgressEngine, ProgressError};
use crate::domain::{QuizId, UserId};
use crate::store::{query_questions, query_quiz};

/// Response to a quiz submission
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeResult {
    pub success: bool,
    /// Correct answers in this submission
    pub score: u32,
    /// Questions in the quiz
    pub total: u32,
    pub percentage: f64,
    /// XP granted by this submission (always 0 on a retake)
    pub xp_earned: u32,
    /// The user's XP total after this request
    pub total_xp: u32,
    pub retake: bool,
}

impl ProgressEngine {
    /// Grade a quiz submission.
    ///
    /// Every submission is graded so the caller gets live feedback. Only the
    /// first one persists a `user_scores` row and credits
    /// `correct * XP_PER_CORRECT_ANSWER`; the stored first-attempt score is
    /// never overwritten.
    pub fn submit_quiz(
        &self,
        user_id: UserId,
        quiz_id: QuizId,
        answers: &Answers,
    ) -> Result<GradeResult, ProgressError> {
        let mut conn = self.db.conn();
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        query_quiz(&tx, quiz_id)?.ok_or(ProgressError::QuizNotFound(quiz_id))?;
        let questions = query_questions(&tx, quiz_id)?;
        let grade = grade(&questions, answers).ok_or(ProgressError::NoQuestionsAvailable(quiz_id))?;
        let current_xp =
            Ledger::total_xp(&tx, user_id)?.ok_or(ProgressError::UserNotFound(user_id))?;

        let inserted = tx.execute(
            r#"INSERT INTO user_scores (user_id, quiz_id, score, xp_earned, completed_at)
               VALUES (?1, ?2, ?3, ?4, ?5)
               ON CONFLICT(user_id, quiz_id) DO NOTHING"#,
            (user_id, quiz_id, grade.correct, grade.xp_earned, Utc::now().timestamp_millis()),
        )?;

        if inserted == 0 {
            debug!(
                "[ecoquest:progress] User #{} retook quiz #{} ({}/{})",
                user_id, quiz_id, grade.correct, grade.total
            );
            return Ok(GradeResult {
                success: true,
                score: grade.correct,
                total: grade.total,
                percentage: grade.percentage,
                xp_earned: 0,
                total_xp: current_xp,
                retake: true,
            });
        }

        let new_total = Ledger::credit(&tx, user_id, grade.xp_earned)?;
        tx.commit()?;

        info!(
            "[ecoquest:progress] User #{} scored {}/{} on quiz #{} (+{} XP, total {})",
            user_id, grade.correct, grade.total, quiz_id, grade.xp_earned, new_total
        );
        Ok(GradeResult {
            success: true,
            score: grade.correct,
            total: grade.total,
            percentage: grade.percentage,
            xp_earned: grade.xp_earned,
            total_xp: new_total,
            retake: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AnswerOption, QuestionId};
    use crate::store::{NewQuestion, StoreDb};

    struct Fixture {
        engine: ProgressEngine,
        db: StoreDb,
        user_id: UserId,
        quiz_id: QuizId,
        question_ids: Vec<QuestionId>,
    }

    fn setup() -> Fixture {
        let db = StoreDb::open_in_memory().unwrap();
        let user = db.insert_user("ana", "ana@example.org").unwrap();
        let quiz_id = db.insert_quiz("Recycling", None).unwrap();
        let question_ids = AnswerOption::ALL
            .iter()
            .map(|correct| {
                db.insert_question(
                    quiz_id,
                    &NewQuestion {
                        question_text: format!("Correct is {correct}"),
                        options: ["w".into(), "x".into(), "y".into(), "z".into()],
                        correct_answer: *correct,
                    },
                )
                .unwrap()
            })
            .collect();
        Fixture {
            engine: ProgressEngine::new(db.clone()),
            db,
            user_id: user.id,
            quiz_id,
            question_ids,
        }
    }

    fn submission(ids: &[QuestionId], labels: &[&str]) -> Answers {
        ids.iter()
            .zip(labels)
            .map(|(id, label)| (*id, label.to_string()))
            .collect()
    }

    #[test]
    fn test_first_attempt_is_rewarded() {
        let f = setup();
        let result = f
            .engine
            .submit_quiz(f.user_id, f.quiz_id, &submission(&f.question_ids, &["a", "a", "a", "a"]))
            .unwrap();

        assert_eq!(result.score, 1);
        assert_eq!(result.total, 4);
        assert_eq!(result.percentage, 25.0);
        assert_eq!(result.xp_earned, 10);
        assert_eq!(result.total_xp, 10);
        assert!(!result.retake);

        let scores = f.db.quiz_scores(f.user_id).unwrap();
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].score, 1);
        assert_eq!(scores[0].xp_earned, 10);
    }

    #[test]
    fn test_retake_reports_live_score_without_reward() {
        let f = setup();
        f.engine
            .submit_quiz(f.user_id, f.quiz_id, &submission(&f.question_ids, &["a", "a", "a", "a"]))
            .unwrap();

        let retake = f
            .engine
            .submit_quiz(f.user_id, f.quiz_id, &submission(&f.question_ids, &["a", "b", "c", "d"]))
            .unwrap();

        assert!(retake.retake);
        assert_eq!(retake.score, 4);
        assert_eq!(retake.percentage, 100.0);
        assert_eq!(retake.xp_earned, 0);
        assert_eq!(retake.total_xp, 10);

        // the stored first-attempt score is untouched
        let scores = f.db.quiz_scores(f.user_id).unwrap();
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].score, 1);
        assert_eq!(f.db.user(f.user_id).unwrap().unwrap().total_xp, 10);
    }

    #[test]
    fn test_zero_correct_first_attempt_still_counts() {
        let f = setup();
        let first = f
            .engine
            .submit_quiz(f.user_id, f.quiz_id, &Answers::new())
            .unwrap();
        assert_eq!(first.score, 0);
        assert_eq!(first.xp_earned, 0);
        assert!(!first.retake);

        let second = f
            .engine
            .submit_quiz(f.user_id, f.quiz_id, &submission(&f.question_ids, &["a", "b", "c", "d"]))
            .unwrap();
        assert!(second.retake);
        assert_eq!(second.total_xp, 0);
    }

    #[test]
    fn test_quiz_without_questions() {
        let f = setup();
        let empty_quiz = f.db.insert_quiz("Empty", None).unwrap();

        let err = f
            .engine
            .submit_quiz(f.user_id, empty_quiz, &Answers::new())
            .unwrap_err();
        assert!(matches!(err, ProgressError::NoQuestionsAvailable(id) if id == empty_quiz));
        assert!(f.db.quiz_scores(f.user_id).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_quiz() {
        let f = setup();
        let err = f
            .engine
            .submit_quiz(f.user_id, f.quiz_id + 50, &Answers::new())
            .unwrap_err();
        assert!(matches!(err, ProgressError::QuizNotFound(_)));
    }
}
