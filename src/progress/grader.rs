//! Answer checking and score computation

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::{Question, QuestionId};

/// XP granted per correct answer on a first attempt
pub const XP_PER_CORRECT_ANSWER: u32 = 10;

/// Submitted answers, keyed by question id. Missing entries count as wrong.
pub type Answers = HashMap<QuestionId, String>;

/// Outcome of checking one submission
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Grade {
    pub correct: u32,
    pub total: u32,
    pub percentage: f64,
    pub xp_earned: u32,
}

/// Grade a submission against a quiz's questions.
///
/// A submitted value matches only if it equals the stored label exactly
/// (`"a"` matches, `"A"` and `" a"` do not). Answers for questions outside
/// `questions` are ignored.
///
/// Returns `None` for an empty question list; there is no score to compute.
pub fn grade(questions: &[Question], answers: &Answers) -> Option<Grade> {
    if questions.is_empty() {
        return None;
    }

    let correct = questions
        .iter()
        .filter(|q| {
            answers
                .get(&q.id)
                .is_some_and(|given| given.as_str() == q.correct_answer.as_str())
        })
        .count() as u32;
    let total = questions.len() as u32;

    Some(Grade {
        correct,
        total,
        percentage: percentage(correct, total),
        xp_earned: correct * XP_PER_CORRECT_ANSWER,
    })
}

/// `correct / total * 100`, rounded half away from zero to one decimal.
///
/// Callers guarantee `total > 0`.
pub fn percentage(correct: u32, total: u32) -> f64 {
    let raw = f64::from(correct) / f64::from(total) * 100.0;
    (raw * 10.0).round() / 10.0
}
