//! Response bodies for the read-only endpoints.

use serde::Serialize;

use crate::domain::{
    AnswerOption, Lesson, LessonCompletion, LessonId, Question, QuestionId, Quiz, QuizId,
    QuizScore, User,
};

/// Lesson entry in `GET /lessons`
#[derive(Debug, Clone, Serialize)]
pub struct LessonSummary {
    pub id: LessonId,
    pub title: String,
    pub topic: String,
    pub xp_reward: u32,
    pub quiz_id: Option<QuizId>,
}

impl From<&Lesson> for LessonSummary {
    fn from(lesson: &Lesson) -> Self {
        Self {
            id: lesson.id,
            title: lesson.title.clone(),
            topic: lesson.topic.clone(),
            xp_reward: lesson.xp_reward,
            quiz_id: lesson.quiz_id,
        }
    }
}

/// `GET /lesson/{id}`: the lesson plus whether the caller finished it
#[derive(Debug, Clone, Serialize)]
pub struct LessonView {
    #[serde(flatten)]
    pub lesson: Lesson,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptionView {
    pub label: AnswerOption,
    pub text: String,
}

/// A question as shown to a learner. The correct answer is withheld.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub id: QuestionId,
    pub question_text: String,
    pub options: Vec<OptionView>,
}

impl From<&Question> for QuestionView {
    fn from(question: &Question) -> Self {
        Self {
            id: question.id,
            question_text: question.question_text.clone(),
            options: AnswerOption::ALL
                .iter()
                .map(|label| OptionView {
                    label: *label,
                    text: question.option_text(*label).to_string(),
                })
                .collect(),
        }
    }
}

/// `GET /quiz/{id}`
#[derive(Debug, Clone, Serialize)]
pub struct QuizView {
    pub id: QuizId,
    pub topic_name: String,
    pub description: Option<String>,
    pub questions: Vec<QuestionView>,
}

impl QuizView {
    pub fn new(quiz: Quiz, questions: &[Question]) -> Self {
        Self {
            id: quiz.id,
            topic_name: quiz.topic_name,
            description: quiz.description,
            questions: questions.iter().map(QuestionView::from).collect(),
        }
    }
}

/// `GET /me`
#[derive(Debug, Clone, Serialize)]
pub struct ProgressView {
    pub username: String,
    pub total_xp: u32,
    pub completed_lessons: Vec<LessonCompletion>,
    pub quiz_scores: Vec<QuizScore>,
}

impl ProgressView {
    pub fn new(
        user: User,
        completed_lessons: Vec<LessonCompletion>,
        quiz_scores: Vec<QuizScore>,
    ) -> Self {
        Self {
            username: user.username,
            total_xp: user.total_xp,
            completed_lessons,
            quiz_scores,
        }
    }
}
