//! Request routing and handlers
//!
//! | Method | Path                    | Session |
//! |--------|-------------------------|---------|
//! | GET    | /                       | no      |
//! | GET    | /lessons                | no      |
//! | GET    | /lesson/{id}            | yes     |
//! | GET    | /quiz/{id}              | no      |
//! | GET    | /me                     | yes     |
//! | POST   | /complete_lesson/{id}   | yes     |
//! | POST   | /submit_quiz/{id}       | yes     |

use std::collections::HashMap;

use serde::Serialize;
use serde_json::{json, Value};
use tracing::error;

use super::types::{LessonSummary, LessonView, ProgressView, QuizView};
use super::AppState;
use crate::domain::{QuestionId, UserId};
use crate::progress::{Answers, ProgressError};

/// Status code and JSON body of a handled request
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    fn ok<T: Serialize>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(body) => Self { status: 200, body },
            Err(e) => {
                error!("[ecoquest:http] Failed to serialize response: {}", e);
                Self::error(500, "serialize")
            }
        }
    }

    fn error(status: u16, code: &str) -> Self {
        Self {
            status,
            body: json!({ "error": code }),
        }
    }

    fn storage(e: anyhow::Error) -> Self {
        error!("[ecoquest:http] Storage failure: {:#}", e);
        Self::error(500, "internal")
    }
}

impl From<ProgressError> for ApiResponse {
    fn from(err: ProgressError) -> Self {
        match err {
            ProgressError::NoQuestionsAvailable(_) => Self {
                status: 422,
                body: json!({
                    "success": false,
                    "error": "no_questions",
                    "message": err.to_string(),
                }),
            },
            ProgressError::LessonNotFound(_)
            | ProgressError::QuizNotFound(_)
            | ProgressError::UserNotFound(_) => Self {
                status: 404,
                body: json!({ "error": "not_found", "details": err.to_string() }),
            },
            ProgressError::Storage(e) => Self::storage(e.into()),
        }
    }
}

type HandlerResult = Result<ApiResponse, ApiResponse>;

/// Route one request.
///
/// `user` is the already authenticated caller, if any. User-scoped routes
/// answer 401 without one and never reach the progress engine.
pub fn dispatch(
    state: &AppState,
    method: &str,
    path: &str,
    user: Option<UserId>,
    body: &str,
) -> ApiResponse {
    let path = match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    };

    let result = match (method, path) {
        ("GET", "/") => Ok(ApiResponse::ok(&json!({
            "status": "ok",
            "name": "EcoQuest",
            "version": env!("CARGO_PKG_VERSION"),
        }))),
        ("GET", "/lessons") => list_lessons(state),
        ("GET", "/me") => require_user(user).and_then(|user| my_progress(state, user)),
        ("GET", p) if p.starts_with("/lesson/") => {
            parse_id(p, "/lesson/").and_then(|id| view_lesson(state, require_user(user)?, id))
        }
        ("GET", p) if p.starts_with("/quiz/") => {
            parse_id(p, "/quiz/").and_then(|id| view_quiz(state, id))
        }
        ("POST", p) if p.starts_with("/complete_lesson/") => parse_id(p, "/complete_lesson/")
            .and_then(|id| complete_lesson(state, require_user(user)?, id)),
        ("POST", p) if p.starts_with("/submit_quiz/") => parse_id(p, "/submit_quiz/")
            .and_then(|id| submit_quiz(state, require_user(user)?, id, body)),
        _ => Err(ApiResponse::error(404, "not_found")),
    };

    result.unwrap_or_else(|response| response)
}

fn require_user(user: Option<UserId>) -> Result<UserId, ApiResponse> {
    user.ok_or_else(|| ApiResponse::error(401, "unauthenticated"))
}

/// Parse the id following `prefix`, e.g. `/lesson/12` -> 12.
fn parse_id(path: &str, prefix: &str) -> Result<i64, ApiResponse> {
    path.strip_prefix(prefix)
        .filter(|rest| !rest.contains('/'))
        .and_then(|rest| rest.parse::<i64>().ok())
        .ok_or_else(|| ApiResponse::error(404, "not_found"))
}

fn list_lessons(state: &AppState) -> HandlerResult {
    let lessons = state.db.lessons().map_err(ApiResponse::storage)?;
    let summaries: Vec<LessonSummary> = lessons.iter().map(LessonSummary::from).collect();
    Ok(ApiResponse::ok(&json!({ "lessons": summaries })))
}

fn view_lesson(state: &AppState, user: UserId, lesson_id: i64) -> HandlerResult {
    let lesson = state
        .db
        .lesson(lesson_id)
        .map_err(ApiResponse::storage)?
        .ok_or_else(|| ApiResponse::error(404, "not_found"))?;
    let completed = state
        .db
        .has_completed_lesson(user, lesson_id)
        .map_err(ApiResponse::storage)?;
    Ok(ApiResponse::ok(&LessonView { lesson, completed }))
}

fn view_quiz(state: &AppState, quiz_id: i64) -> HandlerResult {
    let quiz = state
        .db
        .quiz(quiz_id)
        .map_err(ApiResponse::storage)?
        .ok_or_else(|| ApiResponse::error(404, "not_found"))?;
    let questions = state
        .db
        .questions_for_quiz(quiz_id)
        .map_err(ApiResponse::storage)?;
    Ok(ApiResponse::ok(&QuizView::new(quiz, &questions)))
}

fn my_progress(state: &AppState, user_id: UserId) -> HandlerResult {
    let user = state
        .db
        .user(user_id)
        .map_err(ApiResponse::storage)?
        .ok_or_else(|| ApiResponse::error(404, "not_found"))?;
    let lessons = state.db.lesson_completions(user_id).map_err(ApiResponse::storage)?;
    let scores = state.db.quiz_scores(user_id).map_err(ApiResponse::storage)?;
    Ok(ApiResponse::ok(&ProgressView::new(user, lessons, scores)))
}

fn complete_lesson(state: &AppState, user: UserId, lesson_id: i64) -> HandlerResult {
    let outcome = state.engine.complete_lesson(user, lesson_id)?;
    Ok(ApiResponse::ok(&outcome))
}

fn submit_quiz(state: &AppState, user: UserId, quiz_id: i64, body: &str) -> HandlerResult {
    let answers = parse_answers(body)?;
    let result = state.engine.submit_quiz(user, quiz_id, &answers)?;
    Ok(ApiResponse::ok(&result))
}

/// Parse `{"<question id>": "<option>"}`. A `null` value or a missing
/// key both mean the question was left unanswered.
fn parse_answers(body: &str) -> Result<Answers, ApiResponse> {
    if body.trim().is_empty() {
        return Ok(Answers::new());
    }

    let raw: HashMap<String, Option<String>> = serde_json::from_str(body).map_err(|e| ApiResponse {
        status: 400,
        body: json!({ "error": "invalid_json", "details": e.to_string() }),
    })?;

    let mut answers = Answers::new();
    for (key, value) in raw {
        let id = key
            .trim()
            .parse::<QuestionId>()
            .map_err(|_| ApiResponse {
                status: 400,
                body: json!({ "error": "bad_question_id", "details": key }),
            })?;
        if let Some(value) = value {
            answers.insert(id, value);
        }
    }
    Ok(answers)
}
