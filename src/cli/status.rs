//! Status command implementation

use anyhow::{Context, Result};

use ecoquest::config::Config;

/// Show a user's XP, completed lessons and quiz scores
pub fn status_command(config: &Config, username: &str) -> Result<()> {
    let db = super::open_store(config)?;
    let user = db
        .user_by_name(username)?
        .with_context(|| format!("No such user: {username}"))?;

    println!("{} - {} XP\n", user.username, user.total_xp);

    let completions = db.lesson_completions(user.id)?;
    if completions.is_empty() {
        println!("No lessons completed.");
    } else {
        println!("Lessons ({}):", completions.len());
        for completion in completions {
            let title = db
                .lesson(completion.lesson_id)?
                .map(|l| l.title)
                .unwrap_or_else(|| format!("#{}", completion.lesson_id));
            println!("  {} (+{} XP)", title, completion.xp_earned);
        }
    }

    let scores = db.quiz_scores(user.id)?;
    if scores.is_empty() {
        println!("No quizzes taken.");
    } else {
        println!("Quizzes ({}):", scores.len());
        for score in scores {
            let total = db.questions_for_quiz(score.quiz_id)?.len();
            println!(
                "  Quiz #{}: {}/{} (+{} XP)",
                score.quiz_id, score.score, total, score.xp_earned
            );
        }
    }

    Ok(())
}
