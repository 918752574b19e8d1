//! Sample catalog: four topics, each a lesson with a four-question quiz

use anyhow::Result;
use tracing::info;

use crate::domain::AnswerOption::{self, A, B, C, D};
use crate::store::{NewLesson, NewQuestion, StoreDb};

/// XP granted by each sample lesson
const SAMPLE_LESSON_XP: u32 = 10;

struct SampleTopic {
    title: &'static str,
    topic: &'static str,
    content: &'static str,
    quiz_description: &'static str,
    questions: &'static [(&'static str, [&'static str; 4], AnswerOption)],
}

static SAMPLE_TOPICS: &[SampleTopic] = &[
    SampleTopic {
        title: "Recycling Basics",
        topic: "recycling",
        content: "Learn about recycling processes and benefits",
        quiz_description: "Sorting, materials and why recycling matters",
        questions: &[
            (
                "Which material can be recycled indefinitely without losing quality?",
                ["Glass", "Plastic film", "Paper towels", "Styrofoam"],
                A,
            ),
            (
                "What should you do with a greasy pizza box?",
                [
                    "Recycle it as cardboard",
                    "Compost or bin the greasy part",
                    "Burn it",
                    "Rinse it first",
                ],
                B,
            ),
            (
                "Which symbol marks a recyclable plastic type?",
                ["A green dot", "A leaf", "A number inside chasing arrows", "A crossed-out bin"],
                C,
            ),
            (
                "Recycling aluminium saves roughly how much energy compared to new production?",
                ["10%", "25%", "50%", "95%"],
                D,
            ),
        ],
    },
    SampleTopic {
        title: "Understanding Climate Change",
        topic: "climate",
        content: "Learn about climate change causes and effects",
        quiz_description: "Greenhouse gases and their effects",
        questions: &[
            (
                "Which gas contributes most to human-caused warming?",
                ["Carbon dioxide", "Oxygen", "Nitrogen", "Argon"],
                A,
            ),
            (
                "What traps heat in the atmosphere?",
                ["The ozone hole", "The greenhouse effect", "Solar wind", "Cloud seeding"],
                B,
            ),
            (
                "Which activity emits the most greenhouse gases globally?",
                ["Gardening", "Cycling", "Burning fossil fuels", "Recycling"],
                C,
            ),
            (
                "What is a likely effect of melting land ice?",
                ["Colder summers", "Fewer storms", "Lower oceans", "Rising sea levels"],
                D,
            ),
        ],
    },
    SampleTopic {
        title: "Biodiversity Conservation",
        topic: "biodiversity",
        content: "Learn about biodiversity and conservation efforts",
        quiz_description: "Species, habitats and protection",
        questions: &[
            (
                "What is the main driver of biodiversity loss?",
                ["Habitat destruction", "Volcanoes", "Moonlight", "Earthquakes"],
                A,
            ),
            (
                "What does a keystone species do?",
                [
                    "Nothing special",
                    "Holds an ecosystem together",
                    "Lives only in zoos",
                    "Eats only stones",
                ],
                B,
            ),
            (
                "Which ecosystem holds the most species per area?",
                ["Deserts", "Tundra", "Tropical rainforests", "Glaciers"],
                C,
            ),
            (
                "Which helps pollinators most?",
                ["Paving gardens", "Using pesticides", "Mowing weekly", "Planting native flowers"],
                D,
            ),
        ],
    },
    SampleTopic {
        title: "Water Conservation",
        topic: "water",
        content: "Learn about water conservation techniques",
        quiz_description: "Saving water at home and beyond",
        questions: &[
            (
                "Which uses less water?",
                ["A short shower", "A full bath", "Both the same", "Neither uses water"],
                A,
            ),
            (
                "A dripping tap can waste how much water per day?",
                ["Almost none", "Up to 20 litres", "Exactly one cup", "Only at night"],
                B,
            ),
            (
                "Which crop practice saves the most water?",
                ["Flood irrigation", "Midday sprinklers", "Drip irrigation", "Open channels"],
                C,
            ),
            (
                "What share of Earth's water is fresh and accessible?",
                ["About 50%", "About 25%", "About 10%", "Less than 1%"],
                D,
            ),
        ],
    },
];

/// What a seeding run inserted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub lessons: usize,
    pub quizzes: usize,
    pub questions: usize,
}

/// Insert the sample catalog. Does nothing if any lesson already exists.
pub fn seed_sample_data(db: &StoreDb) -> Result<SeedReport> {
    if !db.lessons()?.is_empty() {
        info!("[ecoquest:seed] Lessons already present, skipping sample data");
        return Ok(SeedReport::default());
    }

    let mut report = SeedReport::default();
    for sample in SAMPLE_TOPICS {
        let quiz_id = db.insert_quiz(sample.title, Some(sample.quiz_description))?;
        report.quizzes += 1;

        for (text, options, correct) in sample.questions {
            db.insert_question(
                quiz_id,
                &NewQuestion {
                    question_text: text.to_string(),
                    options: (*options).map(|o| o.to_string()),
                    correct_answer: *correct,
                },
            )?;
            report.questions += 1;
        }

        db.insert_lesson(&NewLesson {
            title: sample.title.to_string(),
            topic: sample.topic.to_string(),
            content: sample.content.to_string(),
            xp_reward: SAMPLE_LESSON_XP,
            quiz_id: Some(quiz_id),
        })?;
        report.lessons += 1;
    }

    info!(
        "[ecoquest:seed] Added {} lessons, {} quizzes, {} questions",
        report.lessons, report.quizzes, report.questions
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_once() {
        let db = StoreDb::open_in_memory().unwrap();

        let first = seed_sample_data(&db).unwrap();
        assert_eq!(
            first,
            SeedReport {
                lessons: 4,
                quizzes: 4,
                questions: 16
            }
        );

        let second = seed_sample_data(&db).unwrap();
        assert_eq!(second, SeedReport::default());
        assert_eq!(db.lessons().unwrap().len(), 4);
    }

    #[test]
    fn test_seeded_lessons_link_to_quizzes() {
        let db = StoreDb::open_in_memory().unwrap();
        seed_sample_data(&db).unwrap();

        for lesson in db.lessons().unwrap() {
            assert_eq!(lesson.xp_reward, SAMPLE_LESSON_XP);
            let quiz_id = lesson.quiz_id.expect("sample lessons have quizzes");
            let questions = db.questions_for_quiz(quiz_id).unwrap();
            let answers: Vec<_> = questions.iter().map(|q| q.correct_answer).collect();
            assert_eq!(answers, [A, B, C, D]);
        }
    }
}
