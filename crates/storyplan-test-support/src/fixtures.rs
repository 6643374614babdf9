//! Plan fixtures shared by handler tests.

use chrono::{DateTime, TimeZone, Utc};
use storyplan_core::plan::{Exercise, Plan, Topic};
use uuid::Uuid;

/// The fixed timestamp used across tests.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()
}

/// Builds a consistent exercise whose answer is `options[correct_answer_index]`.
///
/// # Panics
///
/// Panics if `correct_answer_index` is out of range.
#[must_use]
pub fn exercise(question: &str, options: &[&str], correct_answer_index: usize) -> Exercise {
    Exercise {
        id: Uuid::new_v4(),
        question: question.to_owned(),
        options: options.iter().map(|o| (*o).to_owned()).collect(),
        answer: options[correct_answer_index].to_owned(),
        correct_answer_index,
        explanation: None,
    }
}

/// Builds a draft plan with one topic per entry of `exercise_counts`, named
/// `Topic 1`, `Topic 2`, ... and holding that many exercises each.
#[must_use]
pub fn plan_with_topics(exercise_counts: &[usize]) -> Plan {
    let mut plan = Plan::new(Uuid::new_v4(), "Test plan", "Geography", "Capitals of Europe");
    for (i, count) in exercise_counts.iter().enumerate() {
        let mut topic = Topic::new(Uuid::new_v4(), format!("Topic {}", i + 1), "");
        for n in 0..*count {
            topic.exercises.push(exercise(
                &format!("Question {}.{}", i + 1, n + 1),
                &["Paris", "Berlin", "Rome"],
                0,
            ));
        }
        plan.topics.push(topic);
    }
    plan.reindex_topics();
    plan
}
