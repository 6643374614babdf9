//! Command handlers for the assessment context.

use serde::Serialize;
use storyplan_core::command::Command;
use storyplan_core::config::EngineConfig;
use storyplan_core::error::DomainError;
use storyplan_core::generator::{ContentGenerator, bounded};
use storyplan_core::plan::{Exercise, Topic};
use storyplan_core::repository::PlanRepository;
use tracing::{info, instrument};

use crate::domain::commands::CheckAnswer;
use crate::domain::evaluation::{Advancement, evaluate};

/// What the learner is told after submitting an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerResult {
    /// Whether the answer was right.
    pub is_correct: bool,
    /// Generated explanation of the verdict.
    pub explanation: String,
    /// The exercise to attempt next within the same topic.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_exercise: Option<Exercise>,
    /// True when the last exercise of the topic was answered correctly.
    pub is_topic_completed: bool,
    /// The next topic with exercises, once this one is completed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_topic: Option<Topic>,
}

/// Handles the `CheckAnswer` command: grades the answer, fetches an
/// explanation, and reports what comes next.
///
/// A correct answer to a topic's last exercise marks that topic completed and
/// saves the plan. The reported next topic is advisory and is not modified.
/// Callers must not run this concurrently with another mutating handler for
/// the same plan.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for an unknown plan, topic or exercise,
/// `DomainError::InvalidInput` for a blank answer, and
/// `DomainError::Upstream` if explanation generation or persistence fails.
#[instrument(
    skip_all,
    fields(
        plan_id = %command.plan_id,
        topic_id = %command.topic_id,
        exercise_id = %command.exercise_id,
    )
)]
pub async fn handle_check_answer(
    command: &CheckAnswer,
    repo: &dyn PlanRepository,
    generator: &dyn ContentGenerator,
    config: &EngineConfig,
) -> Result<AnswerResult, DomainError> {
    info!(
        correlation_id = %command.correlation_id(),
        command_type = command.command_type(),
        "handling check_answer command"
    );

    let mut plan = repo.load(command.plan_id).await?;
    let evaluation = evaluate(
        &plan,
        command.topic_id,
        command.exercise_id,
        &command.answer,
    )?;

    let exercise = &plan.topics[evaluation.topic_index].exercises[evaluation.exercise_index];
    let explanation = bounded(
        "explanation",
        config.generation_timeout,
        generator.explanation(
            &exercise.question,
            &exercise.answer,
            &command.answer,
            evaluation.is_correct,
        ),
    )
    .await?;

    info!(is_correct = evaluation.is_correct, "answer graded");

    let mut result = AnswerResult {
        is_correct: evaluation.is_correct,
        explanation,
        next_exercise: None,
        is_topic_completed: false,
        next_topic: None,
    };

    match evaluation.advancement {
        Advancement::Stay => {}
        Advancement::NextExercise(index) => {
            result.next_exercise =
                Some(plan.topics[evaluation.topic_index].exercises[index].clone());
        }
        Advancement::TopicCompleted { next_topic } => {
            result.is_topic_completed = true;
            result.next_topic = next_topic.map(|i| plan.topics[i].clone());

            let topic = &mut plan.topics[evaluation.topic_index];
            if !topic.completed {
                topic.completed = true;
                repo.save(&plan).await?;
                info!("topic completed");
            }
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use storyplan_core::config::EngineConfig;
    use storyplan_core::error::{DomainError, EntityKind};
    use storyplan_test_support::{
        FailingContentGenerator, GeneratorCall, InMemoryPlanRepository, ScriptedContentGenerator,
        init_test_tracing, plan_with_topics,
    };
    use uuid::Uuid;

    use crate::application::command_handlers::handle_check_answer;
    use crate::domain::commands::CheckAnswer;

    fn check(plan_id: Uuid, topic_id: Uuid, exercise_id: Uuid, answer: &str) -> CheckAnswer {
        CheckAnswer {
            correlation_id: Uuid::new_v4(),
            plan_id,
            topic_id,
            exercise_id,
            answer: answer.to_owned(),
        }
    }

    #[tokio::test]
    async fn test_answers_are_case_and_whitespace_insensitive() {
        // Arrange
        init_test_tracing();
        let plan = plan_with_topics(&[2]);
        let plan_id = plan.id;
        let topic = plan.topics[0].clone();
        let repo = InMemoryPlanRepository::with_plan(plan);
        let generator = ScriptedContentGenerator::new();

        // Act
        let result = handle_check_answer(
            &check(plan_id, topic.id, topic.exercises[0].id, " paris "),
            &repo,
            &generator,
            &EngineConfig::default(),
        )
        .await
        .unwrap();

        // Assert
        assert!(result.is_correct);
        assert_eq!(result.explanation, "Correct!");
        assert_eq!(result.next_exercise, Some(topic.exercises[1].clone()));
        assert!(!result.is_topic_completed);
        assert!(result.next_topic.is_none());
        assert!(repo.saved_plans().is_empty());
        assert_eq!(
            generator.calls(),
            vec![GeneratorCall::Explanation {
                submitted_answer: " paris ".to_owned(),
                is_correct: true,
            }]
        );
    }

    #[tokio::test]
    async fn test_wrong_answer_does_not_advance() {
        // Arrange
        let plan = plan_with_topics(&[1, 1]);
        let plan_id = plan.id;
        let topic = plan.topics[0].clone();
        let repo = InMemoryPlanRepository::with_plan(plan);

        // Act
        let result = handle_check_answer(
            &check(plan_id, topic.id, topic.exercises[0].id, "Rome"),
            &repo,
            &ScriptedContentGenerator::new(),
            &EngineConfig::default(),
        )
        .await
        .unwrap();

        // Assert
        assert!(!result.is_correct);
        assert_eq!(result.explanation, "The answer is Paris");
        assert!(result.next_exercise.is_none());
        assert!(!result.is_topic_completed);
        assert!(result.next_topic.is_none());
        assert!(!repo.stored(plan_id).unwrap().topics[0].completed);
    }

    #[tokio::test]
    async fn test_two_topic_plan_walkthrough() {
        // Arrange
        let plan = plan_with_topics(&[1, 1]);
        let plan_id = plan.id;
        let first = plan.topics[0].clone();
        let second = plan.topics[1].clone();
        let repo = InMemoryPlanRepository::with_plan(plan);
        let generator = ScriptedContentGenerator::new();
        let config = EngineConfig::default();

        // Act
        let after_first = handle_check_answer(
            &check(plan_id, first.id, first.exercises[0].id, "Paris"),
            &repo,
            &generator,
            &config,
        )
        .await
        .unwrap();
        let after_second = handle_check_answer(
            &check(plan_id, second.id, second.exercises[0].id, "Paris"),
            &repo,
            &generator,
            &config,
        )
        .await
        .unwrap();

        // Assert
        assert!(after_first.is_topic_completed);
        assert_eq!(after_first.next_topic.map(|t| t.id), Some(second.id));
        assert!(after_second.is_topic_completed);
        assert!(after_second.next_topic.is_none());

        let stored = repo.stored(plan_id).unwrap();
        assert!(stored.topics.iter().all(|t| t.completed));
    }

    #[tokio::test]
    async fn test_completion_skips_topics_without_exercises() {
        // Arrange
        let plan = plan_with_topics(&[1, 0, 1]);
        let plan_id = plan.id;
        let first = plan.topics[0].clone();
        let third_id = plan.topics[2].id;
        let repo = InMemoryPlanRepository::with_plan(plan);

        // Act
        let result = handle_check_answer(
            &check(plan_id, first.id, first.exercises[0].id, "Paris"),
            &repo,
            &ScriptedContentGenerator::new(),
            &EngineConfig::default(),
        )
        .await
        .unwrap();

        // Assert
        assert!(result.is_topic_completed);
        assert_eq!(result.next_topic.map(|t| t.id), Some(third_id));
        let stored = repo.stored(plan_id).unwrap();
        assert!(!stored.topics[2].completed);
    }

    #[tokio::test]
    async fn test_repeated_completion_saves_once() {
        let plan = plan_with_topics(&[1]);
        let plan_id = plan.id;
        let topic = plan.topics[0].clone();
        let repo = InMemoryPlanRepository::with_plan(plan);
        let generator = ScriptedContentGenerator::new();
        let command = check(plan_id, topic.id, topic.exercises[0].id, "Paris");

        for _ in 0..2 {
            let result = handle_check_answer(&command, &repo, &generator, &EngineConfig::default())
                .await
                .unwrap();
            assert!(result.is_topic_completed);
        }

        assert_eq!(repo.saved_plans().len(), 1);
    }

    #[tokio::test]
    async fn test_explanation_failure_fails_whole_call() {
        // Arrange
        let plan = plan_with_topics(&[1]);
        let plan_id = plan.id;
        let topic = plan.topics[0].clone();
        let repo = InMemoryPlanRepository::with_plan(plan.clone());

        // Act
        let result = handle_check_answer(
            &check(plan_id, topic.id, topic.exercises[0].id, "Paris"),
            &repo,
            &FailingContentGenerator,
            &EngineConfig::default(),
        )
        .await;

        // Assert
        assert!(matches!(result, Err(DomainError::Upstream(_))));
        assert_eq!(repo.stored(plan_id).unwrap(), plan);
    }

    #[tokio::test]
    async fn test_unknown_exercise_is_not_found() {
        let plan = plan_with_topics(&[1]);
        let plan_id = plan.id;
        let topic_id = plan.topics[0].id;
        let missing = Uuid::new_v4();
        let repo = InMemoryPlanRepository::with_plan(plan);
        let generator = ScriptedContentGenerator::new();

        let result = handle_check_answer(
            &check(plan_id, topic_id, missing, "Paris"),
            &repo,
            &generator,
            &EngineConfig::default(),
        )
        .await;

        match result {
            Err(DomainError::NotFound { entity, id }) => {
                assert_eq!(entity, EntityKind::Exercise);
                assert_eq!(id, missing);
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
        assert!(generator.calls().is_empty());
    }

    #[tokio::test]
    async fn test_result_serializes_without_absent_fields() {
        let plan = plan_with_topics(&[1]);
        let plan_id = plan.id;
        let topic = plan.topics[0].clone();
        let repo = InMemoryPlanRepository::with_plan(plan);

        let result = handle_check_answer(
            &check(plan_id, topic.id, topic.exercises[0].id, "Paris"),
            &repo,
            &ScriptedContentGenerator::new(),
            &EngineConfig::default(),
        )
        .await
        .unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["isCorrect"], true);
        assert_eq!(json["isTopicCompleted"], true);
        assert!(json.get("nextExercise").is_none());
        assert!(json.get("nextTopic").is_none());
    }
}
