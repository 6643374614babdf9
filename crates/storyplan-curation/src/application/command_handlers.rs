//! Command handlers for the curation context.
//!
//! Each handler loads the plan, applies the edit in memory, and saves only if
//! every step succeeded. Callers must not run two mutating handlers for the
//! same plan concurrently.

use storyplan_core::command::Command;
use storyplan_core::config::EngineConfig;
use storyplan_core::error::DomainError;
use storyplan_core::generator::{ContentGenerator, bounded};
use storyplan_core::plan::{Exercise, Plan, Topic};
use storyplan_core::repository::PlanRepository;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::domain::commands::{
    AddExercise, AddTopic, ApprovePlan, ApproveTopic, CreatePlan, DeleteExercise, DeletePlan,
    DeleteTopic, GenerateExercises, RegenerateStory, ReorderTopics, UpdateExercise,
};
use crate::domain::{approval, structure};

/// Handles the `CreatePlan` command: saves a new empty draft plan.
///
/// # Errors
///
/// Returns `DomainError::InvalidInput` if the subject is blank and
/// `DomainError::Upstream` if persistence fails.
#[instrument(skip_all)]
pub async fn handle_create_plan(
    command: &CreatePlan,
    repo: &dyn PlanRepository,
) -> Result<Plan, DomainError> {
    info!(
        correlation_id = %command.correlation_id(),
        command_type = command.command_type(),
        "handling create_plan command"
    );

    if command.subject.trim().is_empty() {
        return Err(DomainError::InvalidInput(
            "plan subject must not be blank".to_owned(),
        ));
    }

    let plan = Plan::new(
        Uuid::new_v4(),
        command.name.clone(),
        command.subject.clone(),
        command.description.clone(),
    );
    repo.save(&plan).await?;

    info!(plan_id = %plan.id, "plan created");
    Ok(plan)
}

/// Handles the `DeletePlan` command. Topics, exercises and decisions go with
/// the plan.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the plan does not exist and
/// `DomainError::Upstream` if the repository fails.
#[instrument(skip_all, fields(plan_id = %command.plan_id))]
pub async fn handle_delete_plan(
    command: &DeletePlan,
    repo: &dyn PlanRepository,
) -> Result<(), DomainError> {
    info!(
        correlation_id = %command.correlation_id(),
        command_type = command.command_type(),
        "handling delete_plan command"
    );

    repo.delete(command.plan_id).await?;

    info!("plan deleted");
    Ok(())
}

/// Handles the `ApprovePlan` command: approves the plan and all its topics.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the plan does not exist and
/// `DomainError::Upstream` if persistence fails.
#[instrument(skip_all, fields(plan_id = %command.plan_id))]
pub async fn handle_approve_plan(
    command: &ApprovePlan,
    repo: &dyn PlanRepository,
) -> Result<Plan, DomainError> {
    info!(
        correlation_id = %command.correlation_id(),
        command_type = command.command_type(),
        "handling approve_plan command"
    );

    let mut plan = repo.load(command.plan_id).await?;
    approval::approve_plan(&mut plan);
    repo.save(&plan).await?;

    info!(topic_count = plan.topics.len(), "plan approved");
    Ok(plan)
}

/// Handles the `AddTopic` command: appends a draft topic at the end of the
/// plan.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the plan does not exist,
/// `DomainError::InvalidInput` for a blank name, and `DomainError::Upstream`
/// if persistence fails.
#[instrument(skip_all, fields(plan_id = %command.plan_id))]
pub async fn handle_add_topic(
    command: &AddTopic,
    repo: &dyn PlanRepository,
) -> Result<Topic, DomainError> {
    info!(
        correlation_id = %command.correlation_id(),
        command_type = command.command_type(),
        "handling add_topic command"
    );

    let mut plan = repo.load(command.plan_id).await?;
    let topic = structure::add_topic(
        &mut plan,
        Uuid::new_v4(),
        &command.name,
        &command.description,
    )?;
    repo.save(&plan).await?;

    info!(topic_id = %topic.id, position = topic.position, "topic added");
    Ok(topic)
}

/// Handles the `DeleteTopic` command.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for an unknown plan or topic and
/// `DomainError::Upstream` if persistence fails.
#[instrument(skip_all, fields(plan_id = %command.plan_id, topic_id = %command.topic_id))]
pub async fn handle_delete_topic(
    command: &DeleteTopic,
    repo: &dyn PlanRepository,
) -> Result<(), DomainError> {
    info!(
        correlation_id = %command.correlation_id(),
        command_type = command.command_type(),
        "handling delete_topic command"
    );

    let mut plan = repo.load(command.plan_id).await?;
    structure::delete_topic(&mut plan, command.topic_id)?;
    repo.save(&plan).await?;

    info!("topic deleted");
    Ok(())
}

/// Handles the `ReorderTopics` command and returns the topics in their new
/// order.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the plan does not exist,
/// `DomainError::InvalidInput` if the id list is not a permutation of the
/// plan's topics, and `DomainError::Upstream` if persistence fails.
#[instrument(skip_all, fields(plan_id = %command.plan_id))]
pub async fn handle_reorder_topics(
    command: &ReorderTopics,
    repo: &dyn PlanRepository,
) -> Result<Vec<Topic>, DomainError> {
    info!(
        correlation_id = %command.correlation_id(),
        command_type = command.command_type(),
        "handling reorder_topics command"
    );

    let mut plan = repo.load(command.plan_id).await?;
    structure::reorder_topics(&mut plan, &command.topic_ids)?;
    repo.save(&plan).await?;

    info!("topics reordered");
    Ok(plan.topics)
}

/// Handles the `ApproveTopic` command.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for an unknown plan or topic,
/// `DomainError::InvalidState` if the topic has no exercises, and
/// `DomainError::Upstream` if persistence fails.
#[instrument(skip_all, fields(plan_id = %command.plan_id, topic_id = %command.topic_id))]
pub async fn handle_approve_topic(
    command: &ApproveTopic,
    repo: &dyn PlanRepository,
) -> Result<Topic, DomainError> {
    info!(
        correlation_id = %command.correlation_id(),
        command_type = command.command_type(),
        "handling approve_topic command"
    );

    let mut plan = repo.load(command.plan_id).await?;
    approval::approve_topic(&mut plan, command.topic_id)?;
    repo.save(&plan).await?;

    info!("topic approved");
    plan.require_topic(command.topic_id).cloned()
}

/// Handles the `AddExercise` command.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for an unknown plan or topic,
/// `DomainError::InvalidInput` for an inconsistent draft, and
/// `DomainError::Upstream` if persistence fails.
#[instrument(skip_all, fields(plan_id = %command.plan_id, topic_id = %command.topic_id))]
pub async fn handle_add_exercise(
    command: &AddExercise,
    repo: &dyn PlanRepository,
) -> Result<Exercise, DomainError> {
    info!(
        correlation_id = %command.correlation_id(),
        command_type = command.command_type(),
        "handling add_exercise command"
    );

    let mut plan = repo.load(command.plan_id).await?;
    let exercise = structure::add_exercise(
        &mut plan,
        command.topic_id,
        Uuid::new_v4(),
        command.draft.clone(),
    )?;
    repo.save(&plan).await?;

    info!(exercise_id = %exercise.id, "exercise added");
    Ok(exercise)
}

/// Handles the `UpdateExercise` command.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for an unknown plan, topic or exercise,
/// `DomainError::InvalidInput` for an inconsistent draft, and
/// `DomainError::Upstream` if persistence fails.
#[instrument(
    skip_all,
    fields(
        plan_id = %command.plan_id,
        topic_id = %command.topic_id,
        exercise_id = %command.exercise_id,
    )
)]
pub async fn handle_update_exercise(
    command: &UpdateExercise,
    repo: &dyn PlanRepository,
) -> Result<Exercise, DomainError> {
    info!(
        correlation_id = %command.correlation_id(),
        command_type = command.command_type(),
        "handling update_exercise command"
    );

    let mut plan = repo.load(command.plan_id).await?;
    let exercise = structure::update_exercise(
        &mut plan,
        command.topic_id,
        command.exercise_id,
        command.draft.clone(),
    )?;
    repo.save(&plan).await?;

    info!("exercise updated");
    Ok(exercise)
}

/// Handles the `DeleteExercise` command.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for an unknown plan, topic or exercise and
/// `DomainError::Upstream` if persistence fails.
#[instrument(
    skip_all,
    fields(
        plan_id = %command.plan_id,
        topic_id = %command.topic_id,
        exercise_id = %command.exercise_id,
    )
)]
pub async fn handle_delete_exercise(
    command: &DeleteExercise,
    repo: &dyn PlanRepository,
) -> Result<(), DomainError> {
    info!(
        correlation_id = %command.correlation_id(),
        command_type = command.command_type(),
        "handling delete_exercise command"
    );

    let mut plan = repo.load(command.plan_id).await?;
    structure::delete_exercise(&mut plan, command.topic_id, command.exercise_id)?;
    repo.save(&plan).await?;

    info!("exercise deleted");
    Ok(())
}

/// Handles the `GenerateExercises` command: asks the generator for a batch of
/// exercises on the topic and appends them.
///
/// The batch is accepted whole or not at all.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for an unknown plan or topic and
/// `DomainError::Upstream` if generation fails, times out, yields an
/// exercise whose answer index disagrees with its options, or persistence
/// fails.
#[instrument(skip_all, fields(plan_id = %command.plan_id, topic_id = %command.topic_id))]
pub async fn handle_generate_exercises(
    command: &GenerateExercises,
    repo: &dyn PlanRepository,
    generator: &dyn ContentGenerator,
    config: &EngineConfig,
) -> Result<Vec<Exercise>, DomainError> {
    info!(
        correlation_id = %command.correlation_id(),
        command_type = command.command_type(),
        "handling generate_exercises command"
    );

    let mut plan = repo.load(command.plan_id).await?;
    let topic_name = plan.require_topic(command.topic_id)?.name.clone();

    let generated = bounded(
        "exercises",
        config.generation_timeout,
        generator.exercises(&topic_name, config.exercise_batch_size),
    )
    .await?;
    let exercises: Vec<Exercise> = generated
        .into_iter()
        .map(|g| g.into_exercise(Uuid::new_v4()))
        .collect();

    structure::append_exercises(&mut plan, command.topic_id, exercises.clone()).map_err(
        |err| match err {
            DomainError::InvalidInput(reason) => {
                DomainError::Upstream(format!("generator returned {reason}"))
            }
            other => other,
        },
    )?;
    repo.save(&plan).await?;

    info!(count = exercises.len(), "exercises generated");
    Ok(exercises)
}

/// Handles the `RegenerateStory` command: replaces the topic's story with a
/// fresh one built from its name.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for an unknown plan or topic and
/// `DomainError::Upstream` if generation fails, times out, returns blank
/// text, or persistence fails.
#[instrument(skip_all, fields(plan_id = %command.plan_id, topic_id = %command.topic_id))]
pub async fn handle_regenerate_story(
    command: &RegenerateStory,
    repo: &dyn PlanRepository,
    generator: &dyn ContentGenerator,
    config: &EngineConfig,
) -> Result<Topic, DomainError> {
    info!(
        correlation_id = %command.correlation_id(),
        command_type = command.command_type(),
        "handling regenerate_story command"
    );

    let mut plan = repo.load(command.plan_id).await?;
    let topic_name = plan.require_topic(command.topic_id)?.name.clone();

    let story = bounded(
        "story",
        config.generation_timeout,
        generator.story(&topic_name),
    )
    .await?;
    if story.trim().is_empty() {
        return Err(DomainError::Upstream(format!(
            "generator returned an empty story for {topic_name:?}"
        )));
    }

    let topic = plan.require_topic_mut(command.topic_id)?;
    topic.story = Some(story);
    let topic = topic.clone();
    repo.save(&plan).await?;

    info!("story regenerated");
    Ok(topic)
}
