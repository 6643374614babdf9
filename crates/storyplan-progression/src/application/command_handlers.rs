//! Command handlers for the progression context.
//!
//! Each handler loads the plan, asks the content generator for anything it
//! needs, applies every change in memory, and saves only once the whole
//! operation has succeeded. Callers must not run two mutating handlers for
//! the same plan concurrently.

use storyplan_core::clock::Clock;
use storyplan_core::command::Command;
use storyplan_core::config::EngineConfig;
use storyplan_core::error::DomainError;
use storyplan_core::generator::{ContentGenerator, bounded};
use storyplan_core::plan::Decision;
use storyplan_core::repository::PlanRepository;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::domain::commands::{BackfillFeedback, ComputeProgress, SubmitDecision};
use crate::domain::decisions;
use crate::domain::progress::{
    ProgressReport, StoryRequest, continuation_request, fresh_request, locate_progress,
};

/// Handles the `ComputeProgress` command: locates the current topic and makes
/// sure it has a story before it is shown.
///
/// When the previous topic ended with a decision, the story continues from
/// it; otherwise a fresh story is generated from the topic name. A topic that
/// already has a story is never regenerated, so repeated calls without a new
/// decision neither call the generator nor save.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the plan does not exist and
/// `DomainError::Upstream` if generation or persistence fails. The stored
/// plan is unchanged on any error.
#[instrument(skip_all, fields(plan_id = %command.plan_id))]
pub async fn handle_compute_progress(
    command: &ComputeProgress,
    repo: &dyn PlanRepository,
    generator: &dyn ContentGenerator,
    config: &EngineConfig,
) -> Result<ProgressReport, DomainError> {
    info!(
        correlation_id = %command.correlation_id(),
        command_type = command.command_type(),
        "handling compute_progress command"
    );

    let mut plan = repo.load(command.plan_id).await?;
    let cursor = locate_progress(&plan);
    let Some(current) = cursor.current else {
        debug!("every actionable topic is completed");
        return Ok(ProgressReport::from_plan(&plan, cursor));
    };

    let mut story = None;
    if let Some(StoryRequest::Continuation {
        previous_story,
        decision,
        next_topic_name,
    }) = continuation_request(&plan, cursor)
    {
        let text = bounded(
            "story_continuation",
            config.generation_timeout,
            generator.story_continuation(&previous_story, &decision, &next_topic_name),
        )
        .await?;
        if !text.trim().is_empty() {
            story = Some(text);
        }
    }

    if story.is_none() {
        if let Some(StoryRequest::Fresh { topic_name }) = fresh_request(&plan, cursor) {
            let text = bounded(
                "story",
                config.generation_timeout,
                generator.story(&topic_name),
            )
            .await?;
            if text.trim().is_empty() {
                return Err(DomainError::Upstream(format!(
                    "generator returned an empty story for {topic_name:?}"
                )));
            }
            story = Some(text);
        }
    }

    if let Some(text) = story {
        plan.topics[current].story = Some(text);
        repo.save(&plan).await?;
        info!(topic_id = %plan.topics[current].id, "story backfilled");
    }

    Ok(ProgressReport::from_plan(&plan, cursor))
}

/// Handles the `SubmitDecision` command: generates feedback for the learner's
/// decision, appends it to the decision log and records it on the topic.
///
/// # Errors
///
/// Returns `DomainError::InvalidInput` for blank text, `DomainError::NotFound`
/// for an unknown plan or topic, and `DomainError::Upstream` if feedback
/// generation or persistence fails. Nothing is recorded on error.
#[instrument(skip_all, fields(plan_id = %command.plan_id, topic_id = %command.topic_id))]
pub async fn handle_submit_decision(
    command: &SubmitDecision,
    clock: &dyn Clock,
    repo: &dyn PlanRepository,
    generator: &dyn ContentGenerator,
    config: &EngineConfig,
) -> Result<Decision, DomainError> {
    info!(
        correlation_id = %command.correlation_id(),
        command_type = command.command_type(),
        "handling submit_decision command"
    );

    let mut plan = repo.load(command.plan_id).await?;
    decisions::validate_decision(&plan, command.topic_id, &command.content)?;

    let feedback = bounded(
        "feedback",
        config.generation_timeout,
        generator.feedback(&command.content),
    )
    .await?;

    // TODO: decision_id uses Uuid::new_v4(); tests can only assert on it
    // after the fact. Inject an id source alongside the clock to fix.
    let decision = decisions::record_decision(
        &mut plan,
        Uuid::new_v4(),
        command.topic_id,
        command.content.clone(),
        Some(feedback),
        clock.now(),
    )?;

    repo.save(&plan).await?;
    info!(decision_id = %decision.id, "decision recorded");

    Ok(decision)
}

/// Handles the `BackfillFeedback` command: generates feedback for a decision
/// that was recorded without any.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for an unknown plan or decision,
/// `DomainError::InvalidState` if the decision already has feedback, and
/// `DomainError::Upstream` if generation or persistence fails.
#[instrument(skip_all, fields(plan_id = %command.plan_id, decision_id = %command.decision_id))]
pub async fn handle_backfill_feedback(
    command: &BackfillFeedback,
    repo: &dyn PlanRepository,
    generator: &dyn ContentGenerator,
    config: &EngineConfig,
) -> Result<Decision, DomainError> {
    info!(
        correlation_id = %command.correlation_id(),
        command_type = command.command_type(),
        "handling backfill_feedback command"
    );

    let mut plan = repo.load(command.plan_id).await?;
    let content = decisions::pending_feedback(&plan, command.decision_id)?
        .content
        .clone();

    let feedback = bounded(
        "feedback",
        config.generation_timeout,
        generator.feedback(&content),
    )
    .await?;

    decisions::backfill_feedback(&mut plan, command.decision_id, feedback)?;
    repo.save(&plan).await?;

    plan.decisions
        .into_iter()
        .find(|d| d.id == command.decision_id)
        .ok_or_else(|| DomainError::decision_not_found(command.decision_id))
}
