//! Structural edits to a plan's topics and exercises.
//!
//! Each function validates everything before touching the plan, so a failed
//! edit leaves it exactly as it was.

use std::collections::{HashMap, HashSet};

use storyplan_core::error::DomainError;
use storyplan_core::plan::{
    Exercise, ExerciseDraft, Plan, Topic, validate_exercise_index,
};
use uuid::Uuid;

/// Appends a draft topic with no exercises.
///
/// # Errors
///
/// Returns `DomainError::InvalidInput` if the name is blank.
pub fn add_topic(
    plan: &mut Plan,
    topic_id: Uuid,
    name: &str,
    description: &str,
) -> Result<Topic, DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidInput(
            "topic name must not be blank".to_owned(),
        ));
    }
    plan.topics.push(Topic::new(topic_id, name, description));
    plan.reindex_topics();
    Ok(plan.topics[plan.topics.len() - 1].clone())
}

/// Removes a topic and its exercises. Decisions recorded against it stay in
/// the log.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the topic is absent.
pub fn delete_topic(plan: &mut Plan, topic_id: Uuid) -> Result<Topic, DomainError> {
    let index = plan
        .topic_position(topic_id)
        .ok_or_else(|| DomainError::topic_not_found(topic_id))?;
    let removed = plan.topics.remove(index);
    plan.reindex_topics();
    Ok(removed)
}

/// Replaces the topic order with `order`, a permutation of the current ids.
///
/// # Errors
///
/// Returns `DomainError::InvalidInput` if `order` adds, omits or repeats an id.
pub fn reorder_topics(plan: &mut Plan, order: &[Uuid]) -> Result<(), DomainError> {
    if order.len() != plan.topics.len() {
        return Err(DomainError::InvalidInput(format!(
            "reorder lists {} topics but the plan has {}",
            order.len(),
            plan.topics.len()
        )));
    }
    let known: HashSet<Uuid> = plan.topics.iter().map(|t| t.id).collect();
    let mut seen = HashSet::with_capacity(order.len());
    for id in order {
        if !known.contains(id) {
            return Err(DomainError::InvalidInput(format!(
                "topic {id} is not part of the plan"
            )));
        }
        if !seen.insert(*id) {
            return Err(DomainError::InvalidInput(format!(
                "topic {id} appears more than once"
            )));
        }
    }

    let mut by_id: HashMap<Uuid, Topic> =
        plan.topics.drain(..).map(|t| (t.id, t)).collect();
    plan.topics = order.iter().filter_map(|id| by_id.remove(id)).collect();
    plan.reindex_topics();
    Ok(())
}

/// Builds an exercise from `draft` and appends it to the topic.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the topic is absent and
/// `DomainError::InvalidInput` if the draft is inconsistent.
pub fn add_exercise(
    plan: &mut Plan,
    topic_id: Uuid,
    exercise_id: Uuid,
    draft: ExerciseDraft,
) -> Result<Exercise, DomainError> {
    let topic = plan.require_topic_mut(topic_id)?;
    let exercise = Exercise::from_draft(exercise_id, draft)?;
    topic.exercises.push(exercise.clone());
    Ok(exercise)
}

/// Replaces an exercise's content, keeping its identifier and position.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the topic or exercise is absent and
/// `DomainError::InvalidInput` if the draft is inconsistent.
pub fn update_exercise(
    plan: &mut Plan,
    topic_id: Uuid,
    exercise_id: Uuid,
    draft: ExerciseDraft,
) -> Result<Exercise, DomainError> {
    let topic = plan.require_topic_mut(topic_id)?;
    let index = topic
        .exercise_position(exercise_id)
        .ok_or_else(|| DomainError::exercise_not_found(exercise_id))?;
    let exercise = Exercise::from_draft(exercise_id, draft)?;
    topic.exercises[index] = exercise.clone();
    Ok(exercise)
}

/// Removes an exercise from a topic.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the topic or exercise is absent.
pub fn delete_exercise(
    plan: &mut Plan,
    topic_id: Uuid,
    exercise_id: Uuid,
) -> Result<Exercise, DomainError> {
    let topic = plan.require_topic_mut(topic_id)?;
    let index = topic
        .exercise_position(exercise_id)
        .ok_or_else(|| DomainError::exercise_not_found(exercise_id))?;
    Ok(topic.exercises.remove(index))
}

/// Appends already-identified exercises to a topic, all or nothing.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the topic is absent and
/// `DomainError::InvalidInput` naming the first exercise whose answer index
/// disagrees with its options.
pub fn append_exercises(
    plan: &mut Plan,
    topic_id: Uuid,
    exercises: Vec<Exercise>,
) -> Result<(), DomainError> {
    let topic = plan.require_topic_mut(topic_id)?;
    if let Some(bad) = exercises.iter().find(|e| !validate_exercise_index(e)) {
        return Err(DomainError::InvalidInput(format!(
            "exercise {:?} has answer index {} inconsistent with its options",
            bad.question, bad.correct_answer_index
        )));
    }
    topic.exercises.extend(exercises);
    Ok(())
}

#[cfg(test)]
mod tests {
    use storyplan_core::error::EntityKind;
    use storyplan_core::plan::{ApprovalStatus, Decision};
    use storyplan_test_support::{exercise, fixed_now, plan_with_topics};

    use super::*;

    fn ids(plan: &Plan) -> Vec<Uuid> {
        plan.topics.iter().map(|t| t.id).collect()
    }

    fn positions(plan: &Plan) -> Vec<usize> {
        plan.topics.iter().map(|t| t.position).collect()
    }

    fn draft(options: &[&str], index: usize) -> ExerciseDraft {
        ExerciseDraft {
            question: "Which river flows through Vienna?".to_owned(),
            options: options.iter().map(|o| (*o).to_owned()).collect(),
            correct_answer_index: index,
            explanation: Some("The Danube.".to_owned()),
        }
    }

    #[test]
    fn test_add_topic_appends_empty_draft_at_end() {
        let mut plan = plan_with_topics(&[1, 1]);
        let topic_id = Uuid::new_v4();

        let topic = add_topic(&mut plan, topic_id, "Rivers", "Major rivers").unwrap();

        assert_eq!(topic.id, topic_id);
        assert_eq!(topic.status, ApprovalStatus::Draft);
        assert!(topic.exercises.is_empty());
        assert_eq!(topic.position, 2);
        assert_eq!(positions(&plan), vec![0, 1, 2]);
    }

    #[test]
    fn test_add_topic_rejects_blank_name() {
        let mut plan = plan_with_topics(&[1]);

        let result = add_topic(&mut plan, Uuid::new_v4(), "  ", "");

        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
        assert_eq!(plan.topics.len(), 1);
    }

    #[test]
    fn test_delete_topic_reindexes_remaining_topics() {
        let mut plan = plan_with_topics(&[1, 2, 1]);
        let middle = plan.topics[1].id;

        let removed = delete_topic(&mut plan, middle).unwrap();

        assert_eq!(removed.exercises.len(), 2);
        assert!(plan.topic(middle).is_none());
        assert_eq!(positions(&plan), vec![0, 1]);
    }

    #[test]
    fn test_delete_topic_keeps_its_decisions_in_the_log() {
        let mut plan = plan_with_topics(&[1, 1]);
        let first = plan.topics[0].id;
        plan.decisions.push(Decision {
            id: Uuid::new_v4(),
            plan_id: plan.id,
            topic_id: first,
            content: "cross the river".to_owned(),
            feedback: Some("Bold.".to_owned()),
            recorded_at: fixed_now(),
        });
        let before = plan.decisions.clone();

        delete_topic(&mut plan, first).unwrap();

        assert_eq!(plan.decisions, before);
        assert!(plan.topic(first).is_none());
    }

    #[test]
    fn test_delete_topic_unknown_is_not_found() {
        let mut plan = plan_with_topics(&[1]);

        let result = delete_topic(&mut plan, Uuid::new_v4());

        assert!(matches!(
            result,
            Err(DomainError::NotFound {
                entity: EntityKind::Topic,
                ..
            })
        ));
    }

    #[test]
    fn test_reorder_topics_applies_permutation() {
        let mut plan = plan_with_topics(&[1, 1, 1]);
        let original = ids(&plan);
        let order = vec![original[2], original[0], original[1]];

        reorder_topics(&mut plan, &order).unwrap();

        assert_eq!(ids(&plan), order);
        assert_eq!(positions(&plan), vec![0, 1, 2]);
    }

    #[test]
    fn test_reorder_topics_rejects_missing_id() {
        let mut plan = plan_with_topics(&[1, 1, 1]);
        let original = ids(&plan);

        let result = reorder_topics(&mut plan, &[original[1], original[0]]);

        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
        assert_eq!(ids(&plan), original);
    }

    #[test]
    fn test_reorder_topics_rejects_duplicate_id() {
        let mut plan = plan_with_topics(&[1, 1, 1]);
        let original = ids(&plan);

        let result = reorder_topics(&mut plan, &[original[0], original[0], original[2]]);

        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
        assert_eq!(ids(&plan), original);
    }

    #[test]
    fn test_reorder_topics_rejects_foreign_id() {
        let mut plan = plan_with_topics(&[1, 1]);
        let original = ids(&plan);

        let result = reorder_topics(&mut plan, &[original[0], Uuid::new_v4()]);

        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
        assert_eq!(ids(&plan), original);
    }

    #[test]
    fn test_add_exercise_derives_answer() {
        let mut plan = plan_with_topics(&[0]);
        let topic_id = plan.topics[0].id;
        let exercise_id = Uuid::new_v4();

        let added =
            add_exercise(&mut plan, topic_id, exercise_id, draft(&["Rhine", "Danube"], 1))
                .unwrap();

        assert_eq!(added.id, exercise_id);
        assert_eq!(added.answer, "Danube");
        assert_eq!(plan.topics[0].exercises, vec![added]);
    }

    #[test]
    fn test_add_exercise_rejects_out_of_range_index() {
        let mut plan = plan_with_topics(&[0]);
        let topic_id = plan.topics[0].id;

        let result = add_exercise(&mut plan, topic_id, Uuid::new_v4(), draft(&["Rhine"], 3));

        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
        assert!(plan.topics[0].exercises.is_empty());
    }

    #[test]
    fn test_update_exercise_keeps_identity_and_position() {
        let mut plan = plan_with_topics(&[3]);
        let topic_id = plan.topics[0].id;
        let target = plan.topics[0].exercises[1].id;

        let updated =
            update_exercise(&mut plan, topic_id, target, draft(&["Elbe", "Danube"], 1)).unwrap();

        assert_eq!(updated.id, target);
        assert_eq!(plan.topics[0].exercises[1], updated);
        assert_eq!(plan.topics[0].exercises.len(), 3);
    }

    #[test]
    fn test_update_exercise_unknown_is_not_found() {
        let mut plan = plan_with_topics(&[1]);
        let topic_id = plan.topics[0].id;

        let result = update_exercise(&mut plan, topic_id, Uuid::new_v4(), draft(&["a"], 0));

        assert!(matches!(
            result,
            Err(DomainError::NotFound {
                entity: EntityKind::Exercise,
                ..
            })
        ));
    }

    #[test]
    fn test_delete_exercise_removes_only_target() {
        let mut plan = plan_with_topics(&[2]);
        let topic_id = plan.topics[0].id;
        let keep = plan.topics[0].exercises[0].id;
        let removed = plan.topics[0].exercises[1].id;

        delete_exercise(&mut plan, topic_id, removed).unwrap();

        let remaining: Vec<Uuid> = plan.topics[0].exercises.iter().map(|e| e.id).collect();
        assert_eq!(remaining, vec![keep]);
        assert!(delete_exercise(&mut plan, topic_id, removed).is_err());
    }

    #[test]
    fn test_append_exercises_is_all_or_nothing() {
        let mut plan = plan_with_topics(&[0]);
        let topic_id = plan.topics[0].id;
        let good = exercise("Q1", &["a", "b"], 0);
        let mut bad = exercise("Q2", &["a", "b"], 1);
        bad.correct_answer_index = 0;

        let result = append_exercises(&mut plan, topic_id, vec![good.clone(), bad]);
        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
        assert!(plan.topics[0].exercises.is_empty());

        append_exercises(&mut plan, topic_id, vec![good.clone()]).unwrap();
        assert_eq!(plan.topics[0].exercises, vec![good]);
    }
}
