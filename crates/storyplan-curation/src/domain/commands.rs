//! Commands for the curation context.

use storyplan_core::command::Command;
use storyplan_core::plan::ExerciseDraft;
use uuid::Uuid;

/// Command to create an empty draft plan.
#[derive(Debug, Clone)]
pub struct CreatePlan {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Display name.
    pub name: String,
    /// The subject being taught.
    pub subject: String,
    /// Free-form description.
    pub description: String,
}

impl Command for CreatePlan {
    fn command_type(&self) -> &'static str {
        "curation.create_plan"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to delete a plan with everything it owns.
#[derive(Debug, Clone)]
pub struct DeletePlan {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The plan to delete.
    pub plan_id: Uuid,
}

impl Command for DeletePlan {
    fn command_type(&self) -> &'static str {
        "curation.delete_plan"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to approve a plan and all of its topics.
#[derive(Debug, Clone)]
pub struct ApprovePlan {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The plan to approve.
    pub plan_id: Uuid,
}

impl Command for ApprovePlan {
    fn command_type(&self) -> &'static str {
        "curation.approve_plan"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to append a draft topic to a plan.
#[derive(Debug, Clone)]
pub struct AddTopic {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The plan to extend.
    pub plan_id: Uuid,
    /// Topic name.
    pub name: String,
    /// Topic description.
    pub description: String,
}

impl Command for AddTopic {
    fn command_type(&self) -> &'static str {
        "curation.add_topic"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to remove a topic and its exercises.
#[derive(Debug, Clone)]
pub struct DeleteTopic {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The plan owning the topic.
    pub plan_id: Uuid,
    /// The topic to remove.
    pub topic_id: Uuid,
}

impl Command for DeleteTopic {
    fn command_type(&self) -> &'static str {
        "curation.delete_topic"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to replace a plan's topic order.
#[derive(Debug, Clone)]
pub struct ReorderTopics {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The plan to reorder.
    pub plan_id: Uuid,
    /// Every topic id of the plan, in the new order.
    pub topic_ids: Vec<Uuid>,
}

impl Command for ReorderTopics {
    fn command_type(&self) -> &'static str {
        "curation.reorder_topics"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to approve a single topic.
#[derive(Debug, Clone)]
pub struct ApproveTopic {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The plan owning the topic.
    pub plan_id: Uuid,
    /// The topic to approve.
    pub topic_id: Uuid,
}

impl Command for ApproveTopic {
    fn command_type(&self) -> &'static str {
        "curation.approve_topic"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to add an authored exercise to a topic.
#[derive(Debug, Clone)]
pub struct AddExercise {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The plan owning the topic.
    pub plan_id: Uuid,
    /// The topic to extend.
    pub topic_id: Uuid,
    /// The exercise content.
    pub draft: ExerciseDraft,
}

impl Command for AddExercise {
    fn command_type(&self) -> &'static str {
        "curation.add_exercise"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to replace an exercise's content.
#[derive(Debug, Clone)]
pub struct UpdateExercise {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The plan owning the topic.
    pub plan_id: Uuid,
    /// The topic owning the exercise.
    pub topic_id: Uuid,
    /// The exercise to update.
    pub exercise_id: Uuid,
    /// The new content.
    pub draft: ExerciseDraft,
}

impl Command for UpdateExercise {
    fn command_type(&self) -> &'static str {
        "curation.update_exercise"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to remove an exercise from a topic.
#[derive(Debug, Clone)]
pub struct DeleteExercise {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The plan owning the topic.
    pub plan_id: Uuid,
    /// The topic owning the exercise.
    pub topic_id: Uuid,
    /// The exercise to remove.
    pub exercise_id: Uuid,
}

impl Command for DeleteExercise {
    fn command_type(&self) -> &'static str {
        "curation.delete_exercise"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to append a batch of generated exercises to a topic.
#[derive(Debug, Clone)]
pub struct GenerateExercises {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The plan owning the topic.
    pub plan_id: Uuid,
    /// The topic to fill.
    pub topic_id: Uuid,
}

impl Command for GenerateExercises {
    fn command_type(&self) -> &'static str {
        "curation.generate_exercises"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to replace a topic's story with a freshly generated one.
#[derive(Debug, Clone)]
pub struct RegenerateStory {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The plan owning the topic.
    pub plan_id: Uuid,
    /// The topic whose story is replaced.
    pub topic_id: Uuid,
}

impl Command for RegenerateStory {
    fn command_type(&self) -> &'static str {
        "curation.regenerate_story"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
