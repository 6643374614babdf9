//! Commands for the assessment context.

use storyplan_core::command::Command;
use uuid::Uuid;

/// Command to grade a learner's answer to one exercise.
#[derive(Debug, Clone)]
pub struct CheckAnswer {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The plan being followed.
    pub plan_id: Uuid,
    /// The topic holding the exercise.
    pub topic_id: Uuid,
    /// The exercise being answered.
    pub exercise_id: Uuid,
    /// What the learner submitted.
    pub answer: String,
}

impl Command for CheckAnswer {
    fn command_type(&self) -> &'static str {
        "assessment.check_answer"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
