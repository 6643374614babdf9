//! Commands for the progression context.

use storyplan_core::command::Command;
use uuid::Uuid;

/// Command to compute the learner's current position, backfilling any story
/// the current topic still lacks.
#[derive(Debug, Clone)]
pub struct ComputeProgress {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The plan being followed.
    pub plan_id: Uuid,
}

impl Command for ComputeProgress {
    fn command_type(&self) -> &'static str {
        "progression.compute_progress"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to record a learner decision against a topic.
#[derive(Debug, Clone)]
pub struct SubmitDecision {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The plan being followed.
    pub plan_id: Uuid,
    /// The topic the decision belongs to.
    pub topic_id: Uuid,
    /// What the learner wrote.
    pub content: String,
}

impl Command for SubmitDecision {
    fn command_type(&self) -> &'static str {
        "progression.submit_decision"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to generate feedback for a decision recorded without any.
#[derive(Debug, Clone)]
pub struct BackfillFeedback {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The plan whose log holds the decision.
    pub plan_id: Uuid,
    /// The decision to backfill.
    pub decision_id: Uuid,
}

impl Command for BackfillFeedback {
    fn command_type(&self) -> &'static str {
        "progression.backfill_feedback"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
