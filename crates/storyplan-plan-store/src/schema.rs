//! Plan store database schema.

/// SQL to create the plans table.
pub const CREATE_LEARNING_PLANS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS learning_plans (
    plan_id    UUID PRIMARY KEY,
    status     TEXT NOT NULL,
    document   JSONB NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX IF NOT EXISTS idx_learning_plans_status
    ON learning_plans (status);
";
