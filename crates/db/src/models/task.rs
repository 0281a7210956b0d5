//! Task entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskhub_core::types::{DbId, DueDate, Timestamp};

/// Task priority. Stored as the `task_priority` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "task_priority", rename_all = "UPPERCASE")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl Default for TaskPriority {
    fn default() -> Self {
        Self::Medium
    }
}

/// A task row from the `tasks` table.
///
/// A task has no direct owner reference; its effective owner is its
/// project's owner. Overdue is derived, never stored.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DueDate>,
    pub completed: bool,
    /// Set exactly when `completed` transitions false -> true, cleared on
    /// true -> false.
    pub completed_at: Option<Timestamp>,
    pub priority: TaskPriority,
    /// Owning project; immutable after creation.
    pub project_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new task. Tasks are always created incomplete.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTask {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DueDate>,
    /// Defaults to `MEDIUM` when omitted.
    pub priority: Option<TaskPriority>,
}

/// DTO for updating an existing task. Title, description, and due date are
/// replaced; priority is kept when omitted. Completion state is only changed
/// through the toggle/complete operations.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTask {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DueDate>,
    pub priority: Option<TaskPriority>,
}
