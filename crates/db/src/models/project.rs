//! Project entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskhub_core::types::{DbId, Timestamp};

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    /// Exclusive owner; immutable after creation.
    pub owner_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A project row joined with its owner's display name and task counts.
///
/// Produced by the grouped list/get queries; the API layer derives the
/// progress percentage from the counts on every request.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectSummary {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub owner_id: DbId,
    pub owner_name: String,
    pub total_tasks: i64,
    pub completed_tasks: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub title: String,
    pub description: Option<String>,
}

/// DTO for updating an existing project. A full replacement: the title is
/// required, the description may be cleared by omitting it.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProject {
    pub title: String,
    pub description: Option<String>,
}
