//! Repository for the `projects` table.
//!
//! Every query takes the owning user's id and carries it in the WHERE
//! clause: a project id that exists under a different owner behaves exactly
//! like a nonexistent one.

use sqlx::PgPool;
use taskhub_core::pagination::{clamp_limit, clamp_offset};
use taskhub_core::types::DbId;

use crate::models::project::{CreateProject, Project, ProjectSummary, UpdateProject};

/// Column list shared across plain-row queries.
const COLUMNS: &str = "id, title, description, owner_id, created_at, updated_at";

/// Grouped select joining the owner's display name and task counts.
const SUMMARY_SELECT: &str = "SELECT p.id, p.title, p.description, p.owner_id,
        u.first_name || ' ' || u.last_name AS owner_name,
        COUNT(t.id) AS total_tasks,
        COUNT(t.id) FILTER (WHERE t.completed) AS completed_tasks,
        p.created_at, p.updated_at
     FROM projects p
     JOIN users u ON u.id = p.owner_id
     LEFT JOIN tasks t ON t.project_id = p.id";

/// Provides ownership-scoped CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project owned by `owner_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (title, description, owner_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(owner_id)
            .fetch_one(pool)
            .await
    }

    /// Find a project by id under this owner. The ownership-check entry
    /// point for all task operations.
    pub async fn find_by_id_and_owner(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 AND owner_id = $2");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a project with owner name and task counts, scoped to the owner.
    pub async fn find_summary_by_id_and_owner(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
    ) -> Result<Option<ProjectSummary>, sqlx::Error> {
        let query = format!(
            "{SUMMARY_SELECT}
             WHERE p.id = $1 AND p.owner_id = $2
             GROUP BY p.id, u.first_name, u.last_name"
        );
        sqlx::query_as::<_, ProjectSummary>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// List all of an owner's projects, newest first.
    pub async fn list_by_owner(
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<Vec<ProjectSummary>, sqlx::Error> {
        let query = format!(
            "{SUMMARY_SELECT}
             WHERE p.owner_id = $1
             GROUP BY p.id, u.first_name, u.last_name
             ORDER BY p.created_at DESC"
        );
        sqlx::query_as::<_, ProjectSummary>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// List a page of an owner's projects, newest first.
    pub async fn list_page_by_owner(
        pool: &PgPool,
        owner_id: DbId,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<ProjectSummary>, sqlx::Error> {
        let query = format!(
            "{SUMMARY_SELECT}
             WHERE p.owner_id = $1
             GROUP BY p.id, u.first_name, u.last_name
             ORDER BY p.created_at DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, ProjectSummary>(&query)
            .bind(owner_id)
            .bind(clamp_limit(limit))
            .bind(clamp_offset(offset))
            .fetch_all(pool)
            .await
    }

    /// Total number of projects this owner has.
    pub async fn count_by_owner(pool: &PgPool, owner_id: DbId) -> Result<i64, sqlx::Error> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM projects WHERE owner_id = $1")
            .bind(owner_id)
            .fetch_one(pool)
            .await?;
        Ok(count.0)
    }

    /// Update a project's title and description, refreshing `updated_at`.
    ///
    /// Returns `None` if no project with this id exists under this owner.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                title = $3,
                description = $4,
                updated_at = NOW()
             WHERE id = $1 AND owner_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(&input.title)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project under this owner. The `ON DELETE CASCADE` constraint
    /// removes all of its tasks in the same statement, so the cascade is
    /// atomic. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId, owner_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Case-insensitive substring search on title, scoped to the owner.
    pub async fn search_by_title(
        pool: &PgPool,
        owner_id: DbId,
        search: &str,
    ) -> Result<Vec<ProjectSummary>, sqlx::Error> {
        let query = format!(
            "{SUMMARY_SELECT}
             WHERE p.owner_id = $1 AND p.title ILIKE '%' || $2 || '%'
             GROUP BY p.id, u.first_name, u.last_name
             ORDER BY p.created_at DESC"
        );
        sqlx::query_as::<_, ProjectSummary>(&query)
            .bind(owner_id)
            .bind(search)
            .fetch_all(pool)
            .await
    }
}
