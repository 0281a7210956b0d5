//! Repository for the `tasks` table.
//!
//! Every query is scoped to a project id. Callers must have resolved that
//! project through [`ProjectRepo::find_by_id_and_owner`] first, so a task
//! lookup can never succeed against a project the caller does not own, and
//! a task id valid in one project never resolves inside another.
//!
//! [`ProjectRepo::find_by_id_and_owner`]: crate::repositories::ProjectRepo::find_by_id_and_owner

use chrono::NaiveDate;
use sqlx::PgPool;
use taskhub_core::pagination::{clamp_limit, clamp_offset};
use taskhub_core::types::DbId;

use crate::models::task::{CreateTask, Task, TaskPriority, UpdateTask};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, due_date, completed, completed_at, \
                       priority, project_id, created_at, updated_at";

/// Provides project-scoped CRUD and query operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task into a project. Tasks start incomplete; priority
    /// defaults to `MEDIUM` when the input omits it.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateTask,
    ) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks (title, description, due_date, priority, project_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.due_date)
            .bind(input.priority.unwrap_or_default())
            .bind(project_id)
            .fetch_one(pool)
            .await
    }

    /// Find a task by id within a project.
    pub async fn find_by_id_and_project(
        pool: &PgPool,
        id: DbId,
        project_id: DbId,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1 AND project_id = $2");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// List all tasks in a project, newest first.
    pub async fn list_by_project(pool: &PgPool, project_id: DbId) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks WHERE project_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// List a page of a project's tasks, newest first.
    pub async fn list_page_by_project(
        pool: &PgPool,
        project_id: DbId,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks WHERE project_id = $1
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(project_id)
            .bind(clamp_limit(limit))
            .bind(clamp_offset(offset))
            .fetch_all(pool)
            .await
    }

    /// Total number of tasks in a project.
    pub async fn count_by_project(pool: &PgPool, project_id: DbId) -> Result<i64, sqlx::Error> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks WHERE project_id = $1")
            .bind(project_id)
            .fetch_one(pool)
            .await?;
        Ok(count.0)
    }

    /// Replace a task's title, description, and due date; keep the stored
    /// priority when the input omits it. Refreshes `updated_at`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        project_id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                title = $3,
                description = $4,
                due_date = $5,
                priority = COALESCE($6, priority),
                updated_at = NOW()
             WHERE id = $1 AND project_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(project_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.due_date)
            .bind(input.priority)
            .fetch_optional(pool)
            .await
    }

    /// Delete a task within a project. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId, project_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND project_id = $2")
            .bind(id)
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Flip the completion flag in a single statement: stamp `completed_at`
    /// on the false -> true transition, clear it on true -> false.
    ///
    /// The CASE reads the pre-update value of `completed`.
    pub async fn toggle_completion(
        pool: &PgPool,
        id: DbId,
        project_id: DbId,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                completed = NOT completed,
                completed_at = CASE WHEN completed THEN NULL ELSE NOW() END,
                updated_at = NOW()
             WHERE id = $1 AND project_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// Mark a task completed. Idempotent: re-stamps `completed_at` whether or
    /// not the task was already complete.
    pub async fn set_completed(
        pool: &PgPool,
        id: DbId,
        project_id: DbId,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                completed = TRUE,
                completed_at = NOW(),
                updated_at = NOW()
             WHERE id = $1 AND project_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's tasks by completion state.
    pub async fn list_by_status(
        pool: &PgPool,
        project_id: DbId,
        completed: bool,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks
             WHERE project_id = $1 AND completed = $2
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(project_id)
            .bind(completed)
            .fetch_all(pool)
            .await
    }

    /// List a project's tasks by priority.
    pub async fn list_by_priority(
        pool: &PgPool,
        project_id: DbId,
        priority: TaskPriority,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks
             WHERE project_id = $1 AND priority = $2
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(project_id)
            .bind(priority)
            .fetch_all(pool)
            .await
    }

    /// List a project's overdue tasks: due strictly before `today` and not
    /// completed. `today` is passed in so tests can pin the date.
    pub async fn list_overdue(
        pool: &PgPool,
        project_id: DbId,
        today: NaiveDate,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks
             WHERE project_id = $1 AND due_date < $2 AND completed = FALSE
             ORDER BY due_date ASC"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(project_id)
            .bind(today)
            .fetch_all(pool)
            .await
    }

    /// Case-insensitive substring search on title or description, scoped to
    /// the project.
    pub async fn search(
        pool: &PgPool,
        project_id: DbId,
        search: &str,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks
             WHERE project_id = $1
               AND (title ILIKE '%' || $2 || '%' OR description ILIKE '%' || $2 || '%')
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(project_id)
            .bind(search)
            .fetch_all(pool)
            .await
    }
}
