//! Handlers for the `/projects/{project_id}/tasks` resource.
//!
//! Every operation resolves the parent project through the owner-scoped
//! lookup before touching tasks, so no task operation can succeed against a
//! project the caller does not own. Task lookups are additionally scoped by
//! project membership: a task id valid in one project never resolves inside
//! another, even for the same owner.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use taskhub_core::error::CoreError;
use taskhub_core::pagination::{clamp_limit, clamp_offset};
use taskhub_core::progress::is_overdue;
use taskhub_core::types::{DbId, DueDate, Timestamp};
use taskhub_core::validation::{validate_task_description, validate_task_title};
use taskhub_db::models::project::Project;
use taskhub_db::models::task::{CreateTask, Task, TaskPriority, UpdateTask};
use taskhub_db::repositories::{ProjectRepo, TaskRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::{Page, PaginationParams, SearchParams};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// A task as returned to clients, with the derived `overdue` flag and its
/// parent project's id and title.
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DueDate>,
    pub completed: bool,
    pub completed_at: Option<Timestamp>,
    pub priority: TaskPriority,
    /// Derived: due date passed and still incomplete. Never stored.
    pub overdue: bool,
    pub project_id: DbId,
    pub project_title: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TaskResponse {
    fn new(task: Task, project: &Project, today: DueDate) -> Self {
        Self {
            overdue: is_overdue(task.due_date, task.completed, today),
            id: task.id,
            title: task.title,
            description: task.description,
            due_date: task.due_date,
            completed: task.completed,
            completed_at: task.completed_at,
            priority: task.priority,
            project_id: project.id,
            project_title: project.title.clone(),
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/projects/{project_id}/tasks
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateTask>,
) -> AppResult<(StatusCode, Json<TaskResponse>)> {
    validate_task_title(&input.title)?;
    validate_task_description(input.description.as_deref())?;

    let project = resolve_project(&state, project_id, &user).await?;
    let task = TaskRepo::create(&state.pool, project.id, &input).await?;
    tracing::info!(task_id = task.id, project_id = project.id, "Created task");

    Ok((
        StatusCode::CREATED,
        Json(TaskResponse::new(task, &project, today())),
    ))
}

/// GET /api/v1/projects/{project_id}/tasks
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<TaskResponse>>> {
    let project = resolve_project(&state, project_id, &user).await?;
    let tasks = TaskRepo::list_by_project(&state.pool, project.id).await?;
    Ok(Json(to_responses(tasks, &project)))
}

/// GET /api/v1/projects/{project_id}/tasks/paginated
pub async fn list_paginated(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Page<TaskResponse>>> {
    let project = resolve_project(&state, project_id, &user).await?;
    let tasks =
        TaskRepo::list_page_by_project(&state.pool, project.id, params.limit, params.offset)
            .await?;
    let total = TaskRepo::count_by_project(&state.pool, project.id).await?;

    Ok(Json(Page {
        items: to_responses(tasks, &project),
        total,
        limit: clamp_limit(params.limit),
        offset: clamp_offset(params.offset),
    }))
}

/// GET /api/v1/projects/{project_id}/tasks/{task_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path((project_id, task_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<TaskResponse>> {
    let project = resolve_project(&state, project_id, &user).await?;
    let task = TaskRepo::find_by_id_and_project(&state.pool, task_id, project.id)
        .await?
        .ok_or(task_not_found(task_id))?;
    Ok(Json(TaskResponse::new(task, &project, today())))
}

/// PUT /api/v1/projects/{project_id}/tasks/{task_id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path((project_id, task_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateTask>,
) -> AppResult<Json<TaskResponse>> {
    validate_task_title(&input.title)?;
    validate_task_description(input.description.as_deref())?;

    let project = resolve_project(&state, project_id, &user).await?;
    let task = TaskRepo::update(&state.pool, task_id, project.id, &input)
        .await?
        .ok_or(task_not_found(task_id))?;
    tracing::info!(task_id, project_id = project.id, "Updated task");

    Ok(Json(TaskResponse::new(task, &project, today())))
}

/// DELETE /api/v1/projects/{project_id}/tasks/{task_id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path((project_id, task_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let project = resolve_project(&state, project_id, &user).await?;
    let deleted = TaskRepo::delete(&state.pool, task_id, project.id).await?;
    if deleted {
        tracing::info!(task_id, project_id = project.id, "Deleted task");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(task_not_found(task_id))
    }
}

/// PATCH /api/v1/projects/{project_id}/tasks/{task_id}/toggle
///
/// Flip completion. false -> true stamps the completion time; true -> false
/// clears it.
pub async fn toggle_completion(
    State(state): State<AppState>,
    user: AuthUser,
    Path((project_id, task_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<TaskResponse>> {
    let project = resolve_project(&state, project_id, &user).await?;
    let task = TaskRepo::toggle_completion(&state.pool, task_id, project.id)
        .await?
        .ok_or(task_not_found(task_id))?;
    tracing::info!(task_id, completed = task.completed, "Toggled task completion");

    Ok(Json(TaskResponse::new(task, &project, today())))
}

/// PATCH /api/v1/projects/{project_id}/tasks/{task_id}/complete
///
/// Idempotent: completing an already-complete task succeeds and re-stamps
/// the completion time.
pub async fn mark_completed(
    State(state): State<AppState>,
    user: AuthUser,
    Path((project_id, task_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<TaskResponse>> {
    let project = resolve_project(&state, project_id, &user).await?;
    let task = TaskRepo::set_completed(&state.pool, task_id, project.id)
        .await?
        .ok_or(task_not_found(task_id))?;
    tracing::info!(task_id, "Marked task completed");

    Ok(Json(TaskResponse::new(task, &project, today())))
}

/// GET /api/v1/projects/{project_id}/tasks/status/{completed}
pub async fn list_by_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path((project_id, completed)): Path<(DbId, bool)>,
) -> AppResult<Json<Vec<TaskResponse>>> {
    let project = resolve_project(&state, project_id, &user).await?;
    let tasks = TaskRepo::list_by_status(&state.pool, project.id, completed).await?;
    Ok(Json(to_responses(tasks, &project)))
}

/// GET /api/v1/projects/{project_id}/tasks/priority/{priority}
pub async fn list_by_priority(
    State(state): State<AppState>,
    user: AuthUser,
    Path((project_id, priority)): Path<(DbId, TaskPriority)>,
) -> AppResult<Json<Vec<TaskResponse>>> {
    let project = resolve_project(&state, project_id, &user).await?;
    let tasks = TaskRepo::list_by_priority(&state.pool, project.id, priority).await?;
    Ok(Json(to_responses(tasks, &project)))
}

/// GET /api/v1/projects/{project_id}/tasks/overdue
pub async fn list_overdue(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<TaskResponse>>> {
    let project = resolve_project(&state, project_id, &user).await?;
    let tasks = TaskRepo::list_overdue(&state.pool, project.id, today()).await?;
    Ok(Json(to_responses(tasks, &project)))
}

/// GET /api/v1/projects/{project_id}/tasks/search?query=
pub async fn search(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<TaskResponse>>> {
    let project = resolve_project(&state, project_id, &user).await?;
    let tasks = TaskRepo::search(&state.pool, project.id, &params.query).await?;
    Ok(Json(to_responses(tasks, &project)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Ownership gate for every task operation: the parent project must resolve
/// under the caller's identity or the whole request is `NotFound`.
async fn resolve_project(
    state: &AppState,
    project_id: DbId,
    user: &AuthUser,
) -> Result<Project, AppError> {
    ProjectRepo::find_by_id_and_owner(&state.pool, project_id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))
}

fn task_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Task", id })
}

fn today() -> DueDate {
    Utc::now().date_naive()
}

fn to_responses(tasks: Vec<Task>, project: &Project) -> Vec<TaskResponse> {
    let today = today();
    tasks
        .into_iter()
        .map(|task| TaskResponse::new(task, project, today))
        .collect()
}
