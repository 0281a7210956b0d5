//! Handlers for the `/projects` resource.
//!
//! Every operation takes the caller's resolved identity ([`AuthUser`]) and
//! passes it into the owner-filtered repository queries. A project that
//! exists under another owner is reported as `NotFound`, identically to one
//! that does not exist at all.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use taskhub_core::error::CoreError;
use taskhub_core::pagination::{clamp_limit, clamp_offset};
use taskhub_core::progress::{progress_percentage, ProgressSummary, ProjectStatus};
use taskhub_core::types::{DbId, Timestamp};
use taskhub_core::validation::{validate_project_description, validate_project_title};
use taskhub_db::models::project::{CreateProject, ProjectSummary, UpdateProject};
use taskhub_db::repositories::{ProjectRepo, TaskRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::{Page, PaginationParams, SearchParams};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// A project as returned to clients, with owner name and live task counts.
#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub owner_name: String,
    pub total_tasks: i64,
    pub completed_tasks: i64,
    pub progress_percentage: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<ProjectSummary> for ProjectResponse {
    fn from(summary: ProjectSummary) -> Self {
        let progress = progress_percentage(summary.total_tasks, summary.completed_tasks);
        Self {
            id: summary.id,
            title: summary.title,
            description: summary.description,
            owner_name: summary.owner_name,
            total_tasks: summary.total_tasks,
            completed_tasks: summary.completed_tasks,
            progress_percentage: progress,
            created_at: summary.created_at,
            updated_at: summary.updated_at,
        }
    }
}

/// Derived progress statistics for one project. Computed per request,
/// never persisted.
#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub project_id: DbId,
    pub project_title: String,
    pub total_tasks: i64,
    pub completed_tasks: i64,
    pub pending_tasks: i64,
    pub progress_percentage: f64,
    pub status: ProjectStatus,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<ProjectResponse>)> {
    validate_project_title(&input.title)?;
    validate_project_description(input.description.as_deref())?;

    let project = ProjectRepo::create(&state.pool, user.user_id, &input).await?;
    tracing::info!(project_id = project.id, user_id = user.user_id, "Created project");

    let summary = fetch_summary(&state, project.id, &user).await?;
    Ok((StatusCode::CREATED, Json(summary.into())))
}

/// GET /api/v1/projects
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<ProjectResponse>>> {
    let projects = ProjectRepo::list_by_owner(&state.pool, user.user_id).await?;
    Ok(Json(projects.into_iter().map(Into::into).collect()))
}

/// GET /api/v1/projects/paginated
pub async fn list_paginated(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Page<ProjectResponse>>> {
    let items =
        ProjectRepo::list_page_by_owner(&state.pool, user.user_id, params.limit, params.offset)
            .await?;
    let total = ProjectRepo::count_by_owner(&state.pool, user.user_id).await?;

    Ok(Json(Page {
        items: items.into_iter().map(Into::into).collect(),
        total,
        limit: clamp_limit(params.limit),
        offset: clamp_offset(params.offset),
    }))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProjectResponse>> {
    let summary = fetch_summary(&state, id, &user).await?;
    Ok(Json(summary.into()))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<ProjectResponse>> {
    validate_project_title(&input.title)?;
    validate_project_description(input.description.as_deref())?;

    ProjectRepo::update(&state.pool, id, user.user_id, &input)
        .await?
        .ok_or(not_found(id))?;
    tracing::info!(project_id = id, user_id = user.user_id, "Updated project");

    let summary = fetch_summary(&state, id, &user).await?;
    Ok(Json(summary.into()))
}

/// DELETE /api/v1/projects/{id}
///
/// Cascades to all of the project's tasks in one atomic statement.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ProjectRepo::delete(&state.pool, id, user.user_id).await?;
    if deleted {
        tracing::info!(project_id = id, user_id = user.user_id, "Deleted project");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// GET /api/v1/projects/search?query=
pub async fn search(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<ProjectResponse>>> {
    let projects =
        ProjectRepo::search_by_title(&state.pool, user.user_id, &params.query).await?;
    Ok(Json(projects.into_iter().map(Into::into).collect()))
}

/// GET /api/v1/projects/{id}/progress
///
/// Resolves the owned project, loads its current task set, and derives the
/// aggregate -- recomputed on every call.
pub async fn progress(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProgressResponse>> {
    let project = ProjectRepo::find_by_id_and_owner(&state.pool, id, user.user_id)
        .await?
        .ok_or(not_found(id))?;

    let tasks = TaskRepo::list_by_project(&state.pool, project.id).await?;
    let completed = tasks.iter().filter(|t| t.completed).count() as i64;
    let summary = ProgressSummary::from_counts(tasks.len() as i64, completed);

    Ok(Json(ProgressResponse {
        project_id: project.id,
        project_title: project.title,
        total_tasks: summary.total_tasks,
        completed_tasks: summary.completed_tasks,
        pending_tasks: summary.pending_tasks,
        progress_percentage: summary.progress_percentage,
        status: summary.status,
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Project",
        id,
    })
}

/// Load the owner-scoped summary row; `NotFound` covers both a missing id
/// and an id owned by someone else.
async fn fetch_summary(
    state: &AppState,
    id: DbId,
    user: &AuthUser,
) -> Result<ProjectSummary, AppError> {
    ProjectRepo::find_summary_by_id_and_owner(&state.pool, id, user.user_id)
        .await?
        .ok_or(not_found(id))
}
