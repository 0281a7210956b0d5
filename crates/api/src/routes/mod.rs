pub mod auth;
pub mod health;
pub mod project;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   register (public)
/// /auth/login                                      login (public)
/// /auth/me                                         current identity (requires auth)
///
/// /projects                                        list, create
/// /projects/paginated                              paginated list
/// /projects/search                                 title search (?query=)
/// /projects/{id}                                   get, update, delete
/// /projects/{id}/progress                          derived progress aggregate
///
/// /projects/{project_id}/tasks                     list, create
/// /projects/{project_id}/tasks/paginated           paginated list
/// /projects/{project_id}/tasks/search              title/description search (?query=)
/// /projects/{project_id}/tasks/overdue             overdue incomplete tasks
/// /projects/{project_id}/tasks/status/{completed}  filter by completion
/// /projects/{project_id}/tasks/priority/{priority} filter by priority
/// /projects/{project_id}/tasks/{task_id}           get, update, delete
/// /projects/{project_id}/tasks/{task_id}/toggle    flip completion (PATCH)
/// /projects/{project_id}/tasks/{task_id}/complete  mark completed (PATCH)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/projects", project::router())
}
