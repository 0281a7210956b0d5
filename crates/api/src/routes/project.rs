//! Route definitions for the `/projects` resource.
//!
//! Also nests the project-scoped task routes under
//! `/projects/{project_id}/tasks/...`.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::{project, task};
use crate::state::AppState;

/// Routes mounted at `/projects`. Every route requires authentication via
/// the `AuthUser` extractor on its handler.
///
/// ```text
/// GET    /                                  -> list
/// POST   /                                  -> create
/// GET    /paginated                         -> list_paginated
/// GET    /search                            -> search (?query=)
/// GET    /{id}                              -> get_by_id
/// PUT    /{id}                              -> update
/// DELETE /{id}                              -> delete
/// GET    /{id}/progress                     -> progress
///
/// GET    /{project_id}/tasks                -> list
/// POST   /{project_id}/tasks                -> create
/// GET    /{project_id}/tasks/paginated      -> list_paginated
/// GET    /{project_id}/tasks/search         -> search (?query=)
/// GET    /{project_id}/tasks/overdue        -> list_overdue
/// GET    /{project_id}/tasks/status/{completed}   -> list_by_status
/// GET    /{project_id}/tasks/priority/{priority}  -> list_by_priority
/// GET    /{project_id}/tasks/{task_id}      -> get_by_id
/// PUT    /{project_id}/tasks/{task_id}      -> update
/// DELETE /{project_id}/tasks/{task_id}      -> delete
/// PATCH  /{project_id}/tasks/{task_id}/toggle    -> toggle_completion
/// PATCH  /{project_id}/tasks/{task_id}/complete  -> mark_completed
/// ```
pub fn router() -> Router<AppState> {
    let task_routes = Router::new()
        .route("/", get(task::list).post(task::create))
        .route("/paginated", get(task::list_paginated))
        .route("/search", get(task::search))
        .route("/overdue", get(task::list_overdue))
        .route("/status/{completed}", get(task::list_by_status))
        .route("/priority/{priority}", get(task::list_by_priority))
        .route(
            "/{task_id}",
            get(task::get_by_id).put(task::update).delete(task::delete),
        )
        .route("/{task_id}/toggle", patch(task::toggle_completion))
        .route("/{task_id}/complete", patch(task::mark_completed));

    Router::new()
        .route("/", get(project::list).post(project::create))
        .route("/paginated", get(project::list_paginated))
        .route("/search", get(project::search))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route("/{id}/progress", get(project::progress))
        .nest("/{project_id}/tasks", task_routes)
}
