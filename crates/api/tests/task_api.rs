//! HTTP-level integration tests for the project-scoped task endpoints.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{
    body_json, create_project, create_task, delete_auth, get_auth, patch_auth, post_json_auth,
    put_json_auth, register_user,
};
use sqlx::PgPool;

fn yesterday() -> String {
    (Utc::now().date_naive() - Duration::days(1)).to_string()
}

fn tomorrow() -> String {
    (Utc::now().date_naive() + Duration::days(1)).to_string()
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_task_defaults(pool: PgPool) {
    let token = register_user(&pool, "alice@example.com").await;
    let project_id = create_project(&pool, &token, "Launch").await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/projects/{project_id}/tasks"),
        &token,
        serde_json::json!({ "title": "Write docs" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["title"], "Write docs");
    assert_eq!(json["completed"], false);
    assert_eq!(json["completed_at"], serde_json::Value::Null);
    assert_eq!(json["priority"], "MEDIUM");
    assert_eq!(json["overdue"], false);
    assert_eq!(json["project_id"], project_id);
    assert_eq!(json["project_title"], "Launch");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_task_short_title_returns_400(pool: PgPool) {
    let token = register_user(&pool, "alice@example.com").await;
    let project_id = create_project(&pool, &token, "Launch").await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/projects/{project_id}/tasks"),
        &token,
        serde_json::json!({ "title": "x" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_task_in_foreign_project_returns_404(pool: PgPool) {
    let alice = register_user(&pool, "alice@example.com").await;
    let bob = register_user(&pool, "bob@example.com").await;
    let project_id = create_project(&pool, &alice, "Alice's project").await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/projects/{project_id}/tasks"),
        &bob,
        serde_json::json!({ "title": "Sneaky task" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_task_id_does_not_resolve_in_other_project(pool: PgPool) {
    let token = register_user(&pool, "alice@example.com").await;
    let project_a = create_project(&pool, &token, "Project A").await;
    let project_b = create_project(&pool, &token, "Project B").await;
    let task_id = create_task(&pool, &token, project_a, serde_json::json!({ "title": "In A" }))
        .await;

    // Same owner, wrong parent project.
    let app = common::build_test_app(pool);
    let response = get_auth(
        app,
        &format!("/api/v1/projects/{project_b}/tasks/{task_id}"),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_task_preserves_completion_state(pool: PgPool) {
    let token = register_user(&pool, "alice@example.com").await;
    let project_id = create_project(&pool, &token, "Launch").await;
    let task_id = create_task(&pool, &token, project_id, serde_json::json!({ "title": "Draft" }))
        .await;

    // Complete, then edit the title. Completion must survive the edit.
    let app = common::build_test_app(pool.clone());
    patch_auth(
        app,
        &format!("/api/v1/projects/{project_id}/tasks/{task_id}/complete"),
        &token,
    )
    .await;

    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        &format!("/api/v1/projects/{project_id}/tasks/{task_id}"),
        &token,
        serde_json::json!({ "title": "Final draft", "description": null, "due_date": null }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["title"], "Final draft");
    assert_eq!(json["completed"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_task_keeps_priority_when_omitted(pool: PgPool) {
    let token = register_user(&pool, "alice@example.com").await;
    let project_id = create_project(&pool, &token, "Launch").await;
    let task_id = create_task(
        &pool,
        &token,
        project_id,
        serde_json::json!({ "title": "Urgent thing", "priority": "HIGH" }),
    )
    .await;

    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        &format!("/api/v1/projects/{project_id}/tasks/{task_id}"),
        &token,
        serde_json::json!({ "title": "Urgent thing v2", "description": null, "due_date": null }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["priority"], "HIGH");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_task(pool: PgPool) {
    let token = register_user(&pool, "alice@example.com").await;
    let project_id = create_project(&pool, &token, "Launch").await;
    let task_id = create_task(&pool, &token, project_id, serde_json::json!({ "title": "Gone" }))
        .await;

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(
        app,
        &format!("/api/v1/projects/{project_id}/tasks/{task_id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get_auth(
        app,
        &format!("/api/v1/projects/{project_id}/tasks/{task_id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Completion state machine
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_toggle_round_trip(pool: PgPool) {
    let token = register_user(&pool, "alice@example.com").await;
    let project_id = create_project(&pool, &token, "Launch").await;
    let task_id = create_task(&pool, &token, project_id, serde_json::json!({ "title": "Flip me" }))
        .await;
    let uri = format!("/api/v1/projects/{project_id}/tasks/{task_id}/toggle");

    let app = common::build_test_app(pool.clone());
    let response = patch_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["completed"], true);
    assert!(json["completed_at"].is_string());

    let app = common::build_test_app(pool);
    let response = patch_auth(app, &uri, &token).await;
    let json = body_json(response).await;
    assert_eq!(json["completed"], false);
    assert_eq!(json["completed_at"], serde_json::Value::Null);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_mark_completed_is_idempotent(pool: PgPool) {
    let token = register_user(&pool, "alice@example.com").await;
    let project_id = create_project(&pool, &token, "Launch").await;
    let task_id = create_task(&pool, &token, project_id, serde_json::json!({ "title": "Ship it" }))
        .await;
    let uri = format!("/api/v1/projects/{project_id}/tasks/{task_id}/complete");

    let app = common::build_test_app(pool.clone());
    let first = patch_auth(app, &uri, &token).await;
    assert_eq!(first.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let second = patch_auth(app, &uri, &token).await;
    assert_eq!(second.status(), StatusCode::OK);
    let json = body_json(second).await;
    assert_eq!(json["completed"], true);
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_filter_by_status(pool: PgPool) {
    let token = register_user(&pool, "alice@example.com").await;
    let project_id = create_project(&pool, &token, "Launch").await;
    let done = create_task(&pool, &token, project_id, serde_json::json!({ "title": "Done one" }))
        .await;
    create_task(&pool, &token, project_id, serde_json::json!({ "title": "Open one" })).await;

    let app = common::build_test_app(pool.clone());
    patch_auth(
        app,
        &format!("/api/v1/projects/{project_id}/tasks/{done}/complete"),
        &token,
    )
    .await;

    let app = common::build_test_app(pool);
    let response = get_auth(
        app,
        &format!("/api/v1/projects/{project_id}/tasks/status/true"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Done one");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_filter_by_priority(pool: PgPool) {
    let token = register_user(&pool, "alice@example.com").await;
    let project_id = create_project(&pool, &token, "Launch").await;
    create_task(
        &pool,
        &token,
        project_id,
        serde_json::json!({ "title": "Urgent", "priority": "HIGH" }),
    )
    .await;
    create_task(
        &pool,
        &token,
        project_id,
        serde_json::json!({ "title": "Whenever", "priority": "LOW" }),
    )
    .await;

    let app = common::build_test_app(pool);
    let response = get_auth(
        app,
        &format!("/api/v1/projects/{project_id}/tasks/priority/HIGH"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Urgent");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_overdue_excludes_completed_and_future(pool: PgPool) {
    let token = register_user(&pool, "alice@example.com").await;
    let project_id = create_project(&pool, &token, "Launch").await;

    let late = create_task(
        &pool,
        &token,
        project_id,
        serde_json::json!({ "title": "Late", "due_date": yesterday() }),
    )
    .await;
    let done_late = create_task(
        &pool,
        &token,
        project_id,
        serde_json::json!({ "title": "Late but done", "due_date": yesterday() }),
    )
    .await;
    create_task(
        &pool,
        &token,
        project_id,
        serde_json::json!({ "title": "Future", "due_date": tomorrow() }),
    )
    .await;
    create_task(&pool, &token, project_id, serde_json::json!({ "title": "Dateless" })).await;

    let app = common::build_test_app(pool.clone());
    patch_auth(
        app,
        &format!("/api/v1/projects/{project_id}/tasks/{done_late}/complete"),
        &token,
    )
    .await;

    let app = common::build_test_app(pool);
    let response = get_auth(
        app,
        &format!("/api/v1/projects/{project_id}/tasks/overdue"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], late);
    assert_eq!(items[0]["overdue"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_search_matches_title_and_description(pool: PgPool) {
    let token = register_user(&pool, "alice@example.com").await;
    let project_id = create_project(&pool, &token, "Launch").await;
    create_task(
        &pool,
        &token,
        project_id,
        serde_json::json!({ "title": "Deploy backend" }),
    )
    .await;
    create_task(
        &pool,
        &token,
        project_id,
        serde_json::json!({ "title": "Misc", "description": "deploy the frontend too" }),
    )
    .await;
    create_task(&pool, &token, project_id, serde_json::json!({ "title": "Unrelated" })).await;

    let app = common::build_test_app(pool);
    let response = get_auth(
        app,
        &format!("/api/v1/projects/{project_id}/tasks/search?query=DEPLOY"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_paginated_tasks(pool: PgPool) {
    let token = register_user(&pool, "alice@example.com").await;
    let project_id = create_project(&pool, &token, "Launch").await;
    for i in 0..5 {
        create_task(
            &pool,
            &token,
            project_id,
            serde_json::json!({ "title": format!("Task {i}") }),
        )
        .await;
    }

    let app = common::build_test_app(pool);
    let response = get_auth(
        app,
        &format!("/api/v1/projects/{project_id}/tasks/paginated?limit=3"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["total"], 5);
    assert_eq!(json["limit"], 3);
    assert_eq!(json["offset"], 0);
    assert_eq!(json["items"].as_array().unwrap().len(), 3);
}

// ---------------------------------------------------------------------------
// End-to-end scenario
// ---------------------------------------------------------------------------

/// Full walkthrough: register, create a project, add an overdue task,
/// complete it, and watch the derived views update.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_full_task_lifecycle(pool: PgPool) {
    let token = register_user(&pool, "alice@example.com").await;
    let project_id = create_project(&pool, &token, "Launch").await;

    let task_id = create_task(
        &pool,
        &token,
        project_id,
        serde_json::json!({
            "title": "Finish landing page",
            "due_date": yesterday(),
            "priority": "HIGH",
        }),
    )
    .await;

    // The task shows up as overdue.
    let app = common::build_test_app(pool.clone());
    let response = get_auth(
        app,
        &format!("/api/v1/projects/{project_id}/tasks/overdue"),
        &token,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);

    // Complete it.
    let app = common::build_test_app(pool.clone());
    let response = patch_auth(
        app,
        &format!("/api/v1/projects/{project_id}/tasks/{task_id}/complete"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["completed"], true);
    assert_eq!(json["overdue"], false);

    // The overdue list is now empty.
    let app = common::build_test_app(pool.clone());
    let response = get_auth(
        app,
        &format!("/api/v1/projects/{project_id}/tasks/overdue"),
        &token,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 0);

    // Progress reads 1/1, 100%, COMPLETED.
    let app = common::build_test_app(pool);
    let response = get_auth(app, &format!("/api/v1/projects/{project_id}/progress"), &token).await;
    let json = body_json(response).await;
    assert_eq!(json["total_tasks"], 1);
    assert_eq!(json["completed_tasks"], 1);
    assert_eq!(json["progress_percentage"], 100.0);
    assert_eq!(json["status"], "COMPLETED");
}
