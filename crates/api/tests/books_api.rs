//! The `/books` collection is an alias of `/tasks`: same handlers, same data.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, delete_auth, get, get_auth, patch_json_auth, post_json_auth,
    put_json_auth, token_for,
};
use serde_json::json;

#[tokio::test]
async fn test_books_and_tasks_list_the_same_rows() {
    let app = build_test_app();
    let token = token_for("u1");

    post_json_auth(app.clone(), "/api/u1/tasks", json!({ "title": "via tasks" }), &token).await;
    post_json_auth(app.clone(), "/api/u1/books", json!({ "title": "via books" }), &token).await;

    let tasks = body_json(get_auth(app.clone(), "/api/u1/tasks", &token).await).await;
    let books = body_json(get_auth(app, "/api/u1/books", &token).await).await;

    assert_eq!(tasks["count"], 2);
    assert_eq!(tasks, books);
}

#[tokio::test]
async fn test_books_item_routes_mirror_tasks() {
    let app = build_test_app();
    let token = token_for("u1");

    let response =
        post_json_auth(app.clone(), "/api/u1/books", json!({ "title": "Dune" }), &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["id"], 1);

    let via_tasks = body_json(get_auth(app.clone(), "/api/u1/tasks/1", &token).await).await;
    let via_books = body_json(get_auth(app.clone(), "/api/u1/books/1", &token).await).await;
    assert_eq!(via_tasks, created);
    assert_eq!(via_books, created);

    let response = put_json_auth(
        app.clone(),
        "/api/u1/books/1",
        json!({ "title": "Dune Messiah" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response =
        patch_json_auth(app.clone(), "/api/u1/books/1", json!({ "completed": true }), &token)
            .await;
    assert_eq!(response.status(), StatusCode::OK);
    let patched = body_json(response).await;
    assert_eq!(patched["title"], "Dune Messiah");
    assert_eq!(patched["completed"], true);

    let response = delete_auth(app.clone(), "/api/u1/books/1", &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(app, "/api/u1/tasks/1", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_books_require_auth_and_ownership() {
    let app = build_test_app();

    let response = get(app.clone(), "/api/u1/books").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(app, "/api/u1/books", &token_for("u2")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
