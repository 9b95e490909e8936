// ABOUTME: End-to-end tests for the todo HTTP API against in-memory SQLite
// ABOUTME: Drives the full router with tower's oneshot and checks status codes and JSON bodies

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use tickbox_api::create_app;
use tickbox_storage::DbState;

const ORIGIN: &str = "http://localhost:3000";

async fn test_app() -> Router {
    let db = DbState::in_memory().await.unwrap();
    create_app(db, ORIGIN).unwrap()
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

async fn create(app: &Router, title: &str) -> (StatusCode, Value) {
    send(app, Method::POST, "/api/todos", Some(json!({ "title": title }))).await
}

async fn list(app: &Router) -> Vec<Value> {
    let (status, body) = send(app, Method::GET, "/api/todos", None).await;
    assert_eq!(status, StatusCode::OK);
    body["todos"].as_array().cloned().unwrap()
}

fn ids(todos: &[Value]) -> Vec<i64> {
    todos.iter().map(|t| t["id"].as_i64().unwrap()).collect()
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::GET, "/api/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_create_then_list() {
    let app = test_app().await;

    let (status, body) = create(&app, "Buy milk").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "message": "Todo created." }));

    let todos = list(&app).await;
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0]["title"], "Buy milk");
    assert_eq!(todos[0]["completed"], false);
    assert!(todos[0]["id"].is_i64());
}

#[tokio::test]
async fn test_list_is_empty_initially() {
    let app = test_app().await;
    let (status, body) = send(&app, Method::GET, "/api/todos", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "todos": [] }));
}

#[tokio::test]
async fn test_create_rejects_blank_title() {
    let app = test_app().await;

    for title in ["", "   "] {
        let (status, body) = create(&app, title).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "Title is required.");
        assert!(body["request_id"].is_string());
    }

    assert!(list(&app).await.is_empty());
}

#[tokio::test]
async fn test_create_rejects_malformed_body() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::POST, "/api/todos", Some(json!({}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "INVALID_REQUEST");

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/todos")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert!(list(&app).await.is_empty());
}

#[tokio::test]
async fn test_list_orders_newest_first() {
    let app = test_app().await;

    for title in ["one", "two", "three"] {
        let (status, _) = create(&app, title).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let todos = list(&app).await;
    assert_eq!(ids(&todos), vec![3, 2, 1]);
    assert_eq!(todos[0]["title"], "three");
}

#[tokio::test]
async fn test_update_todo() {
    let app = test_app().await;
    create(&app, "Draft").await;
    let id = ids(&list(&app).await)[0];

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/todos/{}", id),
        Some(json!({ "title": "Final" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Todo updated." }));
    assert_eq!(list(&app).await[0]["title"], "Final");
}

#[tokio::test]
async fn test_update_rejects_blank_title() {
    let app = test_app().await;
    create(&app, "Keep me").await;
    let id = ids(&list(&app).await)[0];

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/todos/{}", id),
        Some(json!({ "title": "   " })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Title is required.");
    assert_eq!(list(&app).await[0]["title"], "Keep me");
}

#[tokio::test]
async fn test_update_nonexistent_todo_is_not_found() {
    let app = test_app().await;
    create(&app, "Existing").await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/todos/9999",
        Some(json!({ "title": "Ghost" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert_eq!(body["error"]["message"], "Todo not found");

    let todos = list(&app).await;
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0]["title"], "Existing");
}

#[tokio::test]
async fn test_toggle_twice_restores_original_value() {
    let app = test_app().await;
    create(&app, "Toggle me").await;
    let id = ids(&list(&app).await)[0];
    let uri = format!("/api/todos/{}/toggle", id);

    let (status, body) = send(&app, Method::PATCH, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Todo toggled.", "completed": true }));
    assert_eq!(list(&app).await[0]["completed"], true);

    let (status, body) = send(&app, Method::PATCH, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["completed"], false);
    assert_eq!(list(&app).await[0]["completed"], false);
}

#[tokio::test]
async fn test_toggle_nonexistent_todo_is_not_found() {
    let app = test_app().await;

    let (status, _) = send(&app, Method::PATCH, "/api/todos/42/toggle", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_id_beyond_column_range_is_not_found() {
    let app = test_app().await;
    create(&app, "Existing").await;

    let (status, body) = send(&app, Method::PATCH, "/api/todos/3000000000/toggle", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Todo not found");

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/todos/3000000000",
        Some(json!({ "title": "Ghost" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, "/api/todos/-3000000000", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert_eq!(list(&app).await.len(), 1);
}

#[tokio::test]
async fn test_delete_then_every_mutation_is_not_found() {
    let app = test_app().await;
    create(&app, "Short lived").await;
    let id = ids(&list(&app).await)[0];
    let item_uri = format!("/api/todos/{}", id);

    let (status, body) = send(&app, Method::DELETE, &item_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Todo deleted." }));
    assert!(list(&app).await.is_empty());

    let (status, _) = send(
        &app,
        Method::PATCH,
        &format!("/api/todos/{}/toggle", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::PUT,
        &item_uri,
        Some(json!({ "title": "Back again" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &item_uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert!(list(&app).await.is_empty());
}

#[tokio::test]
async fn test_non_numeric_id_is_rejected() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::DELETE, "/api/todos/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn test_unknown_route_and_wrong_method() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::GET, "/api/nonexistent", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    let (status, _) = send(&app, Method::POST, "/api/health", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_cors_preflight_from_allowed_origin() {
    let app = test_app().await;

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/todos/1")
        .header(header::ORIGIN, ORIGIN)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "x-custom-header")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], ORIGIN);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "DELETE");
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_HEADERS],
        "x-custom-header"
    );
}

#[tokio::test]
async fn test_cors_ignores_other_origins() {
    let app = test_app().await;

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/health")
        .header(header::ORIGIN, "http://evil.example.com")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

#[tokio::test]
async fn test_create_app_rejects_invalid_origin() {
    let db = DbState::in_memory().await.unwrap();
    assert!(create_app(db, "http://bad\norigin").is_err());
}

#[tokio::test]
async fn test_cors_wildcard_mirrors_request_origin() {
    let db = DbState::in_memory().await.unwrap();
    let app = create_app(db, "*").unwrap();

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/health")
        .header(header::ORIGIN, "http://anywhere.example.com")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://anywhere.example.com"
    );
}
