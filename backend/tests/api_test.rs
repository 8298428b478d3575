//! Integration tests for the BFF in memory-store mode.

use axum::body::Body;
use axum::Router;
use bytes::Bytes;
use http::{Method, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use user_console_backend::config::{StoreMode, UnknownRolePolicy};
use user_console_backend::routes;
use user_console_backend::test_util::{
    memory_state, memory_state_with_config, sample_user, test_config, valid_create_body,
};
use user_console_common::UserRole;

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Bytes) {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header("Content-Type", "application/json");
    }
    let request = builder
        .body(match body {
            Some(value) => Body::from(value.to_string()),
            None => Body::empty(),
        })
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes)
}

fn as_json(bytes: &Bytes) -> Value {
    serde_json::from_slice(bytes).unwrap()
}

fn empty_app() -> Router {
    routes::app(memory_state(vec![]))
}

#[tokio::test]
async fn test_health_endpoint() {
    let (status, body) = send(&empty_app(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body)["status"], "ok");
}

#[tokio::test]
async fn test_list_users_starts_empty() {
    let (status, body) = send(&empty_app(), Method::GET, "/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body), json!([]));
}

#[tokio::test]
async fn test_create_user_returns_201_with_sequential_ids() {
    let app = empty_app();

    let (status, body) = send(&app, Method::POST, "/users", Some(valid_create_body())).await;
    assert_eq!(status, StatusCode::CREATED);
    let first = as_json(&body);
    assert_eq!(first["id"], 1);
    assert_eq!(first["firstName"], "Jane");
    assert_eq!(first["role"], "User");
    assert_eq!(first["roleId"], 2);
    assert!(first["createdAt"].is_string());

    let mut second_body = valid_create_body();
    second_body["email"] = json!("john.roe@example.com");
    let (status, body) = send(&app, Method::POST, "/users", Some(second_body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(as_json(&body)["id"], 2);
}

#[tokio::test]
async fn test_create_user_missing_email_is_rejected_and_not_stored() {
    let app = empty_app();

    let mut body = valid_create_body();
    body.as_object_mut().unwrap().remove("email");
    let (status, response) = send(&app, Method::POST, "/users", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let error = as_json(&response);
    assert_eq!(error["message"], "Validation failed");
    assert_eq!(error["errors"]["email"][0], "Email is required");

    // The user must not have been added to the store.
    let (_, list) = send(&app, Method::GET, "/users", None).await;
    assert_eq!(as_json(&list), json!([]));
}

#[tokio::test]
async fn test_create_user_unknown_role_rejected() {
    let app = empty_app();

    let mut body = valid_create_body();
    body["roleId"] = json!(99);
    let (status, response) = send(&app, Method::POST, "/users", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(as_json(&response)["errors"]["roleId"][0]
        .as_str()
        .unwrap()
        .contains("Unknown role id"));
}

#[tokio::test]
async fn test_create_user_unknown_role_coerced_when_configured() {
    let mut config = test_config(StoreMode::Memory, "http://localhost:5000/api");
    config.validation.unknown_role_policy = UnknownRolePolicy::Default;
    let app = routes::app(memory_state_with_config(vec![], config));

    let mut body = valid_create_body();
    body["roleId"] = json!(99);
    let (status, response) = send(&app, Method::POST, "/users", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    let user = as_json(&response);
    assert_eq!(user["role"], "User");
    assert_eq!(user["roleId"], 2);
}

#[tokio::test]
async fn test_get_user_not_found() {
    let (status, body) = send(&empty_app(), Method::GET, "/users/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(as_json(&body)["message"], "User not found");
}

#[tokio::test]
async fn test_update_changes_only_provided_fields() {
    let app = empty_app();

    let (_, created) = send(&app, Method::POST, "/users", Some(valid_create_body())).await;
    let created = as_json(&created);

    let (status, updated) = send(
        &app,
        Method::PUT,
        "/users/1",
        Some(json!({"country": "Japan"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let updated = as_json(&updated);
    assert_eq!(updated["country"], "Japan");
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["createdAt"], created["createdAt"]);
    assert_eq!(updated["email"], created["email"]);
    assert_eq!(updated["firstName"], created["firstName"]);
    assert_eq!(updated["lastName"], created["lastName"]);
    assert_eq!(updated["dateOfBirth"], created["dateOfBirth"]);
    assert_eq!(updated["role"], created["role"]);
    assert_eq!(updated["isActive"], created["isActive"]);
}

#[tokio::test]
async fn test_identical_update_is_idempotent() {
    let app = empty_app();
    send(&app, Method::POST, "/users", Some(valid_create_body())).await;

    let patch = json!({"country": "Japan", "isActive": false});
    let (_, first) = send(&app, Method::PUT, "/users/1", Some(patch.clone())).await;
    let (_, second) = send(&app, Method::PUT, "/users/1", Some(patch)).await;
    assert_eq!(as_json(&first), as_json(&second));
}

#[tokio::test]
async fn test_update_rejects_invalid_fields() {
    let app = empty_app();
    send(&app, Method::POST, "/users", Some(valid_create_body())).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/users/1",
        Some(json!({"email": "not-an-email"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(as_json(&body)["errors"]["email"].is_array());
}

#[tokio::test]
async fn test_update_missing_user_returns_404() {
    let (status, body) = send(
        &empty_app(),
        Method::PUT,
        "/users/42",
        Some(json!({"country": "Japan"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(as_json(&body)["message"], "User not found");
}

#[tokio::test]
async fn test_delete_user_then_gone() {
    let app = empty_app();
    send(&app, Method::POST, "/users", Some(valid_create_body())).await;

    let (status, body) = send(&app, Method::DELETE, "/users/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (status, _) = send(&app, Method::GET, "/users/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_nonexistent_returns_404_not_204() {
    let (status, body) = send(&empty_app(), Method::DELETE, "/users/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(as_json(&body)["message"], "User not found");
}

fn seeded_app() -> Router {
    routes::app(memory_state(vec![
        sample_user(1, UserRole::Admin, true, (2023, 1, 10)),
        sample_user(2, UserRole::User, false, (2023, 1, 20)),
        sample_user(3, UserRole::Guest, true, (2023, 3, 5)),
        sample_user(4, UserRole::Unknown, true, (2023, 3, 6)),
    ]))
}

#[tokio::test]
async fn test_stats_active_counts_sum_to_collection_size() {
    let (status, body) = send(&seeded_app(), Method::GET, "/stats/active", None).await;
    assert_eq!(status, StatusCode::OK);
    let stats = as_json(&body);
    assert_eq!(stats["activeCount"], 3);
    assert_eq!(stats["inactiveCount"], 1);
}

#[tokio::test]
async fn test_stats_roles_excludes_unknown_role_records() {
    let (status, body) = send(&seeded_app(), Method::GET, "/stats/roles", None).await;
    assert_eq!(status, StatusCode::OK);
    // The record with an out-of-enum role lands in no bucket.
    assert_eq!(as_json(&body), json!({"Admin": 1, "User": 1, "Guest": 1}));
}

#[tokio::test]
async fn test_stats_registration_sorted_and_sparse() {
    let app = routes::app(memory_state(vec![
        sample_user(1, UserRole::Admin, true, (2023, 1, 10)),
        sample_user(2, UserRole::User, false, (2023, 1, 20)),
        sample_user(3, UserRole::Guest, true, (2023, 3, 5)),
    ]));

    let (status, body) = send(&app, Method::GET, "/stats/registration", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        as_json(&body),
        json!([
            {"month": "2023-01", "count": 2},
            {"month": "2023-03", "count": 1}
        ])
    );
}

#[tokio::test]
async fn test_combined_user_stats() {
    let (status, body) = send(&seeded_app(), Method::GET, "/users/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    let stats = as_json(&body);
    assert_eq!(stats["activeCount"], 3);
    assert_eq!(stats["inactiveCount"], 1);
    assert_eq!(stats["roleDistribution"], json!({"Admin": 1, "User": 1, "Guest": 1}));
    assert_eq!(
        stats["monthlyRegistrations"],
        json!([
            {"month": "2023-01", "count": 2},
            {"month": "2023-03", "count": 2}
        ])
    );
}

#[tokio::test]
async fn test_stats_on_empty_store_are_all_zero() {
    let (status, body) = send(&empty_app(), Method::GET, "/users/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    let stats = as_json(&body);
    assert_eq!(stats["activeCount"], 0);
    assert_eq!(stats["inactiveCount"], 0);
    assert_eq!(stats["monthlyRegistrations"], json!([]));
}
