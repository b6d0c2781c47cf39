//! End-to-end tests for the ordered-association endpoints, driven
//! through the router.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use aula_api::config::ServerConfig;
use aula_api::router::api_routes;
use aula_api::routes;
use aula_api::state::AppState;

fn app(pool: PgPool) -> axum::Router {
    let state = AppState {
        pool,
        config: Arc::new(ServerConfig::from_env()),
    };
    axum::Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", api_routes())
        .with_state(state)
}

async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => {
            builder = builder.header("content-type", "application/json");
            builder.body(Body::from(body.to_string())).unwrap()
        }
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

async fn create_learning(app: &axum::Router, title: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/v1/learning-materials",
        Some(json!({ "title": title })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_answers_ok(pool: PgPool) {
    let app = app(pool);
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn course_learning_order_commit_flow(pool: PgPool) {
    let app = app(pool);

    let (status, course) = send(
        &app,
        "POST",
        "/api/v1/courses",
        Some(json!({ "name": "Khóa học Rust" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(course["data"]["slug"], "khoa-hoc-rust");
    let course_id = course["data"]["id"].as_i64().unwrap();

    let ownership = create_learning(&app, "Ownership").await;
    let borrowing = create_learning(&app, "Borrowing").await;
    let lifetimes = create_learning(&app, "Lifetimes").await;

    // First save: three new rows, synthetic negative ids.
    let (status, report) = send(
        &app,
        "PUT",
        &format!("/api/v1/courses/{course_id}/learnings/order"),
        Some(json!({
            "items": [
                { "id": -1, "learnings_id": ownership },
                { "id": -2, "learnings_id": borrowing },
                { "id": -3, "learnings_id": lifetimes },
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["data"]["created"], 3);
    assert_eq!(report["data"]["updated"], 0);
    assert_eq!(report["data"]["deleted"], 0);

    let (status, listed) = send(
        &app,
        "GET",
        &format!("/api/v1/courses/{course_id}/learnings"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let rows = listed["data"].as_array().unwrap();
    let titles: Vec<_> = rows
        .iter()
        .map(|r| r["learning_title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Ownership", "Borrowing", "Lifetimes"]);
    let row_ids: Vec<i64> = rows.iter().map(|r| r["id"].as_i64().unwrap()).collect();

    // Reorder: last row to the front with a quiz attached, middle row
    // dropped.
    let (_, quiz) = send(
        &app,
        "POST",
        "/api/v1/quizzes",
        Some(json!({ "title": "Kiểm tra Rust" })),
    )
    .await;
    let quiz_id = quiz["data"]["id"].as_i64().unwrap();

    let desired = json!({
        "items": [
            { "id": row_ids[2], "quiz_id": quiz_id },
            { "id": row_ids[0] },
        ]
    });
    let (status, report) = send(
        &app,
        "PUT",
        &format!("/api/v1/courses/{course_id}/learnings/order"),
        Some(desired.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["data"]["created"], 0);
    assert_eq!(report["data"]["updated"], 2);
    assert_eq!(report["data"]["deleted"], 1);

    let (_, listed) = send(
        &app,
        "GET",
        &format!("/api/v1/courses/{course_id}/learnings"),
        None,
    )
    .await;
    let rows = listed["data"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["learning_title"], "Lifetimes");
    assert_eq!(rows[0]["position"], 1);
    assert_eq!(rows[0]["quiz_title"], "Kiểm tra Rust");
    assert_eq!(rows[1]["learning_title"], "Ownership");
    assert_eq!(rows[1]["position"], 2);

    // Sending the same list again finds nothing to do.
    let (status, report) = send(
        &app,
        "PUT",
        &format!("/api/v1/courses/{course_id}/learnings/order"),
        Some(desired),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["data"]["created"], 0);
    assert_eq!(report["data"]["updated"], 0);
    assert_eq!(report["data"]["deleted"], 0);

    // A row from another course is rejected before anything runs.
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/v1/courses/{course_id}/learnings/order"),
        Some(json!({ "items": [{ "id": 999_999 }] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn quiz_question_dialog_and_reorder_flow(pool: PgPool) {
    let app = app(pool);

    let (_, quiz) = send(
        &app,
        "POST",
        "/api/v1/quizzes",
        Some(json!({ "title": "Borrow checker quiz" })),
    )
    .await;
    let quiz_id = quiz["data"]["id"].as_i64().unwrap();

    // The dialog creates questions one at a time; ranks accumulate.
    let (status, first) = send(
        &app,
        "POST",
        &format!("/api/v1/quizzes/{quiz_id}/questions"),
        Some(json!({ "question": "What moves ownership?", "correct_answer": "assignment" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["data"]["order_index"], 1);
    let first_id = first["data"]["id"].as_i64().unwrap();

    let (_, second) = send(
        &app,
        "POST",
        &format!("/api/v1/quizzes/{quiz_id}/questions"),
        Some(json!({ "question": "What is a borrow?", "correct_answer": "a reference" })),
    )
    .await;
    assert_eq!(second["data"]["order_index"], 2);
    let second_id = second["data"]["id"].as_i64().unwrap();

    // Empty question text is rejected before any persistence.
    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/v1/quizzes/{quiz_id}/questions"),
        Some(json!({ "question": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    // Editing payload does not touch the rank.
    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/v1/questions/{first_id}"),
        Some(json!({ "question": "What moves ownership in Rust?", "correct_answer": "assignment", "reason": "moves by default" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["question"], "What moves ownership in Rust?");
    assert_eq!(updated["data"]["order_index"], 1);

    // Options are immediate CRUD under a question.
    let (status, option) = send(
        &app,
        "POST",
        &format!("/api/v1/questions/{first_id}/options"),
        Some(json!({ "option_key": "A", "text": "assignment" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let option_id = option["data"]["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/v1/questions/{first_id}/options"),
        Some(json!({ "option_key": "B", "text": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Reorder: swap the two questions.
    let (status, report) = send(
        &app,
        "PUT",
        &format!("/api/v1/quizzes/{quiz_id}/questions/order"),
        Some(json!({ "items": [{ "id": second_id }, { "id": first_id }] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["data"]["updated"], 2);
    assert_eq!(report["data"]["created"], 0);
    assert_eq!(report["data"]["deleted"], 0);

    let (_, questions) = send(
        &app,
        "GET",
        &format!("/api/v1/quizzes/{quiz_id}/questions"),
        None,
    )
    .await;
    let rows = questions["data"].as_array().unwrap();
    assert_eq!(rows[0]["id"].as_i64().unwrap(), second_id);
    assert_eq!(rows[0]["order_index"], 1);
    assert_eq!(rows[1]["id"].as_i64().unwrap(), first_id);
    assert_eq!(rows[1]["order_index"], 2);
    assert_eq!(rows[1]["options"].as_array().unwrap().len(), 1);
    assert_eq!(rows[1]["options"][0]["id"].as_i64().unwrap(), option_id);

    // Deleting from the dialog is immediate.
    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/v1/questions/{second_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, questions) = send(
        &app,
        "GET",
        &format!("/api/v1/quizzes/{quiz_id}/questions"),
        None,
    )
    .await;
    let rows = questions["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"].as_i64().unwrap(), first_id);
}
