use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use todo_server::{app, router, ErrorBody, Todo, TodoList};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn error_message(response: axum::response::Response) -> String {
    body_json::<ErrorBody>(response).await.error
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

// --- list ---

#[tokio::test]
async fn list_todos_returns_seed_items() {
    let resp = app().oneshot(empty_request("GET", "/todos")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let todos: Vec<Todo> = body_json(resp).await;
    let ids: Vec<&str> = todos.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["1", "2"]);
    assert!(todos.iter().all(|t| !t.completed));
}

#[tokio::test]
async fn list_todos_wire_format() {
    let resp = app().oneshot(empty_request("GET", "/todos")).await.unwrap();
    let todos: serde_json::Value = body_json(resp).await;
    let first = &todos[0];
    assert_eq!(first["id"], "1");
    assert_eq!(first["text"], "Welcome to your todo list!");
    assert_eq!(first["completed"], false);
    let created_at = first["createdAt"].as_str().unwrap();
    assert!(created_at.ends_with('Z'), "{created_at}");
}

// --- create ---

#[tokio::test]
async fn create_todo_returns_201_with_trimmed_text() {
    let resp = app()
        .oneshot(json_request("POST", "/todos", r#"{"text":"  Buy milk  "}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let todo: Todo = body_json(resp).await;
    assert_eq!(todo.text, "Buy milk");
    assert!(!todo.completed);
    assert_ne!(todo.id, "1");
    assert_ne!(todo.id, "2");
}

#[tokio::test]
async fn create_todo_ignores_client_completed_flag() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/todos",
            r#"{"text":"Already done","completed":true}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let todo: Todo = body_json(resp).await;
    assert!(!todo.completed);
}

#[tokio::test]
async fn create_todo_without_content_type() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/todos")
                .body(r#"{"text":"plain"}"#.to_string())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn create_todo_blank_text_returns_400() {
    let db = TodoList::seeded().into_shared();
    for body in [r#"{"text":""}"#, r#"{"text":"   "}"#, r#"{}"#, r#"{"text":7}"#] {
        let resp = router(db.clone())
            .oneshot(json_request("POST", "/todos", body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(error_message(resp).await, "Text is required");
    }
    assert_eq!(db.read().await.len(), 2);
}

#[tokio::test]
async fn create_todo_malformed_json_returns_400() {
    for body in ["{not json", "", "null"] {
        let resp = app()
            .oneshot(json_request("POST", "/todos", body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{body:?}");
        assert_eq!(error_message(resp).await, "Invalid request body");
    }
}

#[tokio::test]
async fn create_todo_oversized_body_returns_400() {
    let body = format!(r#"{{"text":"{}"}}"#, "a".repeat(3_000_000));
    let resp = app()
        .oneshot(json_request("POST", "/todos", &body))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(resp).await, "Invalid request body");
}

// --- update ---

#[tokio::test]
async fn update_todo_not_found() {
    let resp = app()
        .oneshot(json_request("PUT", "/todos/999", r#"{"completed":true}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(error_message(resp).await, "Todo not found");
}

#[tokio::test]
async fn update_todo_malformed_body_checked_before_lookup() {
    let resp = app()
        .oneshot(json_request("PUT", "/todos/999", "{oops"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(resp).await, "Invalid request body");
}

#[tokio::test]
async fn update_todo_text_is_trimmed() {
    let resp = app()
        .oneshot(json_request("PUT", "/todos/1", r#"{"text":"  new  "}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let todo: Todo = body_json(resp).await;
    assert_eq!(todo.text, "new");
    assert!(!todo.completed);
}

#[tokio::test]
async fn update_todo_ignores_invalid_fields() {
    let resp = app()
        .oneshot(json_request(
            "PUT",
            "/todos/2",
            r#"{"completed":"yes","text":"   "}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let todo: Todo = body_json(resp).await;
    assert_eq!(todo.text, "Click the checkbox to mark items as complete");
    assert!(!todo.completed);
}

#[tokio::test]
async fn update_todo_oversized_body_returns_400() {
    let body = format!(r#"{{"text":"{}"}}"#, "b".repeat(3_000_000));
    let resp = app()
        .oneshot(json_request("PUT", "/todos/1", &body))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(resp).await, "Invalid request body");
}

// --- delete ---

#[tokio::test]
async fn delete_todo_not_found() {
    let resp = app()
        .oneshot(empty_request("DELETE", "/todos/does-not-exist"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(error_message(resp).await, "Todo not found");
}

#[tokio::test]
async fn delete_todo_returns_removed_item() {
    let db = TodoList::seeded().into_shared();
    let resp = router(db.clone())
        .oneshot(empty_request("DELETE", "/todos/2"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let removed: Todo = body_json(resp).await;
    assert_eq!(removed.id, "2");
    assert_eq!(db.read().await.len(), 1);

    let resp = router(db)
        .oneshot(empty_request("DELETE", "/todos/2"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- routing ---

#[tokio::test]
async fn unknown_path_returns_json_404() {
    let resp = app().oneshot(empty_request("GET", "/nope")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(error_message(resp).await, "Not found");
}

#[tokio::test]
async fn unsupported_method_returns_json_405() {
    for (method, uri) in [("PUT", "/todos"), ("PATCH", "/todos/1")] {
        let resp = app()
            .oneshot(json_request(method, uri, r#"{"completed":true}"#))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED, "{method} {uri}");
        assert_eq!(error_message(resp).await, "Method not allowed");
    }
}

// --- end-to-end scenario ---

#[tokio::test]
async fn crud_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/todos", r#"{"text":"Buy milk"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Todo = body_json(resp).await;
    assert_eq!(created.text, "Buy milk");
    let id = created.id;

    // list: seeds plus the new item, in insertion order
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/todos"))
        .await
        .unwrap();
    let todos: Vec<Todo> = body_json(resp).await;
    let ids: Vec<&str> = todos.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["1", "2", id.as_str()]);

    // complete it
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!("/todos/{id}"),
            r#"{"completed":true}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Todo = body_json(resp).await;
    assert!(updated.completed);
    assert_eq!(updated.text, "Buy milk");
    assert_eq!(updated.created_at, created.created_at);

    // delete the first seed item
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", "/todos/1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let removed: Todo = body_json(resp).await;
    assert_eq!(removed.id, "1");

    // list: the new item and "2" remain
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/todos"))
        .await
        .unwrap();
    let todos: Vec<Todo> = body_json(resp).await;
    let ids: Vec<&str> = todos.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["2", id.as_str()]);
    assert!(todos.iter().find(|t| t.id == id).unwrap().completed);
}
