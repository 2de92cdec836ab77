use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mock_server::{app, app_with_auth, LoginResponse, Todo};
use tower::{Service, ServiceExt};

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
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

fn with_token(mut req: Request<String>, token: &str) -> Request<String> {
    req.headers_mut().insert(
        http::header::AUTHORIZATION,
        format!("Bearer {token}").parse().unwrap(),
    );
    req
}

async fn send(app: &mut Router, req: Request<String>) -> axum::response::Response {
    ServiceExt::<Request<String>>::ready(app)
        .await
        .unwrap()
        .call(req)
        .await
        .unwrap()
}

// --- list ---

#[tokio::test]
async fn list_todos_empty() {
    let resp = app().oneshot(empty_request("GET", "/todos")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let todos: Vec<Todo> = body_json(resp).await;
    assert!(todos.is_empty());
}

// --- create ---

#[tokio::test]
async fn create_todo_returns_created_item() {
    let resp = app()
        .oneshot(json_request("POST", "/todos", r#"{"title":"Buy milk","done":false}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let todo: Todo = body_json(resp).await;
    assert_eq!(todo.title, "Buy milk");
    assert!(!todo.done);
}

#[tokio::test]
async fn create_todo_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/todos", r#"{"not_title":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- toggle / update / delete on unknown ids ---

#[tokio::test]
async fn toggle_todo_not_found() {
    let resp = app()
        .oneshot(empty_request(
            "POST",
            "/todos/00000000-0000-0000-0000-000000000000/toggle",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn toggle_todo_unknown_id_shape_returns_404() {
    let resp = app()
        .oneshot(empty_request("POST", "/todos/not-a-uuid/toggle"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_uuid_ids_are_not_found_on_every_item_route() {
    let mut app = app();

    let resp = send(&mut app, empty_request("DELETE", "/todos/missing")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = send(&mut app, json_request("PUT", "/todos/42", r#"{"title":"x"}"#)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_todo_not_found() {
    let resp = app()
        .oneshot(json_request(
            "PUT",
            "/todos/00000000-0000-0000-0000-000000000000",
            r#"{"title":"Nope"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_todo_not_found() {
    let resp = app()
        .oneshot(empty_request(
            "DELETE",
            "/todos/00000000-0000-0000-0000-000000000000",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    let mut app = app();

    // create
    let resp = send(&mut app, json_request("POST", "/todos", r#"{"title":"Walk dog"}"#)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let created: Todo = body_json(resp).await;
    assert!(!created.done);
    let id = created.id;

    // toggle on, then off
    let resp = send(&mut app, empty_request("POST", &format!("/todos/{id}/toggle"))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let toggled: Todo = body_json(resp).await;
    assert!(toggled.done);
    let resp = send(&mut app, empty_request("POST", &format!("/todos/{id}/toggle"))).await;
    let toggled: Todo = body_json(resp).await;
    assert!(!toggled.done);

    // rename leaves done untouched
    send(&mut app, empty_request("POST", &format!("/todos/{id}/toggle"))).await;
    let resp = send(
        &mut app,
        json_request("PUT", &format!("/todos/{id}"), r#"{"title":"Walk cat"}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Todo = body_json(resp).await;
    assert_eq!(updated.title, "Walk cat");
    assert!(updated.done);

    // update without a title is rejected
    let resp = send(&mut app, json_request("PUT", &format!("/todos/{id}"), "{}")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // list keeps one item
    let resp = send(&mut app, empty_request("GET", "/todos")).await;
    let todos: Vec<Todo> = body_json(resp).await;
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].id, id);

    // delete
    let resp = send(&mut app, empty_request("DELETE", &format!("/todos/{id}"))).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    // delete again — 404
    let resp = send(&mut app, empty_request("DELETE", &format!("/todos/{id}"))).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = send(&mut app, empty_request("GET", "/todos")).await;
    let todos: Vec<Todo> = body_json(resp).await;
    assert!(todos.is_empty());
}

#[tokio::test]
async fn list_preserves_insertion_order() {
    let mut app = app();
    for title in ["one", "two", "three"] {
        let body = format!(r#"{{"title":"{title}"}}"#);
        send(&mut app, json_request("POST", "/todos", &body)).await;
    }
    let resp = send(&mut app, empty_request("GET", "/todos")).await;
    let todos: Vec<Todo> = body_json(resp).await;
    let titles: Vec<_> = todos.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, ["one", "two", "three"]);
}

// --- authenticated variant ---

#[tokio::test]
async fn auth_required_without_token() {
    let resp = app_with_auth()
        .oneshot(empty_request("GET", "/todos"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = app_with_auth()
        .oneshot(with_token(empty_request("GET", "/todos"), "bogus"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_rejects_bad_password() {
    let resp = app_with_auth()
        .oneshot(json_request(
            "POST",
            "/api/login",
            r#"{"username":"admin","password":"wrong"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn todos_are_scoped_per_user() {
    let mut app = app_with_auth();

    let resp = send(
        &mut app,
        json_request("POST", "/api/register", r#"{"username":"bob","password":"pw"}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = send(
        &mut app,
        json_request("POST", "/api/register", r#"{"username":"bob","password":"pw"}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let mut tokens = Vec::new();
    for creds in [
        r#"{"username":"admin","password":"password"}"#,
        r#"{"username":"bob","password":"pw"}"#,
    ] {
        let resp = send(&mut app, json_request("POST", "/api/login", creds)).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let login: LoginResponse = body_json(resp).await;
        tokens.push(login.token);
    }

    let resp = send(
        &mut app,
        with_token(json_request("POST", "/todos", r#"{"title":"admin only"}"#), &tokens[0]),
    )
    .await;
    let created: Todo = body_json(resp).await;

    let resp = send(&mut app, with_token(empty_request("GET", "/todos"), &tokens[1])).await;
    let todos: Vec<Todo> = body_json(resp).await;
    assert!(todos.is_empty());

    let resp = send(
        &mut app,
        with_token(
            empty_request("POST", &format!("/todos/{}/toggle", created.id)),
            &tokens[1],
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = send(&mut app, with_token(empty_request("GET", "/todos"), &tokens[0])).await;
    let todos: Vec<Todo> = body_json(resp).await;
    assert_eq!(todos.len(), 1);
}
