use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};
use uuid::Uuid;

/// Owner recorded for todos when authentication is disabled.
const ANONYMOUS: &str = "";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub done: bool,
}

#[derive(Deserialize)]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub done: bool,
}

#[derive(Deserialize)]
pub struct UpdateTodo {
    pub title: Option<String>,
}

#[derive(Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

struct StoredTodo {
    todo: Todo,
    owner: String,
}

/// In-memory backing store. Todos keep insertion order so list responses
/// are stable.
pub struct Store {
    todos: Vec<StoredTodo>,
    users: HashMap<String, String>,
    tokens: HashMap<String, String>,
}

impl Default for Store {
    fn default() -> Self {
        let mut users = HashMap::new();
        users.insert("admin".to_string(), "password".to_string());
        Self {
            todos: Vec::new(),
            users,
            tokens: HashMap::new(),
        }
    }
}

impl Store {
    fn find_mut(&mut self, id: Uuid, owner: &str) -> Option<&mut Todo> {
        self.todos
            .iter_mut()
            .find(|s| s.todo.id == id && s.owner == owner)
            .map(|s| &mut s.todo)
    }
}

pub type Db = Arc<RwLock<Store>>;

/// Item ids arrive as raw path segments. Anything that is not one of our
/// UUIDs names no item, so it is a 404 rather than a malformed request.
fn item_id(raw: &str) -> Result<Uuid, StatusCode> {
    raw.parse().map_err(|_| StatusCode::NOT_FOUND)
}

#[derive(Clone)]
struct AppState {
    db: Db,
    require_auth: bool,
}

/// Router for the unauthenticated variant.
pub fn app() -> Router {
    router(false)
}

/// Router where every `/todos` route requires `Authorization: Bearer <token>`
/// obtained from `/api/login`.
pub fn app_with_auth() -> Router {
    router(true)
}

pub fn router(require_auth: bool) -> Router {
    let state = AppState {
        db: Arc::new(RwLock::new(Store::default())),
        require_auth,
    };
    Router::new()
        .route("/api/register", post(register))
        .route("/api/login", post(login))
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", put(update_todo).delete(delete_todo))
        .route("/todos/{id}/toggle", post(toggle_todo))
        .with_state(state)
}

pub async fn run(listener: TcpListener, require_auth: bool) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, require_auth, "mock server listening");
    }
    axum::serve(listener, router(require_auth)).await
}

/// Resolve the caller's username, or 401 when auth is required and the
/// bearer token is missing or unknown.
async fn authorize(state: &AppState, headers: &HeaderMap) -> Result<String, StatusCode> {
    if !state.require_auth {
        return Ok(ANONYMOUS.to_string());
    }
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(StatusCode::UNAUTHORIZED)?;
    let db = state.db.read().await;
    db.tokens.get(token).cloned().ok_or(StatusCode::UNAUTHORIZED)
}

async fn register(
    State(state): State<AppState>,
    Json(input): Json<Credentials>,
) -> StatusCode {
    let mut db = state.db.write().await;
    if db.users.contains_key(&input.username) {
        return StatusCode::BAD_REQUEST;
    }
    debug!(username = %input.username, "user registered");
    db.users.insert(input.username, input.password);
    StatusCode::OK
}

async fn login(
    State(state): State<AppState>,
    Json(input): Json<Credentials>,
) -> Result<Json<LoginResponse>, StatusCode> {
    let mut db = state.db.write().await;
    if db.users.get(&input.username) != Some(&input.password) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    let token = Uuid::new_v4().simple().to_string();
    db.tokens.insert(token.clone(), input.username);
    Ok(Json(LoginResponse { token }))
}

async fn list_todos(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Todo>>, StatusCode> {
    let owner = authorize(&state, &headers).await?;
    let db = state.db.read().await;
    Ok(Json(
        db.todos
            .iter()
            .filter(|s| s.owner == owner)
            .map(|s| s.todo.clone())
            .collect(),
    ))
}

async fn create_todo(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<CreateTodo>,
) -> Result<Json<Todo>, StatusCode> {
    let owner = authorize(&state, &headers).await?;
    let todo = Todo {
        id: Uuid::new_v4(),
        title: input.title,
        done: input.done,
    };
    state.db.write().await.todos.push(StoredTodo {
        todo: todo.clone(),
        owner,
    });
    Ok(Json(todo))
}

async fn toggle_todo(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Todo>, StatusCode> {
    let owner = authorize(&state, &headers).await?;
    let id = item_id(&id)?;
    let mut db = state.db.write().await;
    let todo = db.find_mut(id, &owner).ok_or(StatusCode::NOT_FOUND)?;
    todo.done = !todo.done;
    Ok(Json(todo.clone()))
}

async fn update_todo(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(input): Json<UpdateTodo>,
) -> Result<Json<Todo>, StatusCode> {
    let owner = authorize(&state, &headers).await?;
    let title = input.title.ok_or(StatusCode::BAD_REQUEST)?;
    let id = item_id(&id)?;
    let mut db = state.db.write().await;
    let todo = db.find_mut(id, &owner).ok_or(StatusCode::NOT_FOUND)?;
    todo.title = title;
    Ok(Json(todo.clone()))
}

async fn delete_todo(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    let owner = authorize(&state, &headers).await?;
    let id = item_id(&id)?;
    let mut db = state.db.write().await;
    let before = db.todos.len();
    db.todos.retain(|s| !(s.todo.id == id && s.owner == owner));
    if db.todos.len() == before {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(StatusCode::NO_CONTENT)
}
