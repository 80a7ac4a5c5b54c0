//! Test Doubles
//!
//! In-memory backend speaking the same REST surface as the real one, plus
//! credential and navigation doubles.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::api::{ApiClient, ApiRequest, ApiResponse, Body, MemoryCredentialStore, Method, Navigator, Transport};
use crate::config::AppConfig;
use crate::error::{ApiError, ApiResult};
use crate::models::{Todo, TodoState};

pub const BASE_URL: &str = "http://test/api/v1";
const STAMP: &str = "2024-01-01T00:00:00";

pub fn test_config() -> AppConfig {
    AppConfig {
        api_base_url: BASE_URL.to_string(),
        ..AppConfig::default()
    }
}

enum Scripted {
    Respond(u16, String),
    Disconnect,
}

#[derive(Default)]
struct BackendState {
    users: HashMap<String, String>,
    tokens: HashSet<String>,
    todos: Vec<Value>,
    next_id: u32,
    issued: u32,
    requests: Vec<ApiRequest>,
    scripted: VecDeque<Scripted>,
    failures: Vec<(Method, String, u16)>,
}

/// Fake REST backend; clones share state
#[derive(Clone, Default)]
pub struct FakeBackend {
    state: Arc<Mutex<BackendState>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn with<R>(&self, f: impl FnOnce(&mut BackendState) -> R) -> R {
        f(&mut self.state.lock().unwrap())
    }

    pub fn add_user(&self, username: &str, password: &str) {
        self.with(|s| s.users.insert(username.to_string(), password.to_string()));
    }

    pub fn accept_token(&self, token: &str) {
        self.with(|s| s.tokens.insert(token.to_string()));
    }

    /// Every issued token stops validating (expiry, secret rotation, ...)
    pub fn revoke_tokens(&self) {
        self.with(|s| s.tokens.clear());
    }

    /// The next request gets this response regardless of route
    pub fn fail_next(&self, status: u16, body: &str) {
        self.with(|s| s.scripted.push_back(Scripted::Respond(status, body.to_string())));
    }

    /// The next request fails before reaching the server
    pub fn disconnect_next(&self) {
        self.with(|s| s.scripted.push_back(Scripted::Disconnect));
    }

    /// Every request to `method path` answers `status`
    pub fn fail_on(&self, method: Method, path: &str, status: u16) {
        self.with(|s| s.failures.push((method, path.to_string(), status)));
    }

    pub fn clear_failures(&self) {
        self.with(|s| s.failures.clear());
    }

    pub fn seed_todo(&self, title: &str, description: Option<&str>, state: TodoState) -> u32 {
        self.with(|s| {
            s.next_id += 1;
            let id = s.next_id;
            s.todos.push(json!({
                "id": id,
                "title": title,
                "description": description,
                "state": state,
                "deadline": null,
                "created_at": STAMP,
                "updated_at": STAMP,
                "owner_id": 1,
            }));
            id
        })
    }

    /// What a direct `GET /todos` would return right now
    pub fn todos(&self) -> Vec<Todo> {
        self.with(|s| serde_json::from_value(Value::Array(s.todos.clone())).unwrap())
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.with(|s| s.requests.clone())
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.with(|s| s.requests.last().cloned())
    }

    /// Number of requests sent to `method path`
    pub fn count(&self, method: Method, path: &str) -> usize {
        let url = format!("{}{}", BASE_URL, path);
        self.with(|s| s.requests.iter().filter(|r| r.method == method && r.url == url).count())
    }

    fn handle(&self, request: &ApiRequest) -> ApiResult<ApiResponse> {
        let mut s = self.state.lock().unwrap();
        s.requests.push(request.clone());

        match s.scripted.pop_front() {
            Some(Scripted::Respond(status, body)) => return Ok(ApiResponse { status, body }),
            Some(Scripted::Disconnect) => return Err(ApiError::Network("connection refused".into())),
            None => {}
        }

        let path = request.url.strip_prefix(BASE_URL).unwrap_or(&request.url).to_string();
        if let Some((_, _, status)) = s.failures.iter().find(|(m, p, _)| *m == request.method && *p == path) {
            return Ok(reply(*status, json!({ "detail": "Injected failure" })));
        }

        let body = match &request.body {
            Body::Json(text) => serde_json::from_str(text).unwrap_or(Value::Null),
            Body::Form(text) => {
                let fields: HashMap<String, String> = serde_urlencoded::from_str(text).unwrap_or_default();
                json!(fields)
            }
            Body::Empty => Value::Null,
        };

        match (request.method, path.as_str()) {
            (Method::Post, "/auth/token") => {
                let username = body["username"].as_str().unwrap_or_default().to_string();
                let password = body["password"].as_str().unwrap_or_default();
                if s.users.get(&username).map(String::as_str) != Some(password) {
                    return Ok(reply(401, json!({ "detail": "Incorrect username or password" })));
                }
                s.issued += 1;
                let token = format!("token-{}-{}", username, s.issued);
                s.tokens.insert(token.clone());
                Ok(reply(200, json!({ "access_token": token, "token_type": "bearer" })))
            }
            (Method::Post, "/auth/register") => {
                let username = body["username"].as_str().unwrap_or_default().to_string();
                if s.users.contains_key(&username) {
                    return Ok(reply(400, json!({ "detail": "Username already registered" })));
                }
                let password = body["password"].as_str().unwrap_or_default().to_string();
                s.users.insert(username.clone(), password);
                Ok(reply(200, json!({ "id": 1, "username": username, "email": body["email"] })))
            }
            _ => {
                let authorized = request
                    .header("Authorization")
                    .and_then(|h| h.strip_prefix("Bearer "))
                    .map(|t| s.tokens.contains(t))
                    .unwrap_or(false);
                if !authorized {
                    return Ok(reply(401, json!({ "detail": "Could not validate credentials" })));
                }
                Ok(route_todos(&mut s, request.method, &path, body))
            }
        }
    }
}

fn route_todos(s: &mut BackendState, method: Method, path: &str, body: Value) -> ApiResponse {
    let id = path.strip_prefix("/todos/").and_then(|rest| rest.parse::<u32>().ok());
    let position = id.and_then(|id| s.todos.iter().position(|t| t["id"] == json!(id)));

    match (method, path, position) {
        (Method::Get, "/auth/verify", _) => reply(200, json!({ "username": "me" })),
        (Method::Get, "/todos", _) => reply(200, Value::Array(s.todos.clone())),
        (Method::Post, "/todos", _) => {
            s.next_id += 1;
            let todo = json!({
                "id": s.next_id,
                "title": body["title"],
                "description": body.get("description").cloned().unwrap_or(Value::Null),
                "state": "TODO",
                "deadline": body.get("deadline").cloned().unwrap_or(Value::Null),
                "created_at": STAMP,
                "updated_at": STAMP,
                "owner_id": 1,
            });
            s.todos.push(todo.clone());
            reply(201, todo)
        }
        (Method::Get, _, Some(pos)) => reply(200, s.todos[pos].clone()),
        (Method::Patch, _, Some(pos)) => {
            if let (Some(record), Some(patch)) = (s.todos[pos].as_object_mut(), body.as_object()) {
                for (key, value) in patch {
                    record.insert(key.clone(), value.clone());
                }
            }
            reply(200, s.todos[pos].clone())
        }
        (Method::Delete, _, Some(pos)) => {
            s.todos.remove(pos);
            ApiResponse { status: 204, body: String::new() }
        }
        _ => reply(404, json!({ "detail": "Todo not found" })),
    }
}

fn reply(status: u16, body: Value) -> ApiResponse {
    ApiResponse { status, body: body.to_string() }
}

#[async_trait(?Send)]
impl Transport for FakeBackend {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        self.handle(&request)
    }
}

/// Counts login redirects
#[derive(Default)]
pub struct RecordingNavigator {
    redirects: AtomicUsize,
}

impl RecordingNavigator {
    pub fn redirects(&self) -> usize {
        self.redirects.load(Ordering::SeqCst)
    }
}

impl Navigator for RecordingNavigator {
    fn redirect_to_login(&self) {
        self.redirects.fetch_add(1, Ordering::SeqCst);
    }
}

/// Client wired to `backend`. A starting token is also accepted by the backend.
pub fn test_client(
    backend: &FakeBackend,
    token: Option<&str>,
) -> (ApiClient, Arc<MemoryCredentialStore>, Arc<RecordingNavigator>) {
    if let Some(token) = token {
        backend.accept_token(token);
    }
    let creds = Arc::new(MemoryCredentialStore::new(token));
    let nav = Arc::new(RecordingNavigator::default());
    let client = ApiClient::new(&test_config(), Arc::new(backend.clone()), creds.clone(), nav.clone());
    (client, creds, nav)
}
