//! Todo List Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.
//! Every successful write is followed by a full reread; the collection is
//! never patched in place.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::api::{self, ApiClient};
use crate::context::AuthContext;
use crate::error::ApiResult;
use crate::models::{Todo, TodoCreate, TodoUpdate};

const FETCH_FAILED: &str = "Failed to fetch todos";
const CREATE_FAILED: &str = "Failed to create todo";
const UPDATE_FAILED: &str = "Failed to update todo";
const DELETE_FAILED: &str = "Failed to delete todo";

/// Client-side view of the current user's todos
#[derive(Clone, Debug, Store)]
pub struct TodoListState {
    /// Every todo the backend returned, archived ones included
    pub todos: Vec<Todo>,
    pub loading: bool,
    /// Message of the last failed operation, cleared by a successful refresh
    pub error: Option<String>,
}

impl Default for TodoListState {
    fn default() -> Self {
        Self {
            todos: Vec::new(),
            loading: true,
            error: None,
        }
    }
}

/// Type alias for the store
pub type TodoStore = Store<TodoListState>;

/// Todo provider: the store plus the operations that fill it
#[derive(Clone, Copy)]
pub struct TodoContext {
    pub store: TodoStore,
    auth: AuthContext,
    client: StoredValue<ApiClient>,
}

impl TodoContext {
    pub fn new(client: ApiClient, auth: AuthContext) -> Self {
        Self {
            store: Store::new(TodoListState::default()),
            auth,
            client: StoredValue::new(client),
        }
    }

    /// Current collection (tracked)
    pub fn todos(&self) -> Vec<Todo> {
        self.store.todos().get()
    }

    /// Current collection without subscribing
    pub fn snapshot(&self) -> Vec<Todo> {
        self.store.todos().get_untracked()
    }

    pub fn loading(&self) -> bool {
        self.store.loading().get()
    }

    pub fn error(&self) -> Option<String> {
        self.store.error().get()
    }

    pub fn clear_error(&self) {
        self.store.error().set(None);
    }

    /// Refetch once every time the session becomes authenticated, including
    /// the optimistic value at start-up. Logout leaves the stale list alone.
    pub fn refresh_on_login(&self) {
        let ctx = *self;
        let authenticated = Memo::new(move |_| ctx.auth.authenticated.get());
        Effect::new(move |_| {
            if authenticated.get() {
                leptos::task::spawn_local(async move {
                    let _ = ctx.refresh().await;
                });
            }
        });
    }

    /// Replace the collection with a fresh fetch. No-op while logged out.
    /// On failure the previous collection stays and `error` is set.
    pub async fn refresh(&self) -> ApiResult<()> {
        if !self.auth.authenticated.get_untracked() {
            return Ok(());
        }
        self.store.loading().set(true);
        let result = api::list_todos(&self.client.get_value()).await;
        let outcome = match result {
            Ok(todos) => {
                log::debug!("[TODOS] loaded {} todos", todos.len());
                self.store.todos().set(todos);
                self.store.error().set(None);
                Ok(())
            }
            Err(e) => {
                log::error!("[TODOS] refresh failed: {}", e);
                self.store.error().set(Some(FETCH_FAILED.to_string()));
                Err(e)
            }
        };
        self.store.loading().set(false);
        outcome
    }

    /// Runs after a successful write. A failed reread is reported through
    /// `error` only; the write itself already happened.
    async fn reread(&self) {
        if let Err(e) = self.refresh().await {
            log::warn!("[TODOS] write applied but reread failed: {}", e);
        }
    }

    fn fail(&self, message: &str, e: &crate::error::ApiError) {
        log::error!("[TODOS] {}: {}", message, e);
        self.store.error().set(Some(message.to_string()));
    }

    pub async fn create(&self, todo: TodoCreate) -> ApiResult<()> {
        match api::create_todo(&self.client.get_value(), &todo).await {
            Ok(()) => {
                self.reread().await;
                Ok(())
            }
            Err(e) => {
                self.fail(CREATE_FAILED, &e);
                Err(e)
            }
        }
    }

    pub async fn update(&self, id: u32, todo: TodoUpdate) -> ApiResult<()> {
        match api::update_todo(&self.client.get_value(), id, &todo).await {
            Ok(()) => {
                self.reread().await;
                Ok(())
            }
            Err(e) => {
                self.fail(UPDATE_FAILED, &e);
                Err(e)
            }
        }
    }

    /// Permanent removal. The board itself only archives.
    pub async fn delete(&self, id: u32) -> ApiResult<()> {
        match api::delete_todo(&self.client.get_value(), id).await {
            Ok(()) => {
                self.reread().await;
                Ok(())
            }
            Err(e) => {
                self.fail(DELETE_FAILED, &e);
                Err(e)
            }
        }
    }

    /// Fetch one todo by id, archived or not. Leaves the collection alone.
    pub async fn get(&self, id: u32) -> ApiResult<Todo> {
        api::get_todo(&self.client.get_value(), id).await
    }
}

/// Get the todo context provided by `App`
pub fn use_todos() -> TodoContext {
    expect_context::<TodoContext>()
}
