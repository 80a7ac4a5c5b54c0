//! Kanban Todo App
//!
//! Root component: wires the providers and picks the page.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::ApiClient;
use crate::components::{AuthPage, BoardPage, LoadingSpinner};
use crate::config::AppConfig;
use crate::context::AuthContext;
use crate::store::TodoContext;

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let client = ApiClient::browser(&config);
    let auth = AuthContext::new(client.clone());
    let todos = TodoContext::new(client, auth);

    // Provide context to all children
    provide_context(auth);
    provide_context(todos);

    // One verification per page load
    spawn_local(async move {
        auth.verify_session().await;
    });
    todos.refresh_on_login();

    view! {
        <div class="app-layout">
            <Show when=move || !auth.verifying.get() fallback=|| view! { <LoadingSpinner /> }>
                <Show when=move || auth.authenticated.get() fallback=|| view! { <AuthPage /> }>
                    <BoardPage />
                </Show>
            </Show>
        </div>
    }
}
