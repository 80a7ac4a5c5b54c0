//! Board Page Component
//!
//! Header, state columns and the shared todo dialog.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::create_dnd_signals;

use super::{BoardColumn, LoadingSpinner, TodoDialog};
use crate::board::{drop_update, DialogTarget, COLUMNS, DRAG_FORMAT};
use crate::context::use_auth;
use crate::models::TodoState;
use crate::store::use_todos;

#[component]
pub fn BoardPage() -> impl IntoView {
    let auth = use_auth();
    let todos = use_todos();
    let dnd = create_dnd_signals::<TodoState>(DRAG_FORMAT);

    let (dialog, set_dialog) = signal(None::<DialogTarget>);

    // Same-column drops still send the update
    let on_drop = Callback::new(move |(id, state): (u32, TodoState)| {
        let Some(update) = drop_update(&todos.snapshot(), id, state) else {
            log::warn!("[BOARD] dropped unknown todo {}", id);
            return;
        };
        spawn_local(async move {
            let _ = todos.update(id, update).await;
        });
    });

    let close_dialog = Callback::new(move |_: ()| set_dialog.set(None));

    view! {
        <div class="board-page">
            <header class="board-header">
                <h1>"My Todo List"</h1>
                <div class="board-header-actions">
                    <button class="btn-primary" on:click=move |_| set_dialog.set(Some(DialogTarget::create()))>
                        "ADD NEW TASK"
                    </button>
                    <button class="btn-secondary" on:click=move |_| auth.logout()>"Log out"</button>
                </div>
            </header>

            {move || todos.error().map(|msg| view! {
                <div class="error-banner">
                    <span>{msg}</span>
                    <button class="icon-btn" title="Dismiss" on:click=move |_| todos.clear_error()>"×"</button>
                </div>
            })}

            <Show
                when=move || !(todos.loading() && todos.todos().is_empty())
                fallback=|| view! { <LoadingSpinner /> }
            >
                <div class="board-columns">
                    {COLUMNS.iter().map(|column| view! {
                        <BoardColumn column=*column dnd=dnd on_drop=on_drop set_dialog=set_dialog />
                    }).collect_view()}
                </div>
            </Show>

            {move || dialog.get().map(|target| view! {
                <TodoDialog target=target on_close=close_dialog />
            })}
        </div>
    }
}
