//! Todo Card Component
//!
//! Draggable card with edit and archive actions.

use leptos::prelude::*;
use leptos_dragdrop::{make_on_dragend, make_on_dragstart, DndSignals};

use crate::board::{Column, DialogTarget};
use crate::models::{timestamp, Todo, TodoState};

#[component]
pub fn TodoCard(
    todo: Todo,
    column: Column,
    dnd: DndSignals<TodoState>,
    set_dialog: WriteSignal<Option<DialogTarget>>,
) -> impl IntoView {
    let id = todo.id;
    let title = todo.title.clone();
    let description = todo.description.clone().filter(|d| !d.is_empty());
    let deadline = todo.deadline.as_ref().map(timestamp::display);
    let class = format!("todo-card {}", column.class);

    let edit_todo = todo.clone();
    let on_edit = move |_| set_dialog.set(Some(DialogTarget::update(edit_todo.clone())));
    let on_archive = move |_| set_dialog.set(Some(DialogTarget::archive(todo.clone())));

    view! {
        <div
            class=move || if dnd.is_dragging(id) { format!("{} dragging", class) } else { class.clone() }
            draggable="true"
            on:dragstart=make_on_dragstart(dnd, id)
            on:dragend=make_on_dragend(dnd)
        >
            <div class="todo-card-body">
                <h3 class="todo-title">{title}</h3>
                {description.map(|d| view! { <p class="todo-description">{d}</p> })}
                {deadline.map(|d| view! { <div class="todo-deadline">"Due " {d}</div> })}
            </div>
            <div class="todo-card-actions">
                <button class="icon-btn" title="Edit task" on:click=on_edit>"✎"</button>
                <button class="icon-btn danger" title="Archive task" on:click=on_archive>"⌫"</button>
            </div>
        </div>
    }
}
