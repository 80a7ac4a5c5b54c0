//! Board Column Component
//!
//! One state lane; also the drop target that moves a card into that state.

use leptos::prelude::*;
use leptos_dragdrop::{make_on_dragleave, make_on_dragover, make_on_drop, DndSignals};

use super::TodoCard;
use crate::board::{todos_in, Column, DialogTarget};
use crate::models::TodoState;
use crate::store::use_todos;

#[component]
pub fn BoardColumn(
    column: Column,
    dnd: DndSignals<TodoState>,
    /// (dropped todo id, this column's state)
    on_drop: Callback<(u32, TodoState)>,
    set_dialog: WriteSignal<Option<DialogTarget>>,
) -> impl IntoView {
    let todos = use_todos();
    let state = column.state;

    let cards = move || todos_in(&todos.todos(), state);
    let drop_handler = make_on_drop(dnd, move |id| on_drop.run((id, state)));

    view! {
        <section
            class=move || {
                if dnd.is_over(state) {
                    format!("board-column {} drag-over", column.class)
                } else {
                    format!("board-column {}", column.class)
                }
            }
            on:dragover=make_on_dragover(dnd, state)
            on:dragleave=make_on_dragleave(dnd, state)
            on:drop=drop_handler
        >
            <h2 class="column-title">{column.title()}</h2>
            <div class="column-cards">
                {move || cards().into_iter().map(|todo| view! {
                    <TodoCard todo=todo column=column dnd=dnd set_dialog=set_dialog />
                }).collect_view()}
            </div>
        </section>
    }
}
