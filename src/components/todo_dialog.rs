//! Todo Dialog Component
//!
//! Shared modal for create, update and archive.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::FieldError;
use crate::board::{DialogTarget, COLUMNS};
use crate::forms::{FormErrors, Submission, TodoDraft};
use crate::models::{timestamp, TodoState};
use crate::store::use_todos;

#[component]
pub fn TodoDialog(target: DialogTarget, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let todos = use_todos();
    let kind = target.kind;

    let draft = RwSignal::new(target.todo.as_ref().map(TodoDraft::from_todo).unwrap_or_default());
    let (field_errors, set_field_errors) = signal(FormErrors::default());
    let (error, set_error) = signal(None::<String>);
    let (saving, set_saving) = signal(false);

    // Stays open on failure so the user can retry
    let submit = move || {
        if saving.get_untracked() {
            return;
        }
        let submission = match draft.get_untracked().submission(kind) {
            Ok(s) => s,
            Err(errors) => {
                set_field_errors.set(errors);
                return;
            }
        };
        set_field_errors.set(FormErrors::default());
        set_error.set(None);
        set_saving.set(true);

        spawn_local(async move {
            let result = match submission {
                Submission::Create(todo) => todos.create(todo).await,
                Submission::Update(id, update) => todos.update(id, update).await,
            };
            set_saving.set(false);
            match result {
                Ok(()) => on_close.run(()),
                Err(e) => set_error.set(Some(e.user_message())),
            }
        });
    };

    let body = if kind.has_form() {
        view! {
            <form
                class="dialog-form"
                on:submit=move |ev: web_sys::SubmitEvent| {
                    ev.prevent_default();
                    submit();
                }
            >
                <div class="form-field">
                    <label for="title">"Title"</label>
                    <input
                        id="title"
                        type="text"
                        placeholder="Enter task title..."
                        prop:value=move || draft.with(|d| d.title.clone())
                        on:input=move |ev| draft.update(|d| d.title = event_target_value(&ev))
                    />
                    <FieldError errors=field_errors field="title" />
                </div>

                <div class="form-field">
                    <label for="description">"Description"</label>
                    <textarea
                        id="description"
                        rows="3"
                        placeholder="Enter task description..."
                        prop:value=move || draft.with(|d| d.description.clone())
                        on:input=move |ev| draft.update(|d| d.description = event_target_value(&ev))
                    ></textarea>
                </div>

                <div class="form-field">
                    <label for="deadline">"Deadline (optional)"</label>
                    <input
                        id="deadline"
                        type="datetime-local"
                        min=timestamp::now_input()
                        prop:value=move || draft.with(|d| d.deadline.clone())
                        on:input=move |ev| draft.update(|d| d.deadline = event_target_value(&ev))
                    />
                    <FieldError errors=field_errors field="deadline" />
                </div>

                <div class="form-field">
                    <label for="state">"State"</label>
                    <select
                        id="state"
                        prop:value=move || draft.with(|d| d.state.as_str())
                        on:change=move |ev| {
                            if let Some(state) = TodoState::from_str(&event_target_value(&ev)) {
                                draft.update(|d| d.state = state);
                            }
                        }
                    >
                        {COLUMNS.iter().map(|c| view! {
                            <option value=c.state.as_str()>{c.title()}</option>
                        }).collect_view()}
                    </select>
                </div>

                <FieldError errors=field_errors field="form" />

                <div class="dialog-actions">
                    <button type="button" class="btn-secondary" on:click=move |_| on_close.run(())>
                        "Cancel"
                    </button>
                    <button type="submit" class="btn-primary" disabled=move || saving.get()>
                        {kind.confirm_label()}
                    </button>
                </div>
            </form>
        }
        .into_any()
    } else {
        view! {
            <div class="dialog-confirm">
                <p>"Are you sure you want to archive this task? This action cannot be undone."</p>
                <div class="dialog-actions">
                    <button type="button" class="btn-secondary" on:click=move |_| on_close.run(())>
                        "Cancel"
                    </button>
                    <button type="button" class="btn-danger" disabled=move || saving.get() on:click=move |_| submit()>
                        {kind.confirm_label()}
                    </button>
                </div>
            </div>
        }
        .into_any()
    };

    view! {
        <div class="dialog-backdrop">
            <div class="dialog" role="dialog">
                <h2 class="dialog-title">{kind.heading()}</h2>
                {body}
                {move || error.get().map(|msg| view! { <div class="form-error">{msg}</div> })}
            </div>
        </div>
    }
}
