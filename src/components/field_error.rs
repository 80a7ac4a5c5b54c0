//! Field Error Component

use leptos::prelude::*;

use crate::forms::FormErrors;

/// Inline message for one form field, rendered only while it fails
#[component]
pub fn FieldError(errors: ReadSignal<FormErrors>, field: &'static str) -> impl IntoView {
    move || {
        errors
            .with(|e| e.get(field).map(str::to_string))
            .map(|msg| view! { <p class="field-error">{msg}</p> })
    }
}
