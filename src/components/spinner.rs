//! Loading Spinner Component

use leptos::prelude::*;

/// Full-page spinner
#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="spinner-page">
            <div class="spinner"></div>
        </div>
    }
}
