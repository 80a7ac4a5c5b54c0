//! Auth Page Component
//!
//! Login and registration forms sharing one card.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::FieldError;
use crate::context::use_auth;
use crate::forms::{FormErrors, LoginForm, RegisterForm};

#[component]
pub fn AuthPage() -> impl IntoView {
    let auth = use_auth();

    let (is_login, set_is_login) = signal(true);
    let (username, set_username) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (field_errors, set_field_errors) = signal(FormErrors::default());
    let (error, set_error) = signal(String::new());
    let (submitting, set_submitting) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        set_error.set(String::new());

        let login = is_login.get_untracked();
        let username = username.get_untracked();
        let email = email.get_untracked();
        let password = password.get_untracked();

        let checked = if login {
            LoginForm { username: username.clone(), password: password.clone() }.check()
        } else {
            RegisterForm { username: username.clone(), email: email.clone(), password: password.clone() }.check()
        };
        if let Err(errors) = checked {
            set_field_errors.set(errors);
            return;
        }
        set_field_errors.set(FormErrors::default());
        set_submitting.set(true);

        spawn_local(async move {
            let result = if login {
                auth.login(&username, &password).await
            } else {
                auth.register(&username, &email, &password).await
            };
            // On success the app swaps this page for the board
            if let Err(e) = result {
                set_error.set(e.user_message());
            }
            set_submitting.set(false);
        });
    };

    let toggle_mode = move |_| {
        set_is_login.update(|v| *v = !*v);
        set_field_errors.set(FormErrors::default());
        set_error.set(String::new());
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h2 class="auth-title">
                    {move || if is_login.get() { "Sign in to your account" } else { "Create new account" }}
                </h2>
                <form class="auth-form" on:submit=on_submit>
                    <div class="form-field">
                        <label class="sr-only" for="username">"Username"</label>
                        <input
                            id="username"
                            type="text"
                            placeholder="Username"
                            prop:value=move || username.get()
                            on:input=move |ev| set_username.set(event_target_value(&ev))
                        />
                        <FieldError errors=field_errors field="username" />
                    </div>

                    <Show when=move || !is_login.get()>
                        <div class="form-field">
                            <label class="sr-only" for="email">"Email"</label>
                            <input
                                id="email"
                                type="email"
                                placeholder="Email"
                                prop:value=move || email.get()
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                            />
                            <FieldError errors=field_errors field="email" />
                        </div>
                    </Show>

                    <div class="form-field">
                        <label class="sr-only" for="password">"Password"</label>
                        <input
                            id="password"
                            type="password"
                            placeholder="Password"
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                        />
                        <FieldError errors=field_errors field="password" />
                    </div>

                    {move || {
                        let msg = error.get();
                        (!msg.is_empty()).then(|| view! { <div class="form-error">{msg}</div> })
                    }}

                    <button type="submit" class="btn-primary wide" disabled=move || submitting.get()>
                        {move || if is_login.get() { "Sign in" } else { "Register" }}
                    </button>

                    <div class="auth-toggle">
                        <button type="button" class="link-btn" on:click=toggle_mode>
                            {move || if is_login.get() {
                                "Need an account? Register"
                            } else {
                                "Already have an account? Sign in"
                            }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
