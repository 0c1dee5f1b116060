//! Login Page

use leptos::prelude::*;
use leptos::task::spawn_local;

use borrowdesk_api::services::Credentials;

use crate::components::NavLink;
use crate::context::AppContext;
use crate::routes::Route;
use crate::validation::{validate_login, FormErrors};

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (errors, set_errors) = signal(FormErrors::default());
    let (submitting, set_submitting) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let email = email.get();
        let password = password.get();
        if let Err(found) = validate_login(&email, &password) {
            set_errors.set(found);
            return;
        }
        set_errors.set(FormErrors::default());
        set_submitting.set(true);

        let api = ctx.api();
        spawn_local(async move {
            let auth = api.auth();
            if let Err(err) = auth.csrf_cookie().await {
                tracing::warn!(error = %err, "CSRF bootstrap failed, trying login anyway");
            }
            let credentials = Credentials { email: email.trim(), password: &password };
            match auth.login(&credentials).await {
                Ok(response) => {
                    ctx.success(response.message_or("Login successful"));
                    ctx.sign_in(response.data.user);
                }
                Err(err) => ctx.report(&err, "Login failed"),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="auth-page">
            <form class="auth-card" on:submit=on_submit>
                <h1>"Sign in to your account"</h1>

                <label for="email">"Email address"</label>
                <input
                    id="email"
                    type="email"
                    autocomplete="email"
                    prop:value=move || email.get()
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                />
                <p class="field-error">{move || errors.get().get("email")}</p>

                <label for="password">"Password"</label>
                <input
                    id="password"
                    type="password"
                    autocomplete="current-password"
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />
                <p class="field-error">{move || errors.get().get("password")}</p>

                <button type="submit" class="btn btn-primary btn-block" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Signing in..." } else { "Sign in" }}
                </button>

                <p class="auth-switch">
                    "Don't have an account? "
                    <NavLink to=Route::Register>"Register"</NavLink>
                </p>
            </form>
        </div>
    }
}
