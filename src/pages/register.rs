//! Register Page

use leptos::prelude::*;
use leptos::task::spawn_local;

use borrowdesk_api::services::Registration;

use crate::components::NavLink;
use crate::context::AppContext;
use crate::routes::Route;
use crate::validation::{validate_registration, FormErrors};

#[component]
pub fn RegisterPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (confirmation, set_confirmation) = signal(String::new());
    let (errors, set_errors) = signal(FormErrors::default());
    let (submitting, set_submitting) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let (name, email, password, confirmation) = (name.get(), email.get(), password.get(), confirmation.get());
        if let Err(found) = validate_registration(&name, &email, &password, &confirmation) {
            set_errors.set(found);
            return;
        }
        set_errors.set(FormErrors::default());
        set_submitting.set(true);

        let api = ctx.api();
        spawn_local(async move {
            let registration = Registration {
                name: name.trim(),
                email: email.trim(),
                password: &password,
                password_confirmation: &confirmation,
            };
            match api.auth().register(&registration).await {
                Ok(response) => {
                    ctx.success(response.message_or("Registration successful"));
                    ctx.sign_in(response.data.user);
                }
                Err(err) => ctx.report(&err, "Registration failed"),
            }
            set_submitting.set(false);
        });
    };

    let field = move |label: &'static str, id: &'static str, kind: &'static str, value: ReadSignal<String>, set: WriteSignal<String>| {
        view! {
            <label for=id>{label}</label>
            <input
                id=id
                type=kind
                prop:value=move || value.get()
                on:input=move |ev| set.set(event_target_value(&ev))
            />
            <p class="field-error">{move || errors.get().get(id)}</p>
        }
    };

    view! {
        <div class="auth-page">
            <form class="auth-card" on:submit=on_submit>
                <h1>"Create an account"</h1>
                {field("Username", "name", "text", name, set_name)}
                {field("Email address", "email", "email", email, set_email)}
                {field("Password", "password", "password", password, set_password)}
                {field("Confirm password", "password_confirmation", "password", confirmation, set_confirmation)}

                <button type="submit" class="btn btn-primary btn-block" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Creating account..." } else { "Register" }}
                </button>

                <p class="auth-switch">
                    "Already have an account? "
                    <NavLink to=Route::Login>"Sign in"</NavLink>
                </p>
            </form>
        </div>
    }
}
