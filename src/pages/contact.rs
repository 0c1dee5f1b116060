//! Contact Page
//!
//! The form is validated locally. Nothing is sent to the backend; a short
//! delay stands in for submission.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::AppContext;
use crate::validation::{validate_contact, FormErrors};

const SUBMIT_DELAY_MS: u32 = 1_000;

#[derive(Clone, Debug, Default, PartialEq)]
struct ContactForm {
    name: String,
    email: String,
    subject: String,
    message: String,
}

#[component]
pub fn ContactPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let form = RwSignal::new(ContactForm::default());
    let (errors, set_errors) = signal(FormErrors::default());
    let (submitting, set_submitting) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let current = form.get();
        if let Err(found) = validate_contact(&current.name, &current.email, &current.subject, &current.message) {
            set_errors.set(found);
            return;
        }
        set_errors.set(FormErrors::default());
        set_submitting.set(true);
        spawn_local(async move {
            TimeoutFuture::new(SUBMIT_DELAY_MS).await;
            ctx.success("Message sent successfully! We'll get back to you soon.");
            form.set(ContactForm::default());
            set_submitting.set(false);
        });
    };

    view! {
        <div class="page">
            <div class="card contact-card">
                <h1>"Get in Touch"</h1>
                <p class="muted">"We're here to help! Reach out for support, feedback, or business inquiries."</p>
                <form class="form" on:submit=on_submit>
                    <label for="contact-name">"Name"</label>
                    <input
                        id="contact-name"
                        type="text"
                        prop:value=move || form.with(|f| f.name.clone())
                        on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                    />
                    <p class="field-error">{move || errors.get().get("name")}</p>

                    <label for="contact-email">"Email"</label>
                    <input
                        id="contact-email"
                        type="email"
                        prop:value=move || form.with(|f| f.email.clone())
                        on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                    />
                    <p class="field-error">{move || errors.get().get("email")}</p>

                    <label for="contact-subject">"Subject"</label>
                    <input
                        id="contact-subject"
                        type="text"
                        prop:value=move || form.with(|f| f.subject.clone())
                        on:input=move |ev| form.update(|f| f.subject = event_target_value(&ev))
                    />
                    <p class="field-error">{move || errors.get().get("subject")}</p>

                    <label for="contact-message">"Message"</label>
                    <textarea
                        id="contact-message"
                        rows="5"
                        prop:value=move || form.with(|f| f.message.clone())
                        on:input=move |ev| form.update(|f| f.message = event_target_value(&ev))
                    ></textarea>
                    <p class="field-error">{move || errors.get().get("message")}</p>

                    <button type="submit" class="btn btn-primary btn-block" disabled=move || submitting.get()>
                        {move || if submitting.get() { "Sending..." } else { "Send Message" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
