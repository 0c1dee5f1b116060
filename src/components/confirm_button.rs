//! Confirm Button Component
//!
//! Inline two-step confirmation for destructive actions.

use leptos::prelude::*;

/// Shows `label` first. When clicked, asks `question` with confirm/cancel.
///
/// # Arguments
/// * `label` - text of the initial button (e.g. "Delete")
/// * `question` - prompt shown while confirming
/// * `on_confirm` - run once the user confirms
#[component]
pub fn ConfirmButton(
    #[prop(into)] label: String,
    #[prop(into, default = "Are you sure?".to_string())] question: String,
    #[prop(into, default = "btn btn-danger btn-sm".to_string())] button_class: String,
    #[prop(into, optional)] disabled: Signal<bool>,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let (confirming, set_confirming) = signal(false);

    view! {
        <Show
            when=move || confirming.get()
            fallback=move || view! {
                <button
                    class=button_class.clone()
                    disabled=move || disabled.get()
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirming.set(true);
                    }
                >
                    {label.clone()}
                </button>
            }
        >
            <span class="confirm">
                <span class="confirm-text">{question.clone()}</span>
                <button
                    class="btn btn-danger btn-sm"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirming.set(false);
                        on_confirm.run(());
                    }
                >
                    "Yes"
                </button>
                <button
                    class="btn btn-secondary btn-sm"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirming.set(false);
                    }
                >
                    "No"
                </button>
            </span>
        </Show>
    }
}
