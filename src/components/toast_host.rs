//! Toast Area
//!
//! Renders the toast queue from the app store. Toasts expire on their own;
//! clicking one dismisses it early.

use leptos::prelude::*;

use crate::context::AppContext;
use crate::store::{store_remove_toast, AppStateStoreFields};

#[component]
pub fn ToastHost() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = ctx.store;

    view! {
        <div class="toast-host">
            <For
                each=move || store.toasts().get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=toast.kind.class() on:click=move |_| store_remove_toast(&store, id)>
                            {toast.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
