//! Navigation Link

use leptos::prelude::*;

use crate::context::AppContext;
use crate::routes::Route;

/// Anchor that switches pages without a reload. Ctrl/Cmd-click keeps the
/// browser's default so links still open in a new tab.
#[component]
pub fn NavLink(
    to: Route,
    #[prop(into, optional)] class: String,
    children: Children,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let on_click = move |ev: web_sys::MouseEvent| {
        if ev.ctrl_key() || ev.meta_key() || ev.shift_key() {
            return;
        }
        ev.prevent_default();
        ctx.navigate(to);
    };

    view! {
        <a
            href=to.path()
            class=move || if ctx.route() == to { format!("{class} active") } else { class.clone() }
            on:click=on_click
        >
            {children()}
        </a>
    }
}
