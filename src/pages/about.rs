//! About Page

use std::sync::Arc;

use browser_logger::LogBuffer;
use leptos::prelude::*;

use crate::components::NavLink;
use crate::routes::Route;

/// Lines shown in the diagnostics panel
const RECENT_LOG_LINES: usize = 100;

#[component]
pub fn AboutPage() -> impl IntoView {
    view! {
        <div class="page">
            <div class="card">
                <h1>"About Borrowdesk"</h1>
                <p>
                    "Borrowdesk keeps track of shared equipment: what is on the shelf, "
                    "who has borrowed it and when it is due back."
                </p>
                <h2>"How it works"</h2>
                <ul>
                    <li>"Browse the inventory and open an item to see its details and history."</li>
                    <li>"Borrow an available item by picking a borrow date and a due date."</li>
                    <li>"Return items from the Transactions page once you are done."</li>
                    <li>"Administrators manage items, categories and user access."</li>
                </ul>
                <p>
                    "Questions? "
                    <NavLink to=Route::Contact>"Get in touch"</NavLink>
                    "."
                </p>
            </div>
            <RecentLog />
        </div>
    }
}

/// Recent client log lines, for attaching to a support request
#[component]
fn RecentLog() -> impl IntoView {
    let logs = use_context::<Arc<LogBuffer>>();
    let (lines, set_lines) = signal(Vec::<String>::new());
    let (open, set_open) = signal(false);

    let reload = {
        let logs = logs.clone();
        move || {
            if let Some(logs) = &logs {
                set_lines.set(logs.tail(RECENT_LOG_LINES));
            }
        }
    };
    let toggle = {
        let reload = reload.clone();
        move |_| {
            let opening = !open.get_untracked();
            if opening {
                reload();
            }
            set_open.set(opening);
        }
    };
    let clear = move |_| {
        if let Some(logs) = &logs {
            logs.clear();
            tracing::debug!("client log cleared");
        }
        set_lines.set(Vec::new());
    };

    view! {
        <div class="card">
            <h2>"Diagnostics"</h2>
            <button class="btn btn-secondary" on:click=toggle>
                {move || if open.get() { "Hide recent log" } else { "Show recent log" }}
            </button>
            <Show when=move || open.get()>
                <div class="form-actions">
                    <button class="btn btn-secondary" on:click={
                        let reload = reload.clone();
                        move |_| reload()
                    }>"Refresh"</button>
                    <button class="btn btn-danger" on:click=clear.clone()>"Clear"</button>
                </div>
                <Show
                    when=move || !lines.with(Vec::is_empty)
                    fallback=|| view! { <p class="muted">"No log lines recorded yet."</p> }
                >
                    <pre class="log-dump">{move || lines.get().join("\n")}</pre>
                </Show>
            </Show>
        </div>
    }
}
