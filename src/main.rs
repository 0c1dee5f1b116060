//! Borrowdesk Frontend Entry Point

mod app;
mod components;
mod context;
mod filters;
mod loader;
mod pages;
mod routes;
mod store;
mod upload;
mod validation;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    let logs = browser_logger::init(tracing::Level::DEBUG, browser_logger::DEFAULT_CAPACITY);

    match app::connect() {
        Ok(gateway) => mount_to_body(move || view! { <App gateway=gateway logs=logs /> }),
        Err(err) => tracing::error!(error = %err, "could not configure the API client"),
    }
}
