//! Borrowdesk Frontend App
//!
//! Root component: builds the gateway, resolves the session, then renders
//! the navigation bar, the page for the current route and the toast area.

use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use borrowdesk_api::{ClientConfig, Gateway, LocalStorageSession};
use browser_logger::LogBuffer;

use crate::components::{Loading, Navigation, ToastHost};
use crate::context::AppContext;
use crate::pages::{
    AboutPage, CategoriesPage, ContactPage, DashboardPage, InventoryPage, ItemDetailPage, ItemEditPage, LoginPage,
    NotFoundPage, RegisterPage, TransactionsPage, UsersPage,
};
use crate::routes::{discard_rejected_token, Route};
use crate::store::{store_set_user, AppState, AppStateStoreFields};

fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

#[component]
pub fn App(gateway: Gateway, logs: Arc<LogBuffer>) -> impl IntoView {
    let store = Store::new(AppState::new(Route::from_path(&current_path())));
    let ctx = AppContext::new(store, gateway);
    provide_context(store);
    provide_context(ctx);
    provide_context(logs);

    // Resolve the stored token into a user once at startup
    let api = ctx.api();
    if api.session().is_authenticated() {
        spawn_local(async move {
            match api.auth().current_user().await {
                Ok(user) => store_set_user(&store, Some(user)),
                Err(err) => {
                    if discard_rejected_token(&err, api.session()) {
                        tracing::info!(error = %err, "stored session rejected");
                    } else {
                        ctx.report(&err, "Could not restore your session");
                    }
                }
            }
            store.session_checked().set(true);
        });
    } else {
        store.session_checked().set(true);
    }

    // Browser back/forward
    let on_popstate = Closure::<dyn Fn(web_sys::Event)>::new(move |_| {
        ctx.restore(Route::from_path(&current_path()));
    });
    if let Some(window) = web_sys::window() {
        if window
            .add_event_listener_with_callback("popstate", on_popstate.as_ref().unchecked_ref())
            .is_err()
        {
            tracing::warn!("could not listen for history changes");
        }
    }
    on_popstate.forget();

    // The page actually shown after the auth and role checks
    let shown = Memo::new(move |_| {
        let signed_in = ctx.is_signed_in();
        store.route().get().guard(signed_in, ctx.is_admin())
    });

    // Keep the address bar in step with guard redirects
    Effect::new(move |_| {
        let shown = shown.get();
        if store.session_checked().get() && shown != store.route().get_untracked() {
            ctx.redirect(shown);
        }
    });

    view! {
        <div class="app-layout">
            <Navigation />
            <main class="main-content">
                <Show
                    when=move || store.session_checked().get()
                    fallback=|| view! { <Loading text="Loading..." full_screen=true /> }
                >
                    {move || match shown.get() {
                        Route::Login => view! { <LoginPage /> }.into_any(),
                        Route::Register => view! { <RegisterPage /> }.into_any(),
                        Route::Dashboard => view! { <DashboardPage /> }.into_any(),
                        Route::Inventory => view! { <InventoryPage /> }.into_any(),
                        Route::ItemDetail(id) => view! { <ItemDetailPage id=id /> }.into_any(),
                        Route::ItemEdit(id) => view! { <ItemEditPage id=id /> }.into_any(),
                        Route::Categories => view! { <CategoriesPage /> }.into_any(),
                        Route::Transactions => view! { <TransactionsPage /> }.into_any(),
                        Route::Users => view! { <UsersPage /> }.into_any(),
                        Route::About => view! { <AboutPage /> }.into_any(),
                        Route::Contact => view! { <ContactPage /> }.into_any(),
                        Route::NotFound => view! { <NotFoundPage /> }.into_any(),
                    }}
                </Show>
            </main>
            <ToastHost />
        </div>
    }
}

/// Build the gateway against the configured backend
pub fn connect() -> Result<Gateway, borrowdesk_api::ApiError> {
    let config = ClientConfig::from_env();
    Gateway::connect(config, Arc::new(LocalStorageSession::new()))
}
