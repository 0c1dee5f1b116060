//! Application Context
//!
//! Shared handles provided via Leptos Context API: the app store and the
//! API gateway, plus the navigation and toast plumbing every page uses.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsValue;

use borrowdesk_api::{ApiError, Gateway, User};

use crate::routes::{expire_session, Route};
use crate::store::{store_push_toast, store_remove_toast, store_set_user, AppStateStoreFields, AppStore, ToastKind};

/// How long a toast stays on screen
const TOAST_TTL_MS: u32 = 4_000;

#[derive(Clone, Copy)]
pub struct AppContext {
    pub store: AppStore,
    gateway: StoredValue<Gateway>,
}

impl AppContext {
    pub fn new(store: AppStore, gateway: Gateway) -> Self {
        Self {
            store,
            gateway: StoredValue::new(gateway),
        }
    }

    /// Cloned gateway handle, cheap to move into a task
    pub fn api(&self) -> Gateway {
        self.gateway.get_value()
    }

    // ========================
    // Navigation
    // ========================

    pub fn route(&self) -> Route {
        self.store.route().get()
    }

    /// Show a page and add a history entry
    pub fn navigate(&self, route: Route) {
        if self.store.route().get_untracked() == route {
            return;
        }
        tracing::debug!(path = %route.path(), "navigate");
        write_history(&route, false);
        self.store.route().set(route);
    }

    /// Show a page in place of the current history entry
    pub fn redirect(&self, route: Route) {
        write_history(&route, true);
        self.store.route().set(route);
    }

    /// Follow a browser back/forward without touching history
    pub fn restore(&self, route: Route) {
        self.store.route().set(route);
    }

    // ========================
    // Session
    // ========================

    pub fn user(&self) -> Option<User> {
        self.store.user().get()
    }

    pub fn is_admin(&self) -> bool {
        self.store.user().with(|user| user.as_ref().is_some_and(User::is_admin))
    }

    pub fn is_signed_in(&self) -> bool {
        self.store.user().with(Option::is_some)
    }

    pub fn sign_in(&self, user: User) {
        tracing::info!(user_id = user.id, "signed in");
        store_set_user(&self.store, Some(user));
        self.navigate(Route::Dashboard);
    }

    /// Drop local session state. The token is cleared by the auth facade.
    pub fn sign_out(&self) {
        let api = self.api();
        let ctx = *self;
        spawn_local(async move {
            if let Err(err) = api.auth().logout().await {
                tracing::warn!(error = %err, "logout request failed, session cleared locally");
            }
            store_set_user(&ctx.store, None);
            ctx.navigate(Route::Login);
        });
    }

    // ========================
    // Toasts
    // ========================

    pub fn toast(&self, kind: ToastKind, message: impl Into<String>) {
        let id = store_push_toast(&self.store, kind, message.into());
        let store = self.store;
        spawn_local(async move {
            TimeoutFuture::new(TOAST_TTL_MS).await;
            store_remove_toast(&store, id);
        });
    }

    pub fn success(&self, message: impl Into<String>) {
        self.toast(ToastKind::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.toast(ToastKind::Error, message);
    }

    /// Send the user to Login when `err` means the session has expired.
    ///
    /// Every failed call goes through here, including background ones that
    /// never show a toast. Returns true when the session was dropped.
    pub fn expire_session_if_needed(&self, err: &ApiError) -> bool {
        let current = self.store.route().get_untracked();
        let api = self.api();
        let Some(target) = expire_session(err, current, api.session()) else {
            return false;
        };
        tracing::info!("session expired, signing out");
        store_set_user(&self.store, None);
        self.redirect(target);
        true
    }

    /// Surface a failed call: expire the session if needed, then toast it.
    pub fn report(&self, err: &ApiError, fallback: &str) {
        tracing::warn!(error = %err, "request failed");
        self.expire_session_if_needed(err);
        self.error(err.user_message(fallback));
    }
}

fn write_history(route: &Route, replace: bool) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    let path = route.path();
    let result = if replace {
        history.replace_state_with_url(&JsValue::NULL, "", Some(&path))
    } else {
        history.push_state_with_url(&JsValue::NULL, "", Some(&path))
    };
    if result.is_err() {
        tracing::warn!(%path, "could not update browser history");
    }
}
