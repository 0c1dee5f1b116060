//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Only app-wide
//! state lives here; page data stays in page signals.

use leptos::prelude::*;
use reactive_stores::Store;

use borrowdesk_api::User;

use crate::routes::Route;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    pub fn class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast-success",
            ToastKind::Error => "toast toast-error",
            ToastKind::Info => "toast toast-info",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
}

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Signed-in user, None until the session is resolved
    pub user: Option<User>,
    /// Page being shown
    pub route: Route,
    /// Toasts currently on screen, oldest first
    pub toasts: Vec<Toast>,
    pub next_toast_id: u32,
    /// True once the startup `/user` lookup has finished (or was skipped)
    pub session_checked: bool,
}

impl AppState {
    pub fn new(route: Route) -> Self {
        Self {
            route,
            next_toast_id: 1,
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

// ========================
// Store Helper Functions
// ========================

/// Queue a toast and return its id
pub fn store_push_toast(store: &AppStore, kind: ToastKind, message: String) -> u32 {
    let id = store.next_toast_id().get_untracked();
    store.next_toast_id().set(id.wrapping_add(1));
    store.toasts().write().push(Toast { id, kind, message });
    id
}

/// Remove a toast by ID
pub fn store_remove_toast(store: &AppStore, toast_id: u32) {
    store.toasts().write().retain(|toast| toast.id != toast_id);
}

/// Replace the signed-in user
pub fn store_set_user(store: &AppStore, user: Option<User>) {
    store.user().set(user);
}
