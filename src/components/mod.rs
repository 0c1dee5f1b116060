//! UI Components
//!
//! Reusable Leptos components shared by the pages.

mod confirm_button;
mod loading;
mod modal;
mod nav_link;
mod navigation;
mod notification_bell;
mod status_badge;
mod toast_host;

pub use confirm_button::ConfirmButton;
pub use loading::{Loading, Size as LoadingSize};
pub use modal::Modal;
pub use nav_link::NavLink;
pub use navigation::Navigation;
pub use notification_bell::NotificationBell;
pub use status_badge::{ItemStatusBadge, TransactionStatusBadge};
pub use toast_host::ToastHost;
