//! Status Badges

use leptos::prelude::*;

use borrowdesk_api::{ItemStatus, TransactionStatus};

#[component]
pub fn ItemStatusBadge(status: ItemStatus) -> impl IntoView {
    let class = match status {
        ItemStatus::Available => "badge badge-success",
        ItemStatus::Borrowed => "badge badge-warning",
        ItemStatus::Maintenance => "badge badge-danger",
        ItemStatus::Other(_) => "badge",
    };
    view! { <span class=class>{status.to_string()}</span> }
}

#[component]
pub fn TransactionStatusBadge(status: TransactionStatus) -> impl IntoView {
    let class = match status {
        TransactionStatus::Borrowed => "badge badge-warning",
        TransactionStatus::Returned => "badge badge-success",
        TransactionStatus::Cancelled => "badge badge-danger",
        TransactionStatus::Other(_) => "badge",
    };
    view! { <span class=class>{status.to_string()}</span> }
}
