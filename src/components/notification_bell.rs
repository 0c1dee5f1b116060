//! Notification Bell
//!
//! Unread badge that polls the backend, with a dropdown list. The list is
//! fetched when the dropdown opens.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use borrowdesk_api::{Notification, NotificationStatus};

use crate::components::{Loading, LoadingSize};
use crate::context::AppContext;
use crate::filters::format_optional_date;

const POLL_INTERVAL_MS: u32 = 30_000;

/// Badge text: counts above nine collapse to "9+"
fn badge_text(count: u32) -> String {
    if count > 9 {
        "9+".to_string()
    } else {
        count.to_string()
    }
}

#[component]
pub fn NotificationBell() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (notifications, set_notifications) = signal(Vec::<Notification>::new());
    let (unread, set_unread) = signal(0u32);
    let (open, set_open) = signal(false);
    let (loading, set_loading) = signal(false);

    let refresh_count = move || {
        let api = ctx.api();
        spawn_local(async move {
            match api.notifications().unread_count().await {
                Ok(count) => set_unread.set(count),
                Err(err) => {
                    tracing::debug!(error = %err, "unread count unavailable");
                    ctx.expire_session_if_needed(&err);
                    set_unread.set(0);
                }
            }
        });
    };

    let refresh_list = move || {
        let api = ctx.api();
        set_loading.set(true);
        spawn_local(async move {
            match api.notifications().list().await {
                Ok(list) => set_notifications.set(list),
                Err(err) => {
                    tracing::warn!(error = %err, "could not load notifications");
                    ctx.expire_session_if_needed(&err);
                    if err.status() != Some(500) {
                        set_notifications.set(Vec::new());
                    }
                }
            }
            set_loading.set(false);
        });
    };

    // Initial load, then poll the count until unmounted
    refresh_list();
    refresh_count();
    let alive = StoredValue::new(());
    spawn_local(async move {
        loop {
            TimeoutFuture::new(POLL_INTERVAL_MS).await;
            if alive.try_get_value().is_none() {
                break;
            }
            refresh_count();
        }
    });

    let mark_read = move |id: u32| {
        let api = ctx.api();
        spawn_local(async move {
            match api.notifications().mark_read(id).await {
                Ok(_) => {
                    set_notifications.update(|list| {
                        if let Some(n) = list.iter_mut().find(|n| n.id == id) {
                            n.status = NotificationStatus::Read;
                        }
                    });
                    set_unread.update(|count| *count = count.saturating_sub(1));
                }
                Err(err) => {
                    tracing::warn!(error = %err, id, "could not mark notification read");
                    ctx.expire_session_if_needed(&err);
                }
            }
        });
    };

    let mark_all_read = move |_| {
        let api = ctx.api();
        spawn_local(async move {
            match api.notifications().mark_all_read().await {
                Ok(_) => {
                    set_notifications.update(|list| {
                        for n in list.iter_mut() {
                            n.status = NotificationStatus::Read;
                        }
                    });
                    set_unread.set(0);
                    ctx.success("All notifications marked as read");
                }
                Err(err) => ctx.report(&err, "Failed to mark all notifications as read"),
            }
        });
    };

    let toggle = move |_| {
        let opening = !open.get_untracked();
        set_open.set(opening);
        if opening {
            refresh_list();
        }
    };

    view! {
        <div class="notification-bell">
            <button class="bell-button" on:click=toggle title="Notifications">
                "🔔"
                <Show when=move || { unread.get() > 0 }>
                    <span class="bell-badge">{move || badge_text(unread.get())}</span>
                </Show>
            </button>

            <Show when=move || open.get()>
                <div class="dropdown-backdrop" on:click=move |_| set_open.set(false)></div>
                <div class="dropdown">
                    <div class="dropdown-header">
                        <h3>"Notifications"</h3>
                        <Show when=move || { unread.get() > 0 }>
                            <button class="link-button" on:click=mark_all_read>"Mark all as read"</button>
                        </Show>
                    </div>
                    <div class="dropdown-body">
                        {move || {
                            if loading.get() {
                                view! { <Loading text="Loading notifications..." size=LoadingSize::Small /> }.into_any()
                            } else if notifications.with(Vec::is_empty) {
                                view! { <div class="empty">"No notifications"</div> }.into_any()
                            } else {
                                view! {
                                    <For
                                        each=move || notifications.get()
                                        key=|n| (n.id, n.is_unread())
                                        children=move |n| {
                                            let id = n.id;
                                            let unread_row = n.is_unread();
                                            let row_class = if unread_row { "notification unread" } else { "notification" };
                                            view! {
                                                <div
                                                    class=row_class
                                                    on:click=move |_| if unread_row { mark_read(id) }
                                                >
                                                    <p>{n.message}</p>
                                                    <span class="muted">{format_optional_date(n.created_at.as_deref())}</span>
                                                </div>
                                            }
                                        }
                                    />
                                }.into_any()
                            }
                        }}
                    </div>
                </div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_text() {
        assert_eq!(badge_text(3), "3");
        assert_eq!(badge_text(9), "9");
        assert_eq!(badge_text(12), "9+");
    }
}
