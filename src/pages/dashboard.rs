//! Dashboard Page
//!
//! Overview counts, recent transactions and the low stock list.

use leptos::prelude::*;

use borrowdesk_api::{Category, Item, Transaction, User};

use crate::components::{Loading, NavLink, TransactionStatusBadge};
use crate::context::AppContext;
use crate::filters::{format_optional_date, DashboardStats};
use crate::loader::Loader;
use crate::routes::Route;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let is_admin = ctx.is_admin();

    let items = RwSignal::new(None::<Vec<Item>>);
    let categories = RwSignal::new(None::<Vec<Category>>);
    let transactions = RwSignal::new(None::<Vec<Transaction>>);
    let users = RwSignal::new(None::<Vec<User>>);

    let loader = Loader::new(ctx, "Failed to load dashboard data");
    let api = ctx.api();
    {
        let api = api.clone();
        loader.fetch(items, async move { api.items().list(&[]).await });
    }
    {
        let api = api.clone();
        loader.fetch(categories, async move { api.categories().list().await });
    }
    {
        let api = api.clone();
        loader.fetch(transactions, async move { api.transactions().list(&[]).await });
    }
    if is_admin {
        loader.fetch(users, async move { api.users().list(&[]).await });
    } else {
        users.set(Some(Vec::new()));
    }

    let loading = Memo::new(move |_| {
        items.with(Option::is_none)
            || categories.with(Option::is_none)
            || transactions.with(Option::is_none)
            || users.with(Option::is_none)
    });

    let stats = Memo::new(move |_| {
        let items = items.get().unwrap_or_default();
        let category_count = categories.with(|c| c.as_ref().map_or(0, Vec::len));
        let transactions = transactions.get().unwrap_or_default();
        let users = users.get().unwrap_or_default();
        DashboardStats::compute(&items, category_count, &transactions, &users)
    });

    view! {
        <Show when=move || !loading.get() fallback=|| view! { <Loading text="Loading dashboard data..." /> }>
            <div class="page">
                <div class="page-header">
                    <h1>"Dashboard"</h1>
                    <p class="muted">"Overview of your inventory system"</p>
                </div>

                <div class="stat-grid">
                    <StatCard label="Total Items" value=Signal::derive(move || stats.with(|s| s.total_items))>
                        <NavLink to=Route::Inventory>"View all"</NavLink>
                    </StatCard>
                    <StatCard label="Categories" value=Signal::derive(move || stats.with(|s| s.total_categories))>
                        <NavLink to=Route::Categories>"View all"</NavLink>
                    </StatCard>
                    <StatCard label="Low Stock Items" value=Signal::derive(move || stats.with(|s| s.low_stock_items.len()))>
                        <NavLink to=Route::Inventory>"View items"</NavLink>
                    </StatCard>
                    <Show when=move || is_admin>
                        <StatCard label="Total Users" value=Signal::derive(move || stats.with(|s| s.total_users))>
                            <NavLink to=Route::Users>"Manage users"</NavLink>
                        </StatCard>
                    </Show>
                </div>

                <section class="card">
                    <h2>"Recent Transactions"</h2>
                    <Show
                        when=move || stats.with(|s| !s.recent_transactions.is_empty())
                        fallback=|| view! { <p class="empty">"No recent transactions"</p> }
                    >
                        <ul class="list">
                            <For
                                each=move || stats.get().recent_transactions
                                key=|tx| tx.id
                                children=move |tx| {
                                    let item_name = tx.item_name().to_string();
                                    view! {
                                    <li class="list-row">
                                        <NavLink to=Route::ItemDetail(tx.item_id)>{item_name}</NavLink>
                                        <span class="muted">{format_optional_date(tx.display_timestamp())}</span>
                                        <TransactionStatusBadge status=tx.status.clone() />
                                    </li>
                                    }
                                }
                            />
                        </ul>
                    </Show>
                </section>

                <Show when=move || stats.with(|s| !s.low_stock_items.is_empty())>
                    <section class="card">
                        <h2>"Low Stock Items"</h2>
                        <ul class="list">
                            <For
                                each=move || stats.get().low_stock_items
                                key=|item| item.id
                                children=move |item| {
                                    let name = item.name.clone();
                                    view! {
                                    <li class="list-row">
                                        <NavLink to=Route::ItemDetail(item.id)>{name}</NavLink>
                                        <span class="muted">{item.category_name().unwrap_or("Uncategorized").to_string()}</span>
                                        <span class="badge badge-danger">{format!("{} left", item.quantity)}</span>
                                    </li>
                                    }
                                }
                            />
                        </ul>
                    </section>
                </Show>
            </div>
        </Show>
    }
}

#[component]
fn StatCard(#[prop(into)] label: String, value: Signal<usize>, children: Children) -> impl IntoView {
    view! {
        <div class="stat-card">
            <dt class="muted">{label}</dt>
            <dd class="stat-value">{move || value.get()}</dd>
            <div class="stat-link">{children()}</div>
        </div>
    }
}
