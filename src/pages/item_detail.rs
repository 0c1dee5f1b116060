//! Item Detail Page
//!
//! Item facts, its transaction history and the borrow form.

use chrono::{Duration, Local};
use leptos::prelude::*;
use leptos::task::spawn_local;

use borrowdesk_api::services::{BorrowRequest, DEFAULT_LOAN_DAYS};
use borrowdesk_api::{ApiError, Item, Transaction};

use crate::components::{ItemStatusBadge, Loading, Modal, NavLink, TransactionStatusBadge};
use crate::context::AppContext;
use crate::filters::{format_optional_date, input_date, parse_input_date, transactions_for_item};
use crate::loader::{loaded, Loader};
use crate::routes::Route;

#[component]
pub fn ItemDetailPage(id: u32) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let item = RwSignal::new(None::<Option<Item>>);
    let transactions = RwSignal::new(None::<Vec<Transaction>>);
    let (show_borrow, set_show_borrow) = signal(false);

    let loader = Loader::new(ctx, "Failed to load item data");
    let load = move |refresh: bool| {
        let api = ctx.api();
        let item_request = async move { api.items().get(id).await.map(Some) };
        let api = ctx.api();
        let tx_request = async move {
            let all = api.transactions().list(&[]).await?;
            Ok::<_, ApiError>(transactions_for_item(&all, id))
        };
        if refresh {
            loader.refresh(item, item_request);
            loader.refresh(transactions, tx_request);
        } else {
            loader.fetch(item, item_request);
            loader.fetch(transactions, tx_request);
        }
    };
    load(false);

    let loading = Memo::new(move |_| item.with(Option::is_none) || transactions.with(Option::is_none));
    let current = Memo::new(move |_| item.get().flatten());

    view! {
        <Show when=move || !loading.get() fallback=|| view! { <Loading text="Loading item data..." /> }>
            {move || match current.get() {
                None => view! {
                    <div class="page empty-state">
                        <h2>"Item not found"</h2>
                        <p>"The item you're looking for doesn't exist or you don't have permission to view it."</p>
                        <NavLink to=Route::Inventory class="btn btn-secondary">"Back to inventory"</NavLink>
                    </div>
                }.into_any(),
                Some(found) => {
                    let image = found.image_url(&ctx.api().config().server_url);
                    let borrowable = found.is_borrowable();
                    let name = found.name.clone();
                    view! {
                        <div class="page">
                            <NavLink to=Route::Inventory class="back-link">"← Back to inventory"</NavLink>
                            <div class="page-header">
                                <h1>{found.name.clone()}</h1>
                                <div class="actions">
                                    <Show when=move || !ctx.is_admin() && borrowable>
                                        <button class="btn btn-primary" on:click=move |_| set_show_borrow.set(true)>"Borrow Item"</button>
                                    </Show>
                                    <Show when=move || ctx.is_admin()>
                                        <NavLink to=Route::ItemEdit(id) class="btn btn-secondary">"Edit Item"</NavLink>
                                    </Show>
                                </div>
                            </div>

                            {image.map(|src| view! { <img class="item-image" src=src alt=name.clone() /> })}

                            <dl class="details">
                                <dt>"Name"</dt>
                                <dd>{found.name.clone()}</dd>
                                <dt>"Description"</dt>
                                <dd>{if found.description.is_empty() { "No description provided".to_string() } else { found.description.clone() }}</dd>
                                <dt>"Category"</dt>
                                <dd>{found.category_name().unwrap_or("Uncategorized").to_string()}</dd>
                                <dt>"Current Stock"</dt>
                                <dd>
                                    <span class={if found.quantity > 10 { "badge badge-success" } else { "badge badge-danger" }}>
                                        {format!("{} units", found.quantity)}
                                    </span>
                                </dd>
                                <dt>"Status"</dt>
                                <dd><ItemStatusBadge status=found.status.clone() /></dd>
                                <dt>"Last Updated"</dt>
                                <dd>{format_optional_date(found.updated_at.as_deref())}</dd>
                            </dl>

                            <section class="card">
                                <h2>"Transaction History"</h2>
                                <ItemTransactions transactions=transactions />
                            </section>
                        </div>
                    }.into_any()
                }
            }}

            <Show when=move || show_borrow.get()>
                <BorrowModal
                    item=Signal::derive(move || current.get())
                    on_close=Callback::new(move |_| set_show_borrow.set(false))
                    on_borrowed=Callback::new(move |_| {
                        set_show_borrow.set(false);
                        load(true);
                    })
                />
            </Show>
        </Show>
    }
}

#[component]
fn ItemTransactions(transactions: RwSignal<Option<Vec<Transaction>>>) -> impl IntoView {
    view! {
        <Show
            when=move || transactions.with(|list| list.as_ref().is_some_and(|l| !l.is_empty()))
            fallback=|| view! { <p class="empty">"No transactions for this item yet"</p> }
        >
            <table class="table">
                <thead>
                    <tr>
                        <th>"Borrower"</th>
                        <th>"Borrowed"</th>
                        <th>"Due"</th>
                        <th>"Returned"</th>
                        <th>"Status"</th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || loaded(transactions)
                        key=|tx| (tx.id, tx.status.clone())
                        children=|tx| view! {
                            <tr>
                                <td>{tx.user.as_ref().map(|u| u.name.clone()).unwrap_or_else(|| "You".to_string())}</td>
                                <td>{format_optional_date(tx.borrow_date.as_deref())}</td>
                                <td>{format_optional_date(tx.due_date.as_deref())}</td>
                                <td>{format_optional_date(tx.return_date.as_deref())}</td>
                                <td><TransactionStatusBadge status=tx.status.clone() /></td>
                            </tr>
                        }
                    />
                </tbody>
            </table>
        </Show>
    }
}

/// Borrow form. Dates default to today and a week from today.
#[component]
fn BorrowModal(item: Signal<Option<Item>>, on_close: Callback<()>, on_borrowed: Callback<()>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let today = Local::now().date_naive();
    let (borrow_date, set_borrow_date) = signal(input_date(today));
    let (due_date, set_due_date) = signal(input_date(today + Duration::days(DEFAULT_LOAN_DAYS)));
    let (submitting, set_submitting) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(current) = item.get_untracked().filter(Item::is_borrowable) else {
            ctx.error("Item is not available for borrowing");
            return;
        };
        let request = BorrowRequest::new(
            current.id,
            parse_input_date(&borrow_date.get_untracked()),
            parse_input_date(&due_date.get_untracked()),
            Local::now().date_naive(),
        );
        set_submitting.set(true);
        let api = ctx.api();
        spawn_local(async move {
            match api.transactions().borrow(&request).await {
                Ok(response) => {
                    ctx.success(response.message_or("Item borrowed successfully"));
                    on_borrowed.run(());
                }
                Err(err) => ctx.report(&err, "Failed to borrow item"),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <Modal title="Borrow Item" on_close=on_close>
            <form class="form" on:submit=on_submit>
                <p>{move || item.get().map(|i| i.name).unwrap_or_default()}</p>
                <label for="borrow-date">"Borrow date"</label>
                <input
                    id="borrow-date"
                    type="date"
                    prop:value=move || borrow_date.get()
                    on:input=move |ev| set_borrow_date.set(event_target_value(&ev))
                />
                <label for="due-date">"Due date"</label>
                <input
                    id="due-date"
                    type="date"
                    prop:value=move || due_date.get()
                    on:input=move |ev| set_due_date.set(event_target_value(&ev))
                />
                <div class="form-actions">
                    <button type="button" class="btn btn-secondary" on:click=move |_| on_close.run(())>"Cancel"</button>
                    <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                        {move || if submitting.get() { "Borrowing..." } else { "Confirm Borrow" }}
                    </button>
                </div>
            </form>
        </Modal>
    }
}
