//! Transactions Page
//!
//! Admins see every transaction and may cancel; users see their own. Both
//! can return an open loan. The list is re-fetched after each mutation.

use leptos::prelude::*;
use leptos::task::spawn_local;

use borrowdesk_api::{ApiResponse, ApiResult, Gateway, Transaction};

use crate::components::{ConfirmButton, Loading, NavLink, TransactionStatusBadge};
use crate::context::AppContext;
use crate::filters::{count_transactions, filter_transactions, format_optional_date, TransactionFilter};
use crate::loader::{loaded, Loader};
use crate::routes::Route;

async fn fetch_transactions(api: Gateway, admin: bool) -> ApiResult<Vec<Transaction>> {
    if admin {
        api.transactions().admin_list(&[]).await
    } else {
        api.transactions().list(&[]).await
    }
}

#[component]
pub fn TransactionsPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let admin = ctx.is_admin();

    let transactions = RwSignal::new(None::<Vec<Transaction>>);
    let (filter, set_filter) = signal(TransactionFilter::All);

    let loader = Loader::new(ctx, "Failed to load transactions");
    loader.fetch(transactions, fetch_transactions(ctx.api(), admin));

    let visible = Memo::new(move |_| filter_transactions(&loaded(transactions), filter.get()));

    // Shared tail of return and cancel
    let after_mutation = move |outcome: ApiResult<ApiResponse<()>>, done: &'static str, failed: &'static str| {
        match outcome {
            Ok(response) => {
                ctx.success(response.message_or(done));
                loader.refresh(transactions, fetch_transactions(ctx.api(), admin));
            }
            Err(err) => ctx.report(&err, failed),
        }
    };

    let return_item = move |id: u32| {
        let api = ctx.api();
        spawn_local(async move {
            let outcome = api.transactions().return_item(id).await;
            after_mutation(outcome, "Item returned successfully", "Failed to return item");
        });
    };

    let cancel = move |id: u32| {
        let api = ctx.api();
        spawn_local(async move {
            let outcome = api.transactions().cancel(id).await;
            after_mutation(outcome, "Transaction cancelled successfully", "Failed to cancel transaction");
        });
    };

    view! {
        <Show when=move || transactions.with(Option::is_some) fallback=|| view! { <Loading text="Loading transactions..." /> }>
            <div class="page">
                <div class="page-header">
                    <h1>{if admin { "All Transactions" } else { "My Transactions" }}</h1>
                </div>

                <div class="tabs">
                    {TransactionFilter::ALL.into_iter().map(|option| view! {
                        <button
                            class=move || if filter.get() == option { "tab active" } else { "tab" }
                            on:click=move |_| set_filter.set(option)
                        >
                            {move || format!("{} ({})", option.label(), transactions.with(|list| {
                                list.as_deref().map_or(0, |l| count_transactions(l, option))
                            }))}
                        </button>
                    }).collect_view()}
                </div>

                <Show
                    when=move || visible.with(|list| !list.is_empty())
                    fallback=|| view! { <p class="empty">"No transactions found"</p> }
                >
                    <table class="table">
                        <thead>
                            <tr>
                                <th>"Item"</th>
                                <Show when=move || admin><th>"User"</th></Show>
                                <th>"Borrowed"</th>
                                <th>"Due"</th>
                                <th>"Returned"</th>
                                <th>"Status"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || visible.get()
                                key=|tx| (tx.id, tx.status.clone())
                                children=move |tx| {
                                    let id = tx.id;
                                    let open = tx.is_open();
                                    let user_name = tx.user.as_ref().map(|u| u.name.clone()).unwrap_or_default();
                                    let item_name = tx.item_name().to_string();
                                    view! {
                                        <tr>
                                            <td><NavLink to=Route::ItemDetail(tx.item_id)>{item_name}</NavLink></td>
                                            <Show when=move || admin><td>{user_name.clone()}</td></Show>
                                            <td>{format_optional_date(tx.borrow_date.as_deref())}</td>
                                            <td>{format_optional_date(tx.due_date.as_deref())}</td>
                                            <td>{format_optional_date(tx.return_date.as_deref())}</td>
                                            <td><TransactionStatusBadge status=tx.status.clone() /></td>
                                            <td class="actions">
                                                <Show when=move || open>
                                                    <ConfirmButton
                                                        label="Return"
                                                        question="Return this item?"
                                                        button_class="btn btn-primary btn-sm"
                                                        on_confirm=move |_| return_item(id)
                                                    />
                                                    <Show when=move || admin>
                                                        <ConfirmButton
                                                            label="Cancel"
                                                            question="Cancel this transaction?"
                                                            on_confirm=move |_| cancel(id)
                                                        />
                                                    </Show>
                                                </Show>
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </Show>
            </div>
        </Show>
    }
}
