//! Inventory Page
//!
//! Item list with category and text filters. Admins add items through a
//! modal (with optional image and inline category creation) and delete them.

use leptos::prelude::*;
use leptos::task::spawn_local;

use borrowdesk_api::services::{CategoryForm, ItemForm};
use borrowdesk_api::{Category, Item, ItemStatus, User};

use crate::components::{ConfirmButton, ItemStatusBadge, Loading, Modal, NavLink};
use crate::context::AppContext;
use crate::filters::{filter_items, CategoryFilter};
use crate::loader::{loaded, Loader};
use crate::routes::Route;
use crate::store::AppStateStoreFields;
use crate::upload::{preview_url, read_image, revoke_preview, selected_file};

#[component]
pub fn InventoryPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let items = RwSignal::new(None::<Vec<Item>>);
    let categories = RwSignal::new(None::<Vec<Category>>);
    let (category_filter, set_category_filter) = signal(CategoryFilter::All);
    let (search, set_search) = signal(String::new());
    let (show_add, set_show_add) = signal(false);

    // Admins read the admin listing
    let admin = ctx.store.user().with_untracked(|user| user.as_ref().is_some_and(User::is_admin));
    let list_items = move || {
        let api = ctx.api();
        async move {
            if admin {
                api.items().admin_list(&[]).await
            } else {
                api.items().list(&[]).await
            }
        }
    };

    let loader = Loader::new(ctx, "Failed to load inventory data");
    loader.fetch(items, list_items());
    {
        let api = ctx.api();
        loader.fetch(categories, async move { api.categories().list().await });
    }

    let loading = Memo::new(move |_| items.with(Option::is_none) || categories.with(Option::is_none));
    let visible = Memo::new(move |_| {
        items.with(|list| filter_items(list.as_deref().unwrap_or_default(), category_filter.get(), &search.get()))
    });

    let delete_item = move |id: u32| {
        let api = ctx.api();
        spawn_local(async move {
            match api.items().delete(id).await {
                Ok(response) => {
                    items.update(|list| {
                        if let Some(list) = list {
                            list.retain(|item| item.id != id);
                        }
                    });
                    ctx.success(response.message_or("Item deleted successfully"));
                }
                Err(err) => ctx.report(&err, "Failed to delete item"),
            }
        });
    };

    let on_created = Callback::new(move |_: ()| {
        set_show_add.set(false);
        loader.refresh(items, list_items());
    });

    view! {
        <Show when=move || !loading.get() fallback=|| view! { <Loading text="Loading inventory data..." /> }>
            <div class="page">
                <div class="page-header">
                    <h1>"Inventory Management"</h1>
                    <Show when=move || ctx.is_admin()>
                        <button class="btn btn-primary" on:click=move |_| set_show_add.set(true)>"Add New Item"</button>
                    </Show>
                </div>

                <div class="filters">
                    <div class="filter">
                        <label for="category">"Filter by Category"</label>
                        <select
                            id="category"
                            prop:value=move || category_filter.get().value()
                            on:change=move |ev| set_category_filter.set(CategoryFilter::from_value(&event_target_value(&ev)))
                        >
                            <option value="all">"All Categories"</option>
                            <For
                                each=move || loaded(categories)
                                key=|category| category.id
                                children=|category| view! { <option value=category.id.to_string()>{category.name}</option> }
                            />
                        </select>
                    </div>
                    <div class="filter filter-wide">
                        <label for="search">"Search Items"</label>
                        <input
                            id="search"
                            type="text"
                            placeholder="Search by name or description"
                            prop:value=move || search.get()
                            on:input=move |ev| set_search.set(event_target_value(&ev))
                        />
                    </div>
                </div>

                <Show
                    when=move || visible.with(|list| !list.is_empty())
                    fallback=|| view! { <p class="empty">"No items found"</p> }
                >
                    <table class="table">
                        <thead>
                            <tr>
                                <th>"Name"</th>
                                <th>"Category"</th>
                                <th>"Quantity"</th>
                                <th>"Status"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || visible.get()
                                key=|item| (item.id, item.quantity, item.status.clone())
                                children=move |item| {
                                    let id = item.id;
                                    let quantity_class = if item.is_low_stock() { "low-stock" } else { "" };
                                    let name = item.name.clone();
                                    view! {
                                        <tr>
                                            <td>
                                                <NavLink to=Route::ItemDetail(id)>{name}</NavLink>
                                                <div class="muted">{item.description.clone()}</div>
                                            </td>
                                            <td>{item.category_name().unwrap_or("Uncategorized").to_string()}</td>
                                            <td class=quantity_class>{item.quantity}</td>
                                            <td><ItemStatusBadge status=item.status.clone() /></td>
                                            <td class="actions">
                                                <NavLink to=Route::ItemDetail(id) class="btn btn-secondary btn-sm">"View"</NavLink>
                                                <Show when=move || ctx.is_admin()>
                                                    <NavLink to=Route::ItemEdit(id) class="btn btn-secondary btn-sm">"Edit"</NavLink>
                                                    <ConfirmButton
                                                        label="Delete"
                                                        question="Delete this item?"
                                                        on_confirm=move |_| delete_item(id)
                                                    />
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

            <Show when=move || show_add.get()>
                <AddItemModal categories=categories on_close=Callback::new(move |_| set_show_add.set(false)) on_created=on_created />
            </Show>
        </Show>
    }
}

/// Admin form for a new item
#[component]
fn AddItemModal(
    categories: RwSignal<Option<Vec<Category>>>,
    on_close: Callback<()>,
    on_created: Callback<()>,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let form = RwSignal::new(ItemForm::default());
    let (preview, set_preview) = signal(None::<String>);
    let (new_category, set_new_category) = signal(None::<String>);
    let (creating_category, set_creating_category) = signal(false);
    let (submitting, set_submitting) = signal(false);

    on_cleanup(move || {
        if let Some(url) = preview.get_untracked() {
            revoke_preview(&url);
        }
    });

    let on_image = move |ev: web_sys::Event| {
        let Some(file) = selected_file(&ev) else {
            return;
        };
        spawn_local(async move {
            match read_image(&file).await {
                Ok(upload) => {
                    if let Some(old) = preview.get_untracked() {
                        revoke_preview(&old);
                    }
                    set_preview.set(preview_url(&file));
                    form.update(|f| f.image = Some(upload));
                }
                Err(message) => ctx.error(message),
            }
        });
    };

    let create_category = move |_| {
        let name = new_category.get().unwrap_or_default();
        if name.trim().is_empty() {
            ctx.error("Category name is required");
            return;
        }
        set_creating_category.set(true);
        let api = ctx.api();
        spawn_local(async move {
            let category_form = CategoryForm { name: name.trim().to_string(), description: String::new() };
            match api.categories().create(&category_form).await {
                Ok(response) => {
                    let category = response.data;
                    form.update(|f| f.category_id = Some(category.id));
                    categories.update(|list| list.get_or_insert_with(Vec::new).push(category));
                    set_new_category.set(None);
                    ctx.success("Category created successfully");
                }
                Err(err) => ctx.report(&err, "Failed to create category"),
            }
            set_creating_category.set(false);
        });
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let item = form.get();
        if item.category_id.is_none() {
            ctx.error("Please select or create a category");
            return;
        }
        set_submitting.set(true);
        let api = ctx.api();
        spawn_local(async move {
            match api.items().create(&item).await {
                Ok(response) => {
                    ctx.success(response.message_or("Item added successfully"));
                    on_created.run(());
                }
                Err(err) => ctx.report(&err, "Failed to add item"),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <Modal title="Add New Item" on_close=on_close>
            <form class="form" on:submit=on_submit>
                <label for="item-name">"Name"</label>
                <input
                    id="item-name"
                    type="text"
                    required
                    prop:value=move || form.with(|f| f.name.clone())
                    on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                />

                <label for="item-description">"Description"</label>
                <textarea
                    id="item-description"
                    prop:value=move || form.with(|f| f.description.clone())
                    on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
                ></textarea>

                <label for="item-quantity">"Quantity"</label>
                <input
                    id="item-quantity"
                    type="number"
                    min="0"
                    prop:value=move || form.with(|f| f.quantity.to_string())
                    on:input=move |ev| form.update(|f| f.quantity = event_target_value(&ev).parse().unwrap_or(0))
                />

                <label for="item-category">"Category"</label>
                <Show
                    when=move || new_category.with(Option::is_some)
                    fallback=move || view! {
                        <div class="inline-row">
                            <select
                                id="item-category"
                                prop:value=move || form.with(|f| f.category_id.map(|id| id.to_string()).unwrap_or_default())
                                on:change=move |ev| form.update(|f| f.category_id = event_target_value(&ev).parse().ok())
                            >
                                <option value="">"Select a category"</option>
                                <For
                                    each=move || loaded(categories)
                                    key=|category| category.id
                                    children=|category| view! { <option value=category.id.to_string()>{category.name}</option> }
                                />
                            </select>
                            <button type="button" class="btn btn-secondary btn-sm" on:click=move |_| set_new_category.set(Some(String::new()))>
                                "New category"
                            </button>
                        </div>
                    }
                >
                    <div class="inline-row">
                        <input
                            type="text"
                            placeholder="New category name"
                            prop:value=move || new_category.get().unwrap_or_default()
                            on:input=move |ev| set_new_category.set(Some(event_target_value(&ev)))
                        />
                        <button type="button" class="btn btn-primary btn-sm" disabled=move || creating_category.get() on:click=create_category>
                            {move || if creating_category.get() { "Creating..." } else { "Create" }}
                        </button>
                        <button type="button" class="btn btn-secondary btn-sm" on:click=move |_| set_new_category.set(None)>"Cancel"</button>
                    </div>
                </Show>

                <label for="item-status">"Status"</label>
                <select
                    id="item-status"
                    prop:value=move || form.with(|f| f.status.to_string())
                    on:change=move |ev| form.update(|f| f.status = ItemStatus::from(event_target_value(&ev)))
                >
                    {ItemStatus::CHOICES.iter().map(|status| view! { <option value=status.as_str().to_string()>{status.to_string()}</option> }).collect_view()}
                </select>

                <label for="item-image">"Image"</label>
                <input id="item-image" type="file" accept="image/jpeg,image/png,image/jpg,image/gif" on:change=on_image />
                {move || preview.get().map(|src| view! { <img class="image-preview" src=src alt="Preview" /> })}

                <div class="form-actions">
                    <button type="button" class="btn btn-secondary" on:click=move |_| on_close.run(())>"Cancel"</button>
                    <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                        {move || if submitting.get() { "Adding..." } else { "Add Item" }}
                    </button>
                </div>
            </form>
        </Modal>
    }
}
