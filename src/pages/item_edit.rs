//! Item Edit Page (admin)

use leptos::prelude::*;
use leptos::task::spawn_local;

use borrowdesk_api::services::ItemForm;
use borrowdesk_api::{Category, Item, ItemStatus};

use crate::components::{Loading, NavLink};
use crate::context::AppContext;
use crate::loader::{loaded, Loader};
use crate::routes::Route;
use crate::upload::{preview_url, read_image, revoke_preview, selected_file};

#[component]
pub fn ItemEditPage(id: u32) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let item = RwSignal::new(None::<Option<Item>>);
    let categories = RwSignal::new(None::<Vec<Category>>);
    let form = RwSignal::new(ItemForm::default());
    let (preview, set_preview) = signal(None::<String>);
    let (submitting, set_submitting) = signal(false);

    let loader = Loader::new(ctx, "Failed to load item data");
    {
        let api = ctx.api();
        loader.fetch(item, async move { api.items().admin_get(id).await.map(Some) });
    }
    {
        let api = ctx.api();
        loader.fetch(categories, async move { api.categories().admin_list().await });
    }

    // Prefill once the item arrives
    Effect::new(move |_| {
        if let Some(Some(loaded_item)) = item.get() {
            form.set(ItemForm::from_item(&loaded_item));
        }
    });

    on_cleanup(move || {
        if let Some(url) = preview.get_untracked() {
            revoke_preview(&url);
        }
    });

    let loading = Memo::new(move |_| item.with(Option::is_none) || categories.with(Option::is_none));
    let server_url = ctx.api().config().server_url.clone();
    let stored_image = Memo::new(move |_| item.get().flatten().and_then(|i| i.image_url(&server_url)));

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

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let update = form.get();
        if update.category_id.is_none() {
            ctx.error("Please select or create a category");
            return;
        }
        set_submitting.set(true);
        let api = ctx.api();
        spawn_local(async move {
            match api.items().update(id, &update).await {
                Ok(response) => {
                    ctx.success(response.message_or("Item updated successfully"));
                    ctx.navigate(Route::ItemDetail(id));
                }
                Err(err) => ctx.report(&err, "Failed to update item"),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <Show when=move || !loading.get() fallback=|| view! { <Loading text="Loading item data..." /> }>
            <Show
                when=move || item.with(|i| matches!(i, Some(Some(_))))
                fallback=|| view! {
                    <div class="page empty-state">
                        <h2>"Item not found"</h2>
                        <NavLink to=Route::Inventory class="btn btn-secondary">"Back to inventory"</NavLink>
                    </div>
                }
            >
                <div class="page">
                    <NavLink to=Route::ItemDetail(id) class="back-link">"← Back to item"</NavLink>
                    <h1>"Edit Item"</h1>
                    <form class="form card" on:submit=on_submit>
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
                        <select
                            id="item-category"
                            prop:value=move || form.with(|f| f.category_id.map(|c| c.to_string()).unwrap_or_default())
                            on:change=move |ev| form.update(|f| f.category_id = event_target_value(&ev).parse().ok())
                        >
                            <option value="">"Select a category"</option>
                            <For
                                each=move || loaded(categories)
                                key=|category| category.id
                                children=|category| view! { <option value=category.id.to_string()>{category.name}</option> }
                            />
                        </select>

                        <label for="item-status">"Status"</label>
                        <select
                            id="item-status"
                            prop:value=move || form.with(|f| f.status.to_string())
                            on:change=move |ev| form.update(|f| f.status = ItemStatus::from(event_target_value(&ev)))
                        >
                            {ItemStatus::CHOICES.iter().map(|status| view! { <option value=status.as_str().to_string()>{status.to_string()}</option> }).collect_view()}
                        </select>

                        <label for="item-image">"Image"</label>
                        {move || preview.get().or_else(|| stored_image.get()).map(|src| view! { <img class="image-preview" src=src alt="Item image" /> })}
                        <input id="item-image" type="file" accept="image/jpeg,image/png,image/jpg,image/gif" on:change=on_image />

                        <div class="form-actions">
                            <NavLink to=Route::ItemDetail(id) class="btn btn-secondary">"Cancel"</NavLink>
                            <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                                {move || if submitting.get() { "Saving..." } else { "Save Changes" }}
                            </button>
                        </div>
                    </form>
                </div>
            </Show>
        </Show>
    }
}
