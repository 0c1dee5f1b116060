//! Categories Page
//!
//! Category list. Admins create, edit inline and delete.

use leptos::prelude::*;
use leptos::task::spawn_local;

use borrowdesk_api::services::CategoryForm;
use borrowdesk_api::Category;

use crate::components::{ConfirmButton, Loading};
use crate::context::AppContext;
use crate::loader::{loaded, Loader};

#[component]
pub fn CategoriesPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let categories = RwSignal::new(None::<Vec<Category>>);
    let draft = RwSignal::new(CategoryForm::default());
    // (id, form) of the row being edited
    let editing = RwSignal::new(None::<(u32, CategoryForm)>);
    let (saving, set_saving) = signal(false);

    let loader = Loader::new(ctx, "Failed to load categories");
    let reload = move || {
        let api = ctx.api();
        loader.refresh(categories, async move { api.categories().admin_list().await });
    };
    {
        let api = ctx.api();
        loader.fetch(categories, async move { api.categories().admin_list().await });
    }

    let on_create = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = draft.get();
        if form.name.trim().is_empty() {
            ctx.error("Category name is required");
            return;
        }
        set_saving.set(true);
        let api = ctx.api();
        spawn_local(async move {
            match api.categories().create(&form).await {
                Ok(response) => {
                    ctx.success(response.message_or("Category added successfully"));
                    draft.set(CategoryForm::default());
                    reload();
                }
                Err(err) => ctx.report(&err, "Failed to add category"),
            }
            set_saving.set(false);
        });
    };

    let save_edit = move || {
        let Some((id, form)) = editing.get() else {
            return;
        };
        if form.name.trim().is_empty() {
            ctx.error("Category name is required");
            return;
        }
        let api = ctx.api();
        spawn_local(async move {
            match api.categories().update(id, &form).await {
                Ok(response) => {
                    ctx.success(response.message_or("Category updated successfully"));
                    editing.set(None);
                    reload();
                }
                Err(err) => ctx.report(&err, "Failed to update category"),
            }
        });
    };

    let delete = move |id: u32| {
        let api = ctx.api();
        spawn_local(async move {
            match api.categories().delete(id).await {
                Ok(_) => {
                    categories.update(|list| {
                        if let Some(list) = list {
                            list.retain(|c| c.id != id);
                        }
                    });
                    ctx.success("Category deleted successfully");
                }
                Err(err) => ctx.report(&err, "Failed to delete category"),
            }
        });
    };

    view! {
        <Show when=move || categories.with(Option::is_some) fallback=|| view! { <Loading text="Loading categories..." /> }>
            <div class="page">
                <div class="page-header">
                    <h1>"Categories"</h1>
                </div>

                <Show when=move || ctx.is_admin()>
                    <form class="form card inline-form" on:submit=on_create>
                        <input
                            type="text"
                            placeholder="Category name"
                            prop:value=move || draft.with(|d| d.name.clone())
                            on:input=move |ev| draft.update(|d| d.name = event_target_value(&ev))
                        />
                        <input
                            type="text"
                            placeholder="Description (optional)"
                            prop:value=move || draft.with(|d| d.description.clone())
                            on:input=move |ev| draft.update(|d| d.description = event_target_value(&ev))
                        />
                        <button type="submit" class="btn btn-primary" disabled=move || saving.get()>"Add Category"</button>
                    </form>
                </Show>

                <Show
                    when=move || categories.with(|list| list.as_ref().is_some_and(|l| !l.is_empty()))
                    fallback=|| view! { <p class="empty">"No categories yet"</p> }
                >
                    <table class="table">
                        <thead>
                            <tr>
                                <th>"Name"</th>
                                <th>"Description"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || loaded(categories)
                                key=|category| (category.id, category.name.clone(), category.description.clone())
                                children=move |category| {
                                    let id = category.id;
                                    let is_editing = move || editing.with(|e| e.as_ref().is_some_and(|(edit_id, _)| *edit_id == id));
                                    let start_edit = {
                                        let category = category.clone();
                                        move |_| editing.set(Some((id, CategoryForm::from_category(&category))))
                                    };
                                    view! {
                                        <tr>
                                            <Show
                                                when=is_editing
                                                fallback=move || view! {
                                                    <td>{category.name.clone()}</td>
                                                    <td class="muted">{category.description.clone().unwrap_or_default()}</td>
                                                }
                                            >
                                                <td>
                                                    <input
                                                        type="text"
                                                        prop:value=move || editing.with(|e| e.as_ref().map(|(_, f)| f.name.clone()).unwrap_or_default())
                                                        on:input=move |ev| editing.update(|e| if let Some((_, f)) = e { f.name = event_target_value(&ev) })
                                                    />
                                                </td>
                                                <td>
                                                    <input
                                                        type="text"
                                                        prop:value=move || editing.with(|e| e.as_ref().map(|(_, f)| f.description.clone()).unwrap_or_default())
                                                        on:input=move |ev| editing.update(|e| if let Some((_, f)) = e { f.description = event_target_value(&ev) })
                                                    />
                                                </td>
                                            </Show>
                                            <td class="actions">
                                                <Show when=move || ctx.is_admin()>
                                                    <Show
                                                        when=is_editing
                                                        fallback={
                                                            let start_edit = start_edit.clone();
                                                            move || view! {
                                                            <button class="btn btn-secondary btn-sm" on:click=start_edit.clone()>"Edit"</button>
                                                            <ConfirmButton
                                                                label="Delete"
                                                                question="Delete this category? All associated items will be affected."
                                                                on_confirm=move |_| delete(id)
                                                            />
                                                            }
                                                        }
                                                    >
                                                        <button class="btn btn-primary btn-sm" on:click=move |_| save_edit()>"Save"</button>
                                                        <button class="btn btn-secondary btn-sm" on:click=move |_| editing.set(None)>"Cancel"</button>
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
