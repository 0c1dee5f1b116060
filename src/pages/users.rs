//! Users Page (admin)

use leptos::prelude::*;
use leptos::task::spawn_local;

use borrowdesk_api::User;

use crate::components::Loading;
use crate::context::AppContext;
use crate::filters::format_optional_date;
use crate::loader::{loaded, Loader};

#[component]
pub fn UsersPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let users = RwSignal::new(None::<Vec<User>>);
    let loader = Loader::new(ctx, "Failed to load users");
    {
        let api = ctx.api();
        loader.fetch(users, async move { api.users().list(&[]).await });
    }

    let toggle = move |id: u32| {
        let api = ctx.api();
        spawn_local(async move {
            match api.users().toggle_restriction(id).await {
                Ok(response) => {
                    users.update(|list| {
                        if let Some(user) = list.iter_mut().flatten().find(|u| u.id == id) {
                            user.is_restricted = !user.is_restricted;
                        }
                    });
                    ctx.success(response.message_or("User updated successfully"));
                }
                Err(err) => ctx.report(&err, "Failed to update user"),
            }
        });
    };

    view! {
        <Show when=move || users.with(Option::is_some) fallback=|| view! { <Loading text="Loading users..." /> }>
            <div class="page">
                <div class="page-header">
                    <h1>"Users"</h1>
                </div>
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Name"</th>
                            <th>"Email"</th>
                            <th>"Role"</th>
                            <th>"Joined"</th>
                            <th>"Access"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || loaded(users)
                            key=|user| (user.id, user.is_restricted)
                            children=move |user| {
                                let id = user.id;
                                let restricted = user.is_restricted;
                                view! {
                                    <tr>
                                        <td>{user.name.clone()}</td>
                                        <td>{user.email.clone()}</td>
                                        <td>{user.role.to_string()}</td>
                                        <td>{format_optional_date(user.created_at.as_deref())}</td>
                                        <td>
                                            <button
                                                class=if restricted { "btn btn-primary btn-sm" } else { "btn btn-danger btn-sm" }
                                                on:click=move |_| toggle(id)
                                            >
                                                {if restricted { "Unrestrict" } else { "Restrict" }}
                                            </button>
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </div>
        </Show>
    }
}
