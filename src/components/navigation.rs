//! Navigation Bar
//!
//! Shown only while a user is signed in.

use leptos::prelude::*;

use crate::components::{NavLink, NotificationBell};
use crate::context::AppContext;
use crate::routes::Route;

#[component]
pub fn Navigation() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    view! {
        <Show when=move || ctx.is_signed_in()>
            <nav class="navbar">
                <div class="navbar-links">
                    <NavLink to=Route::Dashboard class="navbar-brand">"Borrowdesk"</NavLink>
                    <NavLink to=Route::Inventory class="nav-link">
                        {move || if ctx.is_admin() { "View Inventory" } else { "Borrow Item" }}
                    </NavLink>
                    <NavLink to=Route::Transactions class="nav-link">"Transactions"</NavLink>
                    <Show when=move || ctx.is_admin()>
                        <NavLink to=Route::Categories class="nav-link">"Categories"</NavLink>
                        <NavLink to=Route::Users class="nav-link">"Users"</NavLink>
                    </Show>
                    <NavLink to=Route::About class="nav-link">"About Us"</NavLink>
                    <NavLink to=Route::Contact class="nav-link">"Contact"</NavLink>
                </div>
                <div class="navbar-actions">
                    <NotificationBell />
                    <span class="navbar-user">
                        {move || ctx.user().map(|user| user.name).unwrap_or_default()}
                    </span>
                    <button class="btn btn-primary" on:click=move |_| ctx.sign_out()>"Logout"</button>
                </div>
            </nav>
        </Show>
    }
}
