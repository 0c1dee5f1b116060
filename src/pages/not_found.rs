//! Not Found Page

use leptos::prelude::*;

use crate::components::NavLink;
use crate::routes::Route;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="page empty-state">
            <h1>"Page not found"</h1>
            <p>"The page you are looking for does not exist."</p>
            <NavLink to=Route::Dashboard class="btn btn-primary">"Go to dashboard"</NavLink>
        </div>
    }
}
