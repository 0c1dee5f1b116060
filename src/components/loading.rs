//! Loading Indicator

use leptos::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Size {
    Small,
    #[default]
    Medium,
}

/// Spinner with a caption
#[component]
pub fn Loading(
    #[prop(into, default = "Loading...".to_string())] text: String,
    #[prop(optional)] size: Size,
    /// Cover the whole viewport
    #[prop(optional)] full_screen: bool,
) -> impl IntoView {
    let spinner_class = match size {
        Size::Small => "spinner spinner-sm",
        Size::Medium => "spinner",
    };
    let content = view! {
        <div class="loading">
            <div class=spinner_class></div>
            <p class="loading-text">{text}</p>
        </div>
    };

    if full_screen {
        view! { <div class="loading-overlay">{content}</div> }.into_any()
    } else {
        content.into_any()
    }
}
