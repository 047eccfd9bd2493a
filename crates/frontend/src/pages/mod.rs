pub mod dashboard;
pub mod section;

use leptos::prelude::*;

#[component]
pub fn NotFound() -> impl IntoView {
    view! {
        <div class="page page--empty">
            <h1>"Page not found"</h1>
            <a href="/">"Back to dashboard"</a>
        </div>
    }
}
