//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header>
            <h1>"Trait-Theme Timeline"</h1>
        </header>
    }
}
