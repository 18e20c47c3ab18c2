//! メインアプリケーションコンポーネント

use leptos::prelude::*;
use timeline_common::{
    background_image, combinations, filter_sorted, load_or_empty, theme_options, trait_options,
    Record, Selection, DEFAULT_DATA_PATH,
};

use crate::api::dataset::fetch_records;
use crate::api::prefetch::prefetch_image;
use crate::components::{header::Header, selectors::Selectors, timeline_flow::TimelineFlow};

/// 背景画像の上に重ねる暗いグラデーション
const OVERLAY: &str = "linear-gradient(rgba(0,0,0,0.78), rgba(0,0,0,0.78))";

/// ルート要素の背景スタイル
pub fn background_style(image_url: Option<&str>) -> String {
    match image_url {
        Some(url) => format!(
            "background-image: {OVERLAY}, url(\"{}\"); background-size: cover; background-position: center;",
            url.replace('"', "%22")
        ),
        None => String::new(),
    }
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let (records, set_records) = signal(Vec::<Record>::new());
    let (selected_trait, set_selected_trait) = signal(String::new());
    let (selected_theme, set_selected_theme) = signal(String::new());

    // マウント時に一度だけ読み込む
    wasm_bindgen_futures::spawn_local(async move {
        let loaded = load_or_empty(fetch_records(DEFAULT_DATA_PATH).await);
        tracing::info!(count = loaded.len(), "records loaded");
        let initial = Selection::initial(&loaded);
        set_selected_trait.set(initial.trait_name);
        set_selected_theme.set(initial.theme);
        set_records.set(loaded);
    });

    let combos = Memo::new(move |_| records.with(|r| combinations(r)));
    let traits = Memo::new(move |_| records.with(|r| trait_options(r)));
    let themes = Memo::new(move |_| {
        records.with(|r| selected_trait.with(|t| theme_options(r, t)))
    });
    let items = Memo::new(move |_| {
        let selection = Selection::new(selected_trait.get(), selected_theme.get());
        records.with(|r| filter_sorted(r, &selection))
    });
    let background = Memo::new(move |_| items.with(|i| background_image(i).map(str::to_owned)));

    // Memo が同値を弾くので URL ごとに一回
    Effect::new(move |_| {
        if let Some(url) = background.get() {
            prefetch_image(&url);
        }
    });

    view! {
        <div
            class="app"
            class:with-background=move || background.with(Option::is_some)
            style=move || background.with(|bg| background_style(bg.as_deref()))
        >
            <div class="container">
                <Header />

                <Selectors
                    trait_options=traits
                    theme_options=themes
                    combinations=combos
                    selected_trait=selected_trait
                    set_selected_trait=set_selected_trait
                    selected_theme=selected_theme
                    set_selected_theme=set_selected_theme
                />

                <Show
                    when=move || items.with(|i| !i.is_empty())
                    fallback=|| view! {
                        <p class="empty-message">
                            "No items to display. Make sure "
                            <code>"public/trait_theme_timeline.csv"</code>
                            " exists and has columns like "
                            <code>"trait"</code>", "
                            <code>"theme"</code>", "
                            <code>"date"</code>", "
                            <code>"image_url"</code>"."
                        </p>
                    }
                >
                    <TimelineFlow items=items />
                </Show>
            </div>
        </div>
    }
}
