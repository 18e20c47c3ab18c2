//! trait / theme / 組み合わせのセレクタ

use leptos::prelude::*;
use timeline_common::Combination;

/// 組み合わせセレクタの選択を読み取り、表示をプレースホルダーに戻す
pub fn take_combo_choice(
    select: &web_sys::HtmlSelectElement,
    combinations: &[Combination],
) -> Option<Combination> {
    let value = select.value();
    select.set_value("");
    let index = value.parse::<usize>().ok()?;
    combinations.get(index).cloned()
}

#[component]
pub fn Selectors(
    trait_options: Memo<Vec<String>>,
    theme_options: Memo<Vec<String>>,
    combinations: Memo<Vec<Combination>>,
    selected_trait: ReadSignal<String>,
    set_selected_trait: WriteSignal<String>,
    selected_theme: ReadSignal<String>,
    set_selected_theme: WriteSignal<String>,
) -> impl IntoView {
    view! {
        <section class="controls">
            <div class="selectors">
                <label>
                    "Trait"
                    <select on:change=move |ev| set_selected_trait.set(event_target_value(&ev))>
                        <option value="" prop:selected=move || selected_trait.get().is_empty()>
                            "-- select trait --"
                        </option>
                        <For
                            each=move || trait_options.get()
                            key=|name| name.clone()
                            children=move |name| {
                                let current = name.clone();
                                let value = name.clone();
                                view! {
                                    <option
                                        value=value
                                        prop:selected=move || selected_trait.get() == current
                                    >
                                        {name}
                                    </option>
                                }
                            }
                        />
                    </select>
                </label>

                <label>
                    "Theme"
                    <select on:change=move |ev| set_selected_theme.set(event_target_value(&ev))>
                        <option value="" prop:selected=move || selected_theme.get().is_empty()>
                            "-- select theme --"
                        </option>
                        <For
                            each=move || theme_options.get()
                            key=|name| name.clone()
                            children=move |name| {
                                let current = name.clone();
                                let value = name.clone();
                                view! {
                                    <option
                                        value=value
                                        prop:selected=move || selected_theme.get() == current
                                    >
                                        {name}
                                    </option>
                                }
                            }
                        />
                    </select>
                </label>

                <label class="combo-picker">
                    "Or choose a combo"
                    <select on:change=move |ev| {
                        let select = event_target::<web_sys::HtmlSelectElement>(&ev);
                        let Some(combo) = combinations.with_untracked(|c| take_combo_choice(&select, c)) else {
                            return;
                        };
                        set_selected_trait.set(combo.trait_name);
                        set_selected_theme.set(combo.theme);
                    }>
                        <option value="">"-- choose combo --"</option>
                        {move || {
                            combinations
                                .get()
                                .into_iter()
                                .enumerate()
                                .map(|(index, combo)| {
                                    view! { <option value=index.to_string()>{combo.label()}</option> }
                                })
                                .collect::<Vec<_>>()
                        }}
                    </select>
                </label>
            </div>
        </section>
    }
}
