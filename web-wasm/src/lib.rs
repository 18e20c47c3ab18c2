//! Trait-Theme Timeline Web App (Leptos + WASM)

mod api;
mod app;
mod components;

pub use app::background_style;
pub use components::selectors::take_combo_choice;
pub use components::timeline_flow::route_to_svg_path;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    leptos::mount::mount_to_body(app::App);
}
