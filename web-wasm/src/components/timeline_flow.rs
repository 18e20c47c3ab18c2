//! タイムラインのカード連鎖コンポーネント
//!
//! - カードはドラッグで自由に移動できる（並び順は変わらない）
//! - 背景ドラッグでパン、ホイールでカーソル位置を中心にズーム
//! - 入力が変わると配置をリセットして全体表示に合わせる

use leptos::html;
use leptos::prelude::*;
use timeline_common::chain::{NODE_HEIGHT, NODE_WIDTH};
use timeline_common::viewport::ZOOM_STEP;
use timeline_common::{Chain, Point, Record, Size, Viewport};

/// 背景グリッドの間隔
const GRID_GAP: f32 = 16.0;

/// ドラッグ中の対象
#[derive(Debug, Clone, Copy, PartialEq)]
enum DragState {
    Node { id: usize, last: Point },
    Pan { last: Point },
}

/// リンク経路をSVGパスに変換
pub fn route_to_svg_path(points: &[Point]) -> String {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{} {} {}", if i == 0 { "M" } else { "L" }, p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

/// 背景グリッドのスタイル（パン・ズームに追従）
fn grid_style(viewport: &Viewport) -> String {
    let gap = GRID_GAP * viewport.zoom();
    let pan = viewport.pan();
    format!(
        "background-size: {gap}px {gap}px; background-position: {}px {}px;",
        pan.dx, pan.dy
    )
}

fn client_point(ev: &web_sys::MouseEvent) -> Point {
    Point::new(ev.client_x() as f32, ev.client_y() as f32)
}

#[component]
pub fn TimelineFlow(#[prop(into)] items: Signal<Vec<Record>>) -> impl IntoView {
    let chain = RwSignal::new(Chain::build(&items.get_untracked()));
    let viewport = RwSignal::new(Viewport::default());
    let drag = RwSignal::new(None::<DragState>);
    let canvas_ref = NodeRef::<html::Div>::new();

    let fit_view = move || {
        if let Some(el) = canvas_ref.get_untracked() {
            let size = Size::new(el.client_width() as f32, el.client_height() as f32);
            viewport.update(|vp| vp.set_screen(size));
        }
        if let Some(bounds) = chain.with_untracked(Chain::bounds) {
            viewport.update(|vp| vp.fit(bounds));
        }
    };

    // 入力が変わるたびに作り直して全体表示
    Effect::new(move |previous: Option<()>| {
        let current = items.get();
        if previous.is_some() {
            chain.update(|c| c.rebuild(&current));
        }
        fit_view();
    });

    let canvas_origin = move || {
        canvas_ref
            .get_untracked()
            .map(|el| {
                let rect = el.get_bounding_client_rect();
                Point::new(rect.left() as f32, rect.top() as f32)
            })
            .unwrap_or_default()
    };

    let on_pointer_move = move |ev: web_sys::PointerEvent| {
        let Some(state) = drag.get_untracked() else {
            return;
        };
        let now = client_point(&ev);
        match state {
            DragState::Node { id, last } => {
                let delta = viewport.with_untracked(|vp| vp.screen_delta_to_world(now - last));
                chain.update(|c| {
                    c.move_node(id, delta);
                });
                drag.set(Some(DragState::Node { id, last: now }));
            }
            DragState::Pan { last } => {
                viewport.update(|vp| vp.pan_by(now - last));
                drag.set(Some(DragState::Pan { last: now }));
            }
        }
    };

    let on_wheel = move |ev: web_sys::WheelEvent| {
        ev.prevent_default();
        let origin = canvas_origin();
        let anchor = Point::new(
            ev.client_x() as f32 - origin.x,
            ev.client_y() as f32 - origin.y,
        );
        let factor = if ev.delta_y() < 0.0 { ZOOM_STEP } else { 1.0 / ZOOM_STEP };
        viewport.update(|vp| vp.zoom_at(factor, anchor));
    };

    view! {
        <div class="flow-container">
            <div
                class="flow-canvas"
                class:panning=move || matches!(drag.get(), Some(DragState::Pan { .. }))
                node_ref=canvas_ref
                style=move || viewport.with(grid_style)
                on:pointerdown=move |ev| {
                    drag.set(Some(DragState::Pan { last: client_point(&ev) }));
                }
                on:pointermove=on_pointer_move
                on:pointerup=move |_| drag.set(None)
                on:pointerleave=move |_| drag.set(None)
                on:wheel=on_wheel
            >
                <div class="flow-viewport" style=move || {
                    viewport.with(|vp| format!("transform: {};", vp.css_transform()))
                }>
                    <svg class="flow-edges" width="1" height="1">
                        <defs>
                            <marker
                                id="arrow-closed"
                                viewBox="0 0 10 10"
                                refX="10"
                                refY="5"
                                markerWidth="20"
                                markerHeight="20"
                                markerUnits="userSpaceOnUse"
                                orient="auto"
                            >
                                <path d="M 0 0 L 10 5 L 0 10 z" fill="#888"></path>
                            </marker>
                        </defs>
                        {move || {
                            chain.with(|c| {
                                c.edges()
                                    .iter()
                                    .filter_map(|edge| {
                                        c.edge_route(edge)
                                            .map(|route| (edge.id.clone(), route_to_svg_path(&route)))
                                    })
                                    .collect::<Vec<_>>()
                            })
                            .into_iter()
                            .map(|(id, d)| {
                                view! {
                                    <path
                                        class="flow-edge"
                                        data-id=id
                                        d=d
                                        marker-end="url(#arrow-closed)"
                                    ></path>
                                }
                            })
                            .collect::<Vec<_>>()
                        }}
                    </svg>
                    <For
                        each=move || {
                            chain.with(|c| {
                                let generation = c.generation();
                                (0..c.len()).map(|id| (generation, id)).collect::<Vec<_>>()
                            })
                        }
                        key=|key| *key
                        children=move |(_, id)| view! { <ImageCard chain=chain drag=drag id=id /> }
                    />
                </div>
            </div>
            <div class="flow-controls">
                <button title="zoom in" on:click=move |_| viewport.update(Viewport::zoom_in)>"+"</button>
                <button title="zoom out" on:click=move |_| viewport.update(Viewport::zoom_out)>"−"</button>
                <button title="fit view" on:click=move |_| fit_view()>"⤢"</button>
            </div>
        </div>
    }
}

#[component]
fn ImageCard(chain: RwSignal<Chain>, drag: RwSignal<Option<DragState>>, id: usize) -> impl IntoView {
    let record = chain
        .with_untracked(|c| c.node(id).map(|n| n.record.clone()))
        .unwrap_or_default();

    let style = move || {
        chain
            .with(|c| c.node(id).map(|n| n.position))
            .map(|p| {
                format!(
                    "transform: translate({}px, {}px); width: {}px; min-height: {}px;",
                    p.x, p.y, NODE_WIDTH, NODE_HEIGHT
                )
            })
            .unwrap_or_default()
    };

    let is_dragging = move || matches!(drag.get(), Some(DragState::Node { id: dragged, .. }) if dragged == id);

    let image = if record.image_url.is_empty() {
        view! { <div class="card-image card-image-placeholder">"No image"</div> }.into_any()
    } else {
        view! {
            <img
                class="card-image"
                src=record.image_url.clone()
                alt=record.title.clone()
                draggable="false"
            />
        }
        .into_any()
    };

    view! {
        <div
            class="flow-node"
            class:dragging=is_dragging
            style=style
            on:pointerdown=move |ev| {
                ev.stop_propagation();
                ev.prevent_default();
                drag.set(Some(DragState::Node { id, last: client_point(&ev) }));
            }
        >
            <div class="card-title">{record.title.clone()}</div>
            {image}
            <div class="card-date">{record.date.clone()}</div>
        </div>
    }
}
