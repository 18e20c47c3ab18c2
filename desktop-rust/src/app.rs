use std::path::{Path, PathBuf};

use anyhow::Result;
use eframe::egui::{self, Color32, Pos2, RichText, Sense, Stroke};
use eframe::egui::{FontData, FontDefinitions, FontFamily};

use crate::io::{load_records, resolve_image_uri};
use crate::model::{AppState, DragTarget};
use timeline_common::chain::ChainNode;
use timeline_common::viewport::ZOOM_STEP;
use timeline_common::{Point, Size, Vector};

const EMPTY_MESSAGE: &str = "No items to display. Make sure public/trait_theme_timeline.csv exists and has columns like trait, theme, date, image_url.";

const CARD_FILL: Color32 = Color32::from_rgb(24, 28, 40);
const CARD_STROKE: Color32 = Color32::from_gray(70);
const CARD_ACTIVE: Color32 = Color32::from_rgb(246, 196, 69);
const EDGE_COLOR: Color32 = Color32::from_gray(136);
const GRID_COLOR: Color32 = Color32::from_rgba_premultiplied(28, 28, 28, 28);
/// 背景画像に重ねる暗幕（0.78）
const OVERLAY: Color32 = Color32::from_black_alpha(199);
const GRID_GAP: f32 = 16.0;
const ARROW_SIZE: f32 = 10.0;

pub struct DesktopApp {
    state: AppState,
    status: String,
    /// 先読み済みの背景画像URI
    prefetched_background: Option<String>,
}

impl DesktopApp {
    pub fn new(initial: Option<PathBuf>) -> Self {
        let mut app = Self {
            state: AppState::default(),
            status: String::new(),
            prefetched_background: None,
        };
        if let Some(path) = initial {
            app.open_path(&path);
        }
        app
    }

    fn open_csv(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV", &["csv", "tsv", "txt"])
            .pick_file()
        {
            self.open_path(&path);
        }
    }

    fn open_path(&mut self, path: &Path) {
        match self.load_from_path(path) {
            Ok(count) => self.status = format!("Loaded {} ({count} records)", path.display()),
            Err(err) => {
                tracing::error!(path = %path.display(), error = %err, "load failed");
                self.status = format!("Load failed: {err:#}");
                self.state.set_records(Vec::new(), Some(path));
            }
        }
    }

    fn reload_csv(&mut self) {
        let Some(path) = self.state.source_path.clone() else {
            self.status = "No source file loaded".to_string();
            return;
        };
        match self.load_from_path(&path) {
            Ok(count) => self.status = format!("Reloaded {} ({count} records)", path.display()),
            Err(err) => {
                tracing::error!(path = %path.display(), error = %err, "reload failed");
                self.status = format!("Reload failed: {err:#}");
            }
        }
    }

    fn load_from_path(&mut self, path: &Path) -> Result<usize> {
        let records = load_records(path)?;
        let count = records.len();
        self.state.set_records(records, Some(path));
        self.prefetched_background = None;
        Ok(count)
    }

    fn image_uri(&self, image_url: &str) -> String {
        resolve_image_uri(image_url, self.state.source_dir())
    }

    /// 背景画像が変わったら先に読み込みを始めておく
    fn prefetch_background(&mut self, ctx: &egui::Context) {
        let uri = self
            .state
            .view
            .background_image()
            .map(|url| self.image_uri(url));
        if uri == self.prefetched_background {
            return;
        }
        if let Some(uri) = &uri {
            if let Err(err) = ctx.try_load_texture(
                uri,
                egui::TextureOptions::default(),
                egui::load::SizeHint::default(),
            ) {
                tracing::warn!(uri = %uri, error = %err, "background prefetch failed");
            }
        }
        self.prefetched_background = uri;
    }

    fn render_selectors(&mut self, ui: &mut egui::Ui) {
        let view = &self.state.view;
        let mut next_trait = None;
        let mut next_theme = None;
        let mut next_combo = None;

        ui.horizontal_wrapped(|ui| {
            ui.label("Trait");
            let selected = &view.selection().trait_name;
            egui::ComboBox::from_id_source("trait")
                .width(180.0)
                .selected_text(if selected.is_empty() { "-- select trait --" } else { selected.as_str() })
                .show_ui(ui, |ui| {
                    if ui.selectable_label(selected.is_empty(), "-- select trait --").clicked() {
                        next_trait = Some(String::new());
                    }
                    for name in view.trait_options() {
                        if ui.selectable_label(selected == name, name.as_str()).clicked() {
                            next_trait = Some(name.clone());
                        }
                    }
                });

            ui.label("Theme");
            let selected = &view.selection().theme;
            egui::ComboBox::from_id_source("theme")
                .width(180.0)
                .selected_text(if selected.is_empty() { "-- select theme --" } else { selected.as_str() })
                .show_ui(ui, |ui| {
                    if ui.selectable_label(selected.is_empty(), "-- select theme --").clicked() {
                        next_theme = Some(String::new());
                    }
                    for name in view.theme_options() {
                        if ui.selectable_label(selected == name, name.as_str()).clicked() {
                            next_theme = Some(name.clone());
                        }
                    }
                });

            ui.label("Or choose a combo");
            egui::ComboBox::from_id_source("combo")
                .width(240.0)
                .selected_text("-- choose combo --")
                .show_ui(ui, |ui| {
                    for (index, combo) in view.combinations().iter().enumerate() {
                        if ui.selectable_label(false, combo.label()).clicked() {
                            next_combo = Some(index);
                        }
                    }
                });
        });

        if let Some(name) = next_trait {
            self.state.select_trait(name);
        }
        if let Some(name) = next_theme {
            self.state.select_theme(name);
        }
        if let Some(index) = next_combo {
            self.state.select_combination(index);
        }
    }

    fn render_background(&self, ui: &egui::Ui, rect: egui::Rect) {
        let Some(url) = self.state.view.background_image() else {
            return;
        };
        egui::Image::new(self.image_uri(url))
            .show_loading_spinner(false)
            .paint_at(ui, rect);
        ui.painter().rect_filled(rect, 0.0, OVERLAY);
    }

    fn render_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("+").on_hover_text("zoom in").clicked() {
                self.state.viewport.zoom_in();
            }
            if ui.button("−").on_hover_text("zoom out").clicked() {
                self.state.viewport.zoom_out();
            }
            if ui.button("Fit").on_hover_text("fit view").clicked() {
                self.state.needs_fit = true;
            }
            ui.label(
                RichText::new(format!("{:.0}%", self.state.viewport.zoom() * 100.0))
                    .color(Color32::from_gray(170)),
            );
        });
    }

    fn render_canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
        let rect = response.rect;
        let origin = rect.min;
        ui.set_clip_rect(rect);

        self.state
            .viewport
            .set_screen(Size::new(rect.width(), rect.height()));
        if self.state.needs_fit {
            if let Some(bounds) = self.state.chain.bounds() {
                self.state.viewport.fit(bounds);
            }
            self.state.needs_fit = false;
        }

        self.handle_input(ui, &response, origin);

        let viewport = self.state.viewport;
        let to_screen = |p: Point| to_pos(viewport.world_to_screen(p), origin);

        paint_grid(&painter, rect, viewport.pan(), viewport.zoom());

        for edge in self.state.chain.edges() {
            let Some(route) = self.state.chain.edge_route(edge) else {
                continue;
            };
            let points: Vec<Pos2> = route.iter().map(|p| to_screen(*p)).collect();
            let stroke = Stroke::new(2.0 * viewport.zoom(), EDGE_COLOR);
            painter.add(egui::Shape::dashed_line(
                &points,
                stroke,
                6.0 * viewport.zoom(),
                4.0 * viewport.zoom(),
            ));
            paint_arrow_head(&painter, points[2], points[3], ARROW_SIZE * viewport.zoom());
        }

        let dragged = match self.state.drag {
            Some(DragTarget::Node(id)) => Some(id),
            _ => None,
        };
        for node in self.state.chain.nodes() {
            let card = egui::Rect::from_min_max(
                to_screen(node.rect().min),
                to_screen(node.rect().max),
            );
            if !card.intersects(rect) {
                continue;
            }
            self.paint_card(ui, &painter, node, card, dragged == Some(node.id), viewport.zoom());
        }
    }

    fn handle_input(&mut self, ui: &egui::Ui, response: &egui::Response, origin: Pos2) {
        if response.drag_started() {
            self.state.drag = response
                .interact_pointer_pos()
                .map(|pos| {
                    let world = self.state.viewport.screen_to_world(to_point(pos, origin));
                    match self.state.chain.node_at(world) {
                        Some(id) => DragTarget::Node(id),
                        None => DragTarget::Pan,
                    }
                });
        }

        if response.dragged() {
            let delta = response.drag_delta();
            let delta = Vector::new(delta.x, delta.y);
            match self.state.drag {
                Some(DragTarget::Node(id)) => {
                    let world = self.state.viewport.screen_delta_to_world(delta);
                    self.state.chain.move_node(id, world);
                }
                Some(DragTarget::Pan) => self.state.viewport.pan_by(delta),
                None => {}
            }
        }

        if response.drag_stopped() {
            self.state.drag = None;
        }

        if let Some(pos) = response.hover_pos() {
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                let factor = if scroll > 0.0 { ZOOM_STEP } else { 1.0 / ZOOM_STEP };
                self.state.viewport.zoom_at(factor, to_point(pos, origin));
            }
        }
    }

    fn paint_card(
        &self,
        ui: &egui::Ui,
        painter: &egui::Painter,
        node: &ChainNode,
        card: egui::Rect,
        active: bool,
        zoom: f32,
    ) {
        let rounding = 8.0 * zoom;
        let stroke = Stroke::new(1.0, if active { CARD_ACTIVE } else { CARD_STROKE });
        painter.rect_filled(card, rounding, CARD_FILL);
        painter.rect_stroke(card, rounding, stroke);

        let pad = 8.0 * zoom;
        let inner = card.shrink(pad);
        let title_font = egui::FontId::proportional(13.0 * zoom);
        let date_font = egui::FontId::proportional(11.0 * zoom);
        let title_height = 18.0 * zoom;
        let date_height = 16.0 * zoom;

        painter.text(
            inner.left_top(),
            egui::Align2::LEFT_TOP,
            &node.record.title,
            title_font,
            Color32::from_gray(230),
        );

        let image_rect = egui::Rect::from_min_max(
            Pos2::new(inner.left(), inner.top() + title_height),
            Pos2::new(inner.right(), inner.bottom() - date_height),
        );
        if node.has_image() {
            egui::Image::new(self.image_uri(&node.record.image_url))
                .rounding(4.0 * zoom)
                .paint_at(ui, image_rect);
        } else {
            painter.rect_filled(image_rect, 4.0 * zoom, Color32::from_gray(42));
            painter.text(
                image_rect.center(),
                egui::Align2::CENTER_CENTER,
                "No image",
                egui::FontId::proportional(11.0 * zoom),
                Color32::from_gray(120),
            );
        }

        painter.text(
            Pos2::new(inner.left(), inner.bottom()),
            egui::Align2::LEFT_BOTTOM,
            &node.record.date,
            date_font,
            Color32::from_gray(170),
        );
    }
}

fn to_pos(p: Point, origin: Pos2) -> Pos2 {
    Pos2::new(origin.x + p.x, origin.y + p.y)
}

fn to_point(pos: Pos2, origin: Pos2) -> Point {
    Point::new(pos.x - origin.x, pos.y - origin.y)
}

fn paint_grid(painter: &egui::Painter, rect: egui::Rect, pan: Vector, zoom: f32) {
    let gap = GRID_GAP * zoom;
    if gap < 4.0 {
        return;
    }
    let start_x = rect.left() + pan.dx.rem_euclid(gap);
    let start_y = rect.top() + pan.dy.rem_euclid(gap);
    let mut y = start_y;
    while y < rect.bottom() {
        let mut x = start_x;
        while x < rect.right() {
            painter.circle_filled(Pos2::new(x, y), 1.0, GRID_COLOR);
            x += gap;
        }
        y += gap;
    }
}

/// 終点に向いた塗りつぶし三角形
fn paint_arrow_head(painter: &egui::Painter, from: Pos2, tip: Pos2, size: f32) {
    let dir = (tip - from).normalized();
    if !dir.x.is_finite() || !dir.y.is_finite() {
        return;
    }
    let normal = egui::vec2(-dir.y, dir.x);
    let base = tip - dir * size;
    let points = vec![tip, base + normal * (size / 2.0), base - normal * (size / 2.0)];
    painter.add(egui::Shape::convex_polygon(points, EDGE_COLOR, Stroke::NONE));
}

pub fn configure_fonts(ctx: &egui::Context) {
    let mut fonts = FontDefinitions::default();
    let candidates = [
        r"C:\Windows\Fonts\meiryo.ttc",
        r"C:\Windows\Fonts\msgothic.ttc",
        "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
        "/usr/share/fonts/truetype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    ];

    for path in candidates {
        if let Ok(data) = std::fs::read(path) {
            fonts.font_data.insert("cjk_fallback".to_string(), FontData::from_owned(data));
            fonts
                .families
                .entry(FontFamily::Proportional)
                .or_default()
                .push("cjk_fallback".to_string());
            ctx.set_fonts(fonts);
            return;
        }
    }
}

impl eframe::App for DesktopApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.prefetch_background(ctx);

        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open CSV").clicked() {
                        self.open_csv();
                        ui.close_menu();
                    }
                    let reload_enabled = self.state.source_path.is_some();
                    if ui.add_enabled(reload_enabled, egui::Button::new("Reload")).clicked() {
                        self.reload_csv();
                        ui.close_menu();
                    }
                });
                ui.separator();
                ui.heading("Trait-Theme Timeline");
            });
            ui.add_space(4.0);
            self.render_selectors(ui);
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let items = self.state.view.items().len();
                ui.label(RichText::new(format!("{items} cards")).color(Color32::from_gray(170)));
                if !self.status.is_empty() {
                    ui.separator();
                    ui.label(RichText::new(&self.status).color(Color32::from_gray(170)));
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_background(ui, ui.max_rect());
            if self.state.chain.is_empty() {
                ui.centered_and_justified(|ui| {
                    ui.label(RichText::new(EMPTY_MESSAGE).color(Color32::from_gray(170)));
                });
                return;
            }
            self.render_controls(ui);
            self.render_canvas(ui);
        });
    }
}
