//! ビューポート（パン・ズーム）の計算
//!
//! スクリーン座標 = ワールド座標 × zoom + pan。
//! ズームは常に [`MIN_ZOOM`, `MAX_ZOOM`] に収める。

use crate::geometry::{Point, Rect, Size, Vector};

pub const MIN_ZOOM: f32 = 0.5;
pub const MAX_ZOOM: f32 = 2.0;

/// ズームボタン1回分の倍率
pub const ZOOM_STEP: f32 = 1.2;

/// 全体表示時の余白（各辺10%）
const FIT_MARGIN: f32 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pan: Vector,
    zoom: f32,
    /// 表示領域の大きさ（スクリーン座標）
    screen: Size,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            pan: Vector::default(),
            zoom: 1.0,
            screen: Size::new(800.0, 600.0),
        }
    }
}

pub fn clamp_zoom(zoom: f32) -> f32 {
    if zoom.is_nan() {
        return 1.0;
    }
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

impl Viewport {
    pub fn new(screen: Size) -> Self {
        Self {
            screen,
            ..Self::default()
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn pan(&self) -> Vector {
        self.pan
    }

    pub fn screen(&self) -> Size {
        self.screen
    }

    /// 表示領域の大きさを更新（0以下は無視）
    pub fn set_screen(&mut self, screen: Size) {
        if screen.is_positive() {
            self.screen = screen;
        }
    }

    pub fn world_to_screen(&self, p: Point) -> Point {
        Point::new(p.x * self.zoom + self.pan.dx, p.y * self.zoom + self.pan.dy)
    }

    pub fn screen_to_world(&self, p: Point) -> Point {
        Point::new((p.x - self.pan.dx) / self.zoom, (p.y - self.pan.dy) / self.zoom)
    }

    /// スクリーン上の移動量をワールド上の移動量に変換
    pub fn screen_delta_to_world(&self, delta: Vector) -> Vector {
        delta.scale(1.0 / self.zoom)
    }

    /// スクリーン座標でパン
    pub fn pan_by(&mut self, delta: Vector) {
        self.pan = Vector::new(self.pan.dx + delta.dx, self.pan.dy + delta.dy);
    }

    /// アンカー位置のワールド座標を固定したままズーム
    pub fn zoom_at(&mut self, factor: f32, anchor: Point) {
        let world = self.screen_to_world(anchor);
        self.zoom = clamp_zoom(self.zoom * factor);
        self.pan = Vector::new(anchor.x - world.x * self.zoom, anchor.y - world.y * self.zoom);
    }

    fn screen_center(&self) -> Point {
        Point::new(self.screen.width / 2.0, self.screen.height / 2.0)
    }

    pub fn zoom_in(&mut self) {
        self.zoom_at(ZOOM_STEP, self.screen_center());
    }

    pub fn zoom_out(&mut self) {
        self.zoom_at(1.0 / ZOOM_STEP, self.screen_center());
    }

    /// 内容全体が収まるようにズームと位置を合わせる
    pub fn fit(&mut self, bounds: Rect) {
        let zoom = if bounds.width() > 0.0 && bounds.height() > 0.0 {
            let zx = self.screen.width / bounds.width();
            let zy = self.screen.height / bounds.height();
            zx.min(zy) * FIT_MARGIN
        } else {
            1.0
        };
        self.zoom = clamp_zoom(zoom);

        let content = bounds.center();
        let center = self.screen_center();
        self.pan = Vector::new(center.x - content.x * self.zoom, center.y - content.y * self.zoom);
    }

    /// CSS transform 文字列（原点は左上）
    pub fn css_transform(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.pan.dx, self.pan.dy, self.zoom
        )
    }
}
