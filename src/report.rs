//! 表示列の出力整形

use serde::Serialize;
use timeline_common::{Combination, Record, Selection, TimelineView};

/// 空の表示列のときの案内文
pub const EMPTY_MESSAGE: &str = "No items to display. Make sure public/trait_theme_timeline.csv exists \
and has columns like trait, theme, date, image_url.";

/// `show --format json` の出力
#[derive(Debug, Serialize)]
pub struct ShowReport<'a> {
    pub selection: &'a Selection,
    pub items: &'a [Record],
    pub background_image: Option<&'a str>,
}

impl<'a> ShowReport<'a> {
    pub fn from_view(view: &'a TimelineView) -> Self {
        Self {
            selection: view.selection(),
            items: view.items(),
            background_image: view.background_image(),
        }
    }
}

/// カード1枚分のラベル（"title (date)"）
pub fn card_label(record: &Record) -> String {
    let title = if record.title.is_empty() { "(untitled)" } else { record.title.as_str() };
    if record.date.is_empty() {
        title.to_string()
    } else {
        format!("{} ({})", title, record.date)
    }
}

/// 表示列を矢印でつないだ1行
pub fn format_chain(items: &[Record]) -> String {
    items.iter().map(card_label).collect::<Vec<_>>().join(" → ")
}

/// 組み合わせ一覧（番号付き）
pub fn format_combinations(combos: &[Combination]) -> String {
    combos
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{:>3}: {}", i, c.label()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `show` のテキスト出力
pub fn format_show(view: &TimelineView) -> String {
    let selection = view.selection();
    let mut lines = vec![format!("{} — {}", selection.trait_name, selection.theme)];

    if view.items().is_empty() {
        lines.push(EMPTY_MESSAGE.to_string());
        return lines.join("\n");
    }

    lines.push(format!("{}件", view.items().len()));
    lines.push(format_chain(view.items()));
    if let Some(url) = view.background_image() {
        lines.push(format!("背景画像: {}", url));
    }
    lines.join("\n")
}
