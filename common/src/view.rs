//! ビューの状態と遷移
//!
//! レコード全体と選択状態を持ち、選択を変えるたびに派生値を明示的に再計算する。
//!
//! ## 依存関係
//! - レコード → 組み合わせ一覧・traitの選択肢（読み込み時に1回）
//! - レコード + 選択trait → themeの選択肢
//! - レコード + 選択 → 表示列 → 背景画像

use crate::selector::{background_image, combinations, filter_sorted, theme_options, trait_options};
use crate::types::{Combination, Record, Selection};

#[derive(Debug, Clone, Default)]
pub struct TimelineView {
    records: Vec<Record>,
    combinations: Vec<Combination>,
    trait_options: Vec<String>,
    selection: Selection,
    theme_options: Vec<String>,
    items: Vec<Record>,
    background: Option<String>,
}

impl TimelineView {
    /// 読み込んだレコードからビューを作る（選択は先頭レコード）
    pub fn new(records: Vec<Record>) -> Self {
        let selection = Selection::initial(&records);
        let mut view = Self {
            combinations: combinations(&records),
            trait_options: trait_options(&records),
            records,
            selection,
            ..Default::default()
        };
        view.recompute();
        view
    }

    /// レコード全体を置き換える（選択も初期化）
    pub fn replace_records(&mut self, records: Vec<Record>) {
        *self = Self::new(records);
    }

    fn recompute(&mut self) {
        self.theme_options = theme_options(&self.records, &self.selection.trait_name);
        self.items = filter_sorted(&self.records, &self.selection);
        self.background = background_image(&self.items).map(str::to_string);
    }

    pub fn select(&mut self, selection: Selection) {
        self.selection = selection;
        self.recompute();
    }

    /// traitだけを変更（themeはそのまま）
    pub fn select_trait(&mut self, trait_name: impl Into<String>) {
        self.selection.trait_name = trait_name.into();
        self.recompute();
    }

    pub fn select_theme(&mut self, theme: impl Into<String>) {
        self.selection.theme = theme.into();
        self.recompute();
    }

    /// 組み合わせ一覧のインデックスで trait・theme を同時に設定
    ///
    /// 範囲外なら何もせず false。
    pub fn select_combination(&mut self, index: usize) -> bool {
        let Some(combo) = self.combinations.get(index) else {
            return false;
        };
        self.selection = Selection::from(combo);
        self.recompute();
        true
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn combinations(&self) -> &[Combination] {
        &self.combinations
    }

    pub fn trait_options(&self) -> &[String] {
        &self.trait_options
    }

    pub fn theme_options(&self) -> &[String] {
        &self.theme_options
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// 選択に一致する日付順のレコード
    pub fn items(&self) -> &[Record] {
        &self.items
    }

    pub fn background_image(&self) -> Option<&str> {
        self.background.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(trait_name: &str, theme: &str, date: &str, image_url: &str) -> Record {
        Record {
            trait_name: trait_name.to_string(),
            theme: theme.to_string(),
            date: date.to_string(),
            image_url: image_url.to_string(),
            ..Default::default()
        }
    }

    fn sample() -> Vec<Record> {
        vec![
            rec("A", "X", "2020-01-02", ""),
            rec("A", "X", "2019-05-01", "http://x/old.png"),
            rec("B", "Y", "", "http://x/b.png"),
            rec("A", "Z", "2001", ""),
        ]
    }

    #[test]
    fn test_initial_selection_and_items() {
        let view = TimelineView::new(sample());

        assert_eq!(view.selection(), &Selection::new("A", "X"));
        assert_eq!(view.items().len(), 2);
        assert_eq!(view.items()[0].date, "2019-05-01");
        assert_eq!(view.background_image(), Some("http://x/old.png"));
        assert_eq!(view.theme_options(), &["X".to_string(), "Z".to_string()]);
        assert_eq!(view.trait_options(), &["A".to_string(), "B".to_string()]);
        assert_eq!(view.combinations().len(), 3);
    }

    #[test]
    fn test_empty_dataset() {
        let view = TimelineView::new(Vec::new());

        assert_eq!(view.selection(), &Selection::default());
        assert!(view.items().is_empty());
        assert!(view.combinations().is_empty());
        assert!(view.theme_options().is_empty());
        assert_eq!(view.background_image(), None);
    }

    #[test]
    fn test_select_trait_recomputes_theme_options() {
        let mut view = TimelineView::new(sample());

        view.select_trait("B");
        assert_eq!(view.theme_options(), &["Y".to_string()]);
        // themeはXのままなので一致なし（全件にはならない）
        assert!(view.items().is_empty());
        assert_eq!(view.background_image(), None);

        view.select_theme("Y");
        assert_eq!(view.items().len(), 1);
        assert_eq!(view.background_image(), Some("http://x/b.png"));
    }

    #[test]
    fn test_select_combination_sets_both() {
        let mut view = TimelineView::new(sample());

        assert!(view.select_combination(2));
        assert_eq!(view.selection(), &Selection::new("A", "Z"));
        assert_eq!(view.items().len(), 1);

        assert!(!view.select_combination(99));
        assert_eq!(view.selection(), &Selection::new("A", "Z"));
    }

    #[test]
    fn test_combinations_independent_of_selection() {
        let mut view = TimelineView::new(sample());
        let before = view.combinations().to_vec();

        view.select(Selection::new("B", "Y"));
        assert_eq!(view.combinations(), before.as_slice());
    }

    #[test]
    fn test_replace_records_resets_selection() {
        let mut view = TimelineView::new(sample());
        view.select(Selection::new("B", "Y"));

        view.replace_records(vec![rec("C", "W", "", "")]);
        assert_eq!(view.selection(), &Selection::new("C", "W"));
        assert_eq!(view.items().len(), 1);
    }
}
