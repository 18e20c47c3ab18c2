//! 選択と派生値の計算
//!
//! レコード全体と選択状態から、セレクタの選択肢・表示列・背景画像を求める。
//! すべて入力だけで決まる純粋関数。

use crate::date::DateKey;
use crate::types::{Combination, Record, Selection};
use std::collections::HashSet;

/// 出現順を保った重複なしの (trait, theme) 一覧
///
/// 空文字列もキーの一部として扱う。
pub fn combinations(records: &[Record]) -> Vec<Combination> {
    let mut seen = HashSet::new();
    records
        .iter()
        .map(Combination::from)
        .filter(|combo| seen.insert(combo.clone()))
        .collect()
}

/// 値の重複と空文字列を除き、初出順に並べる
fn distinct_non_empty<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|value| !value.is_empty() && seen.insert(*value))
        .map(str::to_string)
        .collect()
}

/// traitの選択肢
pub fn trait_options(records: &[Record]) -> Vec<String> {
    distinct_non_empty(records.iter().map(|r| r.trait_name.as_str()))
}

/// 指定traitを持つレコードに現れるthemeの選択肢
pub fn theme_options(records: &[Record], trait_name: &str) -> Vec<String> {
    distinct_non_empty(
        records
            .iter()
            .filter(|r| r.trait_name == trait_name)
            .map(|r| r.theme.as_str()),
    )
}

/// 日付順に安定ソート
pub fn sort_by_date(records: &mut [Record]) {
    records.sort_by_cached_key(|r| DateKey::from_date(&r.date));
}

/// 選択に一致するレコードを日付順で返す
///
/// trait・themeのどちらかが空なら常に空（全件にはフォールバックしない）。
pub fn filter_sorted(records: &[Record], selection: &Selection) -> Vec<Record> {
    if !selection.is_complete() {
        return Vec::new();
    }

    let mut items: Vec<Record> = records
        .iter()
        .filter(|r| selection.matches(r))
        .cloned()
        .collect();
    sort_by_date(&mut items);
    items
}

/// 背景画像: 並び順で最初の、空白以外の image_url（トリム済み）
pub fn background_image(items: &[Record]) -> Option<&str> {
    items
        .iter()
        .map(|r| r.image_url.trim())
        .find(|url| !url.is_empty())
}
