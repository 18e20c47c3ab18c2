//! 日付の解釈と並び順
//!
//! 並び順の規則:
//! 1. 両方がタイムスタンプとして解釈できれば数値で昇順
//! 2. 片方だけ解釈できれば、解釈できる方が先
//! 3. どちらも解釈できなければ元の文字列をルートロケールの照合順序で比較

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use icu_collator::{Collator, CollatorOptions};
use std::cmp::Ordering;

/// オフセット付き・秒なしの時刻（`2020-01-01T10:00Z` など）
const OFFSET_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M%#z", "%Y-%m-%d %H:%M%#z"];

thread_local! {
    static ROOT_COLLATOR: Option<Collator> =
        Collator::try_new(&Default::default(), CollatorOptions::new()).ok();
}

/// 時刻付きフォーマット（タイムゾーンなし、UTCとして扱う）
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// 日付のみのフォーマット
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
];

/// 日付文字列をUNIXエポックからのミリ秒に変換
///
/// 解釈できなければ `None`（空文字列を含む）。
///
/// # Examples
/// ```
/// use timeline_common::parse_timestamp;
///
/// assert_eq!(parse_timestamp("1970-01-02"), Some(86_400_000));
/// assert!(parse_timestamp("1999").is_some());
/// assert_eq!(parse_timestamp("sometime"), None);
/// ```
pub fn parse_timestamp(value: &str) -> Option<i64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.timestamp_millis());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.timestamp_millis());
    }

    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(value, format) {
            return Some(dt.timestamp_millis());
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return date_millis(date);
        }
    }

    parse_partial_date(value)
}

/// `YYYY` または `YYYY-MM`（月初として扱う）
fn parse_partial_date(value: &str) -> Option<i64> {
    let mut parts = value.splitn(2, '-');
    let year_part = parts.next()?;
    if year_part.len() != 4 || !year_part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: i32 = year_part.parse().ok()?;

    let month = match parts.next() {
        None => 1,
        Some(m) if (1..=2).contains(&m.len()) && m.bytes().all(|b| b.is_ascii_digit()) => {
            m.parse().ok()?
        }
        Some(_) => return None,
    };

    date_millis(NaiveDate::from_ymd_opt(year, month, 1)?)
}

fn date_millis(date: NaiveDate) -> Option<i64> {
    date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc().timestamp_millis())
}

/// ルートロケールの照合順序による文字列比較
///
/// アクセント付き文字は基底文字の位置に並び、大文字小文字だけが異なる場合は小文字が先。
/// 照合器を作れない環境では大文字小文字を無視した比較にする。
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    ROOT_COLLATOR.with(|collator| match collator {
        Some(collator) => collator.compare(a, b),
        None => a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| b.cmp(a)),
    })
}

/// 並べ替え用の日付キー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateKey {
    /// タイムスタンプ（ミリ秒）
    Parsed(i64),
    /// 解釈できなかった元の文字列
    Raw(String),
}

impl DateKey {
    pub fn from_date(value: &str) -> Self {
        match parse_timestamp(value) {
            Some(ms) => DateKey::Parsed(ms),
            None => DateKey::Raw(value.to_string()),
        }
    }
}

impl Ord for DateKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (DateKey::Parsed(a), DateKey::Parsed(b)) => a.cmp(b),
            (DateKey::Parsed(_), DateKey::Raw(_)) => Ordering::Less,
            (DateKey::Raw(_), DateKey::Parsed(_)) => Ordering::Greater,
            (DateKey::Raw(a), DateKey::Raw(b)) => locale_compare(a, b),
        }
    }
}

impl PartialOrd for DateKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// 2つの日付文字列を並び順の規則で比較
pub fn compare_dates(a: &str, b: &str) -> Ordering {
    DateKey::from_date(a).cmp(&DateKey::from_date(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_timestamp("1970-01-01"), Some(0));
        assert_eq!(parse_timestamp("1970-01-02"), Some(86_400_000));
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        assert_eq!(parse_timestamp("1970-01-01T01:00:00+01:00"), Some(0));
        assert_eq!(parse_timestamp("1970-01-01T00:00:01Z"), Some(1_000));
    }

    #[test]
    fn test_parse_offset_without_seconds() {
        assert_eq!(parse_timestamp("1970-01-01T00:01Z"), Some(60_000));
        assert_eq!(parse_timestamp("1970-01-01T01:00+01:00"), Some(0));
        assert_eq!(
            parse_timestamp("2020-01-01T10:00Z"),
            parse_timestamp("2020-01-01T10:00:00Z")
        );
    }

    #[test]
    fn test_parse_naive_datetime() {
        assert_eq!(parse_timestamp("1970-01-01T00:01:00"), Some(60_000));
        assert_eq!(parse_timestamp("1970-01-01 00:00:02"), Some(2_000));
        assert_eq!(parse_timestamp("1970-01-01T00:00:00.250"), Some(250));
    }

    #[test]
    fn test_parse_year_and_month() {
        let y2020 = parse_timestamp("2020").unwrap();
        let y2020_01 = parse_timestamp("2020-01").unwrap();
        let d2020_01_01 = parse_timestamp("2020-01-01").unwrap();
        assert_eq!(y2020, d2020_01_01);
        assert_eq!(y2020_01, d2020_01_01);
        assert!(parse_timestamp("2020-03").unwrap() > y2020);
    }

    #[test]
    fn test_parse_other_formats() {
        let expected = parse_timestamp("2020-01-02");
        assert_eq!(parse_timestamp("2020/01/02"), expected);
        assert_eq!(parse_timestamp("01/02/2020"), expected);
        assert_eq!(parse_timestamp("January 2, 2020"), expected);
        assert_eq!(parse_timestamp("Jan 2, 2020"), expected);
        assert_eq!(parse_timestamp("2 January 2020"), expected);
        assert_eq!(parse_timestamp("  2020-01-02  "), expected);
    }

    #[test]
    fn test_parse_rfc2822() {
        assert_eq!(parse_timestamp("Thu, 01 Jan 1970 00:00:00 +0000"), Some(0));
    }

    #[test]
    fn test_unparseable_dates() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("   "), None);
        assert_eq!(parse_timestamp("circa 1800s"), None);
        assert_eq!(parse_timestamp("2020-13-01"), None);
        assert_eq!(parse_timestamp("20201"), None);
        assert_eq!(parse_timestamp("2020-1x"), None);
    }

    #[test]
    fn test_compare_both_parsed_numeric() {
        assert_eq!(compare_dates("2019-05-01", "2020-01-02"), Ordering::Less);
        assert_eq!(compare_dates("2020", "1999"), Ordering::Greater);
        assert_eq!(compare_dates("2020", "2020-01-01"), Ordering::Equal);
    }

    #[test]
    fn test_compare_parsed_before_unparsed() {
        assert_eq!(compare_dates("2020-01-02", "unknown"), Ordering::Less);
        assert_eq!(compare_dates("", "1999"), Ordering::Greater);
    }

    #[test]
    fn test_compare_unparsed_lexicographic() {
        assert_eq!(compare_dates("early", "late"), Ordering::Less);
        assert_eq!(compare_dates("", "early"), Ordering::Less);
        assert_eq!(compare_dates("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_locale_compare_ignores_case() {
        assert_eq!(locale_compare("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_compare("Banana", "apple"), Ordering::Greater);
        assert_eq!(locale_compare("a", "A"), Ordering::Less);
        assert_eq!(locale_compare("x", "x"), Ordering::Equal);
    }

    #[test]
    fn test_locale_compare_places_accents_with_base_letter() {
        assert_eq!(locale_compare("été", "zoo"), Ordering::Less);
        assert_eq!(locale_compare("Über", "zebra"), Ordering::Less);
        assert_eq!(locale_compare("ete", "été"), Ordering::Less);
        assert_eq!(compare_dates("été", "zoo"), Ordering::Less);
    }
}
