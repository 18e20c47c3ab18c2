//! タイムラインの型定義
//!
//! CLI・デスクトップ・Web(WASM)で共有される型:
//! - Record: 正規化済みの1行
//! - Combination: データ中に現れる (trait, theme) の組
//! - Selection: 現在選択中の (trait, theme)

use serde::{Deserialize, Serialize};

/// 正規化済みのデータ行
///
/// 全フィールドは欠損時に空文字列になる。行位置以外の識別子は持たない。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Record {
    #[serde(rename = "trait")]
    pub trait_name: String,
    pub theme: String,
    pub date: String,
    pub image_url: String,
    pub title: String,
}

/// データ中に現れる (trait, theme) の組
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Combination {
    #[serde(rename = "trait")]
    pub trait_name: String,
    pub theme: String,
}

impl Combination {
    /// セレクタ表示用ラベル（"trait — theme"）
    pub fn label(&self) -> String {
        format!("{} — {}", self.trait_name, self.theme)
    }
}

impl From<&Record> for Combination {
    fn from(record: &Record) -> Self {
        Self {
            trait_name: record.trait_name.clone(),
            theme: record.theme.clone(),
        }
    }
}

/// 現在選択中の (trait, theme)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    #[serde(rename = "trait")]
    pub trait_name: String,
    pub theme: String,
}

impl Selection {
    pub fn new(trait_name: impl Into<String>, theme: impl Into<String>) -> Self {
        Self {
            trait_name: trait_name.into(),
            theme: theme.into(),
        }
    }

    /// 読み込み直後の初期選択: 先頭レコードの値、なければ空
    pub fn initial(records: &[Record]) -> Self {
        records
            .first()
            .map(|first| Self::new(first.trait_name.clone(), first.theme.clone()))
            .unwrap_or_default()
    }

    /// trait・themeのどちらかが空なら未完成の選択
    pub fn is_complete(&self) -> bool {
        !self.trait_name.is_empty() && !self.theme.is_empty()
    }

    /// レコードが選択に一致するか（完全一致）
    pub fn matches(&self, record: &Record) -> bool {
        record.trait_name == self.trait_name && record.theme == self.theme
    }
}

impl From<&Combination> for Selection {
    fn from(combo: &Combination) -> Self {
        Self::new(combo.trait_name.clone(), combo.theme.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_default() {
        let record = Record::default();
        assert_eq!(record.trait_name, "");
        assert_eq!(record.theme, "");
        assert_eq!(record.date, "");
        assert_eq!(record.image_url, "");
        assert_eq!(record.title, "");
    }

    #[test]
    fn test_record_serialize_uses_trait_key() {
        let record = Record {
            trait_name: "Courage".to_string(),
            theme: "War".to_string(),
            ..Default::default()
        };

        let json = serde_json::to_string(&record).expect("シリアライズ失敗");
        assert!(json.contains("\"trait\":\"Courage\""));
        assert!(json.contains("\"image_url\":\"\""));
    }

    #[test]
    fn test_record_deserialize_missing_fields() {
        let json = r#"{"title": "only title"}"#;

        let record: Record = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(record.title, "only title");
        assert_eq!(record.trait_name, "");
    }

    #[test]
    fn test_selection_initial_from_first_record() {
        let records = vec![
            Record { trait_name: "A".into(), theme: "X".into(), ..Default::default() },
            Record { trait_name: "B".into(), theme: "Y".into(), ..Default::default() },
        ];

        assert_eq!(Selection::initial(&records), Selection::new("A", "X"));
    }

    #[test]
    fn test_selection_initial_empty() {
        assert_eq!(Selection::initial(&[]), Selection::default());
        assert!(!Selection::default().is_complete());
    }

    #[test]
    fn test_combination_label() {
        let combo = Combination { trait_name: "A".into(), theme: "X".into() };
        assert_eq!(combo.label(), "A — X");
    }
}
