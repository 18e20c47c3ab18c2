//! データソースの取得
//!
//! ファイルパスまたはHTTP(S) URLから区切りテキストを読み込む。

use crate::error::{Result, TimelineError};
use std::path::PathBuf;
use timeline_common::{parse_records, Record};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Url(String),
}

impl DataSource {
    pub fn parse(value: &str) -> Self {
        let lower = value.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DataSource::Url(value.to_string())
        } else {
            DataSource::File(PathBuf::from(value))
        }
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Url(url) => write!(f, "{}", url),
        }
    }
}

/// ソースの内容を文字列で取得
pub async fn fetch_text(source: &DataSource) -> Result<String> {
    match source {
        DataSource::File(path) => Ok(tokio::fs::read_to_string(path).await?),
        DataSource::Url(url) => {
            let response = reqwest::get(url).await?;
            let status = response.status();
            if !status.is_success() {
                return Err(TimelineError::Fetch(format!("HTTP {}: {}", status.as_u16(), url)));
            }
            Ok(response.text().await?)
        }
    }
}

/// 取得してレコードに変換（失敗は呼び出し側で縮退させる）
pub async fn load_records(source: &DataSource) -> Result<Vec<Record>> {
    let content = fetch_text(source).await?;
    let records = parse_records(&content)?;
    tracing::info!(source = %source, records = records.len(), "dataset loaded");
    Ok(records)
}
