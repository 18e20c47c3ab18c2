use anyhow::{Context, Result};
use std::path::Path;

use timeline_common::{load_file, Record};

pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let records = load_file(path).with_context(|| format!("load {}", path.display()))?;
    tracing::info!(path = %path.display(), count = records.len(), "records loaded");
    Ok(records)
}

/// 画像ローダーに渡すURIを作る
///
/// スキーム付きはそのまま、絶対パスは file://、相対パスはCSVのディレクトリ基準。
pub fn resolve_image_uri(image_url: &str, csv_dir: Option<&Path>) -> String {
    let url = image_url.trim();
    if url.contains("://") || url.starts_with("data:") {
        return url.to_string();
    }
    let path = Path::new(url);
    let full = match csv_dir {
        Some(dir) if path.is_relative() => dir.join(path),
        _ => path.to_path_buf(),
    };
    format!("file://{}", full.display())
}
